//! Control core of a simulated electronic speed controller that turns the
//! paired INA/INB drive inputs into quadrature commutation for a stepper.
//!
//! Inputs: two digital drive lines (forward / reverse intent) and a motor
//! supply sense. Outputs: four phase levels (A-, A+, B+, B-) plus a
//! normalized analog voltage. One synchronous update per host timer tick.

pub mod math_float;
pub mod motor_driver;

use math_float::filters::lpf::{FilterLPF, TimeConstant};
use motor_driver::{PhaseSequencer, StepPlanner, VDRIVE_FS};

/// Host timer period in the reference configuration.
pub const TICK_INTERVAL_US: u32 = 100;

// Ticks to wait before the one-shot motor supply check.
const SUPPLY_CHECK_TICKS: u32 = 100;

/// Input levels sampled by the binding layer once per tick.
#[derive(Clone, Copy, Default)]
pub struct DataInputs {
    /// Forward drive line.
    pub in_a: bool,

    /// Reverse drive line.
    pub in_b: bool,

    /// Motor supply sense in volts. Read every tick, not yet part of the
    /// control law.
    pub supply_sense: f32,
}

/// Externally settable parameters, sampled (never mutated) each tick.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ChipConfig {
    /// Smoothing time constant.
    pub time_constant: TimeConstant,

    /// Speed at full-scale drive voltage, in RPM.
    pub max_speed_rpm: f32,

    /// Debug bypass: when set, forces the filter output to this value.
    pub override_voltage: Option<f32>,
}

impl Default for ChipConfig {
    fn default() -> Self {
        ChipConfig {
            time_constant: TimeConstant::new(10.0, -1.0),
            max_speed_rpm: 60.0,
            override_voltage: None,
        }
    }
}

/// Result of one tick: the latched phase pattern, whether this tick
/// commutated, and the normalized analog output.
#[derive(Clone, Copy, Debug)]
pub struct ChipOutputs {
    /// Levels for (A-, A+, B+, B-). All four change together on a step.
    pub phases: [bool; 4],

    /// True on ticks where a commutation transition occurred.
    pub stepped: bool,

    /// |voltage| / full scale, refreshed every tick.
    pub vout_norm: f32,
}

/// Target voltage for the drive input pair: forward pulls toward +full
/// scale, reverse toward -full scale, idle or conflicting inputs toward 0.
pub fn drive_target(in_a: bool, in_b: bool) -> f32 {
    if in_a && !in_b {
        VDRIVE_FS
    } else if in_b && !in_a {
        -VDRIVE_FS
    } else {
        0.0
    }
}

/// The main controller struct, holding the filter, planner and sequencer
/// state for one simulated chip instance.
pub struct EscController {
    filter: FilterLPF,
    planner: StepPlanner,
    sequencer: PhaseSequencer,

    phases: [bool; 4], // Latched phase levels between steps
    sup_check: u32,
}

impl EscController {
    /// Create a new controller instance.
    ///
    /// # Arguments
    /// * `now_us` - current host clock reading
    /// * `tick_interval_us` - fixed period the host schedules ticks at
    /// * `cfg` - initial configuration snapshot
    pub fn new(now_us: u64, tick_interval_us: u32, cfg: &ChipConfig) -> Self {
        let sequencer = PhaseSequencer::new(now_us);
        let phases = sequencer.pattern();
        Self {
            filter: FilterLPF::new(tick_interval_us, cfg.time_constant),
            planner: StepPlanner::new(),
            sequencer,
            phases,
            sup_check: SUPPLY_CHECK_TICKS,
        }
    }

    /// Main update method, run once per host timer tick.
    ///
    /// Filters the drive target, derives the step interval from the result,
    /// commutates when the interval has elapsed and reports the analog
    /// output. The whole update is synchronous.
    pub fn tick(&mut self, now_us: u64, inputs: DataInputs, cfg: &ChipConfig) -> ChipOutputs {
        self.supply_check(inputs.supply_sense);

        let target = drive_target(inputs.in_a, inputs.in_b);
        let mut voltage = self.filter.tick(target, cfg.time_constant);
        if let Some(forced) = cfg.override_voltage {
            voltage = self.filter.force(forced);
        }

        let interval_us = self.planner.tick(voltage, cfg.max_speed_rpm);

        let stepped = match self.sequencer.tick(now_us, interval_us, voltage) {
            Some(pattern) => {
                self.phases = pattern;
                true
            }
            None => false,
        };

        ChipOutputs {
            phases: self.phases,
            stepped,
            vout_norm: voltage.abs() / VDRIVE_FS,
        }
    }

    // One-shot plausibility check of the motor supply rail shortly after
    // start. The sense input stays outside the control law.
    fn supply_check(&mut self, supply_sense: f32) {
        if self.sup_check == 0 {
            return;
        }
        self.sup_check -= 1;
        if self.sup_check == 0 {
            if supply_sense < VDRIVE_FS {
                log::warn!(
                    "SUPPLY is not enough: {:.2}V while at least {:.1}V is needed",
                    supply_sense,
                    VDRIVE_FS
                );
            } else {
                log::debug!("SUPPLY is OK: {:.2}V", supply_sense);
            }
        }
    }

    /// Getter for the filtered drive voltage
    pub fn voltage(&self) -> f32 {
        self.filter.get_output()
    }

    /// Getter for the current phase index
    pub fn step(&self) -> u8 {
        self.sequencer.step()
    }

    /// Getter for the current step interval
    pub fn step_interval_us(&self) -> u32 {
        self.planner.interval_us()
    }
}
