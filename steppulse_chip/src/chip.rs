// Implements the chip binding, wiring the ESC controller to host pins,
// attributes and the simulated clock.

// Key Features:
// - Registers the chip's pin and attribute surface at init, failing fatally
//   on any resource conflict
// - Samples inputs, configuration and the clock exactly once per tick
// - Writes all four phase pins together on commutation steps only
// - Refreshes the analog output every tick

// Detailed Operation:
// EscChip::init acquires the two drive inputs, the four phase outputs, the
// analog sense and output pins, and the five configuration attributes, then
// builds the controller from the initial configuration snapshot. On each
// host timer callback, on_tick samples the drive lines, the supply sense
// and the attributes, runs the controller, and mirrors the result onto the
// host: the phase pins change in one pass on ticks that commutated, and the
// normalized voltage magnitude is driven onto Vout unconditionally.

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

use steppulse_algo::math_float::filters::lpf::TimeConstant;
use steppulse_algo::{ChipConfig, ChipOutputs, DataInputs, EscController, TICK_INTERVAL_US};

use crate::host::{AttrId, ChipError, ChipHost, PinId};
use crate::pinout;

/// One simulated ESC chip instance: host handles plus the owned controller.
pub struct EscChip {
    pin_ina: PinId,
    pin_inb: PinId,
    pin_am: PinId,
    pin_ap: PinId,
    pin_bp: PinId,
    pin_bm: PinId,
    pin_vout: PinId,
    pin_vmot: PinId,

    attr_tau: AttrId,
    attr_tau_exp: AttrId,
    attr_max_speed: AttrId,
    attr_override_voltage: AttrId,
    attr_override_enable: AttrId,

    controller: EscController,
}

impl EscChip {
    /// Acquires the chip's pins and attributes from the host and builds the
    /// controller. Any registration failure is fatal to the instance.
    pub fn init(host: &mut impl ChipHost) -> Result<Self, ChipError> {
        let pin_ina = pinout::INA.init(host)?;
        let pin_inb = pinout::INB.init(host)?;
        let pin_am = pinout::PHASE_AM.init(host)?;
        let pin_ap = pinout::PHASE_AP.init(host)?;
        let pin_bp = pinout::PHASE_BP.init(host)?;
        let pin_bm = pinout::PHASE_BM.init(host)?;
        let pin_vout = pinout::VOUT.init(host)?;
        let pin_vmot = pinout::VMOT.init(host)?;

        let attr_tau = pinout::TAU.init(host)?;
        let attr_tau_exp = pinout::TAU_EXP.init(host)?;
        let attr_max_speed = pinout::MAX_SPEED.init(host)?;
        let attr_override_voltage = pinout::OVERRIDE_VOLTAGE.init(host)?;
        let attr_override_enable = pinout::OVERRIDE_ENABLE.init(host)?;

        let initial = ChipConfig {
            time_constant: TimeConstant::new(
                host.attr_read_float(attr_tau),
                host.attr_read_float(attr_tau_exp),
            ),
            max_speed_rpm: host.attr_read_float(attr_max_speed),
            override_voltage: None,
        };
        let chip = EscChip {
            pin_ina,
            pin_inb,
            pin_am,
            pin_ap,
            pin_bp,
            pin_bm,
            pin_vout,
            pin_vmot,
            attr_tau,
            attr_tau_exp,
            attr_max_speed,
            attr_override_voltage,
            attr_override_enable,
            controller: EscController::new(host.sim_micros(), TICK_INTERVAL_US, &initial),
        };
        log::debug!("CHIP: pin and attribute surface registered");
        Ok(chip)
    }

    // Attributes are host-settable at any moment; one snapshot per tick.
    fn sample_config(&self, host: &impl ChipHost) -> ChipConfig {
        let time_constant = TimeConstant::new(
            host.attr_read_float(self.attr_tau),
            host.attr_read_float(self.attr_tau_exp),
        );
        let override_voltage = (host.attr_read_float(self.attr_override_enable) != 0.0)
            .then(|| host.attr_read_float(self.attr_override_voltage));
        ChipConfig {
            time_constant,
            max_speed_rpm: host.attr_read_float(self.attr_max_speed),
            override_voltage,
        }
    }

    /// Timer callback, invoked by the host at the fixed tick period.
    pub fn on_tick(&mut self, host: &mut impl ChipHost) -> ChipOutputs {
        let now_us = host.sim_micros();
        let inputs = DataInputs {
            in_a: host.pin_read(self.pin_ina),
            in_b: host.pin_read(self.pin_inb),
            supply_sense: host.adc_read(self.pin_vmot),
        };
        let cfg = self.sample_config(host);

        let out = self.controller.tick(now_us, inputs, &cfg);

        if out.stepped {
            // All four phase lines change together, in table column order
            host.pin_write(self.pin_am, out.phases[0]);
            host.pin_write(self.pin_ap, out.phases[1]);
            host.pin_write(self.pin_bp, out.phases[2]);
            host.pin_write(self.pin_bm, out.phases[3]);
        }
        host.dac_write(self.pin_vout, out.vout_norm);

        out
    }

    /// Access to the owned controller state.
    pub fn controller(&self) -> &EscController {
        &self.controller
    }
}
