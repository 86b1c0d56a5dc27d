//! Software stand-in for the simulation host: named pins, an attribute
//! store and a microsecond clock advanced in fixed ticks. Drives the chip
//! the way the real host's periodic timer would.

use crate::chip::EscChip;
use crate::host::{AttrId, ChipError, ChipHost, PinId, PinMode};
use steppulse_algo::{ChipOutputs, TICK_INTERVAL_US};

struct SimPin {
    name: String,
    mode: PinMode,
    level: bool,
    volts: f32,
}

struct SimAttr {
    name: String,
    value: f32,
}

/// In-process simulation host with a fixed tick period.
pub struct SimHost {
    pins: Vec<SimPin>,
    attrs: Vec<SimAttr>,
    clock_us: u64,
    tick_interval_us: u32,
}

impl SimHost {
    pub fn new() -> SimHost {
        SimHost {
            pins: Vec::new(),
            attrs: Vec::new(),
            clock_us: 0,
            tick_interval_us: TICK_INTERVAL_US,
        }
    }

    fn pin_index(&self, name: &str) -> usize {
        self.pins
            .iter()
            .position(|p| p.name == name)
            .unwrap_or_else(|| panic!("unknown pin \"{name}\""))
    }

    fn attr_index(&self, name: &str) -> usize {
        self.attrs
            .iter()
            .position(|a| a.name == name)
            .unwrap_or_else(|| panic!("unknown attribute \"{name}\""))
    }

    /// Sets a digital input level by pin name.
    ///
    /// # Panics
    /// Panics if no pin with this name is registered.
    pub fn set_pin(&mut self, name: &str, level: bool) {
        let idx = self.pin_index(name);
        self.pins[idx].level = level;
    }

    /// Sets an analog input voltage by pin name.
    pub fn set_volts(&mut self, name: &str, volts: f32) {
        let idx = self.pin_index(name);
        self.pins[idx].volts = volts;
    }

    /// Current digital level of a named pin.
    pub fn pin_level(&self, name: &str) -> bool {
        self.pins[self.pin_index(name)].level
    }

    /// Mode a named pin was registered with.
    pub fn pin_mode(&self, name: &str) -> PinMode {
        self.pins[self.pin_index(name)].mode
    }

    /// Current analog voltage of a named pin.
    pub fn pin_volts(&self, name: &str) -> f32 {
        self.pins[self.pin_index(name)].volts
    }

    /// Overwrites a named attribute, as the host UI would.
    pub fn set_attr(&mut self, name: &str, value: f32) {
        let idx = self.attr_index(name);
        self.attrs[idx].value = value;
    }

    /// Current value of a named attribute.
    pub fn attr(&self, name: &str) -> f32 {
        self.attrs[self.attr_index(name)].value
    }

    pub fn micros(&self) -> u64 {
        self.clock_us
    }

    /// Advances simulated time by one tick period and fires the chip's
    /// timer callback, like the host scheduler does.
    pub fn run_tick(&mut self, chip: &mut EscChip) -> ChipOutputs {
        self.clock_us += self.tick_interval_us as u64;
        chip.on_tick(self)
    }

    /// Runs `count` consecutive ticks; returns the last tick's outputs.
    pub fn run_ticks(&mut self, chip: &mut EscChip, count: u32) -> ChipOutputs {
        let mut out = self.run_tick(chip);
        for _ in 1..count {
            out = self.run_tick(chip);
        }
        out
    }

    /// Runs whole milliseconds of simulated time.
    pub fn run_millis(&mut self, chip: &mut EscChip, millis: u32) -> ChipOutputs {
        self.run_ticks(chip, millis * 1000 / self.tick_interval_us)
    }
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipHost for SimHost {
    fn pin_init(&mut self, name: &str, mode: PinMode) -> Result<PinId, ChipError> {
        if self.pins.iter().any(|p| p.name == name) {
            return Err(ChipError::DuplicatePin(name.to_string()));
        }
        self.pins.push(SimPin {
            name: name.to_string(),
            mode,
            level: false,
            volts: 0.0,
        });
        Ok(PinId(self.pins.len() - 1))
    }

    fn attr_init_float(&mut self, name: &str, default: f32) -> Result<AttrId, ChipError> {
        if self.attrs.iter().any(|a| a.name == name) {
            return Err(ChipError::DuplicateAttr(name.to_string()));
        }
        self.attrs.push(SimAttr {
            name: name.to_string(),
            value: default,
        });
        Ok(AttrId(self.attrs.len() - 1))
    }

    fn pin_read(&self, pin: PinId) -> bool {
        self.pins[pin.0].level
    }

    fn pin_write(&mut self, pin: PinId, level: bool) {
        self.pins[pin.0].level = level;
    }

    fn adc_read(&self, pin: PinId) -> f32 {
        self.pins[pin.0].volts
    }

    fn dac_write(&mut self, pin: PinId, value: f32) {
        self.pins[pin.0].volts = value;
    }

    fn attr_read_float(&self, attr: AttrId) -> f32 {
        self.attrs[attr.0].value
    }

    fn sim_micros(&self) -> u64 {
        self.clock_us
    }
}
