use crate::host::{AttrId, ChipError, ChipHost, PinId, PinMode};

/// Represents the definition of a chip pin.
pub struct PinDef {
    /// External pin name as seen by the host.
    name: &'static str,
    /// The role of the pin (input, output, analog).
    mode: PinMode,
}

impl PinDef {
    /// Registers the pin with the host. Useful for predefined pin
    /// configurations.
    pub fn init(&self, host: &mut impl ChipHost) -> Result<PinId, ChipError> {
        host.pin_init(self.name, self.mode)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Represents the definition of a float attribute and its default value.
pub struct AttrDef {
    name: &'static str,
    default: f32,
}

impl AttrDef {
    pub fn init(&self, host: &mut impl ChipHost) -> Result<AttrId, ChipError> {
        host.attr_init_float(self.name, self.default)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

pub const INA: PinDef = PinDef {
    name: "INA",
    mode: PinMode::Input,
};

pub const INB: PinDef = PinDef {
    name: "INB",
    mode: PinMode::Input,
};

pub const PHASE_AM: PinDef = PinDef {
    name: "A-",
    mode: PinMode::Output,
};

pub const PHASE_AP: PinDef = PinDef {
    name: "A+",
    mode: PinMode::Output,
};

pub const PHASE_BP: PinDef = PinDef {
    name: "B+",
    mode: PinMode::Output,
};

pub const PHASE_BM: PinDef = PinDef {
    name: "B-",
    mode: PinMode::Output,
};

pub const VOUT: PinDef = PinDef {
    name: "Vout",
    mode: PinMode::Analog,
};

pub const VMOT: PinDef = PinDef {
    name: "VMOT",
    mode: PinMode::Analog,
};

pub const TAU: AttrDef = AttrDef {
    name: "Tau",
    default: 10.0,
};

pub const TAU_EXP: AttrDef = AttrDef {
    name: "Texp",
    default: -1.0,
};

pub const MAX_SPEED: AttrDef = AttrDef {
    name: "MaxSpeed",
    default: 60.0,
};

pub const OVERRIDE_VOLTAGE: AttrDef = AttrDef {
    name: "OverrideVoltage",
    default: 0.0,
};

/// Runtime switch for the debug override; any non-zero value enables it.
pub const OVERRIDE_ENABLE: AttrDef = AttrDef {
    name: "OverrideEnable",
    default: 0.0,
};
