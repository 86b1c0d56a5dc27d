use thiserror::Error;

/// Fatal resource-acquisition failures at chip init. Past init there is no
/// error channel: degenerate values are absorbed by the core's guard
/// branches instead of being signalled.
#[derive(Debug, Error)]
pub enum ChipError {
    #[error("pin \"{0}\" is already registered")]
    DuplicatePin(String),

    #[error("attribute \"{0}\" is already registered")]
    DuplicateAttr(String),
}

/// Electrical role of a registered pin.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PinMode {
    Input,
    Output,
    Analog,
}

/// Opaque handle to a host pin.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PinId(pub(crate) usize);

/// Opaque handle to a host attribute.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AttrId(pub(crate) usize);

/// Services a simulation host provides to one chip instance.
///
/// The host owns time and scheduling: it invokes the chip's tick handler at
/// a fixed period, and the chip never schedules itself. Attributes are
/// settable by the host at any moment and only ever sampled by the chip.
pub trait ChipHost {
    /// Registers a named pin; fails if the name is already taken.
    fn pin_init(&mut self, name: &str, mode: PinMode) -> Result<PinId, ChipError>;

    /// Registers a named float attribute with its default value.
    fn attr_init_float(&mut self, name: &str, default: f32) -> Result<AttrId, ChipError>;

    fn pin_read(&self, pin: PinId) -> bool;

    fn pin_write(&mut self, pin: PinId, level: bool);

    /// Reads an analog pin, in volts.
    fn adc_read(&self, pin: PinId) -> f32;

    /// Drives an analog pin, in volts.
    fn dac_write(&mut self, pin: PinId, value: f32);

    fn attr_read_float(&self, attr: AttrId) -> f32;

    /// Monotonic simulated-time counter in microseconds.
    fn sim_micros(&self) -> u64;
}
