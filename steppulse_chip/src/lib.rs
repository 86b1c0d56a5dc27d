//! Binding between the ESC control core and a simulation host: the services
//! the host supplies (pins, attributes, the simulated clock), the chip's
//! pin and attribute wiring, and a software host for benches and tests.

pub mod chip;
pub mod host;
pub mod pinout;
pub mod sim;

pub use chip::EscChip;
pub use host::{ChipError, ChipHost, PinMode};
pub use sim::SimHost;
