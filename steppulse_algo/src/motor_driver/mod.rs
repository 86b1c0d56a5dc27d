// Implements the step drive module, deriving the commutation cadence from the
// filtered drive voltage and sequencing the quadrature phase pattern.

// Key Features:
// - Maps filtered voltage magnitude and a max speed setting to a step interval
// - Caches the interval and recomputes it only when its inputs change
// - Sequences a 4-state quadrature pattern with wraparound in both directions
// - Separates continuous filtering from discrete, interval-gated stepping

// Detailed Operation:
// The StepPlanner converts the filtered voltage into RPM against the drive
// full scale and derives the microseconds-per-step interval from it, falling
// back to a large "stopped" sentinel near zero speed. The PhaseSequencer
// compares elapsed simulated time against that interval and, when a step is
// due, advances or retreats one entry through the quadrature table depending
// on voltage polarity, latching all four phase levels together. The stepping
// cadence is therefore itself a function of the filtered control signal.

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

pub mod phase_sequencer;
pub mod step_planner;

pub use phase_sequencer::PhaseSequencer;
pub use step_planner::StepPlanner;

/// Full-scale drive voltage; filter targets are +/- this value.
pub const VDRIVE_FS: f32 = 5.0;
