use super::VDRIVE_FS;

/// Full steps per mechanical revolution of the driven stepper.
pub const STEPS_PER_REV: u32 = 200;

/// Step interval used when the commanded speed is effectively zero. Large
/// enough that the sequencer never fires within any realistic simulation run.
pub const STOPPED_INTERVAL_US: u32 = (60_000_000 / STEPS_PER_REV) * 1000;

// Speeds below this RPM map to the stopped interval instead of the division.
const MIN_RPM: f32 = 1e-4;

const US_PER_MINUTE: f32 = 60_000_000.0;

/// Derives the microseconds-per-step interval from the filtered voltage and
/// the configured maximum speed.
pub struct StepPlanner {
    interval_us: u32,
    last_voltage: f32,
    last_max_rpm: f32,
}

impl StepPlanner {
    pub fn new() -> StepPlanner {
        StepPlanner {
            interval_us: STOPPED_INTERVAL_US,
            last_voltage: 0.0,
            last_max_rpm: 0.0,
        }
    }

    /// Math call. Recomputes the interval only when the voltage or the max
    /// speed setting differ from the previous tick; exact comparison is the
    /// cache invalidation rule.
    pub fn tick(&mut self, voltage: f32, max_rpm: f32) -> u32 {
        if voltage == self.last_voltage && max_rpm == self.last_max_rpm {
            return self.interval_us;
        }
        self.last_voltage = voltage;
        self.last_max_rpm = max_rpm;

        let rpm = max_rpm * voltage.abs() / VDRIVE_FS;
        if rpm > MIN_RPM {
            // us/step = us/min / (steps/rev * rev/min)
            self.interval_us = (US_PER_MINUTE / (STEPS_PER_REV as f32 * rpm)) as u32;
        } else {
            self.interval_us = STOPPED_INTERVAL_US;
        }
        self.interval_us
    }

    /// Function to retrieve the current interval
    pub fn interval_us(&self) -> u32 {
        self.interval_us
    }

    pub fn is_stopped(&self) -> bool {
        self.interval_us == STOPPED_INTERVAL_US
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_at_60_rpm_gives_5000_us() {
        let mut planner = StepPlanner::new();
        assert_eq!(planner.tick(5.0, 60.0), 5000);
    }

    #[test]
    fn interval_scales_inversely_with_voltage() {
        let mut planner = StepPlanner::new();
        assert_eq!(planner.tick(2.5, 60.0), 10_000);
        assert_eq!(planner.tick(-2.5, 60.0), 10_000); // polarity does not matter
    }

    #[test]
    fn near_zero_speed_maps_to_stopped_sentinel() {
        let mut planner = StepPlanner::new();
        assert_eq!(planner.tick(0.0, 60.0), STOPPED_INTERVAL_US);
        assert!(planner.is_stopped());
        // Just below the threshold voltage for 60 RPM max
        assert_eq!(planner.tick(5e-6, 60.0), STOPPED_INTERVAL_US);
    }

    #[test]
    fn zero_or_negative_max_speed_maps_to_stopped_sentinel() {
        let mut planner = StepPlanner::new();
        assert_eq!(planner.tick(5.0, 0.0), STOPPED_INTERVAL_US);
        assert_eq!(planner.tick(5.0, -60.0), STOPPED_INTERVAL_US);
    }

    #[test]
    fn unchanged_inputs_keep_cached_interval() {
        let mut planner = StepPlanner::new();
        let first = planner.tick(5.0, 60.0);
        assert_eq!(planner.tick(5.0, 60.0), first);
    }

    #[test]
    fn max_speed_change_alone_recomputes() {
        let mut planner = StepPlanner::new();
        planner.tick(5.0, 60.0);
        assert_eq!(planner.tick(5.0, 120.0), 2500);
    }
}
