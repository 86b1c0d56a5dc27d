// Defining the FilterLPF struct that implements first-order voltage smoothing.

/// Filter time constant as configured externally: mantissa * 10^exponent seconds.
///
/// Kept as the raw pair so a changed configuration can be detected by plain
/// comparison instead of re-deriving seconds every tick.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TimeConstant {
    pub mantissa: f32,
    pub exponent: f32,
}

impl TimeConstant {
    pub fn new(mantissa: f32, exponent: f32) -> TimeConstant {
        TimeConstant { mantissa, exponent }
    }

    /// Time constant in seconds.
    pub fn seconds(&self) -> f32 {
        self.mantissa * 10f32.powf(self.exponent)
    }
}

/// Below this tau (seconds) the filter is treated as disabled.
pub const TAU_EPSILON: f32 = 1e-8;

pub struct FilterLPF {
    output: f32,
    frac: f32,  // Per-tick approach fraction 1 - exp(-dt/tau), always in [0, 1)
    tau_s: f32,
    cfg: TimeConstant, // Last seen configuration, the cache invalidation key
    dt_s: f32,
}

impl FilterLPF {
    /// Constructor to initialize the filter for a fixed tick interval
    pub fn new(tick_interval_us: u32, cfg: TimeConstant) -> FilterLPF {
        let mut filter = FilterLPF {
            output: 0.0,
            frac: 0.0,
            tau_s: 0.0,
            cfg,
            dt_s: tick_interval_us as f32 * 1e-6,
        };
        filter.update_coeff(cfg);
        filter
    }

    // Recomputes tau and the approach fraction. Only called when the
    // configured pair changed, keeping exp/powf off the per-tick path.
    fn update_coeff(&mut self, cfg: TimeConstant) {
        self.cfg = cfg;
        self.tau_s = cfg.seconds();
        if self.tau_s > TAU_EPSILON {
            self.frac = 1.0 - (-self.dt_s / self.tau_s).exp();
        } else {
            self.frac = 0.0;
        }
        log::debug!(
            "FILTER: tau = {}s, per-tick fraction = {}",
            self.tau_s,
            self.frac
        );
    }

    /// Math call. Moves the output toward `target` by the cached fraction;
    /// with tau below [`TAU_EPSILON`] the update is skipped and the previous
    /// output is held.
    pub fn tick(&mut self, target: f32, cfg: TimeConstant) -> f32 {
        if cfg != self.cfg {
            self.update_coeff(cfg);
        }
        if self.is_active() {
            self.output += (target - self.output) * self.frac;
        }
        self.output
    }

    /// Whether the configured tau is large enough for the filter to run.
    pub fn is_active(&self) -> bool {
        self.tau_s > TAU_EPSILON
    }

    /// Overwrites the filter state directly (debug override path). Returns
    /// the new output so the caller can continue with the forced value.
    pub fn force(&mut self, voltage: f32) -> f32 {
        self.output = voltage;
        self.output
    }

    /// Function to retrieve the output value
    pub fn get_output(&self) -> f32 {
        self.output
    }
}
