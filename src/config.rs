use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, SamplingError};
use crate::operations::curve_zones::{DEFAULT_COS_THRESHOLD, DEFAULT_SCAN_STEP};
use crate::operations::edge_offset::DEFAULT_TANGENT_EPSILON;
use crate::operations::sampler::DEFAULT_ATTEMPT_BUDGET;

/// Default half-width margin of a curve zone around each detected bend.
pub const DEFAULT_CURVE_RECOIL: f64 = 130.0;

/// Tunables for one sampling run.
///
/// Lengths are in the units of the centerline's coordinate system (metres for
/// a projected CRS); areas are in those units squared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Paved width of the road.
    pub pavement_width: f64,
    /// Paved area that one sample may represent.
    pub min_area_per_sample: f64,
    /// Requested number of samples; the normative minimum may raise it.
    pub desired_count: usize,
    /// Minimum arc-length distance between any two samples.
    pub min_spacing: f64,
    /// Half-width of each curve zone.
    pub curve_recoil: f64,
    /// Arc-length step of the curve scan.
    pub scan_step: f64,
    /// Cosine of the per-step direction change below which a bend is flagged.
    pub cos_threshold: f64,
    /// Maximum number of rejection-sampling draws.
    pub attempt_budget: usize,
    /// Finite-difference step for the offset tangent.
    pub tangent_epsilon: f64,
    /// Seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            pavement_width: 7.0,
            min_area_per_sample: 3000.0,
            desired_count: 0,
            min_spacing: 130.0,
            curve_recoil: DEFAULT_CURVE_RECOIL,
            scan_step: DEFAULT_SCAN_STEP,
            cos_threshold: DEFAULT_COS_THRESHOLD,
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            tangent_epsilon: DEFAULT_TANGENT_EPSILON,
            seed: None,
        }
    }
}

impl SamplingConfig {
    /// Creates a configuration from the four per-road parameters, keeping the
    /// detection and sampling defaults.
    #[must_use]
    pub fn new(
        pavement_width: f64,
        min_area_per_sample: f64,
        desired_count: usize,
        min_spacing: f64,
    ) -> Self {
        Self {
            pavement_width,
            min_area_per_sample,
            desired_count,
            min_spacing,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_curve_recoil(mut self, recoil: f64) -> Self {
        self.curve_recoil = recoil;
        self
    }

    #[must_use]
    pub fn with_scan_step(mut self, step: f64) -> Self {
        self.scan_step = step;
        self
    }

    #[must_use]
    pub fn with_cos_threshold(mut self, threshold: f64) -> Self {
        self.cos_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_attempt_budget(mut self, attempts: usize) -> Self {
        self.attempt_budget = attempts;
        self
    }

    #[must_use]
    pub fn with_tangent_epsilon(mut self, epsilon: f64) -> Self {
        self.tangent_epsilon = epsilon;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Half of the pavement width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.pavement_width * 0.5
    }

    /// Checks every parameter before a run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` naming the first bad field.
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self) -> Result<()> {
        positive("pavement_width", self.pavement_width)?;
        positive("min_area_per_sample", self.min_area_per_sample)?;
        non_negative("min_spacing", self.min_spacing)?;
        non_negative("curve_recoil", self.curve_recoil)?;
        positive("scan_step", self.scan_step)?;
        positive("tangent_epsilon", self.tangent_epsilon)?;

        if !(self.cos_threshold > -1.0 && self.cos_threshold <= 1.0) {
            return Err(invalid(
                "cos_threshold",
                self.cos_threshold,
                "must lie in (-1, 1]",
            ));
        }
        if self.attempt_budget == 0 {
            return Err(invalid(
                "attempt_budget",
                self.attempt_budget as f64,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> SamplingError {
    ConfigError::InvalidParameter {
        name,
        value,
        reason,
    }
    .into()
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be positive and finite"))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be non-negative and finite"))
    }
}
