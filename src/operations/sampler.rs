use rand::Rng;
use tracing::{debug, warn};

use super::curve_zones::ZoneSet;

/// Default number of draws before the sampler gives up.
pub const DEFAULT_ATTEMPT_BUDGET: usize = 40_000;

/// Outcome of a sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDraw {
    /// Accepted arc-length positions in acceptance order.
    pub positions: Vec<f64>,
    /// Number of candidates drawn.
    pub attempts: usize,
    /// Count the run was asked for.
    pub target: usize,
}

impl SampleDraw {
    /// Returns `true` if the target count was reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.positions.len() >= self.target
    }

    /// Number of samples missing from the target.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.positions.len())
    }
}

/// Rejection sampler for arc-length positions along a centerline.
///
/// Each attempt draws a uniform candidate in `[0, length)`. A candidate is
/// rejected if it lies in a forbidden zone (inclusive bounds) or closer than
/// `min_spacing` to any accepted position. Sampling stops when `target`
/// positions are accepted or the attempt budget runs out; the second case
/// yields a partial [`SampleDraw`].
///
/// The spacing test scans the whole accepted set, so a run costs
/// `O(attempts * target)`.
#[derive(Debug)]
pub struct ConstrainedSampler<'a> {
    length: f64,
    zones: &'a ZoneSet,
    min_spacing: f64,
    target: usize,
    attempt_budget: usize,
}

impl<'a> ConstrainedSampler<'a> {
    /// Creates a sampler over `[0, length)`.
    #[must_use]
    pub fn new(length: f64, zones: &'a ZoneSet, min_spacing: f64, target: usize) -> Self {
        Self {
            length,
            zones,
            min_spacing,
            target,
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
        }
    }

    /// Sets the maximum number of draws.
    #[must_use]
    pub fn with_attempt_budget(mut self, attempt_budget: usize) -> Self {
        self.attempt_budget = attempt_budget;
        self
    }

    /// Runs the rejection loop with the given random source.
    pub fn execute<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleDraw {
        // At most one acceptance per attempt.
        let mut positions: Vec<f64> = Vec::with_capacity(self.target.min(self.attempt_budget));
        let mut attempts = 0;

        if self.length > 0.0 && self.length.is_finite() {
            while positions.len() < self.target && attempts < self.attempt_budget {
                attempts += 1;
                let candidate = rng.random_range(0.0..self.length);

                if self.zones.contains(candidate) {
                    continue;
                }
                if positions
                    .iter()
                    .any(|&p| (candidate - p).abs() < self.min_spacing)
                {
                    continue;
                }
                positions.push(candidate);
            }
        }

        let draw = SampleDraw {
            positions,
            attempts,
            target: self.target,
        };

        if draw.is_complete() {
            debug!(accepted = draw.positions.len(), attempts, "sampling complete");
        } else {
            warn!(
                accepted = draw.positions.len(),
                target = self.target,
                attempts,
                "attempt budget exhausted before reaching target"
            );
        }
        draw
    }
}
