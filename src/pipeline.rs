use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SamplingConfig;
use crate::error::Result;
use crate::geometry::LinearReference;
use crate::math::Point2;
use crate::operations::{
    AssignEdges, ConstrainedSampler, DetectCurveZones, SampleTarget, ZoneSet,
};
use crate::report::{AssembleSamples, CoordinateTransform, GeoPoint, SamplePoint, SampleSink};

/// Whether a run reached its target count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Coverage {
    Complete,
    /// The attempt budget ran out first.
    Partial { requested: usize, found: usize },
}

impl Coverage {
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Everything a sampling run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SamplingReport {
    /// Centerline length the run worked on.
    pub length: f64,
    pub target: SampleTarget,
    pub zones: ZoneSet,
    /// Samples in arc-length order.
    pub samples: Vec<SamplePoint>,
    /// Candidates drawn by the sampler.
    pub attempts: usize,
    pub coverage: Coverage,
}

impl SamplingReport {
    /// Hands the samples to an output sink.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn export<S: SampleSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        sink.accept(&self.samples)
    }
}

/// The full pipeline: detect curve zones, resolve the target count, sample,
/// assign lateral roles and assemble the records.
#[derive(Debug, Clone)]
pub struct SamplingPlan {
    config: SamplingConfig,
}

impl SamplingPlan {
    #[must_use]
    pub fn new(config: SamplingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Runs the plan with planar coordinates only.
    ///
    /// Uses `config.seed` when set, otherwise an OS-seeded generator.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an invalid configuration and
    /// `GeometryError` if an offset tangent is degenerate.
    pub fn run<L: LinearReference + ?Sized>(&self, line: &L) -> Result<SamplingReport> {
        let mut rng = self.rng();
        self.run_inner(line, &mut rng, None::<&NoTransform>)
    }

    /// Runs the plan and fills geographic coordinates through `transform`.
    ///
    /// # Errors
    ///
    /// As [`SamplingPlan::run`], plus transform failures.
    pub fn run_with_transform<L, T>(&self, line: &L, transform: &T) -> Result<SamplingReport>
    where
        L: LinearReference + ?Sized,
        T: CoordinateTransform + ?Sized,
    {
        let mut rng = self.rng();
        self.run_inner(line, &mut rng, Some(transform))
    }

    /// Runs the plan with a caller-supplied random source, ignoring `config.seed`.
    ///
    /// # Errors
    ///
    /// As [`SamplingPlan::run`].
    pub fn run_with_rng<L, R>(&self, line: &L, rng: &mut R) -> Result<SamplingReport>
    where
        L: LinearReference + ?Sized,
        R: Rng + ?Sized,
    {
        self.run_inner(line, rng, None::<&NoTransform>)
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn run_inner<L, R, T>(
        &self,
        line: &L,
        rng: &mut R,
        transform: Option<&T>,
    ) -> Result<SamplingReport>
    where
        L: LinearReference + ?Sized,
        R: Rng + ?Sized,
        T: CoordinateTransform + ?Sized,
    {
        let config = &self.config;
        config.validate()?;

        let length = line.length();
        let zones = DetectCurveZones::new(config.curve_recoil)
            .with_step(config.scan_step)
            .with_cos_threshold(config.cos_threshold)
            .execute(line);

        let target = SampleTarget::resolve(
            length,
            config.pavement_width,
            config.min_area_per_sample,
            config.desired_count,
        );
        debug!(
            length,
            zones = zones.len(),
            desired = target.desired,
            normative = target.normative,
            target = target.target,
            "sampling plan resolved"
        );

        let draw = ConstrainedSampler::new(length, &zones, config.min_spacing, target.target)
            .with_attempt_budget(config.attempt_budget)
            .execute(rng);

        let coverage = if draw.is_complete() {
            Coverage::Complete
        } else {
            warn!(
                requested = target.target,
                found = draw.positions.len(),
                "returning fewer samples than requested"
            );
            Coverage::Partial {
                requested: target.target,
                found: draw.positions.len(),
            }
        };
        let attempts = draw.attempts;

        let placed = AssignEdges::new(draw.positions, config.half_width())
            .with_tangent_epsilon(config.tangent_epsilon)
            .execute(line)?;

        let assembler = AssembleSamples::new(&placed);
        let samples = match transform {
            Some(t) => assembler.execute_with(t)?,
            None => assembler.execute(),
        };

        info!(samples = samples.len(), attempts, "sampling run finished");
        Ok(SamplingReport {
            length,
            target,
            zones,
            samples,
            attempts,
            coverage,
        })
    }
}

/// Placeholder transform type for runs without geographic output.
enum NoTransform {}

impl CoordinateTransform for NoTransform {
    fn to_geographic(&self, _planar: &Point2) -> Result<GeoPoint> {
        match *self {}
    }
}
