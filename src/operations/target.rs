use serde::Serialize;

/// Resolved sample count for a run.
///
/// The normative minimum is one sample per `min_area_per_sample` of paved
/// surface; the final target is the larger of that and the requested count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleTarget {
    /// Count requested by the caller.
    pub desired: usize,
    /// `ceil(length * width / min_area_per_sample)`.
    pub normative: usize,
    /// `max(desired, normative)`.
    pub target: usize,
}

impl SampleTarget {
    /// Resolves the target count for a road section.
    ///
    /// Inputs are assumed validated (positive width and area).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resolve(
        length: f64,
        pavement_width: f64,
        min_area_per_sample: f64,
        desired: usize,
    ) -> Self {
        let ratio = (Self::paved_area(length, pavement_width) / min_area_per_sample).ceil();
        let normative = if ratio.is_finite() && ratio > 0.0 {
            ratio as usize
        } else {
            0
        };
        Self {
            desired,
            normative,
            target: desired.max(normative),
        }
    }

    /// Paved area implied by a length and width.
    #[must_use]
    pub fn paved_area(length: f64, pavement_width: f64) -> f64 {
        length * pavement_width
    }
}
