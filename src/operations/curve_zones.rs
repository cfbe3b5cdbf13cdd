use serde::Serialize;
use tracing::debug;

use crate::geometry::LinearReference;
use crate::math::TOLERANCE;

/// Default arc-length step between curvature probes.
pub const DEFAULT_SCAN_STEP: f64 = 10.0;

/// Default cosine threshold. Direction changes above ~1.8° per step fall below it.
pub const DEFAULT_COS_THRESHOLD: f64 = 0.9995;

/// A closed arc-length interval `[start, end]` excluded from sampling.
///
/// Bounds are not clamped to the centerline; they may extend below zero or
/// past its end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForbiddenZone {
    pub start: f64,
    pub end: f64,
}

impl ForbiddenZone {
    /// Creates a zone centred on `center` extending `margin` to each side.
    #[must_use]
    pub fn around(center: f64, margin: f64) -> Self {
        Self {
            start: center - margin,
            end: center + margin,
        }
    }

    /// Returns `true` if `distance` lies in the zone, endpoints included.
    #[must_use]
    pub fn contains(&self, distance: f64) -> bool {
        self.start <= distance && distance <= self.end
    }
}

/// Forbidden zones in detection order. Overlaps are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZoneSet {
    zones: Vec<ForbiddenZone>,
}

impl ZoneSet {
    /// Creates an empty zone set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a zone.
    pub fn push(&mut self, zone: ForbiddenZone) {
        self.zones.push(zone);
    }

    /// Returns `true` if any zone contains `distance`.
    #[must_use]
    pub fn contains(&self, distance: f64) -> bool {
        self.zones.iter().any(|z| z.contains(distance))
    }

    /// Returns the zones in detection order.
    #[must_use]
    pub fn zones(&self) -> &[ForbiddenZone] {
        &self.zones
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<ForbiddenZone> for ZoneSet {
    fn from_iter<I: IntoIterator<Item = ForbiddenZone>>(iter: I) -> Self {
        Self {
            zones: iter.into_iter().collect(),
        }
    }
}

/// Flags bends along a centerline as forbidden arc-length zones.
///
/// # Algorithm
///
/// Probes the line every `step` units over `[step, floor(L) - step)`. At each
/// probe `d`, the directions `(d - step → d)` and `(d → d + step)` are
/// compared; if the cosine of the angle between them is below the threshold,
/// `[d - recoil, d + recoil]` becomes a forbidden zone. Probes with a
/// zero-length direction are skipped.
///
/// This is a local direction-change heuristic, not a radius computation.
/// Results depend on `step` and the threshold.
#[derive(Debug, Clone)]
pub struct DetectCurveZones {
    recoil: f64,
    step: f64,
    cos_threshold: f64,
}

impl DetectCurveZones {
    /// Creates a detector with the given zone half-width margin.
    #[must_use]
    pub fn new(recoil: f64) -> Self {
        Self {
            recoil,
            step: DEFAULT_SCAN_STEP,
            cos_threshold: DEFAULT_COS_THRESHOLD,
        }
    }

    /// Sets the probe step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the cosine threshold below which a probe counts as a bend.
    #[must_use]
    pub fn with_cos_threshold(mut self, cos_threshold: f64) -> Self {
        self.cos_threshold = cos_threshold;
        self
    }

    /// Scans `line` and returns the detected zones.
    ///
    /// Deterministic: the same line and parameters always give the same zones.
    #[must_use]
    pub fn execute<L: LinearReference + ?Sized>(&self, line: &L) -> ZoneSet {
        let mut zones = ZoneSet::new();
        if self.step <= 0.0 || !self.step.is_finite() {
            return zones;
        }

        let step = self.step;
        let stop = line.length().floor() - step;
        let mut probes = 0_usize;

        // Integer multiples keep probe positions exact for whole-number steps.
        for k in 1_u32.. {
            let d = step * f64::from(k);
            if d >= stop {
                break;
            }
            probes += 1;

            let p1 = line.interpolate(d - step);
            let p2 = line.interpolate(d);
            let p3 = line.interpolate(d + step);
            let v1 = p2 - p1;
            let v2 = p3 - p2;

            let norm = v1.norm() * v2.norm();
            if norm < TOLERANCE {
                continue;
            }
            if v1.dot(&v2) / norm < self.cos_threshold {
                zones.push(ForbiddenZone::around(d, self.recoil));
            }
        }

        debug!(probes, zones = zones.len(), "curve zone scan finished");
        zones
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Centerline, LinearReference};

    #[test]
    fn zone_bounds_are_inclusive() {
        let zone = ForbiddenZone::around(500.0, 130.0);
        assert!(zone.contains(370.0));
        assert!(zone.contains(630.0));
        assert!(zone.contains(500.0));
        assert!(!zone.contains(369.999));
        assert!(!zone.contains(630.001));
    }

    #[test]
    fn overlapping_zones_need_no_merge() {
        let zones: ZoneSet = [
            ForbiddenZone { start: 0.0, end: 10.0 },
            ForbiddenZone { start: 5.0, end: 20.0 },
        ]
        .into_iter()
        .collect();
        assert!(zones.contains(7.0));
        assert!(zones.contains(20.0));
        assert!(!zones.contains(20.5));
        assert!(!zones.contains(-0.5));
    }

    #[test]
    fn straight_line_has_no_zones() {
        let line = Centerline::from_xy(&[(0.0, 0.0), (1000.0, 0.0)]).unwrap();
        let zones = DetectCurveZones::new(130.0).execute(&line);
        assert!(zones.is_empty());
    }

    #[test]
    fn collinear_interior_vertices_are_not_bends() {
        let line =
            Centerline::from_xy(&[(0.0, 0.0), (300.0, 300.0), (700.0, 700.0), (1000.0, 1000.0)])
                .unwrap();
        let zones = DetectCurveZones::new(130.0).execute(&line);
        assert!(zones.is_empty());
    }

    #[test]
    fn right_angle_bend_at_midpoint() {
        let line = Centerline::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 500.0)]).unwrap();
        let zones = DetectCurveZones::new(130.0).execute(&line);

        assert_eq!(zones.len(), 1);
        let zone = zones.zones()[0];
        assert!((zone.start - 370.0).abs() < 1e-9);
        assert!((zone.end - 630.0).abs() < 1e-9);
    }

    #[test]
    fn bend_between_probes_flags_both_neighbours() {
        // Corner at 505 falls between probes 500 and 510.
        let line = Centerline::from_xy(&[(0.0, 0.0), (505.0, 0.0), (505.0, 500.0)]).unwrap();
        let zones = DetectCurveZones::new(50.0).execute(&line);

        let centers: Vec<f64> = zones.zones().iter().map(|z| z.start + 50.0).collect();
        assert_eq!(centers.len(), 2);
        assert!((centers[0] - 500.0).abs() < 1e-9);
        assert!((centers[1] - 510.0).abs() < 1e-9);
        assert!(zones.contains(505.0));
    }

    #[test]
    fn short_line_produces_no_probes() {
        let line = Centerline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 9.0)]).unwrap();
        assert!(line.length() < 2.0 * DEFAULT_SCAN_STEP);
        let zones = DetectCurveZones::new(130.0).execute(&line);
        assert!(zones.is_empty());
    }

    #[test]
    fn gentle_bend_below_threshold_is_ignored() {
        // ~1° turn at the vertex stays above cos = 0.9995.
        let angle = 1.0_f64.to_radians();
        let line = Centerline::from_xy(&[
            (0.0, 0.0),
            (500.0, 0.0),
            (500.0 + 500.0 * angle.cos(), 500.0 * angle.sin()),
        ])
        .unwrap();
        assert!(DetectCurveZones::new(130.0).execute(&line).is_empty());

        let strict = DetectCurveZones::new(130.0)
            .with_cos_threshold(0.99999)
            .execute(&line);
        assert!(!strict.is_empty());
    }

    #[test]
    fn detection_is_deterministic() {
        let line = Centerline::from_xy(&[
            (0.0, 0.0),
            (200.0, 50.0),
            (420.0, -30.0),
            (600.0, 240.0),
            (900.0, 250.0),
        ])
        .unwrap();
        let detector = DetectCurveZones::new(130.0);
        let a = detector.execute(&line);
        let b = detector.execute(&line);
        assert!(!a.is_empty());
        assert_eq!(a.len(), b.len());
        for (za, zb) in a.zones().iter().zip(b.zones()) {
            assert_eq!(za.start.to_bits(), zb.start.to_bits());
            assert_eq!(za.end.to_bits(), zb.end.to_bits());
        }
    }

    #[test]
    fn coarser_step_changes_probe_positions() {
        let line = Centerline::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 500.0)]).unwrap();
        let zones = DetectCurveZones::new(0.0).with_step(25.0).execute(&line);
        assert_eq!(zones.len(), 1);
        assert!((zones.zones()[0].start - 500.0).abs() < 1e-9);
    }
}
