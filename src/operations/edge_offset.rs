use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::geometry::LinearReference;
use crate::math::{left_normal, Point2};

/// Default finite-difference step for tangent estimation.
pub const DEFAULT_TANGENT_EPSILON: f64 = 0.5;

/// Transverse position a sample represents.
///
/// Roles repeat by rank in the order Right Edge, Axis, Left Edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LateralRole {
    RightEdge,
    Axis,
    LeftEdge,
}

impl LateralRole {
    /// The fixed role cycle.
    pub const CYCLE: [LateralRole; 3] = [Self::RightEdge, Self::Axis, Self::LeftEdge];

    /// Role for the sample at `rank` in arc-length order.
    #[must_use]
    pub fn from_rank(rank: usize) -> Self {
        Self::CYCLE[rank % Self::CYCLE.len()]
    }

    /// Signed lateral offset: `+half_width`, `0` or `-half_width`.
    #[must_use]
    pub fn signed_offset(self, half_width: f64) -> f64 {
        match self {
            Self::RightEdge => half_width,
            Self::Axis => 0.0,
            Self::LeftEdge => -half_width,
        }
    }

    /// Short code used in reports.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::RightEdge => "RE",
            Self::Axis => "AX",
            Self::LeftEdge => "LE",
        }
    }
}

impl fmt::Display for LateralRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RightEdge => "Right Edge",
            Self::Axis => "Axis",
            Self::LeftEdge => "Left Edge",
        };
        f.write_str(name)
    }
}

/// A sample placed on the pavement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSample {
    /// Zero-based rank in arc-length order.
    pub rank: usize,
    pub role: LateralRole,
    /// Arc length along the centerline.
    pub station: f64,
    /// Point on the centerline at `station`.
    pub base: Point2,
    /// `base` moved perpendicular to the local tangent by the role's offset.
    pub point: Point2,
}

/// Orders accepted positions, assigns lateral roles and builds offset points.
///
/// # Sign Convention
///
/// The offset is applied along the left-hand normal `(-t.y, t.x)` of the unit
/// tangent `t`. Right Edge takes `+half_width`, so it lands on the left of
/// the direction of travel; Left Edge takes `-half_width` and lands on the
/// mirrored side.
#[derive(Debug)]
pub struct AssignEdges {
    positions: Vec<f64>,
    half_width: f64,
    tangent_epsilon: f64,
}

impl AssignEdges {
    /// Creates the operation from accepted positions and half the pavement width.
    #[must_use]
    pub fn new(positions: Vec<f64>, half_width: f64) -> Self {
        Self {
            positions,
            half_width,
            tangent_epsilon: DEFAULT_TANGENT_EPSILON,
        }
    }

    /// Sets the finite-difference step used for the tangent.
    #[must_use]
    pub fn with_tangent_epsilon(mut self, tangent_epsilon: f64) -> Self {
        self.tangent_epsilon = tangent_epsilon;
        self
    }

    /// Executes the assignment against `line`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the tangent at a position is
    /// degenerate.
    pub fn execute<L: LinearReference + ?Sized>(self, line: &L) -> Result<Vec<PlacedSample>> {
        let mut positions = self.positions;
        positions.sort_by(f64::total_cmp);

        let placed = positions
            .into_iter()
            .enumerate()
            .map(|(rank, station)| {
                let role = LateralRole::from_rank(rank);
                let base = line.interpolate(station);
                let tangent = line.tangent_at(station, self.tangent_epsilon)?;
                let offset = role.signed_offset(self.half_width);
                let point = base + left_normal(tangent) * offset;
                Ok(PlacedSample {
                    rank,
                    role,
                    station,
                    base,
                    point,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(samples = placed.len(), "lateral roles assigned");
        Ok(placed)
    }
}
