//! Packaging of placed samples into labelled records and their hand-off to
//! output sinks.

mod kml;
mod table;

pub use kml::KmlWriter;
pub use table::{SampleTable, TableWriter};

use serde::Serialize;

use crate::error::Result;
use crate::math::Point2;
use crate::operations::{LateralRole, PlacedSample};

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Maps planar (projected, metric) coordinates to geographic ones.
///
/// Reprojection itself lives outside this crate; callers plug in whatever
/// projection library matches the centerline's coordinate system.
pub trait CoordinateTransform {
    /// Converts a planar point.
    ///
    /// # Errors
    ///
    /// Implementations report failures as `ExportError::Transform`.
    fn to_geographic(&self, planar: &Point2) -> Result<GeoPoint>;
}

impl<F> CoordinateTransform for F
where
    F: Fn(&Point2) -> Result<GeoPoint>,
{
    fn to_geographic(&self, planar: &Point2) -> Result<GeoPoint> {
        self(planar)
    }
}

/// Treats planar `x`/`y` as longitude/latitude unchanged.
///
/// For centerlines that are already in geographic degrees and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarAsGeographic;

impl CoordinateTransform for PlanarAsGeographic {
    fn to_geographic(&self, planar: &Point2) -> Result<GeoPoint> {
        Ok(GeoPoint::new(planar.x, planar.y))
    }
}

/// Final labelled sample record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePoint {
    /// One-based sequence number in arc-length order.
    pub index: usize,
    /// Zero-padded display label, e.g. `Sample 07`.
    pub label: String,
    pub role: LateralRole,
    /// Arc length along the centerline.
    pub station: f64,
    /// `station` rounded to two decimals.
    pub station_rounded: f64,
    /// `station` in kilometres with three decimals.
    pub chainage: String,
    pub planar: Point2,
    pub geographic: Option<GeoPoint>,
}

impl SamplePoint {
    fn from_placed(placed: &PlacedSample, geographic: Option<GeoPoint>) -> Self {
        let index = placed.rank + 1;
        Self {
            index,
            label: format!("Sample {index:02}"),
            role: placed.role,
            station: placed.station,
            station_rounded: (placed.station * 100.0).round() / 100.0,
            chainage: format!("{:.3}", placed.station / 1000.0),
            planar: placed.point,
            geographic,
        }
    }

    /// Placemark name, e.g. `Sample 01 - RE (km 0.123)`.
    #[must_use]
    pub fn kml_name(&self) -> String {
        format!("{} - {} (km {})", self.label, self.role.code(), self.chainage)
    }

    /// Placemark description.
    #[must_use]
    pub fn kml_description(&self) -> String {
        format!("Lateral position: {}", self.role.code())
    }
}

/// Converts placed samples into [`SamplePoint`] records.
#[derive(Debug)]
pub struct AssembleSamples<'a> {
    placed: &'a [PlacedSample],
}

impl<'a> AssembleSamples<'a> {
    /// Creates the assembler over samples already in arc-length order.
    #[must_use]
    pub fn new(placed: &'a [PlacedSample]) -> Self {
        Self { placed }
    }

    /// Assembles records with planar coordinates only.
    #[must_use]
    pub fn execute(&self) -> Vec<SamplePoint> {
        self.placed
            .iter()
            .map(|p| SamplePoint::from_placed(p, None))
            .collect()
    }

    /// Assembles records and fills geographic coordinates through `transform`.
    ///
    /// # Errors
    ///
    /// Propagates the first transform failure.
    pub fn execute_with<T: CoordinateTransform + ?Sized>(
        &self,
        transform: &T,
    ) -> Result<Vec<SamplePoint>> {
        self.placed
            .iter()
            .map(|p| {
                let geo = transform.to_geographic(&p.point)?;
                Ok(SamplePoint::from_placed(p, Some(geo)))
            })
            .collect()
    }
}

/// Receives the ordered sample list at the end of a run.
pub trait SampleSink {
    /// Consumes one batch of samples.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` variants on output failures.
    fn accept(&mut self, samples: &[SamplePoint]) -> Result<()>;
}

/// Collects samples in memory.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    pub samples: Vec<SamplePoint>,
}

impl SampleSink for VecSink {
    fn accept(&mut self, samples: &[SamplePoint]) -> Result<()> {
        self.samples.extend_from_slice(samples);
        Ok(())
    }
}
