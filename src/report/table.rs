use std::fmt;
use std::io::Write;

use crate::error::{ExportError, Result};

use super::{SamplePoint, SampleSink};

/// Plain-text table of samples, one row per sample.
///
/// Geographic columns are included only when every sample has them.
#[derive(Debug)]
pub struct SampleTable<'a> {
    samples: &'a [SamplePoint],
}

impl<'a> SampleTable<'a> {
    #[must_use]
    pub fn new(samples: &'a [SamplePoint]) -> Self {
        Self { samples }
    }

    fn with_geographic(&self) -> bool {
        !self.samples.is_empty() && self.samples.iter().all(|s| s.geographic.is_some())
    }

    fn header(geographic: bool) -> Vec<&'static str> {
        let mut cols = vec![
            "Sample",
            "Label",
            "Position",
            "Station (m)",
            "Km",
            "Easting",
            "Northing",
        ];
        if geographic {
            cols.extend(["Latitude", "Longitude"]);
        }
        cols
    }

    fn row(s: &SamplePoint, geographic: bool) -> Vec<String> {
        let mut cells = vec![
            s.index.to_string(),
            s.label.clone(),
            s.role.code().to_owned(),
            format!("{:.2}", s.station_rounded),
            s.chainage.clone(),
            format!("{:.3}", s.planar.x),
            format!("{:.3}", s.planar.y),
        ];
        if let Some(geo) = s.geographic.filter(|_| geographic) {
            cells.push(format!("{:.7}", geo.latitude));
            cells.push(format!("{:.7}", geo.longitude));
        }
        cells
    }
}

impl fmt::Display for SampleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let geographic = self.with_geographic();
        let header = Self::header(geographic);
        let rows: Vec<Vec<String>> = self
            .samples
            .iter()
            .map(|s| Self::row(s, geographic))
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }

        write_row(f, header.iter().copied(), &widths)?;
        for row in &rows {
            write_row(f, row.iter().map(String::as_str), &widths)?;
        }
        Ok(())
    }
}

fn write_row<'c>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'c str>,
    widths: &[usize],
) -> fmt::Result {
    for (i, (cell, &width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            f.write_str("  ")?;
        }
        write!(f, "{cell:>width$}")?;
    }
    writeln!(f)
}

/// Writes a [`SampleTable`] to any byte sink.
#[derive(Debug)]
pub struct TableWriter<W: Write> {
    out: W,
}

impl<W: Write> TableWriter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SampleSink for TableWriter<W> {
    fn accept(&mut self, samples: &[SamplePoint]) -> Result<()> {
        write!(self.out, "{}", SampleTable::new(samples)).map_err(ExportError::from)?;
        Ok(())
    }
}
