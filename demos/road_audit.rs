//! Road audit demo: samples a synthetic centerline and prints the results.
//!
//! Usage:
//! ```text
//! cargo run --example road_audit                        # built-in parameters
//! cargo run --example road_audit -- audit.json          # SamplingConfig as JSON
//! RUST_LOG=roadsample=debug cargo run --example road_audit
//! ```
//!
//! Prints the sample table, then the KML document, to stdout.

use std::error::Error;
use std::io;

use roadsample::report::{KmlWriter, PlanarAsGeographic, SampleTable};
use roadsample::{Centerline, Coverage, SamplingConfig, SamplingPlan};

/// Origin of the synthetic section in UTM zone 23S (metres).
const ORIGIN: (f64, f64) = (193_000.0, 8_248_000.0);

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for roadsample.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("roadsample=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => SamplingConfig::new(7.0, 3000.0, 12, 130.0).with_seed(2024),
    };

    // Tangent, right-angle bend, tangent, gentle S-curve, tangent.
    let (x0, y0) = ORIGIN;
    let centerline = Centerline::from_xy(&[
        (x0, y0),
        (x0 + 1_800.0, y0),
        (x0 + 1_800.0, y0 + 1_200.0),
        (x0 + 2_300.0, y0 + 1_450.0),
        (x0 + 2_900.0, y0 + 1_400.0),
        (x0 + 4_200.0, y0 + 1_400.0),
    ])?;

    // Planar coordinates stand in for lon/lat here; plug a projection-backed
    // `CoordinateTransform` in for real geographic output.
    let report = SamplingPlan::new(config).run_with_transform(&centerline, &PlanarAsGeographic)?;

    println!(
        "length {:.1} m, {} curve zones, target {} (desired {}, normative {})",
        report.length,
        report.zones.len(),
        report.target.target,
        report.target.desired,
        report.target.normative
    );
    if let Coverage::Partial { requested, found } = report.coverage {
        println!("only {found} of {requested} samples placed");
    }
    println!();
    print!("{}", SampleTable::new(&report.samples));
    println!();

    let mut kml = KmlWriter::new(io::stdout().lock()).with_document_name("Road audit");
    report.export(&mut kml)?;
    println!();
    Ok(())
}
