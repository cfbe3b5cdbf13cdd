pub mod curve_zones;
pub mod edge_offset;
pub mod sampler;
pub mod target;

pub use curve_zones::{DetectCurveZones, ForbiddenZone, ZoneSet};
pub use edge_offset::{AssignEdges, LateralRole, PlacedSample};
pub use sampler::{ConstrainedSampler, SampleDraw};
pub use target::SampleTarget;
