//! chem-metrics: estadísticas sobre poblaciones de moléculas generadas.
//!
//! Todas las funciones son puras respecto del adaptador químico. Las
//! moléculas no interpretables se filtran antes de comparar fingerprints.
pub mod errors;
pub mod population;
pub mod reference;
pub mod report;

pub use errors::MetricsError;
pub use population::{canonicalize, diversity, is_valid, novel_fraction, novelty, unique_canonical, unique_rate,
                     validity_ratio, UniqueRateBasis};
pub use reference::ReferenceSet;
pub use report::PopulationReport;
