// chem-domain library entry point
//
// Modelo de datos compartido por los oráculos y las métricas de población:
// codificaciones moleculares, fingerprints, descriptores y los contratos
// (`ChemistryAdapter`, `ClassifierModel`) que implementan los motores externos.
pub mod adapter;
pub mod descriptor;
pub mod encoding;
pub mod error;
pub mod fingerprint;
pub mod model;
pub use adapter::{ChemistryAdapter, ParseFailure};
pub use descriptor::Descriptor;
pub use encoding::MoleculeEncoding;
pub use error::DomainError;
pub use fingerprint::{Features, Fingerprint, FingerprintKind, FingerprintShape, DEFAULT_FINGERPRINT_BITS};
pub use model::{check_probability, ClassifierModel, FeatureRow};
