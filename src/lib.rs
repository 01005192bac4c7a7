//! ChemOracle Rust Library
//!
//! Punto de entrada del workspace de oráculos moleculares:
//! - `config`: configuración desde variables de entorno (`ORACLE_*`).
//! - `errors`: error de nivel superior (`CoreError`).
//! - `registry`: `OracleRegistry`, construcción perezosa y memoizada de los
//!   oráculos del catálogo y de los modelos de clasificación.
//!
//! Los crates miembros se re-exportan para usar el workspace desde un único
//! import.

pub mod config;
pub mod errors;
pub mod registry;

pub use chem_domain as domain;
pub use chem_metrics as metrics;
pub use chem_oracles as oracles;
pub use chemengine as engine;

pub use config::OracleConfig;
pub use errors::CoreError;
pub use registry::OracleRegistry;
