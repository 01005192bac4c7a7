//! chem-oracles: scoring de moléculas.
//!
//! Flujo de una evaluación: codificación -> adaptador -> fingerprint o
//! descriptor -> modificador -> agregador -> score final. Las moléculas no
//! interpretables se reportan como `Evaluation::Unparsable` y sólo se
//! convierten en el valor centinela del oráculo al final (`Oracle::evaluate`).
pub mod aggregator;
pub mod cache;
pub mod catalog;
pub mod classifier;
pub mod context;
pub mod errors;
pub mod hashing;
pub mod modifier;
pub mod oracle;
pub mod penalized;
pub mod similarity;

pub use aggregator::Aggregator;
pub use cache::{CacheStats, FingerprintCache, DEFAULT_CACHE_CAPACITY};
pub use context::ScoringContext;
pub use errors::OracleError;
pub use modifier::ScoreModifier;
pub use oracle::{Evaluation, Oracle, OracleBodyDefinition, OracleDefinition, TermDefinition};
pub use similarity::{pairwise_similarity, similarity, similarity_score, tanimoto};
