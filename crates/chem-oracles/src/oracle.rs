//! Oráculos: definición serializable y oráculo construido.
//!
//! Una `OracleDefinition` es configuración pura (codificaciones de referencia,
//! tipos de fingerprint, modificadores, agregador, clave de modelo). Un
//! `Oracle` se construye a partir de ella una sola vez, resolviendo las
//! referencias a fingerprints con el adaptador, y luego es de sólo lectura.
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use chem_domain::{ChemistryAdapter, ClassifierModel, Descriptor, Fingerprint, FingerprintKind, FingerprintShape,
                  DEFAULT_FINGERPRINT_BITS};

use crate::classifier::feature_row;
use crate::hashing::hash_value;
use crate::penalized::{normalized_terms, PENALIZED_LOGP_FAILURE};
use crate::similarity::tanimoto;
use crate::{Aggregator, OracleError, ScoreModifier, ScoringContext};

fn counts_shape() -> FingerprintShape {
    FingerprintShape::Counts
}

fn default_bits() -> usize {
    DEFAULT_FINGERPRINT_BITS
}

/// Especificación de un sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "term", rename_all = "snake_case")]
pub enum TermDefinition {
    Similarity {
        reference: String,
        fingerprint: FingerprintKind,
        #[serde(default = "counts_shape")]
        shape: FingerprintShape,
        #[serde(default)]
        modifier: ScoreModifier,
    },
    Descriptor {
        descriptor: Descriptor,
        #[serde(default)]
        modifier: ScoreModifier,
    },
}

impl TermDefinition {
    /// Similitud sobre fingerprints de conteo contra `reference`.
    pub fn similarity(reference: impl Into<String>, fingerprint: FingerprintKind, modifier: ScoreModifier) -> Self {
        Self::Similarity { reference: reference.into(),
                           fingerprint,
                           shape: FingerprintShape::Counts,
                           modifier }
    }

    pub fn descriptor(descriptor: Descriptor, modifier: ScoreModifier) -> Self {
        Self::Descriptor { descriptor, modifier }
    }

    fn modifier(&self) -> &ScoreModifier {
        match self {
            Self::Similarity { modifier, .. } | Self::Descriptor { modifier, .. } => modifier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum OracleBodyDefinition {
    Composite {
        terms: Vec<TermDefinition>,
        #[serde(default)]
        aggregator: Aggregator,
        #[serde(default)]
        failure_value: f64,
    },
    PenalizedLogP,
    Classifier {
        model: String,
        fingerprint: FingerprintKind,
        #[serde(default = "default_bits")]
        n_bits: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleDefinition {
    pub name: String,
    pub body: OracleBodyDefinition,
}

impl OracleDefinition {
    pub fn composite(name: impl Into<String>,
                     terms: Vec<TermDefinition>,
                     aggregator: Aggregator,
                     failure_value: f64)
                     -> Self {
        Self { name: name.into(),
               body: OracleBodyDefinition::Composite { terms,
                                                       aggregator,
                                                       failure_value } }
    }

    /// Un único término de similitud cruda; el score es la similitud.
    pub fn rediscovery(name: impl Into<String>, reference: impl Into<String>, fingerprint: FingerprintKind) -> Self {
        Self::composite(name,
                        vec![TermDefinition::similarity(reference, fingerprint, ScoreModifier::Identity)],
                        Aggregator::Single,
                        0.0)
    }

    pub fn descriptor(name: impl Into<String>, descriptor: Descriptor, failure_value: f64) -> Self {
        Self::composite(name,
                        vec![TermDefinition::descriptor(descriptor, ScoreModifier::Identity)],
                        Aggregator::Single,
                        failure_value)
    }

    pub fn penalized_logp(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               body: OracleBodyDefinition::PenalizedLogP }
    }

    pub fn classifier(name: impl Into<String>, model: impl Into<String>, fingerprint: FingerprintKind, n_bits: usize) -> Self {
        Self { name: name.into(),
               body: OracleBodyDefinition::Classifier { model: model.into(),
                                                        fingerprint,
                                                        n_bits } }
    }

    /// Valor devuelto cuando la molécula no es puntuable.
    pub fn failure_value(&self) -> f64 {
        match &self.body {
            OracleBodyDefinition::Composite { failure_value, .. } => *failure_value,
            OracleBodyDefinition::PenalizedLogP => PENALIZED_LOGP_FAILURE,
            OracleBodyDefinition::Classifier { .. } => 0.0,
        }
    }

    /// Clave del modelo externo que necesita el oráculo, si alguno.
    pub fn model_key(&self) -> Option<&str> {
        match &self.body {
            OracleBodyDefinition::Classifier { model, .. } => Some(model),
            _ => None,
        }
    }

    /// Hash de contenido (JSON canónico + blake3).
    pub fn content_hash(&self) -> Result<String, OracleError> {
        let value = serde_json::to_value(self).map_err(|e| OracleError::InvalidDefinition(e.to_string()))?;
        Ok(hash_value(&value))
    }

    pub fn validate(&self) -> Result<(), OracleError> {
        if self.name.trim().is_empty() {
            return Err(OracleError::InvalidDefinition("el oráculo necesita un nombre".to_string()));
        }
        match &self.body {
            OracleBodyDefinition::Composite { terms,
                                              aggregator,
                                              failure_value, } => {
                if terms.is_empty() {
                    return Err(OracleError::EmptyAggregate);
                }
                if *aggregator == Aggregator::Single && terms.len() != 1 {
                    return Err(OracleError::SingleArity(terms.len()));
                }
                if !failure_value.is_finite() {
                    return Err(OracleError::InvalidDefinition(format!("{}: failure_value no finito", self.name)));
                }
                terms.iter().try_for_each(|t| t.modifier().validate())
            }
            OracleBodyDefinition::PenalizedLogP => Ok(()),
            OracleBodyDefinition::Classifier { n_bits, .. } => {
                if *n_bits == 0 {
                    return Err(OracleError::InvalidDefinition(format!("{}: n_bits debe ser positivo", self.name)));
                }
                Ok(())
            }
        }
    }
}

/// Resultado explícito de una evaluación.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Evaluation {
    Scored { score: f64, terms: Vec<f64> },
    Unparsable,
}

impl Evaluation {
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Scored { score, .. } => Some(*score),
            Self::Unparsable => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Term {
    Similarity {
        reference: Fingerprint,
        modifier: ScoreModifier,
    },
    Descriptor {
        descriptor: Descriptor,
        modifier: ScoreModifier,
    },
}

#[derive(Debug, Clone)]
enum OracleBody {
    Composite { terms: Vec<Term>, aggregator: Aggregator },
    PenalizedLogP,
    Classifier {
        model: Arc<dyn ClassifierModel>,
        kind: FingerprintKind,
        n_bits: usize,
    },
}

/// Oráculo construido, inmutable y compartible entre hilos.
#[derive(Debug, Clone)]
pub struct Oracle {
    name: String,
    definition_hash: String,
    failure_value: f64,
    body: OracleBody,
}

impl Oracle {
    /// Construye el oráculo resolviendo las referencias con el adaptador del
    /// contexto. `model` sólo se usa (y es obligatorio) para clasificadores.
    ///
    /// # Errores
    /// - `OracleError::InvalidModifier` / `InvalidDefinition` si la definición
    ///   no es válida.
    /// - `OracleError::InvalidReference` si una referencia no se interpreta.
    /// - `OracleError::MissingModel` si falta el modelo de un clasificador.
    pub fn build<A>(definition: &OracleDefinition,
                    ctx: &ScoringContext<'_, A>,
                    model: Option<Arc<dyn ClassifierModel>>)
                    -> Result<Self, OracleError>
        where A: ChemistryAdapter
    {
        definition.validate()?;
        let body = match &definition.body {
            OracleBodyDefinition::Composite { terms, aggregator, .. } => {
                let terms = terms.iter()
                                 .map(|t| resolve_term(t, ctx))
                                 .collect::<Result<Vec<_>, _>>()?;
                OracleBody::Composite { terms,
                                        aggregator: *aggregator }
            }
            OracleBodyDefinition::PenalizedLogP => OracleBody::PenalizedLogP,
            OracleBodyDefinition::Classifier { fingerprint, n_bits, .. } => {
                let model = model.ok_or_else(|| OracleError::MissingModel(definition.name.clone()))?;
                if let Some(expected) = model.n_features().filter(|n| n != n_bits) {
                    return Err(OracleError::InvalidDefinition(format!("{}: el modelo espera {expected} features y el \
                                                                       fingerprint tiene {n_bits}",
                                                                      definition.name)));
                }
                OracleBody::Classifier { model,
                                         kind: *fingerprint,
                                         n_bits: *n_bits }
            }
        };
        let definition_hash = definition.content_hash()?;
        log::info!("oráculo '{}' construido (hash {})", definition.name, definition_hash);
        Ok(Self { name: definition.name.clone(),
                  definition_hash,
                  failure_value: definition.failure_value(),
                  body })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    pub fn failure_value(&self) -> f64 {
        self.failure_value
    }

    /// Evaluación con resultado explícito. Una molécula no interpretable es
    /// `Ok(Evaluation::Unparsable)`; una precondición violada es `Err`.
    pub fn evaluate_detailed<A>(&self, ctx: &ScoringContext<'_, A>, encoding: &str) -> Result<Evaluation, OracleError>
        where A: ChemistryAdapter
    {
        let Some(structure) = ctx.parse(encoding) else {
            return Ok(Evaluation::Unparsable);
        };
        let adapter = ctx.adapter();
        let descriptor = |d: Descriptor| adapter.descriptor(&structure, d).ok_or(OracleError::MissingDescriptor(d));
        match &self.body {
            OracleBody::Composite { terms, aggregator } => {
                let mut scores = Vec::with_capacity(terms.len());
                for term in terms {
                    let score = match term {
                        Term::Similarity { reference, modifier } => {
                            let (kind, shape) = (reference.kind(), reference.shape());
                            let fp = ctx.fingerprint(encoding, &structure, kind, shape)
                                        .ok_or(OracleError::MissingFingerprint { kind, shape })?;
                            modifier.apply(tanimoto(reference, &fp)?)
                        }
                        Term::Descriptor { descriptor: d, modifier } => modifier.apply(descriptor(*d)?),
                    };
                    scores.push(score);
                }
                let score = aggregator.aggregate(&scores)?;
                Ok(Evaluation::Scored { score, terms: scores })
            }
            OracleBody::PenalizedLogP => {
                let log_p = descriptor(Descriptor::LogP)?;
                let sa = descriptor(Descriptor::SyntheticAccessibility)?;
                let terms = normalized_terms(log_p, sa, &adapter.ring_sizes(&structure));
                Ok(Evaluation::Scored { score: terms.iter().sum(),
                                        terms: terms.to_vec() })
            }
            OracleBody::Classifier { model, kind, n_bits } => {
                let shape = FingerprintShape::Bits { n_bits: *n_bits };
                let fp = ctx.fingerprint(encoding, &structure, *kind, shape)
                            .ok_or(OracleError::MissingFingerprint { kind: *kind, shape })?;
                let p = model.predict_probability(&feature_row(&fp)?)?;
                Ok(Evaluation::Scored { score: p, terms: vec![p] })
            }
        }
    }

    /// Siempre devuelve un número: las moléculas no interpretables y los
    /// errores de precondición (registrados en `warn`) dan `failure_value`.
    pub fn evaluate<A>(&self, ctx: &ScoringContext<'_, A>, encoding: &str) -> f64
        where A: ChemistryAdapter
    {
        match self.evaluate_detailed(ctx, encoding) {
            Ok(Evaluation::Scored { score, .. }) => score,
            Ok(Evaluation::Unparsable) => self.failure_value,
            Err(e) => {
                log::warn!("oráculo '{}' sobre '{}': {}", self.name, encoding, e);
                self.failure_value
            }
        }
    }

    /// Evalúa en paralelo conservando el orden de entrada.
    pub fn evaluate_batch<A, S>(&self, ctx: &ScoringContext<'_, A>, encodings: &[S]) -> Vec<f64>
        where A: ChemistryAdapter,
              S: AsRef<str> + Sync
    {
        encodings.par_iter().map(|e| self.evaluate(ctx, e.as_ref())).collect()
    }
}

fn resolve_term<A>(term: &TermDefinition, ctx: &ScoringContext<'_, A>) -> Result<Term, OracleError>
    where A: ChemistryAdapter
{
    match term {
        TermDefinition::Similarity { reference,
                                     fingerprint,
                                     shape,
                                     modifier, } => {
            let fp = ctx.fingerprint_of(reference, *fingerprint, *shape)
                        .ok_or_else(|| OracleError::InvalidReference { encoding: reference.clone() })?;
            Ok(Term::Similarity { reference: fp,
                                  modifier: modifier.clone() })
        }
        TermDefinition::Descriptor { descriptor, modifier } => Ok(Term::Descriptor { descriptor: *descriptor,
                                                                                     modifier: modifier.clone() }),
    }
}
