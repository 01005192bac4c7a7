//! Oráculos con nombre y sus moléculas de referencia.
//!
//! Las definiciones son constantes; el catálogo conserva el orden de
//! declaración para que `names()` sea determinista.
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use chem_domain::{Descriptor, FingerprintKind, DEFAULT_FINGERPRINT_BITS};

use crate::{Aggregator, OracleDefinition, ScoreModifier, TermDefinition};

pub const CELECOXIB: &str = "CC1=CC=C(C=C1)C1=CC(=NN1C1=CC=C(C=C1)S(N)(=O)=O)C(F)(F)F";
pub const TROGLITAZONE: &str = "Cc1c(C)c2OC(C)(COc3ccc(CC4SC(=O)NC4=O)cc3)CCc2c(C)c1O";
pub const THIOTHIXENE: &str = "CN(C)S(=O)(=O)c1ccc2Sc3ccccc3C(=CCCN4CCN(C)CC4)c2c1";
pub const ARIPIPRAZOLE: &str = "Clc4cccc(N3CCN(CCCCOc2ccc1c(NC(=O)CC1)c2)CC3)c4Cl";
pub const ALBUTEROL: &str = "CC(C)(C)NCC(O)c1ccc(O)c(CO)c1";
pub const MESTRANOL: &str = "COc1ccc2[C@H]3CC[C@@]4(C)[C@@H](CC[C@@]4(O)C#C)[C@@H]3CCc2c1";
pub const CAMPHOR: &str = "CC1(C)C2CCC1(C)C(=O)C2";
pub const MENTHOL: &str = "CC(C)C1CCC(C)CC1O";
pub const TADALAFIL: &str = "O=C1N(CC(N2C1CC3=C(C2C4=CC5=C(OCO5)C=C4)NC6=C3C=CC=C6)=O)C";
pub const SILDENAFIL: &str = "CCCC1=NN(C2=C1N=C(NC2=O)C3=C(C=CC(=C3)S(=O)(=O)N4CCN(CC4)C)OCC)C";
pub const OSIMERTINIB: &str = "COc1cc(N(C)CCN(C)C)c(NC(=O)C=C)cc1Nc2nccc(n2)c3cn(C)c4ccccc34";
pub const FEXOFENADINE: &str = "CC(C)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccccc4";

/// Claves de modelo de los clasificadores.
pub const GSK3_MODEL: &str = "gsk3";
pub const JNK3_MODEL: &str = "jnk3";

/// Umbral de saturación de los oráculos de similitud.
const SIMILARITY_THRESHOLD: f64 = 0.75;

/// Valor de fallo del oráculo de accesibilidad sintética (peor posible).
pub const SA_FAILURE: f64 = 100.0;

fn similarity_oracle(name: &str, reference: &str, kind: FingerprintKind) -> OracleDefinition {
    OracleDefinition::composite(name,
                                vec![TermDefinition::similarity(reference,
                                                                kind,
                                                                ScoreModifier::clipped_upper(SIMILARITY_THRESHOLD))],
                                Aggregator::Single,
                                0.0)
}

fn median_oracle(name: &str, a: &str, b: &str, kind: FingerprintKind) -> OracleDefinition {
    OracleDefinition::composite(name,
                                vec![TermDefinition::similarity(a, kind, ScoreModifier::Identity),
                                     TermDefinition::similarity(b, kind, ScoreModifier::Identity)],
                                Aggregator::GeometricMean,
                                0.0)
}

static CATALOG: Lazy<IndexMap<String, OracleDefinition>> = Lazy::new(|| {
    let defs = vec![
        OracleDefinition::rediscovery("celecoxib_rediscovery", CELECOXIB, FingerprintKind::Ecfp4),
        OracleDefinition::rediscovery("troglitazone_rediscovery", TROGLITAZONE, FingerprintKind::Ecfp4),
        OracleDefinition::rediscovery("thiothixene_rediscovery", THIOTHIXENE, FingerprintKind::Ecfp4),
        similarity_oracle("aripiprazole_similarity", ARIPIPRAZOLE, FingerprintKind::Fcfp4),
        similarity_oracle("albuterol_similarity", ALBUTEROL, FingerprintKind::Fcfp4),
        similarity_oracle("mestranol_similarity", MESTRANOL, FingerprintKind::AtomPair),
        median_oracle("median1", CAMPHOR, MENTHOL, FingerprintKind::Ecfp4),
        median_oracle("median2", TADALAFIL, SILDENAFIL, FingerprintKind::Ecfp6),
        OracleDefinition::composite("osimertinib_mpo",
                                    vec![TermDefinition::similarity(OSIMERTINIB,
                                                                    FingerprintKind::Fcfp4,
                                                                    ScoreModifier::clipped_upper(0.8)),
                                         TermDefinition::similarity(OSIMERTINIB,
                                                                    FingerprintKind::Ecfp6,
                                                                    ScoreModifier::min_gaussian(0.85, 0.1)),
                                         TermDefinition::descriptor(Descriptor::Tpsa,
                                                                    ScoreModifier::max_gaussian(100.0, 10.0)),
                                         TermDefinition::descriptor(Descriptor::LogP,
                                                                    ScoreModifier::min_gaussian(1.0, 1.0)),],
                                    Aggregator::GeometricMean,
                                    0.0),
        OracleDefinition::composite("fexofenadine_mpo",
                                    vec![TermDefinition::similarity(FEXOFENADINE,
                                                                    FingerprintKind::AtomPair,
                                                                    ScoreModifier::clipped_upper(0.8)),
                                         TermDefinition::descriptor(Descriptor::Tpsa,
                                                                    ScoreModifier::max_gaussian(90.0, 10.0)),
                                         TermDefinition::descriptor(Descriptor::LogP,
                                                                    ScoreModifier::min_gaussian(4.0, 1.0)),],
                                    Aggregator::GeometricMean,
                                    0.0),
        OracleDefinition::descriptor("qed", Descriptor::Qed, 0.0),
        OracleDefinition::descriptor("sa", Descriptor::SyntheticAccessibility, SA_FAILURE),
        OracleDefinition::penalized_logp("penalized_logp"),
        OracleDefinition::classifier("gsk3", GSK3_MODEL, FingerprintKind::Ecfp4, DEFAULT_FINGERPRINT_BITS),
        OracleDefinition::classifier("jnk3", JNK3_MODEL, FingerprintKind::Ecfp4, DEFAULT_FINGERPRINT_BITS),
    ];
    defs.into_iter().map(|d| (d.name.clone(), d)).collect()
});

/// Nombres de los oráculos, en orden de declaración.
pub fn names() -> Vec<&'static str> {
    CATALOG.keys().map(String::as_str).collect()
}

pub fn definition(name: &str) -> Option<OracleDefinition> {
    CATALOG.get(name).cloned()
}

pub fn definitions() -> impl Iterator<Item = &'static OracleDefinition> {
    CATALOG.values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_and_ordered() {
        let names = names();
        assert_eq!(names.len(), 15);
        assert_eq!(names[0], "celecoxib_rediscovery");
        assert_eq!(names.last().copied(), Some("jnk3"));
    }

    #[test]
    fn test_every_definition_validates() {
        for def in definitions() {
            def.validate().unwrap_or_else(|e| panic!("{}: {e}", def.name));
        }
    }

    #[test]
    fn test_failure_values() {
        assert_eq!(definition("sa").unwrap().failure_value(), 100.0);
        assert_eq!(definition("penalized_logp").unwrap().failure_value(), -100.0);
        assert_eq!(definition("osimertinib_mpo").unwrap().failure_value(), 0.0);
        assert_eq!(definition("gsk3").unwrap().model_key(), Some("gsk3"));
        assert!(definition("unknown").is_none());
    }

    #[test]
    fn test_definition_hash_is_stable() {
        let a = definition("median1").unwrap().content_hash().unwrap();
        let b = definition("median1").unwrap().content_hash().unwrap();
        let c = definition("median2").unwrap().content_hash().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_definition_json_roundtrip() {
        let def = definition("osimertinib_mpo").unwrap();
        let json = serde_json::to_string(&def).unwrap();
        let back: OracleDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
    }
}
