use chem_domain::{Fingerprint, FingerprintKind};
use chem_metrics::{diversity, novel_fraction, novelty, unique_canonical, unique_rate, validity_ratio, MetricsError,
                   PopulationReport, ReferenceSet, UniqueRateBasis};
use chemengine::{MoleculeRecord, TableAdapter};

const N_BITS: usize = 64;

fn record(canonical: &str, atoms: usize, bits: &[u32]) -> MoleculeRecord {
    MoleculeRecord::new(canonical, atoms).with_fingerprint(Fingerprint::from_bits(FingerprintKind::Ecfp4,
                                                                                  N_BITS,
                                                                                  bits.iter().copied()).unwrap())
}

fn adapter() -> TableAdapter {
    TableAdapter::new(vec![record("CCC", 3, &[1, 2, 3]).with_alias("C(C)C"),
                           record("CCO", 3, &[2, 3, 4]).with_alias("OCC"),
                           record("c1ccccc1", 6, &[10, 11]),
                           // Interpretable pero sin átomos.
                           record("[empty]", 0, &[])]).unwrap()
}

#[test]
fn validity_ratio_bounds() {
    let a = adapter();
    assert_eq!(validity_ratio(&a, &["CCC"]).unwrap(), 1.0);
    assert_eq!(validity_ratio(&a, &[""]).unwrap(), 0.0);
    assert_eq!(validity_ratio(&a, &["CCC", "xx", "[empty]", "CCO"]).unwrap(), 0.5);
    assert_eq!(validity_ratio::<_, &str>(&a, &[]), Err(MetricsError::EmptyPopulation));
}

#[test]
fn unique_rate_counts_canonical_forms() {
    let a = adapter();
    assert_eq!(unique_rate(&a, &["CCC", "CCC"], UniqueRateBasis::AllInputs).unwrap(), 0.5);
    assert_eq!(unique_rate(&a, &["CCC", "C(C)C", "CCO", "bad"], UniqueRateBasis::AllInputs).unwrap(), 0.5);
    let valid_basis = unique_rate(&a, &["CCC", "C(C)C", "CCO", "bad"], UniqueRateBasis::ValidInputs).unwrap();
    assert!((valid_basis - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(unique_rate(&a, &["bad"], UniqueRateBasis::ValidInputs), Err(MetricsError::NoValidMolecules));
}

#[test]
fn unique_rate_ignores_structures_without_atoms() {
    let a = adapter();
    assert_eq!(validity_ratio(&a, &["CCC", "[empty]"]).unwrap(), 0.5);
    assert_eq!(unique_rate(&a, &["CCC", "[empty]"], UniqueRateBasis::ValidInputs).unwrap(), 1.0);
    assert_eq!(unique_rate(&a, &["CCC", "[empty]"], UniqueRateBasis::AllInputs).unwrap(), 0.5);
    assert_eq!(unique_rate(&a, &["[empty]"], UniqueRateBasis::ValidInputs), Err(MetricsError::NoValidMolecules));
    for basis in [UniqueRateBasis::AllInputs, UniqueRateBasis::ValidInputs] {
        let rate = unique_rate(&a, &["CCC", "OCC", "[empty]", "[empty]", "junk"], basis).unwrap();
        assert!(rate <= 1.0, "{basis:?}: {rate}");
    }
    assert!(unique_canonical(&a, &["[empty]", "CCC"]).iter().eq(["CCC"]));
}

#[test]
fn unique_canonical_is_sorted() {
    let a = adapter();
    let unique: Vec<String> = unique_canonical(&a, &["OCC", "c1ccccc1", "C(C)C", "nope"]).into_iter().collect();
    assert_eq!(unique, vec!["CCC", "CCO", "c1ccccc1"]);
}

#[test]
fn novelty_is_fraction_already_known() {
    let a = adapter();
    let reference = ReferenceSet::from_encodings(&a, ["CCC"]);
    assert_eq!(novelty(&a, &["CCC", "CCO"], &reference).unwrap(), 0.5);
    assert_eq!(novel_fraction(&a, &["C(C)C", "CCO", "OCC"], &reference).unwrap(), 0.5);
    assert_eq!(novelty(&a, &["junk"], &reference), Err(MetricsError::NoValidMolecules));
}

#[test]
fn reference_set_drops_unparsable_entries() {
    let a = adapter();
    let reference = ReferenceSet::from_encodings(&a, vec!["OCC".to_string(), "junk".to_string()]);
    assert_eq!(reference.len(), 1);
    assert!(reference.contains("CCO"));
}

#[test]
fn diversity_is_mean_pairwise_similarity() {
    let a = adapter();
    // CCC {1,2,3} vs CCO {2,3,4}: 2/4
    let d = diversity(&a, &["CCC", "CCO"], FingerprintKind::Ecfp4, N_BITS).unwrap();
    assert!((d - 0.5).abs() < 1e-12);
    assert!(d < 1.0);
    // más benceno (disjunto): (0.5 + 0 + 0) / 3
    let d3 = diversity(&a, &["CCC", "CCO", "c1ccccc1", "C(C)C"], FingerprintKind::Ecfp4, N_BITS).unwrap();
    assert!((d3 - 0.5 / 3.0).abs() < 1e-12);
}

#[test]
fn diversity_needs_two_unique_molecules() {
    let a = adapter();
    assert_eq!(diversity(&a, &["CCC", "C(C)C"], FingerprintKind::Ecfp4, N_BITS),
               Err(MetricsError::InsufficientUnique { found: 1 }));
    assert!(matches!(diversity(&a, &["CCC", "CCO"], FingerprintKind::Ecfp6, N_BITS),
                     Err(MetricsError::MissingFingerprint { .. })));
}

#[test]
fn diversity_skips_structures_without_atoms() {
    let a = adapter();
    assert_eq!(diversity(&a, &["CCC", "[empty]"], FingerprintKind::Ecfp4, N_BITS),
               Err(MetricsError::InsufficientUnique { found: 1 }));
    let d = diversity(&a, &["CCC", "[empty]", "CCO"], FingerprintKind::Ecfp4, N_BITS).unwrap();
    assert!((d - 0.5).abs() < 1e-12);
}

#[test]
fn novelty_ignores_structures_without_atoms() {
    let a = adapter();
    let reference = ReferenceSet::from_canonical(["CCC"]);
    assert_eq!(novelty(&a, &["CCC", "[empty]"], &reference).unwrap(), 1.0);
    assert_eq!(novelty(&a, &["[empty]"], &reference), Err(MetricsError::NoValidMolecules));
}

#[test]
fn report_collects_metrics_and_skips_failures() {
    let a = adapter();
    let reference = ReferenceSet::from_canonical(["CCC"]);
    let report = PopulationReport::compute(&a, &["CCC", "CCO", "bad"], Some(&reference), N_BITS);
    assert_eq!(report.population_size, 3);
    assert!((report.validity.unwrap() - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(report.unique_rate_valid, Some(1.0));
    assert_eq!(report.novelty, Some(0.5));
    assert_eq!(report.diversity, Some(0.5));

    let lonely = PopulationReport::compute(&a, &["CCC"], None, N_BITS);
    assert_eq!(lonely.novelty, None);
    assert_eq!(lonely.diversity, None);
    assert_ne!(lonely.id, report.id);

    let json = serde_json::to_string(&report).unwrap();
    let back: PopulationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
