#![allow(dead_code)]
use chemengine::fixtures::{self, FIXTURE_BITS};
use chemoracle_rust::domain::Descriptor;
use chemoracle_rust::engine::{MoleculeRecord, TableAdapter};
use chemoracle_rust::oracles::catalog::{CAMPHOR, CELECOXIB, MENTHOL};

pub const N_BITS: usize = FIXTURE_BITS;

pub fn record(canonical: &str, atoms: usize, features: &[u64]) -> MoleculeRecord {
    fixtures::record(canonical, atoms, features).unwrap()
}

pub fn adapter() -> TableAdapter {
    let celecoxib: Vec<u64> = (1..=40).collect();
    TableAdapter::new(vec![
        record(CELECOXIB, 26, &celecoxib).with_descriptor(Descriptor::Qed, 0.748),
        record(CAMPHOR, 11, &[50, 51, 52, 53]),
        record(MENTHOL, 11, &[52, 53, 54, 55]),
        record("CCC", 3, &[1, 500, 501]).with_alias("C(C)C")
                                        .with_descriptor(Descriptor::Qed, 0.385),
        record("CCO", 3, &[600, 601]),
    ]).unwrap()
}
