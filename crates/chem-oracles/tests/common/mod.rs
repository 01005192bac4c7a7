#![allow(dead_code)]
use chem_domain::Descriptor;
use chem_oracles::catalog::{ALBUTEROL, ARIPIPRAZOLE, CAMPHOR, CELECOXIB, FEXOFENADINE, MENTHOL, MESTRANOL, OSIMERTINIB,
                            SILDENAFIL, TADALAFIL, THIOTHIXENE, TROGLITAZONE};
use chemengine::fixtures::{self, FIXTURE_BITS};
use chemengine::{MoleculeRecord, TableAdapter};

pub const N_BITS: usize = FIXTURE_BITS;

/// Aripiprazol sin un cloro: comparte 18 de sus 20 features (0.9).
pub const ARIPIPRAZOLE_DECHLORO: &str = "Clc4cccc(N3CCN(CCCCOc2ccc1c(NC(=O)CC1)c2)CC3)c4";
/// Homólogo propoxi: comparte 15 de 20 features, justo 0.75.
pub const ARIPIPRAZOLE_PROPOXY: &str = "Clc4cccc(N3CCN(CCCOc2ccc1c(NC(=O)CC1)c2)CC3)c4Cl";
/// Fragmento diclorofenilpiperazina: 10 compartidas y 10 propias (1/3).
pub const DICHLOROPHENYLPIPERAZINE: &str = "Clc1cccc(N2CCNCC2)c1Cl";

pub fn record(canonical: &str, atoms: usize, features: &[u64]) -> MoleculeRecord {
    fixtures::record(canonical, atoms, features).unwrap()
}

fn span(start: u64, len: u64) -> Vec<u64> {
    (start..start + len).collect()
}

pub fn adapter() -> TableAdapter {
    let fragment: Vec<u64> = span(200, 10).into_iter().chain(span(950, 10)).collect();
    TableAdapter::new(vec![
        record(CELECOXIB, 26, &span(1, 40)).with_descriptor(Descriptor::LogP, 3.514)
                                           .with_descriptor(Descriptor::Tpsa, 77.98)
                                           .with_descriptor(Descriptor::Qed, 0.748)
                                           .with_descriptor(Descriptor::SyntheticAccessibility, 2.18)
                                           .with_rings([5, 6, 6]),
        record("CCC", 3, &[1, 500, 501]).with_alias("C(C)C")
                                        .with_descriptor(Descriptor::LogP, 1.4163)
                                        .with_descriptor(Descriptor::Tpsa, 0.0)
                                        .with_descriptor(Descriptor::Qed, 0.385)
                                        .with_descriptor(Descriptor::SyntheticAccessibility, 1.25),
        // Sin QED ni TPSA: los oráculos que los piden violan una precondición.
        record("CCO", 3, &[600, 601]).with_descriptor(Descriptor::LogP, -0.0014),
        record(OSIMERTINIB, 37, &span(100, 60)).with_descriptor(Descriptor::LogP, 4.51)
                                               .with_descriptor(Descriptor::Tpsa, 87.55),
        record("C1CCCCCCCC1", 9, &[700, 701, 702]).with_descriptor(Descriptor::LogP, 3.51)
                                                  .with_descriptor(Descriptor::SyntheticAccessibility, 2.5)
                                                  .with_rings([9]),
        record(TROGLITAZONE, 32, &span(1200, 30)),
        record(THIOTHIXENE, 30, &span(1300, 30)),
        record(ARIPIPRAZOLE, 30, &span(200, 20)),
        record(ARIPIPRAZOLE_DECHLORO, 29, &span(200, 18)),
        record(ARIPIPRAZOLE_PROPOXY, 29, &span(200, 15)),
        record(DICHLOROPHENYLPIPERAZINE, 14, &fragment),
        record(ALBUTEROL, 17, &span(300, 10)),
        record(MESTRANOL, 23, &span(400, 20)),
        record(CAMPHOR, 11, &[50, 51, 52, 53]),
        record(MENTHOL, 11, &[52, 53, 54, 55]),
        // Tadalafil y sildenafil comparten 6 de 18 features (1/3).
        record(TADALAFIL, 29, &span(1000, 12)),
        record(SILDENAFIL, 33, &span(1006, 12)),
        // Valores de prueba: TPSA bajo el techo de 90 y logP 1 por debajo del piso de 4.
        record(FEXOFENADINE, 37, &span(1100, 30)).with_descriptor(Descriptor::LogP, 3.0)
                                                 .with_descriptor(Descriptor::Tpsa, 81.0),
    ]).unwrap()
}
