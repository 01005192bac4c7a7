//! Adaptador químico sobre registros precalculados.
//!
//! Cada `MoleculeRecord` guarda lo que un motor químico produciría para una
//! molécula: forma canónica, número de átomos, descriptores, tamaños de
//! anillo y fingerprints por tipo/forma. El adaptador indexa cada registro por
//! su forma canónica y por todos sus alias (otras escrituras SMILES de la
//! misma molécula), de modo que dos escrituras distintas canonicalizan igual.
//!
//! Una codificación que no está en la tabla se considera no interpretable.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use chem_domain::{ChemistryAdapter, Descriptor, Fingerprint, FingerprintKind, FingerprintShape, ParseFailure};

use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeRecord {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub atom_count: usize,
    #[serde(default)]
    pub descriptors: BTreeMap<Descriptor, f64>,
    #[serde(default)]
    pub ring_sizes: Vec<usize>,
    #[serde(default)]
    pub fingerprints: Vec<Fingerprint>,
}

impl MoleculeRecord {
    pub fn new(canonical: impl Into<String>, atom_count: usize) -> Self {
        Self { canonical: canonical.into(),
               aliases: Vec::new(),
               atom_count,
               descriptors: BTreeMap::new(),
               ring_sizes: Vec::new(),
               fingerprints: Vec::new() }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_descriptor(mut self, descriptor: Descriptor, value: f64) -> Self {
        self.descriptors.insert(descriptor, value);
        self
    }

    pub fn with_rings(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        self.ring_sizes.extend(sizes);
        self
    }

    /// Agrega (o reemplaza) el fingerprint del mismo tipo y forma.
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprints
            .retain(|fp| !(fp.kind() == fingerprint.kind() && fp.shape() == fingerprint.shape()));
        self.fingerprints.push(fingerprint);
        self
    }

    fn find_fingerprint(&self, kind: FingerprintKind, shape: FingerprintShape) -> Option<&Fingerprint> {
        self.fingerprints.iter().find(|fp| fp.kind() == kind && fp.shape() == shape)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.canonical.trim().is_empty() {
            return Err(EngineError::InvalidRecord("la forma canónica no puede estar vacía".to_string()));
        }
        for fp in &self.fingerprints {
            fp.validate()?;
        }
        if let Some((d, v)) = self.descriptors.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EngineError::InvalidRecord(format!("{}: descriptor {d} no finito ({v})", self.canonical)));
        }
        Ok(())
    }
}

/// `ChemistryAdapter` respaldado por una tabla de `MoleculeRecord`.
#[derive(Debug, Clone)]
pub struct TableAdapter {
    name: String,
    records: Vec<Arc<MoleculeRecord>>,
    index: HashMap<String, usize>,
}

impl TableAdapter {
    /// Construye el adaptador validando los registros.
    ///
    /// # Errores
    /// Retorna `EngineError::InvalidRecord` si algún registro es inválido o si
    /// una misma escritura (canónica o alias) apunta a dos registros.
    pub fn new<I>(records: I) -> Result<Self, EngineError>
        where I: IntoIterator<Item = MoleculeRecord>
    {
        let mut out = Vec::new();
        let mut index = HashMap::new();
        for record in records {
            record.validate()?;
            let slot = out.len();
            let keys = std::iter::once(record.canonical.as_str()).chain(record.aliases.iter().map(String::as_str));
            for key in keys {
                match index.insert(key.trim().to_string(), slot) {
                    Some(prev) if prev != slot => {
                        return Err(EngineError::InvalidRecord(format!("escritura duplicada en la tabla: {key}")));
                    }
                    _ => {}
                }
            }
            out.push(Arc::new(record));
        }
        log::debug!("TableAdapter cargado con {} registros ({} escrituras)", out.len(), index.len());
        Ok(Self { name: "table".to_string(),
                  records: out,
                  index })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let records: Vec<MoleculeRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Carga la tabla desde un archivo JSON con una lista de registros.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let adapter = Self::from_json_str(&raw)?;
        log::info!("tabla molecular cargada desde {}", path.display());
        Ok(adapter)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &MoleculeRecord> {
        self.records.iter().map(|r| r.as_ref())
    }
}

impl ChemistryAdapter for TableAdapter {
    type Structure = Arc<MoleculeRecord>;

    fn name(&self) -> &str {
        &self.name
    }

    fn parse(&self, encoding: &str) -> Result<Self::Structure, ParseFailure> {
        let key = encoding.trim();
        if key.is_empty() {
            return Err(ParseFailure::new(encoding, "codificación vacía"));
        }
        self.index
            .get(key)
            .map(|&slot| Arc::clone(&self.records[slot]))
            .ok_or_else(|| ParseFailure::new(encoding, "molécula desconocida para la tabla"))
    }

    fn fingerprint(&self,
                   structure: &Self::Structure,
                   kind: FingerprintKind,
                   shape: FingerprintShape)
                   -> Option<Fingerprint> {
        structure.find_fingerprint(kind, shape).cloned()
    }

    fn descriptor(&self, structure: &Self::Structure, descriptor: Descriptor) -> Option<f64> {
        match descriptor {
            Descriptor::AtomCount => Some(structure.atom_count as f64),
            other => structure.descriptors.get(&other).copied(),
        }
    }

    fn ring_sizes(&self, structure: &Self::Structure) -> Vec<usize> {
        structure.ring_sizes.clone()
    }

    fn canonical_form(&self, structure: &Self::Structure) -> Option<String> {
        Some(structure.canonical.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn propane() -> MoleculeRecord {
        MoleculeRecord::new("CCC", 3).with_alias("C(C)C")
                                     .with_descriptor(Descriptor::LogP, 1.4163)
                                     .with_fingerprint(Fingerprint::from_bits(FingerprintKind::Ecfp4, 64, [1, 9]).unwrap())
    }

    #[test]
    fn test_alias_and_canonical_resolve_to_same_record() {
        let adapter = TableAdapter::new(vec![propane()]).unwrap();
        assert_eq!(adapter.canonicalize("C(C)C").as_deref(), Some("CCC"));
        assert_eq!(adapter.canonicalize(" CCC ").as_deref(), Some("CCC"));
        assert!(adapter.parse("CCO").is_err());
        assert!(adapter.parse("").is_err());
    }

    #[test]
    fn test_descriptors_and_atom_count() {
        let adapter = TableAdapter::new(vec![propane()]).unwrap();
        let s = adapter.parse("CCC").unwrap();
        assert_eq!(adapter.atom_count(&s), 3);
        assert_eq!(adapter.descriptor(&s, Descriptor::LogP), Some(1.4163));
        assert_eq!(adapter.descriptor(&s, Descriptor::Tpsa), None);
        assert!(adapter.ring_sizes(&s).is_empty());
    }

    #[test]
    fn test_fingerprint_requires_matching_shape() {
        let adapter = TableAdapter::new(vec![propane()]).unwrap();
        let s = adapter.parse("CCC").unwrap();
        assert!(adapter.fingerprint(&s, FingerprintKind::Ecfp4, FingerprintShape::Bits { n_bits: 64 }).is_some());
        assert!(adapter.fingerprint(&s, FingerprintKind::Ecfp4, FingerprintShape::bits()).is_none());
        assert!(adapter.fingerprint(&s, FingerprintKind::Ecfp6, FingerprintShape::Bits { n_bits: 64 }).is_none());
    }

    #[test]
    fn test_duplicate_spelling_is_rejected() {
        let other = MoleculeRecord::new("CCCO", 4).with_alias("CCC");
        assert!(TableAdapter::new(vec![propane(), other]).is_err());
    }

    #[test]
    fn test_load_from_json_file() {
        let json = serde_json::to_string(&vec![propane()]).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let adapter = TableAdapter::from_json_file(file.path()).unwrap();
        assert_eq!(adapter.len(), 1);
        assert_eq!(adapter.records().next().unwrap(), &propane());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TableAdapter::from_json_file("/nonexistent/table.json").unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
