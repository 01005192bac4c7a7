use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Codificación textual de una molécula (SMILES).
///
/// Es opaca para este crate: la única invariante es que el texto no esté
/// vacío. Si la molécula es químicamente válida lo decide el adaptador
/// (`ChemistryAdapter::parse`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MoleculeEncoding(String);

impl MoleculeEncoding {
    /// Crea una codificación validando que el texto no esté en blanco.
    ///
    /// # Errores
    /// Retorna `DomainError::ValidationError` si el texto está vacío o sólo
    /// contiene espacios.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::ValidationError("La codificación molecular no puede estar vacía".to_string()));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for MoleculeEncoding {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MoleculeEncoding {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for MoleculeEncoding {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoleculeEncoding> for String {
    fn from(value: MoleculeEncoding) -> Self {
        value.0
    }
}

impl fmt::Display for MoleculeEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
