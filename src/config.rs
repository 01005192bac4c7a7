//! Configuración de los oráculos.
//! Se lee de variables de entorno (cargando `.env` una sola vez) sobre unos
//! valores por defecto utilizables sin entorno.
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use chem_domain::DEFAULT_FINGERPRINT_BITS;
use chem_oracles::catalog::{GSK3_MODEL, JNK3_MODEL};
use chem_oracles::DEFAULT_CACHE_CAPACITY;

use crate::errors::CoreError;

pub const ENV_GSK3_MODEL_PATH: &str = "ORACLE_GSK3_MODEL_PATH";
pub const ENV_JNK3_MODEL_PATH: &str = "ORACLE_JNK3_MODEL_PATH";
pub const ENV_FINGERPRINT_BITS: &str = "ORACLE_FINGERPRINT_BITS";
pub const ENV_FINGERPRINT_CACHE: &str = "ORACLE_FINGERPRINT_CACHE";
pub const ENV_FINGERPRINT_CACHE_CAPACITY: &str = "ORACLE_FINGERPRINT_CACHE_CAPACITY";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Artefacto de cada modelo de clasificación, por clave.
    pub model_paths: BTreeMap<String, PathBuf>,
    /// Longitud de los fingerprints de bits genéricos (similitud por pares,
    /// diversidad).
    pub fingerprint_bits: usize,
    pub fingerprint_cache: bool,
    /// Máximo de fingerprints (y de codificaciones no interpretables) que
    /// retiene la cache antes de expulsar las menos usadas.
    pub fingerprint_cache_capacity: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        let model_paths = BTreeMap::from([(GSK3_MODEL.to_string(), PathBuf::from("oracle/gsk3.json")),
                                          (JNK3_MODEL.to_string(), PathBuf::from("oracle/jnk3.json"))]);
        Self { model_paths,
               fingerprint_bits: DEFAULT_FINGERPRINT_BITS,
               fingerprint_cache: true,
               fingerprint_cache_capacity: DEFAULT_CACHE_CAPACITY }
    }
}

impl OracleConfig {
    /// Valores por defecto sobreescritos por las variables `ORACLE_*`.
    ///
    /// # Errores
    /// `CoreError::Config` si alguna variable tiene un valor no interpretable.
    pub fn from_env() -> Result<Self, CoreError> {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero leyendo de una función arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_GSK3_MODEL_PATH) {
            config.model_paths.insert(GSK3_MODEL.to_string(), PathBuf::from(path));
        }
        if let Some(path) = lookup(ENV_JNK3_MODEL_PATH) {
            config.model_paths.insert(JNK3_MODEL.to_string(), PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_FINGERPRINT_BITS) {
            config.fingerprint_bits = parse_positive(ENV_FINGERPRINT_BITS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FINGERPRINT_CACHE_CAPACITY) {
            config.fingerprint_cache_capacity = parse_positive(ENV_FINGERPRINT_CACHE_CAPACITY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_FINGERPRINT_CACHE) {
            config.fingerprint_cache = parse_flag(&raw).ok_or_else(|| {
                                                           CoreError::Config(format!("{ENV_FINGERPRINT_CACHE} inválido: '{raw}'"))
                                                       })?;
        }
        Ok(config)
    }

    pub fn with_model_path(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.model_paths.insert(key.into(), path.into());
        self
    }

    pub fn model_path(&self, key: &str) -> Option<&Path> {
        self.model_paths.get(key).map(PathBuf::as_path)
    }
}

fn parse_positive(var: &str, raw: &str) -> Result<usize, CoreError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CoreError::Config(format!("{var} inválido: '{raw}'"))),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
