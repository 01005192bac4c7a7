//! Registro de oráculos construidos bajo demanda.
//!
//! Cada oráculo se construye la primera vez que se pide y luego se comparte
//! (`Arc<Oracle>`). Los modelos de clasificación también se cargan una sola
//! vez por clave. Peticiones concurrentes del mismo nombre construyen una
//! única instancia (`OnceCell` por entrada del `DashMap`).
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;

use chem_domain::{ChemistryAdapter, ClassifierModel};
use chem_metrics::{PopulationReport, ReferenceSet};
use chem_oracles::{catalog, CacheStats, FingerprintCache, Oracle, OracleDefinition, OracleError, ScoringContext};
use chemengine::LogisticModel;

use crate::config::OracleConfig;
use crate::errors::CoreError;

type ModelCell = Arc<OnceCell<Arc<dyn ClassifierModel>>>;

pub struct OracleRegistry<A> {
    adapter: A,
    config: OracleConfig,
    cache: Option<FingerprintCache>,
    custom: DashMap<String, OracleDefinition>,
    oracles: DashMap<String, Arc<OnceCell<Arc<Oracle>>>>,
    models: DashMap<String, ModelCell>,
}

impl<A: ChemistryAdapter> OracleRegistry<A> {
    pub fn new(adapter: A, config: OracleConfig) -> Self {
        let cache = config.fingerprint_cache
                          .then(|| FingerprintCache::with_capacity(config.fingerprint_cache_capacity));
        Self { adapter,
               config,
               cache,
               custom: DashMap::new(),
               oracles: DashMap::new(),
               models: DashMap::new() }
    }

    /// Registro configurado desde el entorno (`OracleConfig::from_env`).
    pub fn from_env(adapter: A) -> Result<Self, CoreError> {
        Ok(Self::new(adapter, OracleConfig::from_env()?))
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    pub fn context(&self) -> ScoringContext<'_, A> {
        let ctx = ScoringContext::new(&self.adapter).with_n_bits(self.config.fingerprint_bits);
        match &self.cache {
            Some(cache) => ctx.with_cache(cache),
            None => ctx,
        }
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(FingerprintCache::stats)
    }

    /// Agrega una definición propia. Los nombres del catálogo son reservados.
    pub fn register(&self, definition: OracleDefinition) -> Result<(), CoreError> {
        definition.validate()?;
        let taken = || OracleError::InvalidDefinition(format!("el oráculo '{}' ya existe", definition.name));
        if catalog::definition(&definition.name).is_some() {
            return Err(taken().into());
        }
        match self.custom.entry(definition.name.clone()) {
            Entry::Occupied(_) => Err(taken().into()),
            Entry::Vacant(slot) => {
                log::debug!("oráculo '{}' registrado", definition.name);
                slot.insert(definition.clone());
                Ok(())
            }
        }
    }

    /// Nombres disponibles: catálogo primero, luego los registrados.
    pub fn names(&self) -> Vec<String> {
        let mut custom: Vec<String> = self.custom.iter().map(|e| e.key().clone()).collect();
        custom.sort();
        catalog::names().into_iter().map(str::to_string).chain(custom).collect()
    }

    fn definition(&self, name: &str) -> Result<OracleDefinition, CoreError> {
        catalog::definition(name).or_else(|| self.custom.get(name).map(|d| d.value().clone()))
                                 .ok_or_else(|| OracleError::UnknownOracle(name.to_string()).into())
    }

    /// Oráculo por nombre, construido en la primera petición.
    ///
    /// # Errores
    /// - `OracleError::UnknownOracle` si el nombre no existe.
    /// - `CoreError::ModelLoad` si el artefacto del modelo falta o está dañado.
    pub fn oracle(&self, name: &str) -> Result<Arc<Oracle>, CoreError> {
        // Se clona la celda para no sostener el lock del DashMap al construir.
        let existing = self.oracles.get(name).map(|cell| Arc::clone(cell.value()));
        let cell = match existing {
            Some(cell) => cell,
            None => {
                // Sólo los nombres conocidos reciben una celda.
                self.definition(name)?;
                self.oracles.entry(name.to_string()).or_default().clone()
            }
        };
        let oracle = cell.get_or_try_init(|| self.build(name))?;
        Ok(Arc::clone(oracle))
    }

    /// Construye de antemano los oráculos indicados. Pensado para el arranque:
    /// un artefacto de modelo ausente falla aquí y no en la primera evaluación.
    pub fn preload<S>(&self, names: &[S]) -> Result<(), CoreError>
        where S: AsRef<str>
    {
        for name in names {
            self.oracle(name.as_ref())?;
        }
        log::debug!("{} oráculos precargados", names.len());
        Ok(())
    }

    /// Nombres de los oráculos ya construidos, ordenados.
    pub fn built(&self) -> Vec<String> {
        let mut names: Vec<String> = self.oracles
                                         .iter()
                                         .filter(|e| e.value().get().is_some())
                                         .map(|e| e.key().clone())
                                         .collect();
        names.sort();
        names
    }

    fn build(&self, name: &str) -> Result<Arc<Oracle>, CoreError> {
        let definition = self.definition(name)?;
        let model = match definition.model_key() {
            Some(key) => Some(self.model(key)?),
            None => None,
        };
        let oracle = Oracle::build(&definition, &self.context(), model)?;
        Ok(Arc::new(oracle))
    }

    /// Modelo de clasificación por clave, cargado una sola vez.
    pub fn model(&self, key: &str) -> Result<Arc<dyn ClassifierModel>, CoreError> {
        let cell = self.models.entry(key.to_string()).or_default().clone();
        let model = cell.get_or_try_init(|| {
                            let path = self.config
                                           .model_path(key)
                                           .ok_or_else(|| CoreError::ModelLoad(format!("sin ruta configurada para '{key}'")))?;
                            load_model(key, path, self.config.fingerprint_bits)
                        })?;
        Ok(Arc::clone(model))
    }

    /// Atajo: construye (si hace falta) y evalúa.
    pub fn evaluate(&self, name: &str, encoding: &str) -> Result<f64, CoreError> {
        let oracle = self.oracle(name)?;
        Ok(oracle.evaluate(&self.context(), encoding))
    }

    pub fn evaluate_batch<S>(&self, name: &str, encodings: &[S]) -> Result<Vec<f64>, CoreError>
        where S: AsRef<str> + Sync
    {
        let oracle = self.oracle(name)?;
        Ok(oracle.evaluate_batch(&self.context(), encodings))
    }

    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        chem_oracles::pairwise_similarity(&self.context(), a, b)
    }

    pub fn population_report<S>(&self, population: &[S], reference: Option<&ReferenceSet>) -> PopulationReport
        where S: AsRef<str>
    {
        PopulationReport::compute(&self.adapter, population, reference, self.config.fingerprint_bits)
    }
}

/// `.json` es un `LogisticModel`; `.pkl` requiere la feature `rdkit`.
fn load_model(key: &str, path: &Path, n_bits: usize) -> Result<Arc<dyn ClassifierModel>, CoreError> {
    let fail = |e: &dyn std::fmt::Display| CoreError::ModelLoad(format!("{key} ({}): {e}", path.display()));
    let is_pickle = path.extension().is_some_and(|ext| ext == "pkl");
    if is_pickle {
        #[cfg(feature = "rdkit")]
        {
            let model = chemengine::rdkit::PickledClassifier::load(path, Some(n_bits)).map_err(|e| fail(&e))?;
            return Ok(Arc::new(model));
        }
        #[cfg(not(feature = "rdkit"))]
        {
            let _ = n_bits;
            return Err(fail(&"los modelos pickle requieren la feature `rdkit`"));
        }
    }
    let model = LogisticModel::from_json_file(path).map_err(|e| fail(&e))?;
    Ok(Arc::new(model))
}
