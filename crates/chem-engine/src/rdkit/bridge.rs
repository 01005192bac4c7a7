use pyo3::ffi::c_str;
use pyo3::prelude::*;
use pyo3::types::PyModule;
use std::collections::HashMap;
use std::ffi::CString;
use std::sync::OnceLock;

static RDKIT_MODULE: OnceLock<Py<PyModule>> = OnceLock::new();

pub fn init_python() -> PyResult<()> {
    if RDKIT_MODULE.get().is_some() {
        return Ok(());
    }
    Python::attach(|py| {
        let code = CString::new(include_str!("../../python/rdkit_wrapper.py"))?;
        let module = PyModule::from_code(py, code.as_c_str(), c_str!("rdkit_wrapper.py"), c_str!("rdkit_wrapper"))?;
        // Guardamos el módulo en el OnceLock como Py<PyModule>
        RDKIT_MODULE.set(module.unbind()).ok();
        Ok(())
    })
}

fn get_module(py: Python<'_>) -> PyResult<Py<PyModule>> {
    RDKIT_MODULE.get().map(|module| module.clone_ref(py)).ok_or_else(|| {
                                                             PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(
            "init_python() debe llamarse antes de usar el motor RDKit"
        )
                                                         })
}

/// `None` si RDKit no puede interpretar o sanitizar el SMILES.
pub fn parse_smiles(smiles: &str) -> PyResult<Option<Py<PyAny>>> {
    Python::attach(|py| {
        let module = get_module(py)?;
        let mol = module.bind(py).getattr("parse_smiles")?.call1((smiles,))?;
        Ok(if mol.is_none() { None } else { Some(mol.unbind()) })
    })
}

pub fn fingerprint_bits(mol: &Py<PyAny>, kind: &str, n_bits: usize) -> PyResult<Vec<u32>> {
    Python::attach(|py| {
        let module = get_module(py)?;
        module.bind(py).getattr("fingerprint_bits")?.call1((mol.clone_ref(py), kind, n_bits))?.extract()
    })
}

pub fn fingerprint_counts(mol: &Py<PyAny>, kind: &str) -> PyResult<HashMap<u64, u32>> {
    Python::attach(|py| {
        let module = get_module(py)?;
        module.bind(py).getattr("fingerprint_counts")?.call1((mol.clone_ref(py), kind))?.extract()
    })
}

pub fn descriptor(mol: &Py<PyAny>, name: &str) -> PyResult<f64> {
    Python::attach(|py| {
        let module = get_module(py)?;
        module.bind(py).getattr("descriptor")?.call1((mol.clone_ref(py), name))?.extract()
    })
}

pub fn ring_sizes(mol: &Py<PyAny>) -> PyResult<Vec<usize>> {
    Python::attach(|py| {
        let module = get_module(py)?;
        module.bind(py).getattr("ring_sizes")?.call1((mol.clone_ref(py),))?.extract()
    })
}

pub fn canonical(mol: &Py<PyAny>) -> PyResult<String> {
    Python::attach(|py| {
        let module = get_module(py)?;
        module.bind(py).getattr("canonical")?.call1((mol.clone_ref(py),))?.extract()
    })
}

pub fn load_pickle(path: &str) -> PyResult<Py<PyAny>> {
    Python::attach(|py| {
        let module = get_module(py)?;
        Ok(module.bind(py).getattr("load_pickle")?.call1((path,))?.unbind())
    })
}

pub fn predict_proba(model: &Py<PyAny>, features: &[f64]) -> PyResult<f64> {
    Python::attach(|py| {
        let module = get_module(py)?;
        module.bind(py).getattr("predict_proba")?.call1((model.clone_ref(py), features.to_vec()))?.extract()
    })
}
