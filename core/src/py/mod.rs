use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::analyzer::RepAnalyzer;
use crate::config::PipelineConfig;
use crate::error::LiftError;
use crate::session;

fn to_py_err(e: LiftError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Godtar både str og dict/objekt; dict serialiseres via Python sin json.dumps.
fn payload_to_json(py: Python<'_>, payload: &PyAny) -> PyResult<String> {
    if let Ok(s) = payload.extract::<&str>() {
        return Ok(s.to_owned());
    }
    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    json_mod
        .call_method1("dumps", (payload,))
        .and_then(|o| o.extract::<String>())
        .map_err(|e| PyValueError::new_err(format!("failed to serialize payload with json.dumps: {e}")))
}

/// Returnerer JSON som Python-objekt via json.loads (unngår pyo3 serde-feature).
fn json_to_py(py: Python<'_>, out: &str) -> PyResult<PyObject> {
    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    let obj = json_mod
        .call_method1("loads", (out,))
        .map_err(|e| PyValueError::new_err(format!("internal JSON parse error via json.loads: {e}")))?;
    Ok(obj.into_py(py))
}

#[pyclass(name = "RepAnalyzer")]
struct PyRepAnalyzer {
    inner: RepAnalyzer,
}

#[pymethods]
impl PyRepAnalyzer {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(py: Python<'_>, config: Option<&PyAny>) -> PyResult<Self> {
        let cfg = match config {
            Some(c) => session::parse_config(&payload_to_json(py, c)?).map_err(to_py_err)?,
            None => PipelineConfig::default(),
        };
        let inner = RepAnalyzer::new(cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Strøm (dict eller JSON-str) → liste av RepEvent-dicts.
    fn segment_reps(&mut self, py: Python<'_>, stream: &PyAny) -> PyResult<PyObject> {
        let json_in = payload_to_json(py, stream)?;
        let out = session::segment_reps_json(&mut self.inner, &json_in).map_err(to_py_err)?;
        json_to_py(py, &out)
    }

    fn compute_single_rep(&mut self, py: Python<'_>, packet: &PyAny) -> PyResult<PyObject> {
        let json_in = payload_to_json(py, packet)?;
        let out = session::compute_single_rep_json(&mut self.inner, &json_in).map_err(to_py_err)?;
        json_to_py(py, &out)
    }

    fn reset_baselines(&mut self) {
        self.inner.reset_baselines();
    }

    fn baselines_json(&self) -> PyResult<String> {
        serde_json::to_string(self.inner.baselines()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn metrics_text(&self) -> PyResult<String> {
        self.inner.counters().gather_text().map_err(to_py_err)
    }
}

#[pyfunction]
fn aggregate_set(py: Python<'_>, reps: &PyAny) -> PyResult<PyObject> {
    let json_in = payload_to_json(py, reps)?;
    let out = session::aggregate_set_json(&json_in).map_err(to_py_err)?;
    json_to_py(py, &out)
}

#[pyfunction]
fn live_update(py: Python<'_>, reps: &PyAny) -> PyResult<PyObject> {
    let json_in = payload_to_json(py, reps)?;
    let out = session::live_update_json(&json_in).map_err(to_py_err)?;
    json_to_py(py, &out)
}

#[pymodule]
fn liftgraph_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyRepAnalyzer>()?;
    m.add_function(wrap_pyfunction!(aggregate_set, m)?)?;
    m.add_function(wrap_pyfunction!(live_update, m)?)?;
    Ok(())
}
