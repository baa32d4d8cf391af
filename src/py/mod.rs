use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::TransformError;

mod transform;

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transform::scale_points, m)?)?;
    m.add_function(wrap_pyfunction!(transform::transform_points, m)?)?;
    Ok(())
}

fn to_py_err(e: TransformError) -> PyErr {
    PyValueError::new_err(e.to_string())
}
