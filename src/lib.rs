//! Parallel pointwise coordinate transforms: uniform scaling and transverse
//! Mercator projection on a sphere or the WGS84 ellipsoid.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod backend;
pub mod chunk;
pub mod config;
pub mod error;
pub mod proj;
pub mod transform;
#[cfg(feature = "python")]
mod py;

pub use backend::{Backend, CpuBackend, ReferenceBackend, Transformer};
pub use config::TransformConfig;
pub use error::{ProjError, TransformError};
pub use transform::{Operation, Scale, SineCosine, Transform};

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
