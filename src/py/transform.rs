//! PyO3 bindings for batch point transformation.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::to_py_err;
use crate::backend::{CpuBackend, Transformer};
use crate::proj::ellipsoid::EllipsoidKind;
use crate::proj::projection::ProjectionKind;
use crate::proj::transverse_mercator::TransverseMercator;
use crate::transform::{Operation, Scale};

type PointArrays<'py> = (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>);

/// Scale arrays of coordinates by a constant factor.
///
/// Args:
///     x: 1D array of x coordinates.
///     y: 1D array of y coordinates, same length as x.
///     factor: Scale factor applied to both axes.
///     concurrency: Worker cap (0 = all cores, 1 = single-threaded).
///
/// Returns:
///     Tuple of (x_out, y_out) arrays.
#[pyfunction]
#[pyo3(signature = (x, y, factor, concurrency=0))]
pub fn scale_points<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
    factor: f64,
    concurrency: usize,
) -> PyResult<PointArrays<'py>> {
    run(py, &Operation::Scale(Scale::new(factor)), x, y, concurrency)
}

/// Project arrays of coordinates between geographic and transverse Mercator.
///
/// Args:
///     x: 1D array of x coordinates (longitude in degrees or easting in metres).
///     y: 1D array of y coordinates (latitude in degrees or northing in metres).
///     src: Source projection, "latlong" or "tmerc".
///     dst: Destination projection, "latlong" or "tmerc".
///     ellipsoid: "sphere" or "WGS84".
///     lat_0, lon_0, k_0, x_0, y_0: Transverse Mercator parameters.
///     concurrency: Worker cap (0 = all cores, 1 = single-threaded).
///
/// Returns:
///     Tuple of (x_out, y_out) arrays. Points outside the projection domain
///     come back as (inf, inf).
#[pyfunction]
#[pyo3(signature = (
    x, y, src, dst, ellipsoid="WGS84",
    lat_0=0.0, lon_0=0.0, k_0=1.0, x_0=0.0, y_0=0.0, concurrency=0
))]
#[allow(clippy::too_many_arguments)]
pub fn transform_points<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
    src: &str,
    dst: &str,
    ellipsoid: &str,
    lat_0: f64,
    lon_0: f64,
    k_0: f64,
    x_0: f64,
    y_0: f64,
    concurrency: usize,
) -> PyResult<PointArrays<'py>> {
    let params = TransverseMercator::new((x_0, y_0))
        .with_origin(lat_0, lon_0)
        .with_scale_factor(k_0);
    let from = parse_projection(src, params)?;
    let to = parse_projection(dst, params)?;
    let ellipsoid = EllipsoidKind::from_name(ellipsoid)
        .ok_or_else(|| PyValueError::new_err(format!("unknown ellipsoid: {ellipsoid}")))?;

    let op = Operation::projection(from, to, ellipsoid).map_err(to_py_err)?;
    run(py, &op, x, y, concurrency)
}

fn parse_projection(name: &str, params: TransverseMercator) -> PyResult<ProjectionKind> {
    ProjectionKind::from_name(name, params)
        .ok_or_else(|| PyValueError::new_err(format!("unknown projection: {name}")))
}

fn run<'py>(
    py: Python<'py>,
    op: &Operation,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
    concurrency: usize,
) -> PyResult<PointArrays<'py>> {
    let x = x.as_array().to_vec();
    let y = y.as_array().to_vec();
    let op = *op;

    let (xs, ys) = py
        .allow_threads(move || {
            let transformer = Transformer::new(CpuBackend::with_concurrency(concurrency)?);
            transformer.run(&op, &x, &y)
        })
        .map_err(to_py_err)?;

    Ok((
        PyArray1::from_owned_array(py, ndarray::Array1::from(xs)),
        PyArray1::from_owned_array(py, ndarray::Array1::from(ys)),
    ))
}
