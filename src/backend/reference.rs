//! Reference backend delegating to proj4rs.
//!
//! Used to cross-check the native projection math; it runs on the calling
//! thread and only accepts projection operations.

use crate::backend::Backend;
use crate::chunk::batch::PointBatch;
use crate::error::TransformError;
use crate::proj::crs::{CrsTransform, ProjPair};

#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    pub fn new() -> Self {
        Self
    }
}

impl<P: ProjPair + ?Sized> Backend<P> for ReferenceBackend {
    fn run(&self, op: &P, mut batch: PointBatch<'_>) -> Result<(), TransformError> {
        let crs = CrsTransform::for_pair(op)?;
        log::debug!("reference run: {} points", batch.len());

        let (x, y) = batch.inputs();
        let mut coords: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        crs.transform_in_place(&mut coords)?;

        let (x_out, y_out) = batch.outputs_mut();
        for ((xo, yo), (cx, cy)) in x_out.iter_mut().zip(y_out.iter_mut()).zip(coords) {
            *xo = cx;
            *yo = cy;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CpuBackend, Transformer};
    use crate::proj::ellipsoid::EllipsoidKind;
    use crate::proj::projection::{
        LatLong, ProjectionKind, ProjectionOp, SphereTmercForward, SphereTmercInverse,
        Wgs84TmercForward, Wgs84TmercInverse,
    };
    use crate::proj::transverse_mercator::TransverseMercator;
    use approx::relative_eq;

    const N: usize = 10_000;

    fn assert_backends_agree(ours: (&[f64], &[f64]), reference: (&[f64], &[f64]), abs: f64) {
        for i in 0..ours.0.len() {
            for (a, b) in [(ours.0[i], reference.0[i]), (ours.1[i], reference.1[i])] {
                assert!(
                    relative_eq!(a, b, epsilon = abs, max_relative = 1e-5),
                    "point {i}: native {a} vs proj4rs {b}"
                );
            }
        }
    }

    /// Points on the circle of radius 45 degrees around the origin.
    fn circle_points() -> (Vec<f64>, Vec<f64>) {
        (0..N)
            .map(|i| {
                let t = i as f64 * std::f64::consts::TAU / N as f64;
                (45.0 * t.sin(), 45.0 * t.cos())
            })
            .unzip()
    }

    /// Latitudes across (-80, 80), longitudes across (-90, 90) from the central meridian.
    fn hemisphere_points(lon0: f64) -> (Vec<f64>, Vec<f64>) {
        (0..N)
            .map(|i| {
                let t = i as f64;
                (lon0 + 89.0 * (t * 0.61).sin(), 79.9 * (t * 0.13).cos())
            })
            .unzip()
    }

    #[test]
    fn test_sphere_forward_matches_proj4rs() {
        let (lon, lat) = circle_points();
        let op = SphereTmercForward::new(LatLong, TransverseMercator::new((123.0, -456.0)));

        let native = Transformer::new(CpuBackend::with_concurrency(0).unwrap());
        let reference = Transformer::new(ReferenceBackend::new());
        let (xn, yn) = native.run(&op, &lon, &lat).unwrap();
        let (xr, yr) = reference.run(&op, &lon, &lat).unwrap();
        assert_backends_agree((&xn, &yn), (&xr, &yr), 1e-3);
    }

    #[test]
    fn test_sphere_inverse_matches_proj4rs() {
        let tm = TransverseMercator::default();
        let (lon, lat) = circle_points();
        let native = Transformer::new(CpuBackend::with_concurrency(0).unwrap());
        let (x, y) = native
            .run(&SphereTmercForward::new(LatLong, tm), &lon, &lat)
            .unwrap();

        let inv = SphereTmercInverse::new(tm, LatLong);
        let (lon_n, lat_n) = native.run(&inv, &x, &y).unwrap();
        let (lon_r, lat_r) = Transformer::new(ReferenceBackend).run(&inv, &x, &y).unwrap();
        assert_backends_agree((&lon_n, &lat_n), (&lon_r, &lat_r), 1e-8);
    }

    #[test]
    fn test_wgs84_forward_matches_proj4rs() {
        let tm = TransverseMercator::utm_zone(33, true);
        let (lon, lat) = hemisphere_points(tm.lon0);
        let op = Wgs84TmercForward::new(LatLong, tm);

        let native = Transformer::new(CpuBackend::with_concurrency(0).unwrap());
        let (xn, yn) = native.run(&op, &lon, &lat).unwrap();
        let (xr, yr) = Transformer::new(ReferenceBackend).run(&op, &lon, &lat).unwrap();
        assert_backends_agree((&xn, &yn), (&xr, &yr), 1e-3);
    }

    #[test]
    fn test_wgs84_inverse_matches_proj4rs() {
        let tm = TransverseMercator::new((500_000.0, 0.0));
        let (lon, lat) = hemisphere_points(0.0);
        let native = Transformer::new(CpuBackend::with_concurrency(0).unwrap());
        let (x, y) = native
            .run(&Wgs84TmercForward::new(LatLong, tm), &lon, &lat)
            .unwrap();

        let inv = Wgs84TmercInverse::new(tm, LatLong);
        let (lon_n, lat_n) = native.run(&inv, &x, &y).unwrap();
        let (lon_r, lat_r) = Transformer::new(ReferenceBackend).run(&inv, &x, &y).unwrap();
        assert_backends_agree((&lon_n, &lat_n), (&lon_r, &lat_r), 1e-8);
    }

    #[test]
    fn test_scenario_inverse_point_matches_proj4rs() {
        let op = ProjectionOp::new(
            ProjectionKind::TransverseMercator(TransverseMercator::default()),
            ProjectionKind::LatLong,
            EllipsoidKind::Wgs84,
        )
        .unwrap();
        let x = [123_456.123_456];
        let y = [123_456.123_456];

        let (lon_n, lat_n) = Transformer::new(CpuBackend::sequential())
            .run(&op, &x, &y)
            .unwrap();
        let (lon_r, lat_r) = Transformer::new(ReferenceBackend).run(&op, &x, &y).unwrap();
        assert!(relative_eq!(lon_n[0], lon_r[0], epsilon = 1e-6));
        assert!(relative_eq!(lat_n[0], lat_r[0], epsilon = 1e-6));
    }

    #[test]
    fn test_length_mismatch_checked_before_proj4rs() {
        let op = Wgs84TmercForward::new(LatLong, TransverseMercator::default());
        let err = Transformer::new(ReferenceBackend)
            .run(&op, &[1.0, 2.0], &[1.0])
            .unwrap_err();
        assert!(matches!(err, TransformError::LengthMismatch { .. }));
    }
}
