//! Transverse Mercator projection.
//!
//! Two formulations share one set of parameters:
//! - sphere: the closed-form Gauss–Krüger mapping (`atanh`/`acos` forward,
//!   `exp`/`atan2` inverse);
//! - ellipsoid: Snyder's series expansion around the meridian arc `mlfn`,
//!   accurate to millimetres within a few degrees of the central meridian.
//!
//! Geographic coordinates are longitude/latitude in degrees, projected ones
//! are metres. Points the formulas cannot represent map to [`SENTINEL`].

use std::f64::consts::FRAC_PI_2;

use crate::proj::common::{inv_mlfn, mlfn, mod_pi};
use crate::proj::ellipsoid::Ellipsoid;

/// Output written for a point outside the numerically valid domain.
pub const SENTINEL: (f64, f64) = (f64::INFINITY, f64::INFINITY);

const EPS10: f64 = 1e-10;

// Series factors 1/n! style, as in Snyder (1987) eqs. 8-9 .. 8-11.
const FC1: f64 = 1.0;
const FC2: f64 = 0.5;
const FC3: f64 = 0.166_666_666_666_666_67;
const FC4: f64 = 0.083_333_333_333_333_33;
const FC5: f64 = 0.05;
const FC6: f64 = 0.033_333_333_333_333_33;
const FC7: f64 = 0.023_809_523_809_523_81;
const FC8: f64 = 0.017_857_142_857_142_86;

/// Transverse Mercator parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransverseMercator {
    /// Latitude of origin (degrees)
    pub lat0: f64,
    /// Central meridian (degrees)
    pub lon0: f64,
    /// Scale factor on the central meridian
    pub k0: f64,
    /// False easting (metres)
    pub x0: f64,
    /// False northing (metres)
    pub y0: f64,
}

impl TransverseMercator {
    /// Projection centred on (0°, 0°), unit scale, with planar offset `(x0, y0)`.
    pub fn new(offset: (f64, f64)) -> Self {
        Self {
            lat0: 0.0,
            lon0: 0.0,
            k0: 1.0,
            x0: offset.0,
            y0: offset.1,
        }
    }

    /// Create a Transverse Mercator for a WGS84 UTM zone.
    pub fn utm_zone(zone: u8, north: bool) -> Self {
        let lon0 = (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0;
        let y0 = if north { 0.0 } else { 10_000_000.0 };
        Self::new((500_000.0, y0))
            .with_origin(0.0, lon0)
            .with_scale_factor(0.9996)
    }

    pub fn with_origin(mut self, lat0: f64, lon0: f64) -> Self {
        self.lat0 = lat0;
        self.lon0 = lon0;
        self
    }

    pub fn with_scale_factor(mut self, k0: f64) -> Self {
        self.k0 = k0;
        self
    }
}

impl Default for TransverseMercator {
    fn default() -> Self {
        Self::new((0.0, 0.0))
    }
}

/// A Transverse Mercator bound to an ellipsoid, with everything that does not
/// depend on the point computed once.
#[derive(Clone, Copy, Debug)]
pub struct TmercSetup {
    ellipsoid: Ellipsoid,
    params: TransverseMercator,
    phi0: f64,
    lam0: f64,
    /// Meridian arc at the origin latitude (semi-major axis units)
    ml0: f64,
}

impl TmercSetup {
    pub fn new(ellipsoid: Ellipsoid, params: TransverseMercator) -> Self {
        let phi0 = params.lat0.to_radians();
        let (s, c) = phi0.sin_cos();
        Self {
            ellipsoid,
            params,
            phi0,
            lam0: params.lon0.to_radians(),
            ml0: mlfn(&ellipsoid, phi0, s, c),
        }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn params(&self) -> &TransverseMercator {
        &self.params
    }

    pub fn ml0(&self) -> f64 {
        self.ml0
    }

    /// Longitude relative to the central meridian, or `None` outside ±π/2.
    fn reduced_lambda(&self, lon: f64) -> Option<f64> {
        let lam = mod_pi(lon.to_radians() - self.lam0);
        (-FRAC_PI_2..=FRAC_PI_2).contains(&lam).then_some(lam)
    }

    /// Unit-sphere / unit-ellipsoid coordinates → metres with offset.
    fn to_planar(&self, x: f64, y: f64) -> (f64, f64) {
        let a = self.ellipsoid.a;
        finite_or_sentinel(a * x + self.params.x0, a * y + self.params.y0)
    }

    /// Metres with offset → semi-major axis units.
    fn from_planar(&self, x: f64, y: f64) -> (f64, f64) {
        let a = self.ellipsoid.a;
        ((x - self.params.x0) / a, (y - self.params.y0) / a)
    }

    fn to_geographic(&self, lam: f64, phi: f64) -> (f64, f64) {
        let lon = mod_pi(lam + self.lam0);
        finite_or_sentinel(lon.to_degrees(), phi.to_degrees())
    }

    /// Spherical forward: (lon, lat) degrees → (x, y) metres.
    pub fn sphere_forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        if !lon.is_finite() || !lat.is_finite() {
            return SENTINEL;
        }
        let Some(lam) = self.reduced_lambda(lon) else {
            return SENTINEL;
        };
        let phi = lat.to_radians();
        let k0 = self.params.k0;

        let cos_phi = phi.cos();
        let b = cos_phi * lam.sin();
        if (b.abs() - 1.0).abs() <= EPS10 {
            return SENTINEL;
        }

        let x = 0.5 * k0 * ((1.0 + b) / (1.0 - b)).ln();

        let cos_term = cos_phi * lam.cos() / (1.0 - b * b).sqrt();
        let mut y = if cos_term.abs() >= 1.0 {
            if cos_term.abs() - 1.0 > EPS10 {
                return SENTINEL;
            }
            0.0
        } else {
            cos_term.acos()
        };
        if phi < 0.0 {
            y = -y;
        }
        let y = k0 * (y - self.phi0);

        self.to_planar(x, y)
    }

    /// Spherical inverse: (x, y) metres → (lon, lat) degrees.
    pub fn sphere_inverse(&self, x: f64, y: f64) -> (f64, f64) {
        if !x.is_finite() || !y.is_finite() {
            return SENTINEL;
        }
        let (x, y) = self.from_planar(x, y);
        let k0 = self.params.k0;

        let h = (x / k0).exp();
        let g = 0.5 * (h - 1.0 / h);
        let d = self.phi0 + y / k0;
        let h = d.cos();

        let mut phi = ((1.0 - h * h) / (1.0 + g * g)).sqrt().asin();
        if d < 0.0 {
            phi = -phi;
        }
        let lam = if g != 0.0 || h != 0.0 { g.atan2(h) } else { 0.0 };

        self.to_geographic(lam, phi)
    }

    /// Ellipsoidal forward (Snyder series): (lon, lat) degrees → (x, y) metres.
    pub fn ellipsoid_forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        if !lon.is_finite() || !lat.is_finite() {
            return SENTINEL;
        }
        let Some(lam) = self.reduced_lambda(lon) else {
            return SENTINEL;
        };
        let phi = lat.to_radians();
        let es = self.ellipsoid.es;
        let k0 = self.params.k0;

        let (sin_phi, cos_phi) = phi.sin_cos();
        let mut t = if cos_phi.abs() > EPS10 {
            sin_phi / cos_phi
        } else {
            0.0
        };
        t *= t;
        let mut al = cos_phi * lam;
        let als = al * al;
        al /= (1.0 - es * sin_phi * sin_phi).sqrt();
        let n = self.ellipsoid.esp * cos_phi * cos_phi;

        let x = k0
            * al
            * (FC1
                + FC3
                    * als
                    * (1.0 - t
                        + n
                        + FC5
                            * als
                            * (5.0 + t * (t - 18.0) + n * (14.0 - 58.0 * t)
                                + FC7 * als * (61.0 + t * (t * (179.0 - t) - 479.0)))));

        let y = k0
            * (mlfn(&self.ellipsoid, phi, sin_phi, cos_phi) - self.ml0
                + sin_phi
                    * al
                    * lam
                    * FC2
                    * (1.0
                        + FC4
                            * als
                            * (5.0 - t
                                + n * (9.0 + 4.0 * n)
                                + FC6
                                    * als
                                    * (61.0
                                        + t * (t - 58.0)
                                        + n * (270.0 - 330.0 * t)
                                        + FC8 * als * (1385.0 + t * (t * (543.0 - t) - 3111.0))))));

        self.to_planar(x, y)
    }

    /// Ellipsoidal inverse (Snyder series): (x, y) metres → (lon, lat) degrees.
    pub fn ellipsoid_inverse(&self, x: f64, y: f64) -> (f64, f64) {
        if !x.is_finite() || !y.is_finite() {
            return SENTINEL;
        }
        let (x, y) = self.from_planar(x, y);
        let es = self.ellipsoid.es;
        let k0 = self.params.k0;

        let Some(mut phi) = inv_mlfn(&self.ellipsoid, self.ml0 + y / k0) else {
            return SENTINEL;
        };

        // Footpoint at or beyond a pole
        if phi.abs() >= FRAC_PI_2 {
            let phi = if y < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 };
            return self.to_geographic(0.0, phi);
        }

        let (sin_phi, cos_phi) = phi.sin_cos();
        let mut t = if cos_phi.abs() > EPS10 {
            sin_phi / cos_phi
        } else {
            0.0
        };
        let n = self.ellipsoid.esp * cos_phi * cos_phi;
        let mut con = 1.0 - es * sin_phi * sin_phi;
        let d = x * con.sqrt() / k0;
        con *= t;
        t *= t;
        let ds = d * d;

        phi -= (con * ds / (1.0 - es))
            * FC2
            * (1.0
                - ds * FC4
                    * (5.0 + t * (3.0 - 9.0 * n) + n * (1.0 - 4.0 * n)
                        - ds * FC6
                            * (61.0 + t * (90.0 - 252.0 * n + 45.0 * t) + 46.0 * n
                                - ds * FC8
                                    * (1385.0 + t * (3633.0 + t * (4095.0 + 1574.0 * t))))));

        let lam = d
            * (FC1
                - ds * FC3
                    * (1.0 + 2.0 * t + n
                        - ds * FC5
                            * (5.0 + t * (28.0 + 24.0 * t + 8.0 * n) + 6.0 * n
                                - ds * FC7 * (61.0 + t * (662.0 + t * (1320.0 + 720.0 * t))))))
            / cos_phi;

        self.to_geographic(lam, phi)
    }
}

fn finite_or_sentinel(x: f64, y: f64) -> (f64, f64) {
    if x.is_finite() && y.is_finite() {
        (x, y)
    } else {
        SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::{SPHERE, WGS84};
    use approx::assert_relative_eq;

    fn sphere() -> TmercSetup {
        TmercSetup::new(SPHERE, TransverseMercator::default())
    }

    fn wgs84() -> TmercSetup {
        TmercSetup::new(WGS84, TransverseMercator::default())
    }

    #[test]
    fn test_sphere_origin_maps_to_offset() {
        let tm = TmercSetup::new(SPHERE, TransverseMercator::new((1000.0, -250.0)));
        let (x, y) = tm.sphere_forward(0.0, 0.0);
        assert_relative_eq!(x, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(y, -250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sphere_known_point() {
        let (x, y) = sphere().sphere_forward(10.0, 20.0);
        assert_relative_eq!(x, 1_048_970.377_736_083_7, epsilon = 1e-6);
        assert_relative_eq!(y, 2_255_427.843_592_286_6, epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_central_meridian_is_arc() {
        // On the central meridian northing is R·φ
        let (x, y) = sphere().sphere_forward(0.0, 30.0);
        assert_relative_eq!(x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(y, SPHERE.a * 30.0_f64.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_out_of_domain_is_sentinel() {
        assert_eq!(sphere().sphere_forward(95.0, 10.0), SENTINEL);
        assert_eq!(sphere().sphere_forward(-120.0, -45.0), SENTINEL);
    }

    #[test]
    fn test_sphere_near_singular_is_sentinel() {
        // b = cos(φ)·sin(λ) = 1 at the equator, 90° from the central meridian
        assert_eq!(sphere().sphere_forward(90.0, 0.0), SENTINEL);
    }

    #[test]
    fn test_sphere_longitude_reduced_before_domain_check() {
        let a = sphere().sphere_forward(-80.0, 30.0);
        let b = sphere().sphere_forward(280.0, 30.0);
        assert_relative_eq!(a.0, b.0, epsilon = 1e-6);
        assert_relative_eq!(a.1, b.1, epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_roundtrip() {
        let tm = TmercSetup::new(
            SPHERE,
            TransverseMercator::new((250_000.0, -1_000_000.0)).with_origin(12.0, 7.0),
        );
        for lon in (-80..=80).step_by(4) {
            for lat in (-80..80).step_by(4) {
                let lon = lon as f64 + 7.0;
                let lat = lat as f64 + 0.5;
                let (x, y) = tm.sphere_forward(lon, lat);
                let (lon2, lat2) = tm.sphere_inverse(x, y);
                assert_relative_eq!(lon2, lon, epsilon = 1e-6);
                assert_relative_eq!(lat2, lat, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_sphere_inverse_wraps_longitude() {
        let tm = TmercSetup::new(SPHERE, TransverseMercator::default().with_origin(0.0, 179.0));
        let (x, y) = tm.sphere_forward(-178.0, 10.0);
        let (lon, lat) = tm.sphere_inverse(x, y);
        assert_relative_eq!(lon, -178.0, epsilon = 1e-9);
        assert_relative_eq!(lat, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wgs84_central_meridian_is_meridian_arc() {
        let (x, y) = wgs84().ellipsoid_forward(0.0, 45.0);
        assert_relative_eq!(x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(y, 4_984_944.378, epsilon = 0.01);
    }

    #[test]
    fn test_wgs84_utm33_known_point() {
        // (15°E, 52°N) on the zone 33 central meridian
        let tm = TmercSetup::new(WGS84, TransverseMercator::utm_zone(33, true));
        let (e, n) = tm.ellipsoid_forward(15.0, 52.0);
        assert_relative_eq!(e, 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(n, 5_761_038.2126, epsilon = 0.001);
    }

    #[test]
    fn test_wgs84_utm33_high_latitude() {
        let tm = TmercSetup::new(WGS84, TransverseMercator::utm_zone(33, true));
        let (e, n) = tm.ellipsoid_forward(15.0, 79.9);
        assert_relative_eq!(e, 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(n, 8_870_424.322, epsilon = 0.01);
    }

    #[test]
    fn test_wgs84_oslo_reference() {
        let tm = TmercSetup::new(WGS84, TransverseMercator::utm_zone(32, true));
        let (e, n) = tm.ellipsoid_forward(10.75, 59.91);
        assert_relative_eq!(e, 597_868.381, epsilon = 0.01);
        assert_relative_eq!(n, 6_642_681.510, epsilon = 0.01);
        let (lon, lat) = tm.ellipsoid_inverse(e, n);
        assert_relative_eq!(lon, 10.75, epsilon = 1e-9);
        assert_relative_eq!(lat, 59.91, epsilon = 1e-9);
    }

    #[test]
    fn test_wgs84_roundtrip() {
        let tm = wgs84();
        for lon in -12..=12 {
            for lat in (-80..=80).step_by(5) {
                let lon = lon as f64 * 0.5;
                let lat = lat as f64;
                let (x, y) = tm.ellipsoid_forward(lon, lat);
                let (lon2, lat2) = tm.ellipsoid_inverse(x, y);
                assert_relative_eq!(lon2, lon, epsilon = 1e-6);
                assert_relative_eq!(lat2, lat, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_wgs84_roundtrip_with_origin_and_offset() {
        let params = TransverseMercator::new((500_000.0, 1_000_000.0))
            .with_origin(10.0, 1.0)
            .with_scale_factor(0.9996);
        let tm = TmercSetup::new(WGS84, params);
        for &(lon, lat) in &[(-2.0, -75.0), (-2.0, 0.3), (0.5, 45.0), (3.0, 0.3), (3.0, -75.0)] {
            let (x, y) = tm.ellipsoid_forward(lon, lat);
            let (lon2, lat2) = tm.ellipsoid_inverse(x, y);
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_wgs84_out_of_domain_is_sentinel() {
        assert_eq!(wgs84().ellipsoid_forward(95.0, 10.0), SENTINEL);
    }

    #[test]
    fn test_wgs84_inverse_beyond_pole_clamps() {
        let (lon, lat) = wgs84().ellipsoid_inverse(0.0, 10_100_000.0);
        assert_relative_eq!(lon, 0.0);
        assert_relative_eq!(lat, 90.0);
        let (_, lat) = wgs84().ellipsoid_inverse(0.0, -10_100_000.0);
        assert_relative_eq!(lat, -90.0);
    }

    #[test]
    fn test_inverse_of_scenario_point() {
        let tm = wgs84();
        let (lon, lat) = tm.ellipsoid_inverse(123_456.123_456, 123_456.123_456);
        assert_relative_eq!(lon, 1.109_164_636_009_238_6, epsilon = 1e-9);
        assert_relative_eq!(lat, 1.116_287_523_138_828_3, epsilon = 1e-9);
        let (x, y) = tm.ellipsoid_forward(lon, lat);
        assert_relative_eq!(x, 123_456.123_456, epsilon = 1e-4);
        assert_relative_eq!(y, 123_456.123_456, epsilon = 1e-4);
    }

    #[test]
    fn test_non_finite_input_is_sentinel() {
        let s = sphere();
        let e = wgs84();
        assert_eq!(s.sphere_forward(f64::NAN, 0.0), SENTINEL);
        assert_eq!(s.sphere_inverse(f64::INFINITY, 0.0), SENTINEL);
        assert_eq!(e.ellipsoid_forward(0.0, f64::NAN), SENTINEL);
        assert_eq!(e.ellipsoid_inverse(SENTINEL.0, SENTINEL.1), SENTINEL);
    }

    #[test]
    fn test_ml0_precomputed_from_origin_latitude() {
        let tm = TmercSetup::new(WGS84, TransverseMercator::default().with_origin(45.0, 0.0));
        assert_relative_eq!(tm.ml0() * WGS84.a, 4_984_944.378, epsilon = 0.01);
        // Origin latitude maps to the false northing
        let (_, y) = tm.ellipsoid_forward(0.0, 45.0);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }
}
