//! Common helpers for projection math (meridian arc, longitude reduction).

use std::f64::consts::{PI, TAU};

use super::ellipsoid::Ellipsoid;

/// Maximum Newton steps taken by [`inv_mlfn`].
pub const INV_MLFN_MAX_ITER: usize = 20;
/// Convergence threshold on the Newton update, radians.
pub const INV_MLFN_TOLERANCE: f64 = 1e-12;

/// Meridian arc length from the equator to latitude `phi`, in units of the
/// semi-major axis. `sin_phi` and `cos_phi` are passed in because callers
/// already have them.
pub fn mlfn(ellipsoid: &Ellipsoid, phi: f64, sin_phi: f64, cos_phi: f64) -> f64 {
    let en = &ellipsoid.en;
    let cs = cos_phi * sin_phi;
    let s2 = sin_phi * sin_phi;
    en[0] * phi - cs * (en[1] + s2 * (en[2] + s2 * (en[3] + s2 * en[4])))
}

/// Latitude whose meridian arc length is `arc` (semi-major axis units).
///
/// Newton iteration on [`mlfn`]; returns `None` if the update step has not
/// dropped below [`INV_MLFN_TOLERANCE`] after [`INV_MLFN_MAX_ITER`] steps.
pub fn inv_mlfn(ellipsoid: &Ellipsoid, arc: f64) -> Option<f64> {
    let es = ellipsoid.es;
    let k = 1.0 / (1.0 - es);
    let mut phi = arc;

    for _ in 0..INV_MLFN_MAX_ITER {
        let (s, c) = phi.sin_cos();
        let t = 1.0 - es * s * s;
        // d(mlfn)/dφ = (1 - e²) / (1 - e² sin²φ)^(3/2)
        let step = (mlfn(ellipsoid, phi, s, c) - arc) * (t * t.sqrt()) * k;
        phi -= step;
        if step.abs() < INV_MLFN_TOLERANCE {
            return Some(phi);
        }
    }
    None
}

/// Reduce a longitude in radians to (-π, π].
pub fn mod_pi(lon: f64) -> f64 {
    if lon > -PI && lon <= PI {
        return lon;
    }
    let reduced = (lon + PI).rem_euclid(TAU) - PI;
    if reduced <= -PI {
        reduced + TAU
    } else {
        reduced
    }
}
