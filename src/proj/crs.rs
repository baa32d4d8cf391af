//! PROJ definition strings for projection operations, and a thin proj4rs
//! wrapper used to produce reference values.

use proj4rs::Proj;

use crate::error::ProjError;
use crate::proj::ellipsoid::{Ellipsoid, EllipsoidModel};
use crate::proj::projection::{LatLong, Projection, ProjectionKind, ProjectionOp};
use crate::proj::transverse_mercator::TransverseMercator;

/// One side of a projection, expressible as a PROJ definition.
pub trait ProjDefinition {
    fn proj_string(&self, ellipsoid: &Ellipsoid) -> String;
}

impl ProjDefinition for LatLong {
    fn proj_string(&self, ellipsoid: &Ellipsoid) -> String {
        format!("+proj=longlat +ellps={}", ellipsoid.name)
    }
}

impl ProjDefinition for TransverseMercator {
    fn proj_string(&self, ellipsoid: &Ellipsoid) -> String {
        // +approx selects the same series expansion used natively
        format!(
            "+proj=tmerc +ellps={} +lat_0={} +lon_0={} +k={} +x_0={} +y_0={} +approx",
            ellipsoid.name, self.lat0, self.lon0, self.k0, self.x0, self.y0
        )
    }
}

impl ProjDefinition for ProjectionKind {
    fn proj_string(&self, ellipsoid: &Ellipsoid) -> String {
        match self {
            Self::LatLong => LatLong.proj_string(ellipsoid),
            Self::TransverseMercator(tm) => tm.proj_string(ellipsoid),
        }
    }
}

/// A projection operation that can be handed to an external PROJ engine.
pub trait ProjPair {
    /// (source, target) PROJ definitions.
    fn proj_strings(&self) -> (String, String);
}

impl<F, T, E> ProjPair for Projection<F, T, E>
where
    F: ProjDefinition,
    T: ProjDefinition,
    E: EllipsoidModel,
{
    fn proj_strings(&self) -> (String, String) {
        let ellipsoid = self.ellipsoid();
        (
            self.from().proj_string(&ellipsoid),
            self.to().proj_string(&ellipsoid),
        )
    }
}

impl ProjPair for ProjectionOp {
    fn proj_strings(&self) -> (String, String) {
        let (from, to, ellipsoid) = self.descriptor();
        (from.proj_string(&ellipsoid), to.proj_string(&ellipsoid))
    }
}

/// Thin wrapper around proj4rs that handles radians/degrees conversion transparently.
///
/// proj4rs uses radians for geographic CRS; this crate uses degrees.
pub struct CrsTransform {
    src: Proj,
    dst: Proj,
    src_is_geo: bool,
    dst_is_geo: bool,
}

impl CrsTransform {
    /// Create a new CRS transform from source and destination CRS strings.
    ///
    /// Accepts PROJ strings ("+proj=tmerc +ellps=WGS84 ...") or EPSG codes.
    pub fn new(src_crs: &str, dst_crs: &str) -> Result<Self, ProjError> {
        let src = Proj::from_user_string(src_crs)
            .map_err(|e| ProjError::UnknownCrs(format!("{src_crs}: {e}")))?;
        let dst = Proj::from_user_string(dst_crs)
            .map_err(|e| ProjError::UnknownCrs(format!("{dst_crs}: {e}")))?;
        let src_is_geo = src.is_latlong();
        let dst_is_geo = dst.is_latlong();
        Ok(Self {
            src,
            dst,
            src_is_geo,
            dst_is_geo,
        })
    }

    /// Build the transform for a projection operation.
    pub fn for_pair<P: ProjPair + ?Sized>(pair: &P) -> Result<Self, ProjError> {
        let (src, dst) = pair.proj_strings();
        Self::new(&src, &dst)
    }

    /// Transform a single point from source CRS to destination CRS.
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let mut point = [(x, y)];
        self.transform_in_place(&mut point)?;
        Ok(point[0])
    }

    /// Transform coordinates from source CRS to destination CRS, overwriting
    /// the buffer. All coordinates use CRS native units (degrees or metres).
    pub fn transform_in_place(&self, coords: &mut [(f64, f64)]) -> Result<(), ProjError> {
        if self.src_is_geo {
            for c in coords.iter_mut() {
                c.0 = c.0.to_radians();
                c.1 = c.1.to_radians();
            }
        }

        proj4rs::transform::transform(&self.src, &self.dst, coords)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;

        if self.dst_is_geo {
            for c in coords.iter_mut() {
                c.0 = c.0.to_degrees();
                c.1 = c.1.to_degrees();
            }
        }
        Ok(())
    }
}
