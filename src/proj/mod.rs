pub mod common;
pub mod crs;
pub mod ellipsoid;
pub mod projection;
pub mod transverse_mercator;

pub use ellipsoid::{Ellipsoid, EllipsoidKind, EllipsoidModel, Sphere, Wgs84, SPHERE, WGS84};
pub use projection::{
    LatLong, Projection, ProjectionKind, ProjectionOp, SphereTmercForward, SphereTmercInverse,
    Wgs84TmercForward, Wgs84TmercInverse,
};
pub use transverse_mercator::{TransverseMercator, SENTINEL};
