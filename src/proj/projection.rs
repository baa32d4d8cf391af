//! Projection operations: a (from, to, ellipsoid) triple bound to its formulas.
//!
//! [`Projection`] selects the formula at compile time. Only the four supported
//! triples have a constructor and a [`Transform`] impl, so something like
//! `Projection<LatLong, LatLong, Sphere>` cannot be built or run.
//! [`ProjectionOp`] is the run-time equivalent for callers that pick the
//! projection from names.

use std::marker::PhantomData;

use crate::error::TransformError;
use crate::proj::ellipsoid::{Ellipsoid, EllipsoidKind, EllipsoidModel, Sphere, Wgs84};
use crate::proj::transverse_mercator::{TmercSetup, TransverseMercator};
use crate::transform::Transform;

/// Geographic coordinates: x is longitude, y is latitude, both in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatLong;

/// Pointwise projection from `F` to `T` on ellipsoid `E`.
#[derive(Clone, Copy, Debug)]
pub struct Projection<F, T, E> {
    from: F,
    to: T,
    setup: TmercSetup,
    _ellipsoid: PhantomData<E>,
}

pub type SphereTmercForward = Projection<LatLong, TransverseMercator, Sphere>;
pub type Wgs84TmercForward = Projection<LatLong, TransverseMercator, Wgs84>;
pub type SphereTmercInverse = Projection<TransverseMercator, LatLong, Sphere>;
pub type Wgs84TmercInverse = Projection<TransverseMercator, LatLong, Wgs84>;

impl<E: EllipsoidModel> Projection<LatLong, TransverseMercator, E> {
    pub fn new(from: LatLong, to: TransverseMercator) -> Self {
        Self {
            from,
            to,
            setup: TmercSetup::new(E::ELLIPSOID, to),
            _ellipsoid: PhantomData,
        }
    }
}

impl<E: EllipsoidModel> Projection<TransverseMercator, LatLong, E> {
    pub fn new(from: TransverseMercator, to: LatLong) -> Self {
        Self {
            from,
            to,
            setup: TmercSetup::new(E::ELLIPSOID, from),
            _ellipsoid: PhantomData,
        }
    }
}

impl<F, T, E: EllipsoidModel> Projection<F, T, E> {
    pub fn from(&self) -> &F {
        &self.from
    }

    pub fn to(&self) -> &T {
        &self.to
    }

    pub fn ellipsoid(&self) -> Ellipsoid {
        E::ELLIPSOID
    }

    /// Meridian arc at the projection's origin latitude.
    pub fn ml0(&self) -> f64 {
        self.setup.ml0()
    }
}

impl Transform for SphereTmercForward {
    fn op(&self, x: f64, y: f64) -> (f64, f64) {
        self.setup.sphere_forward(x, y)
    }

    fn name(&self) -> &'static str {
        "sphere tmerc forward"
    }
}

impl Transform for Wgs84TmercForward {
    fn op(&self, x: f64, y: f64) -> (f64, f64) {
        self.setup.ellipsoid_forward(x, y)
    }

    fn name(&self) -> &'static str {
        "wgs84 tmerc forward"
    }
}

impl Transform for SphereTmercInverse {
    fn op(&self, x: f64, y: f64) -> (f64, f64) {
        self.setup.sphere_inverse(x, y)
    }

    fn name(&self) -> &'static str {
        "sphere tmerc inverse"
    }
}

impl Transform for Wgs84TmercInverse {
    fn op(&self, x: f64, y: f64) -> (f64, f64) {
        self.setup.ellipsoid_inverse(x, y)
    }

    fn name(&self) -> &'static str {
        "wgs84 tmerc inverse"
    }
}

/// Run-time tag for one side of a projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectionKind {
    LatLong,
    TransverseMercator(TransverseMercator),
}

impl ProjectionKind {
    /// Parse a projection name; a transverse Mercator takes `params`.
    pub fn from_name(s: &str, params: TransverseMercator) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "latlong" | "longlat" => Some(Self::LatLong),
            "tmerc" => Some(Self::TransverseMercator(params)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LatLong => "latlong",
            Self::TransverseMercator(_) => "tmerc",
        }
    }
}

/// A supported projection triple chosen at run time.
#[derive(Clone, Copy, Debug)]
pub enum ProjectionOp {
    SphereForward(SphereTmercForward),
    Wgs84Forward(Wgs84TmercForward),
    SphereInverse(SphereTmercInverse),
    Wgs84Inverse(Wgs84TmercInverse),
}

impl ProjectionOp {
    /// Bind a (from, to, ellipsoid) triple; anything but geographic ⇄ transverse
    /// Mercator is rejected.
    pub fn new(
        from: ProjectionKind,
        to: ProjectionKind,
        ellipsoid: EllipsoidKind,
    ) -> Result<Self, TransformError> {
        use ProjectionKind::{LatLong as Geo, TransverseMercator as Tm};

        match (from, to, ellipsoid) {
            (Geo, Tm(tm), EllipsoidKind::Sphere) => {
                Ok(Self::SphereForward(SphereTmercForward::new(LatLong, tm)))
            }
            (Geo, Tm(tm), EllipsoidKind::Wgs84) => {
                Ok(Self::Wgs84Forward(Wgs84TmercForward::new(LatLong, tm)))
            }
            (Tm(tm), Geo, EllipsoidKind::Sphere) => {
                Ok(Self::SphereInverse(SphereTmercInverse::new(tm, LatLong)))
            }
            (Tm(tm), Geo, EllipsoidKind::Wgs84) => {
                Ok(Self::Wgs84Inverse(Wgs84TmercInverse::new(tm, LatLong)))
            }
            (from, to, ellipsoid) => Err(TransformError::UnsupportedOperation(format!(
                "{} -> {} on {}",
                from.name(),
                to.name(),
                ellipsoid.name()
            ))),
        }
    }

    /// The (from, to) kinds and the ellipsoid this operation was built from.
    pub fn descriptor(&self) -> (ProjectionKind, ProjectionKind, Ellipsoid) {
        match self {
            Self::SphereForward(p) => (
                ProjectionKind::LatLong,
                ProjectionKind::TransverseMercator(*p.to()),
                p.ellipsoid(),
            ),
            Self::Wgs84Forward(p) => (
                ProjectionKind::LatLong,
                ProjectionKind::TransverseMercator(*p.to()),
                p.ellipsoid(),
            ),
            Self::SphereInverse(p) => (
                ProjectionKind::TransverseMercator(*p.from()),
                ProjectionKind::LatLong,
                p.ellipsoid(),
            ),
            Self::Wgs84Inverse(p) => (
                ProjectionKind::TransverseMercator(*p.from()),
                ProjectionKind::LatLong,
                p.ellipsoid(),
            ),
        }
    }
}

impl Transform for ProjectionOp {
    fn op(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::SphereForward(p) => p.op(x, y),
            Self::Wgs84Forward(p) => p.op(x, y),
            Self::SphereInverse(p) => p.op(x, y),
            Self::Wgs84Inverse(p) => p.op(x, y),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::SphereForward(p) => p.name(),
            Self::Wgs84Forward(p) => p.name(),
            Self::SphereInverse(p) => p.name(),
            Self::Wgs84Inverse(p) => p.name(),
        }
    }
}
