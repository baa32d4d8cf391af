//! Pointwise transform operations.

use crate::error::TransformError;
use crate::proj::ellipsoid::EllipsoidKind;
use crate::proj::projection::{ProjectionKind, ProjectionOp};

/// A pure mapping `(x, y) -> (x', y')`.
///
/// Implementations hold only immutable parameters, so a single instance is
/// shared by every worker without locking.
pub trait Transform: Send + Sync {
    fn op(&self, x: f64, y: f64) -> (f64, f64);

    /// Short label used in logs.
    fn name(&self) -> &'static str;
}

/// Uniform scale of both coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub factor: f64,
}

impl Scale {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl Transform for Scale {
    fn op(&self, x: f64, y: f64) -> (f64, f64) {
        (self.factor * x, self.factor * y)
    }

    fn name(&self) -> &'static str {
        "scale"
    }
}

/// Synthetic trigonometric load, useful for exercising the scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SineCosine;

impl Transform for SineCosine {
    fn op(&self, x: f64, y: f64) -> (f64, f64) {
        let log_term = (x * y * 0.001).ln();
        (
            x.sin() * (1.0 + y.cos() * log_term),
            y.sin() * (1.0 + x.cos() * log_term),
        )
    }

    fn name(&self) -> &'static str {
        "sine_cosine"
    }
}

/// Any supported operation, selected at run time.
#[derive(Clone, Copy, Debug)]
pub enum Operation {
    Scale(Scale),
    SineCosine(SineCosine),
    Projection(ProjectionOp),
}

impl Operation {
    pub fn scale(factor: f64) -> Self {
        Self::Scale(Scale::new(factor))
    }

    pub fn projection(
        from: ProjectionKind,
        to: ProjectionKind,
        ellipsoid: EllipsoidKind,
    ) -> Result<Self, TransformError> {
        ProjectionOp::new(from, to, ellipsoid).map(Self::Projection)
    }
}

impl Transform for Operation {
    fn op(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Self::Scale(s) => s.op(x, y),
            Self::SineCosine(s) => s.op(x, y),
            Self::Projection(p) => p.op(x, y),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Scale(s) => s.name(),
            Self::SineCosine(s) => s.name(),
            Self::Projection(p) => p.name(),
        }
    }
}
