//! Reference ellipsoids with their meridian-arc series coefficients.

// Coefficients of the meridian distance expansion in powers of e².
const C00: f64 = 1.0;
const C02: f64 = 0.25;
const C04: f64 = 0.046875;
const C06: f64 = 0.01953125;
const C08: f64 = 0.01068115234375;
const C22: f64 = 0.75;
const C44: f64 = 0.46875;
const C46: f64 = 0.013_020_833_333_333_333;
const C48: f64 = 0.007_120_768_229_166_667;
const C66: f64 = 0.364_583_333_333_333_3;
const C68: f64 = 0.005_696_614_583_333_333;
const C88: f64 = 0.3076171875;

/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Name as used by `+ellps=` in PROJ definitions
    pub name: &'static str,
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// First eccentricity squared
    pub es: f64,
    /// Second eccentricity squared: es / (1 - es)
    pub esp: f64,
    /// Meridian-arc series coefficients en₀..en₄
    pub en: [f64; 5],
}

impl Ellipsoid {
    /// Ellipsoid from its semi-major axis and inverse flattening.
    pub const fn new(name: &'static str, a: f64, rf: f64) -> Self {
        let f = 1.0 / rf;
        let b = a * (1.0 - f);
        let es = 2.0 * f - f * f;
        Self::from_parts(name, a, b, es)
    }

    /// Sphere of radius `r`.
    pub const fn sphere(name: &'static str, r: f64) -> Self {
        Self::from_parts(name, r, r, 0.0)
    }

    const fn from_parts(name: &'static str, a: f64, b: f64, es: f64) -> Self {
        Self {
            name,
            a,
            b,
            es,
            esp: es / (1.0 - es),
            en: meridian_coefficients(es),
        }
    }

    pub fn is_sphere(&self) -> bool {
        self.es == 0.0
    }
}

/// Series coefficients for the meridian arc, derived from e².
const fn meridian_coefficients(es: f64) -> [f64; 5] {
    let en0 = C00 - es * (C02 + es * (C04 + es * (C06 + es * C08)));
    let en1 = es * (C22 - es * (C04 + es * (C06 + es * C08)));
    let t = es * es;
    let en2 = t * (C44 - es * (C46 + es * C48));
    let t = t * es;
    let en3 = t * (C66 - es * C68);
    let en4 = t * es * C88;
    [en0, en1, en2, en3, en4]
}

pub const SPHERE: Ellipsoid = Ellipsoid::sphere("sphere", 6_370_997.0);
pub const WGS84: Ellipsoid = Ellipsoid::new("WGS84", 6_378_137.0, 298.257_223_563);

/// Compile-time choice of ellipsoid for projection dispatch.
pub trait EllipsoidModel: Send + Sync + 'static {
    const ELLIPSOID: Ellipsoid;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sphere;

impl EllipsoidModel for Sphere {
    const ELLIPSOID: Ellipsoid = SPHERE;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wgs84;

impl EllipsoidModel for Wgs84 {
    const ELLIPSOID: Ellipsoid = WGS84;
}

/// Run-time tag for the supported ellipsoids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EllipsoidKind {
    Sphere,
    Wgs84,
}

impl EllipsoidKind {
    /// Parse from a name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sphere" => Some(Self::Sphere),
            "wgs84" => Some(Self::Wgs84),
            _ => None,
        }
    }

    pub fn ellipsoid(&self) -> Ellipsoid {
        match self {
            Self::Sphere => SPHERE,
            Self::Wgs84 => WGS84,
        }
    }

    pub fn name(&self) -> &'static str {
        self.ellipsoid().name
    }
}
