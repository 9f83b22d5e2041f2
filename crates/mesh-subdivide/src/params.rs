//! Subdivision parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::SubdivideError;
use crate::normalize::DEFAULT_TOLERANCE;

/// Subdivision algorithm to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum SubdivisionScheme {
    /// Triangle adaptation of Catmull-Clark: face, edge and vertex points,
    /// six triangles per face.
    #[cfg_attr(feature = "config", serde(alias = "catmull_clark", alias = "cc"))]
    CatmullClark,

    /// Loop subdivision: approximating, four triangles per face.
    #[default]
    Loop,

    /// Kobbelt's sqrt(3) subdivision: centroid insertion plus edge flips,
    /// three triangles per face.
    #[cfg_attr(feature = "config", serde(alias = "kobbelt", alias = "root3"))]
    Sqrt3,

    /// Butterfly subdivision: interpolating 8-point stencil, four triangles
    /// per face.
    Butterfly,
}

impl SubdivisionScheme {
    /// All schemes, in declaration order.
    pub const ALL: [SubdivisionScheme; 4] = [
        Self::CatmullClark,
        Self::Loop,
        Self::Sqrt3,
        Self::Butterfly,
    ];

    /// Number of output faces per input face.
    #[must_use]
    pub const fn face_factor(&self) -> usize {
        match self {
            Self::CatmullClark => 6,
            Self::Loop | Self::Butterfly => 4,
            Self::Sqrt3 => 3,
        }
    }

    /// Check if original vertices keep their positions.
    #[must_use]
    pub const fn is_interpolating(&self) -> bool {
        matches!(self, Self::Butterfly)
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CatmullClark => "catmull-clark",
            Self::Loop => "loop",
            Self::Sqrt3 => "sqrt3",
            Self::Butterfly => "butterfly",
        }
    }
}

impl fmt::Display for SubdivisionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubdivisionScheme {
    type Err = SubdivideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catmull-clark" | "catmull_clark" | "catmullclark" | "cc" => Ok(Self::CatmullClark),
            "loop" => Ok(Self::Loop),
            "sqrt3" | "kobbelt" | "root3" => Ok(Self::Sqrt3),
            "butterfly" => Ok(Self::Butterfly),
            _ => Err(SubdivideError::UnknownScheme(s.to_string())),
        }
    }
}

/// Parameters for mesh subdivision.
#[derive(Debug, Clone, PartialEq)]
pub struct SubdivideParams {
    /// Subdivision scheme to use.
    pub scheme: SubdivisionScheme,

    /// Number of subdivision passes.
    pub iterations: u32,

    /// Weld tolerance applied before every pass (squared distance).
    pub tolerance: f64,

    /// Maximum faces allowed in result (prevents memory issues).
    pub max_faces: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            scheme: SubdivisionScheme::default(),
            iterations: 1,
            tolerance: DEFAULT_TOLERANCE,
            max_faces: 10_000_000, // 10M faces max
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for Catmull-Clark-style subdivision.
    #[must_use]
    pub fn catmull_clark() -> Self {
        Self::default().with_scheme(SubdivisionScheme::CatmullClark)
    }

    /// Create parameters for Loop subdivision.
    #[must_use]
    pub fn loop_subdivision() -> Self {
        Self::default().with_scheme(SubdivisionScheme::Loop)
    }

    /// Create parameters for sqrt(3) subdivision.
    #[must_use]
    pub fn sqrt3() -> Self {
        Self::default().with_scheme(SubdivisionScheme::Sqrt3)
    }

    /// Create parameters for Butterfly subdivision.
    #[must_use]
    pub fn butterfly() -> Self {
        Self::default().with_scheme(SubdivisionScheme::Butterfly)
    }

    /// Set subdivision scheme.
    #[must_use]
    pub const fn with_scheme(mut self, scheme: SubdivisionScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set weld tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set maximum faces allowed.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Calculate expected face count after all iterations.
    ///
    /// Saturates instead of overflowing.
    #[must_use]
    pub const fn expected_faces(&self, current_faces: usize) -> usize {
        let factor = self.scheme.face_factor();
        let mut faces = current_faces;
        let mut i = 0;
        while i < self.iterations {
            faces = faces.saturating_mul(factor);
            i += 1;
        }
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SubdivideParams::default();
        assert_eq!(params.scheme, SubdivisionScheme::Loop);
        assert_eq!(params.iterations, 1);
        assert_eq!(params.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_builder() {
        let params = SubdivideParams::new()
            .with_scheme(SubdivisionScheme::Sqrt3)
            .with_iterations(2)
            .with_tolerance(1e-6)
            .with_max_faces(1_000_000);

        assert_eq!(params.scheme, SubdivisionScheme::Sqrt3);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.tolerance, 1e-6);
        assert_eq!(params.max_faces, 1_000_000);
    }

    #[test]
    fn test_expected_faces() {
        assert_eq!(SubdivideParams::loop_subdivision().expected_faces(100), 400);
        assert_eq!(SubdivideParams::catmull_clark().expected_faces(100), 600);
        assert_eq!(
            SubdivideParams::sqrt3().with_iterations(2).expected_faces(4),
            36
        );
        assert_eq!(
            SubdivideParams::butterfly().with_iterations(3).expected_faces(12),
            768
        );
        assert_eq!(
            SubdivideParams::loop_subdivision()
                .with_iterations(64)
                .expected_faces(usize::MAX / 2),
            usize::MAX
        );
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("loop".parse::<SubdivisionScheme>().ok(), Some(SubdivisionScheme::Loop));
        assert_eq!("Kobbelt".parse::<SubdivisionScheme>().ok(), Some(SubdivisionScheme::Sqrt3));
        assert_eq!("cc".parse::<SubdivisionScheme>().ok(), Some(SubdivisionScheme::CatmullClark));
        assert!(matches!(
            "doo-sabin".parse::<SubdivisionScheme>(),
            Err(SubdivideError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_scheme_display_round_trips() {
        for scheme in SubdivisionScheme::ALL {
            assert_eq!(scheme.to_string().parse::<SubdivisionScheme>().ok(), Some(scheme));
        }
    }

    #[test]
    fn test_is_interpolating() {
        assert!(SubdivisionScheme::Butterfly.is_interpolating());
        assert!(!SubdivisionScheme::Loop.is_interpolating());
    }
}
