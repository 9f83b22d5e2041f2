//! Result types for subdivision operations.

use crate::params::SubdivisionScheme;
use crate::Mesh;

/// Result of mesh subdivision.
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The subdivided mesh.
    pub mesh: Mesh,

    /// Number of faces in original mesh.
    pub original_faces: usize,

    /// Number of faces in subdivided mesh.
    pub final_faces: usize,

    /// Number of vertices in original mesh.
    pub original_vertices: usize,

    /// Number of vertices in subdivided mesh.
    pub final_vertices: usize,

    /// Number of passes performed.
    pub iterations: u32,

    /// Subdivision scheme used.
    pub scheme: SubdivisionScheme,
}

impl SubdivisionResult {
    /// Get the face multiplication factor.
    #[must_use]
    pub fn face_ratio(&self) -> f64 {
        if self.original_faces == 0 {
            1.0
        } else {
            self.final_faces as f64 / self.original_faces as f64
        }
    }

    /// Get the vertex multiplication factor.
    #[must_use]
    pub fn vertex_ratio(&self) -> f64 {
        if self.original_vertices == 0 {
            1.0
        } else {
            self.final_vertices as f64 / self.original_vertices as f64
        }
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subdivision ({}): {} → {} faces ({:.1}x), {} → {} vertices, {} iterations",
            self.scheme,
            self.original_faces,
            self.final_faces,
            self.face_ratio(),
            self.original_vertices,
            self.final_vertices,
            self.iterations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SubdivisionResult {
        SubdivisionResult {
            mesh: Mesh::new(),
            original_faces: 100,
            final_faces: 300,
            original_vertices: 50,
            final_vertices: 150,
            iterations: 1,
            scheme: SubdivisionScheme::Sqrt3,
        }
    }

    #[test]
    fn test_ratios() {
        let result = sample();
        assert!((result.face_ratio() - 3.0).abs() < 0.001);
        assert!((result.vertex_ratio() - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_display() {
        let display = format!("{}", sample());
        assert!(display.contains("100"));
        assert!(display.contains("300"));
        assert!(display.contains("3.0x"));
        assert!(display.contains("sqrt3"));
    }
}
