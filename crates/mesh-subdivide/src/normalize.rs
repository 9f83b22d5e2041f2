//! Vertex welding ahead of adjacency construction.
//!
//! Index buffers coming from importers often duplicate a vertex once per
//! face. Adjacency is purely index-based, so those duplicates have to be
//! folded into a single index before shared edges can be found.

use hashbrown::HashMap;
use nalgebra::Point3;
use tracing::debug;

use crate::error::{SubdivideError, SubdivideResult};
use crate::Mesh;

/// Default weld tolerance, compared against squared distance.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Weld near-coincident vertices and rewrite the index buffer.
///
/// Indices are scanned in order. The first time an index is encountered its
/// position is compared with every vertex already accepted; if the squared
/// distance to one of them is below `tolerance`, the index is rewritten to the
/// earliest such vertex. Otherwise the index is accepted as-is.
///
/// The returned vertex buffer is truncated to `max(index) + 1` but not
/// compacted: slots that no index refers to keep their old positions.
///
/// Applying this twice with the same tolerance gives the same result as
/// applying it once.
///
/// # Errors
///
/// - [`SubdivideError::InvalidTolerance`] if `tolerance` is not finite and positive
/// - [`SubdivideError::InvalidTopology`] if the index buffer is not a whole
///   number of triangles or refers past the end of `vertices`
pub fn normalize(
    vertices: &[Point3<f64>],
    indices: &[u32],
    tolerance: f64,
) -> SubdivideResult<Mesh> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(SubdivideError::InvalidTolerance(tolerance));
    }
    if indices.len() % 3 != 0 {
        return Err(SubdivideError::topology(format!(
            "index buffer length {} is not a multiple of 3",
            indices.len()
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
        return Err(SubdivideError::topology(format!(
            "index {} out of range for {} vertices",
            bad,
            vertices.len()
        )));
    }

    // Any two points closer than sqrt(tolerance) land in the same or an
    // adjacent cell.
    let cell_size = tolerance.sqrt();
    let mut known: HashMap<(i64, i64, i64), Vec<(usize, u32)>> = HashMap::new();
    let mut known_count = 0usize;
    let mut remap: HashMap<u32, u32> = HashMap::new();
    let mut merged = 0usize;

    let mut out_indices = Vec::with_capacity(indices.len());
    for &index in indices {
        if let Some(&target) = remap.get(&index) {
            out_indices.push(target);
            continue;
        }

        let position = &vertices[index as usize];
        let cell = pos_to_cell(position, cell_size);

        // Earliest accepted vertex within tolerance, across the 3x3x3 block.
        let mut best: Option<(usize, u32)> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    // Far-out cells saturate at the i64 range; the distance
                    // test below still decides the merge.
                    let neighbor_cell = (
                        cell.0.saturating_add(dx),
                        cell.1.saturating_add(dy),
                        cell.2.saturating_add(dz),
                    );
                    let Some(candidates) = known.get(&neighbor_cell) else {
                        continue;
                    };
                    let hit = candidates.iter().find(|(_, k)| {
                        (position - vertices[*k as usize]).norm_squared() < tolerance
                    });
                    if let Some(&(rank, k)) = hit {
                        if best.map_or(true, |(r, _)| rank < r) {
                            best = Some((rank, k));
                        }
                    }
                }
            }
        }

        let target = match best {
            Some((_, k)) => {
                merged += 1;
                k
            }
            None => {
                known.entry(cell).or_default().push((known_count, index));
                known_count += 1;
                index
            }
        };
        remap.insert(index, target);
        out_indices.push(target);
    }

    let len = out_indices.iter().max().map_or(0, |&m| m as usize + 1);
    let out_vertices = vertices[..len].to_vec();

    debug!(
        "Normalized mesh: {} distinct vertices, {} merged, buffer {} -> {}",
        known_count,
        merged,
        vertices.len(),
        out_vertices.len()
    );

    Ok(Mesh::from_buffers(out_vertices, out_indices))
}

impl Mesh {
    /// Weld near-coincident vertices. See [`normalize`].
    pub fn normalized(&self, tolerance: f64) -> SubdivideResult<Mesh> {
        normalize(&self.vertices, &self.indices, tolerance)
    }
}

/// Convert position to spatial hash cell.
fn pos_to_cell(pos: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (pos.x / cell_size).floor() as i64,
        (pos.y / cell_size).floor() as i64,
        (pos.z / cell_size).floor() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    /// Two triangles sharing an edge, imported with one vertex per corner.
    fn split_quad() -> (Vec<Point3<f64>>, Vec<u32>) {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        (vertices, vec![0, 1, 2, 3, 4, 5])
    }

    #[test]
    fn test_merges_duplicate_corners() {
        let (vertices, indices) = split_quad();
        let mesh = normalize(&vertices, &indices, DEFAULT_TOLERANCE).expect("valid input");

        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 4, 2]);
        // Truncated to max index + 1, slot 3 kept but unreferenced.
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.vertices[3], vertices[3]);
    }

    #[test]
    fn test_merges_within_tolerance_only() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.01, 0.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
        ];
        // 0.01^2 = 1e-4 < 1e-3, 0.5^2 = 0.25 > 1e-3.
        let mesh = normalize(&vertices, &[0, 1, 2], DEFAULT_TOLERANCE).expect("valid input");
        assert_eq!(mesh.indices, vec![0, 0, 2]);
    }

    #[test]
    fn test_prefers_earliest_known_vertex() {
        // Vertex 2 is within tolerance of both 0 and 1, which are themselves
        // too far apart to merge; it collapses onto 1, the first one seen.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.04, 0.0, 0.0),
            Point3::new(0.02, 0.0, 0.0),
        ];
        let mesh = normalize(&vertices, &[1, 0, 2], DEFAULT_TOLERANCE).expect("valid input");
        assert_eq!(mesh.indices, vec![1, 0, 1]);
    }

    #[test]
    fn test_truncates_trailing_unused() {
        let mut vertices = fixtures::tetrahedron().vertices;
        vertices.push(Point3::new(9.0, 9.0, 9.0));
        let mesh = normalize(&vertices, &fixtures::tetrahedron().indices, DEFAULT_TOLERANCE)
            .expect("valid input");
        assert_eq!(mesh.vertices.len(), 4);
    }

    #[test]
    fn test_idempotent() {
        let (vertices, indices) = split_quad();
        let once = normalize(&vertices, &indices, DEFAULT_TOLERANCE).expect("valid input");
        let twice = once.normalized(DEFAULT_TOLERANCE).expect("valid input");
        assert_eq!(once, twice);

        let ico = fixtures::icosahedron();
        let once = ico.normalized(DEFAULT_TOLERANCE).expect("valid input");
        assert_eq!(once, once.normalized(DEFAULT_TOLERANCE).expect("valid input"));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let (vertices, _) = split_quad();
        let err = normalize(&vertices, &[0, 1, 6], DEFAULT_TOLERANCE).unwrap_err();
        assert!(matches!(err, SubdivideError::InvalidTopology { .. }));
    }

    #[test]
    fn test_rejects_partial_triangle() {
        let (vertices, _) = split_quad();
        let err = normalize(&vertices, &[0, 1], DEFAULT_TOLERANCE).unwrap_err();
        assert!(matches!(err, SubdivideError::InvalidTopology { .. }));
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        let (vertices, indices) = split_quad();
        for tol in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = normalize(&vertices, &indices, tol).unwrap_err();
            assert!(matches!(err, SubdivideError::InvalidTolerance(_)));
        }
    }

    #[test]
    fn test_huge_coordinates() {
        let vertices = vec![
            Point3::new(1e19, 0.0, 0.0),
            Point3::new(0.0, 1e19, 0.0),
            Point3::new(0.0, 0.0, 1e19),
            Point3::new(1e19, 0.0, 0.0),
        ];
        let mesh = normalize(&vertices, &[0, 1, 2, 3, 2, 1], DEFAULT_TOLERANCE)
            .expect("large finite coordinates are valid");
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 1]);
    }

    #[test]
    fn test_tiny_tolerance() {
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let mesh = normalize(&vertices, &[0, 1, 2], 1e-40).expect("positive tolerance");
        assert_eq!(mesh.indices, vec![0, 1, 2]);

        let tetra = fixtures::tetrahedron();
        assert_eq!(tetra.normalized(1e-40).expect("positive tolerance"), tetra);
    }

    #[test]
    fn test_empty_indices() {
        let (vertices, _) = split_quad();
        let mesh = normalize(&vertices, &[], DEFAULT_TOLERANCE).expect("valid input");
        assert!(mesh.vertices.is_empty());
        assert!(mesh.indices.is_empty());
    }
}
