//! Scheme dispatch and multi-pass driver.

use tracing::{debug, info};

use crate::error::{SubdivideError, SubdivideResult};
use crate::normalize::DEFAULT_TOLERANCE;
use crate::params::{SubdivideParams, SubdivisionScheme};
use crate::result::SubdivisionResult;
use crate::scheme::{butterfly, catmull_clark, loop_subdivision, sqrt3};
use crate::Mesh;

/// Run one pass of `scheme` over `mesh`, welding with `tolerance` first.
///
/// # Errors
///
/// Returns an error if the mesh is empty, the tolerance is not positive, or
/// the welded mesh is not a closed two-manifold.
pub fn subdivide_once(
    mesh: &Mesh,
    scheme: SubdivisionScheme,
    tolerance: f64,
) -> SubdivideResult<Mesh> {
    match scheme {
        SubdivisionScheme::CatmullClark => catmull_clark::subdivide(mesh, tolerance),
        SubdivisionScheme::Loop => loop_subdivision::subdivide(mesh, tolerance),
        SubdivisionScheme::Sqrt3 => sqrt3::subdivide(mesh, tolerance),
        SubdivisionScheme::Butterfly => butterfly::subdivide(mesh, tolerance),
    }
}

/// Subdivide a mesh using the specified parameters.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh is empty (no vertices or faces)
/// - The iteration count is 0
/// - The resulting mesh would exceed `max_faces`
/// - Any pass rejects its input (see [`subdivide_once`])
///
/// # Examples
///
/// ```
/// use mesh_subdivide::{subdivide_mesh, Mesh, SubdivideParams};
/// use nalgebra::Point3;
///
/// let mesh = Mesh::from_faces(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.5, 1.0, 0.0),
///         Point3::new(0.5, 0.5, 1.0),
///     ],
///     &[[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
/// );
///
/// let result = subdivide_mesh(&mesh, &SubdivideParams::sqrt3())?;
/// assert_eq!(result.final_faces, 12);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &Mesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    if mesh.vertices.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    if mesh.indices.is_empty() {
        return Err(SubdivideError::NoFaces);
    }
    if params.iterations == 0 {
        return Err(SubdivideError::InvalidIterations(0));
    }

    let original_faces = mesh.face_count();
    let original_vertices = mesh.vertex_count();

    let projected = params.expected_faces(original_faces);
    if projected > params.max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: original_faces,
            projected,
            max: params.max_faces,
        });
    }

    debug!(
        "Subdividing mesh: {} faces, {} vertices, {} iterations using {}",
        original_faces, original_vertices, params.iterations, params.scheme
    );

    let mut current = subdivide_once(mesh, params.scheme, params.tolerance)?;
    debug!(
        "Iteration 1: {} faces, {} vertices",
        current.face_count(),
        current.vertex_count()
    );
    for i in 1..params.iterations {
        current = subdivide_once(&current, params.scheme, params.tolerance)?;
        debug!(
            "Iteration {}: {} faces, {} vertices",
            i + 1,
            current.face_count(),
            current.vertex_count()
        );
    }

    let result = SubdivisionResult {
        original_faces,
        final_faces: current.face_count(),
        original_vertices,
        final_vertices: current.vertex_count(),
        iterations: params.iterations,
        scheme: params.scheme,
        mesh: current,
    };
    info!("{}", result);

    Ok(result)
}

impl Mesh {
    /// One pass of `scheme` with the default weld tolerance.
    pub fn subdivide(&self, scheme: SubdivisionScheme) -> SubdivideResult<Mesh> {
        subdivide_once(self, scheme, DEFAULT_TOLERANCE)
    }
}
