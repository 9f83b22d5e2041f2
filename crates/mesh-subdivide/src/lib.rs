//! Subdivision of closed triangle meshes.
//!
//! This crate refines indexed triangle meshes with one of four schemes:
//!
//! - **Catmull-Clark** (triangle adaptation): face, edge and vertex points,
//!   each face becomes six triangles
//! - **Loop**: approximating, each face becomes four triangles
//! - **sqrt(3)** (Kobbelt): centroid insertion and edge flips, each face
//!   becomes three triangles
//! - **Butterfly**: interpolating 8-point stencil, each face becomes four
//!
//! Every pass first welds vertices closer than a tolerance, then checks that
//! the result is a closed two-manifold. Open or non-manifold meshes are
//! rejected with [`SubdivideError::InvalidTopology`].
//!
//! # Example
//!
//! ```no_run
//! use mesh_subdivide::{subdivide_mesh, Mesh, SubdivideParams};
//!
//! let mesh = Mesh::load("model.stl")?;
//! println!("{}", mesh.validate());
//!
//! let result = subdivide_mesh(&mesh, &SubdivideParams::loop_subdivision().with_iterations(2))?;
//! println!("{}", result);
//!
//! result.mesh.save("smooth.obj")?;
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

mod error;
mod types;

pub mod adjacency;
#[cfg(feature = "config")]
pub mod config;
pub mod io;
pub mod normalize;
pub mod params;
pub mod result;
pub mod scheme;
pub mod subdivide;
pub mod topology;
pub mod validate;

#[cfg(test)]
mod fixtures;

// Re-export core types at crate root
pub use error::{SubdivideError, SubdivideResult};
pub use types::Mesh;

pub use adjacency::MeshAdjacency;
#[cfg(feature = "config")]
pub use config::SubdivisionConfig;
pub use io::{load_mesh, save_mesh, save_obj, save_stl, MeshFormat};
pub use normalize::{normalize, DEFAULT_TOLERANCE};
pub use params::{SubdivideParams, SubdivisionScheme};
pub use result::SubdivisionResult;
pub use subdivide::{subdivide_mesh, subdivide_once};
pub use topology::{Edge, Triangle};
pub use validate::{validate_mesh, MeshReport};

// Convenience methods on Mesh
impl Mesh {
    /// Load a mesh from a file, auto-detecting format from extension.
    pub fn load(path: impl AsRef<std::path::Path>) -> SubdivideResult<Self> {
        io::load_mesh(path.as_ref())
    }

    /// Save the mesh to a file, auto-detecting format from extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> SubdivideResult<()> {
        io::save_mesh(self, path.as_ref())
    }

    /// Validate the mesh and return a report of any issues.
    pub fn validate(&self) -> MeshReport {
        validate::validate_mesh(self)
    }
}
