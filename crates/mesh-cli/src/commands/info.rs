//! `info`: print a validation report for a mesh file.

use std::path::Path;

use anyhow::{Context, Result};
use mesh_subdivide::{Mesh, MeshReport};
use serde::Serialize;

use crate::output;
use crate::OutputFormat;

#[derive(Serialize)]
struct InfoOutput {
    input: String,
    vertices: usize,
    referenced_vertices: usize,
    faces: usize,
    edges: usize,
    euler_characteristic: i64,
    watertight: bool,
    manifold: bool,
    boundary_edges: usize,
    non_manifold_edges: usize,
    non_manifold_vertices: usize,
    degenerate_faces: usize,
    dimensions: Option<[f64; 3]>,
    /// Weld tolerance the verdict below was computed with.
    tolerance: f64,
    /// Verdict after welding, as every scheme does before a pass.
    subdividable: bool,
    welded_vertices: usize,
}

impl InfoOutput {
    fn new(input: &Path, tolerance: f64, raw: &MeshReport, welded: &MeshReport) -> Self {
        Self {
            input: input.display().to_string(),
            vertices: raw.vertex_count,
            referenced_vertices: raw.referenced_vertex_count,
            faces: raw.face_count,
            edges: raw.edge_count,
            euler_characteristic: raw.euler_characteristic,
            watertight: raw.is_watertight,
            manifold: raw.is_manifold,
            boundary_edges: raw.boundary_edge_count,
            non_manifold_edges: raw.non_manifold_edge_count,
            non_manifold_vertices: raw.non_manifold_vertex_count,
            degenerate_faces: raw.degenerate_face_count,
            dimensions: raw.dimensions.map(|(x, y, z)| [x, y, z]),
            tolerance,
            subdividable: welded.is_subdividable(),
            welded_vertices: welded.referenced_vertex_count,
        }
    }
}

fn summarize(input: &Path, tolerance: f64) -> Result<InfoOutput> {
    let mesh = Mesh::load(input).with_context(|| format!("loading {}", input.display()))?;
    let raw = mesh.validate();
    let welded = mesh
        .normalized(tolerance)
        .with_context(|| format!("welding {}", input.display()))?
        .validate();

    Ok(InfoOutput::new(input, tolerance, &raw, &welded))
}

pub fn run(input: &Path, tolerance: f64, format: OutputFormat, quiet: bool) -> Result<()> {
    let summary = summarize(input, tolerance)?;
    output::print(&summary, format, quiet);

    output::info(&format!("Mesh: {}", summary.input), format, quiet);
    output::field("Vertices", summary.vertices, format, quiet);
    output::field("Referenced vertices", summary.referenced_vertices, format, quiet);
    output::field("Faces", summary.faces, format, quiet);
    output::field("Edges", summary.edges, format, quiet);
    output::field("Euler characteristic", summary.euler_characteristic, format, quiet);
    if let Some([x, y, z]) = summary.dimensions {
        output::field(
            "Dimensions",
            format!("{:.3} x {:.3} x {:.3}", x, y, z),
            format,
            quiet,
        );
    }
    output::field("Watertight", output::yes_no(summary.watertight), format, quiet);
    output::field("Manifold", output::yes_no(summary.manifold), format, quiet);
    if summary.boundary_edges > 0 {
        output::field("Boundary edges", summary.boundary_edges, format, quiet);
    }
    if summary.non_manifold_edges > 0 {
        output::field("Non-manifold edges", summary.non_manifold_edges, format, quiet);
    }
    if summary.non_manifold_vertices > 0 {
        output::field("Non-manifold vertices", summary.non_manifold_vertices, format, quiet);
    }
    if summary.degenerate_faces > 0 {
        output::field("Degenerate faces", summary.degenerate_faces, format, quiet);
    }
    if summary.welded_vertices != summary.referenced_vertices {
        output::field(
            "Vertices after weld",
            format!("{} (tolerance {})", summary.welded_vertices, summary.tolerance),
            format,
            quiet,
        );
    }

    if summary.subdividable {
        output::success("Closed two-manifold: ready to subdivide", format, quiet);
    } else {
        output::warning(
            "Not a closed two-manifold after welding: every scheme will reject it",
            format,
            quiet,
        );
    }

    Ok(())
}
