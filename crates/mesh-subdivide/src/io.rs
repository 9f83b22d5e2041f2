//! Mesh file I/O for STL and OBJ formats.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;
use tracing::{debug, info, warn};

use crate::error::{SubdivideError, SubdivideResult};
use crate::Mesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "stl" => Some(MeshFormat::Stl),
                "obj" => Some(MeshFormat::Obj),
                _ => None,
            })
    }
}

fn format_of(path: &Path) -> SubdivideResult<MeshFormat> {
    MeshFormat::from_path(path).ok_or_else(|| SubdivideError::UnsupportedFormat {
        extension: path.extension().and_then(|e| e.to_str()).map(String::from),
    })
}

fn write_err(path: &Path) -> impl Fn(std::io::Error) -> SubdivideError + '_ {
    move |source| SubdivideError::IoWrite {
        path: path.to_path_buf(),
        source,
    }
}

/// Load a mesh from file, auto-detecting format from extension.
///
/// The vertex buffer is returned as stored; coincident vertices are welded
/// later by the subdivision schemes, not here.
pub fn load_mesh(path: &Path) -> SubdivideResult<Mesh> {
    let format = format_of(path)?;

    info!("Loading mesh from {:?} (format: {:?})", path, format);

    let mesh = match format {
        MeshFormat::Stl => load_stl(path)?,
        MeshFormat::Obj => load_obj(path)?,
    };

    if mesh.vertices.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    if mesh.indices.is_empty() {
        return Err(SubdivideError::NoFaces);
    }

    info!(
        "Loaded mesh: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );
    if let Some((min, max)) = mesh.bounds() {
        let dims = max - min;
        debug!(
            "Bounding box: [{:.3}, {:.3}, {:.3}] to [{:.3}, {:.3}, {:.3}]",
            min.x, min.y, min.z, max.x, max.y, max.z
        );

        // The default weld tolerance is absolute.
        let max_dim = dims.x.max(dims.y).max(dims.z);
        if max_dim < 0.1 {
            warn!(
                "Mesh largest dimension is {:.6}; the weld tolerance may merge distinct vertices",
                max_dim
            );
        }
    }

    Ok(mesh)
}

/// Load mesh from STL file (binary or ASCII).
fn load_stl(path: &Path) -> SubdivideResult<Mesh> {
    let file = File::open(path).map_err(|e| SubdivideError::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);

    let stl = stl_io::read_stl(&mut reader).map_err(|e| SubdivideError::ParseError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    debug!(
        "STL contains {} vertices, {} triangles",
        stl.vertices.len(),
        stl.faces.len()
    );

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());
    for v in &stl.vertices {
        mesh.push_vertex(Point3::new(v.0[0] as f64, v.0[1] as f64, v.0[2] as f64));
    }
    for face in &stl.faces {
        let [a, b, c] = face.vertices;
        mesh.push_face(a as u32, b as u32, c as u32);
    }

    Ok(mesh)
}

/// Load mesh from OBJ file. All models are merged into one mesh.
fn load_obj(path: &Path) -> SubdivideResult<Mesh> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|e| SubdivideError::ParseError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if models.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }

    let mut mesh = Mesh::new();

    for model in &models {
        let offset = mesh.vertices.len() as u32;
        let obj_mesh = &model.mesh;

        for chunk in obj_mesh.positions.chunks_exact(3) {
            mesh.push_vertex(Point3::new(
                chunk[0] as f64,
                chunk[1] as f64,
                chunk[2] as f64,
            ));
        }
        mesh.indices
            .extend(obj_mesh.indices.iter().map(|&i| i + offset));

        debug!(
            "OBJ model '{}': {} vertices, {} faces",
            model.name,
            obj_mesh.positions.len() / 3,
            obj_mesh.indices.len() / 3
        );
    }

    Ok(mesh)
}

/// Save a mesh to file, auto-detecting format from extension.
pub fn save_mesh(mesh: &Mesh, path: &Path) -> SubdivideResult<()> {
    match format_of(path)? {
        MeshFormat::Stl => save_stl(mesh, path),
        MeshFormat::Obj => save_obj(mesh, path),
    }
}

/// Save mesh as binary STL.
pub fn save_stl(mesh: &Mesh, path: &Path) -> SubdivideResult<()> {
    info!("Saving mesh to {:?}", path);

    let file = File::create(path).map_err(write_err(path))?;
    let mut writer = BufWriter::new(file);

    let vertex = |i: u32| {
        let p = &mesh.vertices[i as usize];
        stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32])
    };

    let triangles: Vec<stl_io::Triangle> = mesh
        .faces()
        .map(|[a, b, c]| stl_io::Triangle {
            // Readers recompute normals.
            normal: stl_io::Normal::new([0.0, 0.0, 0.0]),
            vertices: [vertex(a), vertex(b), vertex(c)],
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(write_err(path))?;
    writer.flush().map_err(write_err(path))?;

    info!("Saved {} triangles to {:?}", mesh.face_count(), path);

    Ok(())
}

/// Save mesh as ASCII OBJ. Vertex order and face indices are kept as is.
pub fn save_obj(mesh: &Mesh, path: &Path) -> SubdivideResult<()> {
    info!("Saving mesh to {:?} (OBJ format)", path);

    let file = File::create(path).map_err(write_err(path))?;
    let mut writer = BufWriter::new(file);

    write_obj(mesh, &mut writer).map_err(write_err(path))?;
    writer.flush().map_err(write_err(path))?;

    info!(
        "Saved {} vertices and {} faces to {:?}",
        mesh.vertex_count(),
        mesh.face_count(),
        path
    );

    Ok(())
}

fn write_obj(mesh: &Mesh, w: &mut impl Write) -> std::io::Result<()> {
    writeln!(w, "# OBJ file exported by mesh-subdivide")?;
    writeln!(w, "# Vertices: {}", mesh.vertex_count())?;
    writeln!(w, "# Faces: {}", mesh.face_count())?;
    writeln!(w)?;

    for p in &mesh.vertices {
        writeln!(w, "v {:.9} {:.9} {:.9}", p.x, p.y, p.z)?;
    }

    writeln!(w)?;
    for [a, b, c] in mesh.faces() {
        // OBJ uses 1-based indexing
        writeln!(w, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }

    Ok(())
}
