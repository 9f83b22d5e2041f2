//! `subdivide`: load, refine and save a mesh.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mesh_subdivide::{
    subdivide_mesh, Mesh, SubdivideParams, SubdivisionConfig, SubdivisionResult, SubdivisionScheme,
};
use serde::Serialize;
use tracing::debug;

use crate::output;
use crate::OutputFormat;

/// Arguments of the `subdivide` command.
pub struct SubdivideArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub scheme: Option<SubdivisionScheme>,
    pub iterations: Option<u32>,
    pub tolerance: Option<f64>,
    pub max_faces: Option<usize>,
    pub config: Option<PathBuf>,
}

impl SubdivideArgs {
    /// Config file values (or defaults), overridden by explicit options.
    pub fn params(&self) -> Result<SubdivideParams> {
        let mut params = match &self.config {
            Some(path) => SubdivisionConfig::load(path)
                .with_context(|| format!("reading config {}", path.display()))?
                .into_params(),
            None => SubdivideParams::default(),
        };

        if let Some(scheme) = self.scheme {
            params.scheme = scheme;
        }
        if let Some(iterations) = self.iterations {
            params.iterations = iterations;
        }
        if let Some(tolerance) = self.tolerance {
            params.tolerance = tolerance;
        }
        if let Some(max_faces) = self.max_faces {
            params.max_faces = max_faces;
        }
        Ok(params)
    }
}

#[derive(Serialize)]
struct SubdivideOutput {
    input: String,
    output: String,
    scheme: String,
    iterations: u32,
    tolerance: f64,
    original_vertices: usize,
    original_faces: usize,
    final_vertices: usize,
    final_faces: usize,
    face_ratio: f64,
}

impl SubdivideOutput {
    fn new(args: &SubdivideArgs, params: &SubdivideParams, result: &SubdivisionResult) -> Self {
        Self {
            input: args.input.display().to_string(),
            output: args.output.display().to_string(),
            scheme: result.scheme.to_string(),
            iterations: result.iterations,
            tolerance: params.tolerance,
            original_vertices: result.original_vertices,
            original_faces: result.original_faces,
            final_vertices: result.final_vertices,
            final_faces: result.final_faces,
            face_ratio: result.face_ratio(),
        }
    }
}

pub fn run(args: &SubdivideArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let params = args.params()?;
    debug!("Subdivision parameters: {:?}", params);

    let result = subdivide_file(&args.input, &args.output, &params)?;

    let summary = SubdivideOutput::new(args, &params, &result);
    output::print(&summary, format, quiet);
    output::success(
        &format!(
            "{} x{}: {} -> {} faces, {} -> {} vertices",
            summary.scheme,
            summary.iterations,
            summary.original_faces,
            summary.final_faces,
            summary.original_vertices,
            summary.final_vertices
        ),
        format,
        quiet,
    );
    output::info(&format!("Saved to {}", summary.output), format, quiet);

    Ok(())
}

fn subdivide_file(input: &Path, output: &Path, params: &SubdivideParams) -> Result<SubdivisionResult> {
    let mesh = Mesh::load(input).with_context(|| format!("loading {}", input.display()))?;
    let result = subdivide_mesh(&mesh, params)
        .with_context(|| format!("subdividing {} with {}", input.display(), params.scheme))?;
    result
        .mesh
        .save(output)
        .with_context(|| format!("saving {}", output.display()))?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_subdivide::{load_mesh, save_obj};
    use nalgebra::Point3;
    use tempfile::TempDir;

    fn args(dir: &TempDir) -> SubdivideArgs {
        SubdivideArgs {
            input: dir.path().join("in.obj"),
            output: dir.path().join("out.obj"),
            scheme: None,
            iterations: None,
            tolerance: None,
            max_faces: None,
            config: None,
        }
    }

    fn write_tetrahedron(path: &Path) {
        let mesh = Mesh::from_faces(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, 0.0),
                Point3::new(0.5, 0.5, 1.0),
            ],
            &[[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
        );
        save_obj(&mesh, path).unwrap();
    }

    #[test]
    fn test_options_override_config() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("run.toml");
        std::fs::write(
            &config,
            "name = \"t\"\nscheme = \"butterfly\"\niterations = 3\n",
        )
        .unwrap();

        let mut a = args(&dir);
        a.config = Some(config);
        a.iterations = Some(1);

        let params = a.params().unwrap();
        assert_eq!(params.scheme, SubdivisionScheme::Butterfly);
        assert_eq!(params.iterations, 1);
    }

    #[test]
    fn test_subdivides_file() {
        let dir = TempDir::new().unwrap();
        let mut a = args(&dir);
        write_tetrahedron(&a.input);
        a.scheme = Some(SubdivisionScheme::Sqrt3);

        run(&a, OutputFormat::Json, true).unwrap();

        let out = load_mesh(&a.output).unwrap();
        assert_eq!(out.face_count(), 12);
        assert_eq!(out.vertex_count(), 8);
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = TempDir::new().unwrap();
        assert!(run(&args(&dir), OutputFormat::Text, true).is_err());
    }
}
