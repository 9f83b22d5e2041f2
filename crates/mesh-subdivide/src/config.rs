//! Serializable subdivision configuration.
//!
//! A [`SubdivisionConfig`] describes a subdivision run in TOML or JSON so it
//! can be kept next to the meshes it applies to:
//!
//! ```toml
//! name = "smooth-preview"
//! scheme = "loop"
//! iterations = 2
//! tolerance = 0.0001
//! ```
//!
//! Every field except `name` is optional and falls back to the
//! [`SubdivideParams`] defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SubdivideError, SubdivideResult};
use crate::normalize::DEFAULT_TOLERANCE;
use crate::params::{SubdivideParams, SubdivisionScheme};

/// A named, serializable subdivision run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdivisionConfig {
    /// Name of the configuration.
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub scheme: SubdivisionScheme,

    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Weld tolerance (squared distance).
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default = "default_max_faces")]
    pub max_faces: usize,
}

fn default_iterations() -> u32 {
    SubdivideParams::default().iterations
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_faces() -> usize {
    SubdivideParams::default().max_faces
}

fn parse_err(e: impl std::fmt::Display) -> SubdivideError {
    SubdivideError::ConfigParse {
        details: e.to_string(),
    }
}

impl SubdivisionConfig {
    /// Create a config with default parameters.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::from_params(name, &SubdivideParams::default())
    }

    /// Capture `params` under `name`.
    pub fn from_params(name: impl Into<String>, params: &SubdivideParams) -> Self {
        Self {
            name: name.into(),
            description: None,
            scheme: params.scheme,
            iterations: params.iterations,
            tolerance: params.tolerance,
            max_faces: params.max_faces,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn scheme(mut self, scheme: SubdivisionScheme) -> Self {
        self.scheme = scheme;
        self
    }

    #[must_use]
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Parameters for [`crate::subdivide_mesh`].
    pub fn into_params(self) -> SubdivideParams {
        SubdivideParams {
            scheme: self.scheme,
            iterations: self.iterations,
            tolerance: self.tolerance,
            max_faces: self.max_faces,
        }
    }

    pub fn from_toml(s: &str) -> SubdivideResult<Self> {
        toml::from_str(s).map_err(parse_err)
    }

    pub fn from_json(s: &str) -> SubdivideResult<Self> {
        serde_json::from_str(s).map_err(parse_err)
    }

    pub fn to_toml(&self) -> SubdivideResult<String> {
        toml::to_string_pretty(self).map_err(parse_err)
    }

    pub fn to_json(&self) -> SubdivideResult<String> {
        serde_json::to_string_pretty(self).map_err(parse_err)
    }

    /// Load a config file. `.json` files are read as JSON, anything else as
    /// TOML.
    pub fn load(path: &Path) -> SubdivideResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SubdivideError::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_toml(&text)?
        };
        debug!("Loaded subdivision config '{}' from {:?}", config.name, path);
        Ok(config)
    }

    /// Write the config to `path`, as JSON for `.json` and TOML otherwise.
    pub fn save(&self, path: &Path) -> SubdivideResult<()> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let text = if is_json { self.to_json()? } else { self.to_toml()? };
        std::fs::write(path, text).map_err(|e| SubdivideError::IoWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config = SubdivisionConfig::from_toml(r#"name = "plain""#).expect("valid toml");
        assert_eq!(config.name, "plain");
        assert_eq!(config.into_params(), SubdivideParams::default());
    }

    #[test]
    fn test_full_toml() {
        let config = SubdivisionConfig::from_toml(
            r#"
            name = "preview"
            description = "two sqrt(3) passes"
            scheme = "kobbelt"
            iterations = 2
            tolerance = 1e-6
            max_faces = 5000
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.description.as_deref(), Some("two sqrt(3) passes"));
        let params = config.into_params();
        assert_eq!(params.scheme, SubdivisionScheme::Sqrt3);
        assert_eq!(params.iterations, 2);
        assert_eq!(params.tolerance, 1e-6);
        assert_eq!(params.max_faces, 5000);
    }

    #[test]
    fn test_scheme_names() {
        for (name, scheme) in [
            ("catmull-clark", SubdivisionScheme::CatmullClark),
            ("cc", SubdivisionScheme::CatmullClark),
            ("loop", SubdivisionScheme::Loop),
            ("sqrt3", SubdivisionScheme::Sqrt3),
            ("butterfly", SubdivisionScheme::Butterfly),
        ] {
            let json = format!(r#"{{"name": "n", "scheme": "{}"}}"#, name);
            let config = SubdivisionConfig::from_json(&json).expect("known scheme");
            assert_eq!(config.scheme, scheme);
        }
    }

    #[test]
    fn test_unknown_scheme_is_config_error() {
        let err = SubdivisionConfig::from_toml(
            r#"
            name = "bad"
            scheme = "doo-sabin"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SubdivideError::ConfigParse { .. }));
    }

    #[test]
    fn test_toml_and_json_agree() {
        let config = SubdivisionConfig::with_name("smooth")
            .description("Butterfly, three passes")
            .scheme(SubdivisionScheme::Butterfly)
            .iterations(3);

        let from_toml =
            SubdivisionConfig::from_toml(&config.to_toml().expect("serializes")).expect("parses");
        let from_json =
            SubdivisionConfig::from_json(&config.to_json().expect("serializes")).expect("parses");
        assert_eq!(from_toml, config);
        assert_eq!(from_json, config);
        assert!(config.to_toml().expect("serializes").contains("scheme = \"butterfly\""));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new().unwrap();
        let config = SubdivisionConfig::with_name("disk").scheme(SubdivisionScheme::Loop);

        for file in ["run.toml", "run.json"] {
            let path = dir.path().join(file);
            config.save(&path).expect("writes");
            assert_eq!(SubdivisionConfig::load(&path).expect("reads"), config);
        }
    }

    #[test]
    fn test_missing_file() {
        let err = SubdivisionConfig::load(Path::new("/nonexistent/run.toml")).unwrap_err();
        assert!(matches!(err, SubdivideError::IoRead { .. }));
    }
}
