use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::pip::FieldSources;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the KML documents
    pub dir: PathBuf,
    pub fields_file: String,
    pub centroids_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("wwwroot/coord"),
            fields_file: "fields.kml".to_string(),
            centroids_file: "centroids.kml".to_string(),
        }
    }
}

impl DataConfig {
    pub fn fields_path(&self) -> PathBuf {
        self.dir.join(&self.fields_file)
    }

    pub fn centroids_path(&self) -> PathBuf {
        self.dir.join(&self.centroids_file)
    }

    pub fn sources(&self) -> FieldSources {
        FieldSources {
            fields: self.fields_path(),
            centroids: self.centroids_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    /// Directory served as static files; unset disables static serving
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
            static_dir: Some(PathBuf::from("wwwroot")),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(
            config.data.fields_path(),
            PathBuf::from("wwwroot/coord/fields.kml")
        );
        assert_eq!(
            config.data.centroids_path(),
            PathBuf::from("wwwroot/coord/centroids.kml")
        );
        assert_eq!(config.server.listen, "0.0.0.0:3000");
        assert_eq!(config.server.static_dir, Some(PathBuf::from("wwwroot")));
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
            [data]
            dir = "/srv/agro"
            centroids_file = "centers.kml"

            [server]
            listen = "127.0.0.1:8080"
            "#,
        )
        .unwrap();

        let sources = config.data.sources();
        assert_eq!(sources.fields, PathBuf::from("/srv/agro/fields.kml"));
        assert_eq!(sources.centroids, PathBuf::from("/srv/agro/centers.kml"));
        assert_eq!(config.server.listen, "127.0.0.1:8080");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agrospace.toml");
        fs::write(&path, "[data]\ndir = \"coord\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.data.dir, PathBuf::from("coord"));
        assert!(Config::load_from_file(dir.path().join("missing.toml")).is_err());
    }
}
