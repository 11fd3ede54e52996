use crate::app::cli::Cli;
use crate::app::models::{FolderTree, RuntimeConfig};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const EXTENSIONS_FILE: &str = "Extensions.yaml";
pub const FOLDERS_FILE: &str = "Folders.yaml";
pub const OUTPUT_DIR_NAME: &str = "Out";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config {}: {source}", .path.display())]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseYaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the extension list and folder tree from `config_dir`.
pub fn load_configs(config_dir: &Path) -> Result<(Vec<String>, FolderTree), ConfigError> {
    let extensions: Vec<String> = load_yaml(&config_dir.join(EXTENSIONS_FILE))?;
    let folders: FolderTree = load_yaml(&config_dir.join(FOLDERS_FILE))?;
    Ok((extensions, folders))
}

/// Folds `.` and `..` away lexically; symlinks are not resolved.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn absolutize(path: PathBuf, current_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(&path)
    } else {
        normalize(&current_dir.join(path))
    }
}

/// Two levels above the config directory, or as high as the path goes.
fn default_project_root(config_dir: &Path) -> PathBuf {
    config_dir
        .ancestors()
        .take(3)
        .last()
        .unwrap_or(config_dir)
        .to_path_buf()
}

pub fn resolve_config(cli: Cli, current_dir: &Path) -> Result<RuntimeConfig, ConfigError> {
    let config_dir = absolutize(
        cli.config_dir.unwrap_or_else(|| current_dir.to_path_buf()),
        current_dir,
    );

    let project_root = match cli.project_root {
        Some(root) => absolutize(root, current_dir),
        None => default_project_root(&config_dir),
    };

    let output_base = match cli.out_dir {
        Some(out) => absolutize(out, current_dir),
        None => config_dir.join(OUTPUT_DIR_NAME),
    };

    let (extensions, folders) = load_configs(&config_dir)?;

    Ok(RuntimeConfig {
        config_dir,
        project_root,
        output_base,
        extensions,
        folders,
    })
}
