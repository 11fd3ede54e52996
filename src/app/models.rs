use serde::Deserialize;
use serde_yaml::Value;
use std::path::PathBuf;

/// Represents the final configuration after merging CLI overrides and the YAML files.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub config_dir: PathBuf,
    pub project_root: PathBuf,
    pub output_base: PathBuf,
    pub extensions: Vec<String>,
    pub folders: FolderTree,
}

/// A non-empty scalar in `Folders.yaml`. Only YAML strings name subfolders.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Name(String),
    /// Numbers and `true`, kept as text.
    Other(String),
}

/// One node of `Folders.yaml`.
///
/// The file mixes plain names, lists and nested mappings freely, so every
/// value is folded into one of three shapes before the walker sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum FolderSpec {
    /// A scalar. `None` for `null` and the falsy scalars `false` and `0`.
    Leaf(Option<Scalar>),
    List(Vec<FolderSpec>),
    /// Entries keep their document order.
    Map(Vec<(String, FolderSpec)>),
}

impl FolderSpec {
    /// True when the entry asks for the whole folder rather than selected subfolders.
    pub fn is_blank(&self) -> bool {
        match self {
            FolderSpec::Leaf(None) => true,
            FolderSpec::Leaf(Some(Scalar::Name(text))) => text.is_empty(),
            FolderSpec::Leaf(Some(Scalar::Other(_))) => false,
            FolderSpec::List(items) => items.is_empty(),
            FolderSpec::Map(entries) => entries.is_empty(),
        }
    }
}

impl TryFrom<Value> for FolderSpec {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(FolderSpec::Leaf(None)),
            Value::Bool(false) => Ok(FolderSpec::Leaf(None)),
            Value::Number(n) if n.as_f64() == Some(0.0) => Ok(FolderSpec::Leaf(None)),
            Value::Bool(true) => Ok(FolderSpec::Leaf(Some(Scalar::Other("true".to_string())))),
            Value::Number(n) => Ok(FolderSpec::Leaf(Some(Scalar::Other(n.to_string())))),
            Value::String(s) => Ok(FolderSpec::Leaf(Some(Scalar::Name(s)))),
            Value::Sequence(items) => items
                .into_iter()
                .map(FolderSpec::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(FolderSpec::List),
            Value::Mapping(mapping) => mapping_entries(mapping).map(FolderSpec::Map),
            Value::Tagged(tagged) => FolderSpec::try_from(tagged.value),
        }
    }
}

fn mapping_entries(mapping: serde_yaml::Mapping) -> Result<Vec<(String, FolderSpec)>, String> {
    mapping
        .into_iter()
        .map(|(key, value)| Ok((key_text(&key)?, FolderSpec::try_from(value)?)))
        .collect()
}

fn key_text(key: &Value) -> Result<String, String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Tagged(tagged) => key_text(&tagged.value),
        other => Err(format!("folder names must be scalars, found {:?}", other)),
    }
}

/// The top level of `Folders.yaml`: project folder name -> what to scan in it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct FolderTree {
    entries: Vec<(String, FolderSpec)>,
}

impl FolderTree {
    pub fn new(entries: Vec<(String, FolderSpec)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, FolderSpec)] {
        &self.entries
    }
}

impl TryFrom<Value> for FolderTree {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(mapping) => mapping_entries(mapping).map(FolderTree::new),
            Value::Tagged(tagged) => FolderTree::try_from(tagged.value),
            other => Err(format!(
                "expected a mapping of folder names, found {:?}",
                other
            )),
        }
    }
}

/// A directory the collector walks, plus the names used to label what it finds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    pub root: PathBuf,
    /// Accumulated configuration path, e.g. `Src/Core`.
    pub label: String,
    /// Name of the folder actually searched.
    pub name: String,
}

/// Represents a single matching file discovered during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundFile {
    pub source: PathBuf,
    pub label: String,
    pub name: String,
    /// Path relative to the search root it was found under.
    pub relative: PathBuf,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub failed: usize,
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub found: usize,
    pub copies: CopyReport,
    /// `None` when nothing matched and the merge step never ran.
    pub merged: Option<usize>,
}
