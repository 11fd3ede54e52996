use crate::app::models::{FolderSpec, FolderTree, Scalar, SearchTarget};
use std::path::{Path, PathBuf};

/// Resolves the folder configuration into concrete directories to search.
pub struct FolderWalker {
    project_root: PathBuf,
}

impl FolderWalker {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Depth first, in configuration order. Only a missing top-level folder is
    /// reported; anything missing further down is skipped quietly.
    pub fn resolve(&self, folders: &FolderTree) -> Vec<SearchTarget> {
        let mut targets = Vec::new();

        for (folder_name, spec) in folders.entries() {
            let folder_path = self.project_root.join(folder_name);

            if !folder_path.exists() {
                log::warn!("Folder {} does not exist, skipping", folder_path.display());
                continue;
            }

            log::info!("Searching folder: {}", folder_path.display());

            if spec.is_blank() {
                targets.push(SearchTarget {
                    root: folder_path,
                    label: folder_name.clone(),
                    name: folder_name.clone(),
                });
            } else {
                descend(&folder_path, spec, folder_name, &mut targets);
            }
        }

        targets
    }
}

fn push_target(targets: &mut Vec<SearchTarget>, root: PathBuf, label: &str, name: &str) {
    log::info!("  Searching subfolder: {}", root.display());
    targets.push(SearchTarget {
        root,
        label: label.to_string(),
        name: name.to_string(),
    });
}

/// A list item naming a subfolder of `parent`; non-existent ones are dropped.
fn push_named_child(targets: &mut Vec<SearchTarget>, parent: &Path, child: &str, label: &str) {
    let child_path = parent.join(child);
    if child_path.exists() {
        push_target(targets, child_path, label, child);
    }
}

fn descend(path: &Path, spec: &FolderSpec, label: &str, targets: &mut Vec<SearchTarget>) {
    match spec {
        FolderSpec::Map(entries) => {
            for (key, sub_spec) in entries {
                let sub_path = path.join(key);
                let sub_label = if label.is_empty() {
                    key.clone()
                } else {
                    format!("{}/{}", label, key)
                };

                if !sub_path.exists() {
                    continue;
                }

                match sub_spec {
                    FolderSpec::List(items) => {
                        for item in items {
                            match item {
                                FolderSpec::Leaf(Some(Scalar::Name(child))) => {
                                    push_named_child(targets, &sub_path, child, &sub_label)
                                }
                                FolderSpec::Map(_) => {
                                    descend(&sub_path, item, &sub_label, targets)
                                }
                                _ => {}
                            }
                        }
                    }
                    // Anything but a list, nested mappings included, takes the whole subfolder.
                    _ => push_target(targets, sub_path, &sub_label, key),
                }
            }
        }
        FolderSpec::List(items) => {
            for item in items {
                match item {
                    FolderSpec::Leaf(Some(Scalar::Name(child))) => {
                        push_named_child(targets, path, child, label)
                    }
                    FolderSpec::Map(_) => descend(path, item, label, targets),
                    _ => {}
                }
            }
        }
        FolderSpec::Leaf(Some(_)) => {
            if path.exists() {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                push_target(targets, path.to_path_buf(), label, &name);
            }
        }
        FolderSpec::Leaf(None) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(dirs: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for dir in dirs {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        temp
    }

    fn tree(yaml: &str) -> FolderTree {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn summarize(root: &Path, targets: &[SearchTarget]) -> Vec<(String, String, String)> {
        targets
            .iter()
            .map(|t| {
                let rel = t.root.strip_prefix(root).unwrap();
                (
                    rel.to_string_lossy().replace('\\', "/"),
                    t.label.clone(),
                    t.name.clone(),
                )
            })
            .collect()
    }

    fn entry(path: &str, label: &str, name: &str) -> (String, String, String) {
        (path.to_string(), label.to_string(), name.to_string())
    }

    #[test]
    fn null_config_searches_whole_folder() {
        let temp = project(&["Docs/sub"]);
        let targets = FolderWalker::new(temp.path()).resolve(&tree("Docs: ~\n"));

        assert_eq!(
            summarize(temp.path(), &targets),
            vec![entry("Docs", "Docs", "Docs")]
        );
    }

    #[test]
    fn missing_top_level_folder_is_skipped() {
        let temp = project(&["Docs"]);
        let targets = FolderWalker::new(temp.path()).resolve(&tree("Missing: ~\nDocs: ~\n"));

        assert_eq!(
            summarize(temp.path(), &targets),
            vec![entry("Docs", "Docs", "Docs")]
        );
    }

    #[test]
    fn mapping_with_list_searches_named_children() {
        let temp = project(&["Src/Core/Utils", "Src/Core/Net"]);
        let targets = FolderWalker::new(temp.path())
            .resolve(&tree("Src:\n  Core:\n    - Utils\n    - Net\n"));

        assert_eq!(
            summarize(temp.path(), &targets),
            vec![
                entry("Src/Core/Utils", "Src/Core", "Utils"),
                entry("Src/Core/Net", "Src/Core", "Net"),
            ]
        );
    }

    #[test]
    fn list_of_names_keeps_the_folder_label() {
        let temp = project(&["Engine/App", "Engine/Renderer"]);
        let targets =
            FolderWalker::new(temp.path()).resolve(&tree("Engine:\n  - App\n  - Renderer\n"));

        assert_eq!(
            summarize(temp.path(), &targets),
            vec![
                entry("Engine/App", "Engine", "App"),
                entry("Engine/Renderer", "Engine", "Renderer"),
            ]
        );
    }

    #[test]
    fn only_string_items_name_subfolders() {
        let temp = project(&[
            "Logs/2024",
            "Logs/true",
            "Logs/Archive",
            "Src/Logs/2024",
            "Src/Logs/true",
        ]);
        let walker = FolderWalker::new(temp.path());

        assert!(walker.resolve(&tree("Logs:\n  - 2024\n  - true\n")).is_empty());
        assert!(walker
            .resolve(&tree("Src:\n  Logs:\n    - 2024\n    - true\n"))
            .is_empty());
        let quoted = walker.resolve(&tree("Logs:\n  - \"2024\"\n  - Archive\n"));
        assert_eq!(
            summarize(temp.path(), &quoted),
            vec![
                entry("Logs/2024", "Logs", "2024"),
                entry("Logs/Archive", "Logs", "Archive"),
            ]
        );
    }

    #[test]
    fn wrapping_a_mapping_in_a_list_resolves_the_same_roots() {
        let temp = project(&["Src/Core/Utils"]);
        let walker = FolderWalker::new(temp.path());

        let direct = walker.resolve(&tree("Src:\n  Core:\n    - Utils\n"));
        let wrapped = walker.resolve(&tree("Src:\n  - Core:\n      - Utils\n"));

        assert_eq!(direct, wrapped);
        assert_eq!(direct.len(), 1);
    }

    #[test]
    fn mapping_items_inside_lists_extend_the_label() {
        let temp = project(&["Sim/Scene/Graph/Nodes"]);
        let targets = FolderWalker::new(temp.path())
            .resolve(&tree("Sim:\n  Scene:\n    - Graph:\n        - Nodes\n"));

        assert_eq!(
            summarize(temp.path(), &targets),
            vec![entry("Sim/Scene/Graph/Nodes", "Sim/Scene/Graph", "Nodes")]
        );
    }

    #[test]
    fn non_list_mapping_value_takes_whole_subfolder() {
        let temp = project(&["Src/Core/Deep"]);
        let targets = FolderWalker::new(temp.path())
            .resolve(&tree("Src:\n  Core:\n    Deep: ~\n"));

        assert_eq!(
            summarize(temp.path(), &targets),
            vec![entry("Src/Core", "Src/Core", "Core")]
        );
    }

    #[test]
    fn absent_subfolders_are_skipped_silently() {
        let temp = project(&["Src/Core"]);
        let targets = FolderWalker::new(temp.path())
            .resolve(&tree("Src:\n  Gone: ~\n  Core:\n    - Missing\n"));

        assert!(targets.is_empty());
    }

    #[test]
    fn scalar_config_searches_the_folder_itself() {
        let temp = project(&["Tools"]);
        let targets = FolderWalker::new(temp.path()).resolve(&tree("Tools: yes please\n"));

        assert_eq!(
            summarize(temp.path(), &targets),
            vec![entry("Tools", "Tools", "Tools")]
        );
    }

    #[test]
    fn empty_list_counts_as_whole_folder() {
        let temp = project(&["Docs"]);
        let targets = FolderWalker::new(temp.path()).resolve(&tree("Docs: []\n"));

        assert_eq!(
            summarize(temp.path(), &targets),
            vec![entry("Docs", "Docs", "Docs")]
        );
    }
}
