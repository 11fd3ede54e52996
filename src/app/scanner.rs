use crate::app::models::{FoundFile, SearchTarget};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::path::Path;

pub struct Scanner<'a> {
    extensions: &'a [String],
}

impl<'a> Scanner<'a> {
    pub fn new(extensions: &'a [String]) -> Self {
        Self { extensions }
    }

    /// Literal, case-sensitive suffix match against the configured extensions.
    pub fn matches(&self, file_name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }

    pub fn collect_all(&self, targets: &[SearchTarget]) -> Vec<FoundFile> {
        let mut found = Vec::new();
        for target in targets {
            self.collect(target, &mut found);
        }
        found
    }

    /// Walks one search root in filesystem order, appending every match.
    pub fn collect(&self, target: &SearchTarget, found: &mut Vec<FoundFile>) {
        if !target.root.is_dir() {
            return;
        }

        // Every file counts here: no gitignore, no hidden-file filtering.
        let walker = WalkBuilder::new(&target.root)
            .standard_filters(false)
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if entry.depth() == 0 || entry.path().is_dir() {
                        continue;
                    }
                    let file_name = entry.file_name().to_string_lossy();
                    if !self.matches(&file_name) {
                        continue;
                    }
                    if let Some(file) = self.record(entry.path(), target) {
                        found.push(file);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }
    }

    fn record(&self, path: &Path, target: &SearchTarget) -> Option<FoundFile> {
        let relative = diff_paths(path, &target.root)?;
        Some(FoundFile {
            source: path.to_path_buf(),
            label: target.label.clone(),
            name: target.name.clone(),
            relative,
        })
    }
}
