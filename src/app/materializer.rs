use crate::app::models::{CopyReport, FoundFile};
use anyhow::{Context, Result};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Characters that would reintroduce directory structure into a flat name.
pub const SEPARATOR_CHARS: &[char] = &['/', '\\', MAIN_SEPARATOR];
/// Characters that are not allowed in file names on common filesystems.
pub const RESERVED_CHARS: &[char] = &[':', '*', '?', '"', '<', '>', '|'];

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| {
            if SEPARATOR_CHARS.contains(&c) {
                '.'
            } else if RESERVED_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Encodes where a file came from into a single file name:
/// `<label>[.<name>].<relative path>`, the name only when it adds something.
pub fn flattened_name(file: &FoundFile) -> String {
    let label = sanitize(&file.label);
    let name = sanitize(&file.name);
    let relative = sanitize(&file.relative.to_string_lossy());

    let mut parts = vec![label];
    if !name.is_empty() && name != parts[0] {
        parts.push(name);
    }
    parts.push(relative);
    parts.join(".")
}

/// Copies contents and permissions, then carries the timestamps over.
fn copy_with_metadata(source: &Path, target: &Path) -> io::Result<()> {
    fs::copy(source, target)?;

    // The copy itself succeeded; timestamps are best effort.
    if let Err(err) = copy_times(source, target) {
        log::debug!("Could not preserve times on {}: {}", target.display(), err);
    }
    Ok(())
}

fn copy_times(source: &Path, target: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    File::open(target)?.set_times(times)
}

/// The timestamped directory a single run copies into.
pub struct Materializer {
    dir: PathBuf,
}

impl Materializer {
    pub fn create(output_base: &Path) -> Result<Self> {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::in_dir(output_base.join(timestamp))
    }

    fn in_dir(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        log::info!("Created output directory: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copies every file in order. Failures are logged and counted, never fatal.
    /// Targets that already exist are overwritten.
    pub fn copy_all(&self, files: &[FoundFile]) -> CopyReport {
        let mut report = CopyReport::default();

        for file in files {
            let new_name = flattened_name(file);
            let target = self.dir.join(&new_name);

            match copy_with_metadata(&file.source, &target) {
                Ok(()) => {
                    log::info!("Copied: {} -> {}", file.source.display(), target.display());
                    report.copied += 1;
                }
                Err(err) => {
                    log::error!("Failed to copy {}: {}", file.source.display(), err);
                    log::error!("  target file name: {}", new_name);
                    log::error!("  target path: {}", target.display());
                    report.failed += 1;
                }
            }
        }

        report
    }
}
