use anyhow::{Context, Result};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const MERGED_FILE_NAME: &str = "Amerge.txt";

/// Concatenates everything in an output directory into `Amerge.txt`.
pub struct Merger;

impl Merger {
    /// Returns how many files were picked up. A failed write is logged, not returned,
    /// so the count is reported either way.
    pub fn merge(output_dir: &Path) -> usize {
        let inputs = Self::collect_inputs(output_dir);
        let merged_path = output_dir.join(MERGED_FILE_NAME);

        match Self::write_merged(&merged_path, &inputs) {
            Ok(()) => log::info!("Wrote merged file: {}", merged_path.display()),
            Err(err) => log::error!("Failed to write merged file: {:#}", err),
        }

        inputs.len()
    }

    /// Every file below `output_dir` except earlier merge results, as
    /// (relative name, full path) sorted by name.
    fn collect_inputs(output_dir: &Path) -> Vec<(String, PathBuf)> {
        let walker = WalkBuilder::new(output_dir)
            .standard_filters(false)
            .build();

        let mut inputs = Vec::new();
        for result in walker {
            match result {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.depth() == 0
                        || path.is_dir()
                        || entry.file_name() == MERGED_FILE_NAME
                    {
                        continue;
                    }
                    if let Some(relative) = diff_paths(path, output_dir) {
                        inputs.push((relative.to_string_lossy().into_owned(), path.to_path_buf()));
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        inputs.sort();
        inputs
    }

    fn write_merged(merged_path: &Path, inputs: &[(String, PathBuf)]) -> Result<()> {
        let file = File::create(merged_path)
            .with_context(|| format!("Failed to create {}", merged_path.display()))?;
        let mut out = BufWriter::new(file);

        for (name, path) in inputs {
            let bytes =
                fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            writeln!(out, "{}:", name)?;
            out.write_all(normalize_newlines(&String::from_utf8_lossy(&bytes)).as_bytes())?;
            writeln!(out)?;
        }

        out.flush()
            .with_context(|| format!("Failed to write {}", merged_path.display()))?;
        Ok(())
    }
}

/// Text-mode reading: `\r\n` and a lone `\r` both become `\n`.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
