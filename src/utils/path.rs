//! Output path helpers

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::model::LEGACY_OUTPUT_FILE_NAME;

/// Path utilities for rewrite outputs and deliveries
pub struct PathUtils;

impl PathUtils {
    /// Where the rewrite writes its output: a sibling of the input.
    ///
    /// With `unique` the configured file name gets the invocation id appended
    /// to its stem, so parallel runs in one directory never share a file.
    pub fn rewrite_output_path(input: &Path, file_name: &str, unique: bool, id: Uuid) -> PathBuf {
        let dir = input.parent().unwrap_or_else(|| Path::new(""));
        if !unique {
            return dir.join(file_name);
        }

        let name = Path::new(file_name);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        let unique_name = match name.extension() {
            Some(ext) => format!("{}_{}.{}", stem, id.simple(), ext.to_string_lossy()),
            None => format!("{}_{}", stem, id.simple()),
        };
        dir.join(unique_name)
    }

    /// Final location of a delivered file; directories receive the fixed
    /// delivery file name
    ///
    /// A destination that does not exist yet names a directory when it ends
    /// with a separator or has no extension.
    pub fn delivery_target(destination: &Path, destination_is_dir: bool) -> PathBuf {
        if destination_is_dir || Self::names_directory(destination) {
            destination.join(LEGACY_OUTPUT_FILE_NAME)
        } else {
            destination.to_path_buf()
        }
    }

    fn names_directory(destination: &Path) -> bool {
        let text = destination.as_os_str().to_string_lossy();
        text.ends_with('/') || text.ends_with(std::path::MAIN_SEPARATOR) || destination.extension().is_none()
    }
}
