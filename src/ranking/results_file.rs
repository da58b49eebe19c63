//! Writes shortlisted repository names to a results file.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::github::error::MiningError;

/// Writes one `owner/name` per line to `path`, replacing previous content.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns [`MiningError::Io`] when the directory or file cannot be created
/// or written.
pub fn write_results<S: AsRef<str>>(path: &Utf8Path, names: &[S]) -> Result<Utf8PathBuf, MiningError> {
    let mut file = create_file_with_parents(path)?;
    for name in names {
        writeln!(file, "{}", name.as_ref()).map_err(|error| MiningError::Io {
            message: format!("failed to write results file '{path}': {error}"),
        })?;
    }
    file.flush().map_err(|error| MiningError::Io {
        message: format!("failed to flush results file '{path}': {error}"),
    })?;
    Ok(path.to_path_buf())
}

fn open_ambient(root: &str) -> Result<Dir, MiningError> {
    Dir::open_ambient_dir(root, ambient_authority()).map_err(|error| MiningError::Io {
        message: format!("failed to open directory '{root}' for results: {error}"),
    })
}

fn create_file_with_parents(path: &Utf8Path) -> Result<cap_std::fs_utf8::File, MiningError> {
    let file_name = path.file_name().ok_or_else(|| MiningError::Io {
        message: format!("invalid results path '{path}': no file name"),
    })?;
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new(""));

    let (base, relative) = if parent.is_absolute() {
        let relative = parent.strip_prefix("/").map_err(|_| MiningError::Io {
            message: format!("failed to normalise results directory '{parent}'"),
        })?;
        (open_ambient("/")?, relative)
    } else {
        (open_ambient(".")?, parent)
    };

    let target = if relative.as_str().is_empty() || relative == Utf8Path::new(".") {
        base
    } else {
        base.create_dir_all(relative).map_err(|error| MiningError::Io {
            message: format!("failed to create results directory '{parent}': {error}"),
        })?;
        base.open_dir(relative).map_err(|error| MiningError::Io {
            message: format!("failed to open results directory '{parent}': {error}"),
        })?
    };

    target.create(file_name).map_err(|error| MiningError::Io {
        message: format!("failed to create results file '{path}': {error}"),
    })
}
