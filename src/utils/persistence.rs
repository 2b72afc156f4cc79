use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::StoreError;

const TMP_SUFFIX: &str = "tmp";

pub fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Sibling staging path, e.g. `state.json` -> `state.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to `path` by staging to a temporary file and renaming over the target.
pub fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    {
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads a file, mapping a missing file to `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
