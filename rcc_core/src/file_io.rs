//! # File I/O Module
//!
//! Reads and writes dataset and settings files:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//! - **Row validation**: Loaded datasets go through [`Dataset::new`]
//!
//! ## File Format
//!
//! Both file kinds are JSON. Dataset files carry a `meta` block (see
//! [`DatasetFile`]); settings files are a bare [`DesignSettings`] object.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rcc_core::dataset::Dataset;
//! use rcc_core::file_io::{load_dataset, save_dataset};
//! use std::path::Path;
//!
//! let path = Path::new("beams.json");
//! save_dataset(Dataset::builtin(), "Starter table", path)?;
//!
//! let dataset = load_dataset(path)?;
//! assert_eq!(dataset.len(), 6);
//! # Ok::<(), rcc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::dataset::{Dataset, DatasetFile, SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;

/// Save a dataset to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize rows and fresh metadata to JSON
/// 2. Write to a temporary sibling file (`<name>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target
pub fn save_dataset(dataset: &Dataset, description: &str, path: &Path) -> CalcResult<()> {
    let file = DatasetFile::new(dataset, description);
    let json = serde_json::to_string_pretty(&file).map_err(|e| CalcError::serialization(e.to_string()))?;

    write_atomic(path, json.as_bytes())?;
    info!(path = %path.display(), rows = dataset.len(), "saved dataset");
    Ok(())
}

/// Load and validate a dataset file.
///
/// # Returns
///
/// * `Ok(Dataset)` - Rows loaded and validated
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON or unknown beam code
/// * `Err(CalcError::EmptyDataset)` - File has no rows
/// * `Err(CalcError::InvalidInput)` - A row has invalid values
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_dataset(path: &Path) -> CalcResult<Dataset> {
    let contents = read_to_string(path)?;

    let file: DatasetFile = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid dataset JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&file.meta.version)?;

    let dataset = file.into_dataset()?;
    info!(path = %path.display(), rows = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Load design settings from a JSON file. Missing keys take their defaults.
pub fn load_settings(path: &Path) -> CalcResult<DesignSettings> {
    let contents = read_to_string(path)?;

    let settings: DesignSettings = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid settings JSON in {}: {}", path.display(), e))
    })?;

    settings.validate()?;
    info!(path = %path.display(), policy = %settings.pct_area_policy, "loaded settings");
    Ok(settings)
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;
    Ok(contents)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = write_and_sync(&mut tmp_file, &tmp_path, bytes).and_then(|()| {
        drop(tmp_file);
        fs::rename(&tmp_path, path).map_err(|e| {
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    });

    // The temp file must not outlive a failed save
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

fn write_and_sync(file: &mut File, tmp_path: &Path, bytes: &[u8]) -> CalcResult<()> {
    file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })
}

/// `beams.json` -> `beams.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    tmp.into()
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .map(|p| p.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| mismatch())?;
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor is a breaking change
    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
