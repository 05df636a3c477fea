use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::provenance::{self, Payload};

/// Pretty-print `value` to `path` and drop a provenance sidecar next to it.
/// The sidecar's callsite is the caller of this function.
#[track_caller]
pub fn write_artifact<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    payload: Payload,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    let sidecar = provenance::write_sidecar(path, payload)?;
    tracing::info!(artifact = %path.display(), "artifact written");
    Ok(sidecar)
}
