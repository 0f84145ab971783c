use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the station table.
const STATIONS_FILENAME: &str = "stations.csv";

/// Environment variable that overrides the station table location.
pub const STATIONS_ENV: &str = "TRANSITPATH_STATIONS";

/// Resolve the default station table location using platform-specific project directories.
pub fn default_station_table_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "transitpath", "transitpath")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(STATIONS_FILENAME))
}

/// Locate the station table.
///
/// Resolution order:
/// 1. Explicit `target` path (a file, or a directory holding `stations.csv`).
/// 2. `TRANSITPATH_STATIONS` environment variable.
/// 3. The platform data directory.
///
/// Fails with [`Error::DatasetNotFound`] if the resolved file does not exist.
pub fn resolve_station_table(target: Option<&Path>) -> Result<PathBuf> {
    let path = if let Some(path) = target {
        canonical_table_path(path)
    } else if let Some(env_path) = env::var_os(STATIONS_ENV) {
        canonical_table_path(Path::new(&env_path))
    } else {
        default_station_table_path()?
    };

    debug!("resolved station table to {}", path.display());
    if !path.is_file() {
        return Err(Error::DatasetNotFound { path });
    }
    Ok(path)
}

fn canonical_table_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.join(STATIONS_FILENAME);
    }
    path.to_path_buf()
}
