//! Output artifact lifecycle
//!
//! Charts are written under an output directory with uuid-based names so
//! concurrent requests never overwrite each other. A sweep before each
//! request removes artifacts older than the retention window.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{info, warn};
use uuid::Uuid;

/// Create the output directory if it does not exist yet
pub fn ensure_output_dir(dir: &Path) -> Result<(), std::io::Error> {
    fs::create_dir_all(dir)
}

/// Collision-resistant chart filename
pub fn unique_chart_filename() -> String {
    format!("natal_chart_{}.png", Uuid::new_v4().simple())
}

/// Delete artifacts older than `max_age`
///
/// Best-effort: a file vanishing mid-sweep (another request's sweep, or a
/// direct deletion) is not an error, and an unreadable directory just
/// skips the sweep.
pub fn clean_output_folder(dir: &Path, max_age: Duration) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    let now = SystemTime::now();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => continue,
        };
        let expired = now
            .duration_since(modified)
            .map(|age| age > max_age)
            .unwrap_or(false);
        if !expired {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => info!("Removed stale chart: {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}
