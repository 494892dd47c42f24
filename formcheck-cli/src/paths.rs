//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "formcheck";
const APPLICATION: &str = "formcheck";

const LOG_FILE_NAME: &str = "formcheck-cli.log";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/formcheck` or `~/.cache/formcheck`
/// - macOS: `~/Library/Caches/dev.formcheck.formcheck`
/// - Windows: `C:\Users\<User>\AppData\Local\formcheck\formcheck\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the log file, falling back to the working directory.
pub fn log_file() -> PathBuf {
    cache_dir()
        .map(|dir| dir.join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}
