use std::{fs, path::Path, sync::Mutex};

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::error::{MindPaceError, Result};

/// Routes tracing output to `path`; the terminal belongs to the UI.
pub fn init_tracing(level: Option<&str>, path: &Path) -> Result<()> {
    let default_level = level.unwrap_or("info");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| MindPaceError::Logging(format!("{}: {err}", path.display())))?;

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| MindPaceError::Logging(err.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_log_path_is_logging_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file.
        let err = init_tracing(None, dir.path()).unwrap_err();
        assert!(matches!(err, MindPaceError::Logging(_)));
    }
}
