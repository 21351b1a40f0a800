//! Tracing setup for the game binary.

use std::{fs::File, path::Path, sync::Arc};

use color_eyre::eyre::{eyre, Result, WrapErr as _};
use tracing_subscriber::EnvFilter;

/// Sends tracing output to `path` so it never interferes with the terminal interface.
///
/// The filter is read from `RUST_LOG` and falls back to `info`.
///
/// # Errors
///
/// Returns an error when the log file cannot be created or when a global subscriber is already
/// installed.
pub fn init(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!(err))
        .wrap_err("failed to install the tracing subscriber")
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_init_fails_on_unwritable_path() {
        let path = env::temp_dir()
            .join(format!("spikemaze-missing-{}", process::id()))
            .join("nested")
            .join("spikemaze.log");

        let error = init(&path).expect_err("the parent directory does not exist");

        assert!(error.to_string().contains("failed to create log file"));
    }

    #[test]
    fn test_init_twice_reports_existing_subscriber() {
        let dir = env::temp_dir();
        let first = dir.join(format!("spikemaze-first-{}.log", process::id()));
        let second = dir.join(format!("spikemaze-second-{}.log", process::id()));

        // Only one of the two calls can install the global subscriber, whatever ran before.
        let _first = init(&first);
        let result = init(&second);

        assert!(result.is_err(), "a second global subscriber must be rejected");
        fs::remove_file(first).expect("the first log file was created");
        fs::remove_file(second).expect("the second log file was created");
    }
}
