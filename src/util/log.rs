use std::path::PathBuf;

use color_eyre::eyre::{Result, eyre};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref DATA_FOLDER: Option<PathBuf> = std::env::var(format!("{}_DATA", *PROJECT_NAME))
        .ok()
        .map(PathBuf::from);
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", *PROJECT_NAME);
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = DATA_FOLDER.clone() {
        dir
    } else if let Some(dirs) = project_directory() {
        dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV.as_str())
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("{}=info", env!("CARGO_CRATE_NAME"))))
}

/// Logs go to a file; stdout belongs to the terminal UI.
pub fn initialize_logging() -> Result<()> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(LOG_FILE.as_str());
    let log_file = std::fs::File::create(&log_path)?;

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;

    tracing::info!(path = %log_path.display(), "logging_initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn data_dir_is_named_after_the_package() {
        if let Some(dirs) = project_directory() {
            assert_eq!(dirs.project_path(), Path::new("audiobook"));
        }
    }
}
