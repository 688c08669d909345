use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ChartError>;

/// Write a document into `dir`, replacing any previous file of that name
pub fn write_document(dir: &Path, file_name: &str, html: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);

    std::fs::create_dir_all(dir).map_err(|source| ChartError::Write {
        path: path.clone(),
        source,
    })?;
    std::fs::write(&path, html).map_err(|source| ChartError::Write {
        path: path.clone(),
        source,
    })?;

    debug!("Wrote {}", path.display());
    Ok(path)
}

/// Hand a file path or URL to the platform's default viewer
pub fn open_in_viewer(target: &str) -> Result<()> {
    info!("Opening {}", target);
    open::that(target).map_err(|source| ChartError::Open {
        target: target.to_string(),
        source,
    })
}
