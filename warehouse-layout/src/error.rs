use std::path::PathBuf;

/// Errors raised while configuring, generating or exporting a warehouse layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error(
        "warehouse dimensions must all be at least 1 (got {racks} racks, {columns} columns, {layers} layers, {bins} bins)"
    )]
    InvalidDimensions {
        racks: usize,
        columns: usize,
        layers: usize,
        bins: usize,
    },
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
