use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocStampError {
    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("File index error: {0}")]
    Index(String),

    #[error("Conversion failed for {path}: {source}")]
    Convert {
        path: PathBuf,
        #[source]
        source: ConvertError,
    },

    #[error("Stamping failed for {path}: {source}")]
    Stamp {
        path: PathBuf,
        #[source]
        source: StampError,
    },

    #[error("Sidecar index error for {path}: {detail}")]
    Sidecar { path: PathBuf, detail: String },

    #[error("Report error: {0}")]
    Report(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Collaborator failure at the conversion boundary. `UnknownFormat` and
/// `PasswordLocked` are routed to their own report buckets; everything else
/// fails the unit and is collected by the dispatcher.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("unreadable source: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("malformed {claimed} content: {detail}")]
    Malformed { claimed: String, detail: String },

    #[error("unrecognized format (extension: {extension})")]
    UnknownFormat { extension: String },

    #[error("document is password protected")]
    PasswordLocked,

    #[error("render tool failed: {0}")]
    Renderer(String),
}

#[derive(Error, Debug)]
pub enum StampError {
    #[error("unreadable source: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("stamp tool failed: {0}")]
    Tool(String),
}

pub type Result<T> = std::result::Result<T, DocStampError>;
