use std::path::PathBuf;

/// Failure translating one leaf; recovered by retrying and then by keeping the source text
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Request(String),
    #[error("translation API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
}

/// Failure that aborts the whole translation run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("cannot read source locale file {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("source locale file {path} is not valid JSON: {source}")]
    ParseSource {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write locale file {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read override file {path}: {source}")]
    ReadOverride {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid override file {path}: {message}")]
    ParseOverride { path: PathBuf, message: String },
}
