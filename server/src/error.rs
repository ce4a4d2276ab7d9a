use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure while scanning the source directory at startup.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
  #[error("failed to read source directory {path}: {source}")]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to stat {path}: {source}")]
  Entry {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

#[derive(Debug, thiserror::Error)]
#[error("failed to load template {path}: {source}")]
pub struct TemplateError {
  pub path: PathBuf,
  #[source]
  pub source: std::io::Error,
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
  #[error(transparent)]
  Index(#[from] IndexError),
  #[error(transparent)]
  Template(#[from] TemplateError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("invalid listen address {0}")]
  ListenAddr(String),
}

/// Per-request failure. The client only ever sees the status code.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
  #[error("bad number of path segments in {0}")]
  BadPath(String),
  #[error("bad filename {0}")]
  BadFilename(String),
  #[error("cannot open {path}: {source}")]
  NotFound {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("cannot decode {path}: {source}")]
  Decode {
    path: PathBuf,
    #[source]
    source: image::ImageError,
  },
  #[error("{0}")]
  Internal(String),
}

impl RequestError {
  pub fn status(&self) -> StatusCode {
    match self {
      RequestError::BadPath(_) | RequestError::BadFilename(_) | RequestError::NotFound { .. } => {
        StatusCode::NOT_FOUND
      }
      RequestError::Decode { .. } | RequestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for RequestError {
  fn into_response(self) -> Response {
    self.status().into_response()
  }
}
