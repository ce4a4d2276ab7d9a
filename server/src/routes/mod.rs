use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;

use axum::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{header, StatusCode};
use axum::http::request::Parts;
use axum::routing::get;
use axum::Router;
use once_cell::sync::Lazy;
use regex::Regex;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::error::RequestError;
use crate::state::SharedState;

pub mod files;
pub mod search;
pub mod thumbs;

/// One week.
pub const CACHE_CONTROL: &str = "public, max-age=604800";

static FILENAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\-_]+\.gif$").expect("valid filename pattern"));

pub fn app(state: SharedState) -> Router {
  Router::new()
    .route("/search", get(search::search).head(method_not_allowed))
    .route("/files/*path", get(files::serve_file).head(method_not_allowed))
    .route("/thumbs/*path", get(thumbs::serve_thumb).head(method_not_allowed))
    .layer(CompressionLayer::new())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// axum would otherwise answer HEAD with the GET handler.
async fn method_not_allowed() -> StatusCode {
  StatusCode::METHOD_NOT_ALLOWED
}

/// Extracts the GIF name from `/<prefix>/<name>`.
///
/// Anything but exactly three segments, or a name outside
/// `[a-zA-Z0-9_-]+.gif`, is rejected. This is what keeps requests inside the
/// source directory.
pub fn filename_from_path(path: &str) -> Result<&str, RequestError> {
  let segments: Vec<&str> = path.split('/').collect();
  if segments.len() != 3 {
    return Err(RequestError::BadPath(path.to_string()));
  }
  let name = segments[2];
  if FILENAME_RE.is_match(name) {
    Ok(name)
  } else {
    Err(RequestError::BadFilename(name.to_string()))
  }
}

/// Remote address and user agent, for the logs.
#[derive(Debug, Clone)]
pub struct Requester {
  pub addr: Option<SocketAddr>,
  pub agent: String,
}

impl fmt::Display for Requester {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.addr {
      Some(addr) => write!(f, "{} {}", addr, self.agent),
      None => write!(f, "- {}", self.agent),
    }
  }
}

#[async_trait]
impl<S> FromRequestParts<S> for Requester
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let addr = parts
      .extensions
      .get::<ConnectInfo<SocketAddr>>()
      .map(|ConnectInfo(addr)| *addr);
    let agent = parts
      .headers
      .get(header::USER_AGENT)
      .and_then(|value| value.to_str().ok())
      .unwrap_or("-")
      .to_string();
    Ok(Requester { addr, agent })
  }
}

pub(crate) fn log_failure<T>(result: Result<T, RequestError>, requester: &Requester) -> Result<T, RequestError> {
  if let Err(err) = &result {
    tracing::warn!("{} - {}", err, requester);
  }
  result
}
