use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::Response;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use super::{filename_from_path, log_failure, Requester, CACHE_CONTROL};
use crate::error::RequestError;
use crate::state::SharedState;

/// GET /files/<name>
pub async fn serve_file(
  State(state): State<SharedState>,
  uri: Uri,
  requester: Requester,
) -> Result<Response, RequestError> {
  log_failure(open_file(&state, uri.path(), &requester).await, &requester)
}

async fn open_file(state: &SharedState, path: &str, requester: &Requester) -> Result<Response, RequestError> {
  let name = filename_from_path(path)?;
  tracing::info!("file: {} - {}", name, requester);

  let path = state.src_dir.join(name);
  let file = File::open(&path)
    .await
    .map_err(|source| RequestError::NotFound { path, source })?;

  Response::builder()
    .status(StatusCode::OK)
    .header(header::CONTENT_TYPE, "image/gif")
    .header(header::CACHE_CONTROL, CACHE_CONTROL)
    .body(Body::from_stream(ReaderStream::new(file)))
    .map_err(|e| RequestError::Internal(e.to_string()))
}
