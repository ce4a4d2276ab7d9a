use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::Response;

use super::{filename_from_path, log_failure, Requester, CACHE_CONTROL};
use crate::error::RequestError;
use crate::state::SharedState;
use crate::thumbnail::create_thumbnail;

/// GET /thumbs/<name>
///
/// Re-encodes on every request.
// TODO: keep recent thumbnails in a size-bounded LRU instead of re-decoding.
pub async fn serve_thumb(
  State(state): State<SharedState>,
  uri: Uri,
  requester: Requester,
) -> Result<Response, RequestError> {
  log_failure(render_thumb(&state, uri.path(), &requester).await, &requester)
}

async fn render_thumb(state: &SharedState, path: &str, requester: &Requester) -> Result<Response, RequestError> {
  let name = filename_from_path(path)?;
  tracing::info!("thumb: {} - {}", name, requester);

  let path = state.src_dir.join(name);
  let jpeg = tokio::task::spawn_blocking(move || create_thumbnail(&path))
    .await
    .map_err(|e| RequestError::Internal(format!("thumbnail task failed: {}", e)))??;

  Response::builder()
    .status(StatusCode::OK)
    .header(header::CONTENT_TYPE, "image/jpeg")
    .header(header::CACHE_CONTROL, CACHE_CONTROL)
    .body(Body::from(jpeg))
    .map_err(|e| RequestError::Internal(e.to_string()))
}
