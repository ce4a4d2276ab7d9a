use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::StartupError;
use crate::index::GifIndex;
use crate::template::Templates;

pub type SharedState = Arc<AppState>;

/// Everything the handlers read. Built once, never mutated.
#[derive(Debug)]
pub struct AppState {
  pub index: GifIndex,
  pub templates: Templates,
  pub src_dir: PathBuf,
}

impl AppState {
  pub fn load(src_dir: &Path, template_dir: &Path) -> Result<Self, StartupError> {
    let templates = Templates::load(template_dir)?;
    let index = GifIndex::build(src_dir)?;
    Ok(Self {
      index,
      templates,
      src_dir: src_dir.to_path_buf(),
    })
  }

  pub fn shared(self) -> SharedState {
    Arc::new(self)
  }
}
