use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::TemplateError;

pub const GIF_FILENAME: &str = "$GIF_FILENAME";
pub const GIF_SIZE: &str = "$GIF_SIZE";
pub const RESULT_NUMBER: &str = "$RESULT_NUMBER";
pub const NUM_RESULTS: &str = "$NUM_RESULTS";
pub const WORDS: &str = "$WORDS";
pub const NUM_GIF_FILES: &str = "$NUM_GIF_FILES";
pub const RESULTS: &str = "$RESULTS";

/// Replaces every occurrence of each placeholder in `vars` with its value.
///
/// Plain substring replacement; values are inserted verbatim.
pub fn render(template: &str, vars: &HashMap<&str, String>) -> String {
  let mut html = template.to_string();
  for (token, value) in vars {
    html = html.replace(token, value);
  }
  html
}

pub fn escape_html(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(c),
    }
  }
  escaped
}

/// The three page fragments, read once at startup.
#[derive(Debug, Clone)]
pub struct Templates {
  pub entry: String,
  pub results: String,
  pub search: String,
}

impl Templates {
  pub fn load(dir: &Path) -> Result<Self, TemplateError> {
    Ok(Self {
      entry: read_template(dir, "entry.html")?,
      results: read_template(dir, "results.html")?,
      search: read_template(dir, "search.html")?,
    })
  }
}

fn read_template(dir: &Path, name: &str) -> Result<String, TemplateError> {
  let path = dir.join(name);
  let html = fs::read_to_string(&path).map_err(|source| TemplateError { path: path.clone(), source })?;
  tracing::debug!("Loaded template {}", path.display());
  Ok(html)
}
