use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Html;

use super::Requester;
use crate::index::{parse_query, GifIndex};
use crate::template::{self, escape_html, render, Templates};
use crate::state::SharedState;

/// First `q` in the query string, empty when absent.
fn first_q(params: &[(String, String)]) -> &str {
  params
    .iter()
    .find(|(key, _)| key == "q")
    .map(|(_, value)| value.as_str())
    .unwrap_or("")
}

/// GET /search?q=cat,dog,mouse
pub async fn search(
  State(state): State<SharedState>,
  Query(params): Query<Vec<(String, String)>>,
  requester: Requester,
) -> Html<String> {
  let q = first_q(&params);
  let words = parse_query(q);
  let total = state.index.len().to_string();

  if words.is_empty() {
    return Html(render(
      &state.templates.search,
      &HashMap::from([(template::NUM_GIF_FILES, total)]),
    ));
  }

  let found = state.index.search(&words);
  tracing::info!("search: {:?} produced {} results - {}", words, found.len(), requester);

  Html(render(
    &state.templates.results,
    &HashMap::from([
      (template::NUM_GIF_FILES, total),
      (template::WORDS, escape_html(q)),
      (template::NUM_RESULTS, found.len().to_string()),
      (template::RESULTS, render_entries(&state.templates, &state.index, &found)),
    ]),
  ))
}

fn render_entries(templates: &Templates, index: &GifIndex, found: &[&str]) -> String {
  found
    .iter()
    .enumerate()
    .map(|(i, name)| {
      render(
        &templates.entry,
        &HashMap::from([
          (template::GIF_FILENAME, escape_html(name)),
          (template::RESULT_NUMBER, (i + 1).to_string()),
          (template::GIF_SIZE, format!("{} KB", index.size_of(name) / 1024)),
        ]),
      )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fixture() -> (Templates, GifIndex) {
    let templates = Templates {
      entry: "$RESULT_NUMBER:$GIF_FILENAME:$GIF_SIZE".into(),
      results: "$NUM_RESULTS of $NUM_GIF_FILES for $WORDS\n$RESULTS".into(),
      search: "$NUM_GIF_FILES".into(),
    };
    let mut index = GifIndex::default();
    index.insert("big-cat.gif".into(), 5000);
    index.insert("small-cat.gif".into(), 100);
    (templates, index)
  }

  #[test]
  fn entries_are_numbered_from_one_with_sizes_in_kb() {
    let (templates, index) = fixture();
    let html = render_entries(&templates, &index, &["big-cat.gif", "small-cat.gif"]);
    assert_eq!(html, "1:big-cat.gif:4 KB\n2:small-cat.gif:0 KB");
  }

  #[test]
  fn first_q_wins_over_repeats() {
    let params = vec![
      ("x".to_string(), "1".to_string()),
      ("q".to_string(), "cat".to_string()),
      ("q".to_string(), "dog".to_string()),
    ];
    assert_eq!(first_q(&params), "cat");
    assert_eq!(first_q(&[]), "");
  }

  #[test]
  fn no_entries_render_empty() {
    let (templates, index) = fixture();
    assert_eq!(render_entries(&templates, &index, &[]), "");
  }
}
