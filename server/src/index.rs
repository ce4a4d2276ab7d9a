//! Inverted word index over the GIF source directory.
//!
//! Filenames are split into lowercase words on `-` and `_`; every word points
//! back at the files whose name contains it. The index is built once at
//! startup and never mutated afterwards.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::IndexError;

pub const GIF_SUFFIX: &str = ".gif";

/// Splits a filename (minus its `.gif` suffix) into lowercase words.
pub fn tokenize(filename: &str) -> Vec<String> {
  filename
    .strip_suffix(GIF_SUFFIX)
    .unwrap_or(filename)
    .split(['-', '_'])
    .filter(|word| !word.is_empty())
    .map(str::to_lowercase)
    .collect()
}

/// Splits a comma separated query into trimmed, lowercase, non-empty terms.
pub fn parse_query(q: &str) -> Vec<String> {
  q.split(',')
    .map(str::trim)
    .filter(|word| !word.is_empty())
    .map(str::to_lowercase)
    .collect()
}

#[derive(Debug, Default)]
pub struct GifIndex {
  words: HashMap<String, Vec<String>>,
  sizes: HashMap<String, u64>,
  files: usize,
}

impl GifIndex {
  /// Scans `dir` and indexes every regular file in it.
  pub fn build(dir: &Path) -> Result<Self, IndexError> {
    let entries = fs::read_dir(dir).map_err(|source| IndexError::ReadDir {
      path: dir.to_path_buf(),
      source,
    })?;

    let mut index = GifIndex::default();
    for entry in entries {
      let entry = entry.map_err(|source| IndexError::ReadDir {
        path: dir.to_path_buf(),
        source,
      })?;
      let path = entry.path();
      // Follows symlinks; a dangling link is skipped rather than fatal.
      let metadata = match fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(err) => {
          entry.metadata().map_err(|source| IndexError::Entry {
            path: path.clone(),
            source,
          })?;
          tracing::warn!("skipping unreadable entry {}: {}", path.display(), err);
          continue;
        }
      };
      if !metadata.is_file() {
        tracing::debug!("skipping non-file entry {}", path.display());
        continue;
      }
      let name = entry.file_name().to_string_lossy().into_owned();
      index.insert(name, metadata.len());
    }

    tracing::info!("Indexed {} files from {}", index.files, dir.display());
    Ok(index)
  }

  pub fn insert(&mut self, filename: String, bytes: u64) {
    for word in tokenize(&filename) {
      let entries = self.words.entry(word).or_default();
      if entries.last() != Some(&filename) {
        entries.push(filename.clone());
      }
    }
    if self.sizes.insert(filename, bytes).is_none() {
      self.files += 1;
    }
  }

  pub fn lookup(&self, word: &str) -> &[String] {
    self.words.get(word).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Union of the files matching any of `words`, without duplicates.
  ///
  /// Files come out in order of first appearance: query term order, then
  /// index order within a term.
  pub fn search<S: AsRef<str>>(&self, words: &[S]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for word in words {
      for filename in self.lookup(word.as_ref()) {
        if seen.insert(filename.as_str()) {
          found.push(filename.as_str());
        }
      }
    }
    found
  }

  /// Size in bytes recorded when the index was built.
  pub fn size_of(&self, filename: &str) -> u64 {
    self.sizes.get(filename).copied().unwrap_or(0)
  }

  pub fn len(&self) -> usize {
    self.files
  }

  pub fn is_empty(&self) -> bool {
    self.files == 0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn index_of(files: &[(&str, u64)]) -> GifIndex {
    let mut index = GifIndex::default();
    for (name, size) in files {
      index.insert(name.to_string(), *size);
    }
    index
  }

  #[test]
  fn tokenize_splits_on_hyphen_and_underscore() {
    assert_eq!(tokenize("black-cat_funny.gif"), vec!["black", "cat", "funny"]);
    assert_eq!(tokenize("Shouting-PANDA.gif"), vec!["shouting", "panda"]);
    assert_eq!(tokenize("double--dash.gif"), vec!["double", "dash"]);
  }

  #[test]
  fn every_word_maps_to_the_filename() {
    let index = index_of(&[("black-cat_funny.gif", 10)]);
    for word in ["black", "cat", "funny"] {
      assert_eq!(index.lookup(word), ["black-cat_funny.gif".to_string()]);
    }
    assert!(index.lookup("gif").is_empty());
  }

  #[test]
  fn parse_query_trims_lowercases_and_drops_empties() {
    assert_eq!(parse_query(" Cat , dog,,  "), vec!["cat", "dog"]);
    assert!(parse_query("").is_empty());
    assert!(parse_query(" ,  , ").is_empty());
  }

  #[test]
  fn search_unions_and_deduplicates() {
    let index = index_of(&[("a-cat.gif", 1), ("b-cat-dog.gif", 2), ("c-dog.gif", 3)]);
    let found = index.search(&["cat", "dog"]);
    assert_eq!(found.len(), 3);
    let found: HashSet<_> = found.into_iter().collect();
    assert_eq!(found, HashSet::from(["a-cat.gif", "b-cat-dog.gif", "c-dog.gif"]));
  }

  #[test]
  fn search_is_repeatable() {
    let index = index_of(&[("a-cat.gif", 1), ("b-cat-dog.gif", 2), ("c-dog.gif", 3)]);
    let words = parse_query("dog, cat, mouse");
    assert_eq!(index.search(&words), index.search(&words));
    assert!(index.search(&["mouse"]).is_empty());
  }

  #[test]
  fn build_records_sizes_and_skips_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("happy-dance.gif"), vec![0u8; 4096]).expect("write");
    fs::write(dir.path().join("sad_dance.gif"), b"x").expect("write");
    fs::create_dir(dir.path().join("thumbs")).expect("mkdir");

    let index = GifIndex::build(dir.path()).expect("build");
    assert_eq!(index.len(), 2);
    assert_eq!(index.size_of("happy-dance.gif"), 4096);
    assert_eq!(index.search(&["dance"]).len(), 2);
    assert!(index.lookup("thumbs").is_empty());
  }

  #[cfg(unix)]
  #[test]
  fn build_follows_symlinks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let real = dir.path().join("real");
    fs::create_dir(&real).expect("mkdir");
    fs::write(real.join("target.gif"), vec![0u8; 2048]).expect("write");

    let src = dir.path().join("src");
    fs::create_dir(&src).expect("mkdir");
    std::os::unix::fs::symlink(real.join("target.gif"), src.join("funny-cat.gif")).expect("symlink");
    std::os::unix::fs::symlink(real.join("missing.gif"), src.join("dangling.gif")).expect("symlink");

    let index = GifIndex::build(&src).expect("build");
    assert_eq!(index.len(), 1);
    assert_eq!(index.lookup("cat"), ["funny-cat.gif".to_string()]);
    assert_eq!(index.size_of("funny-cat.gif"), 2048);
    assert!(index.lookup("dangling").is_empty());
  }

  #[test]
  fn repeated_word_lists_file_once() {
    let index = index_of(&[("cat-cat.gif", 1), ("cat_dog.gif", 2)]);
    assert_eq!(index.lookup("cat"), ["cat-cat.gif".to_string(), "cat_dog.gif".to_string()]);
  }

  #[test]
  fn build_fails_on_missing_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = GifIndex::build(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, IndexError::ReadDir { .. }));
  }
}
