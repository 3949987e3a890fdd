//! The sentence to document mapping: one `doc_id<TAB>sentence_id` record per line
use std::collections::HashMap;
use std::io::Read;

use csv::ReaderBuilder;
use tracing::info;

use super::SentenceId;
use crate::error::{ConversionError, Result};

/// Lookup table from sentence ids to the id of the document containing them
#[derive(Debug, Clone, Default)]
pub struct DocumentMapping {
  by_sentence: HashMap<SentenceId, String>,
}

impl DocumentMapping {
  /// An empty mapping
  pub fn new() -> Self { DocumentMapping::default() }

  /// Read the mapping file at `path`
  pub fn read(path: &str) -> Result<Self> {
    let file = std::fs::File::open(path)?;
    let mapping = DocumentMapping::from_reader(file)?;
    info!(path, sentences = mapping.len(), "read document mapping");
    Ok(mapping)
  }

  /// Read tab separated `doc_id, sentence_id` records from `reader`
  pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
    let mut tsv_reader = ReaderBuilder::new()
      .delimiter(b'\t')
      .has_headers(false)
      .quoting(false)
      .flexible(true)
      .from_reader(reader);
    let mut mapping = DocumentMapping::new();
    for record in tsv_reader.records() {
      let record = record?;
      let line = record.position().map(|p| p.line()).unwrap_or(0);
      if record.len() != 2 {
        return Err(ConversionError::InvalidMapping {
          line,
          reason: format!("expected 2 fields, found {}", record.len()),
        });
      }
      let sentence_field = record[1].trim();
      let sentence = sentence_field
        .parse::<SentenceId>()
        .map_err(|_| ConversionError::InvalidMapping {
          line,
          reason: format!("sentence id `{}` is not numeric", sentence_field),
        })?;
      mapping.insert(sentence, record[0].trim());
    }
    Ok(mapping)
  }

  /// Assign `sentence` to `document`; a later assignment replaces an earlier one
  pub fn insert(&mut self, sentence: SentenceId, document: &str) {
    self.by_sentence.insert(sentence, document.to_string());
  }

  /// The document containing `sentence`; a missing entry is fatal for the run
  pub fn document_of(&self, sentence: SentenceId) -> Result<&str> {
    self
      .by_sentence
      .get(&sentence)
      .map(String::as_str)
      .ok_or(ConversionError::UnmappedSentence(sentence))
  }

  /// Number of mapped sentences
  pub fn len(&self) -> usize { self.by_sentence.len() }

  /// Whether no sentence is mapped
  pub fn is_empty(&self) -> bool { self.by_sentence.is_empty() }
}
