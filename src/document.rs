//! Assembly of per-sentence tokens, tags and frames into documents
use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::corpus::{DocumentMapping, SentenceId};
use crate::detokenizer::{sentence_span, TextBuilder, TokenSpan};
use crate::error::{ConversionError, Result};
use crate::frames::Frame;

/// One output record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
  /// document id from the mapping
  pub id: String,
  /// reconstructed running text
  pub text: String,
  /// character span of every token
  pub tokens: Vec<TokenSpan>,
  /// frames with refs into `tokens`
  pub frames: Vec<Frame>,
  /// `[first, last + 1)` token indices of every sentence
  pub sentences: Vec<TokenSpan>,
  /// character span of every sentence
  pub sentence_offsets: Vec<TokenSpan>,
  /// part-of-speech tag of every token
  pub pos: Vec<String>,
}

/// Everything a sentence contributes to its document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSentence {
  /// numeric sentence id
  pub id: SentenceId,
  /// the words
  pub tokens: Vec<String>,
  /// the part-of-speech tags
  pub pos: Vec<String>,
  /// frames with sentence-local refs
  pub frames: Vec<Frame>,
}

/// Folds sentences, in order, into a `Document`
#[derive(Debug)]
pub struct DocumentBuilder {
  id: String,
  text: TextBuilder,
  tokens: Vec<TokenSpan>,
  pos: Vec<String>,
  frames: Vec<Frame>,
  sentences: Vec<TokenSpan>,
  sentence_offsets: Vec<TokenSpan>,
  ref_offset: usize,
}

impl DocumentBuilder {
  /// Start an empty document
  pub fn new(id: &str) -> Self {
    DocumentBuilder {
      id: id.to_string(),
      text: TextBuilder::new(),
      tokens: Vec::new(),
      pos: Vec::new(),
      frames: Vec::new(),
      sentences: Vec::new(),
      sentence_offsets: Vec::new(),
      ref_offset: 0,
    }
  }

  /// Number of tokens folded in so far
  pub fn token_count(&self) -> usize { self.ref_offset }

  /// Append a sentence: its text and spans go after the current text, its frame
  /// refs are moved past the tokens of all earlier sentences.
  pub fn push_sentence(&mut self, sentence: DocumentSentence) -> Result<()> {
    let token_count = sentence.tokens.len();
    for frame in &sentence.frames {
      if let Some(reference) = frame.refs().find(|r| *r >= token_count) {
        warn!(
          sentence = sentence.id,
          frame = %frame.id,
          reference,
          tokens = token_count,
          "frame points past the treebank tokens; rerun with --verify-tokens to list diverging sentences"
        );
        return Err(ConversionError::RefOutOfRange {
          frame: frame.id.clone(),
          sentence: sentence.id,
          reference,
          tokens: token_count,
        });
      }
    }
    let spans = self.text.push_sentence(&sentence.tokens, &sentence.pos)?;

    // refs index tokens, so the offset advances by token count, never by characters
    for mut frame in sentence.frames {
      frame.shift_refs(self.ref_offset);
      self.frames.push(frame);
    }
    if let Some(offsets) = sentence_span(&spans) {
      self.sentence_offsets.push(offsets);
      self
        .sentences
        .push((self.ref_offset, self.ref_offset + token_count));
    }
    self.tokens.extend(spans);
    self.pos.extend(sentence.pos);
    self.ref_offset += token_count;
    Ok(())
  }

  /// Complete the document
  pub fn finish(self) -> Document {
    Document {
      id: self.id,
      text: self.text.into_text(),
      tokens: self.tokens,
      frames: self.frames,
      sentences: self.sentences,
      sentence_offsets: self.sentence_offsets,
      pos: self.pos,
    }
  }
}

/// Build a document from its sentences, in the given order
pub fn assemble<I>(id: &str, sentences: I) -> Result<Document>
where I: IntoIterator<Item = DocumentSentence> {
  let mut builder = DocumentBuilder::new(id);
  for sentence in sentences {
    builder.push_sentence(sentence)?;
  }
  Ok(builder.finish())
}

/// Sentences grouped by document, documents kept in order of first encounter
#[derive(Debug, Default)]
pub struct DocumentGroups {
  order: Vec<String>,
  groups: HashMap<String, Vec<DocumentSentence>>,
}

impl DocumentGroups {
  /// No documents yet
  pub fn new() -> Self { DocumentGroups::default() }

  /// Append `sentence` to the group of `document`, creating an empty group first
  /// if this is the first sentence seen for it
  pub fn insert_or_append(&mut self, document: &str, sentence: DocumentSentence) {
    if !self.groups.contains_key(document) {
      self.order.push(document.to_string());
      self.groups.insert(document.to_string(), Vec::new());
    }
    if let Some(group) = self.groups.get_mut(document) {
      group.push(sentence);
    }
  }

  /// Group `sentences` by the document `mapping` assigns to them
  pub fn from_mapping<I>(sentences: I, mapping: &DocumentMapping) -> Result<Self>
  where I: IntoIterator<Item = DocumentSentence> {
    let mut groups = DocumentGroups::new();
    for sentence in sentences {
      let document = mapping.document_of(sentence.id)?;
      groups.insert_or_append(document, sentence);
    }
    Ok(groups)
  }

  /// Number of documents
  pub fn len(&self) -> usize { self.order.len() }

  /// Whether there are no documents
  pub fn is_empty(&self) -> bool { self.order.is_empty() }

  /// Document ids in order of first encounter
  pub fn ids(&self) -> &[String] { &self.order }

  /// Assemble every document, in order of first encounter
  pub fn assemble(self) -> impl Iterator<Item = Result<Document>> {
    let DocumentGroups { order, mut groups } = self;
    order.into_iter().map(move |id| {
      let sentences = groups.remove(&id).unwrap_or_default();
      assemble(&id, sentences)
    })
  }
}
