//! Heuristic reconstruction of running text from tokenized treebank sentences.
//!
//! The treebank does not store the original whitespace, so spacing is guessed
//! from the part-of-speech tags (STTS) and a handful of bracket and quote tokens.
//! All offsets are character offsets (Unicode scalar values), not byte offsets.
use crate::error::{ConversionError, Result};

/// `(start, end)` character offsets of a token in the reconstructed text
pub type TokenSpan = (usize, usize);

/// Tags that attach to the preceding token: sentence-final and clause-internal punctuation
static ATTACHING_TAGS: [&str; 2] = ["$.", "$,"];
/// Tokens that attach to the following token
static OPENING_TOKENS: [&str; 3] = ["``", "(", "/"];
/// Tokens that attach to the preceding token
static CLOSING_TOKENS: [&str; 3] = ["''", ")", "/"];

fn space_after<T: AsRef<str>, P: AsRef<str>>(index: usize, tokens: &[T], tags: &[P]) -> bool {
  let next = index + 1;
  if next >= tokens.len() {
    return false;
  }
  let next_tag = tags[next].as_ref();
  let next_token = tokens[next].as_ref();
  let token = tokens[index].as_ref();
  !(ATTACHING_TAGS.contains(&next_tag)
    || OPENING_TOKENS.contains(&token)
    || CLOSING_TOKENS.contains(&next_token))
}

/// Rebuild the text of a single sentence, with one span per token.
///
/// Spans cover exactly the characters of their token, regardless of the spacing
/// decisions around it.
pub fn sentence_from_tokens<T: AsRef<str>, P: AsRef<str>>(
  tokens: &[T],
  tags: &[P],
) -> Result<(String, Vec<TokenSpan>)> {
  if tokens.len() != tags.len() {
    return Err(ConversionError::TokenPosMismatch {
      tokens: tokens.len(),
      tags: tags.len(),
    });
  }
  let mut text = String::new();
  let mut offset = 0;
  let mut spans = Vec::with_capacity(tokens.len());
  for (index, token) in tokens.iter().enumerate() {
    let token = token.as_ref();
    let width = token.chars().count();
    spans.push((offset, offset + width));
    text.push_str(token);
    offset += width;
    if space_after(index, tokens, tags) {
      text.push(' ');
      offset += 1;
    }
  }
  Ok((text, spans))
}

/// Accumulates sentences into a single document text, shifting their spans into
/// document coordinates
#[derive(Debug, Default, Clone)]
pub struct TextBuilder {
  text: String,
  char_len: usize,
}

impl TextBuilder {
  /// An empty builder
  pub fn new() -> Self { TextBuilder::default() }

  /// Append a sentence, separated by a single space from any preceding text, and
  /// return its token spans in document coordinates. An empty sentence leaves the
  /// text untouched.
  pub fn push_sentence<T: AsRef<str>, P: AsRef<str>>(
    &mut self,
    tokens: &[T],
    tags: &[P],
  ) -> Result<Vec<TokenSpan>> {
    let (sentence, spans) = sentence_from_tokens(tokens, tags)?;
    if spans.is_empty() {
      return Ok(spans);
    }
    let separator = if self.char_len == 0 { 0 } else { 1 };
    if separator > 0 {
      self.text.push(' ');
    }
    let shift = self.char_len + separator;
    self.text.push_str(&sentence);
    self.char_len = shift + sentence.chars().count();
    Ok(
      spans
        .into_iter()
        .map(|(start, end)| (start + shift, end + shift))
        .collect(),
    )
  }

  /// The text accumulated so far
  pub fn text(&self) -> &str { &self.text }

  /// Length of the accumulated text, in characters
  pub fn char_len(&self) -> usize { self.char_len }

  /// Consume the builder, yielding the document text
  pub fn into_text(self) -> String { self.text }
}

/// Rebuild a document text from its sentences, returning the per-sentence token
/// spans in document coordinates
pub fn text_from_tokens<T: AsRef<str>, P: AsRef<str>>(
  sentences: &[(Vec<T>, Vec<P>)],
) -> Result<(String, Vec<Vec<TokenSpan>>)> {
  let mut builder = TextBuilder::new();
  let mut token_spans = Vec::with_capacity(sentences.len());
  for (tokens, tags) in sentences {
    token_spans.push(builder.push_sentence(tokens, tags)?);
  }
  Ok((builder.into_text(), token_spans))
}

/// `(first start, last end)` of a sentence's token spans, `None` for an empty sentence
pub fn sentence_span(spans: &[TokenSpan]) -> Option<TokenSpan> {
  match (spans.first(), spans.last()) {
    (Some(first), Some(last)) => Some((first.0, last.1)),
    _ => None,
  }
}
