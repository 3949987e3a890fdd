//! Reader for the TIGER treebank, the authoritative token stream of the output
use libxml::readonly::RoNode;
use libxml::tree::Document as XmlDoc;
use libxml::xpath::Context;
use tracing::info;

use super::{required_attribute, SentenceId};
use crate::error::{ConversionError, Result};

/// A sentence as a token and part-of-speech sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedSentence {
  /// numeric sentence id
  pub id: SentenceId,
  /// the words, in order
  pub tokens: Vec<String>,
  /// the part-of-speech tags, aligned with `tokens`
  pub pos: Vec<String>,
}

impl TokenizedSentence {
  /// Number of tokens
  pub fn len(&self) -> usize { self.tokens.len() }
  /// Whether the sentence has no tokens
  pub fn is_empty(&self) -> bool { self.tokens.is_empty() }
}

/// Load and parse the TIGER release at `path`
pub fn read(path: &str) -> Result<Vec<TokenizedSentence>> {
  let dom = super::load_xml(path)?;
  let sentences = parse_document(&dom)?;
  info!(path, sentences = sentences.len(), "read treebank");
  Ok(sentences)
}

/// Parse every sentence of an already loaded TIGER document
pub fn parse_document(dom: &XmlDoc) -> Result<Vec<TokenizedSentence>> {
  let context = Context::new(dom).map_err(|_| ConversionError::XPath(".//t".to_string()))?;
  super::sentence_nodes(dom)?
    .into_iter()
    .map(|node| parse_sentence(node, &context))
    .collect()
}

/// Parse the terminals of a single `<s>` element
pub fn parse_sentence(node: RoNode, context: &Context) -> Result<TokenizedSentence> {
  let id = super::sentence_number(&required_attribute(node, "id")?)?;
  let terminals = match context.node_evaluate_readonly(".//t", node) {
    Ok(found_payload) => found_payload.get_readonly_nodes_as_vec(),
    Err(_) => return Err(ConversionError::XPath(".//t".to_string())),
  };
  let mut sentence = TokenizedSentence {
    id,
    tokens: Vec::with_capacity(terminals.len()),
    pos: Vec::with_capacity(terminals.len()),
  };
  for t in terminals {
    sentence.tokens.push(required_attribute(t, "word")?);
    sentence.pos.push(required_attribute(t, "pos")?);
  }
  Ok(sentence)
}
