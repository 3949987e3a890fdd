//! Readers for the three inputs of a conversion run: the SALSA frame layer, the
//! TIGER treebank and the sentence to document mapping.
//!
//! Each reader is the typed parse step for its input: attributes are checked and
//! converted into the `graph` and `frames` data model here, and nothing downstream
//! touches XML.
pub mod mapping;
pub mod salsa;
pub mod tiger;

use lazy_static::lazy_static;
use libxml::parser::Parser;
use libxml::readonly::RoNode;
use libxml::tree::Document as XmlDoc;
use libxml::xpath::Context;
use regex::Regex;

use crate::error::{ConversionError, Result};

pub use self::mapping::DocumentMapping;
pub use self::salsa::AnnotatedSentence;
pub use self::tiger::TokenizedSentence;

/// Numeric part of a corpus sentence id
pub type SentenceId = u64;

/// XPath selecting the sentences of both TIGER-XML corpora
pub static SENTENCE_XPATH: &str = "//body/s";

lazy_static! {
  static ref SENTENCE_ID: Regex = Regex::new(r"^s(?P<number>\d+)$").unwrap();
}

/// Parse a sentence id of the form `s<N>` into `N`
pub fn sentence_number(id: &str) -> Result<SentenceId> {
  SENTENCE_ID
    .captures(id)
    .and_then(|caps| caps["number"].parse::<SentenceId>().ok())
    .ok_or_else(|| ConversionError::invalid_id("sentence", id))
}

/// Parse a TIGER-XML file, honoring the encoding named in its XML declaration
pub fn load_xml(path: &str) -> Result<XmlDoc> {
  let parser = Parser::default();
  parser
    .parse_file(path)
    .map_err(|cause| ConversionError::xml(path, cause))
}

/// All `<s>` elements of a TIGER-XML document, in document order
pub fn sentence_nodes(doc: &XmlDoc) -> Result<Vec<RoNode>> {
  let xpath_context =
    Context::new(doc).map_err(|_| ConversionError::XPath(SENTENCE_XPATH.to_string()))?;
  match xpath_context.evaluate(SENTENCE_XPATH) {
    Ok(found_payload) => Ok(found_payload.get_readonly_nodes_as_vec()),
    Err(_) => Err(ConversionError::XPath(SENTENCE_XPATH.to_string())),
  }
}

/// A required attribute of `node`
pub fn required_attribute(node: RoNode, name: &'static str) -> Result<String> {
  node
    .get_attribute(name)
    .ok_or_else(|| ConversionError::missing_attribute(node.get_name(), name))
}

/// The element children of `node` named `name`
pub fn child_elements(node: RoNode, name: &str) -> Vec<RoNode> {
  node
    .get_child_elements()
    .into_iter()
    .filter(|child| child.get_name() == name)
    .collect()
}

/// The first element child of `node` named `name`
pub fn child_element(node: RoNode, name: &str) -> Option<RoNode> {
  node
    .get_child_elements()
    .into_iter()
    .find(|child| child.get_name() == name)
}

/// Descend along a path of element names, collecting every match of the last step
pub fn descendants_by_path(node: RoNode, path: &[&str]) -> Vec<RoNode> {
  let mut frontier = vec![node];
  for step in path {
    frontier = frontier
      .into_iter()
      .flat_map(|parent| child_elements(parent, step))
      .collect();
  }
  frontier
}
