//! Reader for the SALSA release: TIGER-XML sentences carrying a constituency
//! graph and a `<sem>` layer of frame annotations
use libxml::readonly::RoNode;
use libxml::tree::Document as XmlDoc;
use tracing::info;

use super::{child_element, child_elements, descendants_by_path, required_attribute, SentenceId};
use crate::error::Result;
use crate::frames::{EntityAnnotation, FrameAnnotation, TargetAnnotation};
use crate::graph::{Graph, NodeRef, NonTerminal, Terminal};

/// A sentence of the frame layer, with its graph and unresolved frame annotations
#[derive(Debug, Clone, Default)]
pub struct AnnotatedSentence {
  /// numeric sentence id
  pub id: SentenceId,
  /// the constituency graph
  pub graph: Graph,
  /// frame annotations in document order
  pub frames: Vec<FrameAnnotation>,
}

impl AnnotatedSentence {
  /// The words of the sentence, in order
  pub fn tokens(&self) -> Vec<String> { self.graph.terminals().map(|t| t.word.clone()).collect() }
  /// The part-of-speech tags of the sentence, in order
  pub fn pos(&self) -> Vec<String> { self.graph.terminals().map(|t| t.pos.clone()).collect() }
}

/// Load and parse the SALSA release at `path`
pub fn read(path: &str) -> Result<Vec<AnnotatedSentence>> {
  let dom = super::load_xml(path)?;
  let sentences = parse_document(&dom)?;
  info!(path, sentences = sentences.len(), "read frame layer");
  Ok(sentences)
}

/// Parse every sentence of an already loaded SALSA document
pub fn parse_document(dom: &XmlDoc) -> Result<Vec<AnnotatedSentence>> {
  super::sentence_nodes(dom)?
    .into_iter()
    .map(parse_sentence)
    .collect()
}

/// Parse a single `<s>` element
pub fn parse_sentence(node: RoNode) -> Result<AnnotatedSentence> {
  let id = super::sentence_number(&required_attribute(node, "id")?)?;
  let graph = match child_element(node, "graph") {
    Some(graph_node) => parse_graph(graph_node)?,
    None => Graph::new(),
  };
  let frames = descendants_by_path(node, &["sem", "frames", "frame"])
    .into_iter()
    .map(parse_frame)
    .collect::<Result<Vec<_>>>()?;
  Ok(AnnotatedSentence { id, graph, frames })
}

/// Parse a `<graph>` element into its terminals and nonterminals
pub fn parse_graph(node: RoNode) -> Result<Graph> {
  let mut graph = Graph::new();
  for t in descendants_by_path(node, &["terminals", "t"]) {
    graph.add_terminal(Terminal {
      id: required_attribute(t, "id")?,
      word: required_attribute(t, "word")?,
      pos: required_attribute(t, "pos")?,
    });
  }
  for nt in descendants_by_path(node, &["nonterminals", "nt"]) {
    graph.add_nonterminal(NonTerminal {
      id: required_attribute(nt, "id")?,
      cat: nt.get_attribute("cat"),
      children: node_refs(nt, "edge")?,
    });
  }
  Ok(graph)
}

/// Parse a `<frame>` element with its `<target>` and `<fe>` children
pub fn parse_frame(node: RoNode) -> Result<FrameAnnotation> {
  let mut targets = Vec::new();
  for target in child_elements(node, "target") {
    targets.push(TargetAnnotation {
      lemma: required_attribute(target, "lemma")?,
      nodes: node_refs(target, "fenode")?,
    });
  }
  let mut entities = Vec::new();
  for fe in child_elements(node, "fe") {
    entities.push(EntityAnnotation {
      id: required_attribute(fe, "id")?,
      name: required_attribute(fe, "name")?,
      nodes: node_refs(fe, "fenode")?,
    });
  }
  Ok(FrameAnnotation {
    id: required_attribute(node, "id")?,
    name: required_attribute(node, "name")?,
    targets,
    entities,
  })
}

// `idref`s of the `child` elements of `node`
fn node_refs(node: RoNode, child: &str) -> Result<Vec<NodeRef>> {
  child_elements(node, child)
    .into_iter()
    .map(|element| required_attribute(element, "idref").map(|idref| NodeRef::parse(&idref)))
    .collect()
}
