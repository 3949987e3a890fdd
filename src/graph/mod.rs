//! The `graph` module holds the typed per-sentence constituency graph of the
//! treebank, and the reference ids that semantic annotation uses to point into it.
//!
//! A graph exclusively owns its terminals and nonterminals; every edge, target
//! and frame element refers to nodes by id only.
pub mod resolver;

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ConversionError, Result};

pub use self::resolver::{resolve, Resolution};

lazy_static! {
  // `s12_4_s1` is the first part of the split word `s12_4`
  static ref SPLIT_ID: Regex = Regex::new(r"^(?P<base>.+)_[^_]*s[^_]*$").unwrap();
  static ref TERMINAL_INDEX: Regex = Regex::new(r"_(?P<index>\d+)$").unwrap();
}

/// A reference to a graph node, as found in `edge@idref` and `fenode@idref`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
  /// A regular terminal or nonterminal id
  Plain(String),
  /// A reference to part of a split word; only the whole word is resolvable
  Split {
    /// The id of the whole word
    base: String,
    /// The id as it appeared in the annotation
    raw: String,
  },
}

impl NodeRef {
  /// Classify a raw id, stripping the split qualifier if there is one
  pub fn parse(raw: &str) -> Self {
    match SPLIT_ID.captures(raw) {
      Some(caps) => NodeRef::Split {
        base: caps["base"].to_string(),
        raw: raw.to_string(),
      },
      None => NodeRef::Plain(raw.to_string()),
    }
  }

  /// The id used for lookup in a `Graph`
  pub fn base(&self) -> &str {
    match self {
      NodeRef::Plain(id) => id,
      NodeRef::Split { base, .. } => base,
    }
  }

  /// Whether resolving this reference is an approximation
  pub fn is_split(&self) -> bool { matches!(self, NodeRef::Split { .. }) }
}

impl fmt::Display for NodeRef {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      NodeRef::Plain(id) => write!(f, "{}", id),
      NodeRef::Split { raw, .. } => write!(f, "{}", raw),
    }
  }
}

/// A leaf of the constituency graph, i.e. a token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Terminal {
  /// corpus id, e.g. `s12_4`
  pub id: String,
  /// surface form
  pub word: String,
  /// part-of-speech tag (STTS)
  pub pos: String,
}

impl Terminal {
  /// Zero-based position of the terminal within its sentence.
  ///
  /// TIGER numbers terminals from 1 in the last component of the id; a split
  /// id is reduced to its whole-word id first.
  pub fn index(&self) -> Result<usize> { terminal_index(&self.id) }
}

/// Zero-based sentence position encoded in a terminal id
pub fn terminal_index(id: &str) -> Result<usize> {
  let node_ref = NodeRef::parse(id);
  TERMINAL_INDEX
    .captures(node_ref.base())
    .and_then(|caps| caps["index"].parse::<usize>().ok())
    .and_then(|one_based| one_based.checked_sub(1))
    .ok_or_else(|| ConversionError::invalid_id("terminal", id))
}

/// An inner node of the constituency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonTerminal {
  /// corpus id, e.g. `s12_500`
  pub id: String,
  /// phrase category, when annotated
  pub cat: Option<String>,
  /// the dominated nodes, in edge order
  pub children: Vec<NodeRef>,
}

/// Per-sentence container of terminals and nonterminals, keyed by id
#[derive(Debug, Clone, Default)]
pub struct Graph {
  terminals: HashMap<String, Terminal>,
  nonterminals: HashMap<String, NonTerminal>,
  order: Vec<String>,
}

impl Graph {
  /// An empty graph
  pub fn new() -> Self { Graph::default() }

  /// Add a terminal; terminals keep the order in which they are added
  pub fn add_terminal(&mut self, terminal: Terminal) {
    if !self.terminals.contains_key(&terminal.id) {
      self.order.push(terminal.id.clone());
    }
    self.terminals.insert(terminal.id.clone(), terminal);
  }

  /// Add a nonterminal
  pub fn add_nonterminal(&mut self, nonterminal: NonTerminal) {
    self
      .nonterminals
      .insert(nonterminal.id.clone(), nonterminal);
  }

  /// Look up a terminal by id
  pub fn terminal(&self, id: &str) -> Option<&Terminal> { self.terminals.get(id) }

  /// Look up a nonterminal by id
  pub fn nonterminal(&self, id: &str) -> Option<&NonTerminal> { self.nonterminals.get(id) }

  /// The terminals in sentence order
  pub fn terminals(&self) -> impl Iterator<Item = &Terminal> {
    self.order.iter().filter_map(move |id| self.terminals.get(id))
  }

  /// Number of terminals
  pub fn terminal_count(&self) -> usize { self.order.len() }

  /// Number of nonterminals
  pub fn nonterminal_count(&self) -> usize { self.nonterminals.len() }
}
