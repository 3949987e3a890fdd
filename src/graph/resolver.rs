//! Expansion of node references into the terminals they dominate
use std::collections::HashSet;

use tracing::debug;

use super::{Graph, NodeRef, Terminal};

/// The outcome of resolving a collection of references against a `Graph`
#[derive(Debug, Default)]
pub struct Resolution<'g> {
  /// every terminal dominated by at least one of the references
  pub terminals: HashSet<&'g Terminal>,
  /// split ids that were resolved via their whole word
  pub approximated: Vec<String>,
}

impl<'g> Resolution<'g> {
  /// Whether any reference had to be approximated
  pub fn is_approximate(&self) -> bool { !self.approximated.is_empty() }
}

/// Collect the terminals transitively dominated by `refs`.
///
/// Uses an explicit worklist and a visited set, so nesting depth is bounded by the
/// size of the graph rather than the call stack. Ids that name neither a terminal
/// nor a nonterminal contribute nothing.
pub fn resolve<'g>(refs: &[NodeRef], graph: &'g Graph) -> Resolution<'g> {
  let mut resolution = Resolution::default();
  let mut visited: HashSet<&str> = HashSet::new();
  let mut worklist: Vec<&NodeRef> = refs.iter().rev().collect();

  while let Some(node_ref) = worklist.pop() {
    if let NodeRef::Split { raw, base } = node_ref {
      debug!(split = %raw, whole = %base, "discarding split id, using whole word instead");
      resolution.approximated.push(raw.clone());
    }
    let id = node_ref.base();
    if !visited.insert(id) {
      continue;
    }
    if let Some(terminal) = graph.terminal(id) {
      resolution.terminals.insert(terminal);
    } else if let Some(nonterminal) = graph.nonterminal(id) {
      worklist.extend(nonterminal.children.iter().rev());
    }
  }
  resolution
}
