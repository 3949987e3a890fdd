//! Frame-semantic records, both as annotated (pointing at graph nodes) and as
//! extracted (pointing at token indices)
use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::graph::{resolve, Graph, NodeRef};

/// A frame-evoking element with resolved token refs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
  /// lemma of the predicate
  pub lemma: String,
  /// token indices, deduplicated and ascending
  pub refs: Vec<usize>,
}

/// A semantic role filler with resolved token refs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameElement {
  /// corpus id of the frame element
  pub id: String,
  /// role label
  pub name: String,
  /// token indices, deduplicated and ascending
  pub refs: Vec<usize>,
}

/// One annotated predicate occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
  /// corpus id of the frame
  pub id: String,
  /// frame type
  pub name: String,
  /// the frame-evoking elements
  pub targets: Vec<Target>,
  /// the role fillers
  pub entities: Vec<FrameElement>,
}

impl Frame {
  /// Move every ref by `offset` tokens
  pub fn shift_refs(&mut self, offset: usize) {
    for target in &mut self.targets {
      for reference in &mut target.refs {
        *reference += offset;
      }
    }
    for entity in &mut self.entities {
      for reference in &mut entity.refs {
        *reference += offset;
      }
    }
  }

  /// All refs of targets and entities, in no particular order
  pub fn refs(&self) -> impl Iterator<Item = usize> + '_ {
    let target_refs = self.targets.iter().flat_map(|t| t.refs.iter());
    let entity_refs = self.entities.iter().flat_map(|e| e.refs.iter());
    target_refs.chain(entity_refs).copied()
  }
}

/// `<target>` as parsed from the frame layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAnnotation {
  /// `@lemma`
  pub lemma: String,
  /// `fenode@idref` values
  pub nodes: Vec<NodeRef>,
}

/// `<fe>` as parsed from the frame layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityAnnotation {
  /// `@id`
  pub id: String,
  /// `@name`
  pub name: String,
  /// `fenode@idref` values
  pub nodes: Vec<NodeRef>,
}

/// `<frame>` as parsed from the frame layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameAnnotation {
  /// `@id`
  pub id: String,
  /// `@name`
  pub name: String,
  /// the `<target>` children
  pub targets: Vec<TargetAnnotation>,
  /// the `<fe>` children
  pub entities: Vec<EntityAnnotation>,
}

/// The frames of one sentence together with the split ids that were approximated
#[derive(Debug, Default)]
pub struct Extraction {
  /// frames with sentence-local refs
  pub frames: Vec<Frame>,
  /// raw split ids resolved via their whole word
  pub approximated: Vec<String>,
}

/// Resolve `nodes` to the deduplicated, ascending indices of the tokens they cover
pub fn token_refs(nodes: &[NodeRef], graph: &Graph, approximated: &mut Vec<String>) -> Result<Vec<usize>> {
  let resolution = resolve(nodes, graph);
  approximated.extend(resolution.approximated);
  let mut refs = BTreeSet::new();
  for terminal in resolution.terminals {
    refs.insert(terminal.index()?);
  }
  Ok(refs.into_iter().collect())
}

/// Turn the frame annotations of one sentence into frames over token indices
pub fn extract_frames(annotations: &[FrameAnnotation], graph: &Graph) -> Result<Extraction> {
  let mut extraction = Extraction::default();
  for annotation in annotations {
    let mut targets = Vec::with_capacity(annotation.targets.len());
    for target in &annotation.targets {
      targets.push(Target {
        lemma: target.lemma.clone(),
        refs: token_refs(&target.nodes, graph, &mut extraction.approximated)?,
      });
    }
    let mut entities = Vec::with_capacity(annotation.entities.len());
    for entity in &annotation.entities {
      entities.push(FrameElement {
        id: entity.id.clone(),
        name: entity.name.clone(),
        refs: token_refs(&entity.nodes, graph, &mut extraction.approximated)?,
      });
    }
    extraction.frames.push(Frame {
      id: annotation.id.clone(),
      name: annotation.name.clone(),
      targets,
      entities,
    });
  }
  Ok(extraction)
}
