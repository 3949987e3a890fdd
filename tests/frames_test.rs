use salsa_tiger::frames::*;
use salsa_tiger::graph::{Graph, NodeRef, NonTerminal, Terminal};

fn refs(raw: &[&str]) -> Vec<NodeRef> { raw.iter().map(|r| NodeRef::parse(r)).collect() }

/// s2: "Er sagt , dass sie kommt ."
fn sample_graph() -> Graph {
  let mut graph = Graph::new();
  let words = [
    ("Er", "PPER"),
    ("sagt", "VVFIN"),
    (",", "$,"),
    ("dass", "KOUS"),
    ("sie", "PPER"),
    ("kommt", "VVFIN"),
    (".", "$."),
  ];
  for (index, (word, pos)) in words.iter().enumerate() {
    graph.add_terminal(Terminal {
      id: format!("s2_{}", index + 1),
      word: word.to_string(),
      pos: pos.to_string(),
    });
  }
  graph.add_nonterminal(NonTerminal {
    id: "s2_500".to_string(),
    cat: Some("S".to_string()),
    children: refs(&["s2_4", "s2_5", "s2_6"]),
  });
  graph
}

fn statement() -> FrameAnnotation {
  FrameAnnotation {
    id: "s2_f1".to_string(),
    name: "Statement".to_string(),
    targets: vec![TargetAnnotation {
      lemma: "sagen".to_string(),
      nodes: refs(&["s2_2"]),
    }],
    entities: vec![
      EntityAnnotation {
        id: "s2_f1_e1".to_string(),
        name: "Speaker".to_string(),
        nodes: refs(&["s2_1"]),
      },
      EntityAnnotation {
        id: "s2_f1_e2".to_string(),
        name: "Message".to_string(),
        nodes: refs(&["s2_500", "s2_5"]),
      },
    ],
  }
}

#[test]
fn extracts_sentence_local_refs() {
  let graph = sample_graph();
  let extraction = extract_frames(&[statement()], &graph).unwrap();
  assert_eq!(
    extraction.frames,
    vec![Frame {
      id: "s2_f1".to_string(),
      name: "Statement".to_string(),
      targets: vec![Target {
        lemma: "sagen".to_string(),
        refs: vec![1],
      }],
      entities: vec![
        FrameElement {
          id: "s2_f1_e1".to_string(),
          name: "Speaker".to_string(),
          refs: vec![0],
        },
        FrameElement {
          id: "s2_f1_e2".to_string(),
          name: "Message".to_string(),
          refs: vec![3, 4, 5],
        },
      ],
    }]
  );
  assert!(extraction.approximated.is_empty());
}

#[test]
fn split_fenodes_are_recorded() {
  let graph = sample_graph();
  let annotation = FrameAnnotation {
    id: "s2_f2".to_string(),
    name: "Arriving".to_string(),
    targets: vec![TargetAnnotation {
      lemma: "kommen".to_string(),
      nodes: refs(&["s2_6"]),
    }],
    entities: vec![EntityAnnotation {
      id: "s2_f2_e1".to_string(),
      name: "Theme".to_string(),
      nodes: refs(&["s2_5_s1"]),
    }],
  };
  let extraction = extract_frames(&[annotation], &graph).unwrap();
  assert_eq!(extraction.frames[0].entities[0].refs, vec![4]);
  assert_eq!(extraction.approximated, vec!["s2_5_s1".to_string()]);
}

#[test]
fn missing_nodes_give_empty_refs() {
  let graph = sample_graph();
  let annotation = FrameAnnotation {
    id: "s2_f3".to_string(),
    name: "Ghost".to_string(),
    targets: vec![TargetAnnotation {
      lemma: "spuken".to_string(),
      nodes: refs(&["s2_999"]),
    }],
    entities: vec![],
  };
  let extraction = extract_frames(&[annotation], &graph).unwrap();
  assert!(extraction.frames[0].targets[0].refs.is_empty());
}

#[test]
fn frames_without_annotations_yield_nothing() {
  let graph = sample_graph();
  let extraction = extract_frames(&[], &graph).unwrap();
  assert!(extraction.frames.is_empty());
}

#[test]
fn shifting_moves_targets_and_entities() {
  let graph = sample_graph();
  let mut frame = extract_frames(&[statement()], &graph).unwrap().frames.remove(0);
  frame.shift_refs(10);
  assert_eq!(frame.targets[0].refs, vec![11]);
  assert_eq!(frame.entities[0].refs, vec![10]);
  assert_eq!(frame.entities[1].refs, vec![13, 14, 15]);
  let mut all: Vec<usize> = frame.refs().collect();
  all.sort_unstable();
  assert_eq!(all, vec![10, 11, 13, 14, 15]);
}

#[test]
fn frames_serialize_to_the_output_shape() {
  let graph = sample_graph();
  let frame = extract_frames(&[statement()], &graph).unwrap().frames.remove(0);
  let json = serde_json::to_value(&frame).unwrap();
  assert_eq!(
    json,
    serde_json::json!({
      "id": "s2_f1",
      "name": "Statement",
      "targets": [{"lemma": "sagen", "refs": [1]}],
      "entities": [
        {"id": "s2_f1_e1", "name": "Speaker", "refs": [0]},
        {"id": "s2_f1_e2", "name": "Message", "refs": [3, 4, 5]}
      ]
    })
  );
}
