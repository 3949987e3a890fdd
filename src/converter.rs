//! End-to-end conversion: read the frame layer, the treebank and the document
//! mapping into memory, then assemble and write one JSON line per document
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::corpus::{mapping::DocumentMapping, salsa, tiger, AnnotatedSentence, SentenceId, TokenizedSentence};
use crate::document::{DocumentGroups, DocumentSentence};
use crate::error::Result;
use crate::frames::{extract_frames, Frame};

static BUFFER_CAPACITY: usize = 10_485_760;

/// Default location of the SALSA release
pub const DEFAULT_SALSA_PATH: &str = "salsa_release.xml";
/// Default location of the TIGER release
pub const DEFAULT_TIGER_PATH: &str = "tiger_release_aug07.corrected.16012013.xml";
/// Default location of the sentence to document mapping
pub const DEFAULT_MAPPING_PATH: &str = "documents.tsv";
/// Default destination of the document JSON lines
pub const DEFAULT_OUTPUT_PATH: &str = "out.jsonlines";
/// Default destination of the frame inventory
pub const DEFAULT_FRAMES_PATH: &str = "frames.jsonlines";

/// Input and output locations plus switches for a conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
  /// the SALSA release (frame layer)
  pub salsa_path: String,
  /// the TIGER release (token stream)
  pub tiger_path: String,
  /// tab separated `doc_id, sentence_id` records
  pub mapping_path: String,
  /// destination of the document JSON lines
  pub output_path: String,
  /// if set, every extracted frame is also written here, one per line
  pub frames_path: Option<String>,
  /// if set, the lemma to frame-name inventory is written here
  pub lemmas_path: Option<String>,
  /// compare SALSA and TIGER tokens per sentence and warn on mismatches
  pub verify_tokens: bool,
}

impl Default for ConversionConfig {
  fn default() -> ConversionConfig {
    ConversionConfig {
      salsa_path: DEFAULT_SALSA_PATH.to_string(),
      tiger_path: DEFAULT_TIGER_PATH.to_string(),
      mapping_path: DEFAULT_MAPPING_PATH.to_string(),
      output_path: DEFAULT_OUTPUT_PATH.to_string(),
      frames_path: Some(DEFAULT_FRAMES_PATH.to_string()),
      lemmas_path: None,
      verify_tokens: false,
    }
  }
}

/// Counts gathered over a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
  /// documents written
  pub documents: usize,
  /// treebank sentences folded into documents
  pub sentences: usize,
  /// frames written, across all documents
  pub frames: usize,
  /// split ids resolved via their whole word
  pub approximated_refs: usize,
  /// sentences whose SALSA and TIGER tokens differ (only with `verify_tokens`)
  pub token_mismatches: usize,
}

/// Frames of the semantic layer, keyed by sentence, with the words they were
/// annotated on
#[derive(Debug, Default)]
pub struct SemanticLayer {
  order: Vec<SentenceId>,
  frames: HashMap<SentenceId, Vec<Frame>>,
  tokens: HashMap<SentenceId, Vec<String>>,
  /// split ids resolved via their whole word
  pub approximated: usize,
}

impl SemanticLayer {
  /// Resolve the frames of every annotated sentence
  pub fn extract(sentences: &[AnnotatedSentence]) -> Result<Self> {
    let mut layer = SemanticLayer::default();
    for sentence in sentences {
      let extraction = extract_frames(&sentence.frames, &sentence.graph)?;
      layer.approximated += extraction.approximated.len();
      if !layer.frames.contains_key(&sentence.id) {
        layer.order.push(sentence.id);
        layer.frames.insert(sentence.id, Vec::new());
      }
      if let Some(frames) = layer.frames.get_mut(&sentence.id) {
        frames.extend(extraction.frames);
      }
      layer.tokens.insert(sentence.id, sentence.tokens());
    }
    if layer.approximated > 0 {
      warn!(count = layer.approximated, "split ids were approximated by their whole word");
    }
    Ok(layer)
  }

  /// Every frame, in sentence order
  pub fn frames(&self) -> impl Iterator<Item = &Frame> {
    self
      .order
      .iter()
      .filter_map(move |id| self.frames.get(id))
      .flatten()
  }

  /// The frames of one sentence
  pub fn sentence_frames(&self, id: SentenceId) -> &[Frame] {
    self.frames.get(&id).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Remove and return the frames of one sentence
  pub fn take_sentence_frames(&mut self, id: SentenceId) -> Vec<Frame> {
    self.frames.remove(&id).unwrap_or_default()
  }

  /// Number of annotated sentences
  pub fn len(&self) -> usize { self.order.len() }

  /// Whether no sentence was annotated
  pub fn is_empty(&self) -> bool { self.order.is_empty() }

  /// For every target lemma, the names of the frames it evokes
  pub fn lemma_inventory(&self) -> BTreeMap<String, BTreeSet<String>> {
    let mut inventory: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for frame in self.frames() {
      for target in &frame.targets {
        inventory
          .entry(target.lemma.clone())
          .or_default()
          .insert(frame.name.clone());
      }
    }
    inventory
  }

  /// Count, and warn about, treebank sentences whose words differ from the frame
  /// layer's. Nothing is repaired.
  pub fn verify_tokens(&self, treebank: &[TokenizedSentence]) -> usize {
    let mut mismatches = 0;
    for sentence in treebank {
      if let Some(tokens) = self.tokens.get(&sentence.id) {
        if *tokens != sentence.tokens {
          mismatches += 1;
          warn!(sentence = sentence.id, salsa = ?tokens, tiger = ?sentence.tokens, "token mismatch");
        }
      }
    }
    mismatches
  }
}

#[derive(Serialize)]
struct LemmaFrames<'a> {
  lemma: &'a str,
  frames: Vec<&'a str>,
}

/// Serialize each item as one line of JSON
pub fn write_json_lines<'a, T, I, W>(items: I, writer: &mut W) -> Result<usize>
where
  T: Serialize + 'a,
  I: IntoIterator<Item = &'a T>,
  W: Write,
{
  let mut count = 0;
  for item in items {
    serde_json::to_writer(&mut *writer, item)?;
    writer.write_all(b"\n")?;
    count += 1;
  }
  Ok(count)
}

/// Write the lemma inventory as `{"lemma": .., "frames": [..]}` lines
pub fn write_lemma_inventory<W: Write>(layer: &SemanticLayer, writer: &mut W) -> Result<usize> {
  let inventory = layer.lemma_inventory();
  let records: Vec<LemmaFrames> = inventory
    .iter()
    .map(|(lemma, frames)| LemmaFrames {
      lemma,
      frames: frames.iter().map(String::as_str).collect(),
    })
    .collect();
  write_json_lines(&records, writer)
}

/// Pair every treebank sentence with its frames and group the result by document
pub fn group_documents(
  layer: &mut SemanticLayer,
  treebank: Vec<TokenizedSentence>,
  mapping: &DocumentMapping,
) -> Result<DocumentGroups> {
  let sentences = treebank
    .into_iter()
    .map(|sentence| DocumentSentence {
      id: sentence.id,
      frames: layer.take_sentence_frames(sentence.id),
      tokens: sentence.tokens,
      pos: sentence.pos,
    })
    .collect::<Vec<_>>();
  DocumentGroups::from_mapping(sentences, mapping)
}

/// Assemble every document and write it as one JSON line, returning the report
/// counts for documents, sentences and frames
pub fn write_documents<W: Write>(groups: DocumentGroups, writer: &mut W) -> Result<ConversionReport> {
  let mut report = ConversionReport::default();
  for document in groups.assemble() {
    let document = document?;
    serde_json::to_writer(&mut *writer, &document)?;
    writer.write_all(b"\n")?;
    report.documents += 1;
    report.sentences += document.sentences.len();
    report.frames += document.frames.len();
  }
  Ok(report)
}

fn create_buffered(path: &str) -> Result<BufWriter<File>> {
  Ok(BufWriter::with_capacity(BUFFER_CAPACITY, File::create(path)?))
}

/// Run a full conversion as configured
pub fn convert(config: &ConversionConfig) -> Result<ConversionReport> {
  let annotated = salsa::read(&config.salsa_path)?;
  let mut layer = SemanticLayer::extract(&annotated)?;
  drop(annotated);

  if let Some(ref frames_path) = config.frames_path {
    let mut frames_writer = create_buffered(frames_path)?;
    let written = write_json_lines(layer.frames(), &mut frames_writer)?;
    frames_writer.flush()?;
    info!(path = %frames_path, frames = written, "wrote frame inventory");
  }
  if let Some(ref lemmas_path) = config.lemmas_path {
    let mut lemmas_writer = create_buffered(lemmas_path)?;
    let written = write_lemma_inventory(&layer, &mut lemmas_writer)?;
    lemmas_writer.flush()?;
    info!(path = %lemmas_path, lemmas = written, "wrote lemma inventory");
  }

  let mapping = DocumentMapping::read(&config.mapping_path)?;
  let treebank = tiger::read(&config.tiger_path)?;
  let token_mismatches = if config.verify_tokens {
    layer.verify_tokens(&treebank)
  } else {
    0
  };

  let groups = group_documents(&mut layer, treebank, &mapping)?;
  info!(documents = groups.len(), "assembling documents");
  let mut out_writer = create_buffered(&config.output_path)?;
  let mut report = write_documents(groups, &mut out_writer)?;
  out_writer.flush()?;

  report.approximated_refs = layer.approximated;
  report.token_mismatches = token_mismatches;
  info!(
    path = %config.output_path,
    documents = report.documents,
    sentences = report.sentences,
    frames = report.frames,
    "conversion finished"
  );
  Ok(report)
}
