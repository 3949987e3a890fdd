//! Error types shared by the corpus readers, the assembler and the converter
use libxml::parser::XmlParseError;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Everything that can abort a conversion run
#[derive(Error, Debug)]
pub enum ConversionError {
  /// libxml could not parse an input file
  #[error("failed to parse XML from {path}: {cause:?}")]
  Xml {
    /// path of the offending file
    path: String,
    /// the libxml parse error
    cause: XmlParseError,
  },

  /// An XPath query could not be set up or evaluated
  #[error("XPath evaluation failed for {0}")]
  XPath(String),

  /// A required XML attribute was absent
  #[error("<{element}> is missing required attribute `{attribute}`")]
  MissingAttribute {
    /// element name
    element: String,
    /// attribute name
    attribute: &'static str,
  },

  /// An id did not follow the corpus id grammar
  #[error("malformed {kind} id `{id}`")]
  InvalidId {
    /// what sort of id was expected (sentence, terminal, ...)
    kind: &'static str,
    /// the raw id
    id: String,
  },

  /// A line of the sentence to document mapping could not be read
  #[error("malformed document mapping record at line {line}: {reason}")]
  InvalidMapping {
    /// 1-based line number
    line: u64,
    /// what went wrong
    reason: String,
  },

  /// A sentence has no entry in the sentence to document mapping
  #[error("sentence {0} has no document in the sentence to document mapping")]
  UnmappedSentence(u64),

  /// The token and part-of-speech sequences of a sentence differ in length
  #[error("sentence has {tokens} tokens but {tags} part-of-speech tags")]
  TokenPosMismatch {
    /// number of tokens
    tokens: usize,
    /// number of tags
    tags: usize,
  },

  /// A frame reference points past the end of its sentence
  #[error("ref {reference} of frame {frame} exceeds the {tokens} tokens of sentence {sentence}")]
  RefOutOfRange {
    /// frame id
    frame: String,
    /// sentence id
    sentence: u64,
    /// the sentence-local ref
    reference: usize,
    /// token count of the sentence
    tokens: usize,
  },

  /// Filesystem error
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// Tab separated input error
  #[error("TSV error: {0}")]
  Csv(#[from] csv::Error),

  /// JSON serialization error
  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

impl ConversionError {
  /// Wrap a libxml parse failure with the path it happened on
  pub fn xml(path: &str, cause: XmlParseError) -> Self {
    ConversionError::Xml {
      path: path.to_string(),
      cause,
    }
  }

  /// Shorthand for a missing attribute on `element`
  pub fn missing_attribute(element: impl Into<String>, attribute: &'static str) -> Self {
    ConversionError::MissingAttribute {
      element: element.into(),
      attribute,
    }
  }

  /// Shorthand for a malformed id
  pub fn invalid_id(kind: &'static str, id: impl Into<String>) -> Self {
    ConversionError::InvalidId {
      kind,
      id: id.into(),
    }
  }
}
