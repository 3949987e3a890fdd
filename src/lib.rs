//! # salsa-tiger
//! Converts the SALSA frame-semantic layer and the TIGER treebank it annotates into
//! document-level JSON lines: reconstructed text, character spans per token, part
//! of speech tags, and frames whose targets and roles point at token indices.
//!
//! The pipeline stages, leaves first:
//! - [`graph`] resolves node references to the terminals they dominate
//! - [`frames`] turns annotated frames into frames over token indices
//! - [`detokenizer`] rebuilds text and token spans from tokens and tags
//! - [`document`] folds sentences into documents, remapping refs
//! - [`corpus`] and [`converter`] read the inputs and drive a run

#![deny(
  missing_docs,
  trivial_casts,
  trivial_numeric_casts,
  unused_import_braces,
  unused_qualifications
)]

pub mod converter;
pub mod corpus;
pub mod detokenizer;
pub mod document;
pub mod error;
pub mod frames;
pub mod graph;
pub mod util;

pub use crate::error::{ConversionError, Result};
