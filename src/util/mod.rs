//! Shared helpers that do not belong to a single pipeline stage
