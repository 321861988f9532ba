//! # Keyword Compass Core
//!
//! Pure, deterministic analysis engine for keyword research exports:
//! signal normalization, opportunity scoring, TF-IDF topic clustering,
//! content-idea synthesis, and population insights.
//!
//! This crate contains no I/O, no async runtime, and no shared mutable
//! state. Every public function is a deterministic transform over
//! in-memory collections; re-running a pipeline on unchanged input and
//! parameters yields byte-identical output. Ingestion (file parsing) and
//! reporting live in the `keyword-compass` app crate.

pub mod cluster;
pub mod error;
pub mod ideas;
pub mod insights;
pub mod intent;
pub mod kmeans;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod score;
pub mod vectorize;
