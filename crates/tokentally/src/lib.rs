//! tokentally — count LLM tokens per file extension and report how much of a
//! 128K context window a directory would use.
//!
//! The pipeline is strictly one-way: [`walk`] enumerates candidates,
//! [`filter`] drops the unwanted ones, [`tokenize`] counts each file's text,
//! [`aggregate`] groups the counts by extension, and [`output`] prints the
//! report. [`scan`] drives the first four stages.

pub mod aggregate;
pub mod config;
pub mod filter;
pub mod output;
pub mod scan;
pub mod tokenize;
pub mod walk;
