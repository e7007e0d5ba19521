//! # shortcodeless
//!
//! Converts editor column tables into div-based column layouts for
//! front-end rendering.
//!
//! A rich-text editor represents columns as a one-row table carrying the
//! `scless_column` class. This crate finds those tables, rewrites each one
//! into a container of divs, and moves every cell's inline style into a CSS
//! rule scoped to that container.
//!
//! ## Quick Start
//!
//! ```
//! let html = r#"<table class="scless_column"><tr><td style="width:30%">A</td><td style="width:70%">B</td></tr></table>"#;
//! let out = shortcodeless::transform(html).unwrap();
//!
//! assert!(out.starts_with(r#"<style id="scless_column">"#));
//! assert!(out.contains(".scless_column_1 > div:nth-of-type(2) { width:70% }"));
//! assert!(out.ends_with(
//!     r#"<div class="scless_column scless_column_1"><div><p>A</p></div><div><p>B</p></div></div>"#
//! ));
//! ```
//!
//! ## Configuration
//!
//! ```
//! use shortcodeless::{ColumnTransformer, ColumnsConfig};
//!
//! let transformer = ColumnTransformer::new(
//!     ColumnsConfig::default().with_initial_id(10),
//! ).unwrap();
//! let out = transformer
//!     .transform(r#"<table class="scless_column"><tr><td>A</td></tr></table>"#)
//!     .unwrap();
//! assert!(out.contains("scless_column_10"));
//! ```

pub mod columns;
pub mod dom;
pub mod error;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use columns::{ColumnTransformer, ColumnsConfig, TransformReport, Transformed, transform};
pub use error::{Error, Result};
