//! Column layout rewriting.
//!
//! Visual editors lay out columns as a one-row table so authors get resize
//! handles. On the public page those tables become flexible divs:
//!
//! ```text
//! <table class="scless_column"><tr><td style="width:30%">A</td>...</tr></table>
//! ```
//!
//! turns into
//!
//! ```text
//! <style id="scless_column">.scless_column_1 > div:nth-of-type(1) { width:30% }...</style>
//! <div class="scless_column scless_column_1"><div><p>A</p></div>...</div>
//! ```
//!
//! Each cell's inline style moves into a rule scoped to its container, so
//! several column groups on one page never share widths.

mod assets;
mod config;
mod style;
mod transformer;

pub use assets::{
    AssetSink, COLUMNS_CSS, COLUMNS_STYLESHEET, CollectedAssets, NoopAssets, StylesheetAsset,
};
pub use config::{ColumnsConfig, DEFAULT_MAX_CONTAINERS, MARKER_CLASS, STYLE_ELEMENT_ID};
pub use style::{ScopedStyleRule, StyleBlock, escape_attr};
pub use transformer::{ColumnTransformer, ContainerSummary, TransformReport, Transformed};

use crate::error::Result;

/// Rewrite `content` with the default configuration.
///
/// # Example
///
/// ```
/// let out = shortcodeless::transform("<p>No columns here</p>").unwrap();
/// assert_eq!(out, r#"<style id="scless_column"></style><p>No columns here</p>"#);
/// ```
pub fn transform(content: &str) -> Result<String> {
    ColumnTransformer::new(ColumnsConfig::default())?.transform(content)
}
