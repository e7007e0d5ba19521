//! HTML parsing, querying and serialization.
//!
//! Content is parsed with html5ever into an arena tree ([`ArenaDom`]), queried
//! with compiled CSS selectors ([`Query`]) and written back out with
//! html5ever's serializer.
//!
//! # Example
//!
//! ```
//! use shortcodeless::dom::{parse_fragment, Query};
//!
//! let dom = parse_fragment(r#"<table class="scless_column"><tr><td>A</td></tr></table>"#);
//! let query = Query::parse("table.scless_column td").unwrap();
//!
//! let cells = dom.select(dom.content_root(), &query);
//! assert_eq!(cells.len(), 1);
//! assert_eq!(dom.inner_html(cells[0]).unwrap(), "A");
//! ```

mod arena;
mod element_ref;
mod query;
mod serialize;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter};
pub use element_ref::{ContentSelectors, ElementRef};
pub use query::Query;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse an HTML fragment (not a full document).
///
/// The fragment is wrapped in an explicit `<body>` so that body-level tags
/// such as `<style>` stay where the author put them instead of being hoisted
/// into `<head>`. Malformed markup is recovered the way a browser would.
pub fn parse_fragment(html: &str) -> ArenaDom {
    let wrapped = format!("<html><head></head><body>{html}</body></html>");
    let sink = ArenaSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(wrapped.as_bytes())
        .into_dom()
}

impl ArenaDom {
    /// The `<body>` element holding a parsed fragment.
    ///
    /// Falls back to the document node for trees that were built by hand.
    pub fn content_root(&self) -> ArenaNodeId {
        self.find_by_tag("body").unwrap_or_else(|| self.document())
    }
}
