//! Compiled CSS selector queries over an [`ArenaDom`].

use cssparser::{Parser, ParserInput};
use selectors::context::{MatchingContext, SelectorCaches};
use selectors::matching::{MatchingForInvalidation, MatchingMode, NeedsSelectorFlags};
use selectors::parser::{ParseRelative, Selector, SelectorList};

use super::arena::{ArenaDom, ArenaNodeId};
use super::element_ref::{ContentSelectors, ElementRef};
use crate::error::{Error, Result};

/// A parsed selector list, e.g. `table.scless_column` or `table tr`.
#[derive(Debug, Clone)]
pub struct Query {
    selectors: Vec<Selector<ContentSelectors>>,
}

impl Query {
    /// Parse a comma-separated selector list.
    pub fn parse(source: &str) -> Result<Self> {
        let mut input = ParserInput::new(source);
        let mut parser = Parser::new(&mut input);
        let list = SelectorList::parse(&ContentSelectors, &mut parser, ParseRelative::No)
            .map_err(|e| Error::InvalidSelector {
                selector: source.to_string(),
                reason: format!("{:?}", e.kind),
            })?;

        Ok(Self {
            selectors: list.slice().to_vec(),
        })
    }

    /// Selector for elements of `tag` carrying `class`.
    pub fn tag_with_class(tag: &str, class: &str) -> Result<Self> {
        Self::parse(&format!("{tag}.{class}"))
    }

    /// Check whether the element `id` matches any selector in the list.
    pub fn matches(&self, dom: &ArenaDom, id: ArenaNodeId) -> bool {
        if !dom.is_element(id) {
            return false;
        }
        let elem = ElementRef::new(dom, id);
        let mut caches = SelectorCaches::default();
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            &mut caches,
            selectors::context::QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );

        self.selectors.iter().any(|selector| {
            selectors::matching::matches_selector(selector, 0, None, &elem, &mut context)
        })
    }
}

impl ArenaDom {
    /// All elements under `root` matching `query`, in document order.
    pub fn select(&self, root: ArenaNodeId, query: &Query) -> Vec<ArenaNodeId> {
        self.descendants(root)
            .filter(|&id| query.matches(self, id))
            .collect()
    }

    /// The first element under `root` matching `query`, in document order.
    pub fn select_first(&self, root: ArenaNodeId, query: &Query) -> Option<ArenaNodeId> {
        self.descendants(root).find(|&id| query.matches(self, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    #[test]
    fn test_tag_with_class() {
        let dom = parse_fragment(
            r#"<table class="plain"></table><table class="scless_column"></table>"#,
        );
        let query = Query::tag_with_class("table", "scless_column").unwrap();

        let found = dom.select(dom.content_root(), &query);
        assert_eq!(found.len(), 1);
        assert_eq!(dom.get_attr(found[0], "class"), Some("scless_column"));
    }

    #[test]
    fn test_class_among_several() {
        let dom = parse_fragment(r#"<table class="wide scless_column striped"></table>"#);
        let query = Query::parse("table.scless_column").unwrap();

        assert!(dom.select_first(dom.content_root(), &query).is_some());
    }

    #[test]
    fn test_descendant_selector() {
        let dom = parse_fragment("<table><tr><td>A</td><td>B</td></tr></table>");
        let query = Query::parse("table td").unwrap();

        let cells = dom.select(dom.content_root(), &query);
        assert_eq!(cells.len(), 2);
    }

    #[test]
    fn test_child_selector() {
        let dom = parse_fragment("<div><p>Direct</p><span><p>Nested</p></span></div>");
        let query = Query::parse("div > p").unwrap();

        assert_eq!(dom.select(dom.content_root(), &query).len(), 1);
    }

    #[test]
    fn test_document_order() {
        let dom = parse_fragment(concat!(
            r#"<div class="x" id="a"><div class="x" id="b"></div></div>"#,
            r#"<div class="x" id="c"></div>"#,
        ));
        let query = Query::parse(".x").unwrap();

        let ids: Vec<_> = dom
            .select(dom.content_root(), &query)
            .into_iter()
            .map(|id| dom.element_id(id).unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_select_is_scoped_to_root() {
        let dom = parse_fragment(r#"<p class="x"></p><div><p class="x"></p></div>"#);
        let div = dom.find_by_tag("div").unwrap();

        let query = Query::parse("p.x").unwrap();
        assert_eq!(dom.select(div, &query).len(), 1);
    }

    #[test]
    fn test_invalid_selector() {
        let err = Query::parse("table..broken").unwrap_err();
        assert!(matches!(err, Error::InvalidSelector { .. }));
    }
}
