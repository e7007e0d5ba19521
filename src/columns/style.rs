//! Scoped per-column style rules and the stylesheet block that carries them.

use std::borrow::Cow;
use std::fmt;

/// One column's inline style, re-targeted at its position in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedStyleRule {
    /// Container class the rule is scoped to, e.g. `scless_column_2`.
    pub container_class: String,
    /// 1-based position among the container's column divs.
    pub position: usize,
    /// Raw declarations from the cell's `style` attribute.
    pub declarations: String,
}

impl ScopedStyleRule {
    pub fn new(container_class: impl Into<String>, position: usize, declarations: &str) -> Self {
        Self {
            container_class: container_class.into(),
            position,
            declarations: declarations.to_string(),
        }
    }
}

impl fmt::Display for ScopedStyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ".{} > div:nth-of-type({}) {{ {} }}",
            self.container_class,
            self.position,
            escape_attr(&self.declarations)
        )
    }
}

/// The `<style>` element emitted ahead of the rewritten content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleBlock {
    pub id: String,
    pub rules: Vec<ScopedStyleRule>,
}

impl StyleBlock {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rules: Vec::new(),
        }
    }

    pub fn push(&mut self, rule: ScopedStyleRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for StyleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<style id=\"{}\">", self.id)?;
        for rule in &self.rules {
            write!(f, "{rule}")?;
        }
        f.write_str("</style>")
    }
}

/// Escape a value for use inside a quoted HTML attribute.
///
/// Applied to declarations as well, so a style value can never close the
/// surrounding `<style>` element.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_shape() {
        let rule = ScopedStyleRule::new("scless_column_1", 2, "width:70%");
        assert_eq!(
            rule.to_string(),
            ".scless_column_1 > div:nth-of-type(2) { width:70% }"
        );
    }

    #[test]
    fn test_empty_declarations() {
        let rule = ScopedStyleRule::new("scless_column_4", 1, "");
        assert_eq!(rule.to_string(), ".scless_column_4 > div:nth-of-type(1) {  }");
    }

    #[test]
    fn test_declarations_are_escaped() {
        let rule = ScopedStyleRule::new(
            "scless_column_1",
            1,
            "font-family:\"Open Sans\";</style><script>",
        );
        assert_eq!(
            rule.to_string(),
            ".scless_column_1 > div:nth-of-type(1) { font-family:&quot;Open Sans&quot;;&lt;/style&gt;&lt;script&gt; }"
        );
    }

    #[test]
    fn test_escape_attr_borrows_clean_input() {
        assert!(matches!(escape_attr("width:50%;"), Cow::Borrowed(_)));
        assert_eq!(escape_attr("a'b&c"), "a&#039;b&amp;c");
    }

    #[test]
    fn test_block_concatenates_in_order() {
        let mut block = StyleBlock::new("scless_column");
        assert!(block.is_empty());
        assert_eq!(block.to_string(), r#"<style id="scless_column"></style>"#);

        block.push(ScopedStyleRule::new("scless_column_1", 1, "width:30%"));
        block.push(ScopedStyleRule::new("scless_column_1", 2, "width:70%"));

        assert_eq!(block.len(), 2);
        assert_eq!(
            block.to_string(),
            "<style id=\"scless_column\">\
             .scless_column_1 > div:nth-of-type(1) { width:30% }\
             .scless_column_1 > div:nth-of-type(2) { width:70% }\
             </style>"
        );
    }
}
