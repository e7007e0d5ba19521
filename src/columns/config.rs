//! Transformer configuration.

use crate::error::{Error, Result};

/// Class that marks an editor table as a column layout.
pub const MARKER_CLASS: &str = "scless_column";

/// `id` of the generated `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "scless_column";

/// Upper bound on containers rewritten in one call.
pub const DEFAULT_MAX_CONTAINERS: usize = 10_000;

/// Settings for a [`ColumnTransformer`](super::ColumnTransformer).
///
/// # Example
///
/// ```
/// use shortcodeless::columns::ColumnsConfig;
///
/// let config = ColumnsConfig::default().with_initial_id(7);
/// assert_eq!(config.container_class(7), "scless_column_7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnsConfig {
    /// Marker class on source tables; also the prefix of container classes.
    pub marker_class: String,
    /// `id` attribute of the emitted stylesheet block.
    pub style_id: String,
    /// Identifier given to the first container of each call.
    pub initial_id: u64,
    /// Containers processed before giving up with `DidNotConverge`.
    pub max_containers: usize,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            marker_class: MARKER_CLASS.to_string(),
            style_id: STYLE_ELEMENT_ID.to_string(),
            initial_id: 1,
            max_containers: DEFAULT_MAX_CONTAINERS,
        }
    }
}

impl ColumnsConfig {
    pub fn with_marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    pub fn with_style_id(mut self, id: impl Into<String>) -> Self {
        self.style_id = id.into();
        self
    }

    pub fn with_initial_id(mut self, id: u64) -> Self {
        self.initial_id = id;
        self
    }

    pub fn with_max_containers(mut self, max: usize) -> Self {
        self.max_containers = max;
        self
    }

    /// Class unique to container `id`, e.g. `scless_column_3`.
    pub fn container_class(&self, id: u64) -> String {
        format!("{}_{}", self.marker_class, id)
    }

    /// Reject settings that would produce unusable selectors or markup.
    pub fn validate(&self) -> Result<()> {
        if !is_css_identifier(&self.marker_class) {
            return Err(Error::InvalidConfig(format!(
                "marker class `{}` is not a valid CSS class name",
                self.marker_class
            )));
        }
        if self.style_id.is_empty()
            || self
                .style_id
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>' | '&'))
        {
            return Err(Error::InvalidConfig(format!(
                "style id `{}` cannot be used as an attribute value",
                self.style_id
            )));
        }
        if self.max_containers == 0 {
            return Err(Error::InvalidConfig(
                "max_containers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Conservative CSS identifier check: ASCII letters, digits, `-` and `_`,
/// not starting with a digit or `-` followed by a digit.
fn is_css_identifier(s: &str) -> bool {
    let bytes = s.as_bytes();
    let Some(&first) = bytes.first() else {
        return false;
    };
    if first.is_ascii_digit() {
        return false;
    }
    if first == b'-' && bytes.get(1).is_some_and(|b| b.is_ascii_digit()) {
        return false;
    }
    bytes
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
