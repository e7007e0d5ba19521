//! Front-end stylesheet the rewritten markup depends on.
//!
//! The transformer does not load anything itself. It tells an [`AssetSink`]
//! that the column stylesheet is needed, and the host page decides how to
//! deliver it.

use std::borrow::Cow;

use super::config::MARKER_CLASS;

/// A stylesheet the host must make available on the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StylesheetAsset {
    /// Registration handle, unique per asset.
    pub handle: &'static str,
    /// Path relative to the host's asset root.
    pub path: &'static str,
    /// Stylesheet body, for hosts that inline it.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub css: &'static str,
}

impl StylesheetAsset {
    /// Stylesheet body with the default marker class swapped for
    /// `marker_class`.
    pub fn css_for(&self, marker_class: &str) -> Cow<'static, str> {
        if marker_class == MARKER_CLASS {
            return Cow::Borrowed(self.css);
        }
        Cow::Owned(
            self.css
                .replace(&format!(".{MARKER_CLASS}"), &format!(".{marker_class}")),
        )
    }
}

/// Base layout for column containers: children share one flex row, and
/// per-column widths from the scoped rules take precedence.
///
/// Written against the default marker class; see [`StylesheetAsset::css_for`].
pub const COLUMNS_CSS: &str = "\
.scless_column {
\tdisplay: flex;
\tflex-wrap: nowrap;
\talign-items: stretch;
}
.scless_column > div {
\tflex: 1 1 auto;
\tmin-width: 0;
\tbox-sizing: border-box;
}
.scless_column > div + div {
\tmargin-left: 1.5em;
}
.scless_column > div > :first-child {
\tmargin-top: 0;
}
.scless_column > div > :last-child {
\tmargin-bottom: 0;
}
";

pub const COLUMNS_STYLESHEET: StylesheetAsset = StylesheetAsset {
    handle: "shortcodeless_columns",
    path: "css/columns.css",
    css: COLUMNS_CSS,
};

/// Receives asset requirements raised during a transform.
pub trait AssetSink {
    fn require_stylesheet(&mut self, asset: &StylesheetAsset);
}

/// Discards every requirement.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAssets;

impl AssetSink for NoopAssets {
    fn require_stylesheet(&mut self, _asset: &StylesheetAsset) {}
}

/// Records requirements, once per handle, in request order.
#[derive(Debug, Default, Clone)]
pub struct CollectedAssets {
    stylesheets: Vec<StylesheetAsset>,
}

impl CollectedAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stylesheets(&self) -> &[StylesheetAsset] {
        &self.stylesheets
    }

    pub fn is_empty(&self) -> bool {
        self.stylesheets.is_empty()
    }

    /// Every collected stylesheet as an inline `<style>` element, targeting
    /// containers marked with `marker_class`.
    pub fn inline_styles(&self, marker_class: &str) -> String {
        self.stylesheets
            .iter()
            .map(|asset| {
                format!(
                    "<style id=\"{}-css\">{}</style>",
                    asset.handle,
                    asset.css_for(marker_class)
                )
            })
            .collect()
    }
}

impl AssetSink for CollectedAssets {
    fn require_stylesheet(&mut self, asset: &StylesheetAsset) {
        if self.stylesheets.iter().any(|s| s.handle == asset.handle) {
            return;
        }
        tracing::trace!(handle = asset.handle, path = asset.path, "stylesheet required");
        self.stylesheets.push(*asset);
    }
}
