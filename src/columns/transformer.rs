//! Marker table to column container rewrite.

use tracing::{debug, trace, warn};

use super::assets::{AssetSink, COLUMNS_STYLESHEET, NoopAssets};
use super::config::ColumnsConfig;
use super::style::{ScopedStyleRule, StyleBlock};
use crate::dom::{ArenaDom, ArenaNodeId, Attribute, Query, parse_fragment};
use crate::error::{Error, Result};

/// Tag of the elements that become columns.
const CELL_TAG: &str = "td";

/// One rewritten marker table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContainerSummary {
    pub id: u64,
    pub class: String,
    pub columns: usize,
}

/// What a transform call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TransformReport {
    /// Containers in processing order.
    pub containers: Vec<ContainerSummary>,
    /// Total scoped style rules emitted.
    pub rules: usize,
    /// Input was empty or whitespace and was returned untouched.
    pub skipped: bool,
}

/// Output of [`ColumnTransformer::transform_with_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub output: String,
    pub report: TransformReport,
}

/// Rewrites marker tables into div-based column containers.
///
/// Container identifiers are scoped to one call: every call numbers its
/// containers from [`ColumnsConfig::initial_id`]. Callers that render several
/// fragments onto one page should give each call a distinct starting id.
///
/// # Example
///
/// ```
/// use shortcodeless::columns::{ColumnTransformer, ColumnsConfig};
///
/// let transformer = ColumnTransformer::new(ColumnsConfig::default()).unwrap();
/// let out = transformer
///     .transform(r#"<table class="scless_column"><tr><td style="width:40%">A</td></tr></table>"#)
///     .unwrap();
///
/// assert_eq!(
///     out,
///     "<style id=\"scless_column\">.scless_column_1 > div:nth-of-type(1) { width:40% }</style>\
///      <div class=\"scless_column scless_column_1\"><div><p>A</p></div></div>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ColumnTransformer {
    config: ColumnsConfig,
    marker: Query,
    row: Query,
}

impl ColumnTransformer {
    /// Validate `config` and compile the queries it implies.
    pub fn new(config: ColumnsConfig) -> Result<Self> {
        config.validate()?;
        let marker = Query::tag_with_class("table", &config.marker_class)?;
        let row = Query::parse("tr")?;
        Ok(Self {
            config,
            marker,
            row,
        })
    }

    pub fn config(&self) -> &ColumnsConfig {
        &self.config
    }

    /// Rewrite every marker table in `content` and prepend the style block.
    ///
    /// Empty or whitespace-only input is returned unchanged.
    pub fn transform(&self, content: &str) -> Result<String> {
        Ok(self.transform_with_report(content, &mut NoopAssets)?.output)
    }

    /// Like [`transform`](Self::transform), also reporting what was rewritten
    /// and announcing the column stylesheet to `assets`.
    pub fn transform_with_report(
        &self,
        content: &str,
        assets: &mut dyn AssetSink,
    ) -> Result<Transformed> {
        if content.trim().is_empty() {
            return Ok(Transformed {
                output: content.to_string(),
                report: TransformReport {
                    skipped: true,
                    ..Default::default()
                },
            });
        }

        assets.require_stylesheet(&COLUMNS_STYLESHEET);

        let mut dom = parse_fragment(content);
        let root = dom.content_root();
        let mut styles = StyleBlock::new(self.config.style_id.as_str());
        let mut containers = Vec::new();
        let mut container_id = self.config.initial_id;

        // Each pass consumes one marker table and creates none, so the loop
        // ends once every table, nested ones included, has been rewritten.
        while let Some(table) = dom.select_first(root, &self.marker) {
            if containers.len() >= self.config.max_containers {
                return Err(Error::DidNotConverge {
                    iterations: containers.len(),
                });
            }

            let summary = self.rewrite_table(&mut dom, table, container_id, &mut styles);
            debug!(
                container = summary.id,
                columns = summary.columns,
                "rewrote column table"
            );
            containers.push(summary);

            container_id = container_id.checked_add(1).ok_or_else(|| {
                Error::InvalidConfig("container identifier overflowed".to_string())
            })?;
        }

        if styles.is_empty() {
            trace!("no column rules emitted");
        }

        let body = dom.serialize_content()?;
        let report = TransformReport {
            containers,
            rules: styles.len(),
            skipped: false,
        };

        Ok(Transformed {
            output: format!("{styles}{body}"),
            report,
        })
    }

    /// Replace `table` with a container holding one div per cell of its
    /// first row, moving each cell's content across.
    fn rewrite_table(
        &self,
        dom: &mut ArenaDom,
        table: ArenaNodeId,
        container_id: u64,
        styles: &mut StyleBlock,
    ) -> ContainerSummary {
        let class = self.config.container_class(container_id);
        let container = dom.create_html_element(
            "div",
            vec![Attribute::new(
                "class",
                format!("{} {}", self.config.marker_class, class),
            )],
        );

        let mut columns = 0;
        match dom.select_first(table, &self.row) {
            Some(row) => {
                let children: Vec<_> = dom.element_children(row).collect();
                for cell in children {
                    if !dom.is_tag(cell, CELL_TAG) {
                        trace!(container = container_id, "skipping non-cell row child");
                        continue;
                    }
                    columns += 1;

                    let style = dom.get_attr(cell, "style").unwrap_or_default();
                    styles.push(ScopedStyleRule::new(class.as_str(), columns, style));

                    let column = dom.create_html_element("div", vec![]);
                    wrap_cell_content(dom, cell, column);
                    dom.append(container, column);
                    trace!(container = container_id, column = columns, "moved cell");
                }
            }
            None => warn!(
                container = container_id,
                "column table has no row, emitting an empty container"
            ),
        }

        dom.replace(table, container);

        ContainerSummary {
            id: container_id,
            class,
            columns,
        }
    }
}

/// Move the cell's content into `column`, inside a fresh `<p>` unless the
/// cell already contains a paragraph somewhere.
///
/// The check looks for any `<p>` in the cell, not whether the top level is
/// paragraph-wrapped, so mixed content such as `text<p>more</p>` is left
/// unwrapped.
fn wrap_cell_content(dom: &mut ArenaDom, cell: ArenaNodeId, column: ArenaNodeId) {
    if dom.has_descendant_element(cell, "p") {
        dom.move_children(cell, column);
    } else {
        let paragraph = dom.create_html_element("p", vec![]);
        dom.move_children(cell, paragraph);
        dom.append(column, paragraph);
    }
}
