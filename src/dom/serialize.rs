//! HTML serialization of arena nodes through html5ever's serializer.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};
use crate::error::Result;

/// A node paired with its tree, ready for `html5ever::serialize`.
pub struct SerializableNode<'a> {
    dom: &'a ArenaDom,
    id: ArenaNodeId,
}

enum SerializeOp {
    Open(ArenaNodeId),
    Close(ArenaNodeId),
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let mut ops: Vec<SerializeOp> = match traversal_scope {
            TraversalScope::IncludeNode => vec![SerializeOp::Open(self.id)],
            TraversalScope::ChildrenOnly(_) => self
                .dom
                .children(self.id)
                .map(SerializeOp::Open)
                .collect(),
        };
        ops.reverse();

        while let Some(op) = ops.pop() {
            match op {
                SerializeOp::Open(id) => {
                    let Some(node) = self.dom.get(id) else {
                        continue;
                    };
                    match &node.data {
                        ArenaNodeData::Element { name, attrs, .. } => {
                            serializer.start_elem(
                                name.clone(),
                                attrs.iter().map(|a| (&a.name, a.value.as_str())),
                            )?;
                            ops.push(SerializeOp::Close(id));
                            let mut children: Vec<_> =
                                self.dom.children(id).map(SerializeOp::Open).collect();
                            children.reverse();
                            ops.extend(children);
                        }
                        ArenaNodeData::Text(text) => serializer.write_text(text)?,
                        ArenaNodeData::Comment(text) => serializer.write_comment(text)?,
                        ArenaNodeData::Doctype { name } => serializer.write_doctype(name)?,
                        ArenaNodeData::Document => {
                            let mut children: Vec<_> =
                                self.dom.children(id).map(SerializeOp::Open).collect();
                            children.reverse();
                            ops.extend(children);
                        }
                    }
                }
                SerializeOp::Close(id) => {
                    if let Some(ArenaNodeData::Element { name, .. }) =
                        self.dom.get(id).map(|n| &n.data)
                    {
                        serializer.end_elem(name.clone())?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl ArenaDom {
    fn serialize_scoped(&self, id: ArenaNodeId, scope: TraversalScope) -> Result<String> {
        let mut bytes = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: scope,
            ..Default::default()
        };
        serialize(&mut bytes, &SerializableNode { dom: self, id }, opts)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Markup of the node itself and everything inside it.
    pub fn outer_html(&self, id: ArenaNodeId) -> Result<String> {
        self.serialize_scoped(id, TraversalScope::IncludeNode)
    }

    /// Markup of the node's children.
    pub fn inner_html(&self, id: ArenaNodeId) -> Result<String> {
        self.serialize_scoped(id, TraversalScope::ChildrenOnly(None))
    }

    /// The parsed fragment serialized back to a string.
    ///
    /// Comments that followed a stray `</body>` or `</html>` are parsed as
    /// siblings of the body or the root element. They are written after the
    /// body content, so any text that followed them ends up ahead of them.
    pub fn serialize_content(&self) -> Result<String> {
        let root = self.content_root();
        let mut out = self.inner_html(root)?;

        let mut node = root;
        while node.is_some() && node != self.document() {
            let Some(current) = self.get(node) else {
                break;
            };
            let mut sibling = current.next_sibling;
            while let Some(next) = self.get(sibling) {
                if matches!(next.data, ArenaNodeData::Comment(_)) {
                    out.push_str(&self.outer_html(sibling)?);
                }
                sibling = next.next_sibling;
            }
            node = current.parent;
        }
        Ok(out)
    }
}
