//! The host rendering engine as an explicit capability.
//!
//! Everything the detection pipeline knows about the live page goes through
//! [`RenderSurface`]: attribute reads, child enumeration, geometry queries,
//! point-to-element resolution, and shadow tree access. Passing the surface
//! in (rather than reaching for an ambient document) keeps the pipeline
//! deterministic and testable against [`crate::MockSurface`].

use thiserror::Error;

use crate::geometry::{Rect, Viewport};

/// Opaque handle to a node in the host's rendered tree. The pipeline never
/// mutates the tree behind it.
pub type NodeId = u64;

/// Discriminates the node types the pipeline cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Root of an encapsulated sub-tree attached to a host element. Not part
    /// of the host's light-tree children; reachable only via
    /// [`RenderSurface::shadow_root`].
    ShadowRoot,
}

/// Host-oracle failures.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The node handle no longer resolves to a live node.
    #[error("node {0} is no longer attached")]
    NodeGone(NodeId),

    /// An element-only query was issued against a non-element node.
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// A text-only query was issued against a non-text node.
    #[error("node {0} is not a text node")]
    NotAText(NodeId),

    /// The document itself is gone; nothing can be scanned.
    #[error("document unavailable")]
    DocumentUnavailable,

    /// Opaque failure inside the host engine.
    #[error("surface backend error: {0}")]
    Backend(String),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Read-only oracle over a live rendered document tree.
///
/// Geometry is in viewport pixel coordinates. Results are only guaranteed
/// consistent within one uninterrupted scan; the surface must not be mutated
/// while a scan is running.
pub trait RenderSurface {
    /// Root element of the main document tree.
    fn document_root(&self) -> SurfaceResult<NodeId>;

    fn kind(&self, node: NodeId) -> SurfaceResult<NodeKind>;

    /// Tag name of an element, case preserved as reported by the host.
    fn tag_name(&self, element: NodeId) -> SurfaceResult<String>;

    /// All attributes of an element as `(name, value)` pairs, in the order
    /// the host reports them.
    fn attributes(&self, element: NodeId) -> SurfaceResult<Vec<(String, String)>>;

    /// Value of a single attribute, if present.
    fn attribute(&self, element: NodeId, name: &str) -> SurfaceResult<Option<String>> {
        Ok(self
            .attributes(element)?
            .into_iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value))
    }

    /// Light-tree children in document order. Shadow content is reachable
    /// only through [`RenderSurface::shadow_root`].
    fn children(&self, node: NodeId) -> SurfaceResult<Vec<NodeId>>;

    /// Composed-tree parent: a shadow root's parent is its host element.
    /// `None` for the document root.
    fn parent(&self, node: NodeId) -> SurfaceResult<Option<NodeId>>;

    /// Root of the shadow tree hosted by this element, if any.
    fn shadow_root(&self, element: NodeId) -> SurfaceResult<Option<NodeId>>;

    /// Content of a text node.
    fn text(&self, text_node: NodeId) -> SurfaceResult<String>;

    /// All client rects of an element. Wrapped inline content renders as
    /// several disjoint boxes; unrendered elements report none.
    fn client_rects(&self, element: NodeId) -> SurfaceResult<Vec<Rect>>;

    /// Bounding rect of any node, `None` when it generates no box.
    fn bounding_rect(&self, node: NodeId) -> SurfaceResult<Option<Rect>>;

    /// Topmost rendered element of `scope`'s tree at `(x, y)`. `scope` must
    /// be the document root or a shadow root. `None` when nothing of that
    /// tree paints there or the point is outside the viewport.
    fn element_from_point(&self, scope: NodeId, x: f64, y: f64) -> SurfaceResult<Option<NodeId>>;

    /// Raw outer markup of an element.
    fn outer_html(&self, element: NodeId) -> SurfaceResult<String>;

    fn viewport(&self) -> SurfaceResult<Viewport>;

    fn title(&self) -> SurfaceResult<String>;

    /// Whether `ancestor` strictly contains `node` in the composed tree
    /// (shadow content counts as contained by its host).
    fn contains(&self, ancestor: NodeId, node: NodeId) -> SurfaceResult<bool> {
        let mut current = node;
        while let Some(parent) = self.parent(current)? {
            if parent == ancestor {
                return Ok(true);
            }
            current = parent;
        }
        Ok(false)
    }

    /// Concatenated text of the element's light subtree, in document order.
    fn text_content(&self, element: NodeId) -> SurfaceResult<String> {
        let mut out = String::new();
        let mut stack = vec![element];
        while let Some(node) = stack.pop() {
            match self.kind(node)? {
                NodeKind::Text => out.push_str(&self.text(node)?),
                NodeKind::Element => {
                    for child in self.children(node)?.into_iter().rev() {
                        stack.push(child);
                    }
                }
                NodeKind::ShadowRoot => {}
            }
        }
        Ok(out)
    }
}
