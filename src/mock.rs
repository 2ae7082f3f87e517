//! In-memory render surface for deterministic tests.
//!
//! [`MockSurface`] backs the pipeline with a hand-built tree instead of a
//! live rendering engine. Hit testing resolves to the last element in
//! document order (within the queried tree scope) whose client rects cover
//! the point, which models "later paints on top" without a compositor.

use std::collections::HashMap;

use crate::geometry::{Rect, Viewport};
use crate::surface::{NodeId, NodeKind, RenderSurface, SurfaceError, SurfaceResult};

#[derive(Debug, Clone)]
struct MockElement {
    tag: String,
    attrs: Vec<(String, String)>,
    rects: Vec<Rect>,
    children: Vec<NodeId>,
    shadow: Option<NodeId>,
}

#[derive(Debug, Clone)]
struct MockText {
    content: String,
    rect: Option<Rect>,
}

#[derive(Debug, Clone)]
enum MockNode {
    Element(MockElement),
    Text(MockText),
    ShadowRoot { children: Vec<NodeId> },
}

/// Deterministic [`RenderSurface`] backed by a hand-built tree.
///
/// A new surface starts with a root element covering the whole viewport, the
/// way a rendered `body` would.
#[derive(Debug, Clone)]
pub struct MockSurface {
    nodes: Vec<MockNode>,
    parents: HashMap<NodeId, NodeId>,
    root: NodeId,
    viewport: Viewport,
    title: String,
}

impl MockSurface {
    pub fn new(width: f64, height: f64) -> Self {
        let mut surface = Self {
            nodes: Vec::new(),
            parents: HashMap::new(),
            root: 0,
            viewport: Viewport { width, height },
            title: String::new(),
        };
        surface.root = surface.push(MockNode::Element(MockElement {
            tag: "body".to_string(),
            attrs: Vec::new(),
            rects: vec![Rect::new(0.0, 0.0, width, height)],
            children: Vec::new(),
            shadow: None,
        }));
        surface
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Append a new element under `parent` (an element or a shadow root).
    pub fn element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.push(MockNode::Element(MockElement {
            tag: tag.to_string(),
            attrs: Vec::new(),
            rects: Vec::new(),
            children: Vec::new(),
            shadow: None,
        }));
        self.link(parent, id);
        id
    }

    /// Append a text node under `parent`, optionally with its own box.
    pub fn text_node(&mut self, parent: NodeId, content: &str, rect: Option<Rect>) -> NodeId {
        let id = self.push(MockNode::Text(MockText {
            content: content.to_string(),
            rect,
        }));
        self.link(parent, id);
        id
    }

    /// Attach a shadow tree to `host` and return its root.
    pub fn attach_shadow(&mut self, host: NodeId) -> NodeId {
        let id = self.push(MockNode::ShadowRoot {
            children: Vec::new(),
        });
        if let Some(MockNode::Element(element)) = self.nodes.get_mut(host as usize) {
            element.shadow = Some(id);
        }
        self.parents.insert(id, host);
        id
    }

    pub fn set_attr(&mut self, element: NodeId, name: &str, value: &str) {
        if let Some(MockNode::Element(el)) = self.nodes.get_mut(element as usize) {
            el.attrs.push((name.to_string(), value.to_string()));
        }
    }

    pub fn add_rect(&mut self, element: NodeId, rect: Rect) {
        if let Some(MockNode::Element(el)) = self.nodes.get_mut(element as usize) {
            el.rects.push(rect);
        }
    }

    fn push(&mut self, node: MockNode) -> NodeId {
        self.nodes.push(node);
        (self.nodes.len() - 1) as NodeId
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        match self.nodes.get_mut(parent as usize) {
            Some(MockNode::Element(el)) => el.children.push(child),
            Some(MockNode::ShadowRoot { children }) => children.push(child),
            _ => {}
        }
        self.parents.insert(child, parent);
    }

    fn get(&self, node: NodeId) -> SurfaceResult<&MockNode> {
        self.nodes
            .get(node as usize)
            .ok_or(SurfaceError::NodeGone(node))
    }

    fn as_element(&self, node: NodeId) -> SurfaceResult<&MockElement> {
        match self.get(node)? {
            MockNode::Element(el) => Ok(el),
            _ => Err(SurfaceError::NotAnElement(node)),
        }
    }

    /// Last element in `scope`'s tree, document order, whose rects cover the
    /// point. Nested shadow trees are separate scopes and are not descended.
    fn hit_test(&self, scope: NodeId, x: f64, y: f64) -> SurfaceResult<Option<NodeId>> {
        if x < 0.0 || y < 0.0 || x > self.viewport.width || y > self.viewport.height {
            return Ok(None);
        }
        let mut hit = None;
        let mut stack = vec![scope];
        while let Some(node) = stack.pop() {
            match self.get(node)? {
                MockNode::Element(el) => {
                    if el.rects.iter().any(|rect| rect.contains(x, y)) {
                        hit = Some(node);
                    }
                    for child in el.children.iter().rev() {
                        stack.push(*child);
                    }
                }
                MockNode::ShadowRoot { children } if node == scope => {
                    for child in children.iter().rev() {
                        stack.push(*child);
                    }
                }
                _ => {}
            }
        }
        Ok(hit)
    }

    fn write_outer_html(&self, node: NodeId, out: &mut String) -> SurfaceResult<()> {
        match self.get(node)? {
            MockNode::Text(text) => out.push_str(&text.content),
            MockNode::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
                out.push('>');
                for child in &el.children {
                    self.write_outer_html(*child, out)?;
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
            MockNode::ShadowRoot { .. } => {}
        }
        Ok(())
    }
}

impl RenderSurface for MockSurface {
    fn document_root(&self) -> SurfaceResult<NodeId> {
        Ok(self.root)
    }

    fn kind(&self, node: NodeId) -> SurfaceResult<NodeKind> {
        Ok(match self.get(node)? {
            MockNode::Element(_) => NodeKind::Element,
            MockNode::Text(_) => NodeKind::Text,
            MockNode::ShadowRoot { .. } => NodeKind::ShadowRoot,
        })
    }

    fn tag_name(&self, element: NodeId) -> SurfaceResult<String> {
        Ok(self.as_element(element)?.tag.clone())
    }

    fn attributes(&self, element: NodeId) -> SurfaceResult<Vec<(String, String)>> {
        Ok(self.as_element(element)?.attrs.clone())
    }

    fn children(&self, node: NodeId) -> SurfaceResult<Vec<NodeId>> {
        Ok(match self.get(node)? {
            MockNode::Element(el) => el.children.clone(),
            MockNode::ShadowRoot { children } => children.clone(),
            MockNode::Text(_) => Vec::new(),
        })
    }

    fn parent(&self, node: NodeId) -> SurfaceResult<Option<NodeId>> {
        self.get(node)?;
        Ok(self.parents.get(&node).copied())
    }

    fn shadow_root(&self, element: NodeId) -> SurfaceResult<Option<NodeId>> {
        Ok(self.as_element(element)?.shadow)
    }

    fn text(&self, text_node: NodeId) -> SurfaceResult<String> {
        match self.get(text_node)? {
            MockNode::Text(text) => Ok(text.content.clone()),
            _ => Err(SurfaceError::NotAText(text_node)),
        }
    }

    fn client_rects(&self, element: NodeId) -> SurfaceResult<Vec<Rect>> {
        Ok(self.as_element(element)?.rects.clone())
    }

    fn bounding_rect(&self, node: NodeId) -> SurfaceResult<Option<Rect>> {
        Ok(match self.get(node)? {
            MockNode::Text(text) => text.rect,
            MockNode::Element(el) => el.rects.first().copied(),
            MockNode::ShadowRoot { .. } => None,
        })
    }

    fn element_from_point(&self, scope: NodeId, x: f64, y: f64) -> SurfaceResult<Option<NodeId>> {
        self.hit_test(scope, x, y)
    }

    fn outer_html(&self, element: NodeId) -> SurfaceResult<String> {
        self.as_element(element)?;
        let mut out = String::new();
        self.write_outer_html(element, &mut out)?;
        Ok(out)
    }

    fn viewport(&self) -> SurfaceResult<Viewport> {
        Ok(self.viewport)
    }

    fn title(&self) -> SurfaceResult<String> {
        Ok(self.title.clone())
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
