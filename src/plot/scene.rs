//! Retained-mode scene graph.
//!
//! A [`Scene`] is an arena of [`Node`]s addressed by [`NodeId`]. Subtrees are
//! built detached as owned [`Element`] values and moved into the arena with
//! [`Scene::add_child`], which hands back the id of the inserted node so it
//! can still be mutated after insertion.

use std::fmt;

use indexmap::IndexMap;

use crate::utils::{escape_xml, format_number};

/// An attribute value, always stored as a string.
#[derive(Clone, Debug, PartialEq)]
pub struct Value(String);

impl Value {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value(format_number(value))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value(format_number(value as f64))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value(value.to_string())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value(value.to_string())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value(value.clone())
    }
}

impl From<svg::node::element::path::Data> for Value {
    fn from(data: svg::node::element::path::Data) -> Self {
        let value: svg::node::Value = data.into();
        Value(value.to_string())
    }
}

/// Parse a numeric attribute, `NaN` when it is unset or not a number.
fn number_attribute(attributes: &IndexMap<String, String>, name: &str) -> f64 {
    attributes
        .get(name)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// A detached element, not yet part of a [`Scene`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    content: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Element {
        Element {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// A `text` element. Text elements always serialize with an opening and
    /// closing tag, even when `content` is empty.
    pub fn text(content: impl Into<String>) -> Element {
        Element {
            tag: "text".to_string(),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn set<T: Into<Value>>(mut self, name: &str, value: T) -> Element {
        self.set_attribute(name, value);
        self
    }

    pub fn set_attribute<T: Into<Value>>(&mut self, name: &str, value: T) -> &mut Element {
        self.attributes.insert(name.to_string(), value.into().0);
        self
    }

    pub fn add(mut self, child: Element) -> Element {
        self.children.push(child);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Element {
        self.content = Some(content.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn get_number(&self, name: &str) -> f64 {
        number_attribute(&self.attributes, name)
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

/// Handle to a node stored in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A node owned by a [`Scene`].
#[derive(Clone, Debug, Default)]
pub struct Node {
    tag: String,
    attributes: IndexMap<String, String>,
    content: Option<String>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_attribute<T: Into<Value>>(&mut self, name: &str, value: T) -> &mut Node {
        self.attributes.insert(name.to_string(), value.into().0);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn get_number(&self, name: &str) -> f64 {
        number_attribute(&self.attributes, name)
    }

    /// Width attribute, `NaN` if it was never set.
    pub fn width(&self) -> f64 {
        self.get_number("width")
    }

    /// Height attribute, `NaN` if it was never set.
    pub fn height(&self) -> f64 {
        self.get_number("height")
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Node {
        self.content = Some(content.into());
        self
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena holding a single tree of nodes, rooted at [`Scene::root`].
#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    pub fn new(root: Element) -> Scene {
        let mut scene = Scene { nodes: vec![] };
        scene.insert(root);
        scene
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Move `element` (and its subtree) under `parent`, returning its id.
    ///
    /// Panics if `parent` did not come from this scene.
    pub fn add_child(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.insert(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn add_children<I>(&mut self, parent: NodeId, elements: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = Element>,
    {
        elements
            .into_iter()
            .map(|element| self.add_child(parent, element))
            .collect()
    }

    fn insert(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: element.tag,
            attributes: element.attributes,
            content: element.content,
            children: vec![],
        });
        for child in element.children {
            let child_id = self.insert(child);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// Detach every child of `id`. Detached nodes stay in the arena but are no
    /// longer serialized.
    pub fn clear_children(&mut self, id: NodeId) {
        self.nodes[id.0].children.clear();
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes below (and including) `id` with the given tag, in document order.
    pub fn find_all(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        let mut found = vec![];
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current.0];
            if node.tag == tag {
                found.push(current);
            }
            stack.extend(node.children.iter().rev());
        }
        found
    }

    pub fn serialize(&self) -> String {
        self.serialize_node(self.root())
    }

    pub fn serialize_node(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, 0, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        push_indent(out, depth);
        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in node.attributes.iter() {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_xml(value));
            out.push('"');
        }
        if node.children.is_empty() && node.content.is_none() {
            out.push_str(" />");
            return;
        }
        out.push('>');
        if let Some(content) = &node.content {
            out.push_str(&escape_xml(content));
        }
        if !node.children.is_empty() {
            out.push('\n');
            for child in node.children.iter() {
                self.write_node(*child, depth + 1, out);
                out.push('\n');
            }
            push_indent(out, depth);
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}
