// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! An arena-backed HTML tree standing in for the browser DOM.
//!
//! Every node lives in one big list owned by [HtmlDom] and is addressed by a
//! [NodeId]. Parents refer to their children by id, so a node can be moved
//! around (re-parented) without invalidating ids held elsewhere, e.g. by a
//! Content Model node that cached the element it was created from. Removed
//! nodes stay in the arena as garbage until the whole [HtmlDom] is dropped.

use serde::{Deserialize, Serialize};

use super::css_style::CssStyle;

/// Handle of a node inside an [HtmlDom].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node of every [HtmlDom].
    pub const ROOT: NodeId = NodeId(0);

    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    style: CssStyle,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            style: CssStyle::default(),
        }
    }

    /// Lower-cased tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        if name == "style" {
            return None;
        }
        self.attrs
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute. The `style` attribute is routed to [Element::style].
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "style" {
            self.style = CssStyle::parse(value);
        } else if let Some(existing) =
            self.attrs.iter_mut().find(|(n, _v)| *n == name)
        {
            existing.1 = value.to_owned();
        } else {
            self.attrs.push((name, value.to_owned()));
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        if name == "style" {
            self.style = CssStyle::default();
        } else {
            self.attrs.retain(|(n, _v)| n != name);
        }
    }

    pub fn style(&self) -> &CssStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut CssStyle {
        &mut self.style
    }

    pub fn class_list(&self) -> Vec<&str> {
        self.get_attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(&class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.get_attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_owned(),
        };
        self.set_attr("class", &classes);
    }

    /// `data-*` attributes keyed by their camelCase dataset name.
    pub fn dataset(&self) -> Vec<(String, String)> {
        self.attrs
            .iter()
            .filter_map(|(n, v)| {
                n.strip_prefix("data-")
                    .map(|key| (data_attr_to_dataset_key(key), v.clone()))
            })
            .collect()
    }

    pub fn set_dataset(&mut self, key: &str, value: &str) {
        self.set_attr(&dataset_key_to_data_attr(key), value);
    }
}

fn data_attr_to_dataset_key(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            result.extend(c.to_uppercase());
            upper = false;
        } else {
            result.push(c);
        }
    }
    result
}

fn dataset_key_to_data_attr(key: &str) -> String {
    let mut result = String::from("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The root of the tree. Behaves like a document fragment.
    Root,
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Clone, Debug, PartialEq)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HtmlDom {
    nodes: Vec<Node>,
}

impl Default for HtmlDom {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDom {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes ever created in this arena, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn add_node(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.add_node(NodeKind::Element(Element::new(tag)))
    }

    pub fn create_element_with(&mut self, element: Element) -> NodeId {
        self.add_node(NodeKind::Element(element))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.add_node(NodeKind::Text(text.to_owned()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.add_node(NodeKind::Comment(text.to_owned()))
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.kind(id) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    /// Tag name of an element node, `None` for any other node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag())
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Text(_)))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Text(t)) => Some(t),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(NodeKind::Text(t)) =
            self.nodes.get_mut(id.0).map(|n| &mut n.kind)
        {
            *t = text.to_owned();
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// True if `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Detach a node from its parent. The node and its subtree stay valid and
    /// can be inserted elsewhere.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.nodes[parent.0].children.retain(|c| *c != id);
            self.nodes[id.0].parent = None;
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` into `parent` before `reference`, or at the end when
    /// `reference` is `None` or not a child of `parent`. An attached child is
    /// moved.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) {
        if child == parent || self.is_ancestor_or_self(child, parent) {
            tracing::warn!(?child, ?parent, "refusing to create a cycle");
            return;
        }
        self.remove(child);
        let children = &mut self.nodes[parent.0].children;
        let index = reference
            .and_then(|r| children.iter().position(|c| *c == r))
            .unwrap_or(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Move every child of `from` to the end of `to`.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let children = self.children(from).to_vec();
        for child in children {
            self.append_child(to, child);
        }
    }

    /// Replace `node` with its own children.
    pub fn unwrap(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            for child in self.children(node).to_vec() {
                self.insert_before(parent, child, Some(node));
            }
            self.remove(node);
        }
    }

    /// Wrap all children of `parent` into a new element with tag `tag`.
    pub fn wrap_all_children(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let wrapper = self.create_element(tag);
        self.move_children(parent, wrapper);
        self.append_child(parent, wrapper);
        wrapper
    }

    /// Copy a node without its children. The copy starts detached.
    pub fn clone_node_shallow(&mut self, id: NodeId) -> Option<NodeId> {
        let kind = self.kind(id)?.clone();
        Some(self.add_node(kind))
    }

    /// Copy a node and its whole subtree. The copy starts detached.
    pub fn clone_node_deep(&mut self, id: NodeId) -> Option<NodeId> {
        let copy = self.clone_node_shallow(id)?;
        for child in self.children(id).to_vec() {
            if let Some(child_copy) = self.clone_node_deep(child) {
                self.append_child(copy, child_copy);
            }
        }
        Some(copy)
    }

    /// Concatenated text of all text nodes under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        self.collect_text(id, &mut result);
        result
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Text(t)) => out.push_str(t),
            Some(NodeKind::Element(_)) | Some(NodeKind::Root) => {
                for child in self.children(id) {
                    self.collect_text(*child, out);
                }
            }
            _ => {}
        }
    }

    /// All attached descendants of `id` in document order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        for child in self.children(id) {
            result.push(*child);
            result.extend(self.descendants(*child));
        }
        result
    }

    /// First attached element under `root` with the given tag.
    pub fn find_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.tag(*id) == Some(tag))
    }

    pub fn find_all_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.tag(*id) == Some(tag))
            .collect()
    }

    /// Remove all children of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id).to_vec() {
            self.remove(child);
        }
    }
}
