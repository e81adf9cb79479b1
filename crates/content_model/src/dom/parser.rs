// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Builds an [HtmlDom] from an HTML string using html5ever.
//!
//! html5ever parses fragments into `Document > html > ...`. The `html` wrapper
//! is dropped once parsing finishes, so the children of the fragment end up
//! directly under [HtmlDom::root].

use std::borrow::Cow;
use std::cell::{Ref, RefCell};

use html5ever::interface::NextParserState;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{parse_fragment, Attribute, LocalName, Namespace, QualName};

use super::html_dom::{Element, HtmlDom, NodeId};
use crate::error::HtmlParseError;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

fn qual_name(local: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from(local),
    )
}

impl HtmlDom {
    /// Parse an HTML fragment. Malformed markup never fails: html5ever
    /// recovers and the recovered tree is returned.
    pub fn parse(html: &str) -> HtmlDom {
        let (dom, errors) = DomCreator::parse(html);
        if !errors.is_empty() {
            tracing::warn!(
                count = errors.len(),
                "tolerated html parse errors"
            );
        }
        dom
    }

    /// Parse an HTML fragment, failing if html5ever reported any parse error.
    pub fn parse_strict(html: &str) -> Result<HtmlDom, HtmlParseError> {
        let (dom, parse_errors) = DomCreator::parse(html);
        if parse_errors.is_empty() {
            Ok(dom)
        } else {
            Err(HtmlParseError { parse_errors })
        }
    }
}

struct CreationState {
    dom: HtmlDom,
    // Qualified names of element nodes, indexed like the arena.
    names: Vec<Option<QualName>>,
    document_name: QualName,
    parse_errors: Vec<String>,
}

impl CreationState {
    fn record_name(&mut self, id: NodeId, name: Option<QualName>) {
        if self.names.len() <= id.raw() {
            self.names.resize(id.raw() + 1, None);
        }
        self.names[id.raw()] = name;
    }
}

pub(crate) struct DomCreator {
    state: RefCell<CreationState>,
}

impl DomCreator {
    pub(crate) fn parse(html: &str) -> (HtmlDom, Vec<String>) {
        parse_fragment(
            DomCreator::default(),
            Default::default(),
            qual_name("body"),
            vec![],
        )
        .from_utf8()
        .one(html.as_bytes())
    }
}

impl Default for DomCreator {
    fn default() -> Self {
        Self {
            state: RefCell::new(CreationState {
                dom: HtmlDom::new(),
                names: vec![None],
                document_name: qual_name(""),
                parse_errors: Vec::new(),
            }),
        }
    }
}

impl TreeSink for DomCreator {
    type Handle = NodeId;
    type Output = (HtmlDom, Vec<String>);
    type ElemName<'a> = Ref<'a, QualName>;

    fn finish(self) -> Self::Output {
        let state = self.state.into_inner();
        let mut dom = state.dom;
        let root = dom.root();
        // Hoist the children of the synthetic <html> element.
        let html = dom
            .children(root)
            .iter()
            .copied()
            .find(|c| dom.tag(*c) == Some("html"));
        if let Some(html) = html {
            dom.unwrap(html);
        }
        (dom, state.parse_errors)
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.state.borrow_mut().parse_errors.push(String::from(msg));
    }

    fn get_document(&self) -> Self::Handle {
        self.state.borrow().dom.root()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.state.borrow(), |state| {
            state
                .names
                .get(target.raw())
                .and_then(|n| n.as_ref())
                .unwrap_or(&state.document_name)
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let mut element = Element::new(name.local.as_ref());
        for attr in &attrs {
            element.set_attr(attr.name.local.as_ref(), attr.value.as_ref());
        }
        let state = &mut *self.state.borrow_mut();
        let id = state.dom.create_element_with(element);
        state.record_name(id, Some(name));
        id
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        let state = &mut *self.state.borrow_mut();
        let id = state.dom.create_comment(text.as_ref());
        state.record_name(id, None);
        id
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        self.create_comment(data)
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let state = &mut *self.state.borrow_mut();
        let dom = &mut state.dom;
        match child {
            NodeOrText::AppendNode(child) => dom.append_child(*parent, child),
            NodeOrText::AppendText(tendril) => {
                match dom.last_child(*parent) {
                    Some(last) if dom.is_text(last) => {
                        let merged = format!(
                            "{}{}",
                            dom.text(last).unwrap_or_default(),
                            tendril.as_ref()
                        );
                        dom.set_text(last, &merged);
                    }
                    _ => {
                        let text = dom.create_text(tendril.as_ref());
                        dom.append_child(*parent, text);
                    }
                }
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.state.borrow().dom.parent(*element).is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Doctypes carry nothing for the Content Model
    }

    fn mark_script_already_started(&self, _node: &Self::Handle) {}

    fn pop(&self, _node: &Self::Handle) {}

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(
        &self,
        sibling: &Self::Handle,
        new_node: NodeOrText<Self::Handle>,
    ) {
        let state = &mut *self.state.borrow_mut();
        let dom = &mut state.dom;
        let Some(parent) = dom.parent(*sibling) else {
            return;
        };
        let node = match new_node {
            NodeOrText::AppendNode(node) => node,
            NodeOrText::AppendText(tendril) => dom.create_text(tendril.as_ref()),
        };
        dom.insert_before(parent, node, Some(*sibling));
    }

    fn add_attrs_if_missing(
        &self,
        target: &Self::Handle,
        attrs: Vec<Attribute>,
    ) {
        let state = &mut *self.state.borrow_mut();
        if let Some(element) = state.dom.element_mut(*target) {
            for attr in &attrs {
                let name = attr.name.local.as_ref();
                let missing = if name == "style" {
                    element.style().is_empty()
                } else {
                    !element.has_attr(name)
                };
                if missing {
                    element.set_attr(name, attr.value.as_ref());
                }
            }
        }
    }

    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.state.borrow_mut().dom.remove(*target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.state.borrow_mut().dom.move_children(*node, *new_parent);
    }

    fn is_mathml_annotation_xml_integration_point(
        &self,
        _handle: &Self::Handle,
    ) -> bool {
        false
    }

    fn set_current_line(&self, _line_number: u64) {}

    fn complete_script(&self, _node: &Self::Handle) -> NextParserState {
        NextParserState::Continue
    }

    fn allow_declarative_shadow_roots(
        &self,
        _intended_parent: &Self::Handle,
    ) -> bool {
        false
    }

    fn attach_declarative_shadow(
        &self,
        _location: &Self::Handle,
        _template: &Self::Handle,
        _attrs: Vec<Attribute>,
    ) -> Result<(), String> {
        Err(String::from("Shadow roots are not supported"))
    }
}
