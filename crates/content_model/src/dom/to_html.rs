// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::html_dom::{HtmlDom, NodeId, NodeKind};

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

impl HtmlDom {
    /// Serialize the children of the root node.
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    /// Serialize the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut buf = String::new();
        for child in self.children(id) {
            self.fmt_node(*child, &mut buf);
        }
        buf
    }

    /// Serialize `id` itself, including its own tag.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut buf = String::new();
        self.fmt_node(id, &mut buf);
        buf
    }

    fn fmt_node(&self, id: NodeId, buf: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Root) => {
                for child in self.children(id) {
                    self.fmt_node(*child, buf);
                }
            }
            Some(NodeKind::Text(text)) => {
                buf.push_str(&html_escape::encode_text(text));
            }
            Some(NodeKind::Comment(text)) => {
                buf.push_str("<!--");
                buf.push_str(text);
                buf.push_str("-->");
            }
            Some(NodeKind::Element(element)) => {
                buf.push('<');
                buf.push_str(element.tag());
                for (name, value) in element.attrs() {
                    push_attr(buf, name, value);
                }
                if !element.style().is_empty() {
                    push_attr(buf, "style", &element.style().to_string());
                }
                buf.push('>');
                if is_void_element(element.tag()) {
                    return;
                }
                for child in self.children(id) {
                    self.fmt_node(*child, buf);
                }
                buf.push_str("</");
                buf.push_str(element.tag());
                buf.push('>');
            }
            None => {}
        }
    }
}

fn push_attr(buf: &mut String, name: &str, value: &str) {
    buf.push(' ');
    buf.push_str(name);
    buf.push_str("=\"");
    buf.push_str(&html_escape::encode_double_quoted_attribute(value));
    buf.push('"');
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_elements_attributes_and_style() {
        let mut dom = HtmlDom::new();
        let div = dom.create_element("div");
        dom.element_mut(div).unwrap().set_attr("id", "x");
        dom.element_mut(div)
            .unwrap()
            .style_mut()
            .set("color", "red");
        let br = dom.create_element("br");
        let text = dom.create_text("a<b");
        dom.append_child(dom.root(), div);
        dom.append_child(div, text);
        dom.append_child(div, br);

        assert_eq!(
            dom.to_html(),
            r#"<div id="x" style="color: red;">a&lt;b<br></div>"#
        );
        assert_eq!(dom.inner_html(div), "a&lt;b<br>");
    }

    #[test]
    fn attribute_quotes_are_escaped() {
        let mut dom = HtmlDom::new();
        let a = dom.create_element("a");
        dom.element_mut(a).unwrap().set_attr("title", "say \"hi\"");
        dom.append_child(dom.root(), a);

        assert_eq!(dom.to_html(), r#"<a title="say &quot;hi&quot;"></a>"#);
    }
}
