//! HTML serialization of a [`Document`].

use std::fmt::Write;

use crate::document::{Document, NodeId};

pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the `body` element and its subtree. Every element carries its
/// `data-node` index so the client can address it in patches.
pub fn render_body(doc: &Document, page_id: &str) -> String {
    let mut out = String::new();
    render_element(doc, doc.body(), Some(page_id), &mut out);
    out
}

fn render_element(doc: &Document, node: NodeId, page_id: Option<&str>, out: &mut String) {
    let element = doc.element(node);
    let _ = write!(out, "<{} data-node=\"{}\"", element.tag, node.index());
    if let Some(page_id) = page_id {
        let _ = write!(out, " data-page-id=\"{}\"", escape_text(page_id));
    }
    if let Some(id) = &element.dom_id {
        let _ = write!(out, " id=\"{}\"", escape_text(id));
    }
    if !element.classes.is_empty() {
        let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
        let _ = write!(out, " class=\"{}\"", escape_text(&classes.join(" ")));
    }
    for (key, value) in &element.data {
        let _ = write!(out, " data-{}=\"{}\"", key, escape_text(value));
    }
    if !element.style.is_empty() {
        let style: Vec<String> = element.style.iter().map(|(property, value)| format!("{property}: {value}")).collect();
        let _ = write!(out, " style=\"{}\"", escape_text(&style.join("; ")));
    }
    out.push('>');

    if let Some(text) = &element.text {
        out.push_str(&escape_text(text));
    }
    if let Some(raw) = &element.raw_html {
        out.push_str(raw);
    }
    for child in &element.children {
        render_element(doc, *child, None, out);
    }
    let _ = write!(out, "</{}>", element.tag);
}
