//! Parsed HTML page with attribute rewriting and deterministic serialization.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use ego_tree::{NodeId, NodeRef};
use regex::bytes::Regex;
use scraper::{Html, node::Node};

use crate::reference::{DownloadableReference, TAG_KINDS};

/// HTML5 void elements that must not have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// How far into the body a `<meta>` charset declaration is looked for.
const META_PRESCAN_LEN: usize = 1024;

static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("meta charset pattern is valid")
});

/// A parsed page.
///
/// Attribute changes made through [`set_attr`](Self::set_attr) are kept
/// beside the parsed tree and applied when the page is
/// [serialized](Self::serialize).
pub struct Document {
    html: Html,
    rewrites: HashMap<(NodeId, String), String>,
}

impl Document {
    /// Parse a complete HTML document.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
            rewrites: HashMap::new(),
        }
    }

    /// Decode and parse a page body.
    ///
    /// The encoding is taken from a byte order mark, then from `charset`
    /// (the response's declared charset), then from a `<meta>` declaration
    /// near the start of the body, and defaults to UTF-8. Pages decoded
    /// from another encoding have their `<meta>` declarations rewritten to
    /// UTF-8, the encoding [`serialize`](Self::serialize) produces.
    pub fn parse_bytes(body: &[u8], charset: Option<&str>) -> Self {
        let encoding = charset
            .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
            .or_else(|| sniff_meta_charset(body))
            .unwrap_or(UTF_8);
        let (text, used, had_errors) = encoding.decode(body);
        if had_errors {
            tracing::warn!("Page is not valid {}, undecodable bytes replaced", used.name());
        }

        let mut document = Self::parse(&text);
        if used != UTF_8 {
            tracing::debug!("Page decoded from {}", used.name());
            document.declare_utf8();
        }
        document
    }

    /// All `img[src]`, `link[href]` and `script[src]` references: images
    /// first, then links, then scripts, each group in document order.
    /// Missing and empty attributes are skipped.
    pub fn references(&self) -> Vec<DownloadableReference> {
        TAG_KINDS
            .iter()
            .flat_map(|&kind| {
                self.html.tree.root().descendants().filter_map(move |node| {
                    let element = node.value().as_element()?;
                    if element.name() != kind.tag() {
                        return None;
                    }
                    let value = element.attr(kind.attribute()).filter(|v| !v.is_empty())?;
                    Some(DownloadableReference {
                        node: node.id(),
                        kind,
                        raw_value: value.to_string(),
                    })
                })
            })
            .collect()
    }

    /// Current value of attribute `name` on element `node`, including any
    /// rewrite.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        if let Some(value) = self.rewrites.get(&(node, name.to_string())) {
            return Some(value.as_str());
        }
        self.html.tree.get(node)?.value().as_element()?.attr(name)
    }

    /// Replace the value of attribute `name` on element `node`.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        self.rewrites.insert((node, name.to_string()), value.into());
    }

    fn declare_utf8(&mut self) {
        let metas: Vec<(NodeId, &'static str, &'static str)> = self
            .html
            .tree
            .root()
            .descendants()
            .filter_map(|node| {
                let element = node.value().as_element()?;
                if element.name() != "meta" {
                    return None;
                }
                if element.attr("charset").is_some() {
                    return Some((node.id(), "charset", "utf-8"));
                }
                let content_type = element
                    .attr("http-equiv")
                    .is_some_and(|value| value.eq_ignore_ascii_case("content-type"));
                (content_type && element.attr("content").is_some())
                    .then(|| (node.id(), "content", "text/html; charset=utf-8"))
            })
            .collect();
        for (node, name, value) in metas {
            self.set_attr(node, name, value);
        }
    }

    /// Render the page back to HTML.
    ///
    /// The output depends only on the parsed tree and the rewrites, so the
    /// same input always produces the same bytes.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.serialize_node(self.html.tree.root(), &mut out);
        out
    }

    fn serialize_node(&self, node: NodeRef<Node>, out: &mut String) {
        match node.value() {
            Node::Document | Node::Fragment => {
                for child in node.children() {
                    self.serialize_node(child, out);
                }
            }
            Node::Doctype(doctype) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(doctype.name());
                out.push('>');
            }
            Node::Element(el) => {
                let tag = el.name();
                out.push('<');
                out.push_str(tag);

                for (qual_name, v) in el.attrs.iter() {
                    let name: Cow<str> = match &qual_name.prefix {
                        Some(prefix) => format!("{}:{}", &**prefix, &*qual_name.local).into(),
                        None => Cow::Borrowed(&*qual_name.local),
                    };
                    let value = self
                        .rewrites
                        .get(&(node.id(), name.to_string()))
                        .map_or(&**v, String::as_str);
                    out.push(' ');
                    out.push_str(&name);
                    out.push_str("=\"");
                    push_escaped(out, value, true);
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&tag) {
                    return;
                }

                for child in node.children() {
                    self.serialize_node(child, out);
                }

                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            Node::Text(text) => {
                let raw = node
                    .parent()
                    .and_then(|parent| parent.value().as_element())
                    .is_some_and(|parent| RAW_TEXT_ELEMENTS.contains(&parent.name()));
                if raw {
                    out.push_str(text.as_ref());
                } else {
                    push_escaped(out, text.as_ref(), false);
                }
            }
            Node::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment.as_ref());
                out.push_str("-->");
            }
            _ => {}
        }
    }
}

fn sniff_meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_PRESCAN_LEN)];
    let label = META_CHARSET.captures(head)?.get(1)?;
    Encoding::for_label(label.as_bytes())
}

fn push_escaped(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
