//! Response normalization for AXL payloads.
//!
//! The server is structurally inconsistent in three ways every caller
//! has to survive:
//!
//! - cardinality: a list of one comes back as a bare element, a list of
//!   many as repeated elements ([`children`] always yields a sequence);
//! - wrapping: some scalar values arrive wrapped one element deeper than
//!   their siblings ([`scalar_or_nested`]);
//! - failure: an operation can fail inside an HTTP-successful exchange,
//!   reported as a fault element ([`fault_of`] is checked before any
//!   response is read as a success).
//!
//! Everything here matches elements by local tag name, so namespace
//! prefixes never matter.

use roxmltree::{Document, Node};

use super::AxlError;

/// A protocol-level fault embedded in a transport-successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub code: String,
    pub message: String,
    /// Vendor-specific message from the fault's detail element.
    pub detail: Option<String>,
}

impl From<Fault> for AxlError {
    fn from(fault: Fault) -> Self {
        AxlError::Fault {
            code: fault.code,
            message: fault.message,
            detail: fault.detail,
        }
    }
}

/// Parse a response body as XML.
pub fn parse(text: &str) -> Result<Document<'_>, AxlError> {
    Document::parse(text).map_err(|err| AxlError::Parse(err.to_string()))
}

/// First descendant element with the given local name.
pub fn descendant<'a, 'input>(
    doc: &'a Document<'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    doc.root()
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == name)
}

/// First child element with the given local name.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|node| node.is_element() && node.tag_name().name() == name)
}

/// All child elements with the given local name.
///
/// The server returns a bare element when cardinality is one and
/// repeated elements when it is greater; this always yields a sequence
/// of length 0, 1 or N. Every list-returning operation goes through
/// here.
pub fn children<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Vec<Node<'a, 'input>> {
    node.children()
        .filter(|node| node.is_element() && node.tag_name().name() == name)
        .collect()
}

/// Text content of a node.
///
/// Absent node → `None`. Text-only node → its trimmed text (empty
/// element → empty string). A node with element children → a flattened
/// serialization of those children. Never panics on shape mismatch.
pub fn text(node: Option<Node>) -> Option<String> {
    let node = node?;
    if node.children().any(|child| child.is_element()) {
        Some(flatten(node))
    } else {
        Some(node.text().unwrap_or("").trim().to_string())
    }
}

fn flatten(node: Node) -> String {
    let mut out = String::new();
    for child in node.children().filter(|child| child.is_element()) {
        let name = child.tag_name().name();
        out.push('<');
        out.push_str(name);
        out.push('>');
        if child.children().any(|inner| inner.is_element()) {
            out.push_str(&flatten(child));
        } else {
            out.push_str(child.text().unwrap_or("").trim());
        }
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
    out
}

/// Text of the named child element.
pub fn text_of(node: Node, name: &str) -> Option<String> {
    text(child(node, name))
}

/// A value that arrives either as a plain string element or as an
/// element wrapping the string one level deeper; both normalize to the
/// plain string. CSS fields are the usual offenders.
pub fn scalar_or_nested(node: Option<Node>) -> Option<String> {
    let node = node?;
    match node.children().find(|child| child.is_element()) {
        Some(inner) => text(Some(inner)),
        None => text(Some(node)),
    }
}

/// Parse the server's boolean spellings.
pub fn flag(value: Option<String>) -> Option<bool> {
    match value?.as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// The embedded fault, if the body carries one.
///
/// The transport reports HTTP-level success (or a bare 500) even when
/// the operation failed at the protocol layer, so this is consulted
/// before any response is interpreted. A body with no fault element
/// yields `None`.
pub fn fault_of(doc: &Document) -> Option<Fault> {
    let fault = descendant(doc, "Fault")?;
    let detail = child(fault, "detail").and_then(|detail| match child(detail, "axlError") {
        Some(err) => text_of(err, "axlmessage").filter(|message| !message.is_empty()),
        None => text(Some(detail)).filter(|message| !message.is_empty()),
    });
    Some(Fault {
        code: text_of(fault, "faultcode").unwrap_or_default(),
        message: text_of(fault, "faultstring").unwrap_or_default(),
        detail,
    })
}

/// Append `<name>value</name>` to a request body under construction,
/// escaping the value.
pub fn push_tag(body: &mut String, name: &str, value: &str) {
    body.push('<');
    body.push_str(name);
    body.push('>');
    body.push_str(&escape(value));
    body.push_str("</");
    body.push_str(name);
    body.push('>');
}

/// Escape a value for interpolation into a request body.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
