//! NeTEx element helpers.
//!
//! Stop, line, and pattern documents all use the NeTEx namespace. These
//! helpers match elements by namespace-qualified name so readers never
//! pick up same-named elements from another vocabulary.

use roxmltree::Node;

/// The NeTEx XML namespace.
pub const NETEX_NS: &str = "http://www.netex.org.uk/netex";

/// True if `node` is the NeTEx element `name`.
pub fn is(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(NETEX_NS)
}

/// First direct child named `name`.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| is(*c, name))
}

/// First descendant (excluding `node` itself) named `name`, in document order.
pub fn descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|d| is(*d, name))
}

/// Trimmed, non-empty text content.
pub fn text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|t| !t.is_empty())
}

/// The target of a `*Ref` element.
///
/// NeTEx puts the target in a `ref` attribute, but some feeds use the
/// element text instead.
pub fn reference<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.attribute("ref")
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .or_else(|| text(node))
}
