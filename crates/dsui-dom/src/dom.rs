#![forbid(unsafe_code)]

//! The [`Dom`] trait: the seam between dsui components and a document.
//!
//! # Invariants
//!
//! - `query_all` returns descendants of `root` (never `root` itself) in
//!   document order, matching `querySelectorAll` semantics.
//! - `closest` considers the node itself first, then its ancestors.
//! - `focus` returns whether focus actually landed on the node; a detached,
//!   hidden, disabled or non-focusable element leaves focus where it was.
//!
//! # Failure Modes
//!
//! - Selector syntax errors surface as [`DomError::InvalidSelector`].
//! - Every mutation is best-effort: implementations never panic on a
//!   detached node, they simply do nothing.

use std::fmt;

use crate::DomError;

/// Read/write access to a document.
pub trait Dom {
    /// Cheap handle to an element. Equality is element identity.
    type Node: Clone + PartialEq + fmt::Debug;

    // --- Lookup ---

    /// Element with the given `id`, if attached.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// The document body.
    fn body(&self) -> Option<Self::Node>;

    /// All descendants of `root` matching `selector`, in document order.
    fn query_all(&self, root: &Self::Node, selector: &str) -> Result<Vec<Self::Node>, DomError>;

    /// First descendant of `root` matching `selector`.
    fn query(&self, root: &Self::Node, selector: &str) -> Result<Option<Self::Node>, DomError> {
        Ok(self.query_all(root, selector)?.into_iter().next())
    }

    /// `node` or its nearest ancestor matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Result<Option<Self::Node>, DomError>;

    // --- Attributes and classes ---

    /// Attribute value, `None` when absent.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Set an attribute value.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Whether the element's class list contains `class`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Add (`on == true`) or remove `class`.
    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool);

    // --- Tree state ---

    /// Whether the node is attached to the document.
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Whether the element has any child nodes.
    fn has_children(&self, node: &Self::Node) -> bool;

    /// Remove every child of `node`.
    fn clear_children(&mut self, node: &Self::Node);

    /// Whether the element is rendered: connected, neither it nor any
    /// ancestor is `display: none` (or `hidden`), and its inherited
    /// `visibility` is not `hidden` or `collapse`.
    fn is_rendered(&self, node: &Self::Node) -> bool;

    // --- Focus ---

    /// The element that currently holds focus. `None` when focus rests on
    /// the document itself (body, document element or nothing at all).
    fn active_element(&self) -> Option<Self::Node>;

    /// Move focus to `node`. Returns whether focus landed there.
    fn focus(&mut self, node: &Self::Node) -> bool;

    // --- Forms ---

    /// Ask a form to submit natively (`requestSubmit`, falling back to
    /// `submit`). Returns whether a submission was requested.
    fn request_submit(&mut self, form: &Self::Node) -> bool;

    /// Checked state of a checkbox or radio.
    fn is_checked(&self, node: &Self::Node) -> bool;

    /// Set the checked state of a checkbox or radio.
    fn set_checked(&mut self, node: &Self::Node, checked: bool);

    /// Set the indeterminate state of a checkbox.
    fn set_indeterminate(&mut self, node: &Self::Node, indeterminate: bool);

    /// Current value of a form control.
    fn value(&self, node: &Self::Node) -> String;

    /// Set the value of a form control.
    fn set_value(&mut self, node: &Self::Node, value: &str);

    /// Replace the element's children with a single text node.
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Toggle the `hidden` attribute.
    fn set_hidden(&mut self, node: &Self::Node, hidden: bool);

    // --- Environment ---

    /// Computed value of a CSS custom property on the body, trimmed.
    fn css_variable(&self, name: &str) -> Option<String>;

    /// Whether a media query currently matches.
    fn matches_media(&self, query: &str) -> bool;

    /// Origin of the current location (`scheme://host[:port]`).
    fn origin(&self) -> String;

    /// Path plus query string of the current location.
    fn location_path(&self) -> String;
}
