#![forbid(unsafe_code)]

//! Error type shared by every [`Dom`](crate::Dom) implementation.

use thiserror::Error;

/// Failure raised by a document query or mutation.
///
/// Components treat every variant as "nothing matched" and log it; none of
/// these are ever surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// A selector string could not be parsed.
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        /// The offending selector text.
        selector: String,
        /// What the parser tripped over.
        reason: String,
    },

    /// Markup was assigned to a node that cannot hold children.
    #[error("node is not an element")]
    NotAnElement,

    /// The node is not attached to the document.
    #[error("node is detached from the document")]
    Detached,

    /// An error thrown by the host JavaScript environment.
    #[error("javascript error: {0}")]
    Js(String),
}

impl DomError {
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_owned(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_selector_text() {
        let err = DomError::selector("[data-x", "unterminated attribute");
        assert_eq!(
            err.to_string(),
            "invalid selector `[data-x`: unterminated attribute"
        );
    }

    #[test]
    fn not_an_element_display() {
        assert_eq!(DomError::NotAnElement.to_string(), "node is not an element");
    }
}
