//! Error types for the feedback layer.

use thiserror::Error;

use crate::dom::NodeId;

/// Feedback-layer errors.
///
/// These signal misuse of the UI tree (stale or foreign node ids, events
/// aimed at nodes no controller owns) or bad configuration. Invalid user
/// input is never an error; it is a [`oxide_forms::ValidationResult`].
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The node id does not belong to this document.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The node is a text node where an element was expected.
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// Inserting the node would make it its own ancestor.
    #[error("node {0} cannot be inserted into its own subtree")]
    Cycle(NodeId),

    /// The node has no parent to attach feedback to.
    #[error("node {0} has no parent")]
    Detached(NodeId),

    /// The document root cannot be deleted.
    #[error("node {0} is the document root")]
    RootRemoval(NodeId),

    /// The node is not a `<form>`.
    #[error("node {0} is not a form")]
    NotAForm(NodeId),

    /// No form on the page owns this node.
    #[error("no form controller owns node {0}")]
    Unowned(NodeId),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The field rule set failed to build.
    #[error(transparent)]
    Rules(#[from] oxide_forms::FormError),
}

/// Result type alias for feedback operations.
pub type Result<T> = std::result::Result<T, FeedbackError>;
