//! Tree-wide configuration.

/// What a container does when it is handed a node that is still attached
/// to another container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttachPolicy {
    /// Detach the node from its current owner, then attach it here.
    #[default]
    Transfer,
    /// Refuse with [`TreeError::ContentAlreadyAttached`](crate::error::TreeError::ContentAlreadyAttached);
    /// the caller must detach the node first.
    RequireDetached,
}

/// Options controlling how a [`Document`](super::Document) validates
/// mutations.
///
/// # Examples
///
/// ```
/// use xmlgrove::tree::{AttachPolicy, TreeOptions};
/// use xmlgrove::Document;
///
/// let doc = Document::with_options(
///     TreeOptions::default().attach_policy(AttachPolicy::RequireDetached),
/// );
/// assert_eq!(doc.options().attach_policy, AttachPolicy::RequireDetached);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeOptions {
    /// Policy applied by every container that has no override of its own.
    /// Defaults to [`AttachPolicy::Transfer`].
    pub attach_policy: AttachPolicy,
}

impl TreeOptions {
    /// Sets the document-wide attach policy.
    #[must_use]
    pub fn attach_policy(mut self, policy: AttachPolicy) -> Self {
        self.attach_policy = policy;
        self
    }
}
