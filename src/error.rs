//! Layout error taxonomy.

use thiserror::Error;

use crate::layout::Size;
use crate::tree::arena::NodeId;

/// Errors raised by the item tree, the layout strategies and the generator.
///
/// All of these are deterministic: retrying the same call on the same tree
/// produces the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// An add was attempted on a container already holding `capacity` items.
    #[error("container is full ({capacity} items)")]
    CapacityExceeded { capacity: usize },

    /// The candidate's required (or minimum) size exceeds what the container
    /// can give it.
    #[error("item needs {needed} but only {available} is available")]
    FitFailure { needed: Size, available: Size },

    /// Malformed construction parameters.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Remove of an item the container does not hold.
    #[error("item {0:?} is not in the container")]
    NotFound(NodeId),

    /// A resize that would leave no drawable interior. The item keeps its
    /// previous size.
    #[error("resizing to {width}x{height} leaves no room for content")]
    Collapsed { width: u32, height: u32 },
}

impl LayoutError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LayoutError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
