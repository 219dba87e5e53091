//! Error type shared by the graph, the strategies and the search engine.

use std::fmt;

/// Errors raised synchronously by graph accesses and strategy preconditions.
///
/// A search that simply finds no path is not an error; the search entry points
/// report that as `Ok(false)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JpsError {
    /// An argument violates a precondition: an empty node slot where a node is
    /// required, a non-positive grid dimension, a node given as its own parent,
    /// or a jump node that is not connected to its source.
    InvalidArgument {
        /// What went wrong.
        reason: String,
    },
    /// A coordinate lies outside `[0, width) x [0, height)`.
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

impl JpsError {
    pub(crate) fn invalid(reason: impl Into<String>) -> JpsError {
        JpsError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for JpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "coordinates [{x}, {y}] are outside the grid boundaries ({width}x{height})"
            ),
        }
    }
}

impl std::error::Error for JpsError {}
