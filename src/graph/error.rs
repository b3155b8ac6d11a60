//! Validation errors reported by the graph store.

use thiserror::Error;

/// A specialized `Result` type for graph store operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Every way a user action on the graph can be rejected.
///
/// The `Display` text is the message shown in the UI error banner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// Tried to add a node with an empty id.
	#[error("Node ID cannot be empty.")]
	EmptyNodeId,

	/// Tried to add a node whose id is already taken.
	#[error("Node \"{0}\" already exists.")]
	DuplicateNode(String),

	/// Tried to remove a node without naming it.
	#[error("Please enter a node ID to remove.")]
	MissingNodeId,

	/// The named node is not in the graph.
	#[error("Node \"{0}\" does not exist.")]
	UnknownNode(String),

	/// An edge operation was missing its source or target.
	#[error("Both source and target nodes must be specified.")]
	MissingEndpoints,

	/// An edge endpoint does not name an existing node.
	#[error("Both source and target nodes must exist.")]
	UnknownEndpoint,

	/// No live edge matched the requested endpoints, kind and weight.
	#[error("Edge does not exist (or weight does not match).")]
	EdgeNotFound,
}
