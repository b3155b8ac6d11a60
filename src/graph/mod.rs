//! The graph domain model, independent of any rendering concern.
//!
//! [`Graph`] is the store that user actions mutate. Everything else in this
//! module is derived from a snapshot of it: the textual [`views`], the edge
//! [`layout`] used by the canvas, and the [`lifecycle`] timers that fade edges
//! in and out.

mod error;
pub mod layout;
pub mod lifecycle;
mod model;
pub mod views;

pub use error::{GraphError, Result};
pub use model::{Edge, EdgeId, EdgeKind, EdgeStatus, Graph, Node, NodeId, Weight};
