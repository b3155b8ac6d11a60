use leptos::prelude::*;
use log::warn;

use crate::graph::{self, Graph, GraphError};
use crate::settings::{Settings, ViewMode};

/// Reactive handles shared by the sidebar, canvas and data panel.
///
/// The graph store is the only domain state; the rest are display toggles.
#[derive(Clone, Copy)]
pub struct GraphSession {
	pub graph: RwSignal<Graph>,
	pub weighted: RwSignal<bool>,
	pub animation_speed: RwSignal<u8>,
	pub view_mode: RwSignal<ViewMode>,
	pub error: RwSignal<Option<String>>,
}

impl GraphSession {
	pub fn new(settings: &Settings) -> Self {
		Self {
			graph: RwSignal::new(Graph::new()),
			weighted: RwSignal::new(settings.weighted),
			animation_speed: RwSignal::new(settings.animation_speed),
			view_mode: RwSignal::new(settings.view_mode),
			error: RwSignal::new(None),
		}
	}

	/// Run one store mutation on behalf of a user action.
	///
	/// On failure the store is left as it was, subscribers are not notified,
	/// and the message is put in the error banner.
	pub fn apply<T>(&self, f: impl FnOnce(&mut Graph) -> graph::Result<T>) -> Option<T> {
		let mut outcome = None;
		self.graph.maybe_update(|g| {
			let result = f(g);
			let changed = result.is_ok();
			outcome = Some(result);
			changed
		});
		match outcome? {
			Ok(value) => {
				self.error.set(None);
				Some(value)
			}
			Err(e) => {
				self.report(e);
				None
			}
		}
	}

	/// Show a validation failure in the error banner.
	pub fn report(&self, e: GraphError) {
		warn!("rejected graph action: {e}");
		self.error.set(Some(e.to_string()));
	}

	/// Drop every node and edge.
	pub fn clear(&self) {
		self.graph.update(Graph::clear);
		self.error.set(None);
	}

	pub fn dismiss_error(&self) {
		self.error.set(None);
	}
}
