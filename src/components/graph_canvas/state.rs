use leptos::prelude::*;
use log::warn;

use crate::graph::Graph;
use crate::graph::lifecycle::Animator;

/// A node being dragged, with where the pointer and node started.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragState {
	pub node: String,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// Canvas-local state: the active drag and the edge fade animator.
#[derive(Clone, Copy)]
pub struct CanvasState {
	pub drag: RwSignal<Option<DragState>>,
	pub animator: StoredValue<Animator>,
	/// Clock of the last animated frame; edge opacities track it.
	pub clock: RwSignal<f64>,
	animating: StoredValue<bool>,
}

impl CanvasState {
	pub fn new(speed: u8) -> Self {
		Self {
			drag: RwSignal::new(None),
			animator: StoredValue::new(Animator::new(speed)),
			clock: RwSignal::new(0.0),
			animating: StoredValue::new(false),
		}
	}

	pub fn begin_drag(&self, graph: &Graph, node: &str, x: f64, y: f64) {
		let Some(n) = graph.node(node) else {
			return;
		};
		self.drag.set(Some(DragState {
			node: node.to_string(),
			start_x: x,
			start_y: y,
			node_start_x: n.x,
			node_start_y: n.y,
		}));
	}

	/// Move the dragged node so it follows the pointer.
	pub fn drag_to(&self, graph: RwSignal<Graph>, x: f64, y: f64) {
		let Some(drag) = self.drag.get_untracked() else {
			return;
		};
		let (nx, ny) = (
			drag.node_start_x + (x - drag.start_x),
			drag.node_start_y + (y - drag.start_y),
		);
		graph.update(|g| {
			if let Err(e) = g.move_node(&drag.node, nx, ny) {
				warn!("dropping drag: {e}");
			}
		});
	}

	pub fn end_drag(&self) {
		if self.drag.get_untracked().is_some() {
			self.drag.set(None);
		}
	}

	pub fn is_dragging(&self, node: &str) -> bool {
		self.drag
			.with(|d| d.as_ref().is_some_and(|d| d.node == node))
	}

	/// One animation frame: pick up new timers, apply due transitions, and
	/// advance the clock while anything is fading.
	pub fn tick(&self, graph: RwSignal<Graph>, speed: u8, now: f64) {
		let mut busy = false;
		self.animator.update_value(|a| {
			a.set_speed(speed);
			graph.with_untracked(|g| a.observe(g, now));
			if a.has_due(now) {
				graph.update(|g| {
					a.advance(g, now);
				});
			}
			busy = !a.is_idle();
		});

		let was_busy = self.animating.get_value();
		if busy || was_busy {
			self.clock.set(now);
		}
		self.animating.set_value(busy);
	}
}
