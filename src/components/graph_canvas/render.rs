use leptos::prelude::*;

use super::state::CanvasState;
use crate::graph::layout::{NODE_RADIUS, RoutedEdge};
use crate::graph::{EdgeKind, EdgeStatus, Node};

const DIRECTED_STROKE: &str = "#facc15";
const UNDIRECTED_STROKE: &str = "#fbcfe8";
const NODE_FILL: &str = "#f97316";
const NODE_FILL_ACTIVE: &str = "#fefce8";

fn stroke_for(kind: EdgeKind) -> &'static str {
	match kind {
		EdgeKind::Directed => DIRECTED_STROKE,
		EdgeKind::Undirected => UNDIRECTED_STROKE,
	}
}

/// Shared `<defs>`: the arrowhead marker and the dotted background grid.
pub fn defs() -> impl IntoView {
	view! {
		<defs>
			<marker
				id="arrow"
				viewBox="0 0 10 10"
				refX="9.5"
				refY="5"
				markerWidth="6"
				markerHeight="6"
				orient="auto-start-reverse"
			>
				<path d="M 0 0 L 10 5 L 0 10 z" fill=DIRECTED_STROKE />
			</marker>
			<pattern id="grid" width="20" height="20" patternUnits="userSpaceOnUse">
				<circle cx="1" cy="1" r="1" fill="#d946ef" fill-opacity="0.6" />
			</pattern>
		</defs>
	}
}

/// One edge path plus its weight label, faded by the animator.
pub fn edge_view(edge: RoutedEdge, weighted: bool, canvas: CanvasState) -> impl IntoView {
	let (id, status) = (edge.id, edge.status);
	let stroke = stroke_for(edge.kind);
	let marker = match edge.kind {
		EdgeKind::Directed => "url(#arrow)",
		EdgeKind::Undirected => "",
	};
	let status_name = match status {
		EdgeStatus::New => "new",
		EdgeStatus::Visible => "visible",
		EdgeStatus::Removing => "removing",
	};
	let opacity = move || {
		canvas.clock.track();
		canvas
			.animator
			.with_value(|a| a.opacity(id, status))
			.to_string()
	};
	let label = weighted.then(|| {
		view! {
			<text
				x=edge.label.x.to_string()
				y=edge.label.y.to_string()
				fill=stroke
				stroke="none"
				font-size="14"
				text-anchor="middle"
				dy=".3em"
				class="font-mono"
				opacity=opacity
				style="pointer-events: none"
			>
				{edge.weight.to_string()}
			</text>
		}
	});

	view! {
		<path
			d=edge.path.to_string()
			fill="none"
			stroke=stroke
			stroke-width="2"
			stroke-opacity="0.9"
			marker-end=marker
			opacity=opacity
			data-status=status_name
		/>
		{label}
	}
}

/// A draggable node circle with its id centered inside.
pub fn node_view<F>(node: &Node, canvas: CanvasState, on_grab: F) -> impl IntoView + use<F>
where
	F: Fn(String, f64, f64) + 'static,
{
	let id = node.id.clone();
	let active = {
		let id = id.clone();
		move || canvas.is_dragging(&id)
	};
	let (active_stroke, active_text) = (active.clone(), active.clone());
	let grab_id = id.clone();
	let transform = format!("translate({}, {})", node.x, node.y);

	view! {
		<g
			transform=transform
			class="cursor-pointer graph-node"
			on:mousedown=move |ev| on_grab(grab_id.clone(), ev.client_x() as f64, ev.client_y() as f64)
		>
			<circle
				r=NODE_RADIUS.to_string()
				fill=move || if active() { NODE_FILL_ACTIVE } else { NODE_FILL }
				stroke=move || if active_stroke() { "#f0fdf4" } else { "#ffffff" }
				stroke-width="2"
			/>
			<text
				text-anchor="middle"
				dy=".3em"
				fill=move || if active_text() { "#854d0e" } else { "#FFFFFF" }
				class="font-mono font-bold select-none"
				style="pointer-events: none"
			>
				{id}
			</text>
		</g>
	}
}
