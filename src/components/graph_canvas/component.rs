use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use super::render;
use super::state::CanvasState;
use crate::components::session::GraphSession;
use crate::graph::layout;

/// SVG canvas showing the graph, with draggable nodes and fading edges.
#[component]
pub fn GraphCanvas(session: GraphSession) -> impl IntoView {
	let canvas = CanvasState::new(session.animation_speed.get_untracked());
	let animate_init: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	// Drive the edge lifecycle from requestAnimationFrame.
	Effect::new(move |_| {
		if animate_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		let animate_inner = animate_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			canvas.tick(
				session.graph,
				session.animation_speed.get_untracked(),
				js_sys::Date::now(),
			);
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			debug!("starting edge animation loop");
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let routes = Memo::new(move |_| session.graph.with(layout::route_edges));

	let on_mousemove = move |ev: MouseEvent| {
		canvas.drag_to(session.graph, ev.client_x() as f64, ev.client_y() as f64);
	};
	let on_mouseup = move |_: MouseEvent| canvas.end_drag();
	let on_mouseleave = move |_: MouseEvent| canvas.end_drag();

	view! {
		<svg
			class="graph-canvas select-none"
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
		>
			{render::defs()}
			<rect width="100%" height="100%" fill="#1e0b38" fill-opacity="0.6" />
			<rect width="100%" height="100%" fill="url(#grid)" />

			<g class="edges">
				{move || {
					let weighted = session.weighted.get();
					routes
						.get()
						.into_iter()
						.map(|edge| render::edge_view(edge, weighted, canvas))
						.collect_view()
				}}
			</g>

			<g class="nodes">
				{move || {
					session
						.graph
						.with(|g| {
							g.nodes()
								.iter()
								.map(|node| {
									render::node_view(
										node,
										canvas,
										move |id, x, y| {
											session
												.graph
												.with_untracked(|g| canvas.begin_drag(g, &id, x, y));
										},
									)
								})
								.collect_view()
						})
				}}
			</g>
		</svg>
	}
}
