use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::info;

use crate::components::controls::Controls;
use crate::components::data_panel::DataPanel;
use crate::components::graph_canvas::GraphCanvas;
use crate::components::session::GraphSession;
use crate::settings::Settings;

/// Default Home Page: controls on the left, canvas in the middle, views on the right.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let settings = query.with_untracked(|q| Settings::from_query(|key| q.get(key)));
	info!("starting with {:?}", settings);
	let session = GraphSession::new(&settings);

	let left_open = RwSignal::new(true);
	let right_open = RwSignal::new(true);
	let panel_style = |open: RwSignal<bool>, width: &'static str| {
		move || {
			if open.get() {
				format!("width: {width}; padding: 1rem; opacity: 1; overflow: auto;")
			} else {
				"width: 0; padding: 0; opacity: 0; overflow: hidden;".to_string()
			}
		}
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="app-shell">
				<header class="app-header">
					<h1>"Graph Visualizer"</h1>
				</header>

				<button
					class="panel-toggle panel-toggle-left"
					title=move || if left_open.get() { "Collapse Controls" } else { "Expand Controls" }
					on:click=move |_| left_open.update(|o| *o = !*o)
				>
					{move || if left_open.get() { "‹" } else { "›" }}
				</button>
				<button
					class="panel-toggle panel-toggle-right"
					title=move || if right_open.get() { "Collapse Data" } else { "Expand Data" }
					on:click=move |_| right_open.update(|o| *o = !*o)
				>
					{move || if right_open.get() { "›" } else { "‹" }}
				</button>

				<div class="app-body">
					<aside class="sidebar sidebar-left space-y-6" style=panel_style(left_open, "18rem")>
						<Controls session=session />
					</aside>
					<main class="canvas-area">
						<GraphCanvas session=session />
					</main>
					<aside class="sidebar sidebar-right" style=panel_style(right_open, "24rem")>
						<DataPanel session=session />
					</aside>
				</div>
			</div>
		</ErrorBoundary>
	}
}
