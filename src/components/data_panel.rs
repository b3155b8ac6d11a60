use leptos::prelude::*;

use super::session::GraphSession;
use crate::graph::views::{self, AdjacencyList, AdjacencyMatrix, DegreeTable};
use crate::settings::ViewMode;

/// Right sidebar: tabbed textual views of the current graph.
#[component]
pub fn DataPanel(session: GraphSession) -> impl IntoView {
	let view_mode = session.view_mode;
	let weighted = session.weighted;

	let list = Memo::new(move |_| session.graph.with(views::adjacency_list));
	let matrix = Memo::new(move |_| {
		let weighted = weighted.get();
		session.graph.with(|g| views::adjacency_matrix(g, weighted))
	});
	let degrees = Memo::new(move |_| {
		let weighted = weighted.get();
		session.graph.with(|g| views::degree_table(g, weighted))
	});

	let tabs = ViewMode::ALL
		.into_iter()
		.map(|mode| {
			view! {
				<button
					title=mode.title()
					class="view-tab flex-1 p-2 font-medium"
					data-active=move || (view_mode.get() == mode).to_string()
					on:click=move |_| view_mode.set(mode)
				>
					{mode.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="flex mb-4 rounded-md overflow-hidden border border-purple-700/50">{tabs}</div>
		<div class="p-4 bg-gray-950/70 rounded-md border border-purple-800/50">
			{move || match view_mode.get() {
				ViewMode::List => {
					view! { <AdjacencyListView list=list weighted=weighted /> }.into_any()
				}
				ViewMode::Matrix => view! { <AdjacencyMatrixView matrix=matrix /> }.into_any(),
				ViewMode::Degree => {
					view! { <DegreeTableView degrees=degrees weighted=weighted /> }.into_any()
				}
			}}
		</div>
	}
}

fn empty_notice(message: &'static str) -> impl IntoView {
	view! { <p class="font-mono text-sm text-gray-400">{message}</p> }
}

#[component]
fn AdjacencyListView(list: Memo<AdjacencyList>, weighted: RwSignal<bool>) -> impl IntoView {
	view! {
		<h3 class="text-lg font-semibold text-white mb-2">"Adjacency List"</h3>
		{move || {
			let weighted = weighted.get();
			list.with(|list| {
				if list.entries.is_empty() {
					return empty_notice("No nodes in the graph.").into_any();
				}
				let rows = list
					.entries
					.iter()
					.map(|(id, neighbors)| {
						view! {
							<li class="font-mono text-sm">
								{AdjacencyList::format_row(id, neighbors, weighted)}
							</li>
						}
					})
					.collect_view();
				view! { <ul class="space-y-1">{rows}</ul> }.into_any()
			})
		}}
	}
}

#[component]
fn AdjacencyMatrixView(matrix: Memo<AdjacencyMatrix>) -> impl IntoView {
	view! {
		<h3 class="text-lg font-semibold text-white mb-2">"Adjacency Matrix"</h3>
		{move || {
			matrix.with(|m| {
				if m.node_ids.is_empty() {
					return empty_notice("No nodes in the graph.").into_any();
				}
				let header = m
					.node_ids
					.iter()
					.map(|id| view! { <th class="p-2 border border-purple-800 text-fuchsia-400">{id.clone()}</th> })
					.collect_view();
				let body = m
					.node_ids
					.iter()
					.zip(&m.cells)
					.map(|(id, row)| {
						let cells = row
							.iter()
							.map(|cell| {
								let class = if *cell > 0 { "cell-set" } else { "cell-empty" };
								view! { <td class=format!("p-2 border border-purple-800 {class}")>{cell.to_string()}</td> }
							})
							.collect_view();
						view! {
							<tr>
								<td class="p-2 border border-purple-800 font-bold text-fuchsia-400">{id.clone()}</td>
								{cells}
							</tr>
						}
					})
					.collect_view();
				view! {
					<div class="overflow-x-auto">
						<table class="w-full text-center font-mono text-xs border-collapse">
							<thead>
								<tr>
									<th class="p-2 border border-purple-800"></th>
									{header}
								</tr>
							</thead>
							<tbody>{body}</tbody>
						</table>
					</div>
				}
				.into_any()
			})
		}}
	}
}

#[component]
fn DegreeTableView(degrees: Memo<DegreeTable>, weighted: RwSignal<bool>) -> impl IntoView {
	view! {
		<h3 class="text-lg font-semibold text-white mb-2">
			{move || if weighted.get() { "Vertex Weighted Degree" } else { "Vertex Degree" }}
		</h3>
		{move || {
			degrees.with(|table| {
				if table.rows.is_empty() {
					return empty_notice("No nodes in the graph.").into_any();
				}
				let single = table.all_undirected;
				let header = if single {
					view! { <th class="p-2 border border-purple-800 text-amber-400">"Degree"</th> }.into_any()
				} else {
					view! {
						<th class="p-2 border border-purple-800 text-amber-400">"In-Degree"</th>
						<th class="p-2 border border-purple-800 text-amber-400">"Out-Degree"</th>
					}
					.into_any()
				};
				let body = table
					.rows
					.iter()
					.map(|(id, degree)| {
						// every undirected record is mirrored, so in == out
						let columns = if single {
							view! { <td class="p-2 border border-purple-800">{degree.in_degree.to_string()}</td> }.into_any()
						} else {
							view! {
								<td class="p-2 border border-purple-800">{degree.in_degree.to_string()}</td>
								<td class="p-2 border border-purple-800">{degree.out_degree.to_string()}</td>
							}
							.into_any()
						};
						view! {
							<tr>
								<td class="p-2 border border-purple-800 font-bold text-fuchsia-400">{id.clone()}</td>
								{columns}
							</tr>
						}
					})
					.collect_view();
				view! {
					<div class="overflow-x-auto">
						<table class="w-full text-center font-mono text-xs border-collapse">
							<thead>
								<tr>
									<th class="p-2 border border-purple-800 text-fuchsia-400">"Node"</th>
									{header}
								</tr>
							</thead>
							<tbody>{body}</tbody>
						</table>
					</div>
				}
				.into_any()
			})
		}}
	}
}
