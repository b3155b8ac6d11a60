use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use super::session::GraphSession;
use crate::graph::{EdgeKind, GraphError, Weight};

const BTN_BASE: &str = "w-full font-bold py-2 px-4 rounded-md border text-center";
const INPUT: &str = "w-full bg-gray-900/70 border border-purple-700 rounded-md p-2 text-white";

/// Leading integer of a number field, so `"3.7"` reads as `3`.
///
/// `None` when the text does not start with digits (after an optional sign).
fn leading_integer(input: &str) -> Option<i128> {
	let s = input.trim_start();
	let (negative, digits) = match s.as_bytes().first() {
		Some(b'-') => (true, &s[1..]),
		Some(b'+') => (false, &s[1..]),
		_ => (false, s),
	};
	let end = digits
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(digits.len());
	if end == 0 {
		return None;
	}
	let magnitude = digits[..end]
		.bytes()
		.fold(0i128, |acc, d| acc.saturating_mul(10).saturating_add(i128::from(d - b'0')));
	Some(if negative { -magnitude } else { magnitude })
}

/// Weight typed into the add-edge form.
///
/// Zero, negative or unreadable input counts as `1`; values past the
/// largest weight are capped.
fn parse_weight(input: &str) -> Weight {
	match leading_integer(input) {
		Some(n) if n > 0 => Weight::try_from(n).unwrap_or(Weight::MAX),
		_ => 1,
	}
}

/// Weight typed into the remove-edge form. `None` when no stored edge could
/// carry it.
fn parse_match_weight(input: &str) -> Option<Weight> {
	leading_integer(input).and_then(|n| Weight::try_from(n).ok())
}

/// Weight filter for the remove-edge form, checked in the order the user
/// sees errors: endpoints first, then the typed weight.
fn removal_weight(source: &str, target: &str, by_weight: Option<&str>) -> Result<Option<Weight>, GraphError> {
	if source.is_empty() || target.is_empty() {
		return Err(GraphError::MissingEndpoints);
	}
	match by_weight {
		None => Ok(None),
		Some(text) => parse_match_weight(text)
			.map(Some)
			.ok_or(GraphError::EdgeNotFound),
	}
}

fn edge_kind(undirected: bool) -> EdgeKind {
	if undirected {
		EdgeKind::Undirected
	} else {
		EdgeKind::Directed
	}
}

/// Left sidebar: every form that mutates the graph, plus display toggles.
#[component]
pub fn Controls(session: GraphSession) -> impl IntoView {
	view! {
		<ErrorBanner session=session />
		<NodeForms session=session />
		<hr class="border-purple-700" />
		<WeightedToggle session=session />
		<hr class="border-purple-700" />
		<AddEdgeForm session=session />
		<RemoveEdgeForm session=session />
		<hr class="border-purple-700" />
		<SpeedSlider session=session />
	}
}

#[component]
fn ErrorBanner(session: GraphSession) -> impl IntoView {
	move || {
		session.error.get().map(|message| {
			view! {
				<div class="error-banner p-3 rounded-md bg-red-800/70 border border-red-600 text-white relative">
					<span class="font-medium">"Error: "</span>
					{message}
					<button
						class="absolute top-2 right-2 text-red-200 hover:text-white"
						on:click=move |_| session.dismiss_error()
					>
						"×"
					</button>
				</div>
			}
		})
	}
}

#[component]
fn NodeForms(session: GraphSession) -> impl IntoView {
	let node_id = RwSignal::new(String::new());
	let remove_node_id = RwSignal::new(String::new());

	let on_add = move |ev: SubmitEvent| {
		ev.prevent_default();
		let id = node_id.get_untracked();
		if session.apply(|g| g.add_node(&id).map(|_| ())).is_some() {
			node_id.set(String::new());
		}
	};
	let on_remove = move |ev: SubmitEvent| {
		ev.prevent_default();
		let id = remove_node_id.get_untracked();
		if session.apply(|g| g.remove_node(&id)).is_some() {
			remove_node_id.set(String::new());
		}
	};
	let on_clear = move |ev: SubmitEvent| {
		ev.prevent_default();
		session.clear();
	};

	view! {
		<form on:submit=on_add class="space-y-2">
			<h3 class="text-lg font-semibold text-white">"Add Node"</h3>
			<label for="nodeId" class="block text-sm font-medium text-gray-200 mb-1">"Node ID"</label>
			<input
				id="nodeId"
				type="text"
				placeholder="e.g., D"
				class=INPUT
				prop:value=move || node_id.get()
				on:input=move |ev| node_id.set(event_target_value(&ev))
			/>
			<button type="submit" class=format!("{BTN_BASE} btn-primary")>"Add Node"</button>
		</form>

		<form on:submit=on_remove class="space-y-2">
			<h3 class="text-lg font-semibold text-white">"Remove Node"</h3>
			<label for="removeNodeId" class="block text-sm font-medium text-gray-200 mb-1">"Node ID"</label>
			<input
				id="removeNodeId"
				type="text"
				placeholder="e.g., A"
				class=INPUT
				prop:value=move || remove_node_id.get()
				on:input=move |ev| remove_node_id.set(event_target_value(&ev))
			/>
			<button type="submit" class=format!("{BTN_BASE} btn-danger")>"Remove Node"</button>
		</form>

		<form on:submit=on_clear class="space-y-2">
			<h3 class="text-lg font-semibold text-white">"Clear Graph"</h3>
			<button type="submit" class=format!("{BTN_BASE} btn-clear")>"Clear Entire Graph"</button>
		</form>
	}
}

#[component]
fn WeightedToggle(session: GraphSession) -> impl IntoView {
	let weighted = session.weighted;
	view! {
		<div class="space-y-2">
			<h3 class="text-lg font-semibold text-white">"Graph Type"</h3>
			<div class="flex items-center justify-between p-2 bg-gray-900/70 border border-purple-700 rounded-md">
				<label for="isWeightedToggle" class="text-sm font-medium text-gray-200">
					{move || if weighted.get() { "Weighted" } else { "Unweighted" }}
				</label>
				<button
					type="button"
					id="isWeightedToggle"
					title=move || format!("Switch to {}", if weighted.get() { "Unweighted" } else { "Weighted" })
					class="toggle"
					data-on=move || weighted.get().to_string()
					on:click=move |_| weighted.update(|w| *w = !*w)
				>
					<span class="toggle-knob" />
				</button>
			</div>
		</div>
	}
}

#[component]
fn AddEdgeForm(session: GraphSession) -> impl IntoView {
	let source = RwSignal::new(String::new());
	let target = RwSignal::new(String::new());
	let weight = RwSignal::new(String::from("1"));
	let undirected = RwSignal::new(false);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let (s, t) = (source.get_untracked(), target.get_untracked());
		let w = session
			.weighted
			.get_untracked()
			.then(|| parse_weight(&weight.get_untracked()));
		let kind = edge_kind(undirected.get_untracked());
		if session.apply(|g| g.add_edge(&s, &t, w, kind)).is_some() {
			source.set(String::new());
			target.set(String::new());
			weight.set(String::from("1"));
			undirected.set(false);
		}
	};

	view! {
		<form on:submit=on_submit class="space-y-2">
			<h3 class="text-lg font-semibold text-white">"Add Edge"</h3>
			<EndpointInputs prefix="edge" source=source target=target />
			<Show when=move || session.weighted.get()>
				<label for="edgeWeight" class="block text-sm font-medium text-gray-200 mb-1">"Weight"</label>
				<input
					id="edgeWeight"
					type="number"
					min="0"
					class=INPUT
					prop:value=move || weight.get()
					on:input=move |ev| weight.set(event_target_value(&ev))
				/>
			</Show>
			<Checkbox id="isUndirected" label="Undirected" checked=undirected />
			<button type="submit" class=format!("{BTN_BASE} btn-primary")>"Add Edge"</button>
		</form>
	}
}

#[component]
fn RemoveEdgeForm(session: GraphSession) -> impl IntoView {
	let source = RwSignal::new(String::new());
	let target = RwSignal::new(String::new());
	let weight = RwSignal::new(String::from("1"));
	let undirected = RwSignal::new(false);
	let by_weight = RwSignal::new(false);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let (s, t) = (source.get_untracked(), target.get_untracked());
		let kind = edge_kind(undirected.get_untracked());
		let by = (session.weighted.get_untracked() && by_weight.get_untracked())
			.then(|| weight.get_untracked());
		let filter = match removal_weight(&s, &t, by.as_deref()) {
			Ok(filter) => filter,
			Err(e) => {
				session.report(e);
				return;
			}
		};
		if session.apply(|g| g.remove_edge(&s, &t, kind, filter)).is_some() {
			source.set(String::new());
			target.set(String::new());
			weight.set(String::from("1"));
			undirected.set(false);
			by_weight.set(false);
		}
	};

	view! {
		<form on:submit=on_submit class="space-y-2">
			<h3 class="text-lg font-semibold text-white">"Remove Edge"</h3>
			<EndpointInputs prefix="removeEdge" source=source target=target />
			<Checkbox id="isRemoveUndirected" label="Undirected" checked=undirected />
			<Show when=move || session.weighted.get()>
				<Checkbox id="isRemoveByWeight" label="Match weight" checked=by_weight />
				<Show when=move || by_weight.get()>
					<label for="removeEdgeWeight" class="block text-sm font-medium text-gray-200 mb-1">"Weight"</label>
					<input
						id="removeEdgeWeight"
						type="number"
						min="0"
						class=INPUT
						prop:value=move || weight.get()
						on:input=move |ev| weight.set(event_target_value(&ev))
					/>
				</Show>
			</Show>
			<button type="submit" class=format!("{BTN_BASE} btn-danger")>"Remove Edge"</button>
		</form>
	}
}

#[component]
fn EndpointInputs(
	prefix: &'static str,
	source: RwSignal<String>,
	target: RwSignal<String>,
) -> impl IntoView {
	let (source_id, target_id) = (format!("{prefix}Source"), format!("{prefix}Target"));
	view! {
		<div class="grid grid-cols-2 gap-2">
			<div>
				<label for=source_id.clone() class="block text-sm font-medium text-gray-200 mb-1">"Source"</label>
				<input
					id=source_id
					type="text"
					placeholder="e.g., A"
					class=INPUT
					prop:value=move || source.get()
					on:input=move |ev| source.set(event_target_value(&ev))
				/>
			</div>
			<div>
				<label for=target_id.clone() class="block text-sm font-medium text-gray-200 mb-1">"Target"</label>
				<input
					id=target_id
					type="text"
					placeholder="e.g., B"
					class=INPUT
					prop:value=move || target.get()
					on:input=move |ev| target.set(event_target_value(&ev))
				/>
			</div>
		</div>
	}
}

#[component]
fn Checkbox(id: &'static str, label: &'static str, checked: RwSignal<bool>) -> impl IntoView {
	view! {
		<div class="flex items-center">
			<input
				id=id
				type="checkbox"
				class="h-4 w-4 accent-amber-500"
				prop:checked=move || checked.get()
				on:change=move |ev| checked.set(event_target_checked(&ev))
			/>
			<label for=id class="ml-2 block text-sm text-gray-200">{label}</label>
		</div>
	}
}

#[component]
fn SpeedSlider(session: GraphSession) -> impl IntoView {
	let speed = session.animation_speed;
	view! {
		<div class="space-y-2">
			<label for="animationSpeed" class="block text-sm font-medium text-gray-200">
				"Animation Speed"
			</label>
			<input
				id="animationSpeed"
				type="range"
				min="0"
				max="100"
				class="w-full accent-amber-500"
				prop:value=move || speed.get().to_string()
				on:input=move |ev| {
					if let Ok(value) = event_target_value(&ev).parse::<u8>() {
						speed.set(value);
					}
				}
			/>
			<span class="text-xs text-gray-400">"Controls edge add/remove speed"</span>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_weight_falls_back_to_one() {
		assert_eq!(parse_weight("7"), 7);
		assert_eq!(parse_weight(" 12 "), 12);
		assert_eq!(parse_weight("0"), 1);
		assert_eq!(parse_weight(""), 1);
		assert_eq!(parse_weight("-3"), 1);
		assert_eq!(parse_weight("heavy"), 1);
	}

	#[test]
	fn add_weight_reads_the_leading_integer() {
		assert_eq!(parse_weight("3.7"), 3);
		assert_eq!(parse_weight("+5"), 5);
		assert_eq!(parse_weight("12kg"), 12);
		assert_eq!(parse_weight("99999999999"), Weight::MAX);
		assert_eq!(parse_weight("1e3"), 1);
	}

	#[test]
	fn match_weight_must_be_a_number() {
		assert_eq!(parse_match_weight("0"), Some(0));
		assert_eq!(parse_match_weight("4"), Some(4));
		assert_eq!(parse_match_weight("4.9"), Some(4));
		assert_eq!(parse_match_weight("four"), None);
		assert_eq!(parse_match_weight("-"), None);
		assert_eq!(parse_match_weight("-2"), None);
		assert_eq!(parse_match_weight("99999999999"), None);
	}

	#[test]
	fn removal_checks_endpoints_before_weight() {
		assert_eq!(
			removal_weight("", "B", Some("abc")),
			Err(GraphError::MissingEndpoints)
		);
		assert_eq!(
			removal_weight("A", "B", Some("abc")),
			Err(GraphError::EdgeNotFound)
		);
		assert_eq!(removal_weight("A", "B", Some("3")), Ok(Some(3)));
		assert_eq!(removal_weight("A", "B", None), Ok(None));
	}

	#[test]
	fn undirected_flag_selects_edge_kind() {
		assert_eq!(edge_kind(true), EdgeKind::Undirected);
		assert_eq!(edge_kind(false), EdgeKind::Directed);
	}
}
