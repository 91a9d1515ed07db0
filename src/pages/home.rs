use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::graph_editor::GraphEditor;
use crate::editor::GraphOptions;

/// Query string that starts a session with the given options.
fn session_href(options: GraphOptions) -> String {
	format!(
		"/?weighted={}&directed={}&start=1",
		u8::from(options.weighted),
		u8::from(options.directed)
	)
}

/// Startup form asking whether the graph is weighted and directed.
#[component]
fn SessionSetup() -> impl IntoView {
	let (weighted, set_weighted) = signal(false);
	let (directed, set_directed) = signal(false);
	let navigate = use_navigate();
	let start = move |_| {
		let options = GraphOptions::new(weighted.get(), directed.get());
		navigate(&session_href(options), NavigateOptions::default());
	};

	view! {
		<div class="session-setup">
			<h1>"Graph Editor"</h1>
			<label>
				<input
					type="checkbox"
					prop:checked=weighted
					on:change=move |ev| set_weighted.set(event_target_checked(&ev))
				/>
				"Weighted graph"
			</label>
			<label>
				<input
					type="checkbox"
					prop:checked=directed
					on:change=move |ev| set_directed.set(event_target_checked(&ev))
				/>
				"Directed graph"
			</label>
			<button on:click=start>"Start"</button>
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let options = move || {
		query.with(|q| {
			GraphOptions::new(
				GraphOptions::parse_flag(q.get("weighted").as_deref()),
				GraphOptions::parse_flag(q.get("directed").as_deref()),
			)
		})
	};
	let started = move || query.with(|q| q.get("start").is_some());

	view! {
		<Show when=started fallback=|| view! { <SessionSetup /> }>
			<div class="fullscreen-graph">
				{move || view! { <GraphEditor options=options() fullscreen=true /> }}
			</div>
		</Show>
	}
}
