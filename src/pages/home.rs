//! Graph explorer page: domain selector, stats panel, legend, and the canvas.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::api::{self, Domain, RequestGeneration};
use crate::components::force_graph::{ForceGraphCanvas, GraphSnapshot, fallback};
use crate::components::force_graph::stats::GraphStats;

/// Swatch colors and captions shown next to the graph.
const LEGEND: [(&str, &str); 9] = [
	("green", "Start state"),
	("red", "End state"),
	("lightblue", "Plain state"),
	("orange", "No-result state"),
	("lightgreen", "Booked state"),
	("purple", "Multi-domain state"),
	("yellow", "Request action"),
	("lightpink", "Inform/recommend action"),
	("purple", "Book action"),
];

/// The fallback dataset, restricted to the selected domain's context.
fn fallback_for(domain: Domain) -> GraphSnapshot {
	let sample = fallback::sample_snapshot();
	match domain {
		Domain::All => sample,
		other => sample.filter_domain(other.as_str()),
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (domain, set_domain) = signal(Domain::All);
	let (loading, set_loading) = signal(true);
	let (error, set_error) = signal(None::<String>);
	let (snapshot, set_snapshot) = signal(GraphSnapshot::default());
	let (stats, set_stats) = signal(None::<GraphStats>);
	let generation = StoredValue::new(RequestGeneration::default());

	let apply = move |snap: GraphSnapshot| {
		set_stats.set(Some(GraphStats::compute(&snap)));
		set_snapshot.set(snap);
	};

	Effect::new(move |_| {
		let selected = domain.get();
		let token = generation
			.try_update_value(|g| g.begin())
			.unwrap_or_default();
		set_loading.set(true);
		spawn_local(async move {
			let result = api::fetch_snapshot(selected).await;
			// A newer domain selection supersedes this request entirely.
			if !generation.with_value(|g| g.is_current(token)) {
				return;
			}
			match result {
				Ok(snap) => {
					set_error.set(None);
					apply(snap);
				}
				Err(err) => {
					warn!("graph fetch failed, using fallback data: {err}");
					set_error.set(Some(format!("Failed to load graph data: {err}")));
					apply(fallback_for(selected));
				}
			}
			set_loading.set(false);
		});
	});

	view! {
		<div class="multiwoz-graph-container">
			<div class="controls">
				<h2>"MultiWOZ State-Action Space"</h2>
				<div class="domain-selector">
					<label attr:for="domain-select">"Domain:"</label>
					<select
						id="domain-select"
						prop:value=move || domain.get().as_str()
						prop:disabled=move || loading.get()
						on:change=move |ev| {
							set_domain.set(Domain::from_value(&event_target_value(&ev)))
						}
					>
						{Domain::ALL
							.into_iter()
							.map(|d| view! { <option value=d.as_str()>{d.label()}</option> })
							.collect_view()}
					</select>
				</div>

				{move || {
					stats
						.get()
						.map(|s| {
							view! {
								<div class="graph-stats">
									<h3>"Graph statistics"</h3>
									<div class="stat-item">
										<span class="stat-label">"Total nodes:"</span>
										<span class="stat-value">{s.total_nodes}</span>
									</div>
									<div class="stat-item">
										<span class="stat-label">"State nodes:"</span>
										<span class="stat-value">{s.state_count}</span>
									</div>
									<div class="stat-item">
										<span class="stat-label">"Action nodes:"</span>
										<span class="stat-value">{s.action_count}</span>
									</div>
									<div class="stat-item">
										<span class="stat-label">"Links:"</span>
										<span class="stat-value">{s.total_links}</span>
									</div>
									{s.most_connected
										.map(|(id, degree)| {
											view! {
												<div class="stat-item">
													<span class="stat-label">"Most connected:"</span>
													<span class="stat-value">
														{format!("{id} ({degree} links)")}
													</span>
												</div>
											}
										})}
								</div>
							}
						})
				}}

				<div class="legend">
					<h3>"Legend"</h3>
					{LEGEND
						.into_iter()
						.map(|(color, caption)| {
							view! {
								<div class="legend-item">
									<span class="legend-color" style:background-color=color></span>
									<span>{caption}</span>
								</div>
							}
						})
						.collect_view()}
				</div>

				<div class="instructions">
					<p>"Drag nodes to reposition, scroll to zoom, hover a node for details."</p>
					<p>"Link thickness reflects transition frequency."</p>
				</div>
			</div>

			<div class="graph-container">
				{move || loading.get().then(|| view! { <div class="loading">"Loading..."</div> })}
				{move || error.get().map(|msg| view! { <div class="error">{msg}</div> })}
				<ForceGraphCanvas data=snapshot />
			</div>
		</div>
	}
}
