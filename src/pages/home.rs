use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use crate::analytics::insights::RunStats;
use crate::analytics::risk::FileMetric;
use crate::analytics::timeline::CommitRecord;
use crate::api::{self, ApiError};
use crate::components::force_graph::{ContributorGraph, GraphData};
use crate::components::heatmap::Heatmap;
use crate::components::insights_panel::InsightsPanel;
use crate::components::timeline::TimelinePanel;

/// Everything one analysis run produces, fetched as a unit so the page
/// never shows datasets from two different runs side by side.
async fn load_run(
	repo_path: &str,
) -> Result<(RunStats, Vec<CommitRecord>, Vec<FileMetric>, GraphData), ApiError> {
	let stats = api::trigger_parse(repo_path).await?;
	let commits = api::fetch_commits(repo_path).await?;
	let heatmap = api::fetch_heatmap(repo_path).await?;
	let network = api::fetch_network(repo_path).await?;
	Ok((stats, commits, heatmap, network))
}

/// The dashboard: repository input plus the four analysis panels.
#[component]
pub fn Home() -> impl IntoView {
	let repo_path = RwSignal::new("..".to_string());
	let loading = RwSignal::new(false);
	let error_msg = RwSignal::new(String::new());

	let stats = RwSignal::new(None::<RunStats>);
	let commits = RwSignal::new(Vec::<CommitRecord>::new());
	let heatmap = RwSignal::new(Vec::<FileMetric>::new());
	let network = RwSignal::new(GraphData::default());

	let analyze = move |_| {
		let path = repo_path.get();
		if path.trim().is_empty() || loading.get() {
			return;
		}
		loading.set(true);
		error_msg.set(String::new());
		spawn_local(async move {
			match load_run(&path).await {
				Ok((s, c, h, n)) => {
					info!(
						"analysis run loaded: {} commits, {} files, {} contributors",
						s.total_commits,
						h.len(),
						n.nodes.len()
					);
					stats.set(Some(s));
					commits.set(c);
					heatmap.set(h);
					network.set(n);
				}
				Err(err) => {
					error!("analysis failed: {err}");
					// A failed run must not leave the previous run's data
					// on screen as if it were current.
					stats.set(None);
					commits.set(Vec::new());
					heatmap.set(Vec::new());
					network.set(GraphData::default());
					error_msg.set(err.to_string());
				}
			}
			loading.set(false);
		});
	};

	let run_stats = Signal::derive(move || {
		stats.get().unwrap_or(RunStats {
			total_commits: 0,
			total_authors: 0,
			parse_time_seconds: 0.0,
		})
	});

	view! {
		<div class="app-container">
			<Show when=move || loading.get()>
				<div class="loading-overlay">
					<div class="loader"></div>
					<h2>{move || format!("Parsing repository... ({})", repo_path.get())}</h2>
					<p>"Analyzing commits, file changes, and complexity"</p>
				</div>
			</Show>

			<header class="header">
				<h1>"Git History Time Traveller"</h1>
				<div class="repo-input-container">
					<input
						type="text"
						class="repo-input"
						placeholder="Absolute path to git repo"
						prop:value=move || repo_path.get()
						on:input=move |ev| repo_path.set(event_target_value(&ev))
					/>
					<button class="btn" on:click=analyze disabled=move || loading.get()>
						"Analyze Repo"
					</button>
				</div>
			</header>

			<Show when=move || !error_msg.get().is_empty()>
				<div class="error-banner">{move || error_msg.get()}</div>
			</Show>

			<Show
				when=move || stats.get().is_some()
				fallback=|| {
					view! {
						<div class="empty-state">
							<h2>"Explore your repository's history"</h2>
							<p>"Enter a repository path above and hit Analyze."</p>
						</div>
					}
				}
			>
				<main class="main-content">
					<div class="full-width stats-grid">
						<div class="stat-card">
							<div class="stat-value">{move || run_stats.get().total_commits}</div>
							<div class="stat-label">"Commits Parsed"</div>
						</div>
						<div class="stat-card">
							<div class="stat-value">{move || run_stats.get().total_authors}</div>
							<div class="stat-label">"Contributors"</div>
						</div>
						<div class="stat-card">
							<div class="stat-value">{move || heatmap.with(|h| h.len())}</div>
							<div class="stat-label">"Hotspot Files"</div>
						</div>
						<div class="stat-card">
							<div class="stat-value">
								{move || format!("{:.2}s", run_stats.get().parse_time_seconds)}
							</div>
							<div class="stat-label">"Parse Time"</div>
						</div>
					</div>

					<div class="glass-panel full-width">
						<h2 class="dashboard-title">"Interactive Timeline"</h2>
						<TimelinePanel commits=commits />
					</div>

					<div class="glass-panel">
						<h2 class="dashboard-title">"Complexity Heatmap"</h2>
						<Heatmap data=heatmap />
					</div>

					<div class="glass-panel">
						<h2 class="dashboard-title">"Contributor Network"</h2>
						<ContributorGraph data=network />
					</div>

					<div class="glass-panel full-width">
						<h2 class="dashboard-title">"Insights"</h2>
						<InsightsPanel heatmap=heatmap stats=run_stats />
					</div>
				</main>
			</Show>
		</div>
	}
}
