use leptos::prelude::*;

use crate::analytics::risk::{FileMetric, RiskLevel, RiskThresholds, classify, Maxima};

/// Complexity above which the raw number is rendered in the warning accent.
const COMPLEXITY_WARN: f64 = 30.0;

/// Per-file change/complexity list with a relative risk class per row.
/// Risk is recomputed from the dataset on every render, never stored.
#[component]
pub fn Heatmap(#[prop(into)] data: Signal<Vec<FileMetric>>) -> impl IntoView {
	let thresholds = RiskThresholds::default();

	view! {
		<Show
			when=move || data.with(|d| !d.is_empty())
			fallback=|| view! { <div class="viz-empty">"No file data available"</div> }
		>
			<div class="file-list">
				<div class="file-item file-item-header">
					<span>"File Name"</span>
					<div class="file-stats">
						<span class="col">"Changes"</span>
						<span class="col">"Complexity"</span>
					</div>
				</div>
				{move || {
					let records = data.get();
					let maxima = Maxima::of(&records);
					records
						.iter()
						.map(|record| {
							let level = classify(record, maxima, &thresholds);
							let marker = match level {
								RiskLevel::High => "!",
								RiskLevel::Medium => "~",
								RiskLevel::Low => "✓",
							};
							view! {
								<div
									class=format!("file-item {}", level.css_class())
									title=record.file.clone()
								>
									<div class="file-name">{record.file.clone()}</div>
									<div class="file-stats">
										<span class="col changes">{record.changes}</span>
										<span
											class="col"
											class:warn={record.complexity > COMPLEXITY_WARN}
										>
											{record.complexity}
										</span>
										<span class="risk-marker">{marker}</span>
									</div>
								</div>
							}
						})
						.collect_view()
				}}
			</div>
		</Show>
	}
}
