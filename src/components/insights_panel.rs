use leptos::prelude::*;

use crate::analytics::insights::{DebtSeverity, InsightThresholds, RunStats, synthesize};
use crate::analytics::risk::FileMetric;

/// Three findings cards (technical debt, change hotspots, sustainability)
/// with the numbers that back them up.
#[component]
pub fn InsightsPanel(
	#[prop(into)] heatmap: Signal<Vec<FileMetric>>,
	#[prop(into)] stats: Signal<RunStats>,
) -> impl IntoView {
	let thresholds = InsightThresholds::default();
	let report = Memo::new(move |_| {
		heatmap.with(|records| stats.with(|s| synthesize(records, s, &thresholds)))
	});

	view! {
		{move || match report.get() {
			None => view! { <div class="viz-empty">"No insights available yet"</div> }.into_any(),
			Some(report) => {
				let severity_class = match report.debt_severity {
					DebtSeverity::Critical => "severity-critical",
					DebtSeverity::Moderate => "severity-moderate",
					DebtSeverity::Manageable => "severity-ok",
				};
				view! {
					<div class="insights-grid">
						<div class=format!("insight-card debt {severity_class}")>
							<h3>"Technical Debt Tracking"</h3>
							<p>{report.debt_note.clone()}</p>
							<div class="insight-footnote">
								{format!(
									"Average analyzed complexity: {:.1} (total {:.0}, peak {} in {})",
									report.avg_complexity,
									report.total_complexity,
									report.highest_complexity_file.complexity,
									report.highest_complexity_file.file,
								)}
							</div>
						</div>
						<div class="insight-card hotspot">
							<h3>"Change Hotspots"</h3>
							<p>{report.hotspot_note.clone()}</p>
							<div class="insight-footnote">
								{format!("Total file changes analyzed: {}", report.total_changes)}
								{report
									.hotspot_share_pct
									.map(|pct| {
										format!(
											" | {} holds {:.1}%",
											report.most_changed_file.file,
											pct,
										)
									})}
							</div>
						</div>
						<div
							class="insight-card sustainability"
							class=("at-risk", report.bus_factor_risk)
						>
							<h3>"Project Sustainability"</h3>
							<p>{report.sustainability_note.clone()}</p>
						</div>
					</div>
				}
					.into_any()
			}
		}}
	}
}
