//! Narrative findings synthesized from the heatmap and run statistics.

use serde::Deserialize;

use super::risk::FileMetric;

/// Summary statistics for one analysis run, produced by the parse trigger.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RunStats {
	pub total_commits: u64,
	pub total_authors: u64,
	pub parse_time_seconds: f64,
}

/// Cutoffs behind the three findings. Hand-tuned, preserved as named values.
#[derive(Clone, Copy, Debug)]
pub struct InsightThresholds {
	pub critical_complexity: f64,
	pub moderate_complexity: f64,
	/// Share of total changes above which one file counts as a hotspot.
	pub hotspot_share: f64,
	/// Fewer distinct authors than this is a bus-factor risk.
	pub min_healthy_authors: u64,
}

impl Default for InsightThresholds {
	fn default() -> Self {
		Self {
			critical_complexity: 50.0,
			moderate_complexity: 20.0,
			hotspot_share: 0.1,
			min_healthy_authors: 2,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebtSeverity {
	Critical,
	Moderate,
	Manageable,
}

/// The three findings plus the numbers that justify them. The numerics are
/// exposed directly so consumers never have to parse them back out of the
/// rendered sentences.
#[derive(Clone, Debug, PartialEq)]
pub struct InsightReport {
	pub total_changes: u64,
	pub total_complexity: f64,
	pub avg_complexity: f64,
	pub highest_complexity_file: FileMetric,
	pub most_changed_file: FileMetric,
	pub debt_severity: DebtSeverity,
	/// Percentage of all changes attributed to the most changed file, only
	/// present when it crosses the hotspot share threshold.
	pub hotspot_share_pct: Option<f64>,
	pub bus_factor_risk: bool,
	pub debt_note: String,
	pub hotspot_note: String,
	pub sustainability_note: String,
}

/// Synthesize findings, or `None` when there are no records to reason about
/// (which also guards the hotspot division against a zero total).
pub fn synthesize(
	records: &[FileMetric],
	stats: &RunStats,
	t: &InsightThresholds,
) -> Option<InsightReport> {
	let first = records.first()?;

	let total_changes: u64 = records.iter().map(|r| r.changes).sum();
	let total_complexity: f64 = records.iter().map(|r| r.complexity).sum();
	let avg_complexity = total_complexity / records.len() as f64;

	// Ties break toward the first occurrence, so only strictly greater
	// values displace the current leader.
	let mut highest = first;
	let mut most_changed = first;
	for r in records {
		if r.complexity > highest.complexity {
			highest = r;
		}
		if r.changes > most_changed.changes {
			most_changed = r;
		}
	}

	let (debt_severity, debt_note) = if highest.complexity > t.critical_complexity {
		(
			DebtSeverity::Critical,
			format!(
				"Critical technical debt detected in {} (complexity: {}). High priority for refactoring.",
				highest.file, highest.complexity
			),
		)
	} else if highest.complexity > t.moderate_complexity {
		(
			DebtSeverity::Moderate,
			format!(
				"Moderate code complexity found in {}. Consider breaking down functions.",
				highest.file
			),
		)
	} else {
		(
			DebtSeverity::Manageable,
			format!(
				"Code complexity is generally manageable. Top complexity is {}.",
				highest.complexity
			),
		)
	};

	let hotspot_share_pct =
		if most_changed.changes as f64 > total_changes as f64 * t.hotspot_share {
			Some(most_changed.changes as f64 / total_changes as f64 * 100.0)
		} else {
			None
		};
	let hotspot_note = match hotspot_share_pct {
		Some(pct) => format!(
			"Module {} is a significant hotspot, accounting for {:.1}% of all parsed changes.",
			most_changed.file, pct
		),
		None => "Changes are well distributed across the codebase. No severe hotspots detected."
			.to_string(),
	};

	let bus_factor_risk = stats.total_authors < t.min_healthy_authors;
	let sustainability_note = if bus_factor_risk {
		"Bus factor risk: project relies heavily on a single contributor. Consider knowledge sharing."
			.to_string()
	} else {
		format!(
			"Contributor base looks healthy with {} developers collaborating across {} commits.",
			stats.total_authors, stats.total_commits
		)
	};

	Some(InsightReport {
		total_changes,
		total_complexity,
		avg_complexity,
		highest_complexity_file: highest.clone(),
		most_changed_file: most_changed.clone(),
		debt_severity,
		hotspot_share_pct,
		bus_factor_risk,
		debt_note,
		hotspot_note,
		sustainability_note,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn metric(file: &str, changes: u64, complexity: f64) -> FileMetric {
		FileMetric {
			file: file.into(),
			changes,
			complexity,
		}
	}

	fn stats(commits: u64, authors: u64) -> RunStats {
		RunStats {
			total_commits: commits,
			total_authors: authors,
			parse_time_seconds: 0.5,
		}
	}

	#[test]
	fn empty_heatmap_yields_no_insights() {
		let report = synthesize(&[], &stats(10, 3), &InsightThresholds::default());
		assert!(report.is_none());
	}

	#[test]
	fn critical_debt_cites_the_worst_file() {
		let records = vec![metric("a.js", 10, 60.0), metric("b.js", 2, 5.0)];
		let report = synthesize(&records, &stats(12, 2), &InsightThresholds::default()).unwrap();
		assert_eq!(report.debt_severity, DebtSeverity::Critical);
		assert_eq!(report.highest_complexity_file.file, "a.js");
		assert!(report.debt_note.contains("a.js"));
	}

	#[test]
	fn moderate_and_manageable_cutoffs() {
		let t = InsightThresholds::default();
		let moderate = synthesize(&[metric("m", 1, 30.0)], &stats(1, 2), &t).unwrap();
		assert_eq!(moderate.debt_severity, DebtSeverity::Moderate);

		let fine = synthesize(&[metric("f", 1, 20.0)], &stats(1, 2), &t).unwrap();
		assert_eq!(fine.debt_severity, DebtSeverity::Manageable);
	}

	#[test]
	fn hotspot_share_is_exposed_numerically() {
		// 10 of 12 changes = 83.3%.
		let records = vec![metric("hot", 10, 1.0), metric("cold", 2, 1.0)];
		let report = synthesize(&records, &stats(12, 3), &InsightThresholds::default()).unwrap();
		let pct = report.hotspot_share_pct.unwrap();
		assert!((pct - 83.333).abs() < 0.01);
		assert_eq!(report.most_changed_file.file, "hot");
		assert_eq!(report.total_changes, 12);
	}

	#[test]
	fn evenly_spread_changes_report_no_hotspot() {
		// 11 files with equal change counts: each holds ~9.1% < 10%.
		let records: Vec<_> = (0..11).map(|i| metric(&format!("f{i}"), 5, 1.0)).collect();
		let report = synthesize(&records, &stats(55, 4), &InsightThresholds::default()).unwrap();
		assert_eq!(report.hotspot_share_pct, None);
		assert!(report.hotspot_note.contains("well distributed"));
	}

	#[test]
	fn single_author_is_a_bus_factor_risk() {
		let records = vec![metric("a", 1, 1.0)];
		let solo = synthesize(&records, &stats(40, 1), &InsightThresholds::default()).unwrap();
		assert!(solo.bus_factor_risk);

		let team = synthesize(&records, &stats(40, 5), &InsightThresholds::default()).unwrap();
		assert!(!team.bus_factor_risk);
		assert!(team.sustainability_note.contains('5'));
	}

	#[test]
	fn ties_break_by_first_occurrence() {
		let records = vec![
			metric("first", 5, 9.0),
			metric("second", 5, 9.0),
			metric("third", 5, 9.0),
		];
		let report = synthesize(&records, &stats(15, 2), &InsightThresholds::default()).unwrap();
		assert_eq!(report.highest_complexity_file.file, "first");
		assert_eq!(report.most_changed_file.file, "first");
	}

	#[test]
	fn average_complexity() {
		let records = vec![metric("a", 1, 10.0), metric("b", 1, 20.0)];
		let report = synthesize(&records, &stats(2, 2), &InsightThresholds::default()).unwrap();
		assert!((report.avg_complexity - 15.0).abs() < f64::EPSILON);
	}
}
