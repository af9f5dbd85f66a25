//! Relative risk classification of per-file change/complexity metrics.

use serde::Deserialize;

/// One row of the heatmap returned by the analysis service.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FileMetric {
	pub file: String,
	pub changes: u64,
	pub complexity: f64,
}

/// Risk tier for a single file, relative to the current dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
	Low,
	Medium,
	High,
}

impl RiskLevel {
	/// CSS class used by the heatmap rows.
	pub fn css_class(self) -> &'static str {
		match self {
			RiskLevel::High => "high-risk",
			RiskLevel::Medium => "med-risk",
			RiskLevel::Low => "low-risk",
		}
	}
}

/// Hand-tuned classification thresholds. Kept as named values rather than
/// re-derived; they exist to visually separate files within one run.
#[derive(Clone, Copy, Debug)]
pub struct RiskThresholds {
	/// Both ratios above this mark a file high risk.
	pub high_change_ratio: f64,
	pub high_complexity_ratio: f64,
	/// Either condition alone marks a file medium risk.
	pub medium_complexity_ratio: f64,
	pub medium_change_ratio: f64,
}

impl Default for RiskThresholds {
	fn default() -> Self {
		Self {
			high_change_ratio: 0.5,
			high_complexity_ratio: 0.5,
			medium_complexity_ratio: 0.4,
			medium_change_ratio: 0.6,
		}
	}
}

/// Dataset maxima used to normalize each record. Floored at 1 so degenerate
/// datasets (all zeros, single file) never divide by zero.
#[derive(Clone, Copy, Debug)]
pub struct Maxima {
	pub changes: f64,
	pub complexity: f64,
}

impl Maxima {
	pub fn of(records: &[FileMetric]) -> Self {
		let changes = records
			.iter()
			.map(|r| r.changes as f64)
			.fold(1.0_f64, f64::max);
		let complexity = records.iter().map(|r| r.complexity).fold(1.0_f64, f64::max);
		Self {
			changes,
			complexity,
		}
	}
}

/// Classify one record against the dataset maxima. Priority order is fixed:
/// high, then medium, then low; the first rule that matches wins.
pub fn classify(record: &FileMetric, maxima: Maxima, t: &RiskThresholds) -> RiskLevel {
	let rel_change = record.changes as f64 / maxima.changes;
	let rel_comp = record.complexity / maxima.complexity;

	if rel_change > t.high_change_ratio && rel_comp > t.high_complexity_ratio {
		RiskLevel::High
	} else if rel_comp > t.medium_complexity_ratio || rel_change > t.medium_change_ratio {
		RiskLevel::Medium
	} else {
		RiskLevel::Low
	}
}

/// Risk level for every record, in input order. Empty in, empty out.
pub fn classify_all(records: &[FileMetric], t: &RiskThresholds) -> Vec<RiskLevel> {
	let maxima = Maxima::of(records);
	records.iter().map(|r| classify(r, maxima, t)).collect()
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

	#[test]
	fn worked_example() {
		let records = vec![metric("a.js", 10, 60.0), metric("b.js", 2, 5.0)];
		let levels = classify_all(&records, &RiskThresholds::default());
		assert_eq!(levels, vec![RiskLevel::High, RiskLevel::Low]);
	}

	#[test]
	fn medium_from_complexity_alone() {
		// b has rel_comp 0.5 > 0.4 but rel_change 0.1, so medium.
		let records = vec![metric("a", 100, 100.0), metric("b", 10, 50.0)];
		let levels = classify_all(&records, &RiskThresholds::default());
		assert_eq!(levels[1], RiskLevel::Medium);
	}

	#[test]
	fn medium_from_changes_alone() {
		let records = vec![metric("a", 100, 100.0), metric("b", 70, 1.0)];
		let levels = classify_all(&records, &RiskThresholds::default());
		assert_eq!(levels[1], RiskLevel::Medium);
	}

	#[test]
	fn empty_input_yields_empty_output() {
		let levels = classify_all(&[], &RiskThresholds::default());
		assert!(levels.is_empty());
	}

	#[test]
	fn all_zero_metrics_do_not_divide_by_zero() {
		let records = vec![metric("a", 0, 0.0), metric("b", 0, 0.0)];
		let levels = classify_all(&records, &RiskThresholds::default());
		assert_eq!(levels, vec![RiskLevel::Low, RiskLevel::Low]);
	}

	#[test]
	fn classification_is_order_invariant() {
		let a = metric("a", 10, 60.0);
		let b = metric("b", 7, 12.0);
		let c = metric("c", 2, 5.0);

		let forward = classify_all(&[a.clone(), b.clone(), c.clone()], &RiskThresholds::default());
		let backward = classify_all(&[c, b, a], &RiskThresholds::default());
		assert_eq!(forward[0], backward[2]);
		assert_eq!(forward[1], backward[1]);
		assert_eq!(forward[2], backward[0]);
	}

	#[test]
	fn every_record_gets_exactly_one_level() {
		// The high rule dominates medium: a record matching high never
		// falls through even though medium would also match it.
		let records = vec![metric("hot", 10, 10.0), metric("cold", 1, 1.0)];
		let maxima = Maxima::of(&records);
		let level = classify(&records[0], maxima, &RiskThresholds::default());
		assert_eq!(level, RiskLevel::High);
	}
}
