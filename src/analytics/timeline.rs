//! Day-level bucketing of raw commit timestamps into an ordered series.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One commit as returned by the analysis service. Only `date` feeds the
/// aggregation; the remaining fields surface in the UI.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CommitRecord {
	pub hash: String,
	pub author: String,
	pub date: DateTime<Utc>,
	pub message: String,
}

/// Commit count for one calendar day (`YYYY-MM-DD`, UTC).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSeriesPoint {
	pub day: String,
	pub count: u32,
}

/// Format a timestamp into its UTC day bucket key.
pub fn day_bucket(ts: &DateTime<Utc>) -> String {
	ts.format("%Y-%m-%d").to_string()
}

/// Group commits by calendar day. The BTreeMap keeps the keys sorted, and
/// lexicographic order on `YYYY-MM-DD` is chronological order.
pub fn aggregate_by_day(commits: &[CommitRecord]) -> Vec<TimeSeriesPoint> {
	let mut buckets: BTreeMap<String, u32> = BTreeMap::new();
	for commit in commits {
		*buckets.entry(day_bucket(&commit.date)).or_insert(0) += 1;
	}
	buckets
		.into_iter()
		.map(|(day, count)| TimeSeriesPoint { day, count })
		.collect()
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;

	use super::*;

	fn commit(y: i32, m: u32, d: u32, h: u32) -> CommitRecord {
		CommitRecord {
			hash: format!("{y}{m}{d}{h}"),
			author: "alice".into(),
			date: Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
			message: "change".into(),
		}
	}

	#[test]
	fn day_bucket_format() {
		let ts = Utc.with_ymd_and_hms(2024, 1, 3, 23, 59, 59).unwrap();
		assert_eq!(day_bucket(&ts), "2024-01-03");
	}

	#[test]
	fn worked_example() {
		let commits = vec![
			commit(2024, 1, 1, 9),
			commit(2024, 1, 1, 17),
			commit(2024, 1, 3, 12),
		];
		let series = aggregate_by_day(&commits);
		assert_eq!(
			series,
			vec![
				TimeSeriesPoint {
					day: "2024-01-01".into(),
					count: 2
				},
				TimeSeriesPoint {
					day: "2024-01-03".into(),
					count: 1
				},
			]
		);
	}

	#[test]
	fn buckets_are_strictly_increasing_and_counts_sum_to_input() {
		let commits = vec![
			commit(2024, 3, 5, 1),
			commit(2023, 12, 31, 1),
			commit(2024, 3, 5, 2),
			commit(2024, 1, 1, 1),
			commit(2024, 3, 4, 1),
		];
		let series = aggregate_by_day(&commits);
		for pair in series.windows(2) {
			assert!(pair[0].day < pair[1].day);
		}
		let total: u32 = series.iter().map(|p| p.count).sum();
		assert_eq!(total as usize, commits.len());
	}

	#[test]
	fn empty_input_yields_empty_series() {
		assert!(aggregate_by_day(&[]).is_empty());
	}

	#[test]
	fn commits_with_offsets_bucket_by_utc_day() {
		// 2024-06-01T23:30:00+05:00 is 18:30 UTC the same day.
		let date: DateTime<Utc> = "2024-06-01T23:30:00+05:00".parse().unwrap();
		let commits = vec![CommitRecord {
			hash: "abc".into(),
			author: "bob".into(),
			date,
			message: "m".into(),
		}];
		let series = aggregate_by_day(&commits);
		assert_eq!(series[0].day, "2024-06-01");
	}
}
