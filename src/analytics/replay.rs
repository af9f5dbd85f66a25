//! Playback state machine for the commit timeline.
//!
//! The cursor marks how much of the time series is revealed. All transitions
//! are plain methods on the state so they can be unit tested without a
//! rendering surface; the timeline component drives `tick` from an interval.

use super::timeline::TimeSeriesPoint;

/// Current playback position over a series of fixed length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayState {
	playing: bool,
	cursor: usize,
	len: usize,
}

impl ReplayState {
	/// Fresh state for a new dataset: cursor at the start, not playing.
	pub fn new(len: usize) -> Self {
		Self {
			playing: false,
			cursor: 0,
			len,
		}
	}

	pub fn playing(&self) -> bool {
		self.playing
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	fn last_index(&self) -> usize {
		self.len.saturating_sub(1)
	}

	/// Start playback. A finished replay restarts from the beginning.
	/// No-op on an empty series.
	pub fn play(&mut self) {
		if self.len == 0 {
			return;
		}
		if self.cursor >= self.last_index() {
			self.cursor = 0;
		}
		self.playing = true;
	}

	pub fn pause(&mut self) {
		self.playing = false;
	}

	/// Jump to an index (clamped to the series) and stop playback, matching
	/// a user grabbing the range slider. No-op on an empty series.
	pub fn scrub(&mut self, index: usize) {
		if self.len == 0 {
			return;
		}
		self.cursor = index.min(self.last_index());
		self.playing = false;
	}

	/// One cadence step. Advances the cursor while playing; on reaching the
	/// final index playback stops and the cursor holds.
	pub fn tick(&mut self) {
		if !self.playing {
			return;
		}
		if self.cursor < self.last_index() {
			self.cursor += 1;
		}
		if self.cursor >= self.last_index() {
			self.playing = false;
		}
	}

	/// The revealed prefix of the series, inclusive of the cursor.
	pub fn visible<'a>(&self, series: &'a [TimeSeriesPoint]) -> &'a [TimeSeriesPoint] {
		let end = (self.cursor + 1).min(series.len());
		&series[..end]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn series(days: &[(&str, u32)]) -> Vec<TimeSeriesPoint> {
		days.iter()
			.map(|(day, count)| TimeSeriesPoint {
				day: (*day).into(),
				count: *count,
			})
			.collect()
	}

	#[test]
	fn play_then_tick_through_worked_example() {
		// Days 2024-01-01 (x2) and 2024-01-03 aggregate to a 2-point series.
		let s = series(&[("2024-01-01", 2), ("2024-01-03", 1)]);
		let mut replay = ReplayState::new(s.len());
		assert_eq!(replay.visible(&s).len(), 1);

		replay.play();
		replay.tick();
		replay.tick();
		assert_eq!(replay.cursor(), 1);
		assert!(!replay.playing());
		assert_eq!(replay.visible(&s).len(), 2);
	}

	#[test]
	fn tick_never_passes_the_end() {
		let mut replay = ReplayState::new(3);
		replay.play();
		for _ in 0..10 {
			replay.tick();
		}
		assert_eq!(replay.cursor(), 2);
		assert!(!replay.playing());
	}

	#[test]
	fn auto_stop_fires_exactly_once() {
		let mut replay = ReplayState::new(2);
		replay.play();
		replay.tick();
		assert!(!replay.playing());
		let stopped = replay;
		// Further ticks while stopped change nothing.
		replay.tick();
		assert_eq!(replay, stopped);
	}

	#[test]
	fn play_on_finished_series_restarts() {
		let mut replay = ReplayState::new(3);
		replay.scrub(2);
		replay.play();
		assert_eq!(replay.cursor(), 0);
		assert!(replay.playing());
	}

	#[test]
	fn scrub_clamps_and_pauses() {
		let mut replay = ReplayState::new(4);
		replay.play();
		replay.scrub(99);
		assert_eq!(replay.cursor(), 3);
		assert!(!replay.playing());
	}

	#[test]
	fn empty_series_rejects_play_and_scrub() {
		let mut replay = ReplayState::new(0);
		replay.play();
		assert!(!replay.playing());
		replay.scrub(5);
		assert_eq!(replay.cursor(), 0);
		replay.tick();
		assert_eq!(replay, ReplayState::new(0));
		assert!(replay.visible(&[]).is_empty());
	}

	#[test]
	fn single_point_series_finishes_immediately() {
		let mut replay = ReplayState::new(1);
		replay.play();
		// Already at the last index; the first tick only stops playback.
		replay.tick();
		assert_eq!(replay.cursor(), 0);
		assert!(!replay.playing());
	}

	#[test]
	fn new_dataset_resets_position() {
		let mut replay = ReplayState::new(5);
		replay.play();
		replay.tick();
		replay = ReplayState::new(3);
		assert_eq!(replay.cursor(), 0);
		assert!(!replay.playing());
	}
}
