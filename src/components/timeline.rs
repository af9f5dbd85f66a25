use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::__reexports::send_wrapper::SendWrapper;
use leptos::leptos_dom::helpers::{IntervalHandle, set_interval_with_handle};
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::analytics::replay::ReplayState;
use crate::analytics::timeline::{CommitRecord, TimeSeriesPoint, aggregate_by_day, day_bucket};

/// Playback cadence, fast enough that long histories replay in seconds.
const TICK_MS: u64 = 50;
const CHART_HEIGHT: f64 = 260.0;
const MARGIN: f64 = 10.0;

fn clear_interval(handle: &Rc<RefCell<Option<IntervalHandle>>>) {
	if let Some(h) = handle.borrow_mut().take() {
		h.clear();
	}
}

/// Line chart of the revealed prefix of the per-day series. The vertical
/// scale is fixed to the whole series so the shape doesn't jump mid-replay.
fn draw_chart(
	ctx: &CanvasRenderingContext2d,
	width: f64,
	series: &[TimeSeriesPoint],
	visible: &[TimeSeriesPoint],
) {
	ctx.set_fill_style_str("#111127");
	ctx.fill_rect(0.0, 0.0, width, CHART_HEIGHT);
	if visible.is_empty() {
		return;
	}

	let max_count = series.iter().map(|p| p.count).max().unwrap_or(1).max(1) as f64;
	let inner_w = width - 2.0 * MARGIN;
	let inner_h = CHART_HEIGHT - 2.0 * MARGIN;
	let point = |i: usize, count: u32| -> (f64, f64) {
		let x = if visible.len() == 1 {
			MARGIN + inner_w / 2.0
		} else {
			MARGIN + inner_w * i as f64 / (visible.len() - 1) as f64
		};
		let y = MARGIN + inner_h * (1.0 - count as f64 / max_count);
		(x, y)
	};

	// Filled area under the line.
	ctx.begin_path();
	let (x0, y0) = point(0, visible[0].count);
	ctx.move_to(x0, CHART_HEIGHT - MARGIN);
	ctx.line_to(x0, y0);
	for (i, p) in visible.iter().enumerate().skip(1) {
		let (x, y) = point(i, p.count);
		ctx.line_to(x, y);
	}
	let (xn, _) = point(visible.len() - 1, visible[visible.len() - 1].count);
	ctx.line_to(xn, CHART_HEIGHT - MARGIN);
	ctx.close_path();
	ctx.set_fill_style_str("rgba(139, 92, 246, 0.2)");
	ctx.fill();

	ctx.begin_path();
	ctx.move_to(x0, y0);
	for (i, p) in visible.iter().enumerate().skip(1) {
		let (x, y) = point(i, p.count);
		ctx.line_to(x, y);
	}
	ctx.set_stroke_style_str("#8b5cf6");
	ctx.set_line_width(2.0);
	ctx.stroke();

	// Dashed guide under the replay cursor.
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&wasm_bindgen::JsValue::from_f64(4.0),
		&wasm_bindgen::JsValue::from_f64(4.0),
	));
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.25)");
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(xn, MARGIN);
	ctx.line_to(xn, CHART_HEIGHT - MARGIN);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Commit-activity timeline with play/pause/scrub replay.
#[component]
pub fn TimelinePanel(#[prop(into)] commits: Signal<Vec<CommitRecord>>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let series = Memo::new(move |_| commits.with(|c| aggregate_by_day(c)));
	let replay = RwSignal::new(ReplayState::new(0));
	let ticker: Rc<RefCell<Option<IntervalHandle>>> = Rc::new(RefCell::new(None));

	// A new dataset invalidates any in-flight playback before the replay
	// state for the new series exists.
	let ticker_reset = ticker.clone();
	Effect::new(move |_| {
		let len = series.with(|s| s.len());
		clear_interval(&ticker_reset);
		replay.set(ReplayState::new(len));
	});

	let ticker_toggle = SendWrapper::new(ticker.clone());
	let on_toggle = move |_: web_sys::MouseEvent| {
		let mut state = replay.get();
		if state.playing() {
			state.pause();
			replay.set(state);
			clear_interval(&ticker_toggle);
			return;
		}
		state.play();
		replay.set(state);
		if !state.playing() {
			return;
		}
		let ticker_inner = ticker_toggle.clone();
		let handle = set_interval_with_handle(
			move || {
				let mut state = replay.get();
				state.tick();
				replay.set(state);
				if !state.playing() {
					// Auto-stop at the end of the series.
					clear_interval(&ticker_inner);
				}
			},
			Duration::from_millis(TICK_MS),
		);
		match handle {
			Ok(h) => *ticker_toggle.borrow_mut() = Some(h),
			Err(err) => warn!("failed to start replay ticker: {err:?}"),
		}
	};

	let ticker_scrub = SendWrapper::new(ticker.clone());
	let on_scrub = move |ev: web_sys::Event| {
		let value = event_target_value(&ev).parse::<usize>().unwrap_or(0);
		clear_interval(&ticker_scrub);
		replay.update(|state| state.scrub(value));
	};

	// Redraw whenever the revealed prefix changes.
	Effect::new(move |_| {
		let state = replay.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let width = canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.filter(|w| *w > 0.0)
			.unwrap_or(800.0);
		canvas.set_width(width as u32);
		canvas.set_height(CHART_HEIGHT as u32);
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		series.with(|s| draw_chart(&ctx, width, s, state.visible(s)));
	});

	let ticker_cleanup = SendWrapper::new(ticker.clone());
	on_cleanup(move || clear_interval(&ticker_cleanup.take()));

	let current_day = move || {
		series.with(|s| {
			replay
				.get()
				.visible(s)
				.last()
				.map(|p| p.day.clone())
				.unwrap_or_else(|| "No timeline Data".to_string())
		})
	};
	let max_index = move || series.with(|s| s.len().saturating_sub(1));

	// Most recent commit within the revealed window.
	let latest_commit = move || -> Option<String> {
		let last_day = series.with(|s| replay.get().visible(s).last().map(|p| p.day.clone()))?;
		commits.with(|all| {
			all.iter()
				.filter(|c| day_bucket(&c.date) <= last_day)
				.max_by_key(|c| c.date)
				.map(|c| {
					let short = c.hash.get(..7).unwrap_or(&c.hash);
					format!("{short} {} ({})", c.message, c.author)
				})
		})
	};

	view! {
		<Show
			when=move || series.with(|s| !s.is_empty())
			fallback=|| view! { <div class="viz-empty">"No timeline data"</div> }
		>
			<div>
				<div class="viz-container">
					<canvas node_ref=canvas_ref style="display: block;" />
				</div>
				<div class="timeline-controls">
					<button class="play-btn" on:click=on_toggle.clone()>
						{move || if replay.get().playing() { "Pause" } else { "Play" }}
					</button>
					<input
						type="range"
						min="0"
						max=move || max_index().to_string()
						prop:value=move || replay.get().cursor().to_string()
						on:input=on_scrub.clone()
					/>
					<div class="timeline-day">{current_day}</div>
				</div>
				<div class="timeline-latest">{move || latest_commit().unwrap_or_default()}</div>
			</div>
		</Show>
	}
}
