use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::__reexports::send_wrapper::SendWrapper;
use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;

/// Canvas position of a mouse event.
fn event_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Force-directed contributor network on a canvas. The simulation is rebuilt
/// whenever the dataset changes and never started for an empty node set.
#[component]
pub fn ContributorGraph(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = 350.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let ctx_cell: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let raf_running = Rc::new(Cell::new(false));
	let raf_id = Rc::new(Cell::new(0_i32));
	let (state_init, ctx_init, animate_init) = (state.clone(), ctx_cell.clone(), animate.clone());
	let (raf_running_init, raf_id_init) = (raf_running.clone(), raf_id.clone());

	let has_nodes = Signal::derive(move || data.with(|d| !d.nodes.is_empty()));

	Effect::new(move |_| {
		let graph_data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			// Canvas unmounted (empty dataset): drop any running simulation.
			*state_init.borrow_mut() = None;
			*ctx_init.borrow_mut() = None;
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		if graph_data.nodes.is_empty() {
			*state_init.borrow_mut() = None;
			*ctx_init.borrow_mut() = None;
			return;
		}

		let width = canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.filter(|w| *w > 0.0)
			.unwrap_or(800.0);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		debug!(
			"contributor graph: {} nodes, {} links",
			graph_data.nodes.len(),
			graph_data.links.len()
		);
		// Replace the old dataset's simulation before the next frame runs.
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph_data, width, height));
		*ctx_init.borrow_mut() = Some(ctx);

		if raf_running_init.get() {
			return;
		}

		if animate_init.borrow().is_none() {
			let (state_anim, ctx_anim, animate_inner) =
				(state_init.clone(), ctx_init.clone(), animate_init.clone());
			let (raf_running_anim, raf_id_anim) = (raf_running_init.clone(), raf_id_init.clone());
			*animate_init.borrow_mut() = Some(Closure::new(move || {
				let mut state_guard = state_anim.borrow_mut();
				let ctx_guard = ctx_anim.borrow();
				let Some(s) = state_guard.as_mut() else {
					// Dataset went away: let the loop end. The effect
					// restarts it when a new simulation is built.
					raf_running_anim.set(false);
					return;
				};
				if let Some(ctx) = ctx_guard.as_ref() {
					s.step(0.016);
					render::render(s, ctx);
				}
				drop(state_guard);
				drop(ctx_guard);
				if let Some(ref cb) = *animate_inner.borrow() {
					if let Ok(id) = web_sys::window()
						.unwrap()
						.request_animation_frame(cb.as_ref().unchecked_ref())
					{
						raf_id_anim.set(id);
					}
				}
			}));
		}
		raf_running_init.set(true);
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref())
			{
				raf_id_init.set(id);
			}
		}
	});

	// Unmount must leave no scheduled frame behind: cancel the pending
	// request, then drop the closure (it holds an `Rc` back to its own
	// cell) and the simulation it was stepping.
	let (animate_cleanup, state_cleanup, ctx_cleanup) =
		(animate.clone(), state.clone(), ctx_cell.clone());
	let (raf_running_cleanup, raf_id_cleanup) = (raf_running.clone(), raf_id.clone());
	let cleanup = SendWrapper::new(move || {
		if let Some(window) = web_sys::window() {
			window.cancel_animation_frame(raf_id_cleanup.get()).ok();
		}
		raf_running_cleanup.set(false);
		*animate_cleanup.borrow_mut() = None;
		*state_cleanup.borrow_mut() = None;
		*ctx_cleanup.borrow_mut() = None;
	});
	on_cleanup(move || cleanup.take()());

	let state_md = SendWrapper::new(state.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_drag(x, y);
		}
	};

	let state_mm = SendWrapper::new(state.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				s.drag_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
		}
	};

	let state_mu = SendWrapper::new(state.clone());
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
		}
	};

	let state_ml = SendWrapper::new(state.clone());
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
			s.set_hover(None);
		}
	};

	view! {
		<Show
			when=move || has_nodes.get()
			fallback=|| {
				view! {
					<div class="viz-empty">"Not enough contributor data for network graph"</div>
				}
			}
		>
			<div class="viz-container">
				<canvas
					node_ref=canvas_ref
					class="contributor-graph-canvas"
					on:mousedown=on_mousedown.clone()
					on:mousemove=on_mousemove.clone()
					on:mouseup=on_mouseup.clone()
					on:mouseleave=on_mouseleave.clone()
					style="display: block; cursor: grab;"
				/>
			</div>
		</Show>
	}
}
