use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let mut pos = std::collections::HashMap::new();
	state.graph.visit_nodes(|node| {
		pos.insert(node.index(), (node.x() as f64, node.y() as f64));
	});

	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.2)");
	for &(src, tgt, value) in state.edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (pos.get(&src), pos.get(&tgt)) else {
			continue;
		};
		// Stroke thickness carries the edge weight; the layout does not.
		ctx.set_line_width(value.max(0.0).sqrt());
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;

		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if state.is_hovered(node.index()) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, info.radius + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.9)");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		let label = if state.is_hovered(node.index()) {
			format!("{} ({} commits)", info.label, info.val)
		} else {
			info.label.clone()
		};
		ctx.set_fill_style_str("#fff");
		ctx.set_font("10px sans-serif");
		let _ = ctx.fill_text(&label, x + info.radius + 3.0, y + 3.0);
	});
}
