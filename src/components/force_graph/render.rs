//! Canvas drawing: weighted arrowed links, rounded-rect nodes, wrapped labels,
//! and the hover tooltip. Every frame is a full clear-and-redraw of the most
//! recently computed tick's positions.

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_HALF_HEIGHT, NodeInfo};
use super::text;
use super::types::NodeKind;

/// Pixel budget for a label line before wrapping.
const LABEL_WRAP_WIDTH: f64 = 120.0;
const LABEL_FONT: &str = "12px sans-serif";
const LABEL_LINE_HEIGHT: f64 = 13.2;

/// Arrow tips back off this far from the target node's center.
const ARROW_OFFSET: f64 = 30.0;
const ARROW_SIZE: f64 = 10.0;

const TOOLTIP_FONT: &str = "12px sans-serif";
const TOOLTIP_LINE_HEIGHT: f64 = 16.0;
const TOOLTIP_PADDING: f64 = 8.0;

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#fafafa");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_tooltip(state, ctx);
}

/// Stroke width keyed to transition weight, clamped to a visible range.
fn stroke_width(weight: f64) -> f64 {
	(weight.sqrt() * 0.5).clamp(1.0, 5.0)
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	state.graph.visit_edges(|source, target, edge| {
		let (x1, y1) = (source.x() as f64, source.y() as f64);
		let (x2, y2) = (target.x() as f64, target.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let (tip_x, tip_y) = (x2 - ux * ARROW_OFFSET, y2 - uy * ARROW_OFFSET);

		ctx.set_stroke_style_str("rgba(153, 153, 153, 0.6)");
		ctx.set_line_width(stroke_width(edge.user_data.weight));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		ctx.stroke();

		// Filled triangular arrowhead at the target end.
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.set_fill_style_str("#999999");
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let measure = |s: &str| {
		ctx.measure_text(s)
			.map(|m| m.width())
			.unwrap_or(f64::INFINITY)
	};

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let half_w = info.half_width();
		// States get a slight corner rounding, actions a full pill.
		let radius = match info.kind {
			NodeKind::State => 5.0,
			NodeKind::Action => 25.0,
		};

		rounded_rect_path(
			ctx,
			x - half_w,
			y - NODE_HALF_HEIGHT,
			half_w * 2.0,
			NODE_HALF_HEIGHT * 2.0,
			radius,
		);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.set_stroke_style_str("#666666");
		ctx.set_line_width(1.5);
		ctx.stroke();

		let lines = text::wrap(&info.label, LABEL_WRAP_WIDTH, measure);
		let top = y - (lines.len().saturating_sub(1)) as f64 * LABEL_LINE_HEIGHT / 2.0;
		ctx.set_fill_style_str("#000000");
		for (i, line) in lines.iter().enumerate() {
			let _ = ctx.fill_text(line, x, top + i as f64 * LABEL_LINE_HEIGHT);
		}
	});
}

/// Summary panel near the pointer: id, kind, domain when present, and degree.
fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(hovered) = state.hover.node else {
		return;
	};
	let mut info: Option<NodeInfo> = None;
	state.graph.visit_nodes(|node| {
		if node.index() == hovered {
			info = Some(node.data.user_data.clone());
		}
	});
	let Some(info) = info else { return };

	let kind = match info.kind {
		NodeKind::State => "state",
		NodeKind::Action => "action",
	};
	let mut lines = vec![info.id.clone(), format!("Type: {kind}")];
	if let Some(domain) = &info.domain {
		lines.push(format!("Domain: {domain}"));
	}
	lines.push(format!("Connections: {}", info.degree));

	ctx.set_font(TOOLTIP_FONT);
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");
	let width = lines
		.iter()
		.map(|l| ctx.measure_text(l).map(|m| m.width()).unwrap_or(0.0))
		.fold(0.0, f64::max);
	let height = lines.len() as f64 * TOOLTIP_LINE_HEIGHT;

	let x = state.hover.screen_x + 12.0;
	let y = state.hover.screen_y + 12.0;
	rounded_rect_path(
		ctx,
		x,
		y,
		width + TOOLTIP_PADDING * 2.0,
		height + TOOLTIP_PADDING * 2.0,
		4.0,
	);
	ctx.set_fill_style_str("rgba(0, 0, 0, 0.75)");
	ctx.fill();
	ctx.set_fill_style_str("#ffffff");
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(
			line,
			x + TOOLTIP_PADDING,
			y + TOOLTIP_PADDING + i as f64 * TOOLTIP_LINE_HEIGHT,
		);
	}
}
