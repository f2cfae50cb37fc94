//! Canvas 2D backend: replays a scene on a `CanvasRenderingContext2d`

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawCmd, Scene};

/// Look up the 2D context of a canvas
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

/// Paint every command in order
pub fn paint(ctx: &CanvasRenderingContext2d, width: f64, height: f64, scene: &Scene) {
    for cmd in scene {
        match cmd {
            DrawCmd::Clear => ctx.clear_rect(0.0, 0.0, width, height),
            DrawCmd::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                ctx.begin_path();
                let _ = ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    radius.max(0.0) as f64,
                    0.0,
                    TAU,
                );
                ctx.set_fill_style_str(fill);
                ctx.fill();
                if *stroke {
                    ctx.stroke();
                }
                ctx.close_path();
            }
            DrawCmd::RotatedRect {
                center,
                size,
                angle,
                fill,
            } => {
                ctx.save();
                let _ = ctx.translate(center.x as f64, center.y as f64);
                let _ = ctx.rotate(*angle as f64);
                ctx.set_fill_style_str(fill);
                ctx.fill_rect(
                    -size.x as f64 / 2.0,
                    -size.y as f64 / 2.0,
                    size.x as f64,
                    size.y as f64,
                );
                ctx.restore();
            }
            DrawCmd::Text {
                pos,
                text,
                fill,
                font,
            } => {
                ctx.set_fill_style_str(fill);
                ctx.set_font(font);
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
        }
    }
}
