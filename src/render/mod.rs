//! Scene building
//!
//! Each game's scene is a pure function of its simulation state: a flat list
//! of draw commands. The Canvas 2D backend (wasm only) replays them; tests
//! inspect them directly.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::sim::{ShooterState, WordPopState};

pub const BUBBLE_FILL: &str = "rgba(0, 150, 255, 0.7)";
pub const BUBBLE_POP_FILL: &str = "rgba(255, 0, 0, 0.7)";
pub const BUBBLE_LABEL: &str = "#fff";
pub const BUBBLE_FONT: &str = "22px Arial";
pub const TARGET_FILL: &str = "yellow";

/// One canvas drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole canvas
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        fill: &'static str,
        /// Stroke the outline with the current default stroke style
        stroke: bool,
    },
    /// Axis-aligned `size` rectangle centered on `center`, rotated by `angle`
    RotatedRect {
        center: Vec2,
        size: Vec2,
        angle: f32,
        fill: &'static str,
    },
    /// Text centered on `pos`
    Text {
        pos: Vec2,
        text: String,
        fill: &'static str,
        font: &'static str,
    },
}

/// A frame's worth of draw commands, painted in order
pub type Scene = Vec<DrawCmd>;

/// Word Pop frame. A stopped game renders as a cleared canvas.
pub fn wordpop_scene(state: &WordPopState) -> Scene {
    let mut scene = vec![DrawCmd::Clear];
    if !state.is_running() {
        return scene;
    }
    for bubble in &state.bubbles {
        let fill = if bubble.popping {
            BUBBLE_POP_FILL
        } else {
            BUBBLE_FILL
        };
        scene.push(DrawCmd::Circle {
            center: bubble.pos,
            radius: bubble.radius,
            fill,
            stroke: true,
        });
        scene.push(DrawCmd::Text {
            pos: bubble.pos,
            text: bubble.word.clone(),
            fill: BUBBLE_LABEL,
            font: BUBBLE_FONT,
        });
    }
    scene
}

/// Color Cannon frame: target, cannon, shots, then approaching balls
pub fn shooter_scene(state: &ShooterState) -> Scene {
    use crate::consts::{CANNON_LENGTH, CANNON_WIDTH};

    let mut scene = Vec::with_capacity(3 + state.cannonballs.len() + state.approaching.len());
    scene.push(DrawCmd::Clear);
    scene.push(DrawCmd::Circle {
        center: state.center,
        radius: state.tuning.target_radius,
        fill: TARGET_FILL,
        stroke: false,
    });
    scene.push(DrawCmd::RotatedRect {
        center: state.cannon.position(state.center),
        size: Vec2::new(CANNON_LENGTH, CANNON_WIDTH),
        angle: state.cannon.angle,
        fill: state.cannon.color.as_css(),
    });
    for shot in &state.cannonballs {
        scene.push(DrawCmd::Circle {
            center: shot.pos,
            radius: shot.radius,
            fill: shot.color.as_css(),
            stroke: false,
        });
    }
    for ball in &state.approaching {
        scene.push(DrawCmd::Circle {
            center: ball.pos,
            radius: ball.radius,
            fill: ball.color.as_css(),
            stroke: false,
        });
    }
    scene
}
