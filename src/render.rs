//! Canvas 2D painter.
//!
//! Draws the whole scene back-to-front from a [`GameState`] snapshot: sky
//! gradient, parallax cloud/hill/tree layers, ground strip, pipes, then the
//! eagle. All movement lives in the simulation; the painter only reads layer
//! offsets and entity positions, so drawing the same state twice yields the
//! same frame (modulo the wing-flap cycle, which is purely cosmetic).

use std::f64::consts::PI;

use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::consts::{GRASS_HEIGHT, GROUND_HEIGHT, PIPE_WIDTH};
use crate::sim::{GamePhase, GameState, Pipe};

/// Per-level palette. Levels restyle the world: jungle day, river sunset,
/// city night.
struct Theme {
    sky_top: &'static str,
    sky_bottom: &'static str,
    hills: &'static str,
    trees: &'static str,
    ground: &'static str,
    grass: &'static str,
    pipe_base: &'static str,
    pipe_highlight: &'static str,
    pipe_shadow: &'static str,
    cloud_fill: &'static str,
}

const THEMES: [Theme; 3] = [
    // Level 1: jungle
    Theme {
        sky_top: "#00f2fe",
        sky_bottom: "#4facfe",
        hills: "#2E7D32",
        trees: "#1B5E20",
        ground: "#3E2723",
        grass: "#43A047",
        pipe_base: "#43A047",
        pipe_highlight: "#81C784",
        pipe_shadow: "#1B5E20",
        cloud_fill: "rgba(255, 255, 255, 0.4)",
    },
    // Level 2: river at sunset
    Theme {
        sky_top: "#fe8c00",
        sky_bottom: "#f83600",
        hills: "#5D4037",
        trees: "#004D40",
        ground: "#0288D1",
        grass: "#81D4FA",
        pipe_base: "#78909C",
        pipe_highlight: "#B0BEC5",
        pipe_shadow: "#455A64",
        cloud_fill: "rgba(255, 255, 255, 0.4)",
    },
    // Level 3: city at night
    Theme {
        sky_top: "#243B55",
        sky_bottom: "#141E30",
        hills: "#2c3e50",
        trees: "#34495e",
        ground: "#2c3e50",
        grass: "#95a5a6",
        pipe_base: "#546E7A",
        pipe_highlight: "#90A4AE",
        pipe_shadow: "#37474F",
        cloud_fill: "rgba(255, 255, 255, 0.1)",
    },
];

fn theme_for(level: u8) -> &'static Theme {
    &THEMES[(level.clamp(1, 3) - 1) as usize]
}

pub struct Painter {
    ctx: CanvasRenderingContext2d,
    /// Wing-flap cycle counter. Advances every drawn frame, independent of
    /// the simulation clock so the eagle keeps flapping on the start screen.
    anim_frame: u64,
}

impl Painter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx, anim_frame: 0 }
    }

    /// Paint one frame of the given state.
    pub fn draw(&mut self, state: &GameState) {
        self.anim_frame += 1;

        let theme = theme_for(state.progress.level);
        let w = state.width as f64;
        let h = state.height as f64;

        self.draw_sky(theme, w, h);
        self.draw_clouds(theme, state.scenery.clouds_x as f64, w);
        self.draw_hills(theme, state.scenery.hills_x as f64, w, h, state.progress.level);
        self.draw_trees(theme, state.scenery.trees_x as f64, w, h, state.progress.level);
        self.draw_ground(theme, w, h);

        for pipe in state.pipes.iter() {
            self.draw_pipe(theme, pipe, h);
        }

        let flapping = state.phase != GamePhase::GameOver;
        self.draw_bird(state, flapping);
    }

    fn draw_sky(&self, theme: &Theme, w: f64, h: f64) {
        let grad = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        grad.add_color_stop(0.0, theme.sky_top).ok();
        grad.add_color_stop(1.0, theme.sky_bottom).ok();
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    /// Two cloud clusters per tile, two tiles wide so the seam never shows.
    fn draw_clouds(&self, theme: &Theme, layer_x: f64, w: f64) {
        self.ctx.set_fill_style_str(theme.cloud_fill);
        for i in 0..2 {
            let offset = layer_x + i as f64 * w;

            self.ctx.begin_path();
            self.ctx.arc(offset + 100.0, 100.0, 50.0, 0.0, PI * 2.0).ok();
            self.ctx.arc(offset + 180.0, 80.0, 60.0, 0.0, PI * 2.0).ok();
            self.ctx.arc(offset + 260.0, 100.0, 50.0, 0.0, PI * 2.0).ok();
            self.ctx.fill();

            self.ctx.begin_path();
            self.ctx.arc(offset + 500.0, 150.0, 70.0, 0.0, PI * 2.0).ok();
            self.ctx.arc(offset + 620.0, 120.0, 80.0, 0.0, PI * 2.0).ok();
            self.ctx.fill();
        }
    }

    fn draw_hills(&self, theme: &Theme, layer_x: f64, w: f64, h: f64, level: u8) {
        self.ctx.set_fill_style_str(theme.hills);
        for i in 0..2 {
            let offset = layer_x + i as f64 * w;
            if level == 3 {
                // Skyline instead of hills.
                self.ctx.begin_path();
                self.ctx.rect(offset, h - 300.0, 100.0, 300.0);
                self.ctx.rect(offset + 120.0, h - 450.0, 80.0, 450.0);
                self.ctx.rect(offset + 220.0, h - 250.0, 150.0, 250.0);
                self.ctx.rect(offset + 400.0, h - 500.0, 120.0, 500.0);
                self.ctx.rect(offset + 550.0, h - 350.0, 100.0, 350.0);
                self.ctx.rect(offset + 700.0, h - 200.0, 200.0, 200.0);
                self.ctx.fill();
            } else {
                self.ctx.begin_path();
                self.ctx.move_to(offset, h);
                self.ctx.line_to(offset + 200.0, h - 300.0);
                self.ctx.line_to(offset + 500.0, h);
                self.ctx.line_to(offset + 800.0, h - 350.0);
                self.ctx.line_to(offset + w, h);
                self.ctx.fill();
            }
        }
    }

    fn draw_trees(&self, theme: &Theme, layer_x: f64, w: f64, h: f64, level: u8) {
        self.ctx.set_fill_style_str(theme.trees);
        for i in 0..2 {
            let offset = layer_x + i as f64 * w;
            match level {
                3 => {
                    // Streetlights.
                    for j in 0..5 {
                        let x = offset + j as f64 * 250.0;
                        self.ctx.fill_rect(x, h - 150.0, 10.0, 150.0);
                        self.ctx.begin_path();
                        self.ctx.arc(x + 5.0, h - 160.0, 15.0, 0.0, PI * 2.0).ok();
                        self.ctx.fill();
                    }
                }
                2 => {
                    // Riverbank reeds.
                    for j in 0..15 {
                        self.ctx.begin_path();
                        self.ctx
                            .ellipse_with_anticlockwise(
                                offset + j as f64 * 100.0,
                                h,
                                10.0,
                                80.0 + (j % 3) as f64 * 20.0,
                                0.0,
                                0.0,
                                PI,
                                true,
                            )
                            .ok();
                        self.ctx.fill();
                    }
                }
                _ => {
                    // Jungle canopy triangles.
                    for j in 0..10 {
                        let x = offset + j as f64 * 200.0;
                        self.ctx.begin_path();
                        self.ctx.move_to(x, h);
                        self.ctx.line_to(x + 50.0, h - 150.0 - (j % 3) as f64 * 50.0);
                        self.ctx.line_to(x + 100.0, h);
                        self.ctx.fill();
                    }
                }
            }
        }
    }

    /// Static ground strip with a grass lip on top. The strip does not
    /// scroll; the tree layer in front of it sells the motion.
    fn draw_ground(&self, theme: &Theme, w: f64, h: f64) {
        self.ctx.set_fill_style_str(theme.ground);
        self.ctx
            .fill_rect(0.0, h - GROUND_HEIGHT as f64, w, GROUND_HEIGHT as f64);
        self.ctx.set_fill_style_str(theme.grass);
        self.ctx.fill_rect(
            0.0,
            h - (GROUND_HEIGHT + GRASS_HEIGHT) as f64,
            w,
            GRASS_HEIGHT as f64,
        );
    }

    fn pipe_gradient(&self, theme: &Theme, x: f64) -> CanvasGradient {
        let grad = self
            .ctx
            .create_linear_gradient(x, 0.0, x + PIPE_WIDTH as f64, 0.0);
        grad.add_color_stop(0.0, theme.pipe_shadow).ok();
        grad.add_color_stop(0.1, theme.pipe_base).ok();
        grad.add_color_stop(0.4, theme.pipe_highlight).ok();
        grad.add_color_stop(0.8, theme.pipe_base).ok();
        grad.add_color_stop(1.0, theme.pipe_shadow).ok();
        grad
    }

    fn draw_pipe(&self, theme: &Theme, pipe: &Pipe, h: f64) {
        let x = pipe.x as f64;
        let width = PIPE_WIDTH as f64;
        let gap_top = pipe.gap_top as f64;
        let gap_bottom = pipe.gap_bottom() as f64;
        let cap_height = 25.0;

        let grad = self.pipe_gradient(theme, x);
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.set_stroke_style_str("#000");
        self.ctx.set_line_width(2.0);

        // Upper column and its cap ring.
        self.ctx.fill_rect(x, 0.0, width, gap_top);
        self.ctx.stroke_rect(x, 0.0, width, gap_top);
        self.ctx
            .fill_rect(x - 4.0, gap_top - cap_height, width + 8.0, cap_height);
        self.ctx
            .stroke_rect(x - 4.0, gap_top - cap_height, width + 8.0, cap_height);

        self.ctx.set_fill_style_str("rgba(0,0,0,0.3)");
        self.ctx.begin_path();
        self.ctx
            .arc(x + 5.0, gap_top - 12.0, 3.0, 0.0, PI * 2.0)
            .ok();
        self.ctx
            .arc(x + width - 5.0, gap_top - 12.0, 3.0, 0.0, PI * 2.0)
            .ok();
        self.ctx.fill();

        // Lower column and cap.
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.fill_rect(x, gap_bottom, width, h - gap_bottom);
        self.ctx.stroke_rect(x, gap_bottom, width, h - gap_bottom);
        self.ctx
            .fill_rect(x - 4.0, gap_bottom, width + 8.0, cap_height);
        self.ctx
            .stroke_rect(x - 4.0, gap_bottom, width + 8.0, cap_height);

        self.ctx.set_fill_style_str("rgba(0,0,0,0.3)");
        self.ctx.begin_path();
        self.ctx
            .arc(x + 5.0, gap_bottom + 12.0, 3.0, 0.0, PI * 2.0)
            .ok();
        self.ctx
            .arc(x + width - 5.0, gap_bottom + 12.0, 3.0, 0.0, PI * 2.0)
            .ok();
        self.ctx.fill();
    }

    fn draw_bird(&self, state: &GameState, flapping: bool) {
        let bird = &state.bird;
        let ctx = &self.ctx;

        ctx.save();
        ctx.translate(bird.pos.x as f64, bird.pos.y as f64).ok();
        ctx.rotate(f64::from(bird.tilt.to_radians())).ok();

        // Wing beat; frozen mid-stroke once the run ends.
        let phase = if flapping {
            self.anim_frame as f64 * 0.2
        } else {
            0.0
        };
        let wing_y = phase.sin() * 20.0;
        let wing_skew = phase.cos() * 5.0;

        // Far wing, behind the body.
        ctx.set_fill_style_str("#3E2723");
        ctx.begin_path();
        ctx.move_to(-10.0, 5.0);
        ctx.quadratic_curve_to(-20.0, -20.0 + wing_y, -50.0 + wing_skew, -10.0 + wing_y);
        ctx.quadratic_curve_to(-30.0, 10.0, -10.0, 5.0);
        ctx.fill();
        ctx.set_stroke_style_str("#281815");
        ctx.set_line_width(1.0);
        ctx.stroke();

        // Tail feathers.
        let tail = ctx.create_linear_gradient(-30.0, 0.0, -50.0, 0.0);
        tail.add_color_stop(0.0, "#FFFFFF").ok();
        tail.add_color_stop(1.0, "#CFD8DC").ok();
        ctx.set_fill_style_canvas_gradient(&tail);
        ctx.begin_path();
        ctx.move_to(-20.0, 0.0);
        ctx.line_to(-45.0, -10.0);
        ctx.line_to(-45.0, 10.0);
        ctx.fill();

        // Body, shaded sphere.
        if let Ok(body) = ctx.create_radial_gradient(-5.0, 5.0, 2.0, -5.0, 5.0, 25.0) {
            body.add_color_stop(0.0, "#795548").ok();
            body.add_color_stop(1.0, "#3E2723").ok();
            ctx.set_fill_style_canvas_gradient(&body);
        }
        ctx.begin_path();
        ctx.ellipse(-5.0, 5.0, 22.0, 14.0, -0.2, 0.0, PI * 2.0).ok();
        ctx.fill();

        // Head.
        if let Ok(head) = ctx.create_radial_gradient(15.0, -8.0, 2.0, 12.0, -5.0, 15.0) {
            head.add_color_stop(0.0, "#FFFFFF").ok();
            head.add_color_stop(1.0, "#B0BEC5").ok();
            ctx.set_fill_style_canvas_gradient(&head);
        }
        ctx.begin_path();
        ctx.arc(12.0, -5.0, 14.0, 0.0, PI * 2.0).ok();
        ctx.fill();

        // Eye with glint.
        ctx.set_fill_style_str("#000");
        ctx.begin_path();
        ctx.arc(16.0, -8.0, 2.5, 0.0, PI * 2.0).ok();
        ctx.fill();
        ctx.set_fill_style_str("#FFF");
        ctx.begin_path();
        ctx.arc(17.0, -9.0, 1.0, 0.0, PI * 2.0).ok();
        ctx.fill();

        // Hooked beak.
        let beak = ctx.create_linear_gradient(18.0, 0.0, 32.0, 5.0);
        beak.add_color_stop(0.0, "#FFEB3B").ok();
        beak.add_color_stop(1.0, "#FBC02D").ok();
        ctx.set_fill_style_canvas_gradient(&beak);
        ctx.begin_path();
        ctx.move_to(22.0, -5.0);
        ctx.quadratic_curve_to(35.0, 0.0, 32.0, 8.0);
        ctx.line_to(22.0, 4.0);
        ctx.fill();
        ctx.stroke();

        // Near wing, in front, slightly out of phase for depth.
        ctx.set_fill_style_str("#5D4037");
        ctx.begin_path();
        ctx.move_to(0.0, 5.0);
        ctx.quadratic_curve_to(-10.0, -25.0 + wing_y, -45.0 + wing_skew, -15.0 + wing_y);
        ctx.quadratic_curve_to(-20.0, 15.0, 0.0, 5.0);
        ctx.fill();
        ctx.stroke();

        ctx.restore();
    }
}
