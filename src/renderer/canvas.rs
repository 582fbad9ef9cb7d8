//! Canvas 2D renderer

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{POUCH_DRAW_RADIUS, PopRing, Slingshot, palette};
use crate::Tuning;
use crate::sim::{GameEvent, Snapshot, Stage};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    slingshot: Slingshot,
    pop_rings: Vec<PopRing>,
    pop_rings_enabled: bool,
}

impl CanvasRenderer {
    /// Size the canvas backing store for the device pixel ratio and grab a 2D context
    pub fn new(canvas: &HtmlCanvasElement, tuning: &Tuning, pop_rings_enabled: bool) -> Option<Self> {
        let dpr = web_sys::window()?.device_pixel_ratio();
        let width = tuning.playfield_width as f64;
        let height = tuning.playfield_height as f64;
        canvas.set_width((width * dpr) as u32);
        canvas.set_height((height * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()??
            .dyn_into()
            .ok()?;
        ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok()?;

        Some(Self {
            ctx,
            width,
            height,
            slingshot: Slingshot::new(tuning),
            pop_rings: Vec::new(),
            pop_rings_enabled,
        })
    }

    /// Map a pointer position in CSS pixels to playfield coordinates
    pub fn to_playfield(&self, canvas: &HtmlCanvasElement, css_x: f32, css_y: f32) -> glam::Vec2 {
        let client_w = canvas.client_width().max(1) as f32;
        let client_h = canvas.client_height().max(1) as f32;
        glam::Vec2::new(
            css_x * self.width as f32 / client_w,
            css_y * self.height as f32 / client_h,
        )
    }

    /// Start decorative effects for sim events
    pub fn on_event(&mut self, event: &GameEvent, snapshot: &Snapshot<'_>) {
        match event {
            GameEvent::BalloonPopped { index, .. } if self.pop_rings_enabled => {
                if let Some(b) = snapshot.balloons.get(*index) {
                    self.pop_rings.push(PopRing::new(b.pos, b.radius));
                }
            }
            GameEvent::Restarted => self.pop_rings.clear(),
            _ => {}
        }
    }

    /// Age effects by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        for ring in &mut self.pop_rings {
            ring.age += dt;
        }
        self.pop_rings.retain(PopRing::is_alive);
    }

    pub fn render(&self, snapshot: &Snapshot<'_>) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        for balloon in snapshot.balloons {
            self.circle(balloon.pos, balloon.radius);
            if balloon.burst {
                ctx.set_fill_style_str(palette::BALLOON_POPPED);
            } else {
                ctx.set_fill_style_str(palette::BALLOON);
            }
            ctx.fill();
            ctx.set_stroke_style_str(palette::OUTLINE);
            ctx.set_line_width(2.0);
            ctx.stroke();

            if balloon.burst {
                ctx.set_fill_style_str(palette::OUTLINE);
                ctx.set_font("bold 32px Arial");
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                let _ = ctx.fill_text(
                    &balloon.letter.to_string(),
                    balloon.pos.x as f64,
                    balloon.pos.y as f64,
                );
            }
        }

        for ring in &self.pop_rings {
            ctx.set_global_alpha(ring.alpha() as f64);
            self.circle(ring.pos, ring.radius());
            ctx.set_stroke_style_str(palette::BALLOON_POPPED);
            ctx.set_line_width(3.0);
            ctx.stroke();
        }
        ctx.set_global_alpha(1.0);

        // Slingshot only while aiming
        if snapshot.stage == Stage::Aiming {
            self.draw_slingshot(snapshot);
        }
    }

    fn draw_slingshot(&self, snapshot: &Snapshot<'_>) {
        let ctx = &self.ctx;
        let Slingshot { left, right, .. } = self.slingshot;
        let pouch = snapshot.pouch;

        // Arms
        ctx.set_line_width(7.0);
        ctx.set_stroke_style_str(palette::FRAME);
        for anchor in [left, right] {
            ctx.begin_path();
            ctx.move_to(anchor.x as f64, anchor.y as f64 + 34.0);
            ctx.line_to(anchor.x as f64, anchor.y as f64 - 20.0);
            ctx.stroke();
        }

        // Band
        ctx.begin_path();
        ctx.move_to(left.x as f64, left.y as f64);
        ctx.line_to(pouch.pos.x as f64, pouch.pos.y as f64);
        ctx.line_to(right.x as f64, right.y as f64);
        ctx.set_line_width(3.0);
        ctx.set_stroke_style_str(palette::BAND);
        ctx.stroke();

        // Pouch
        self.circle(pouch.pos, POUCH_DRAW_RADIUS);
        ctx.set_fill_style_str(palette::POUCH);
        ctx.fill();
        ctx.set_stroke_style_str(palette::OUTLINE);
        ctx.stroke();

        // Stone in pouch or in flight
        ctx.set_fill_style_str(palette::STONE);
        if pouch.dragging {
            self.circle(pouch.pos, self.slingshot.stone_radius);
            ctx.fill();
        }
        if let Some(stone) = snapshot.stone {
            self.circle(stone.pos, stone.radius);
            ctx.fill();
        }
    }

    fn circle(&self, center: glam::Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
    }
}
