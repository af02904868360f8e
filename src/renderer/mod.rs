//! Canvas 2D renderer
//!
//! Draws a [`Snapshot`] in logical game coordinates (480x640), scaled and
//! letterboxed to whatever size the canvas has.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::snapshot::{EnemyView, Snapshot};
use crate::sim::{EnemyKind, GamePhase, PowerUpKind};

const BACKGROUND: &str = "#05060f";
const STAR_COUNT: usize = 60;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    size: (f64, f64),
    scale: f64,
    offset: (f64, f64),
    /// Parallax starfield (x, y, speed) in logical units
    stars: Vec<(f64, f64, f64)>,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        // Fixed pattern; the starfield is decoration and needs no RNG
        let stars = (0..STAR_COUNT)
            .map(|i| {
                let i = i as f64;
                let x = (i * 97.0) % GAME_WIDTH as f64;
                let y = (i * 211.0) % GAME_HEIGHT as f64;
                let speed = 0.01 + (i % 3.0) * 0.015;
                (x, y, speed)
            })
            .collect();

        let mut renderer = Self {
            ctx,
            size: (0.0, 0.0),
            scale: 1.0,
            offset: (0.0, 0.0),
            stars,
        };
        renderer.resize(canvas.width(), canvas.height());
        Some(renderer)
    }

    /// Fit the logical field into a `width` x `height` backbuffer
    pub fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = (width as f64, height as f64);
        self.size = (w, h);
        self.scale = (w / GAME_WIDTH as f64).min(h / GAME_HEIGHT as f64);
        self.offset = (
            (w - GAME_WIDTH as f64 * self.scale) / 2.0,
            (h - GAME_HEIGHT as f64 * self.scale) / 2.0,
        );
    }

    pub fn render(&self, snap: &Snapshot, time_ms: f64) {
        let ctx = &self.ctx;
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, self.size.0, self.size.1);
        ctx.set_transform(self.scale, 0.0, 0.0, self.scale, self.offset.0, self.offset.1)
            .ok();

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, GAME_WIDTH as f64, GAME_HEIGHT as f64);
        self.draw_stars(time_ms);

        for p in &snap.power_ups {
            self.draw_power_up(p.pos.x as f64, p.pos.y as f64, p.kind, time_ms);
        }
        for e in &snap.enemies {
            self.draw_enemy(e);
        }

        ctx.set_fill_style_str(if snap.double_fire { "#ffd23f" } else { "#7df9ff" });
        for b in &snap.bullets {
            ctx.fill_rect(
                b.pos.x as f64,
                b.pos.y as f64,
                BULLET_WIDTH as f64,
                BULLET_HEIGHT as f64,
            );
        }

        self.draw_player(snap);

        for x in &snap.explosions {
            let radius = 10.0 + 30.0 * x.progress as f64;
            ctx.set_global_alpha(1.0 - x.progress as f64);
            ctx.set_fill_style_str("#ff8c1a");
            self.circle(x.pos.x as f64, x.pos.y as f64, radius);
            ctx.set_fill_style_str("#fff3b0");
            self.circle(x.pos.x as f64, x.pos.y as f64, radius * 0.5);
        }
        ctx.set_global_alpha(1.0);

        match snap.phase {
            GamePhase::Paused => self.banner("PAUSED"),
            GamePhase::GameOver => self.banner("GAME OVER"),
            GamePhase::Playing => {}
        }
    }

    fn draw_stars(&self, time_ms: f64) {
        self.ctx.set_fill_style_str("#8890b5");
        for (x, y, speed) in &self.stars {
            let y = (y + time_ms * speed) % GAME_HEIGHT as f64;
            self.ctx.fill_rect(*x, y, 2.0, 2.0);
        }
    }

    fn draw_player(&self, snap: &Snapshot) {
        let ctx = &self.ctx;
        let (x, y) = (snap.player.pos.x as f64, snap.player.pos.y as f64);
        let (w, h) = (PLAYER_WIDTH as f64, PLAYER_HEIGHT as f64);

        ctx.set_fill_style_str(if snap.speed_boost { "#7dff8a" } else { "#4da6ff" });
        ctx.begin_path();
        ctx.move_to(x + w / 2.0, y);
        ctx.line_to(x + w, y + h);
        ctx.line_to(x, y + h);
        ctx.close_path();
        ctx.fill();

        if snap.player.shielded {
            ctx.set_stroke_style_str("#7df9ff");
            ctx.set_line_width(2.0);
            ctx.begin_path();
            ctx.arc(x + w / 2.0, y + h / 2.0, w * 0.8, 0.0, std::f64::consts::TAU)
                .ok();
            ctx.stroke();
        }
    }

    fn draw_enemy(&self, e: &EnemyView) {
        let ctx = &self.ctx;
        let color = match e.kind {
            EnemyKind::Basic => "#ff4d6d",
            EnemyKind::Fast => "#ffb703",
            EnemyKind::Tank => "#9b5de5",
            EnemyKind::Boss => "#f15bb5",
        };
        let (x, y) = (e.pos.x as f64, e.pos.y as f64);
        let (w, h) = (ENEMY_WIDTH as f64, ENEMY_HEIGHT as f64);

        ctx.set_global_alpha(if e.damaged { 0.6 } else { 1.0 });
        ctx.set_fill_style_str(color);
        ctx.fill_rect(x, y, w, h);
        ctx.set_global_alpha(1.0);

        // Health pips for armored kinds
        let max = e.kind.max_health();
        if max > 1 {
            ctx.set_fill_style_str("#ffffff");
            for i in 0..e.health {
                ctx.fill_rect(x + 4.0 + i as f64 * 8.0, y + h - 6.0, 6.0, 3.0);
            }
        }
    }

    fn draw_power_up(&self, x: f64, y: f64, kind: PowerUpKind, time_ms: f64) {
        let ctx = &self.ctx;
        let (color, label) = match kind {
            PowerUpKind::DoubleFire => ("#ffd23f", "2x"),
            PowerUpKind::Shield => ("#7df9ff", "S"),
            PowerUpKind::SpeedBoost => ("#7dff8a", ">>"),
            PowerUpKind::ExtraLife => ("#ff4d6d", "+1"),
        };
        let size = POWERUP_SIZE as f64;
        let pulse = 0.75 + 0.25 * (time_ms / 150.0).sin();

        ctx.set_global_alpha(pulse);
        ctx.set_fill_style_str(color);
        self.circle(x + size / 2.0, y + size / 2.0, size / 2.0);
        ctx.set_global_alpha(1.0);

        ctx.set_fill_style_str("#05060f");
        ctx.set_font("bold 12px monospace");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(label, x + size / 2.0, y + size / 2.0).ok();
    }

    fn banner(&self, text: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        ctx.fill_rect(0.0, GAME_HEIGHT as f64 / 2.0 - 40.0, GAME_WIDTH as f64, 80.0);
        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("bold 36px monospace");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(text, GAME_WIDTH as f64 / 2.0, GAME_HEIGHT as f64 / 2.0)
            .ok();
    }

    fn circle(&self, x: f64, y: f64, r: f64) {
        self.ctx.begin_path();
        self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU).ok();
        self.ctx.fill();
    }
}
