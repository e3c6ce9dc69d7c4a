//! Short-lived visual feedback: particle bursts, screen flashes and toasts.

use macroquad::prelude::*;

const MAX_PARTICLES: usize = 50;
const PARTICLE_LIFE: f32 = 0.6;
const FLASH_TIME: f32 = 0.3;
const TOAST_TIME: f32 = 3.0;

struct Particle {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    color: Color,
}

struct Toast {
    title: String,
    detail: String,
    remaining: f32,
}

#[derive(Default)]
pub struct Fx {
    particles: Vec<Particle>,
    flash: Option<(Color, f32)>,
    toasts: Vec<Toast>,
}

impl Fx {
    /// Scatters `count` particles from `origin`, dropping the oldest past the cap.
    pub fn burst(&mut self, origin: Vec2, count: usize, color: Color) {
        for _ in 0..count {
            let angle = macroquad::rand::gen_range(0.0, std::f32::consts::TAU);
            let speed = macroquad::rand::gen_range(40.0, 160.0);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: PARTICLE_LIFE,
                color,
            });
        }
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    pub fn flash(&mut self, color: Color) {
        self.flash = Some((color, FLASH_TIME));
    }

    pub fn toast(&mut self, title: impl Into<String>, detail: impl Into<String>) {
        self.toasts.push(Toast {
            title: title.into(),
            detail: detail.into(),
            remaining: TOAST_TIME,
        });
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.flash = None;
        self.toasts.clear();
    }

    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.vel *= 0.92;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);

        if let Some((_, t)) = &mut self.flash {
            *t -= dt;
        }
        if matches!(self.flash, Some((_, t)) if t <= 0.0) {
            self.flash = None;
        }

        for t in &mut self.toasts {
            t.remaining -= dt;
        }
        self.toasts.retain(|t| t.remaining > 0.0);
    }

    pub fn draw(&self) {
        for p in &self.particles {
            let alpha = (p.life / PARTICLE_LIFE).clamp(0.0, 1.0);
            let c = Color::new(p.color.r, p.color.g, p.color.b, alpha);
            draw_circle(p.pos.x, p.pos.y, 2.0 + 2.0 * alpha, c);
        }

        if let Some((color, t)) = self.flash {
            let alpha = 0.3 * (t / FLASH_TIME);
            draw_rectangle(
                0.0,
                0.0,
                screen_width(),
                screen_height(),
                Color::new(color.r, color.g, color.b, alpha),
            );
        }

        let sw = screen_width();
        for (i, toast) in self.toasts.iter().enumerate() {
            let y = 70.0 + i as f32 * 52.0;
            let w = 320.0;
            let x = (sw - w) * 0.5;
            draw_rectangle(x, y, w, 46.0, Color::new(0.0, 0.15, 0.0, 0.85));
            draw_rectangle_lines(x, y, w, 46.0, 2.0, Color::new(0.4, 1.0, 0.4, 1.0));
            draw_text(&toast.title, x + 10.0, y + 20.0, 22.0, WHITE);
            draw_text(&toast.detail, x + 10.0, y + 38.0, 16.0, LIGHTGRAY);
        }
    }
}
