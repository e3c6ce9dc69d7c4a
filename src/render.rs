//! Matrix-glyph renderer. Reads a `Snapshot`, never the game itself.

use macroquad::prelude::*;
use snake_arcade::entities::{EffectKind, PowerUpKind};
use snake_arcade::{Cell, Direction, Grid, Snapshot, Status};

pub const MATRIX_HEAD: Color = Color::new(0.64, 1.0, 0.64, 1.0);
pub const MATRIX_BODY: Color = Color::new(0.25, 0.9, 0.25, 1.0);
pub const MATRIX_WALL: Color = Color::new(0.08, 0.4, 0.08, 1.0);
pub const MATRIX_FOOD: Color = Color::new(0.9, 1.0, 0.9, 1.0);
const SHIELD_HEAD: Color = Color::new(0.4, 0.9, 1.0, 1.0);
const FROZEN_TINT: Color = Color::new(0.3, 0.5, 1.0, 0.08);
const BOOST_TINT: Color = Color::new(1.0, 0.8, 0.2, 0.06);
const HUD_DIM: Color = Color::new(0.25, 0.6, 0.25, 1.0);

const MATRIX_GLYPHS: &[u8] = b"01<>[]{}()/\\|-=+*;:.,^~ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn random_matrix_char() -> char {
    MATRIX_GLYPHS[macroquad::rand::gen_range(0, MATRIX_GLYPHS.len())] as char
}

/// Stable glyph per cell so walls and body segments don't flicker.
pub fn matrix_char_for_cell(c: Cell) -> char {
    let hx = (c.x as i64).wrapping_mul(73_856_093);
    let hy = (c.y as i64).wrapping_mul(19_349_663);
    MATRIX_GLYPHS[(hx ^ hy).unsigned_abs() as usize % MATRIX_GLYPHS.len()] as char
}

/// Pixel placement of a grid on the current window.
#[derive(Copy, Clone)]
pub struct Layout {
    tile_w: f32,
    tile_h: f32,
    off_x: f32,
    off_y: f32,
}

impl Layout {
    pub fn fit(grid: Grid) -> Self {
        let sw = screen_width();
        let sh = screen_height();
        let tile_w = sw / grid.columns as f32;
        let tile_h = sh / grid.rows as f32;
        Self {
            tile_w,
            tile_h,
            off_x: (sw - tile_w * grid.columns as f32) * 0.5,
            off_y: (sh - tile_h * grid.rows as f32) * 0.5,
        }
    }

    /// Centre of a 1-indexed cell in screen space.
    pub fn center_of(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            self.off_x + (cell.x as f32 - 0.5) * self.tile_w,
            self.off_y + (cell.y as f32 - 0.5) * self.tile_h,
        )
    }

    fn glyph(&self, ch: char, cell: Cell, color: Color) {
        let x = self.off_x + (cell.x - 1) as f32 * self.tile_w + 1.0;
        let y = self.off_y + cell.y as f32 * self.tile_h - 1.0; // baseline
        let size = self.tile_w.min(self.tile_h).max(6.0);
        let params = TextParams {
            font_size: size as u16,
            font_scale: 1.0,
            font_scale_aspect: 1.0,
            color,
            ..Default::default()
        };
        draw_text_ex(&ch.to_string(), x, y, params);
    }
}

fn head_glyph(heading: Option<Direction>) -> char {
    match heading {
        Some(Direction::Up) => '^',
        Some(Direction::Down) => 'v',
        Some(Direction::Left) => '<',
        Some(Direction::Right) => '>',
        None => '@',
    }
}

pub fn power_up_style(kind: PowerUpKind) -> (char, Color) {
    match kind {
        PowerUpKind::SpeedBoost => ('!', YELLOW),
        PowerUpKind::Shield => ('#', SKYBLUE),
        PowerUpKind::Freeze => ('*', Color::new(0.6, 0.8, 1.0, 1.0)),
        PowerUpKind::MultiFood => ('+', MAGENTA),
    }
}

pub fn draw_board(snap: &Snapshot<'_>) {
    let layout = Layout::fit(snap.grid);

    if snap.effects.is_active(EffectKind::Freeze) {
        draw_rectangle(0.0, 0.0, screen_width(), screen_height(), FROZEN_TINT);
    }
    if snap.effects.is_active(EffectKind::SpeedBoost) {
        draw_rectangle(0.0, 0.0, screen_width(), screen_height(), BOOST_TINT);
    }

    for o in snap.obstacles {
        layout.glyph(matrix_char_for_cell(o.cell), o.cell, MATRIX_WALL);
    }
    for p in snap.power_ups {
        let (ch, color) = power_up_style(p.kind);
        layout.glyph(ch, p.cell, color);
    }
    layout.glyph('$', snap.food, MATRIX_FOOD);

    let shielded = snap.effects.is_active(EffectKind::Shield);
    for (i, cell) in snap.snake.iter().enumerate() {
        if i == 0 {
            let color = if shielded { SHIELD_HEAD } else { MATRIX_HEAD };
            layout.glyph(head_glyph(snap.heading), *cell, color);
        } else {
            layout.glyph(matrix_char_for_cell(*cell), *cell, MATRIX_BODY);
        }
    }
}

pub fn draw_hud(snap: &Snapshot<'_>) {
    let mut line = format!(
        "Score {}   Best {}   Level {}",
        snap.score, snap.high_score, snap.level
    );
    if snap.combo > 1 {
        line.push_str(&format!("   Combo x{}", snap.combo));
    }
    if snap.time_limited {
        let secs = snap.play_time_ms / 1000;
        line.push_str(&format!("   Time {}:{:02}", secs / 60, secs % 60));
    }
    draw_text(&line, 8.0, 20.0, 24.0, MATRIX_BODY);

    let inv = snap.inventory;
    let mut items = format!(
        "[1] boost {}  [2] shield {}  [3] freeze {}",
        inv.speed_boost, inv.shield, inv.freeze
    );
    for kind in EffectKind::ALL {
        let effect = snap.effects.get(kind);
        if effect.active {
            items.push_str(&format!(
                "   {} {:.1}s",
                kind.label(),
                effect.remaining_ms as f32 / 1000.0
            ));
        }
    }
    draw_text(&items, 8.0, 40.0, 18.0, HUD_DIM);

    if let Some(fps) = snap.fps {
        let text = format!("{fps} fps");
        let m = measure_text(&text, None, 18, 1.0);
        draw_text(&text, screen_width() - m.width - 8.0, 20.0, 18.0, HUD_DIM);
    }

    if snap.status == Status::Playing && !snap.moving {
        centered("Arrows/WASD to move", screen_height() - 24.0, 18.0, HUD_DIM);
    }
}

pub fn draw_pause_overlay() {
    dim();
    let sh = screen_height();
    centered("PAUSED", sh * 0.4, 36.0, MATRIX_HEAD);
    centered(
        "Space: Resume  Esc: Lobby  R: Restart",
        sh * 0.4 + 40.0,
        22.0,
        WHITE,
    );
}

pub fn draw_game_over_overlay(score: u32, new_record: bool) {
    dim();
    let sh = screen_height();
    centered("GAME OVER", sh * 0.4, 36.0, MATRIX_HEAD);
    centered(&format!("Final score: {score}"), sh * 0.4 + 34.0, 24.0, MATRIX_BODY);
    if new_record {
        centered("NEW RECORD!", sh * 0.4 + 62.0, 24.0, YELLOW);
    }
    centered(
        "R / Enter: Play again  Esc: Lobby  Q: Quit",
        sh * 0.4 + 92.0,
        22.0,
        WHITE,
    );
}

fn dim() {
    draw_rectangle(
        0.0,
        0.0,
        screen_width(),
        screen_height(),
        Color::new(0.0, 0.0, 0.0, 0.4),
    );
}

pub fn centered(text: &str, y: f32, size: f32, color: Color) {
    let m = measure_text(text, None, size as u16, 1.0);
    draw_text(text, (screen_width() - m.width) * 0.5, y, size, color);
}

// ── Background rain ─────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
pub struct RainDrop {
    x: f32,
    y: f32,
    speed: f32,
}

pub fn spawn_rain(columns: usize) -> Vec<RainDrop> {
    (0..columns)
        .map(|i| RainDrop {
            x: i as f32 * 2.0,
            y: macroquad::rand::gen_range(0.0, 24.0),
            speed: macroquad::rand::gen_range(6.0, 18.0),
        })
        .collect()
}

pub fn draw_rain(drops: &mut [RainDrop], dt: f32) {
    let rows = 24.0;
    let cols = drops.len() as f32 * 2.0;
    let tile_w = screen_width() / cols.max(1.0);
    let tile_h = screen_height() / rows;
    for d in drops.iter_mut() {
        d.y += d.speed * dt;
        if d.y >= rows {
            d.y = 0.0;
        }
        let params = TextParams {
            font_size: tile_w.min(tile_h).max(6.0) as u16,
            color: Color::new(0.2, 0.8, 0.2, 0.5),
            ..Default::default()
        };
        draw_text_ex(
            &random_matrix_char().to_string(),
            d.x * tile_w,
            (d.y.floor() + 1.0) * tile_h,
            params,
        );
    }
}
