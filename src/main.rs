mod audio;
mod particles;
mod render;

use std::fs::File;
use std::path::PathBuf;

use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use macroquad::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

use snake_arcade::achievements::AchievementId;
use snake_arcade::entities::EffectKind;
use snake_arcade::{
    Command, Difficulty, Direction, Event, Game, GameMode, Grid, JsonStore, Settings, Status,
};

use crate::audio::CueBank;
use crate::particles::Fx;
use crate::render::{Layout, RainDrop, MATRIX_BODY, MATRIX_HEAD, centered, power_up_style};

#[derive(Parser, Debug)]
#[command(name = "snake_arcade", about = "Snake with power-ups, obstacles and combos")]
struct Args {
    /// JSON file holding the high score, recent games and settings.
    #[arg(long, default_value = "snake_save.json")]
    save_file: PathBuf,
    #[arg(long, default_value = "snake_arcade.log")]
    log_file: PathBuf,
    /// Overrides the saved difficulty (easy, medium, hard, expert).
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// Overrides the saved mode (classic, modern, survival).
    #[arg(long)]
    mode: Option<GameMode>,
    /// Wrap around the board edges instead of dying on them.
    #[arg(long)]
    no_walls: bool,
    /// Seed for food, power-up and obstacle placement.
    #[arg(long)]
    seed: Option<u64>,
}

enum Screen {
    Lobby(LobbyState),
    Settings(SettingsState),
    Playing,
}

const LOBBY_ITEMS: usize = 5;

#[derive(Default)]
struct LobbyState {
    selected: usize,
}

const SETTINGS_ITEMS: usize = 5;

#[derive(Default)]
struct SettingsState {
    selected: usize,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake Arcade".to_owned(),
        fullscreen: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn now_ms() -> u64 {
    (get_time() * 1000.0) as u64
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    if let Err(err) = run(args).await {
        error!("fatal: {err:#}");
        eprintln!("snake_arcade: {err:#}");
    }
}

async fn run(args: Args) -> Result<()> {
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {}", args.log_file.display()))?;
    WriteLogger::init(LevelFilter::Info, Config::default(), log_file)
        .context("cannot install logger")?;
    info!("starting, save file {}", args.save_file.display());

    let store = JsonStore::open(&args.save_file);
    let mut settings = store.settings().clone();
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    if args.no_walls {
        settings.wall_collision = false;
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut rng = StdRng::seed_from_u64(seed);
    info!("rng seed {seed}");

    let cues = CueBank::load().await?;
    let grid = Grid::for_viewport(screen_width(), screen_height());
    let mut game = Game::new(settings, grid, store, &mut rng);
    let mut screen = Screen::Lobby(LobbyState::default());
    let mut fx = Fx::default();
    let mut drops: Vec<RainDrop> = render::spawn_rain(20);
    let mut fullscreen = true;
    let mut muted = false;
    let mut last_time = get_time() as f32;

    loop {
        let now = get_time() as f32;
        let dt = (now - last_time).max(0.0);
        last_time = now;

        if is_key_pressed(KeyCode::F) {
            fullscreen = !fullscreen;
            macroquad::window::set_fullscreen(fullscreen);
        }

        clear_background(BLACK);
        let mut next_screen: Option<Screen> = None;

        match &mut screen {
            Screen::Lobby(lobby) => {
                render::draw_rain(&mut drops, dt);
                game.resize(Grid::for_viewport(screen_width(), screen_height()));
                match lobby_frame(lobby, &mut game) {
                    LobbyAction::Stay => {}
                    LobbyAction::Start => {
                        persist_settings(&mut game);
                        game.push_command(Command::Start);
                        next_screen = Some(Screen::Playing);
                    }
                    LobbyAction::Settings => {
                        next_screen = Some(Screen::Settings(SettingsState::default()));
                    }
                    LobbyAction::Quit => {
                        persist_settings(&mut game);
                        break;
                    }
                }
            }

            Screen::Settings(state) => {
                render::draw_rain(&mut drops, dt);
                if settings_frame(state, &mut game) {
                    persist_settings(&mut game);
                    next_screen = Some(Screen::Lobby(LobbyState::default()));
                }
            }

            Screen::Playing => {
                if is_key_pressed(KeyCode::Q) && game.status() != Status::Playing {
                    break;
                }
                if is_key_pressed(KeyCode::M) {
                    muted = !muted;
                    if muted {
                        cues.stop_all();
                    }
                }
                for command in playing_commands(game.status()) {
                    game.push_command(command);
                }

                let events = game.frame(now_ms(), &mut rng);
                let snap = game.snapshot();
                let layout = Layout::fit(snap.grid);
                for event in &events {
                    react(event, &layout, &mut fx);
                    if matches!(event, Event::GameOver { .. } | Event::ReturnedToMenu) {
                        cues.stop_all();
                    }
                    if sound_on(game.settings(), muted) {
                        if let Some(cue) = event.cue() {
                            cues.play(cue, game.settings().volume);
                        }
                    }
                }

                render::draw_board(&snap);
                fx.update(dt);
                fx.draw();
                render::draw_hud(&snap);
                match snap.status {
                    Status::Paused => render::draw_pause_overlay(),
                    Status::GameOver => render::draw_game_over_overlay(
                        snap.score,
                        snap.new_record,
                    ),
                    Status::Menu => {
                        fx.clear();
                        next_screen = Some(Screen::Lobby(LobbyState::default()));
                    }
                    Status::Playing => {}
                }
            }
        }

        if let Some(ns) = next_screen {
            screen = ns;
        }

        next_frame().await;
    }

    info!("exiting");
    Ok(())
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Writes the current settings to the save file. Failures are logged only.
fn persist_settings(game: &mut Game<JsonStore>) {
    let settings = game.settings().clone();
    if let Err(err) = game.store_mut().save_settings(&settings) {
        warn!(
            "could not save settings to {}: {err}",
            game.store().path().display()
        );
    }
}

fn sound_on(settings: &Settings, muted: bool) -> bool {
    !muted && settings.sound_enabled && settings.volume > 0.0
}

const TURN_KEYS: [(KeyCode, &str); 8] = [
    (KeyCode::Up, "ArrowUp"),
    (KeyCode::Down, "ArrowDown"),
    (KeyCode::Left, "ArrowLeft"),
    (KeyCode::Right, "ArrowRight"),
    (KeyCode::W, "w"),
    (KeyCode::S, "s"),
    (KeyCode::A, "a"),
    (KeyCode::D, "d"),
];

/// Maps this frame's key presses to core commands for the current status.
fn playing_commands(status: Status) -> Vec<Command> {
    let mut out = Vec::new();
    out.extend(
        TURN_KEYS
            .iter()
            .filter(|(key, _)| is_key_pressed(*key))
            .filter_map(|(_, token)| Direction::from_token(token))
            .map(Command::Turn),
    );
    let effects = [
        (KeyCode::Key1, EffectKind::SpeedBoost),
        (KeyCode::Key2, EffectKind::Shield),
        (KeyCode::Key3, EffectKind::Freeze),
    ];
    for (key, kind) in effects {
        if is_key_pressed(key) {
            out.push(Command::Activate(kind));
        }
    }
    if is_key_pressed(KeyCode::Space) {
        out.push(Command::TogglePause);
    }
    if is_key_pressed(KeyCode::Escape) {
        out.push(Command::Escape);
    }
    if is_key_pressed(KeyCode::R) {
        out.push(Command::Restart);
    }
    if status == Status::GameOver && is_key_pressed(KeyCode::Enter) {
        out.push(Command::Start);
    }
    out
}

/// Visual feedback for core events.
fn react(event: &Event, layout: &Layout, fx: &mut Fx) {
    match event {
        Event::FoodEaten { cell, .. } => fx.burst(layout.center_of(*cell), 8, MATRIX_BODY),
        Event::ComboStreak(combo) => {
            fx.flash(ORANGE);
            if *combo >= 10 {
                fx.toast(format!("{combo}x combo!"), "Keep it going");
            }
        }
        Event::PowerUpCollected { kind, cell, .. } => {
            let (_, color) = power_up_style(*kind);
            fx.burst(layout.center_of(*cell), 10, color);
            fx.toast("Power-up collected", kind.label().to_uppercase());
        }
        Event::EffectActivated(kind) => {
            fx.flash(SKYBLUE);
            fx.toast(format!("{} activated", kind.label().to_uppercase()), "5 seconds");
        }
        Event::LevelUp { level } => {
            fx.flash(MATRIX_HEAD);
            fx.toast(format!("Level {level}"), "Speed is climbing");
        }
        Event::AchievementUnlocked(id) => achievement_popup(*id, fx),
        Event::NewHighScore(score) => fx.toast("New high score!", format!("{score} points")),
        Event::Started => fx.clear(),
        _ => {}
    }
}

fn achievement_popup(id: AchievementId, fx: &mut Fx) {
    let info = id.info();
    fx.flash(BLUE);
    fx.burst(
        Vec2::new(screen_width() * 0.5, screen_height() * 0.5),
        15,
        SKYBLUE,
    );
    fx.toast(info.name, info.description);
}

// ── Lobby ───────────────────────────────────────────────────────────────────

enum LobbyAction {
    Stay,
    Start,
    Settings,
    Quit,
}

fn lobby_frame(lobby: &mut LobbyState, game: &mut Game<JsonStore>) -> LobbyAction {
    let sh = screen_height();
    let mut y = sh * 0.25;
    centered("SNAKE ARCADE", y, 40.0, MATRIX_HEAD);
    y += 56.0;

    let settings = game.settings().clone();
    let items = [
        "Enter: Start".to_string(),
        format!("Difficulty: < {} >", settings.difficulty),
        format!("Mode: < {} >", settings.mode),
        "Settings".to_string(),
        "Quit".to_string(),
    ];
    for (i, text) in items.iter().enumerate() {
        let color = if lobby.selected == i { WHITE } else { GRAY };
        centered(text, y, 20.0, color);
        y += 24.0;
    }

    let best = format!("Best: {}", game.snapshot().high_score);
    centered(&best, sh - 64.0, 20.0, MATRIX_BODY);
    centered(
        "Arrows move  Space pause  1/2/3 power-ups  M mute  F fullscreen",
        sh - 40.0,
        18.0,
        LIGHTGRAY,
    );

    if is_key_pressed(KeyCode::Up) {
        lobby.selected = (lobby.selected + LOBBY_ITEMS - 1) % LOBBY_ITEMS;
    }
    if is_key_pressed(KeyCode::Down) {
        lobby.selected = (lobby.selected + 1) % LOBBY_ITEMS;
    }
    let left = is_key_pressed(KeyCode::Left);
    let right = is_key_pressed(KeyCode::Right);
    if left || right {
        if let Some(s) = game.settings_mut() {
            match lobby.selected {
                1 => {
                    s.difficulty = if right {
                        s.difficulty.next()
                    } else {
                        s.difficulty.previous()
                    }
                }
                2 => s.mode = if right { s.mode.next() } else { s.mode.previous() },
                _ => {}
            }
        }
    }

    if is_key_pressed(KeyCode::S) {
        return LobbyAction::Settings;
    }
    if is_key_pressed(KeyCode::Q) {
        return LobbyAction::Quit;
    }
    if is_key_pressed(KeyCode::Enter) {
        return match lobby.selected {
            3 => LobbyAction::Settings,
            4 => LobbyAction::Quit,
            _ => LobbyAction::Start,
        };
    }
    LobbyAction::Stay
}

// ── Settings ────────────────────────────────────────────────────────────────

/// Returns `true` when the player leaves the screen.
fn settings_frame(state: &mut SettingsState, game: &mut Game<JsonStore>) -> bool {
    let sh = screen_height();
    let mut y = sh * 0.25;
    centered("SETTINGS", y, 36.0, MATRIX_HEAD);
    y += 56.0;

    let Some(s) = game.settings_mut() else {
        return true;
    };
    let on_off = |b: bool| if b { "on" } else { "off" };
    let lines = [
        format!("Wall collision: {}", on_off(s.wall_collision)),
        format!("Sound: {}", on_off(s.sound_enabled)),
        format!("Power-ups: {}", on_off(s.power_ups_enabled)),
        format!("Show FPS: {}", on_off(s.show_fps)),
        format!("Volume: {:>3}%", (s.volume * 100.0).round() as i32),
    ];
    for (i, line) in lines.iter().enumerate() {
        let color = if state.selected == i { WHITE } else { GRAY };
        centered(line, y, 22.0, color);
        y += 28.0;
    }
    centered("Up/Down select  Left/Right/Enter change  Esc back", y + 12.0, 18.0, GRAY);

    if is_key_pressed(KeyCode::Up) {
        state.selected = (state.selected + SETTINGS_ITEMS - 1) % SETTINGS_ITEMS;
    }
    if is_key_pressed(KeyCode::Down) {
        state.selected = (state.selected + 1) % SETTINGS_ITEMS;
    }
    let left = is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::Minus);
    let right = is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::Equal);
    let toggle = left || right || is_key_pressed(KeyCode::Enter);
    match state.selected {
        0 if toggle => s.wall_collision = !s.wall_collision,
        1 if toggle => s.sound_enabled = !s.sound_enabled,
        2 if toggle => s.power_ups_enabled = !s.power_ups_enabled,
        3 if toggle => s.show_fps = !s.show_fps,
        4 if left => s.volume = (s.volume - 0.05).max(0.0),
        4 if right => s.volume = (s.volume + 0.05).min(1.0),
        _ => {}
    }
    if is_key_pressed(KeyCode::M) {
        s.volume = if s.volume > 0.0 { 0.0 } else { 1.0 };
    }

    is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Backspace)
}
