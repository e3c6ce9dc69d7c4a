use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use snake_arcade::storage::{MAX_STORED_GAMES, SaveData};
use snake_arcade::{
    Difficulty, Game, GameMode, GameStats, Grid, JsonStore, MemoryStore, ScoreStore, Settings,
};

fn scratch_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "snake_arcade_{name}_{}.json",
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

fn stats(score: u32) -> GameStats {
    GameStats {
        score,
        level: score / 10 + 1,
        max_combo: 2,
        duration_ms: 42_000,
        difficulty: Difficulty::Hard,
        mode: GameMode::Survival,
        snake_length: 6,
        timestamp: 1_700_000_000_000,
    }
}

#[test]
fn missing_file_starts_empty() {
    let path = scratch_file("missing");
    let store = JsonStore::open(&path);
    assert_eq!(store.read_high_score(), 0);
    assert_eq!(store.data(), &SaveData::default());
    assert!(!path.exists());
}

#[test]
fn scores_and_history_survive_a_reopen() {
    let path = scratch_file("reopen");
    let mut store = JsonStore::open(&path);
    store.write_high_score(31).unwrap();
    store.append_game_stats(stats(31)).unwrap();
    store.append_game_stats(stats(12)).unwrap();

    let reopened = JsonStore::open(&path);
    assert_eq!(reopened.read_high_score(), 31);
    assert_eq!(reopened.data().games, vec![stats(31), stats(12)]);

    fs::remove_file(&path).unwrap();
}

#[test]
fn settings_are_saved_alongside_scores() {
    let path = scratch_file("settings");
    let mut store = JsonStore::open(&path);
    let settings = Settings {
        difficulty: Difficulty::Expert,
        mode: GameMode::Modern,
        wall_collision: false,
        volume: 0.25,
        ..Settings::default()
    };
    store.save_settings(&settings).unwrap();
    store.write_high_score(5).unwrap();

    let reopened = JsonStore::open(&path);
    assert_eq!(reopened.settings(), &settings);
    assert_eq!(reopened.read_high_score(), 5);

    fs::remove_file(&path).unwrap();
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let path = scratch_file("corrupt");
    fs::write(&path, "{ this is not json").unwrap();

    let mut store = JsonStore::open(&path);
    assert_eq!(store.read_high_score(), 0);
    assert!(store.data().games.is_empty());

    // The next write replaces the broken file.
    store.write_high_score(3).unwrap();
    assert_eq!(JsonStore::open(&path).read_high_score(), 3);

    fs::remove_file(&path).unwrap();
}

#[test]
fn partial_save_fills_in_the_rest() {
    let path = scratch_file("partial");
    fs::write(&path, r#"{ "high_score": 77 }"#).unwrap();

    let store = JsonStore::open(&path);
    assert_eq!(store.read_high_score(), 77);
    assert_eq!(store.settings(), &Settings::default());

    fs::remove_file(&path).unwrap();
}

#[test]
fn history_keeps_only_the_latest_games() {
    let mut store = MemoryStore::default();
    for score in 0..60 {
        store.append_game_stats(stats(score)).unwrap();
    }
    assert_eq!(store.games.len(), MAX_STORED_GAMES);
    assert_eq!(store.games[0].score, 10);
    assert_eq!(store.games[MAX_STORED_GAMES - 1].score, 59);
}

#[test]
fn json_history_is_capped_too() {
    let path = scratch_file("capped");
    let mut store = JsonStore::open(&path);
    for score in 0..55 {
        store.append_game_stats(stats(score)).unwrap();
    }

    let reopened = JsonStore::open(&path);
    assert_eq!(reopened.data().games.len(), MAX_STORED_GAMES);
    assert_eq!(reopened.data().games[0].score, 5);

    fs::remove_file(&path).unwrap();
}

#[test]
fn menu_choices_persist_through_the_game_store() {
    let path = scratch_file("menu_choices");
    let mut rng = StdRng::seed_from_u64(5);
    let store = JsonStore::open(&path);
    let mut game = Game::new(Settings::default(), Grid::new(12, 12), store, &mut rng);

    let Some(settings) = game.settings_mut() else {
        panic!("settings are editable in the menu");
    };
    settings.difficulty = settings.difficulty.next();
    settings.mode = settings.mode.previous();
    let chosen = game.settings().clone();
    game.store_mut().save_settings(&chosen).unwrap();
    assert_eq!(game.store().path(), path.as_path());

    let reopened = JsonStore::open(&path);
    assert_eq!(reopened.settings().difficulty, Difficulty::Hard);
    assert_eq!(reopened.settings().mode, GameMode::Survival);

    fs::remove_file(&path).unwrap();
}
