//! Saved progress and vocabulary packs on disk.
//!
//! Run with: cargo test --test progress_store

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::fs;

use linguamatch::round::{NullFeedback, Session};
use linguamatch::{
    CefrLevel, GameConfig, JsonFileStore, Phase, Progress, ProgressState, ProgressStore, Vocabulary,
    WordId,
};

const PACK: &str = r#"[
    {"id": "apple", "level": "A1", "en": "apple", "tr": "elma"},
    {"id": "water", "level": "A1", "en": "water", "tr": "su"},
    {"id": "house", "level": "A2", "en": "house", "tr": "ev"}
]"#;

#[test]
fn test_json_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("save.json");
    let mut store = JsonFileStore::new(&path);

    assert_eq!(store.load().unwrap(), ProgressState::default());

    let state = ProgressState {
        current_level: 7,
        unlocked_levels: 9,
        words_learned_index: 42,
        used_word_ids: vec![WordId::new("apple"), WordId::new("su")],
        vocab_level: CefrLevel::B1,
    };
    store.save(&state).unwrap();
    assert!(path.exists());
    assert_eq!(JsonFileStore::new(&path).load().unwrap(), state);
}

#[test]
fn test_corrupt_save_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(JsonFileStore::new(&path).load().is_err());

    let progress = Progress::open(JsonFileStore::new(&path));
    assert_eq!(progress.current_level(), 1);
    assert_eq!(progress.word_index(), 0);
}

#[test]
fn test_mutations_are_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let mut progress = Progress::open(JsonFileStore::new(&path));
    progress.add_used_word_ids(&[WordId::new("apple"), WordId::new("apple")]);
    progress.jump_to_level(4, Some(12)).unwrap();

    let saved = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(saved.current_level, 4);
    assert_eq!(saved.unlocked_levels, 4);
    assert_eq!(saved.words_learned_index, 12);
    assert_eq!(saved.used_word_ids, vec![WordId::new("apple")]);

    assert!(progress.jump_to_level(0, None).is_err());
    assert_eq!(JsonFileStore::new(&path).load().unwrap().current_level, 4);
}

#[test]
fn test_session_over_files_advances_once_per_win() {
    let dir = tempfile::tempdir().unwrap();
    let vocab_dir = dir.path().join("vocab");
    fs::create_dir(&vocab_dir).unwrap();
    fs::write(vocab_dir.join("a1.json"), PACK).unwrap();
    fs::write(vocab_dir.join("broken.json"), "[{").unwrap();
    let save = dir.path().join("save.json");

    let (vocab, report) = Vocabulary::scan_dir(&vocab_dir);
    assert_eq!(vocab.len(), 3);
    assert_eq!(report.loaded.len(), 1);
    assert_eq!(report.failed.len(), 1);

    let config = GameConfig {
        vocab_dir: vocab_dir.clone(),
        save_path: save.clone(),
        ..GameConfig::default()
    };
    let progress = Progress::open(JsonFileStore::new(&save));
    let mut session = Session::new(vocab, progress, Box::new(NullFeedback), config, Some(11));

    session.start_round().unwrap();
    let round = session.round_mut().unwrap();
    round.skip_intro();
    round.settle(1.0 / 60.0, 600);
    let (a, b) = round.request_hint().unwrap();
    round.select(a).unwrap();
    round.select(b).unwrap();
    for _ in 0..600 {
        session.tick(1.0 / 60.0);
        if session.round().unwrap().phase() == Phase::Won {
            break;
        }
    }
    assert_eq!(session.round().unwrap().phase(), Phase::Won);
    session.tick(1.0 / 60.0);

    let saved = JsonFileStore::new(&save).load().unwrap();
    assert_eq!(saved.current_level, 2);
    assert_eq!(saved.words_learned_index, 1);
    assert_eq!(saved.used_word_ids, vec![WordId::new("apple")]);
}
