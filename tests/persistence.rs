use std::fs;

use serde_json::{Value, json};
use tempfile::TempDir;

use ege_trainer::config::{Delimiter, Settings};
use ege_trainer::quiz::question::sample_bank;
use ege_trainer::quiz::subject::ALL_SUBJECTS;
use ege_trainer::store::json_store::{
    CACHE_FILE, CacheState, JsonStore, SETTINGS_FILE, STATS_FILE,
};
use ege_trainer::store::schema::{Stats, SubjectStats};

fn temp_store() -> (TempDir, JsonStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

fn read_json(store: &JsonStore, name: &str) -> Value {
    serde_json::from_str(&fs::read_to_string(store.file_path(name)).unwrap()).unwrap()
}

#[test]
fn every_partial_settings_file_keeps_all_default_keys() {
    let partials = [
        json!({}),
        json!({"csv_url": "https://example.com/own.csv"}),
        json!({"delimiter": "\t"}),
        json!({"auto_check": false, "variant_time": 60}),
        json!({"csv_url": "https://example.com/x.csv", "delimiter": ";", "auto_check": false, "variant_time": 10}),
    ];
    let defaults = serde_json::to_value(Settings::default()).unwrap();

    for partial in partials {
        let (_dir, store) = temp_store();
        fs::write(store.file_path(SETTINGS_FILE), partial.to_string()).unwrap();

        let loaded = serde_json::to_value(store.load_settings()).unwrap();
        for (key, default) in defaults.as_object().unwrap() {
            let expected = partial.get(key).unwrap_or(default);
            assert_eq!(&loaded[key], expected, "key {key} for {partial}");
        }
    }
}

#[test]
fn partial_stats_keep_missing_subjects_at_zero() {
    let (_dir, store) = temp_store();
    fs::write(
        store.file_path(STATS_FILE),
        r#"{"total_attempts": 3, "correct_answers": 2, "subjects": {"physics": {"attempts": 3, "correct": 2}}}"#,
    )
    .unwrap();

    let stats = store.load_stats();
    assert_eq!(stats.total_attempts, 3);
    assert_eq!(stats.subjects["physics"], SubjectStats { attempts: 3, correct: 2 });
    for subject in ALL_SUBJECTS.iter().filter(|s| s.key() != "physics") {
        assert_eq!(stats.subjects[subject.key()], SubjectStats::default());
    }
}

#[test]
fn broken_files_fall_back_to_defaults() {
    let (_dir, store) = temp_store();
    fs::write(store.file_path(SETTINGS_FILE), "{\"csv_url\": ").unwrap();
    fs::write(store.file_path(STATS_FILE), "[1, 2").unwrap();
    fs::write(store.file_path(CACHE_FILE), "not json").unwrap();

    assert_eq!(store.load_settings(), Settings::default());
    assert_eq!(store.load_stats(), Stats::default());
    assert!(matches!(store.load_question_bank(), CacheState::Corrupt));
}

#[test]
fn saved_files_are_readable_json_with_literal_cyrillic() {
    let (_dir, store) = temp_store();
    let settings = Settings {
        delimiter: Delimiter::Semicolon,
        ..Settings::default()
    };
    assert!(store.save_settings(&settings));
    assert!(store.save_question_bank(&sample_bank()));

    let settings_json = read_json(&store, SETTINGS_FILE);
    assert_eq!(settings_json["delimiter"], ";");
    assert_eq!(settings_json["variant_time"], 235);

    let cache = fs::read_to_string(store.file_path(CACHE_FILE)).unwrap();
    assert!(cache.contains("Производная"));
    assert!(cache.contains('\n'));
    assert!(!store.file_path("tasks_cache.tmp").exists());
}

#[test]
fn stats_round_trip_through_disk() {
    let (_dir, store) = temp_store();
    let mut stats = Stats::default();
    stats.record_attempt("math", true);
    stats.record_attempt("informatics", false);
    stats.record_variant_finished();
    assert!(store.save_stats(&stats));

    let json = read_json(&store, STATS_FILE);
    assert_eq!(json["subjects"]["math"]["correct"], 1);
    assert_eq!(store.load_stats(), stats);
}

#[test]
fn out_of_range_variant_time_on_disk_is_clamped() {
    let (_dir, store) = temp_store();
    fs::write(store.file_path(SETTINGS_FILE), r#"{"variant_time": 1000}"#).unwrap();
    assert_eq!(store.load_settings().variant_time, 240);
}
