use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::quiz::question::{QuestionBank, question_count};
use crate::store::schema::Stats;

pub const SETTINGS_FILE: &str = "ege_settings.json";
pub const STATS_FILE: &str = "stats.json";
pub const CACHE_FILE: &str = "tasks_cache.json";

#[derive(Debug)]
pub enum CacheState {
    Missing,
    Loaded(QuestionBank),
    /// File exists but could not be read or parsed.
    Corrupt,
}

#[derive(Clone, Debug)]
pub struct JsonStore {
    base_dir: PathBuf,
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ege-trainer")
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Read `name` as a JSON value. `None` when the file is absent or broken;
    /// broken files are logged.
    fn read_value(&self, name: &str) -> Option<Value> {
        let path = self.file_path(name);
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read file, using defaults");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed JSON, using defaults");
                None
            }
        }
    }

    /// Load `name`, merge it over `default` with `merge`, and deserialize the
    /// result. Any failure leaves `default` untouched.
    fn load_merged<T>(&self, name: &str, default: T, merge: fn(&mut Value, Value)) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let Some(loaded) = self.read_value(name) else {
            return default;
        };
        let mut merged = match serde_json::to_value(&default) {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "cannot serialize defaults");
                return default;
            }
        };
        merge(&mut merged, loaded);
        match serde_json::from_value(merged) {
            Ok(value) => value,
            Err(e) => {
                warn!(file = name, error = %e, "stored values do not fit the schema, using defaults");
                default
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Save and log instead of propagating; returns whether the write landed.
    fn save_logged<T: Serialize>(&self, name: &str, data: &T) -> bool {
        match self.save(name, data) {
            Ok(()) => true,
            Err(e) => {
                error!(file = name, error = %e, "failed to save");
                false
            }
        }
    }

    pub fn load_settings(&self) -> Settings {
        let mut settings = self.load_merged(SETTINGS_FILE, Settings::default(), merge_shallow);
        settings.validate();
        settings
    }

    pub fn save_settings(&self, settings: &Settings) -> bool {
        self.save_logged(SETTINGS_FILE, settings)
    }

    pub fn load_stats(&self) -> Stats {
        self.load_merged(STATS_FILE, Stats::default(), merge_nested)
    }

    pub fn save_stats(&self, stats: &Stats) -> bool {
        self.save_logged(STATS_FILE, stats)
    }

    pub fn load_question_bank(&self) -> CacheState {
        let path = self.file_path(CACHE_FILE);
        if !path.exists() {
            return CacheState::Missing;
        }
        let parsed = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Ok(serde_json::from_str::<QuestionBank>(&content)?));
        match parsed {
            Ok(bank) => {
                info!(
                    subjects = bank.len(),
                    questions = question_count(&bank),
                    "loaded question cache"
                );
                CacheState::Loaded(bank)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "question cache unreadable");
                CacheState::Corrupt
            }
        }
    }

    pub fn save_question_bank(&self, bank: &QuestionBank) -> bool {
        self.save_logged(CACHE_FILE, bank)
    }
}

/// Top-level keys of `loaded` replace the ones in `base`.
pub fn merge_shallow(base: &mut Value, loaded: Value) {
    let (Value::Object(base), Value::Object(loaded)) = (base, loaded) else {
        return;
    };
    for (key, value) in loaded {
        base.insert(key, value);
    }
}

/// Like [`merge_shallow`], but keys whose default and loaded values are both
/// objects are merged one entry at a time.
pub fn merge_nested(base: &mut Value, loaded: Value) {
    let (Value::Object(base), Value::Object(loaded)) = (base, loaded) else {
        return;
    };
    for (key, value) in loaded {
        let nested = value.is_object() && base.get(&key).is_some_and(Value::is_object);
        if !nested {
            base.insert(key, value);
            continue;
        }
        if let (Some(Value::Object(inner)), Value::Object(entries)) = (base.get_mut(&key), value) {
            merge_entries(inner, entries);
        }
    }
}

fn merge_entries(inner: &mut Map<String, Value>, entries: Map<String, Value>) {
    for (key, value) in entries {
        inner.insert(key, value);
    }
}
