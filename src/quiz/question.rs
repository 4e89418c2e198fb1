use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_TOPIC: &str = "Общая тема";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Lenient parse used for spreadsheet cells. Unknown labels become `Medium`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "easy" | "легко" => Difficulty::Easy,
            "hard" | "сложно" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

// Cached difficulty may be raw cell text ("Сложно", "", null).
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Difficulty::Medium, Difficulty::parse_lenient))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Accepts a string or a bare JSON number/bool, rendered as text.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match CellValue::deserialize(deserializer)? {
        CellValue::Text(s) => s,
        CellValue::Int(n) => n.to_string(),
        CellValue::Float(x) => x.to_string(),
        CellValue::Bool(true) => "True".to_string(),
        CellValue::Bool(false) => "False".to_string(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(deserialize_with = "text_or_number")]
    pub question: String,
    #[serde(deserialize_with = "text_or_number")]
    pub answer: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub explanation: String,
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

impl QuestionRecord {
    pub fn explanation(&self) -> Option<&str> {
        let trimmed = self.explanation.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Subject key -> questions in source order. Sorted keys keep the cache
/// file byte-stable across identical ingestions.
pub type QuestionBank = BTreeMap<String, Vec<QuestionRecord>>;

pub fn question_count(bank: &QuestionBank) -> usize {
    bank.values().map(Vec::len).sum()
}

fn record(question: &str, answer: &str, topic: &str, difficulty: Difficulty) -> QuestionRecord {
    QuestionRecord {
        question: question.to_string(),
        answer: answer.to_string(),
        topic: topic.to_string(),
        difficulty,
        explanation: String::new(),
    }
}

/// Built-in bank used when the cached bank cannot be read.
pub fn sample_bank() -> QuestionBank {
    let mut bank = QuestionBank::new();
    bank.insert(
        "math".to_string(),
        vec![
            record(
                "Найдите производную функции y = 3x²",
                "6x",
                "Производная",
                Difficulty::Medium,
            ),
            record(
                "Решите уравнение: x² - 5x + 6 = 0",
                "2; 3",
                "Квадратные уравнения",
                Difficulty::Easy,
            ),
        ],
    );
    bank.insert(
        "physics".to_string(),
        vec![record(
            "Чему равна скорость света в вакууме?",
            "300000 км/с",
            "Оптика",
            Difficulty::Easy,
        )],
    );
    bank.insert(
        "informatics".to_string(),
        vec![record("True AND False = ?", "False", "Логика", Difficulty::Easy)],
    );
    bank.insert(
        "russian".to_string(),
        vec![record(
            "В каком слове пишется буква Ё: ш...л?",
            "шёл",
            "Орфография",
            Difficulty::Easy,
        )],
    );
    bank
}
