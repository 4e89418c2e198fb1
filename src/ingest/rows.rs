use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::config::Delimiter;
use crate::quiz::question::{DEFAULT_TOPIC, Difficulty, QuestionBank, QuestionRecord};
use crate::quiz::subject::Subject;

pub const SUBJECT_COLUMN: &str = "subject";

/// Accepted header names for one record field, English first.
#[derive(Clone, Copy, Debug)]
pub struct ColumnAliases {
    pub english: &'static str,
    pub russian: &'static str,
}

pub const QUESTION: ColumnAliases = ColumnAliases { english: "question_text", russian: "Вопрос" };
pub const ANSWER: ColumnAliases = ColumnAliases { english: "correct_answer", russian: "Ответ" };
pub const TOPIC: ColumnAliases = ColumnAliases { english: "topic", russian: "Тема" };
pub const DIFFICULTY: ColumnAliases = ColumnAliases { english: "difficulty", russian: "Сложность" };
pub const EXPLANATION: ColumnAliases =
    ColumnAliases { english: "explanation", russian: "Объяснение" };

/// Column positions resolved once from the header row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub subject: Option<usize>,
    pub question: Option<usize>,
    pub answer: Option<usize>,
    pub topic: Option<usize>,
    pub difficulty: Option<usize>,
    pub explanation: Option<usize>,
}

impl ColumnMap {
    pub fn resolve(headers: &StringRecord) -> Self {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();
        let find = |name: &str| names.iter().position(|h| *h == name);
        let aliased = |aliases: ColumnAliases| find(aliases.english).or_else(|| find(aliases.russian));

        Self {
            subject: find(SUBJECT_COLUMN),
            question: aliased(QUESTION),
            answer: aliased(ANSWER),
            topic: aliased(TOPIC),
            difficulty: aliased(DIFFICULTY),
            explanation: aliased(EXPLANATION),
        }
    }
}

/// A present column yields its cell (empty when the row is short); an
/// absent column yields `None`.
fn cell<'r>(record: &'r StringRecord, column: Option<usize>) -> Option<&'r str> {
    column.map(|idx| record.get(idx).unwrap_or(""))
}

fn subject_key(record: &StringRecord, columns: &ColumnMap, fallback: Subject) -> String {
    match cell(record, columns.subject).map(|s| s.trim().to_lowercase()) {
        Some(subject) if !subject.is_empty() => subject,
        _ => fallback.key().to_string(),
    }
}

pub fn map_record(record: &StringRecord, columns: &ColumnMap) -> Option<QuestionRecord> {
    let question = cell(record, columns.question).unwrap_or("");
    let answer = cell(record, columns.answer).unwrap_or("");
    if question.is_empty() || answer.is_empty() {
        return None;
    }
    Some(QuestionRecord {
        question: question.to_string(),
        answer: answer.to_string(),
        topic: cell(record, columns.topic).unwrap_or(DEFAULT_TOPIC).to_string(),
        difficulty: cell(record, columns.difficulty)
            .map(Difficulty::parse_lenient)
            .unwrap_or_default(),
        explanation: cell(record, columns.explanation).unwrap_or("").to_string(),
    })
}

#[derive(Debug, Default)]
pub struct ParsedRows {
    pub bank: QuestionBank,
    pub accepted: usize,
    pub dropped: usize,
}

/// Group delimited rows by subject. Rows without a subject column value fall
/// back to `fallback_subject`. Unreadable rows and rows lacking a question or
/// an answer are dropped.
pub fn parse_rows(text: &str, delimiter: Delimiter, fallback_subject: Subject) -> ParsedRows {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedRows::default();
    let columns = match reader.headers() {
        Ok(headers) => ColumnMap::resolve(headers),
        Err(e) => {
            debug!(error = %e, "no readable header row");
            return parsed;
        }
    };

    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!(row = line + 1, error = %e, "skipping unreadable row");
                parsed.dropped += 1;
                continue;
            }
        };

        let subject = subject_key(&record, &columns, fallback_subject);
        let questions = parsed.bank.entry(subject).or_default();
        match map_record(&record, &columns) {
            Some(question) => {
                questions.push(question);
                parsed.accepted += 1;
            }
            None => {
                debug!(row = line + 1, "skipping row without question or answer");
                parsed.dropped += 1;
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedRows {
        parse_rows(text, Delimiter::Comma, Subject::Math)
    }

    #[test]
    fn test_english_columns() {
        let parsed = parse(
            "question_text,correct_answer,topic,difficulty\n\"2+2=?\",\"4\",Arithmetic,easy\n",
        );
        assert_eq!(parsed.accepted, 1);
        let rec = &parsed.bank["math"][0];
        assert_eq!(rec.question, "2+2=?");
        assert_eq!(rec.answer, "4");
        assert_eq!(rec.topic, "Arithmetic");
        assert_eq!(rec.difficulty, Difficulty::Easy);
        assert_eq!(rec.explanation, "");
    }

    #[test]
    fn test_russian_columns_and_defaults() {
        let parsed = parse_rows(
            "Вопрос;Ответ\nСколько будет 2*3?;6\n",
            Delimiter::Semicolon,
            Subject::Physics,
        );
        let rec = &parsed.bank["physics"][0];
        assert_eq!(rec.question, "Сколько будет 2*3?");
        assert_eq!(rec.answer, "6");
        assert_eq!(rec.topic, DEFAULT_TOPIC);
        assert_eq!(rec.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_english_column_preferred_over_russian() {
        let parsed = parse("question_text,Вопрос,correct_answer\nenglish,russian,1\n");
        assert_eq!(parsed.bank["math"][0].question, "english");
    }

    #[test]
    fn test_empty_answer_row_dropped() {
        let parsed = parse(
            "question_text,correct_answer,topic,explanation\nq1,,Topic,Because\nq2,2,Topic,\n",
        );
        assert_eq!(parsed.accepted, 1);
        assert_eq!(parsed.dropped, 1);
        assert_eq!(parsed.bank["math"].len(), 1);
        assert_eq!(parsed.bank["math"][0].question, "q2");
    }

    #[test]
    fn test_subject_column_overrides_fallback() {
        let parsed = parse(
            "subject,question_text,correct_answer\n Physics ,q1,1\n,q2,2\ninformatics,q3,3\n",
        );
        assert_eq!(parsed.bank["physics"].len(), 1);
        assert_eq!(parsed.bank["math"][0].question, "q2");
        assert_eq!(parsed.bank["informatics"][0].question, "q3");
    }

    #[test]
    fn test_unknown_subject_kept_under_raw_key() {
        let parsed = parse("subject,question_text,correct_answer\nChemistry,H2O?,water\n");
        assert_eq!(parsed.bank["chemistry"][0].answer, "water");
    }

    #[test]
    fn test_subject_created_even_when_all_rows_dropped() {
        let parsed = parse("subject,question_text,correct_answer\nrussian,q,\n");
        assert_eq!(parsed.accepted, 0);
        assert!(parsed.bank["russian"].is_empty());
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let parsed = parse("question_text,correct_answer,topic\nq1,1\nq2\n");
        assert_eq!(parsed.accepted, 1);
        assert_eq!(parsed.bank["math"][0].topic, "");
    }

    #[test]
    fn test_row_order_preserved() {
        let parsed = parse("question_text,correct_answer\na,1\nb,2\nc,3\n");
        let order: Vec<&str> = parsed.bank["math"].iter().map(|q| q.question.as_str()).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }

    #[test]
    fn test_bom_in_header_is_ignored() {
        let parsed = parse("\u{feff}question_text,correct_answer\nq,1\n");
        assert_eq!(parsed.accepted, 1);
    }

    #[test]
    fn test_tab_delimiter() {
        let parsed = parse_rows(
            "question_text\tcorrect_answer\tdifficulty\nq\t2,5\thard\n",
            Delimiter::Tab,
            Subject::Math,
        );
        let rec = &parsed.bank["math"][0];
        assert_eq!(rec.answer, "2,5");
        assert_eq!(rec.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_no_recognized_columns_yields_nothing() {
        let parsed = parse("foo,bar\n1,2\n");
        assert_eq!(parsed.accepted, 0);
        assert_eq!(parsed.dropped, 1);
    }
}
