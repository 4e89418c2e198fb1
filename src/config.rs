use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SOURCE_BASE_URL: &str = "https://raw.githubusercontent.com/Durashca/egeHelpDB/main/";
pub const MIN_VARIANT_MINUTES: u32 = 10;
pub const MAX_VARIANT_MINUTES: u32 = 240;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delimiter {
    #[default]
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = ";")]
    Semicolon,
    #[serde(rename = "\t")]
    Tab,
}

pub const ALL_DELIMITERS: [Delimiter; 3] = [Delimiter::Comma, Delimiter::Semicolon, Delimiter::Tab];

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
        }
    }

    /// Printable form for status lines (`\t` spelled out).
    pub fn label(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Semicolon => ";",
            Delimiter::Tab => "\\t",
        }
    }

    pub fn next(self) -> Self {
        let idx = ALL_DELIMITERS.iter().position(|&d| d == self).unwrap_or(0);
        ALL_DELIMITERS[(idx + 1) % ALL_DELIMITERS.len()]
    }

    pub fn prev(self) -> Self {
        let idx = ALL_DELIMITERS.iter().position(|&d| d == self).unwrap_or(0);
        ALL_DELIMITERS[(idx + ALL_DELIMITERS.len() - 1) % ALL_DELIMITERS.len()]
    }
}

/// Known files of the public question repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourcePreset {
    pub file_name: &'static str,
    pub subject_key: &'static str,
}

pub const SOURCE_PRESETS: [SourcePreset; 4] = [
    SourcePreset { file_name: "mathematic.csv", subject_key: "math" },
    SourcePreset { file_name: "physics.csv", subject_key: "physics" },
    SourcePreset { file_name: "informatics.csv", subject_key: "informatics" },
    SourcePreset { file_name: "russian.csv", subject_key: "russian" },
];

impl SourcePreset {
    pub fn url(&self) -> String {
        format!("{SOURCE_BASE_URL}{}", self.file_name)
    }

    /// Index of the preset whose URL equals `url`, if any.
    pub fn position_of(url: &str) -> Option<usize> {
        SOURCE_PRESETS.iter().position(|p| p.url() == url.trim())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub csv_url: String,
    pub delimiter: Delimiter,
    pub auto_check: bool,
    pub variant_time: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            csv_url: SOURCE_PRESETS[0].url(),
            delimiter: Delimiter::Comma,
            auto_check: true,
            variant_time: 235,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("variant time must be a whole number of minutes")]
    VariantTimeNotNumber,
    #[error(
        "variant time must be between {} and {} minutes",
        MIN_VARIANT_MINUTES,
        MAX_VARIANT_MINUTES
    )]
    VariantTimeOutOfRange,
}

impl Settings {
    /// Clamp values a hand-edited file may carry out of range.
    pub fn validate(&mut self) {
        self.variant_time = self
            .variant_time
            .clamp(MIN_VARIANT_MINUTES, MAX_VARIANT_MINUTES);
    }
}

/// Parse the variant time text field.
pub fn parse_variant_time(raw: &str) -> Result<u32, SettingsError> {
    let minutes: i64 = raw
        .trim()
        .parse()
        .map_err(|_| SettingsError::VariantTimeNotNumber)?;
    if minutes < MIN_VARIANT_MINUTES as i64 || minutes > MAX_VARIANT_MINUTES as i64 {
        return Err(SettingsError::VariantTimeOutOfRange);
    }
    Ok(minutes as u32)
}
