use std::fmt;

use rust_i18n::t;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
    Math,
    Physics,
    Informatics,
    Russian,
}

pub const ALL_SUBJECTS: [Subject; 4] = [
    Subject::Math,
    Subject::Physics,
    Subject::Informatics,
    Subject::Russian,
];

impl Subject {
    pub fn key(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Physics => "physics",
            Subject::Informatics => "informatics",
            Subject::Russian => "russian",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_SUBJECTS.into_iter().find(|s| s.key() == key)
    }

    pub fn display_name(self) -> String {
        match self {
            Subject::Math => t!("subject.math").to_string(),
            Subject::Physics => t!("subject.physics").to_string(),
            Subject::Informatics => t!("subject.informatics").to_string(),
            Subject::Russian => t!("subject.russian").to_string(),
        }
    }

    /// Guess the subject from the last path segment of a source URL.
    /// Falls back to math when nothing matches.
    pub fn infer_from_url(url: &str) -> Self {
        let file_name = url.rsplit('/').next().unwrap_or("").to_lowercase();
        if file_name.contains("mathematic") || file_name.contains("math") {
            Subject::Math
        } else if file_name.contains("physics") {
            Subject::Physics
        } else if file_name.contains("informatic") {
            Subject::Informatics
        } else if file_name.contains("russian") {
            Subject::Russian
        } else {
            Subject::Math
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display name for an arbitrary bank key; unknown keys are shown verbatim.
pub fn display_name_for_key(key: &str) -> String {
    Subject::from_key(key)
        .map(Subject::display_name)
        .unwrap_or_else(|| key.to_string())
}
