use std::sync::mpsc;
use std::thread;

use rust_i18n::t;
use tracing::{info, warn};

use crate::config::{
    Delimiter, SOURCE_PRESETS, Settings, SettingsError, SourcePreset, parse_variant_time,
};
use crate::event::AppEvent;
use crate::ingest::{self, IngestError, IngestReport, ValidationError};
use crate::quiz::question::{QuestionBank, QuestionRecord, sample_bank};
use crate::quiz::session::{CheckOutcome, QuizSession, Revealed};
use crate::quiz::subject::Subject;
use crate::quiz::variant::VariantController;
use crate::store::json_store::{CacheState, JsonStore};
use crate::store::schema::Stats;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppTab {
    Subjects,
    Variants,
    Statistics,
    Settings,
}

pub const ALL_TABS: [AppTab; 4] = [
    AppTab::Subjects,
    AppTab::Variants,
    AppTab::Statistics,
    AppTab::Settings,
];

impl AppTab {
    pub fn index(self) -> usize {
        ALL_TABS.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        ALL_TABS[(self.index() + 1) % ALL_TABS.len()]
    }

    pub fn prev(self) -> Self {
        ALL_TABS[(self.index() + ALL_TABS.len() - 1) % ALL_TABS.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// What the subjects tab shows under the answer field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizFeedback {
    Checked { outcome: CheckOutcome, input: String },
    Revealed(Revealed),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Source,
    Url,
    Delimiter,
    AutoCheck,
    VariantTime,
}

pub const SETTINGS_FIELDS: [SettingsField; 5] = [
    SettingsField::Source,
    SettingsField::Url,
    SettingsField::Delimiter,
    SettingsField::AutoCheck,
    SettingsField::VariantTime,
];

impl SettingsField {
    pub fn is_text(self) -> bool {
        matches!(self, SettingsField::Url | SettingsField::VariantTime)
    }
}

/// Editable copy of [`Settings`]; becomes the active value on save.
#[derive(Clone, Debug)]
pub struct SettingsForm {
    pub url: LineInput,
    pub delimiter: Delimiter,
    pub auto_check: bool,
    pub variant_time: LineInput,
    pub selected: usize,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            url: LineInput::new(&settings.csv_url),
            delimiter: settings.delimiter,
            auto_check: settings.auto_check,
            variant_time: LineInput::new(&settings.variant_time.to_string()),
            selected: 0,
        }
    }

    pub fn field(&self) -> SettingsField {
        SETTINGS_FIELDS[self.selected.min(SETTINGS_FIELDS.len() - 1)]
    }

    pub fn preset(&self) -> Option<usize> {
        SourcePreset::position_of(self.url.value())
    }

    pub fn commit(&self) -> Result<Settings, SettingsError> {
        Ok(Settings {
            csv_url: self.url.value().to_string(),
            delimiter: self.delimiter,
            auto_check: self.auto_check,
            variant_time: parse_variant_time(self.variant_time.value())?,
        })
    }

    fn cycle(&mut self, forward: bool) {
        match self.field() {
            SettingsField::Source => {
                let count = SOURCE_PRESETS.len();
                let next = match self.preset() {
                    Some(idx) if forward => (idx + 1) % count,
                    Some(idx) => (idx + count - 1) % count,
                    None => 0,
                };
                self.url.set(&SOURCE_PRESETS[next].url());
            }
            SettingsField::Delimiter => {
                self.delimiter = if forward {
                    self.delimiter.next()
                } else {
                    self.delimiter.prev()
                };
            }
            SettingsField::AutoCheck => self.auto_check = !self.auto_check,
            SettingsField::Url | SettingsField::VariantTime => {}
        }
    }
}

pub struct App {
    pub tab: AppTab,
    pub theme: &'static Theme,
    pub settings: Settings,
    pub stats: Stats,
    pub bank: QuestionBank,
    pub session: QuizSession,
    pub answer: LineInput,
    pub feedback: Option<QuizFeedback>,
    pub variant: VariantController,
    pub form: SettingsForm,
    pub settings_status: Option<StatusLine>,
    pub stats_notice: Option<StatusLine>,
    pub stats_confirm_clear: bool,
    pub loading: bool,
    pub should_quit: bool,
    store: JsonStore,
    events: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(store: JsonStore, theme: &'static Theme, events: mpsc::Sender<AppEvent>) -> Self {
        let settings = store.load_settings();
        let stats = store.load_stats();
        let cache = store.load_question_bank();

        let missing_cache = matches!(cache, CacheState::Missing);
        let bank = match cache {
            CacheState::Loaded(bank) => bank,
            CacheState::Corrupt => {
                warn!("falling back to the built-in sample questions");
                sample_bank()
            }
            CacheState::Missing => QuestionBank::new(),
        };

        let form = SettingsForm::from_settings(&settings);
        let mut app = Self {
            tab: AppTab::Subjects,
            theme,
            settings,
            stats,
            bank,
            session: QuizSession::new(),
            answer: LineInput::default(),
            feedback: None,
            variant: VariantController::default(),
            form,
            settings_status: None,
            stats_notice: None,
            stats_confirm_clear: false,
            loading: false,
            should_quit: false,
            store,
            events,
        };

        if missing_cache && ingest::validate_url(&app.settings.csv_url).is_ok() {
            let url = app.settings.csv_url.clone();
            app.start_ingest(&url, app.settings.delimiter, true);
        }
        app
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    // --- navigation ---

    pub fn next_tab(&mut self) {
        self.go_to_tab(self.tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.go_to_tab(self.tab.prev());
    }

    pub fn go_to_tab(&mut self, tab: AppTab) {
        self.stats_confirm_clear = false;
        self.tab = tab;
    }

    // --- subjects tab ---

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.session.current(&self.bank)
    }

    pub fn select_subject(&mut self, subject: Subject) {
        let state = self.session.select_subject(&self.bank, subject.key());
        info!(subject = subject.key(), ?state, "subject selected");
        self.answer.clear();
        self.feedback = None;
        self.go_to_tab(AppTab::Subjects);
    }

    pub fn next_question(&mut self) {
        if self.session.question_total(&self.bank) == 0 {
            return;
        }
        self.session.advance(&self.bank);
        self.answer.clear();
        self.feedback = None;
    }

    pub fn check_answer(&mut self) {
        let input = self.answer.value().trim().to_string();
        let outcome = self.session.check_answer(&self.bank, &mut self.stats, &input);
        if outcome.counted() {
            self.store.save_stats(&self.stats);
        }
        self.feedback = Some(QuizFeedback::Checked { outcome, input });
    }

    /// Enter in the answer field checks only while auto-check is on.
    pub fn submit_answer(&mut self) {
        if self.settings.auto_check {
            self.check_answer();
        }
    }

    pub fn reveal_answer(&mut self) {
        if let Some(revealed) = self.session.reveal(&self.bank) {
            self.feedback = Some(QuizFeedback::Revealed(revealed));
        }
    }

    // --- variants tab ---

    pub fn select_variant(&mut self, number: u8) {
        self.variant.select(number);
        self.go_to_tab(AppTab::Variants);
    }

    pub fn start_variant(&mut self) {
        self.variant.start();
    }

    pub fn pause_variant(&mut self) {
        self.variant.pause();
    }

    pub fn finish_variant(&mut self) {
        self.variant.finish(&mut self.stats);
        self.store.save_stats(&self.stats);
    }

    // --- statistics tab ---

    pub fn refresh_stats(&mut self) {
        self.stats_notice = None;
    }

    pub fn request_clear_stats(&mut self) {
        self.stats_confirm_clear = true;
    }

    pub fn cancel_clear_stats(&mut self) {
        self.stats_confirm_clear = false;
    }

    pub fn clear_stats(&mut self) {
        self.stats_confirm_clear = false;
        self.stats = Stats::default();
        self.store.save_stats(&self.stats);
        info!("statistics reset");
        self.stats_notice = Some(StatusLine::new(StatusKind::Success, t!("stats.reset_done")));
    }

    // --- settings tab ---

    pub fn settings_next_field(&mut self) {
        self.form.selected = (self.form.selected + 1) % SETTINGS_FIELDS.len();
    }

    pub fn settings_prev_field(&mut self) {
        self.form.selected = (self.form.selected + SETTINGS_FIELDS.len() - 1) % SETTINGS_FIELDS.len();
    }

    pub fn settings_cycle_forward(&mut self) {
        self.form.cycle(true);
    }

    pub fn settings_cycle_backward(&mut self) {
        self.form.cycle(false);
    }

    pub fn save_settings(&mut self) {
        match self.form.commit() {
            Ok(settings) => {
                self.settings = settings;
                self.settings_status = Some(if self.store.save_settings(&self.settings) {
                    info!("settings saved");
                    StatusLine::new(StatusKind::Success, t!("settings.status.saved"))
                } else {
                    StatusLine::new(StatusKind::Error, t!("settings.status.save_failed"))
                });
            }
            Err(e) => {
                self.settings_status = Some(StatusLine::new(
                    StatusKind::Error,
                    settings_error_text(&e),
                ));
            }
        }
    }

    /// Load questions from the URL and delimiter currently in the form.
    pub fn load_from_form(&mut self) {
        let url = self.form.url.value().to_string();
        self.start_ingest(&url, self.form.delimiter, false);
    }

    // --- ingestion ---

    /// Validate on the UI thread, then fetch and parse on a worker thread.
    /// The result arrives as [`AppEvent::Ingested`].
    pub fn start_ingest(&mut self, url: &str, delimiter: Delimiter, silent: bool) {
        if self.loading {
            if !silent {
                self.settings_status =
                    Some(StatusLine::new(StatusKind::Warning, t!("settings.status.busy")));
            }
            return;
        }
        let url = match ingest::validate_url(url) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!(error = %e, "rejected source URL");
                if !silent {
                    self.settings_status = Some(StatusLine::new(
                        StatusKind::Error,
                        ingest_error_text(&IngestError::Validation(e)),
                    ));
                }
                return;
            }
        };

        self.loading = true;
        if !silent {
            self.settings_status = Some(StatusLine::new(StatusKind::Info, t!("settings.status.loading")));
        }

        let store = self.store.clone();
        let tx = self.events.clone();
        thread::spawn(move || {
            let result = ingest::ingest(&url, delimiter, &store);
            let _ = tx.send(AppEvent::Ingested { silent, result });
        });
    }

    pub fn handle_ingested(&mut self, silent: bool, result: Result<IngestReport, IngestError>) {
        self.loading = false;
        match result {
            Ok(report) => {
                self.bank = report.bank;
                self.session.rebind(&self.bank);
                self.feedback = None;
                if !silent {
                    let text = t!(
                        "settings.status.loaded",
                        count = report.count,
                        encoding = report.encoding,
                        delimiter = report.delimiter.label(),
                        time = report.finished_at.format("%H:%M").to_string()
                    );
                    self.settings_status = Some(StatusLine::new(StatusKind::Success, text));
                }
            }
            Err(e) => {
                warn!(error = %e, network = e.is_network(), silent, "question set ingestion failed");
                if !silent {
                    self.settings_status =
                        Some(StatusLine::new(StatusKind::Error, ingest_error_text(&e)));
                }
            }
        }
    }

    /// Persist everything on the way out. An invalid settings form keeps the
    /// previously active settings.
    pub fn shutdown(&mut self) {
        match self.form.commit() {
            Ok(settings) => self.settings = settings,
            Err(e) => warn!(error = %e, "settings form invalid at exit, keeping saved values"),
        }
        self.store.save_settings(&self.settings);
        self.store.save_stats(&self.stats);
    }
}

pub fn ingest_error_text(err: &IngestError) -> String {
    match err {
        IngestError::Validation(ValidationError::EmptyUrl) => t!("settings.status.empty_url").to_string(),
        IngestError::Validation(ValidationError::UnsupportedScheme(_)) => {
            t!("settings.status.bad_url").to_string()
        }
        IngestError::Timeout => t!("settings.status.timeout").to_string(),
        IngestError::Status(_) | IngestError::Network(_) => {
            t!("settings.status.network_error", error = err.to_string()).to_string()
        }
        IngestError::Disabled => t!("settings.status.disabled").to_string(),
    }
}

pub fn settings_error_text(err: &SettingsError) -> String {
    match err {
        SettingsError::VariantTimeNotNumber => t!("settings.status.time_not_number").to_string(),
        SettingsError::VariantTimeOutOfRange => t!("settings.status.time_out_of_range").to_string(),
    }
}
