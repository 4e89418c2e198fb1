use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ege_trainer::app::{App, AppTab, SettingsField};
use ege_trainer::event::{AppEvent, EventHandler};
use ege_trainer::quiz::subject::ALL_SUBJECTS;
use ege_trainer::store::json_store::{JsonStore, default_data_dir};
use ege_trainer::ui;
use ege_trainer::ui::line_input::InputResult;
use ege_trainer::ui::theme::Theme;

const LOG_FILE: &str = "ege-trainer.log";

#[derive(Parser)]
#[command(name = "ege-trainer", version, about = "Terminal trainer for EGE exam practice")]
struct Cli {
    #[arg(short, long, help = "Directory for settings, statistics and the question cache")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, default_value = "ru", help = "Interface language (ru, en)")]
    lang: String,
}

/// Log to a file in the data directory; the terminal belongs to the UI.
/// Failing to open the file only means running without logs.
fn init_logging(dir: &Path) {
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ege_trainer=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    init_logging(&data_dir);
    rust_i18n::set_locale(&cli.lang);

    let store = JsonStore::with_base_dir(data_dir)?;
    info!(dir = %store.base_dir().display(), lang = %cli.lang, "starting");

    let theme = match cli.theme.as_deref().map(|name| (name, Theme::load(name))) {
        Some((_, Some(theme))) => theme,
        Some((name, None)) => {
            warn!(theme = name, available = ?Theme::available_themes(), "unknown theme, using the default");
            Theme::default()
        }
        None => Theme::default(),
    };
    let theme: &'static Theme = Box::leak(Box::new(theme));

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(store, theme, events.sender());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Ingested { silent, result } => app.handle_ingested(silent, result),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat and Release would double the input
    if key.kind != KeyEventKind::Press {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Tab => return app.next_tab(),
        KeyCode::BackTab => return app.prev_tab(),
        KeyCode::F(n @ 1..=4) => return app.select_subject(ALL_SUBJECTS[n as usize - 1]),
        _ => {}
    }

    match app.tab {
        AppTab::Subjects => handle_subjects_key(app, key),
        AppTab::Variants => handle_variants_key(app, key),
        AppTab::Statistics => handle_stats_key(app, key),
        AppTab::Settings => handle_settings_key(app, key),
    }
}

fn handle_subjects_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('k') => return app.check_answer(),
            KeyCode::Char('n') => return app.next_question(),
            KeyCode::Char('r') => return app.reveal_answer(),
            _ => {}
        }
    }
    match app.answer.handle(key) {
        InputResult::Submit => app.submit_answer(),
        InputResult::Cancel => app.answer.clear(),
        InputResult::Continue => {}
    }
}

fn handle_variants_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(ch @ '1'..='5') => app.select_variant(ch as u8 - b'0'),
        KeyCode::Char('s') => app.start_variant(),
        KeyCode::Char('p') => app.pause_variant(),
        KeyCode::Char('f') => app.finish_variant(),
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    if app.stats_confirm_clear {
        match key.code {
            KeyCode::Char('y') => app.clear_stats(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_clear_stats(),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Char('r') => app.refresh_stats(),
        KeyCode::Char('c') => app.request_clear_stats(),
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => return app.save_settings(),
            KeyCode::Char('l') => return app.load_from_form(),
            _ => {}
        }
    }
    match key.code {
        KeyCode::Up => return app.settings_prev_field(),
        KeyCode::Down => return app.settings_next_field(),
        _ => {}
    }

    let field = app.form.field();
    if field.is_text() {
        let input = match field {
            SettingsField::Url => &mut app.form.url,
            _ => &mut app.form.variant_time,
        };
        if input.handle(key) == InputResult::Submit {
            app.settings_next_field();
        }
        return;
    }

    match key.code {
        KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => app.settings_cycle_forward(),
        KeyCode::Left => app.settings_cycle_backward(),
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}
