pub mod components;
pub mod layout;
pub mod line_input;
pub mod theme;

use ratatui::Frame;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use rust_i18n::t;

use crate::app::{App, AppTab};
use components::quiz_panel::QuizPanel;
use components::settings_panel::SettingsPanel;
use components::stats_panel::StatsPanel;
use components::tab_bar::TabBar;
use components::variant_panel::VariantPanel;
use layout::{AppLayout, pack_hint_lines};

pub fn footer_hints(app: &App) -> Vec<String> {
    let mut hints: Vec<String> = match app.tab {
        AppTab::Subjects => {
            let mut hints = vec![t!("hints.subjects.choose").to_string()];
            if app.settings.auto_check {
                hints.push(t!("hints.subjects.enter").to_string());
            }
            hints.push(t!("hints.subjects.check").to_string());
            hints.push(t!("hints.subjects.next").to_string());
            hints.push(t!("hints.subjects.reveal").to_string());
            hints
        }
        AppTab::Variants => vec![
            t!("hints.variants.select").to_string(),
            t!("hints.variants.start").to_string(),
            t!("hints.variants.pause").to_string(),
            t!("hints.variants.finish").to_string(),
        ],
        AppTab::Statistics if app.stats_confirm_clear => vec![t!("hints.stats.confirm").to_string()],
        AppTab::Statistics => vec![
            t!("hints.stats.refresh").to_string(),
            t!("hints.stats.clear").to_string(),
        ],
        AppTab::Settings => vec![
            t!("hints.settings.move").to_string(),
            t!("hints.settings.change").to_string(),
            t!("hints.settings.save").to_string(),
            t!("hints.settings.load").to_string(),
        ],
    };
    hints.push(t!("hints.tabs").to_string());
    hints.push(t!("hints.quit").to_string());
    hints
}

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    frame.render_widget(Block::default().style(Style::default().bg(colors.bg())), area);

    let hints = footer_hints(app);
    let hint_refs: Vec<&str> = hints.iter().map(String::as_str).collect();
    let footer_lines = pack_hint_lines(&hint_refs, area.width as usize);
    let layout = AppLayout::new(area, footer_lines.len() as u16);

    frame.render_widget(
        TabBar {
            active: app.tab,
            loading: app.loading,
            theme: app.theme,
        },
        layout.header,
    );

    match app.tab {
        AppTab::Subjects => frame.render_widget(
            QuizPanel {
                subject: app.session.subject(),
                state: app.session.state(&app.bank),
                question: app.current_question(),
                position: (
                    app.session.index() + 1,
                    app.session.question_total(&app.bank),
                ),
                answer: &app.answer,
                feedback: app.feedback.as_ref(),
                auto_check: app.settings.auto_check,
                theme: app.theme,
            },
            layout.main,
        ),
        AppTab::Variants => frame.render_widget(
            VariantPanel {
                variant: &app.variant,
                variant_minutes: app.settings.variant_time,
                theme: app.theme,
            },
            layout.main,
        ),
        AppTab::Statistics => frame.render_widget(
            StatsPanel {
                stats: &app.stats,
                notice: app.stats_notice.as_ref(),
                confirm_clear: app.stats_confirm_clear,
                theme: app.theme,
            },
            layout.main,
        ),
        AppTab::Settings => frame.render_widget(
            SettingsPanel {
                form: &app.form,
                status: app.settings_status.as_ref(),
                loading: app.loading,
                theme: app.theme,
            },
            layout.main,
        ),
    }

    let footer: Vec<Line> = footer_lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_muted()))))
        .collect();
    frame.render_widget(Paragraph::new(footer), layout.footer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ALL_TABS;
    use crate::quiz::question::sample_bank;
    use crate::quiz::subject::Subject;
    use crate::store::json_store::JsonStore;
    use crate::ui::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn make_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        store.save_question_bank(&sample_bank());
        let (tx, _rx) = mpsc::channel();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        (dir, App::new(store, theme, tx))
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_every_tab_renders() {
        let (_dir, mut app) = make_app();
        app.select_subject(Subject::Math);
        app.stats_confirm_clear = true;
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        for tab in ALL_TABS {
            app.tab = tab;
            terminal.draw(|frame| render(frame, &app)).unwrap();
        }
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let (_dir, mut app) = make_app();
        app.select_subject(Subject::Physics);
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        for tab in ALL_TABS {
            app.tab = tab;
            terminal.draw(|frame| render(frame, &app)).unwrap();
        }
    }

    #[test]
    fn test_subjects_tab_shows_question() {
        let (_dir, mut app) = make_app();
        app.select_subject(Subject::Math);
        let question = app.current_question().unwrap().question.clone();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let first_word = question.split_whitespace().next().unwrap().to_string();
        assert!(screen_text(&terminal).contains(&first_word));
    }

    #[test]
    fn test_enter_hint_follows_auto_check() {
        let (_dir, mut app) = make_app();
        app.settings.auto_check = true;
        let with = footer_hints(&app).len();
        app.settings.auto_check = false;
        assert_eq!(footer_hints(&app).len(), with - 1);
    }
}
