use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use rust_i18n::t;

use crate::app::{StatusKind, StatusLine};
use crate::quiz::subject::display_name_for_key;
use crate::store::schema::Stats;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::layout::centered_box;
use crate::ui::theme::{Theme, ThemeColors};

pub fn status_color(kind: StatusKind, colors: &ThemeColors) -> ratatui::style::Color {
    match kind {
        StatusKind::Info => colors.info(),
        StatusKind::Success => colors.success(),
        StatusKind::Warning => colors.warning(),
        StatusKind::Error => colors.error(),
    }
}

pub struct StatsPanel<'a> {
    pub stats: &'a Stats,
    pub notice: Option<&'a StatusLine>,
    pub confirm_clear: bool,
    pub theme: &'a Theme,
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("stats.title")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let subject_rows = self.stats.subjects.len() as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(subject_rows * 3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let accuracy = match self.stats.accuracy() {
            Some(pct) => t!("stats.accuracy", pct = format!("{pct:.1}")).to_string(),
            None => t!("stats.accuracy_none").to_string(),
        };
        let value_style = Style::default().fg(colors.fg());
        let summary = vec![
            Line::from(Span::styled(
                format!("  {}", t!("stats.total", count = self.stats.total_attempts)),
                value_style,
            )),
            Line::from(Span::styled(
                format!("  {}", t!("stats.correct", count = self.stats.correct_answers)),
                value_style,
            )),
            Line::from(Span::styled(
                format!("  {accuracy}"),
                value_style.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {}", t!("stats.variants", count = self.stats.variants_completed)),
                value_style,
            )),
        ];
        Paragraph::new(summary).render(layout[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.stats
                    .subjects
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);
        for ((key, subject), row) in self.stats.subjects.iter().zip(rows.iter()) {
            let caption = t!(
                "stats.subject_caption",
                correct = subject.correct,
                attempts = subject.attempts,
                pct = format!("{:.0}", subject.accuracy())
            )
            .to_string();
            ProgressBar::new(&display_name_for_key(key), subject.accuracy() / 100.0, self.theme)
                .caption(caption)
                .render(*row, buf);
        }

        if let Some(notice) = self.notice {
            Paragraph::new(Line::from(Span::styled(
                format!("  {}", notice.text),
                Style::default().fg(status_color(notice.kind, colors)),
            )))
            .render(layout[3], buf);
        }

        if self.confirm_clear {
            let dialog_text = t!("stats.confirm_clear").to_string();
            let width = dialog_text.chars().count() as u16 + 6;
            let dialog_area = centered_box(width, 5, area);

            Clear.render(dialog_area, buf);
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {dialog_text}  "),
                    Style::default().fg(colors.fg()),
                )),
            ])
            .style(Style::default().bg(colors.bg()))
            .block(
                Block::bordered()
                    .title(format!(" {} ", t!("stats.confirm_title")))
                    .border_style(Style::default().fg(colors.error()))
                    .style(Style::default().bg(colors.bg())),
            )
            .render(dialog_area, buf);
        }
    }
}
