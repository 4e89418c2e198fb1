use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::quiz::variant::{VARIANT_COUNT, VariantController, VariantStatus};
use crate::ui::theme::Theme;

pub fn status_text(status: VariantStatus) -> String {
    match status {
        VariantStatus::NotSelected => t!("variant.status.not_selected").to_string(),
        VariantStatus::Selected(n) => t!("variant.status.selected", number = n).to_string(),
        VariantStatus::Running => t!("variant.status.running").to_string(),
        VariantStatus::Paused => t!("variant.status.paused").to_string(),
        VariantStatus::Finished => t!("variant.status.finished").to_string(),
    }
}

pub struct VariantPanel<'a> {
    pub variant: &'a VariantController,
    pub variant_minutes: u32,
    pub theme: &'a Theme,
}

impl Widget for VariantPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("variant.title")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(VARIANT_COUNT as u16 + 1),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("  {}", t!("variant.info")),
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                format!("  {}", t!("variant.choose")),
                Style::default().fg(colors.text_muted()),
            )),
        ])
        .wrap(Wrap { trim: false })
        .render(layout[0], buf);

        let selected = self.variant.selected();
        let items: Vec<Line> = (1..=VARIANT_COUNT)
            .map(|n| {
                let is_selected = selected == Some(n);
                let indicator = if is_selected { " > " } else { "   " };
                let style = Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected { Modifier::BOLD } else { Modifier::empty() });
                Line::from(Span::styled(
                    format!("{indicator}[{n}] {}", t!("variant.item", number = n)),
                    style,
                ))
            })
            .collect();
        Paragraph::new(items).render(layout[1], buf);

        let status = self.variant.status();
        let status_color = match status {
            VariantStatus::Running => colors.success(),
            VariantStatus::Paused => colors.warning(),
            VariantStatus::Finished => colors.info(),
            VariantStatus::NotSelected | VariantStatus::Selected(_) => colors.text_muted(),
        };
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("  {}  ", t!("variant.timer", time = self.variant.clock_text(self.variant_minutes))),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(status_text(status), Style::default().fg(status_color)),
        ]))
        .render(layout[2], buf);
    }
}
