use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use rust_i18n::t;

use crate::app::{ALL_TABS, AppTab};
use crate::ui::theme::Theme;

pub fn tab_title(tab: AppTab) -> String {
    match tab {
        AppTab::Subjects => t!("tabs.subjects").to_string(),
        AppTab::Variants => t!("tabs.variants").to_string(),
        AppTab::Statistics => t!("tabs.statistics").to_string(),
        AppTab::Settings => t!("tabs.settings").to_string(),
    }
}

pub struct TabBar<'a> {
    pub active: AppTab,
    pub loading: bool,
    pub theme: &'a Theme,
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let header_style = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

        let mut spans = vec![Span::styled(
            format!(" {} ", t!("app.title")),
            header_style.add_modifier(Modifier::BOLD),
        )];
        for tab in ALL_TABS {
            let style = if tab == self.active {
                Style::default()
                    .fg(colors.accent())
                    .bg(colors.header_bg())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(colors.text_muted()).bg(colors.header_bg())
            };
            spans.push(Span::styled(format!(" {} ", tab_title(tab)), style));
            spans.push(Span::styled(" ", header_style));
        }
        if self.loading {
            spans.push(Span::styled(
                format!(" {} ", t!("app.loading")),
                Style::default().fg(colors.info()).bg(colors.header_bg()),
            ));
        }

        Paragraph::new(Line::from(spans))
            .style(header_style)
            .render(area, buf);
    }
}
