use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::app::{SETTINGS_FIELDS, SettingsField, SettingsForm, StatusLine};
use crate::config::SOURCE_PRESETS;
use crate::quiz::subject::display_name_for_key;
use crate::ui::components::input_field::input_line;
use crate::ui::components::stats_panel::status_color;
use crate::ui::theme::Theme;

pub fn field_label(field: SettingsField) -> String {
    match field {
        SettingsField::Source => t!("settings.field.source").to_string(),
        SettingsField::Url => t!("settings.field.url").to_string(),
        SettingsField::Delimiter => t!("settings.field.delimiter").to_string(),
        SettingsField::AutoCheck => t!("settings.field.auto_check").to_string(),
        SettingsField::VariantTime => t!("settings.field.variant_time").to_string(),
    }
}

pub struct SettingsPanel<'a> {
    pub form: &'a SettingsForm,
    pub status: Option<&'a StatusLine>,
    pub loading: bool,
    pub theme: &'a Theme,
}

impl SettingsPanel<'_> {
    fn cycle_value(&self, field: SettingsField) -> String {
        match field {
            SettingsField::Source => match self.form.preset() {
                Some(idx) => {
                    let preset = &SOURCE_PRESETS[idx];
                    format!("{} ({})", display_name_for_key(preset.subject_key), preset.file_name)
                }
                None => t!("settings.preset_custom").to_string(),
            },
            SettingsField::Delimiter => format!("\"{}\"", self.form.delimiter.label()),
            SettingsField::AutoCheck => {
                if self.form.auto_check {
                    t!("settings.on").to_string()
                } else {
                    t!("settings.off").to_string()
                }
            }
            SettingsField::Url | SettingsField::VariantTime => String::new(),
        }
    }
}

impl Widget for SettingsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("settings.title")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(SETTINGS_FIELDS.len() as u16 * 3),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            format!("  {}", t!("settings.help")),
            Style::default().fg(colors.text_muted()),
        )))
        .render(layout[0], buf);

        let field_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                SETTINGS_FIELDS
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        let selected_field = self.form.field();
        for (i, field) in SETTINGS_FIELDS.iter().enumerate() {
            let is_selected = *field == selected_field;
            let indicator = if is_selected { " > " } else { "   " };

            let label_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected { Modifier::BOLD } else { Modifier::empty() });
            let label = Line::from(Span::styled(
                format!("{indicator}{}:", field_label(*field)),
                label_style,
            ));

            let value = match field {
                SettingsField::Url => {
                    let mut line = input_line(&self.form.url, is_selected, colors);
                    line.spans.insert(0, Span::raw("     "));
                    line
                }
                SettingsField::VariantTime => {
                    let mut line = input_line(&self.form.variant_time, is_selected, colors);
                    line.spans.insert(0, Span::raw("     "));
                    line.spans.push(Span::styled(
                        format!(" {}", t!("settings.minutes")),
                        Style::default().fg(colors.text_muted()),
                    ));
                    line
                }
                _ => Line::from(Span::styled(
                    format!("     < {} >", self.cycle_value(*field)),
                    Style::default().fg(if is_selected { colors.accent() } else { colors.text_muted() }),
                )),
            };

            Paragraph::new(vec![label, value]).render(field_layout[i], buf);
        }

        let status_line = if self.loading {
            Some(Line::from(Span::styled(
                format!("  {}", t!("settings.status.loading")),
                Style::default().fg(colors.info()),
            )))
        } else {
            self.status.map(|status| {
                Line::from(Span::styled(
                    format!("  {}", status.text),
                    Style::default().fg(status_color(status.kind, colors)),
                ))
            })
        };
        if let Some(line) = status_line {
            Paragraph::new(line)
                .wrap(Wrap { trim: true })
                .render(layout[3], buf);
        }
    }
}
