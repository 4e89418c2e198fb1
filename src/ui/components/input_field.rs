use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::ui::line_input::LineInput;
use crate::ui::theme::ThemeColors;

/// Spans for a [`LineInput`]; the cursor cell is drawn inverted only while focused.
pub fn input_line<'a>(input: &'a LineInput, focused: bool, colors: &ThemeColors) -> Line<'a> {
    let text_style = Style::default().fg(colors.fg()).bg(colors.input_bg());
    if !focused {
        return Line::from(Span::styled(input.value(), text_style));
    }

    let cursor_style = Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg());
    let (before, cursor, after) = input.render_parts();
    let cursor_text = cursor.map(String::from).unwrap_or_else(|| " ".to_string());
    Line::from(vec![
        Span::styled(before, text_style),
        Span::styled(cursor_text, cursor_style),
        Span::styled(after, text_style),
    ])
}
