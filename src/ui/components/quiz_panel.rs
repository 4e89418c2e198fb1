use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::app::QuizFeedback;
use crate::quiz::question::{Difficulty, QuestionRecord};
use crate::quiz::session::{CheckOutcome, CursorState};
use crate::quiz::subject::{ALL_SUBJECTS, Subject, display_name_for_key};
use crate::ui::components::input_field::input_line;
use crate::ui::line_input::LineInput;
use crate::ui::theme::{Theme, ThemeColors};

pub fn difficulty_marker(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "●○○",
        Difficulty::Medium => "●●○",
        Difficulty::Hard => "●●●",
    }
}

pub fn difficulty_label(difficulty: Difficulty) -> String {
    match difficulty {
        Difficulty::Easy => t!("quiz.difficulty.easy").to_string(),
        Difficulty::Medium => t!("quiz.difficulty.medium").to_string(),
        Difficulty::Hard => t!("quiz.difficulty.hard").to_string(),
    }
}

/// Subjects tab: subject strip, question card, answer field and feedback.
pub struct QuizPanel<'a> {
    pub subject: Option<&'a str>,
    pub state: CursorState,
    pub question: Option<&'a QuestionRecord>,
    pub position: (usize, usize),
    pub answer: &'a LineInput,
    pub feedback: Option<&'a QuizFeedback>,
    pub auto_check: bool,
    pub theme: &'a Theme,
}

impl Widget for QuizPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(5),
            ])
            .split(area);

        self.render_subject_strip(layout[0], buf);

        match self.state {
            CursorState::NoSubjectSelected => {
                placeholder(&t!("quiz.choose_subject"), colors).render(layout[1], buf);
                return;
            }
            CursorState::SubjectSelectedEmpty => {
                let subject = self.subject.map(display_name_for_key).unwrap_or_default();
                placeholder(&t!("quiz.empty", subject = subject), colors).render(layout[1], buf);
                return;
            }
            CursorState::SubjectSelectedWithQuestions => {}
        }

        if let Some(question) = self.question {
            self.render_question(question, layout[1], buf);
        }

        let answer_title = if self.auto_check {
            t!("quiz.answer_title_auto")
        } else {
            t!("quiz.answer_title_manual")
        };
        Paragraph::new(input_line(self.answer, true, colors))
            .style(Style::default().bg(colors.input_bg()))
            .block(
                Block::bordered()
                    .title(format!(" {answer_title} "))
                    .border_style(Style::default().fg(colors.accent())),
            )
            .render(layout[2], buf);

        if let Some(feedback) = self.feedback {
            Paragraph::new(feedback_lines(feedback, colors))
                .wrap(Wrap { trim: true })
                .render(layout[3], buf);
        }
    }
}

impl QuizPanel<'_> {
    fn render_subject_strip(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let spans: Vec<Span> = ALL_SUBJECTS
            .iter()
            .enumerate()
            .flat_map(|(i, subject)| {
                let active = self.subject == Some(subject.key());
                let style = if active {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(colors.text_muted())
                };
                vec![
                    Span::styled(format!(" [F{}] {} ", i + 1, Subject::display_name(*subject)), style),
                    Span::raw(" "),
                ]
            })
            .collect();
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_question(&self, question: &QuestionRecord, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (current, total) = self.position;

        let info = Line::from(vec![
            Span::styled(
                format!("{} ", difficulty_marker(question.difficulty)),
                Style::default().fg(difficulty_color(question.difficulty, colors)),
            ),
            Span::styled(
                t!("quiz.progress", current = current, total = total).to_string(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  |  {}  |  {}",
                    t!("quiz.topic", topic = question.topic),
                    difficulty_label(question.difficulty)
                ),
                Style::default().fg(colors.text_muted()),
            ),
        ]);

        let mut lines = vec![info, Line::from("")];
        lines.extend(
            question
                .question
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(colors.fg())))),
        );

        let title = self.subject.map(display_name_for_key).unwrap_or_default();
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(format!(" {title} "))
                    .border_style(Style::default().fg(colors.border()))
                    .style(Style::default().bg(colors.bg())),
            )
            .render(area, buf);
    }
}

fn difficulty_color(difficulty: Difficulty, colors: &ThemeColors) -> ratatui::style::Color {
    match difficulty {
        Difficulty::Easy => colors.success(),
        Difficulty::Medium => colors.warning(),
        Difficulty::Hard => colors.error(),
    }
}

fn placeholder<'a>(text: &str, colors: &ThemeColors) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        format!("  {text}"),
        Style::default().fg(colors.text_muted()),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg())),
    )
}

pub fn feedback_lines(feedback: &QuizFeedback, colors: &ThemeColors) -> Vec<Line<'static>> {
    let styled = |text: String, color| Line::from(Span::styled(text, Style::default().fg(color)));
    let explanation_line = |explanation: &Option<String>| {
        explanation
            .as_ref()
            .map(|text| styled(t!("quiz.explanation", text = text).to_string(), colors.info()))
    };

    match feedback {
        QuizFeedback::Checked { outcome, .. } => match outcome {
            CheckOutcome::NoQuestion => vec![styled(t!("quiz.no_question").to_string(), colors.warning())],
            CheckOutcome::EmptyInput => vec![styled(t!("quiz.empty_input").to_string(), colors.warning())],
            CheckOutcome::Correct => vec![Line::from(Span::styled(
                t!("quiz.correct").to_string(),
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
            ))],
            CheckOutcome::Incorrect {
                expected,
                explanation,
            } => {
                let mut lines = vec![styled(
                    t!("quiz.incorrect", expected = expected).to_string(),
                    colors.error(),
                )];
                lines.extend(explanation_line(explanation));
                lines
            }
        },
        QuizFeedback::Revealed(revealed) => {
            let mut lines = vec![styled(
                t!("quiz.revealed", answer = revealed.answer).to_string(),
                colors.accent(),
            )];
            lines.extend(explanation_line(&revealed.explanation));
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::session::Revealed;

    #[test]
    fn test_difficulty_markers_differ() {
        assert_ne!(difficulty_marker(Difficulty::Easy), difficulty_marker(Difficulty::Hard));
    }

    #[test]
    fn test_incorrect_feedback_includes_explanation() {
        let colors = ThemeColors::default();
        let feedback = QuizFeedback::Checked {
            outcome: CheckOutcome::Incorrect {
                expected: "6x".to_string(),
                explanation: Some("power rule".to_string()),
            },
            input: "5".to_string(),
        };
        let lines = feedback_lines(&feedback, &colors);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].style.fg, Some(colors.error()));
        assert!(lines[1].spans[0].content.contains("power rule"));
    }

    #[test]
    fn test_revealed_without_explanation_is_one_line() {
        let colors = ThemeColors::default();
        let feedback = QuizFeedback::Revealed(Revealed {
            answer: "4".to_string(),
            explanation: None,
        });
        let lines = feedback_lines(&feedback, &colors);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans[0].content.contains('4'));
    }
}
