use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Notice, Screen},
    highlight::Outcome,
    scoring::ScoreResult,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const NOTICE_WIDTH: u16 = 44;
const NOTICE_HEIGHT: u16 = 6;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen() {
            Screen::Typing => render_typing(self, area, buf),
            Screen::Results => {
                if let Some(result) = self.result() {
                    render_results(result, self.highlight_enabled(), area, buf)
                }
            }
        }

        if let Some(notice) = self.notice() {
            render_notice(notice, area, buf);
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let reference = app.reference().as_str();
    // borders take a column on each side
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2).max(1);
    let fits_on_one_line = reference.width() <= max_chars_per_line as usize;
    let reference_lines = if fits_on_one_line {
        1
    } else {
        (reference.width() as f64 / max_chars_per_line as f64).ceil() as u16 + 1
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(reference_lines + 2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let highlights = app.highlights();
    let typed_chars = app.typed().chars().count();

    let reference_line = match highlights {
        // underline the next character to type
        Some(_) => {
            let (done, rest) = split_at_char(reference, typed_chars);
            let mut rest = rest.chars();
            let next = rest.next().map(String::from).unwrap_or_default();
            Line::from(vec![
                Span::styled(done.to_string(), bold_style.add_modifier(Modifier::DIM)),
                Span::styled(next, bold_style.add_modifier(Modifier::UNDERLINED)),
                Span::styled(rest.as_str().to_string(), bold_style),
            ])
        }
        None => Line::from(Span::styled(reference.to_string(), bold_style)),
    };

    Paragraph::new(reference_line)
        .block(Block::bordered().title(" Passage "))
        .alignment(if fits_on_one_line {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

    Paragraph::new(typed_lines(app.typed(), highlights.as_deref()))
        .block(Block::bordered().title(" Your text "))
        .wrap(Wrap { trim: false })
        .render(chunks[1], buf);

    let legend = format!(
        "(tab) finish / (ctrl+r) retry / (f2) highlight: {} / (esc) quit",
        on_off(app.highlight_enabled())
    );
    Paragraph::new(Span::styled(legend, italic_style)).render(chunks[2], buf);
}

/// Typed text as display lines, one per newline, ending in a block cursor
fn typed_lines(typed: &str, outcomes: Option<&[Outcome]>) -> Vec<Line<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = bold_style.fg(Color::Green);
    let red_bold_style = bold_style.fg(Color::Red);
    let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

    let mut lines = Vec::new();
    let mut spans = Vec::new();

    for (idx, c) in typed.chars().enumerate() {
        if c == '\n' {
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }

        let span = match outcomes.and_then(|o| o.get(idx)) {
            Some(Outcome::Correct) => Span::styled(c.to_string(), green_bold_style),
            Some(Outcome::Incorrect) => Span::styled(
                match c {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            None => Span::raw(c.to_string()),
        };
        spans.push(span);
    }

    spans.push(Span::styled(" ", cursor_style));
    lines.push(Line::from(spans));
    lines
}

fn render_results(result: &ScoreResult, highlight: bool, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let lines = vec![
        Line::from(Span::styled(format!("WPM: {}", result.wpm), bold_style)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Accuracy: {:.2}%", result.accuracy_percent),
            bold_style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Errors: {}", result.error_count),
            bold_style,
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "(r)etry / (h)ighlight: {} / (q)uit",
                on_off(highlight)
            ),
            italic_style,
        )),
    ];

    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
}

fn render_notice(notice: &Notice, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(NOTICE_WIDTH, NOTICE_HEIGHT, area);

    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from(Span::styled(
            notice.message.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        )),
    ])
    .block(
        Block::bordered()
            .title(format!(" {} ", notice.title))
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(popup, buf);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn split_at_char(s: &str, idx: usize) -> (&str, &str) {
    match s.char_indices().nth(idx) {
        Some((byte_idx, _)) => s.split_at(byte_idx),
        None => (s, ""),
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
