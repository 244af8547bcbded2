pub mod charting;
pub mod word_wrap;

use std::time::SystemTime;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use fastwrite::{
    session::WordStatus,
    snapshot::{Snapshot, WordView},
    stats::{LetterMark, Summary, WordVerdict},
    time_control::TimeSelection,
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

struct Palette {
    bold: Style,
    correct: Style,
    wrong: Style,
    neutral: Style,
    dim: Style,
}

impl Default for Palette {
    fn default() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Self {
            bold,
            correct: bold.fg(Color::Green),
            wrong: bold.fg(Color::Red),
            neutral: bold.add_modifier(Modifier::DIM),
            dim: Style::default().add_modifier(Modifier::DIM),
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = Palette::default();
        let snapshot = self.practice.snapshot(SystemTime::now());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // stats
                Constraint::Length(1), // padding
                Constraint::Min(1),    // words
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        render_stats_bar(self, &snapshot, &palette, chunks[0], buf);
        render_words(&snapshot, self.scroll_nudge, &palette, chunks[2], buf);

        let legend = if self.editing_custom() {
            "esc quit   ↑/↓ time   0-9 custom seconds   del erase digit   type a word to start"
        } else {
            "esc quit   ← retry   → new words   ↑/↓ time   enter scroll   ctrl+e finish"
        };
        Paragraph::new(Span::styled(legend, palette.dim.add_modifier(Modifier::ITALIC)))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        if self.modal_open {
            if let Some(summary) = &snapshot.summary {
                render_summary(summary, &snapshot, &palette, area, buf);
            }
        }
    }
}

fn render_stats_bar(app: &App, snapshot: &Snapshot, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let stats = &snapshot.stats;
    let spans = vec![
        Span::styled(format!("{}", snapshot.remaining), palette.bold.fg(Color::Yellow)),
        Span::raw("   "),
        Span::styled(format!("{} wpm", stats.wpm), palette.bold),
        Span::raw("   "),
        Span::styled(format!("{}% acc", stats.accuracy), palette.bold),
        Span::raw("   "),
        Span::styled(format!("{} letters", stats.typed_letters), palette.dim),
        Span::raw("   "),
        Span::styled(format!("{} ✓", stats.correct_words), palette.correct),
        Span::raw(" "),
        Span::styled(format!("{} ✗", stats.incorrect_words), palette.wrong),
        Span::raw("   "),
        Span::styled(format!("{} words", snapshot.total_words()), palette.dim),
        Span::raw("   "),
        Span::styled(time_label(app), palette.dim),
    ];

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn time_label(app: &App) -> String {
    match app.config.time {
        TimeSelection::Custom => format!("[custom {}]", app.practice.time_control()),
        other => format!("[{other}]"),
    }
}

fn word_spans<'a>(word: &WordView<'a>, palette: &Palette) -> Vec<Span<'a>> {
    let submitted_wrong = word.verdict == Some(WordVerdict::Incorrect) && word.status == WordStatus::Submitted;
    let emphasis = if word.is_active {
        Modifier::UNDERLINED
    } else {
        Modifier::empty()
    };

    let mut spans: Vec<Span> = word
        .marks
        .letters
        .iter()
        .map(|&(c, mark)| {
            let style = match mark {
                LetterMark::Correct => palette.correct,
                LetterMark::Wrong => palette.wrong,
                LetterMark::Neutral if submitted_wrong => palette.wrong.add_modifier(Modifier::DIM),
                LetterMark::Neutral => palette.neutral,
            };
            Span::styled(c.to_string(), style.add_modifier(emphasis))
        })
        .collect();

    if !word.marks.overflow.is_empty() {
        let overflow: String = word.marks.overflow.iter().collect();
        spans.push(Span::styled(
            overflow,
            palette.wrong.add_modifier(emphasis | Modifier::CROSSED_OUT),
        ));
    }
    spans
}

fn render_words(snapshot: &Snapshot, nudge: u16, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let words: Vec<WordView> = snapshot.words().collect();
    let widths: Vec<usize> = words
        .iter()
        .map(|w| w.expected.width() + w.marks.overflow.iter().collect::<String>().width())
        .collect();

    let rows = word_wrap::wrap(&widths, area.width as usize);
    let active_row = word_wrap::row_of(&rows, snapshot.session.active_index()).unwrap_or(0);
    let first = word_wrap::scroll_offset(active_row, rows.len(), area.height as usize, nudge as usize);

    let lines: Vec<Line> = rows
        .iter()
        .skip(first)
        .take(area.height as usize)
        .map(|row| {
            let mut spans = Vec::new();
            for idx in row.clone() {
                if idx > row.start {
                    spans.push(Span::raw(" "));
                }
                spans.extend(word_spans(&words[idx], palette));
            }
            Line::from(spans)
        })
        .collect();

    Paragraph::new(lines).render(area, buf);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn render_summary(summary: &Summary, snapshot: &Snapshot, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let modal = centered_rect(70, 70, area);
    Clear.render(modal, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" results ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(modal);
    block.render(modal, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // headline
            Constraint::Length(1), // details
            Constraint::Length(1), // padding
            Constraint::Min(1),    // chart
            Constraint::Length(1), // legend
        ])
        .split(inner);

    Paragraph::new(Span::styled(
        format!("{} wpm   {}% acc   {}", summary.wpm, summary.accuracy, summary.time_label()),
        palette.bold,
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Line::from(vec![
        Span::styled(format!("{} correct", summary.correct_words), palette.correct),
        Span::raw("   "),
        Span::styled(format!("{} incorrect", summary.incorrect_words), palette.wrong),
        Span::raw("   "),
        Span::styled(format!("{} letters typed", summary.typed_letters), palette.dim),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    if !snapshot.wpm_series.is_empty() {
        render_chart(snapshot, summary, palette, chunks[3], buf);
    }

    Paragraph::new(Span::styled(
        "(r)etry same words / (n)ew words / (esc) close",
        palette.dim.add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}

fn render_chart(snapshot: &Snapshot, summary: &Summary, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(snapshot.wpm_series, summary.time_control.as_secs());

    let tuples: Vec<(f64, f64)> = snapshot.wpm_series.iter().map(|&p| p.into()).collect();
    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&tuples)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", palette.bold),
                    Span::styled(charting::format_label(overall_duration), palette.bold),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", palette.bold),
                    Span::styled(charting::format_label(highest_wpm), palette.bold),
                ]),
        )
        .render(area, buf);
}
