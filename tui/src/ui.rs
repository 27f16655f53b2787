use std::time::Duration;

use confession_sequencer::Choice;
use confession_sequencer::Phase;
use confession_sequencer::Screen;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Flex;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;

use crate::app::App;

const ROSE: Color = Color::Rgb(0xc4, 0x45, 0x69);
const PINK: Color = Color::Rgb(0xff, 0x6b, 0x9d);

const INTRO_TITLE: &str = "Anh có điều muốn nói với em 💌";
const INTRO_PROMPT: &str = "Em mở lá thư này nhé?";
const REVEAL_LABEL: &str = "Mở thư 💕";
const REVEAL_LOADING: &str = "⏳ Đang tải...";
const PROPOSAL_TITLE: &str = "Em có đồng ý làm người yêu anh không? 💖";
const FEEDBACK_PLACEHOLDER: &str = "Em muốn nói gì với anh không...";
const YES_LABEL: &str = "Có 💕";
const NO_LABEL: &str = "Không 😔";
const SENDING_LABEL: &str = "⏳ Đang gửi...";

pub fn draw(frame: &mut Frame, app: &App, now: Duration) {
    let area = frame.area();
    draw_hearts(frame.buffer_mut(), area, app, now);

    let card = card_area(area);
    frame.render_widget(Clear, card);

    let stage = app.stage();
    let mut block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(PINK))
        .title(Line::from(" 💌 ").centered());
    if stage.phase != Phase::Steady {
        block = block.dim();
    }
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let body = match stage.visible {
        Screen::Intro => intro(app),
        Screen::Letter => letter(app, inner),
        Screen::Proposal => proposal(app, now),
        Screen::Result => result(app),
    };
    let body = if stage.phase == Phase::Steady {
        body
    } else {
        body.add_modifier(Modifier::DIM)
    };
    frame.render_widget(body, inner);

    if let Some(burst) = app.confetti() {
        let since = now.saturating_sub(burst.started);
        for piece in &burst.pieces {
            if let Some(progress) = piece.progress(since) {
                put(frame.buffer_mut(), area, piece.left_pct, progress, "●", hex_color(piece.color));
            }
        }
    }
}

fn card_area(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(80)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::horizontal([Constraint::Max(72)])
        .flex(Flex::Center)
        .areas(row);
    card
}

fn button(label: &str, focused: bool) -> Span<'static> {
    let text = format!("  {label}  ");
    if focused {
        Span::styled(text, Style::new().fg(Color::White).bg(ROSE).bold())
    } else {
        Span::styled(text, Style::new().fg(Color::Gray).reversed())
    }
}

fn intro(app: &App) -> Paragraph<'static> {
    let label = if app.stage().reveal_loading {
        REVEAL_LOADING
    } else {
        REVEAL_LABEL
    };
    Paragraph::new(vec![
        Line::default(),
        Line::from(INTRO_TITLE.fg(ROSE).bold()),
        Line::default(),
        Line::from(INTRO_PROMPT),
        Line::default(),
        Line::from(button(label, !app.stage().reveal_loading)),
        Line::default(),
        Line::from("Enter để mở · Esc để thoát".dark_gray()),
    ])
    .alignment(Alignment::Center)
}

fn letter(app: &App, inner: Rect) -> Paragraph<'static> {
    let stage = app.stage();
    let mut text = Text::raw(stage.letter.trim_start_matches('\n').to_string());
    if stage.cursor {
        match text.lines.last_mut() {
            Some(line) => line.push_span(Span::styled("▌", Style::new().fg(PINK))),
            None => text.push_line(Line::from("▌".fg(PINK))),
        }
    }
    let scroll = overflow(&text, inner);
    Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
}

/// Rows the wrapped text overflows `area` by, so the newest line stays
/// visible.
fn overflow(text: &Text, area: Rect) -> u16 {
    let width = usize::from(area.width.max(1));
    let rows: usize = text
        .lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows.saturating_sub(usize::from(area.height))).unwrap_or(u16::MAX)
}

fn proposal(app: &App, now: Duration) -> Paragraph<'static> {
    let stage = app.stage();
    let sending = app.sending();
    let label = |choice: Choice, idle: &'static str| {
        if sending == Some(choice) {
            SENDING_LABEL
        } else {
            idle
        }
    };

    let feedback = if app.feedback().is_empty() {
        Line::from(FEEDBACK_PLACEHOLDER.dark_gray().italic())
    } else {
        Line::from(app.feedback().to_string())
    };

    // The "no" button jitters sideways while shaking.
    let jitter = if stage.shaking && (now.as_millis() / 50) % 2 == 0 {
        "  "
    } else {
        ""
    };
    let focus = |choice: Choice| stage.inputs_enabled && app.selected() == choice;
    let buttons = Line::from(vec![
        button(label(Choice::Yes, YES_LABEL), focus(Choice::Yes)),
        Span::raw("    "),
        Span::raw(jitter),
        button(label(Choice::No, NO_LABEL), focus(Choice::No)),
    ]);

    Paragraph::new(vec![
        Line::default(),
        Line::from(PROPOSAL_TITLE.fg(ROSE).bold()),
        Line::default(),
        feedback,
        Line::from("─".repeat(40).fg(PINK)),
        Line::default(),
        buttons,
        Line::default(),
        Line::from("←/→ chọn · Enter gửi · Esc thoát".dark_gray()),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: false })
}

fn result(app: &App) -> Paragraph<'static> {
    let message = app
        .stage()
        .message
        .as_ref()
        .map(|m| m.text.clone())
        .unwrap_or_default();
    Paragraph::new(vec![
        Line::default(),
        Line::from(message.fg(ROSE).bold()),
        Line::default(),
        Line::from("Enter hoặc Esc để thoát".dark_gray()),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: false })
}

fn draw_hearts(buf: &mut Buffer, area: Rect, app: &App, now: Duration) {
    for heart in app.hearts() {
        if let Some(progress) = heart.progress(now) {
            // Hearts rise from the bottom edge.
            put(buf, area, heart.left_pct, 1.0 - progress, "♥", PINK);
        }
    }
}

/// Writes `glyph` at a position given as fractions of `area`.
fn put(buf: &mut Buffer, area: Rect, left_pct: f32, down: f32, glyph: &str, color: Color) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let col = ((left_pct / 100.0) * f32::from(area.width - 1)).round() as u16;
    let row = (down.clamp(0.0, 1.0) * f32::from(area.height - 1)).round() as u16;
    let x = area.x + col.min(area.width - 1);
    let y = area.y + row.min(area.height - 1);
    buf.set_string(x, y, glyph, Style::new().fg(color));
}

fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) if digits.len() == 6 => {
            Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
        }
        _ => PINK,
    }
}
