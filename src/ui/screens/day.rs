use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::engine::DayEntry;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_yen;

const MAX_LISTED_ENTRIES: usize = 8;

/// The day dialog, drawn over the calendar while a date is selected.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App<'_>) {
    let Some(date) = app.entry.date() else {
        return;
    };
    let allowance = app.engine.view().daily_allowance;

    let mut lines = vec![Line::from("")];
    let mut input_row = None;

    match &app.entry {
        DayEntry::NoSelection => return,
        DayEntry::Selected { input, .. } => {
            lines.push(Line::from(Span::styled(
                "  Nothing recorded yet",
                theme::dim_style(),
            )));
            lines.push(Line::from(""));
            input_row = Some((lines.len(), "  Amount: ".len() + input.chars().count()));
            lines.push(input_line("  Amount: ", input));
        }
        DayEntry::ViewingExisting { total, entries, .. } => {
            for (i, e) in entries.iter().take(MAX_LISTED_ENTRIES).enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("  #{:<3} {:>12}", i + 1, format_yen(e.amount)),
                    theme::normal_style(),
                )));
            }
            if entries.len() > MAX_LISTED_ENTRIES {
                lines.push(Line::from(Span::styled(
                    format!("  … {} more", entries.len() - MAX_LISTED_ENTRIES),
                    theme::dim_style(),
                )));
            }
            lines.push(Line::from(""));
            lines.push(total_line(*total, allowance));
        }
        DayEntry::AddingAmount { total, input, .. } => {
            lines.push(total_line(*total, allowance));
            lines.push(Line::from(""));
            input_row = Some((lines.len(), "  Add: ".len() + input.chars().count()));
            lines.push(input_line("  Add: ", input));
        }
    }

    lines.push(Line::from(""));
    lines.push(hint_line(&app.entry));

    let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 44.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG))
            .title(Span::styled(
                format!(" {date} "),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(dialog, popup_area);

    if let Some((row, col)) = input_row {
        // +1 for the border on each axis
        let cx = popup_area.x + 1 + col as u16;
        let cy = popup_area.y + 1 + row as u16;
        if cx < popup_area.right() && cy < popup_area.bottom() {
            f.set_cursor_position((cx, cy));
        }
    }
}

fn input_line<'a>(label: &'a str, input: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, theme::dim_style()),
        Span::styled(input, theme::command_bar_style()),
    ])
}

fn total_line(total: i64, allowance: i64) -> Line<'static> {
    let (style, note) = if total > allowance {
        (theme::over_budget_style(), "over")
    } else {
        (theme::under_budget_style(), "within")
    };
    Line::from(vec![
        Span::styled("  Total ", theme::dim_style()),
        Span::styled(format_yen(total), style),
        Span::styled(
            format!("  ({note} {} daily)", format_yen(allowance)),
            theme::dim_style(),
        ),
    ])
}

fn hint_line(entry: &DayEntry) -> Line<'static> {
    match entry {
        DayEntry::ViewingExisting { .. } => Line::from(Span::styled(
            "  a add · d delete · Esc close",
            theme::dim_style(),
        )),
        _ => {
            let save_style = if entry.can_confirm() {
                Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style().add_modifier(Modifier::CROSSED_OUT)
            };
            Line::from(vec![
                Span::styled("  Enter save", save_style),
                Span::styled(" · Esc close", theme::dim_style()),
            ])
        }
    }
}
