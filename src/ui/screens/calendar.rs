use chrono::{Datelike, NaiveDate, Weekday};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::engine::{allowance_denominator, MarkedDate};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_yen, format_yen_compact, month_grid};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Month grid
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_month_grid(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App<'_>) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let view = app.engine.view();
    let balance = view.balance();
    let days = allowance_denominator(app.month(), app.engine.today());

    render_card(
        f,
        cards[0],
        "Budget",
        format_yen(view.budget.amount),
        theme::ACCENT,
        if view.budget_is_default {
            "default".to_string()
        } else {
            format!("set for {}", app.month())
        },
    );
    render_card(
        f,
        cards[1],
        "Spent",
        format_yen(view.monthly_total),
        theme::RED,
        format!("{} days marked", view.marked_dates.len()),
    );
    render_card(
        f,
        cards[2],
        "Balance",
        format_yen(balance),
        if balance >= 0 { theme::GREEN } else { theme::RED },
        String::new(),
    );
    render_card(
        f,
        cards[3],
        "Daily",
        format_yen(view.daily_allowance),
        theme::YELLOW,
        format!("over {days} days"),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color, subtitle: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_month_grid(f: &mut Frame, area: Rect, app: &App<'_>) {
    let view = app.engine.view();
    let today = app.engine.today();

    let header = Row::new(WEEKDAYS.iter().map(|d| {
        Cell::from(Line::from(*d).centered()).style(theme::title_style())
    }));

    let rows = month_grid(app.month()).into_iter().map(|week| {
        let cells = week.into_iter().map(|slot| match slot {
            Some(date) => day_cell(date, view.marked_dates.get(&date), date == app.cursor, date == today),
            None => Cell::from(""),
        });
        Row::new(cells).height(2)
    });

    let widths = [Constraint::Ratio(1, 7); 7];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" {} ", app.month()),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

fn day_cell(date: NaiveDate, mark: Option<&MarkedDate>, is_cursor: bool, is_today: bool) -> Cell<'static> {
    let day_style = if is_today {
        theme::today_style()
    } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        theme::dim_style()
    } else {
        theme::normal_style()
    };

    let amount = match mark {
        Some(m) if m.over_budget => Span::styled(format_yen_compact(m.total), theme::over_budget_style()),
        Some(m) => Span::styled(format_yen_compact(m.total), theme::under_budget_style()),
        None => Span::raw(""),
    };

    let cell = Cell::from(Text::from(vec![
        Line::from(Span::styled(format!("{:>2}", date.day()), day_style)).centered(),
        Line::from(amount).centered(),
    ]));

    if is_cursor {
        cell.style(theme::selected_style())
    } else if mark.is_none() && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        cell.style(theme::weekend_style())
    } else {
        cell
    }
}
