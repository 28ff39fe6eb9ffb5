use crate::ui::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let show_banner = app.config.display.show_banner && !app.rates.is_empty();

    let mut constraints = Vec::new();
    if show_banner {
        constraints.push(Constraint::Length(3)); // Rate banner
    }
    constraints.extend([
        Constraint::Length(1), // Tab bar
        Constraint::Length(3), // Search box
        Constraint::Min(5),    // Table
        Constraint::Length(1), // Status bar
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut next = 0;
    if show_banner {
        render_banner(f, chunks[0], app);
        next = 1;
    }
    render_tabs(f, chunks[next], app);
    render_search(f, chunks[next + 1], app);
    render_table(f, chunks[next + 2], app);
    render_status(f, chunks[next + 3], app);

    if app.show_help {
        render_help_popup(f);
    }
    if app.show_logs {
        render_log_popup(f, app);
    }
}

fn render_banner(f: &mut Frame, area: Rect, app: &App) {
    let slide = app.banner.current_slide();
    let line = match app.rates.get(slide) {
        Some(rate) => Line::from(vec![
            Span::styled(
                rate.trader.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   buy S/ {:.3}", rate.buy)),
            Span::raw(format!("   sell S/ {:.3}", rate.sell)),
            Span::styled(
                format!("   ({}/{})", slide + 1, app.rates.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        None => Line::from("No featured rates today"),
    };

    // Dim the card while it slides so the rotation reads as motion.
    let style = if app.banner.is_animating() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let banner = Paragraph::new(line).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Featured rates (PEN per USD)"),
    );
    f.render_widget(banner, area);
}

fn render_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = app
        .tabs
        .iter()
        .map(|tab| Line::from(tab.kind.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active_tab)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" | ");
    f.render_widget(tabs, area);
}

fn render_search(f: &mut Frame, area: Rect, app: &App) {
    let style = if app.focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let input = Paragraph::new(app.search.value())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Search (/)"));
    f.render_widget(input, area);

    if app.focus == Focus::Search {
        f.set_cursor_position((
            area.x + app.search.visual_cursor() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let view = app.active_view();
    let page = view.page_view();
    let title = format!(
        "{} ({} of {} records)",
        app.active_kind().title(),
        page.total_count,
        view.records().record_count()
    );

    if page.rows.is_empty() {
        let empty = Paragraph::new("No matching records")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    let show_numbers = app.config.display.show_row_numbers;

    let mut header_cells: Vec<Cell> = Vec::new();
    if show_numbers {
        header_cells.push(Cell::from("#").style(Style::default().fg(Color::DarkGray)));
    }
    for field in &view.records().fields {
        let label = match view.sort_spec() {
            Some(spec) if spec.field == field.name => {
                format!("{} {}", field.name, spec.order.indicator())
            }
            _ => field.name.clone(),
        };
        header_cells.push(Cell::from(label).style(Style::default().fg(Color::Yellow)));
    }
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    // Row numbers count through the whole filtered set, not the page.
    let first_index = (page.current_page - 1) * page.page_size;
    let rows: Vec<Row> = page
        .rows
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut cells: Vec<Cell> = Vec::new();
            if show_numbers {
                cells.push(
                    Cell::from((first_index + i + 1).to_string())
                        .style(Style::default().fg(Color::DarkGray)),
                );
            }
            for value in &record.values {
                cells.push(Cell::from(value.to_string()));
            }
            Row::new(cells).height(1)
        })
        .collect();

    let num_cols = view.records().field_count() + usize::from(show_numbers);
    let col_width = if num_cols > 0 {
        (area.width.saturating_sub(2)) / num_cols as u16
    } else {
        10
    };
    let widths: Vec<Constraint> = (0..num_cols).map(|_| Constraint::Length(col_width)).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    let mut state = TableState::default();
    state.select(Some(app.selected_row.min(page.rows.len().saturating_sub(1))));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let page = app.active_view().page_view();
    let query = app.active_view().search_query().trim().to_string();

    let mut spans = vec![
        Span::styled(&app.status_message, Style::default().fg(Color::White)),
        Span::raw(" | "),
        Span::styled(
            match app.focus {
                Focus::Search => "SEARCH",
                Focus::Rows => "ROWS",
            },
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " | Page {}/{} ({} rows)",
            page.current_page, page.total_pages, page.total_count
        )),
    ];
    if let Some(spec) = &page.sort {
        spans.push(Span::raw(format!(
            " | Sort {} {}",
            spec.field,
            spec.order.indicator()
        )));
    }
    if !query.is_empty() {
        spans.push(Span::raw(format!(" | Filter \"{}\"", query)));
    }
    spans.push(Span::raw(" | q=Quit F1=Help"));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "TC Boletin Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  Tab/Shift-Tab - Switch list"),
        Line::from("  j/k or ↑↓     - Select row"),
        Line::from("  [ ]           - Previous / next page"),
        Line::from("  + -           - Grow / shrink page size"),
        Line::from(""),
        Line::from("Data:"),
        Line::from("  /             - Focus the search box (Esc/Enter to leave)"),
        Line::from("  c             - Clear the search"),
        Line::from("  1-9           - Sort by column, press again to flip"),
        Line::from("  y             - Copy selected row to clipboard"),
        Line::from(""),
        Line::from("Other:"),
        Line::from("  F1            - Toggle this help"),
        Line::from("  F12           - Toggle the log overlay"),
        Line::from("  q or Esc      - Quit"),
    ];

    let help_popup = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_popup, area);
}

fn render_log_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(80, 60, f.area());
    f.render_widget(Clear, area);

    let visible = area.height.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = app
        .log_buffer
        .recent(visible)
        .into_iter()
        .map(|entry| Line::from(entry.format_for_display()))
        .collect();
    if lines.is_empty() {
        lines.push(Line::from("No log entries yet"));
    }

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Recent logs ({} buffered)", app.log_buffer.len())),
    );
    f.render_widget(popup, area);
}

// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
