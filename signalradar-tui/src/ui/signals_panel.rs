//! Main screen — query header and the ranked signals table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use signalradar_core::domain::SignalRow;
use signalradar_core::state::MainViewState;

use crate::app::AppState;
use crate::theme::{self, PALETTE};

const COLUMNS: [&str; 10] = [
    "Rank", "Ticker", "Score", "Price", "RSI", "VolxAvg", "ATR%", "5d%", "20d%", "Tags",
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    render_header(f, chunks[0], app);
    render_table(f, chunks[1], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let signals = app.radar.signals();
    let criteria = app.radar.criteria();

    let symbols = signals.symbols_input().trim();
    let mut query = vec![
        Span::styled("Limit ", theme::muted()),
        Span::styled(signals.limit().to_string(), theme::accent_bold()),
        Span::styled("  Symbols ", theme::muted()),
        Span::styled(
            if symbols.is_empty() { "default universe" } else { symbols },
            theme::text(),
        ),
    ];
    if signals.symbols_pending() {
        query.push(Span::styled("  (edited; press r to refresh)", theme::warning()));
    }

    let filter_style = if criteria.is_default() {
        theme::muted()
    } else {
        theme::accent()
    };
    let filters = Line::from(vec![
        Span::styled("Filters ", theme::muted()),
        Span::styled(criteria.summary(), filter_style),
        Span::styled(
            format!(
                "  showing {} of {}",
                app.ranked_rows().len(),
                app.radar.total_rows()
            ),
            theme::neutral(),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" SignalRadar [{}] ", signals.state().label()))
        .title_style(theme::panel_title(true));
    f.render_widget(Paragraph::new(vec![Line::from(query), filters]).block(block), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" Signals [j/k]move [Enter]chart [?]help ")
        .title_style(theme::panel_title(false));

    let message = match app.radar.signals().state() {
        MainViewState::Idle => Some(Line::from(Span::styled(
            "Waiting for the first fetch...",
            theme::muted(),
        ))),
        MainViewState::Loading => Some(Line::from(Span::styled(
            "Loading signals...",
            theme::accent(),
        ))),
        MainViewState::Failed(msg) => Some(Line::from(vec![
            Span::styled(msg.as_str(), theme::negative()),
            Span::styled("  (r to retry)", theme::muted()),
        ])),
        MainViewState::Loaded(_) => None,
    };
    if let Some(line) = message {
        f.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let ranked = app.ranked_rows();
    if ranked.is_empty() {
        let line = Line::from(Span::styled(
            "No rows match the current filters (c clears them).",
            theme::muted(),
        ));
        f.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c).style(theme::accent_bold())));
    let rows: Vec<Row> = ranked.iter().map(|(rank, row)| table_row(*rank, row)).collect();
    let widths = [
        Constraint::Length(4),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme::selected_row())
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn table_row(rank: usize, row: &SignalRow) -> Row<'static> {
    let tags: Vec<Span> = row
        .tags
        .iter()
        .enumerate()
        .flat_map(|(i, tag)| {
            let sep = if i == 0 { "" } else { ", " };
            [
                Span::raw(sep),
                Span::styled(tag.clone(), Style::default().fg(PALETTE.tag_color(tag))),
            ]
        })
        .collect();

    Row::new(vec![
        Cell::from(rank.to_string()),
        Cell::from(row.ticker.clone()).style(theme::accent()),
        Cell::from(format!("{:.1}", row.score))
            .style(Style::default().fg(PALETTE.score_color(row.score))),
        Cell::from(format!("{:.2}", row.close)),
        Cell::from(format!("{:.1}", row.rsi))
            .style(Style::default().fg(PALETTE.rsi_color(row.rsi))),
        Cell::from(format!("{:.2}x", row.vol_ratio)),
        Cell::from(format!("{:.2}", row.atr_pct * 100.0)),
        pct_cell(row.ret_5d),
        pct_cell(row.ret_20d),
        Cell::from(Line::from(tags)),
    ])
}

fn pct_cell(fraction: f64) -> Cell<'static> {
    Cell::from(format!("{:+.2}", fraction * 100.0))
        .style(Style::default().fg(PALETTE.change_color(fraction)))
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::{app, loaded_app};
    use crate::ui::test_render::render_to_string;

    #[test]
    fn loaded_table_lists_rows_in_rank_order() {
        let (app, _) = loaded_app();
        let screen = render_to_string(&app, 120, 20);
        assert!(screen.contains("Ticker"));
        let nvda = screen.find("NVDA").unwrap();
        let intc = screen.find("INTC").unwrap();
        assert!(nvda < intc);
        assert!(screen.contains("showing 4 of 4"));
        assert!(screen.contains("Bullish Momentum"));
    }

    #[test]
    fn loading_state_shows_message() {
        let (mut app, _) = app();
        app.start();
        app.tick();
        let screen = render_to_string(&app, 100, 12);
        assert!(screen.contains("Loading signals..."));
    }

    #[test]
    fn pending_symbols_hint_is_shown() {
        let (mut app, _) = loaded_app();
        app.radar.signals_mut().set_symbols_input("amd");
        let screen = render_to_string(&app, 120, 12);
        assert!(screen.contains("press r to refresh"));
    }

    #[test]
    fn empty_filter_result_explains_itself() {
        let (mut app, _) = loaded_app();
        app.radar.update_criteria(|c| c.set_min_score(99.0));
        let screen = render_to_string(&app, 120, 12);
        assert!(screen.contains("No rows match"));
        assert!(screen.contains("showing 0 of 4"));
    }
}
