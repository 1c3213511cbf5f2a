//! Terminal dashboard over round-wise results.
//!
//! Five views, one per aggregate: votes in the selected round (bar chart),
//! a candidate's total-vote progression (line chart), the leader of every
//! round, vote-share percentages, and the rank pivot. Left/Right changes
//! the round, Up/Down the candidate, Tab the view.

use std::io;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Table, Tabs},
    Frame, Terminal,
};

use untable::RoundData;

const TAB_TITLES: [&str; 5] = ["Round", "Progression", "Leaders", "Share", "Ranks"];

/// Dashboard state: the loaded data plus the current selections.
struct App {
    data: RoundData,
    rounds: Vec<u32>,
    candidates: Vec<String>,
    tab: usize,
    round_ix: usize,
    candidate_ix: usize,
    should_quit: bool,
}

impl App {
    fn new(data: RoundData) -> Self {
        let rounds = data.rounds();
        let candidates = data.candidates();
        Self {
            data,
            rounds,
            candidates,
            tab: 0,
            round_ix: 0,
            candidate_ix: 0,
            should_quit: false,
        }
    }

    fn round(&self) -> u32 {
        self.rounds[self.round_ix]
    }

    fn candidate(&self) -> &str {
        &self.candidates[self.candidate_ix]
    }

    fn next_tab(&mut self) {
        self.tab = (self.tab + 1) % TAB_TITLES.len();
    }

    fn previous_tab(&mut self) {
        self.tab = (self.tab + TAB_TITLES.len() - 1) % TAB_TITLES.len();
    }

    fn next_round(&mut self) {
        if self.round_ix + 1 < self.rounds.len() {
            self.round_ix += 1;
        }
    }

    fn previous_round(&mut self) {
        self.round_ix = self.round_ix.saturating_sub(1);
    }

    fn next_candidate(&mut self) {
        self.candidate_ix = (self.candidate_ix + 1) % self.candidates.len();
    }

    fn previous_candidate(&mut self) {
        self.candidate_ix = (self.candidate_ix + self.candidates.len() - 1) % self.candidates.len();
    }
}

/// Run the dashboard until the user quits.
pub fn run(data: RoundData) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(data);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                KeyCode::Tab => app.next_tab(),
                KeyCode::BackTab => app.previous_tab(),
                KeyCode::Right => app.next_round(),
                KeyCode::Left => app.previous_round(),
                KeyCode::Down | KeyCode::Char('j') => app.next_candidate(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_candidate(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(f.size());

    let tabs = Tabs::new(TAB_TITLES.to_vec())
        .block(Block::default().borders(Borders::ALL).title("Election Results"))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .select(app.tab);
    f.render_widget(tabs, chunks[0]);

    match app.tab {
        0 => render_round(f, app, chunks[1]),
        1 => render_progression(f, app, chunks[1]),
        2 => render_leaders(f, app, chunks[1]),
        3 => render_share(f, app, chunks[1]),
        4 => render_ranks(f, app, chunks[1]),
        _ => {}
    }

    let footer = Paragraph::new(format!(
        "Round {}/{}  Candidate: {}  |  \u{2190}/\u{2192} round  \u{2191}/\u{2193} candidate  Tab view  q quit",
        app.round(),
        app.rounds.last().copied().unwrap_or_default(),
        app.candidate(),
    ))
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[2]);
}

/// Bar chart of votes gained in the selected round.
fn render_round(f: &mut Frame, app: &App, area: Rect) {
    let results = app.data.round_results(app.round());
    let labels: Vec<String> = results.iter().map(|r| short_name(&r.candidate)).collect();
    let bars: Vec<(&str, u64)> = results
        .iter()
        .zip(&labels)
        .map(|(r, label)| (label.as_str(), r.current_round.max(0) as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Votes in Round {}", app.round())),
        )
        .data(&bars)
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, area);
}

/// Line chart of the selected candidate's cumulative totals.
fn render_progression(f: &mut Frame, app: &App, area: Rect) {
    let points: Vec<(f64, f64)> = app
        .data
        .progression(app.candidate())
        .into_iter()
        .map(|(round, total)| (round as f64, total as f64))
        .collect();
    let max_total = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);

    let datasets = vec![Dataset::default()
        .name(app.candidate())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Total Votes Over Rounds"),
        )
        .x_axis(round_axis(&app.rounds))
        .y_axis(
            Axis::default()
                .title("Votes")
                .bounds([0.0, max_total * 1.1])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", max_total * 1.1)),
                ]),
        );
    f.render_widget(chart, area);
}

/// One row per round: who leads and with how many votes.
fn render_leaders(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .data
        .leaders()
        .into_iter()
        .map(|r| {
            Row::new(vec![
                r.round.to_string(),
                r.candidate.clone(),
                r.party.clone(),
                r.total.to_string(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Round", "Candidate", "Party", "Total"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Leading Candidate Per Round"),
    );
    f.render_widget(table, area);
}

/// Line chart of the selected candidate's vote share percentage.
fn render_share(f: &mut Frame, app: &App, area: Rect) {
    let points: Vec<(f64, f64)> = app
        .data
        .vote_share(app.candidate())
        .into_iter()
        .map(|(round, share)| (round as f64, share))
        .collect();

    let datasets = vec![Dataset::default()
        .name(app.candidate())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Vote Share % Over Rounds"),
        )
        .x_axis(round_axis(&app.rounds))
        .y_axis(
            Axis::default()
                .title("Share %")
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
        );
    f.render_widget(chart, area);
}

/// Rank pivot: candidates down, rounds across, lower is better.
fn render_ranks(f: &mut Frame, app: &App, area: Rect) {
    let rounds = &app.rounds;
    let mut header = vec!["Candidate".to_string()];
    header.extend(rounds.iter().map(|r| format!("R{r}")));

    let rank_table = app.data.rank_table();
    let rows: Vec<Row> = rank_table
        .into_iter()
        .map(|(candidate, ranks)| {
            let mut cells = vec![short_name(&candidate)];
            cells.extend(
                ranks
                    .into_iter()
                    .map(|r| r.map_or_else(|| "-".to_string(), |v| v.to_string())),
            );
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Percentage(30)];
    widths.extend(std::iter::repeat(Constraint::Length(5)).take(rounds.len()));

    let table = Table::new(rows, widths)
        .header(
            Row::new(header)
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Rank Per Round (lower is better)"),
        );
    f.render_widget(table, area);
}

fn round_axis(rounds: &[u32]) -> Axis<'_> {
    let first = rounds.first().copied().unwrap_or(0) as f64;
    let last = rounds.last().copied().unwrap_or(1) as f64;
    Axis::default()
        .title("Round")
        .bounds([first, last])
        .labels(vec![
            Span::raw(format!("{first:.0}")),
            Span::raw(format!("{last:.0}")),
        ])
}

/// Candidate names can be long; bars and pivot cells show a prefix.
fn short_name(name: &str) -> String {
    const MAX: usize = 12;
    if name.chars().count() <= MAX {
        name.to_string()
    } else {
        let prefix: String = name.chars().take(MAX - 1).collect();
        format!("{prefix}\u{2026}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use untable::RoundRow;

    fn app() -> App {
        let data = RoundData::from_rows(vec![
            RoundRow {
                round: 1,
                candidate: "A VERY LONG CANDIDATE NAME".into(),
                party: "P1".into(),
                total: 100,
                current_round: 100,
            },
            RoundRow {
                round: 2,
                candidate: "B".into(),
                party: "P2".into(),
                total: 90,
                current_round: 90,
            },
        ])
        .unwrap();
        App::new(data)
    }

    #[test]
    fn test_tab_cycling() {
        let mut app = app();
        assert_eq!(app.tab, 0);
        app.previous_tab();
        assert_eq!(app.tab, TAB_TITLES.len() - 1);
        app.next_tab();
        assert_eq!(app.tab, 0);
    }

    #[test]
    fn test_round_selection_clamps() {
        let mut app = app();
        app.previous_round();
        assert_eq!(app.round(), 1);
        app.next_round();
        app.next_round();
        assert_eq!(app.round(), 2);
    }

    #[test]
    fn test_candidate_selection_wraps() {
        let mut app = app();
        let first = app.candidate().to_string();
        app.next_candidate();
        app.next_candidate();
        assert_eq!(app.candidate(), first);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("SHORT"), "SHORT");
        let shortened = short_name("A VERY LONG CANDIDATE NAME");
        assert!(shortened.chars().count() <= 12);
        assert!(shortened.ends_with('\u{2026}'));
    }
}
