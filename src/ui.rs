use anyhow::Result;
use campaign_board::{
    Card, Controller, FilterSelection, SlotKeys, ViewNode, ViewSink, ViewSlot,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io;

/// Terminal-backed view sink.
/// Keeps the card rows for the table and the text of every other slot.
#[derive(Debug, Default)]
pub struct TerminalView {
    cards: Vec<Card>,
    texts: HashMap<ViewSlot, Vec<String>>,
    pub state: TableState,
}

impl ViewSink for TerminalView {
    fn clear(&mut self, slot: ViewSlot) {
        if slot == ViewSlot::CardList {
            self.cards.clear();
            self.state.select(None);
        }
        self.texts.remove(&slot);
    }

    fn append(&mut self, slot: ViewSlot, node: ViewNode) {
        match (slot, node) {
            (ViewSlot::CardList, ViewNode::Card(card)) => {
                if self.cards.is_empty() {
                    self.state.select(Some(0));
                }
                self.cards.push(card);
            }
            (slot, ViewNode::Text(text)) => self.texts.entry(slot).or_default().push(text),
            (slot, ViewNode::Card(card)) => self.texts.entry(slot).or_default().push(card.name),
        }
    }
}

impl TerminalView {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn text(&self, slot: ViewSlot) -> String {
        self.texts.get(&slot).map(|t| t.join(" ")).unwrap_or_default()
    }
}

pub struct App {
    pub controller: Controller<TerminalView>,
    pub keys: SlotKeys,
    pub show_detail: bool,
}

impl App {
    pub fn new(controller: Controller<TerminalView>, keys: SlotKeys) -> Self {
        Self {
            controller,
            keys,
            show_detail: false,
        }
    }

    fn view(&self) -> &TerminalView {
        self.controller.view()
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn apply_filter(&mut self, selection: FilterSelection) {
        self.controller.select(selection);
    }

    pub fn selected_card(&self) -> Option<&Card> {
        let view = self.view();
        view.state.selected().and_then(|i| view.cards.get(i))
    }

    pub fn next(&mut self) {
        let view = self.controller.view_mut();
        let len = view.cards.len();
        if len == 0 {
            return;
        }
        let i = match view.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        view.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let view = self.controller.view_mut();
        let len = view.cards.len();
        if len == 0 {
            return;
        }
        let i = match view.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        view.state.select(Some(i));
    }

    pub fn first(&mut self) {
        let view = self.controller.view_mut();
        if !view.cards.is_empty() {
            view.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        let view = self.controller.view_mut();
        if !view.cards.is_empty() {
            view.state.select(Some(view.cards.len() - 1));
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Char('1') | KeyCode::Char('a') => app.controller.show_all(),
                KeyCode::Char('2') | KeyCode::Char('f') => app.controller.show_funded(),
                KeyCode::Char('3') | KeyCode::Char('u') => app.controller.show_unfunded(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter tabs
            Constraint::Length(3), // Summary stats
            Constraint::Length(6), // Description + top two
            Constraint::Min(0),    // Cards
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_stats(f, chunks[1], app);
    render_highlights(f, chunks[2], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[3]);

        render_cards(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_cards(f, chunks[3], app);
    }

    render_status_bar(f, chunks[4], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.controller.selection();

    let mut tab_spans = vec![Span::styled(
        " 🌊 Sea Monster Crowdfunding  ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for (i, selection) in FilterSelection::VARIANTS.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *selection == selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(format!("{}. {}", i + 1, selection.label()), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let funded = app.controller.summary().funded_count();
    let stats = [
        (ViewSlot::Contributions, " Individual Contributions ".to_string(), Color::Green),
        (ViewSlot::TotalRaised, " Total Raised ".to_string(), Color::Yellow),
        (ViewSlot::GameCount, format!(" Total Games ({} funded) ", funded), Color::Cyan),
    ];

    for ((slot, title, color), column) in stats.into_iter().zip(columns.iter()) {
        let value = Paragraph::new(Line::from(Span::styled(
            app.view().text(slot),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        );
        f.render_widget(value, *column);
    }
}

fn render_highlights(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let description = Paragraph::new(app.view().text(ViewSlot::Description))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" About "),
        );
    f.render_widget(description, columns[0]);

    let content = vec![
        Line::from(vec![
            Span::styled("🥇 Top Funded: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(app.view().text(ViewSlot::FirstGame)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("🥈 Runner Up:  ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(app.view().text(ViewSlot::SecondGame)),
        ]),
    ];

    let top = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Top Games "),
    );
    f.render_widget(top, columns[1]);
}

fn render_cards(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Game", "Pledged", "Goal", "Backers"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let title = format!(" {} ({}) ", app.controller.selection().label(), app.view().cards.len());
    let view = app.controller.view_mut();

    let rows = view.cards.iter().map(|card| {
        let cells = vec![
            Cell::from(truncate(&card.name, 50)),
            Cell::from(card.pledged.clone()).style(Style::default().fg(Color::Green)),
            Cell::from(card.goal.clone()),
            Cell::from(card.backers.clone()),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(30),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut view.state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Game Card ");

    let card = match app.selected_card() {
        Some(c) => c,
        None => {
            f.render_widget(Paragraph::new("No game selected").block(block), area);
            return;
        }
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(Span::styled(
            card.name.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            card.description.clone(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("Pledged: ", label), Span::raw(card.pledged.clone())]),
        Line::from(vec![Span::styled("Goal:    ", label), Span::raw(card.goal.clone())]),
        Line::from(vec![Span::styled("Backers: ", label), Span::raw(card.backers.clone())]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Image:   ", label),
            Span::styled(card.image_ref.clone(), Style::default().fg(Color::Green)),
        ]),
        Line::from(Span::styled(
            format!("         ({})", card.image_alt),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(Paragraph::new(content).wrap(Wrap { trim: false }).block(block), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.view().state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.view().cards.len();

    let key = Style::default().fg(Color::Yellow);
    let status_spans = vec![
        Span::styled(format!(" Row: {}/{} ", selected, total), Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled(format!("#{}", app.keys.card_list), Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
        Span::styled("1/2/3", key),
        Span::raw(" All/Funded/Unfunded | "),
        Span::styled("Enter", key),
        Span::raw(" Card | "),
        Span::styled("↑/↓", key),
        Span::raw(" Nav | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
