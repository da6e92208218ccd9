//! Play command implementation - interactive terminal front end.

// Terminal cells and logical coordinates are small; casts between them are intentional
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use super::CliError;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use linguamatch::board::{
    DESIGN_HEIGHT, DESIGN_WIDTH, Flash, Point, SLOT_COUNT, TILE_HEIGHT, TILE_WIDTH, TileState,
    slot_origin,
};
use linguamatch::round::{Phase, RoundEvent, Session, TileView, TracingFeedback};
use linguamatch::{GameConfig, JsonFileStore, Language, Progress, Vocabulary};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io::stdout;
use std::time::{Duration, Instant};

/// Frame budget of the input poll.
const FRAME: Duration = Duration::from_millis(33);
/// Longest simulated step, so a stalled terminal does not fast-forward.
const MAX_DT: f32 = 0.1;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if no words are loaded or the terminal fails.
pub(crate) fn execute(config: GameConfig, seed: Option<u64>) -> Result<(), CliError> {
    let vocab = Vocabulary::load_dir(&config.vocab_dir);
    if vocab.is_empty() {
        return Err(CliError::new(format!(
            "No words found in {} (set vocab_dir in the config or pass --vocab-dir)",
            config.vocab_dir.display()
        )));
    }
    let progress = Progress::open(JsonFileStore::new(&config.save_path));
    let mut session = Session::new(vocab, progress, Box::new(TracingFeedback), config, seed);
    session.start_round()?;

    run_tui(App::new(session))
}

/// App state for the TUI.
struct App {
    session: Session,
    status: String,
    board_area: Rect,
    last_tick: Instant,
}

impl App {
    fn new(session: Session) -> Self {
        Self {
            session,
            status: String::from("Match each word with its translation."),
            board_area: Rect::default(),
            last_tick: Instant::now(),
        }
    }

    fn tick(&mut self) {
        let dt = self.last_tick.elapsed().as_secs_f32().min(MAX_DT);
        self.last_tick = Instant::now();
        let events = self.session.tick(dt);
        for event in &events {
            if let Some(status) = self.describe(event) {
                self.status = status;
            }
        }
    }

    fn describe(&self, event: &RoundEvent) -> Option<String> {
        let round = self.session.round()?;
        let text_of = |id| round.tile(id).map_or("?", |t| t.text());
        Some(match event {
            RoundEvent::Started { level } => format!("Level {level}"),
            RoundEvent::Playing => String::from("Go!"),
            RoundEvent::Grabbed { text, language, .. } => format!("{text} ({language})"),
            RoundEvent::Rejected { reason, .. } => format!("Not allowed: {reason}"),
            RoundEvent::Matched { tiles: (a, b), .. } => {
                format!("Match: {} = {}", text_of(*a), text_of(*b))
            }
            RoundEvent::Undone { tile } => format!("Undid {}", text_of(*tile)),
            RoundEvent::Hinted { tiles: Some((a, b)) } => {
                format!("Try {} and {}", text_of(*a), text_of(*b))
            }
            RoundEvent::Hinted { tiles: None } => String::from("No free pair. Try shuffling."),
            RoundEvent::Shuffled { tiles } => format!("Shuffled {tiles} tiles"),
            RoundEvent::Paused => String::from("Paused"),
            RoundEvent::Resumed => String::from("Resumed"),
            RoundEvent::Won => String::from("Level cleared! Press n for the next level."),
            RoundEvent::Lost => String::from("Buffer full. Press u to undo or r to retry."),
            RoundEvent::Placed { .. } => return None,
        })
    }

    /// Map a terminal cell to a logical point on the board.
    fn to_logical(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.board_area;
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.right()
            || row >= area.bottom()
        {
            return None;
        }
        let (sx, sy) = self.scale();
        Some(Point::new(
            (f32::from(column - area.x) + 0.5) * sx,
            (f32::from(row - area.y) + 0.5) * sy,
        ))
    }

    /// Map a logical box to the terminal cells it covers, clipped to the board.
    fn to_cells(&self, origin: Point, width: f32, height: f32) -> Option<Rect> {
        let area = self.board_area;
        let (sx, sy) = self.scale();
        let max_x = f32::from(area.width);
        let max_y = f32::from(area.height);
        let left = (origin.x / sx).floor().clamp(0.0, max_x);
        let top = (origin.y / sy).floor().clamp(0.0, max_y);
        let right = ((origin.x + width) / sx).ceil().clamp(0.0, max_x);
        let bottom = ((origin.y + height) / sy).ceil().clamp(0.0, max_y);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(
            area.x + left as u16,
            area.y + top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }

    /// Logical units per terminal cell.
    fn scale(&self) -> (f32, f32) {
        (
            DESIGN_WIDTH / f32::from(self.board_area.width.max(1)),
            DESIGN_HEIGHT / f32::from(self.board_area.height.max(1)),
        )
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(point) = self.to_logical(mouse.column, mouse.row) else {
            return;
        };
        let Some(round) = self.session.round_mut() else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                round.press_at(point);
            }
            MouseEventKind::Drag(MouseButton::Left) => round.drag_to(point),
            MouseEventKind::Up(MouseButton::Left) => {
                round.release_at(point);
            }
            _ => {}
        }
    }

    /// Returns false when the user quits.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('n') => match self.session.advance() {
                Ok(_) => self.status = String::from("Next level"),
                Err(e) => self.status = format!("{e}"),
            },
            KeyCode::Char('r') => {
                if let Err(e) = self.session.retry() {
                    self.status = e.to_string();
                }
            }
            code => {
                let Some(round) = self.session.round_mut() else {
                    return true;
                };
                match code {
                    KeyCode::Char('h') => {
                        round.request_hint();
                    }
                    KeyCode::Char('u') => {
                        round.undo();
                    }
                    KeyCode::Char('s') => {
                        round.shuffle();
                    }
                    KeyCode::Char('t') => {
                        let on = round.toggle_symbols();
                        self.status = format!("Symbols {}", if on { "on" } else { "off" });
                    }
                    KeyCode::Char('p') | KeyCode::Esc => {
                        round.toggle_pause();
                    }
                    _ => {}
                }
            }
        }
        true
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor().map_err(|e| CliError::new(e.to_string()))?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), CliError> {
    loop {
        app.tick();
        terminal.draw(|f| ui(f, app)).map_err(|e| CliError::new(e.to_string()))?;

        if !event::poll(FRAME).map_err(|e| CliError::new(e.to_string()))? {
            continue;
        }
        match event::read().map_err(|e| CliError::new(e.to_string()))? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if !app.handle_key(key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Status + controls
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let board_block = Block::default().borders(Borders::ALL).title(" Board ");
    app.board_area = board_block.inner(chunks[1]);
    f.render_widget(board_block, chunks[1]);
    render_board(f, app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let progress = app.session.progress();
    let title = match app.session.round() {
        Some(round) => {
            let phase = match round.phase() {
                Phase::Intro => format!("GET READY {:.0}", round.intro_remaining().ceil()),
                Phase::Playing => String::from("PLAYING"),
                Phase::Paused => String::from("PAUSED"),
                Phase::Won => String::from("WON"),
                Phase::Lost => String::from("LOST"),
            };
            format!(
                " Linguamatch | Level {} | {} | Tiles left: {} | Words learned: {} ",
                round.level(),
                phase,
                round.remaining_tiles(),
                progress.word_index()
            )
        }
        None => String::from(" Linguamatch "),
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, app: &App) {
    let Some(round) = app.session.round() else {
        return;
    };

    for slot in 0..SLOT_COUNT {
        if let Some(rect) = app.to_cells(slot_origin(slot), TILE_WIDTH, TILE_HEIGHT) {
            let outline = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", slot + 1));
            f.render_widget(outline, rect);
        }
    }

    let target = app.session.config().target_language;
    for view in round.snapshot() {
        let Some(rect) = app.to_cells(view.position, TILE_WIDTH, TILE_HEIGHT) else {
            continue;
        };
        f.render_widget(Clear, rect);
        f.render_widget(tile_widget(&view, target), rect);
    }

    if let Some(text) = round.tutorial() {
        let area = app.board_area;
        let line = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1.min(area.height));
        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow)),
            line,
        );
    }

    let banner = match round.phase() {
        Phase::Paused => Some(("PAUSED", "p or Esc to resume", Color::Yellow)),
        Phase::Won => Some(("LEVEL CLEARED", "n next level · r replay · q quit", Color::Green)),
        Phase::Lost => Some(("BUFFER FULL", "u undo · r retry · q quit", Color::Red)),
        Phase::Intro | Phase::Playing => None,
    };
    if let Some((title, hint, color)) = banner {
        render_banner(f, app.board_area, title, hint, color);
    }
}

fn tile_widget<'a>(view: &TileView<'a>, target: Language) -> Paragraph<'a> {
    let border = if view.selected {
        Color::Cyan
    } else if view.hinted {
        Color::Yellow
    } else {
        match view.flash {
            Some(Flash::Rejected) => Color::Red,
            Some(Flash::Blocker) => Color::LightRed,
            None if view.buffered() => Color::Green,
            None if view.state == TileState::Resolving => Color::LightGreen,
            None if view.blocked => Color::DarkGray,
            None => Color::White,
        }
    };

    let mut text_style = Style::default().fg(if view.blocked { Color::DarkGray } else { Color::White });
    if view.language == target {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    let mut lines = vec![Line::from(Span::styled(view.text, text_style))];
    if let Some(symbol) = view.symbol {
        let (r, g, b) = symbol.color.rgb();
        lines.push(Line::from(Span::styled(
            symbol.shape.glyph().to_string(),
            Style::default().fg(Color::Rgb(r, g, b)),
        )));
    }

    let title = if view.shaking { "!" } else { "" };
    Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    )
}

fn render_banner(f: &mut Frame, area: Rect, title: &str, hint: &str, color: Color) {
    let width = 40.min(area.width);
    let height = 4.min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let body = Paragraph::new(vec![
        Line::from(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD))),
        Line::from(hint),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, rect);
    f.render_widget(body, rect);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = " [click] Pick  [h] Hint  [u] Undo  [s] Shuffle  [t] Symbols  [p] Pause  [r] Retry  [q] Quit ";
    let footer = Paragraph::new(vec![Line::from(format!(" {}", app.status)), Line::from(controls)])
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(footer, area);
}
