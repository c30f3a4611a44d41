use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamefinder_core::{
    models::APP_NAME,
    page::view::{
        DetailView, FailedView, RequirementsView, LOADING_TEXT, NO_REQUIREMENTS_TEXT,
        NO_SCREENSHOTS_TEXT, REQUIREMENTS_HEADING, SCREENSHOTS_HEADING,
    },
    GameDetailPage, GameSource, PageEvent, PageState, PageView, Route,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::browser;

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_ID_LEN: usize = 32;
const MAX_RECENT: usize = 10;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    Game,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Single-line text input for a game identifier.
#[derive(Debug, Clone, Default)]
struct IdPrompt {
    input: String,
    cursor: usize,
}

impl IdPrompt {
    fn move_cursor(&mut self, delta: isize) {
        let len = self.input.len() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
    }

    fn insert(&mut self, ch: char) {
        if self.input.len() >= MAX_ID_LEN {
            return;
        }
        if ch.is_ascii_graphic() {
            self.input.insert(self.cursor, ch);
            self.cursor += 1;
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 && self.cursor <= self.input.len() {
            self.cursor -= 1;
            self.input.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn value(&self) -> &str {
        self.input.trim()
    }
}

struct UiState {
    status: String,
    should_quit: bool,
    recent: Vec<String>,
    recent_cursor: usize,
    scroll: u16,
    ticks: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            should_quit: false,
            recent: Vec::new(),
            recent_cursor: 0,
            scroll: 0,
            ticks: 0,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn remember(&mut self, id: &str) {
        self.recent.retain(|existing| existing != id);
        self.recent.insert(0, id.to_string());
        self.recent.truncate(MAX_RECENT);
        self.recent_cursor = 0;
    }

    fn move_recent_cursor(&mut self, delta: isize) {
        if self.recent.is_empty() {
            self.recent_cursor = 0;
            return;
        }
        let max = self.recent.len() as isize - 1;
        self.recent_cursor = (self.recent_cursor as isize + delta).clamp(0, max) as usize;
    }

    fn scroll_by(&mut self, delta: i32) {
        self.scroll = (i32::from(self.scroll) + delta).clamp(0, i32::from(u16::MAX)) as u16;
    }
}

/// Terminal frontend hosting the home screen and the game detail page.
pub struct GameFinderApp<S> {
    page: GameDetailPage<S>,
    page_rx: mpsc::Receiver<PageEvent>,
    screen: Screen,
    state: UiState,
    prompt: IdPrompt,
    theme: Theme,
}

impl<S: GameSource> GameFinderApp<S> {
    pub fn new(source: S) -> Self {
        let (page_tx, page_rx) = mpsc::channel(8);
        Self {
            page: GameDetailPage::new(source, page_tx),
            page_rx,
            screen: Screen::Home,
            state: UiState::default(),
            prompt: IdPrompt::default(),
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self, initial: Route) -> Result<()> {
        self.navigate(initial);

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let result = self.event_loop(&mut terminal, &mut event_rx).await;
        self.page.unmount();
        restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event_rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            tokio::select! {
                maybe_event = event_rx.recv() => {
                    match maybe_event {
                        Some(AppEvent::Input(event)) => self.handle_input(event),
                        Some(AppEvent::Tick) => self.state.ticks = self.state.ticks.wrapping_add(1),
                        None => break,
                    }
                }
                Some(event) = self.page_rx.recv() => self.handle_page_event(event),
            }

            if self.state.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Switch to the page for `route`, unmounting whatever was shown before.
    fn navigate(&mut self, route: Route) {
        info!(route = %route, "Navigating");
        match route {
            Route::Home => {
                self.page.unmount();
                self.screen = Screen::Home;
                self.state.set_status("Enter a game id".to_string());
            }
            Route::Game { id } => {
                self.state.remember(&id);
                self.state.scroll = 0;
                self.page.mount(id.clone());
                self.screen = Screen::Game;
                self.state.set_status(format!("Loading game {id}…"));
            }
            Route::NotFound(path) => {
                warn!(path = %path, "Unknown route");
                self.page.unmount();
                self.screen = Screen::Home;
                self.state.set_status(format!("No page at {path}"));
            }
        }
    }

    fn handle_page_event(&mut self, event: PageEvent) {
        if !self.page.apply(event) {
            return;
        }
        let message = match self.page.view() {
            PageView::Loaded(detail) => format!("Loaded {}", detail.header.title),
            PageView::Failed(_) => "Failed to load game data".to_string(),
            PageView::Loading => return,
        };
        self.state.set_status(message);
    }

    fn handle_input(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return;
        }
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Game => self.handle_game_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                if self.prompt.input.is_empty() {
                    self.state.should_quit = true;
                } else {
                    self.prompt.clear();
                }
            }
            KeyCode::Enter => {
                let target = if self.prompt.value().is_empty() {
                    self.state.recent.get(self.state.recent_cursor).cloned()
                } else {
                    Some(self.prompt.value().to_string())
                };
                match target {
                    Some(target) => {
                        self.prompt.clear();
                        self.navigate(Route::parse(&target));
                    }
                    None => self.state.set_status("Type a game id first".to_string()),
                }
            }
            KeyCode::Up => self.state.move_recent_cursor(-1),
            KeyCode::Down => self.state.move_recent_cursor(1),
            KeyCode::Left => self.prompt.move_cursor(-1),
            KeyCode::Right => self.prompt.move_cursor(1),
            KeyCode::Home => self.prompt.cursor = 0,
            KeyCode::End => self.prompt.cursor = self.prompt.input.len(),
            KeyCode::Backspace => self.prompt.backspace(),
            KeyCode::Delete => self.prompt.delete(),
            KeyCode::Char(ch) => self.prompt.insert(ch),
            _ => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.navigate(Route::Home),
            KeyCode::Enter if *self.page.state() == PageState::Failed => {
                self.navigate(Route::Home)
            }
            KeyCode::Char('r') if *self.page.state() == PageState::Failed => {
                if let Some(id) = self.page.game_id().map(str::to_string) {
                    self.navigate(Route::Game { id });
                }
            }
            KeyCode::Char('p') => self.open_game_url(),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_by(-1),
            KeyCode::PageDown => self.state.scroll_by(10),
            KeyCode::PageUp => self.state.scroll_by(-10),
            _ => {}
        }
    }

    fn open_game_url(&mut self) {
        let PageView::Loaded(detail) = self.page.view() else {
            return;
        };
        let Some(url) = detail.play.url().map(str::to_string) else {
            return;
        };
        match browser::open_external(&url) {
            Ok(()) => self.state.set_status(format!("Opened {url}")),
            Err(err) => {
                error!(?err, url = %url, "Failed to open game link");
                self.state.set_status(format!("Could not open link: {err}"));
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        match self.screen {
            Screen::Home => self.draw_home(frame),
            Screen::Game => self.draw_game(frame),
        }
    }

    fn draw_home(&self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        let banner = Paragraph::new(Line::from(Span::styled(
            APP_NAME.to_uppercase(),
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, chunks[0]);

        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(self.prompt.input.clone()),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Game id"));
        frame.render_widget(input, chunks[1]);
        let cursor_x = (chunks[1].x + 3 + self.prompt.cursor as u16)
            .min(chunks[1].x + chunks[1].width.saturating_sub(2));
        frame.set_cursor(cursor_x, chunks[1].y + 1);

        self.render_recent(frame, chunks[2]);
        self.render_status(
            frame,
            chunks[3],
            "Enter open  ↑/↓ recent  Esc quit".to_string(),
        );
    }

    fn render_recent(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Recently viewed");
        if self.state.recent.is_empty() {
            let paragraph = Paragraph::new(Span::styled(
                "Nothing viewed yet",
                Style::default().fg(self.theme.muted),
            ))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .recent
            .iter()
            .enumerate()
            .map(|(idx, id)| {
                let marker = if idx == self.state.recent_cursor {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                ListItem::new(Line::from(vec![
                    marker,
                    Span::styled(Route::Game { id: id.clone() }.path(), Style::default().fg(self.theme.primary_fg)),
                ]))
            })
            .collect();
        let mut list_state = ListState::default();
        list_state.select(Some(self.state.recent_cursor));
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_game(&self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);

        let view = self.page.view();
        let hint = match &view {
            PageView::Loading => "b back  q quit",
            PageView::Loaded(_) => "j/k scroll  p play  b back  q quit",
            PageView::Failed(_) => "Enter home  r retry  q quit",
        };
        match &view {
            PageView::Loading => self.render_loading(frame, chunks[0]),
            PageView::Loaded(detail) => self.render_detail(frame, chunks[0], detail),
            PageView::Failed(failed) => self.render_failed(frame, chunks[0], failed),
        }
        self.render_status(frame, chunks[1], format!("{}  •  {hint}", view.page_title()));
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER[self.state.ticks % SPINNER.len()];
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(spinner, Style::default().fg(self.theme.accent)),
            Span::raw(" "),
            Span::raw(LOADING_TEXT),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, centered_rect(area.width, 1, area));
    }

    fn render_failed(&self, frame: &mut Frame, area: Rect, failed: &FailedView) {
        let popup = centered_rect(48, 6, area);
        frame.render_widget(Clear, popup);
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                failed.message.clone(),
                Style::default()
                    .fg(self.theme.danger)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" {}", failed.home.label)),
            ]),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, detail: &DetailView) {
        let gallery_height = (detail.screenshots.len().max(1) as u16).saturating_add(2);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Min(5),
                Constraint::Length(gallery_height.min(area.height / 3).max(3)),
            ])
            .split(area);

        self.render_header(frame, chunks[0], detail);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);
        self.render_description(frame, body[0], detail);
        self.render_requirements(frame, body[1], &detail.requirements);
        self.render_screenshots(frame, chunks[2], detail);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, detail: &DetailView) {
        let header = &detail.header;
        let lines = vec![
            Line::from(Span::styled(
                header.title.clone(),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(header.year.clone()),
            Line::from(Span::styled(
                header.genre.clone(),
                Style::default().fg(self.theme.success),
            )),
            Line::from(header.publisher.clone()),
            Line::from(header.developer.clone()),
            Line::from(Span::styled(
                header.thumbnail.clone(),
                Style::default().fg(self.theme.muted),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Game"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_description(&self, frame: &mut Frame, area: Rect, detail: &DetailView) {
        let mut lines: Vec<Line> = Vec::new();
        for paragraph in &detail.description {
            lines.extend(paragraph.lines().map(|line| Line::from(line.to_string())));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled("[b] ", Style::default().fg(self.theme.accent)),
            Span::raw(detail.back.label.clone()),
            Span::raw("   "),
            Span::styled("[p] ", Style::default().fg(self.theme.accent)),
            Span::raw(detail.play.label.clone()),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Description"))
            .wrap(Wrap { trim: true })
            .scroll((self.state.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_requirements(&self, frame: &mut Frame, area: Rect, requirements: &RequirementsView) {
        let lines: Vec<Line> = match requirements {
            RequirementsView::Listed(rows) => rows
                .iter()
                .map(|(label, value)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{label}: "),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(value.clone()),
                    ])
                })
                .collect(),
            RequirementsView::Missing => vec![Line::from(Span::styled(
                NO_REQUIREMENTS_TEXT,
                Style::default().fg(self.theme.muted),
            ))],
        };
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(REQUIREMENTS_HEADING),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_screenshots(&self, frame: &mut Frame, area: Rect, detail: &DetailView) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(SCREENSHOTS_HEADING);
        if detail.screenshots.is_empty() {
            let paragraph = Paragraph::new(Span::styled(
                NO_SCREENSHOTS_TEXT,
                Style::default().fg(self.theme.muted),
            ))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = detail
            .screenshots
            .iter()
            .enumerate()
            .map(|(idx, shot)| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", idx + 1),
                        Style::default().fg(self.theme.accent),
                    ),
                    Span::raw(shot.image.clone()),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, hint: String) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let paragraph = Paragraph::new(Line::from(vec![
            Span::raw(self.state.status.clone()),
            Span::styled(format!("  {hint}"), Style::default().fg(self.theme.muted)),
        ]))
        .block(block);
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticSource;
    use ratatui::{backend::TestBackend, buffer::Buffer};
    use tokio::time::timeout;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render(app: &GameFinderApp<StaticSource>) -> Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40))?;
        terminal.draw(|frame| app.draw(frame))?;
        Ok(buffer_text(terminal.backend().buffer()))
    }

    async fn settle(app: &mut GameFinderApp<StaticSource>) {
        let event = timeout(Duration::from_secs(5), app.page_rx.recv())
            .await
            .expect("fetch outcome in time")
            .expect("page channel open");
        app.handle_page_event(event);
    }

    #[tokio::test]
    async fn renders_loading_then_details() -> Result<()> {
        let mut app = GameFinderApp::new(StaticSource);
        app.navigate(Route::parse("/452"));
        assert_eq!(app.screen, Screen::Game);
        assert!(render(&app)?.contains(LOADING_TEXT));

        settle(&mut app).await;
        let text = render(&app)?;
        for expected in [
            "Sample Online",
            "2014",
            "MMORPG",
            "Publisher: Sample Publishing",
            "Developer: Sample Studio",
            "Explore the world.",
            NO_REQUIREMENTS_TEXT,
            "https://example.com/1.jpg",
        ] {
            assert!(text.contains(expected), "missing {expected:?} in\n{text}");
        }
        assert!(!text.contains(NO_SCREENSHOTS_TEXT));
        Ok(())
    }

    #[tokio::test]
    async fn failure_view_returns_home() -> Result<()> {
        let mut app = GameFinderApp::new(StaticSource);
        app.navigate(Route::parse("/1"));
        settle(&mut app).await;
        assert_eq!(app.page.state(), &PageState::Failed);
        assert!(render(&app)?.contains("Failed to load game data."));

        app.handle_input(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert_eq!(app.screen, Screen::Home);
        assert!(!app.page.is_mounted());
        assert_eq!(app.state.recent, vec!["1".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn retry_remounts_the_failed_id() {
        let mut app = GameFinderApp::new(StaticSource);
        app.navigate(Route::parse("/1"));
        let first = app.page.mount_id();
        settle(&mut app).await;
        assert_eq!(app.page.state(), &PageState::Failed);

        app.handle_input(Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)));
        assert_eq!(app.screen, Screen::Game);
        assert_eq!(app.page.game_id(), Some("1"));
        assert_eq!(app.page.state(), &PageState::Loading);
        assert_ne!(app.page.mount_id(), first);

        settle(&mut app).await;
        assert_eq!(app.page.state(), &PageState::Failed);
    }

    #[tokio::test]
    async fn typing_an_id_opens_the_page() {
        let mut app = GameFinderApp::new(StaticSource);
        app.navigate(Route::Home);
        for ch in "452".chars() {
            app.handle_input(Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)));
        }
        app.handle_input(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));

        assert_eq!(app.screen, Screen::Game);
        assert_eq!(app.page.game_id(), Some("452"));
        assert!(app.prompt.input.is_empty());
    }

    #[tokio::test]
    async fn leaving_while_loading_ignores_late_result() {
        let mut app = GameFinderApp::new(StaticSource);
        app.navigate(Route::parse("/452"));
        app.handle_input(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert_eq!(app.screen, Screen::Home);

        let late = timeout(Duration::from_millis(200), app.page_rx.recv()).await;
        if let Ok(Some(event)) = late {
            app.handle_page_event(event);
        }
        assert_eq!(app.page.state(), &PageState::Loading);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn prompt_editing() {
        let mut prompt = IdPrompt::default();
        for ch in "4x2".chars() {
            prompt.insert(ch);
        }
        prompt.move_cursor(-1);
        prompt.backspace();
        prompt.insert('5');
        prompt.insert(' ');
        assert_eq!(prompt.value(), "452");
        prompt.move_cursor(-10);
        prompt.delete();
        assert_eq!(prompt.value(), "52");
    }
}
