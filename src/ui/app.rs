use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};

use crate::client::{diff_boards, AnimationQueue, ReplayDriver};
use crate::config::ClientConfig;
use crate::error::{ApiError, LaunchError};
use crate::game::{Board, COLS};
use crate::server::api::{decode_board, GameStatus, MoveResponse};
use crate::server::GameService;
use crate::store::GameRecorder;

use super::game_view::{self, GameView};

enum Mode {
    Live,
    Replay,
}

/// Interactive client. In live mode it plays one game at a time against the
/// server and records every inferred move; in replay mode it animates a
/// recorded game without any server calls.
pub struct App<S: GameService> {
    service: S,
    recorder: GameRecorder,
    config: ClientConfig,
    mode: Mode,
    queue: AnimationQueue,
    replay: Option<ReplayDriver>,
    replay_done: bool,
    player_id: u32,
    player_name: String,
    player_line: String,
    game_id: u32,
    local_id: u32,
    status: GameStatus,
    turns_recorded: u32,
    started: Instant,
    selected_column: usize,
    message: Option<String>,
    should_quit: bool,
}

impl<S: GameService> App<S> {
    /// Start a live game against the server for the given player.
    pub fn start_live(
        service: S,
        recorder: GameRecorder,
        config: ClientConfig,
        player_id: u32,
    ) -> Result<Self, LaunchError> {
        let player = service.get_player(player_id)?;
        let player_line = format!(
            "Player: {} | Phone: {} | Country: {}",
            player.first_name, player.phone, player.country
        );

        let gap_ticks = config.server_move_delay_ticks();
        let mut app = App {
            service,
            recorder,
            config,
            mode: Mode::Live,
            queue: AnimationQueue::with_gap(Board::new(), gap_ticks),
            replay: None,
            replay_done: false,
            player_id,
            player_name: player.first_name,
            player_line,
            game_id: 0,
            local_id: 0,
            status: GameStatus::Ongoing,
            turns_recorded: 0,
            started: Instant::now(),
            selected_column: 3, // Start in middle
            message: None,
            should_quit: false,
        };
        app.begin_live_game()?;
        Ok(app)
    }

    /// Replay a previously recorded game, identified by its server game id.
    /// Never contacts the server.
    pub fn start_replay(
        service: S,
        recorder: GameRecorder,
        config: ClientConfig,
        server_game_id: u32,
    ) -> Result<Self, LaunchError> {
        let local_id = recorder
            .find_by_server_game_id(server_game_id)
            .ok_or(LaunchError::RecordingNotFound(server_game_id))?;
        let game = recorder.get(local_id)?;
        let player_line = format!(
            "Replay: {} | Game #{} | Result: {}",
            game.player_name,
            game.server_game_id,
            status_text(game.result),
        );
        let player_id = game.player_id;
        let player_name = game.player_name.clone();
        let status = game.result;
        let moves = recorder.load_moves(local_id)?;
        let driver = ReplayDriver::new(moves, config.replay_interval_ticks);

        Ok(App {
            service,
            recorder,
            config,
            mode: Mode::Replay,
            queue: AnimationQueue::new(Board::new()),
            replay: Some(driver),
            replay_done: false,
            player_id,
            player_name,
            player_line,
            game_id: server_game_id,
            local_id,
            status,
            turns_recorded: 0,
            started: Instant::now(),
            selected_column: 3,
            message: None,
            should_quit: false,
        })
    }

    /// Main application loop: draw, poll input, advance animations at a
    /// fixed tick rate.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let tick_rate = Duration::from_millis(self.config.drop_tick_ms);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            if last_tick.elapsed() >= tick_rate {
                self.on_tick();
                last_tick = Instant::now();
            }
        }
        Ok(())
    }

    /// Advance the animation pipeline (and the replay clock) by one tick.
    fn on_tick(&mut self) {
        if let Some(driver) = self.replay.as_mut() {
            match driver.tick(&mut self.queue) {
                Ok(()) => {
                    if driver.is_finished(&self.queue) && !self.replay_done {
                        self.replay_done = true;
                        self.message =
                            Some(format!("Replay finished: {}", status_text(self.status)));
                    }
                }
                Err(err) => {
                    // Corrupt recording: stop replaying rather than guess.
                    self.replay = None;
                    self.message = Some(format!("Replay aborted: {}", err));
                }
            }
        }
        self.queue.tick();
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if matches!(self.mode, Mode::Live) && self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if matches!(self.mode, Mode::Live) && self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if matches!(self.mode, Mode::Live) {
                    self.submit_move();
                }
            }
            KeyCode::Char('r') => {
                if matches!(self.mode, Mode::Live) {
                    self.new_game();
                }
            }
            _ => {}
        }
    }

    /// Submit the selected column as the human move. Refused while a disc is
    /// still falling: at most one interaction is in flight per game.
    fn submit_move(&mut self) {
        if self.queue.is_busy() {
            self.message = Some("Wait for the disc to land.".to_string());
            return;
        }
        if self.status.is_terminal() {
            self.message = Some("Game over! Press 'r' for a new game.".to_string());
            return;
        }
        self.message = None;

        // Retain the pre-move snapshot; the diff must run against it before
        // the display is overwritten.
        let before = *self.queue.display();
        match self.service.make_move(self.game_id, self.selected_column) {
            Ok(resp) => self.apply_move_response(before, resp),
            Err(ApiError::ColumnFull(_)) => {
                self.message = Some("Column is full! Choose another column.".to_string());
            }
            Err(err) => {
                self.message = Some(err.to_string());
            }
        }
    }

    /// Reconcile the server's post-move board against the retained snapshot,
    /// backfill the recording, and queue the animations.
    fn apply_move_response(&mut self, before: Board, resp: MoveResponse) {
        let after = match decode_board(&resp.board) {
            Ok(board) => board,
            Err(err) => {
                self.message = Some(format!("Out of sync with server: {}", err));
                return;
            }
        };
        let drops = match diff_boards(&before, &after) {
            Ok(drops) => drops,
            Err(err) => {
                self.message = Some(format!("Out of sync with server: {}", err));
                return;
            }
        };

        for drop in &drops {
            if let Err(err) =
                self.recorder
                    .append_move(self.local_id, self.turns_recorded, drop.column, drop.actor)
            {
                self.message = Some(format!("Recording failed: {}", err));
                return;
            }
            self.turns_recorded += 1;
            self.queue.enqueue(*drop);
        }
        self.queue.settle_to(after);
        self.status = resp.status;

        if self.status.is_terminal() {
            let duration = self.started.elapsed().as_secs();
            if let Err(err) = self.recorder.finish(self.local_id, self.status, duration) {
                self.message = Some(format!("Recording failed: {}", err));
                return;
            }
            self.message = Some(status_text(self.status).to_string());
        }
    }

    /// Start a fresh game against the server (live mode only).
    fn new_game(&mut self) {
        if self.queue.is_busy() {
            self.message = Some("Wait for the disc to land.".to_string());
            return;
        }
        match self.begin_live_game() {
            Ok(()) => self.message = Some("New game started!".to_string()),
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn begin_live_game(&mut self) -> Result<(), LaunchError> {
        let dto = self.service.start_game(self.player_id)?;
        let board = decode_board(&dto.board)?;
        let started_at_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let name = self.player_name.clone();
        let local_id =
            self.recorder
                .ensure_recording(dto.game_id, self.player_id, &name, started_at_unix)?;

        self.game_id = dto.game_id;
        self.local_id = local_id;
        self.status = dto.status;
        self.turns_recorded = 0;
        self.started = Instant::now();
        self.queue.reset(board);
        self.selected_column = 3;
        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let header = match self.mode {
            Mode::Live if self.status.is_terminal() => {
                format!("{}  |  {}", self.player_line, status_text(self.status))
            }
            Mode::Live => format!("{}  |  Your move", self.player_line),
            Mode::Replay => self.player_line.clone(),
        };

        let view = GameView {
            board: self.queue.display(),
            falling: self.queue.falling(),
            selected_column: match self.mode {
                Mode::Live => Some(self.selected_column),
                Mode::Replay => None,
            },
            header: &header,
            status: self.status,
            message: &self.message,
            replay: matches!(self.mode, Mode::Replay),
        };
        game_view::render(frame, &view);
    }
}

fn status_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Ongoing => "Game in progress",
        GameStatus::PlayerWon => "You win!",
        GameStatus::ServerWon => "Server wins!",
        GameStatus::Draw => "It's a draw!",
    }
}
