use crate::client::DropAnimation;
use crate::game::Board;
use crate::server::api::GameStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget;

/// Everything the game screen needs, assembled by the app each frame.
pub struct GameView<'a> {
    pub board: &'a Board,
    pub falling: Option<&'a DropAnimation>,
    pub selected_column: Option<usize>,
    pub header: &'a str,
    pub status: GameStatus,
    pub message: &'a Option<String>,
    pub replay: bool,
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    board_widget::render_board(
        frame,
        view.board,
        view.falling,
        view.selected_column,
        chunks[1],
    );
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, view.replay, chunks[3]);
}

fn render_header(frame: &mut Frame, view: &GameView, area: ratatui::layout::Rect) {
    let color = match view.status {
        GameStatus::Ongoing => Color::Red,
        GameStatus::PlayerWon => Color::Green,
        GameStatus::ServerWon => Color::Yellow,
        GameStatus::Draw => Color::Gray,
    };
    let title = if view.replay { "Connect Four — Replay" } else { "Connect Four" };

    let header = Paragraph::new(view.header.to_string())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, replay: bool, area: ratatui::layout::Rect) {
    let line = if replay {
        Line::from("Q: Quit")
    } else {
        Line::from("←/→: Move  |  Enter: Drop  |  R: New game  |  Q: Quit")
    };

    let controls = Paragraph::new(vec![line])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
