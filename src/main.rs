use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use net_connect_four::config::AppConfig;
use net_connect_four::server::api::{GameStatus, PlayerDto};
use net_connect_four::server::{GameServer, PlayerDirectory};
use net_connect_four::store::{GameRecorder, RecordedGame};
use net_connect_four::ui::App;

/// Play Connect Four against the server, or replay a recorded game.
#[derive(Parser)]
#[command(name = "net_connect_four", about = "Connect Four vs. a random server opponent")]
struct Cli {
    /// External player id to play as
    #[arg(long, default_value_t = 111)]
    player: u32,

    /// Replay a recorded game by its server game id (offline, no moves sent)
    #[arg(long)]
    replay: Option<u32>,

    /// List the player's recorded games, most recent first, and exit
    #[arg(long)]
    list: bool,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the recording data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// Demo roster standing in for the external registration store.
fn demo_players() -> PlayerDirectory {
    let mut directory = PlayerDirectory::new();
    for (player_id, first_name, phone, country) in [
        (111, "Dana", "050-1112233", "Israel"),
        (222, "Omer", "052-4455667", "Israel"),
        (333, "Noa", "054-7788990", "France"),
    ] {
        directory.register(PlayerDto {
            player_id,
            first_name: first_name.to_string(),
            phone: phone.to_string(),
            country: country.to_string(),
        });
    }
    directory
}

/// One line of `--list` output for a recorded game.
fn describe_recording(game: &RecordedGame) -> String {
    format!(
        "game {:>5}  started_at={}  moves={:>2}  result={}",
        game.server_game_id,
        game.started_at_unix,
        game.moves.len(),
        result_label(game.result),
    )
}

fn result_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Ongoing => "unfinished",
        GameStatus::PlayerWon => "player won",
        GameStatus::ServerWon => "server won",
        GameStatus::Draw => "draw",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(data_dir) = cli.data_dir {
        config.store.data_dir = data_dir;
    }

    let recorder = GameRecorder::open(&config.store.data_dir).with_context(|| {
        format!("opening recording store at {}", config.store.data_dir.display())
    })?;

    if cli.list {
        let games = recorder.list_games_for_player(cli.player);
        if games.is_empty() {
            println!("No recorded games for player {}.", cli.player);
        } else {
            println!("Recorded games for player {}, most recent first:", cli.player);
            for game in games {
                println!("  {}", describe_recording(game));
            }
            println!("Replay one with --replay <game id>.");
        }
        return Ok(());
    }

    // Recordings are keyed by server game id; never reissue one.
    let mut server = GameServer::new(demo_players());
    server.resume_game_ids_after(recorder.max_server_game_id());

    let mut app = match cli.replay {
        Some(server_game_id) => {
            App::start_replay(server, recorder, config.client, server_game_id)
                .with_context(|| format!("loading replay of game {}", server_game_id))?
        }
        None => App::start_live(server, recorder, config.client, cli.player)
            .context("starting a new game")?,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running the UI")
}
