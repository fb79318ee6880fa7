use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::api::{Api, ApiClient};
use crate::app::App;
use crate::mpris::ControlCmd;
use crate::player::Player;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = settings::load_settings();
    let timeout = Duration::from_secs(settings.server.timeout_secs);

    // Two clients: the worker answers UI requests while the player fetches
    // audio bytes; neither blocks the other.
    let (api, api_events) = Api::spawn(ApiClient::new(&settings.server.base_url, timeout)?);
    let (player, player_events) = Player::new(ApiClient::new(&settings.server.base_url, timeout)?);

    let mut app = App::new(&settings);
    app.set_player_handle(player.handle());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    // Seed state: the backend's queue and the last reported player status.
    startup::request_initial_state(&api);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new(&settings);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &api,
            &api_events,
            &player,
            &player_events,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen,
        SetTitle("")
    )?;
    terminal.show_cursor()?;

    run_result
}
