mod api;
mod app;
mod config;
mod debounce;
mod mpris;
mod player;
mod queue;
mod runtime;
mod search;
mod status;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
