use clap::Parser;
use usersift::config::SessionConfig;
use usersift::error::Result;
use usersift::fetch::HttpUserSource;
use usersift::session::Session;
use usersift::terminal::ConsoleTerminal;

/// Browse the remote user directory and search it by name.
///
/// Fetches the users once, then offers an interactive menu: list everyone, filter by a
/// case-insensitive regex (prefix the term with \ for a literal search), or switch between
/// standard, JSON, table and compact views.
#[derive(Parser, Debug)]
#[command(name = "usersift", version, about, long_about)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// `Ok(false)` when startup failed and the session has already told the operator why.
fn run() -> Result<bool> {
    let config = SessionConfig::default();
    let source = HttpUserSource::from_config(&config)?;
    let mut session = match Session::start(&source, ConsoleTerminal::stdout(), &config) {
        Ok(session) => session,
        Err(e) if e.reported_at_startup() => return Ok(false),
        Err(e) => return Err(e),
    };
    session.run()?;
    Ok(true)
}
