//! # Session
//!
//! The interactive loop. A session is created by [`Session::start`], which performs the one
//! and only fetch, and then driven by [`Session::run`] until the operator exits.
//!
//! ## States
//!
//! ```text
//!  start ──fetch ok──▶ MainMenu ◀──────────────┐
//!    │                  │  │  │                │
//!    │ fetch/validate   │  │  └─ 2 ─▶ Filtering ┤
//!    │ failure          │  └──── 3 ─▶ FormatMenu┘ (loops on invalid input)
//!    ▼                  4
//!  Err(..)              ▼
//!                   Terminated
//! ```
//!
//! Each state reads exactly one line before deciding where to go next. Rendering is followed by
//! a blocking "Press Enter to continue..." read. Closed input at any read ends the session
//! cleanly.
//!
//! The session owns the record set and the display mode; the engine functions it calls
//! ([`filter`], [`present::render`]) receive them as arguments.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::fetch::UserSource;
use crate::filter::filter;
use crate::message::Message;
use crate::model::{DisplayMode, FormatChoice, MainChoice, UserRecord, ValidatedUserSet};
use crate::pattern::{compile, PatternKind};
use crate::present;
use crate::screens::{
    Screens, CONTINUE_PROMPT, ESCAPING_TIPS, FORMAT_PROMPT, MAIN_PROMPT, SEARCH_PROMPT,
};
use crate::terminal::Terminal;
use crate::validate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MainMenu,
    Filtering,
    FormatMenu,
    Terminated,
}

/// Terminal plus the screens that decorate what goes to it.
struct Frontend<T: Terminal> {
    terminal: T,
    screens: Screens,
    clear_screen: bool,
}

impl<T: Terminal> Frontend<T> {
    fn clear(&mut self) -> Result<()> {
        if self.clear_screen {
            self.terminal.clear()?;
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.terminal.write(text)
    }

    fn say(&mut self, messages: &[Message]) -> Result<()> {
        let text = self.screens.messages(messages);
        self.terminal.write(&text)
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.terminal.read_line(prompt)
    }

    /// Blocks until the operator presses Enter. `false` if input closed instead.
    fn acknowledge(&mut self) -> Result<bool> {
        Ok(self.ask(CONTINUE_PROMPT)?.is_some())
    }

    /// Renders `records` in `mode` below whatever is on screen and waits for acknowledgment.
    ///
    /// The whole view is built before anything is written. On a render failure the error is
    /// reported and nothing else is shown. Returns `false` if input closed.
    fn show(&mut self, mode: DisplayMode, records: &[UserRecord]) -> Result<bool> {
        let view =
            present::render(mode, records).and_then(|body| self.screens.records(mode, &body));
        match view {
            Ok(text) => {
                self.write(&text)?;
                let acknowledged = self.acknowledge()?;
                if acknowledged {
                    self.clear()?;
                }
                Ok(acknowledged)
            }
            Err(e) => {
                self.say(&[Message::error(format!("Error rendering users: {}", e))])?;
                Ok(true)
            }
        }
    }
}

pub struct Session<T: Terminal> {
    io: Frontend<T>,
    users: ValidatedUserSet,
    mode: DisplayMode,
    state: State,
}

impl<T: Terminal> Session<T> {
    /// Fetches and validates the user records, then readies the main menu.
    ///
    /// Failures are reported on `terminal` and returned; no session exists without records.
    pub fn start(source: &dyn UserSource, terminal: T, config: &SessionConfig) -> Result<Self> {
        let mut io = Frontend {
            terminal,
            screens: Screens::new(config.use_color)?,
            clear_screen: config.clear_screen,
        };

        io.clear()?;
        io.say(&[Message::info("Fetching users from the API...")])?;

        let validation = match source.fetch().and_then(validate) {
            Ok(validation) => validation,
            Err(e) => {
                io.say(&[
                    Message::error(format!("Error: {}", e)),
                    Message::error("Could not fetch user data. Please try again later."),
                ])?;
                return Err(e);
            }
        };

        io.say(&validation.messages)?;
        io.say(&[Message::success(format!(
            "Loaded {} user(s).",
            validation.users.len()
        ))])?;

        Ok(Self {
            io,
            users: validation.users,
            mode: DisplayMode::default(),
            state: State::MainMenu,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn records(&self) -> &ValidatedUserSet {
        &self.users
    }

    /// Runs until the operator exits or input closes.
    pub fn run(&mut self) -> Result<()> {
        while self.state != State::Terminated {
            self.step()?;
        }
        Ok(())
    }

    /// Handles the current state (one line of input) and returns the new state.
    pub fn step(&mut self) -> Result<State> {
        self.state = match self.state {
            State::MainMenu => self.main_menu()?,
            State::Filtering => self.filtering()?,
            State::FormatMenu => self.format_menu()?,
            State::Terminated => State::Terminated,
        };
        Ok(self.state)
    }

    fn main_menu(&mut self) -> Result<State> {
        let menu = self.io.screens.main_menu();
        self.io.write(&menu)?;
        let Some(input) = self.io.ask(MAIN_PROMPT)? else {
            return self.input_closed();
        };

        match MainChoice::parse(&input) {
            Some(MainChoice::ShowAll) => {
                self.io.clear()?;
                self.io.say(&[Message::info("Showing all users:")])?;
                self.show_all()
            }
            Some(MainChoice::Filter) => Ok(State::Filtering),
            Some(MainChoice::ChangeFormat) => Ok(State::FormatMenu),
            Some(MainChoice::Exit) => {
                self.io.clear()?;
                self.io.say(&[Message::success("Goodbye!")])?;
                Ok(State::Terminated)
            }
            None => self.invalid_choice("Invalid choice. Please enter 1-4.", State::MainMenu),
        }
    }

    fn filtering(&mut self) -> Result<State> {
        self.io.clear()?;
        let help = self.io.screens.filter_help(&self.users);
        self.io.write(&help)?;
        let Some(input) = self.io.ask(SEARCH_PROMPT)? else {
            return self.input_closed();
        };

        let term = input.trim();
        if term.is_empty() {
            self.io
                .say(&[Message::warning("Empty search term - showing all users")])?;
            return self.show_all();
        }

        let pattern = compile(term);
        let mut notes = Vec::new();
        if let PatternKind::Fallback { reason } = pattern.kind() {
            notes.push(Message::warning(format!("Invalid regular expression: {}", reason)));
            notes.extend(ESCAPING_TIPS.iter().map(|tip| Message::info(*tip)));
        }
        notes.push(Message::info(pattern.describe()));

        let outcome = filter(&self.users, &pattern);
        notes.push(Message::info("Matching names:"));
        notes.extend(outcome.diagnostics.iter().map(|d| {
            if d.matched() {
                Message::success(format!("  {}", d.to_line()))
            } else {
                Message::info(format!("  {}", d.to_line()))
            }
        }));
        notes.push(outcome.summary(&pattern));
        self.io.say(&notes)?;

        if outcome.is_empty() {
            return Ok(State::MainMenu);
        }

        self.io.say(&[Message::info(format!(
            "Showing users matching pattern '{}':",
            pattern.term()
        ))])?;
        if self.io.show(self.mode, &outcome.matches)? {
            Ok(State::MainMenu)
        } else {
            self.input_closed()
        }
    }

    fn format_menu(&mut self) -> Result<State> {
        self.io.clear()?;
        let menu = self.io.screens.format_menu(self.mode);
        self.io.write(&menu)?;
        let Some(input) = self.io.ask(FORMAT_PROMPT)? else {
            return self.input_closed();
        };

        match FormatChoice::parse(&input) {
            Some(FormatChoice::Mode(mode)) => {
                self.mode = mode;
                self.io.say(&[Message::success(format!(
                    "Display format set to {}.",
                    mode
                ))])?;
                Ok(State::MainMenu)
            }
            Some(FormatChoice::Back) => {
                self.io.clear()?;
                Ok(State::MainMenu)
            }
            None => self.invalid_choice("Invalid choice. Please enter 1-5.", State::FormatMenu),
        }
    }

    fn show_all(&mut self) -> Result<State> {
        if self.io.show(self.mode, self.users.as_slice())? {
            Ok(State::MainMenu)
        } else {
            self.input_closed()
        }
    }

    fn invalid_choice(&mut self, text: &str, stay: State) -> Result<State> {
        self.io.say(&[Message::error(text)])?;
        if self.io.acknowledge()? {
            Ok(stay)
        } else {
            self.input_closed()
        }
    }

    fn input_closed(&mut self) -> Result<State> {
        self.io.say(&[Message::warning("\nInput closed. Exiting...")])?;
        Ok(State::Terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::{entry, sample_entries, ScriptedTerminal, StaticSource};
    use serde_json::json;

    fn start(inputs: &[&str]) -> (Session<ScriptedTerminal>, StaticSource) {
        let source = StaticSource::entries(sample_entries());
        let terminal = ScriptedTerminal::new(inputs.iter().copied());
        let session = Session::start(&source, terminal, &SessionConfig::plain()).unwrap();
        (session, source)
    }

    fn terminal_of<T: Terminal>(session: &Session<T>) -> &T {
        &session.io.terminal
    }

    #[test]
    fn test_start_lands_on_main_menu() {
        let (session, source) = start(&[]);
        assert_eq!(session.state(), State::MainMenu);
        assert_eq!(session.display_mode(), DisplayMode::Standard);
        assert_eq!(session.records().len(), 3);
        assert_eq!(source.calls(), 1);
        assert!(terminal_of(&session).output().contains("Loaded 3 user(s)."));
    }

    #[test]
    fn test_start_reports_dropped_records() {
        let source = StaticSource::entries(vec![entry(1, "Leanne Graham"), json!({"id": 2})]);
        let session =
            Session::start(&source, ScriptedTerminal::default(), &SessionConfig::plain()).unwrap();
        let out = terminal_of(&session).output();
        assert!(out.contains("Skipping record #2: missing name"));
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_not_found_terminates_before_menu() {
        let source = StaticSource::failing(|| Error::FetchHttp(404));
        let mut terminal = ScriptedTerminal::new(["1"]);
        let result = Session::start(&source, &mut terminal, &SessionConfig::plain());

        let err = result.err().expect("start should fail");
        assert_eq!(err.category(), Some("resource not found"));
        assert!(terminal
            .output()
            .contains("Error: The requested resource was not found."));
        assert!(!terminal.output().contains("Options:"));
        assert_eq!(terminal.remaining(), 1);
    }

    #[test]
    fn test_no_valid_records_is_fatal() {
        let source = StaticSource::entries(vec![json!({"name": ""})]);
        let mut terminal = ScriptedTerminal::default();
        let result = Session::start(&source, &mut terminal, &SessionConfig::plain());
        assert!(matches!(
            result.err(),
            Some(Error::NoValidRecords { rejected: 1 })
        ));
        assert!(terminal
            .output()
            .contains("Could not fetch user data. Please try again later."));
    }

    #[test]
    fn test_step_transitions() {
        let (mut session, _) = start(&["2", "^E", "", "3", "5", "4"]);
        assert_eq!(session.step().unwrap(), State::Filtering);
        assert_eq!(session.step().unwrap(), State::MainMenu);
        assert_eq!(session.step().unwrap(), State::FormatMenu);
        assert_eq!(session.step().unwrap(), State::MainMenu);
        assert_eq!(session.step().unwrap(), State::Terminated);
        assert_eq!(session.step().unwrap(), State::Terminated);
    }

    #[test]
    fn test_invalid_format_choice_stays_in_format_menu() {
        let (mut session, _) = start(&["3", "6", "", "5"]);
        assert_eq!(session.step().unwrap(), State::FormatMenu);
        assert_eq!(session.step().unwrap(), State::FormatMenu);
        assert_eq!(session.display_mode(), DisplayMode::Standard);
        assert!(terminal_of(&session)
            .output()
            .contains("Invalid choice. Please enter 1-5."));
        assert_eq!(session.step().unwrap(), State::MainMenu);
        assert_eq!(session.display_mode(), DisplayMode::Standard);
    }

    #[test]
    fn test_invalid_main_choice_reprompts() {
        let (mut session, _) = start(&["9", ""]);
        assert_eq!(session.step().unwrap(), State::MainMenu);
        assert!(terminal_of(&session)
            .output()
            .contains("Invalid choice. Please enter 1-4."));
    }

    #[test]
    fn test_format_change_does_not_render() {
        let (mut session, _) = start(&["3", "4"]);
        session.step().unwrap();
        assert_eq!(session.step().unwrap(), State::MainMenu);
        assert_eq!(session.display_mode(), DisplayMode::Compact);
        let out = terminal_of(&session).output();
        assert!(out.contains("Display format set to Compact."));
        assert!(!out.contains("Users in compact format:"));
        assert!(!out.contains(CONTINUE_PROMPT));
    }

    #[test]
    fn test_zero_matches_skips_render() {
        let (mut session, _) = start(&["2", "zzz"]);
        session.step().unwrap();
        assert_eq!(session.step().unwrap(), State::MainMenu);
        let out = terminal_of(&session).output();
        assert!(out.contains("No users found matching pattern 'zzz' in their name."));
        assert!(!out.contains(CONTINUE_PROMPT));
    }

    #[test]
    fn test_search_notes_stay_on_screen_with_results() {
        let source = StaticSource::entries(vec![entry(1, "Ann (Dev)"), entry(2, "Bob")]);
        let mut terminal = ScriptedTerminal::new(["2", "(Dev", "", "4"]);
        let config = SessionConfig {
            clear_screen: true,
            ..SessionConfig::plain()
        };
        Session::start(&source, &mut terminal, &config)
            .unwrap()
            .run()
            .unwrap();

        let screen = terminal.screen_at(CONTINUE_PROMPT).unwrap();
        assert!(screen.contains("Invalid regular expression:"));
        assert!(screen.contains("- Use \\[ to match a literal square bracket"));
        assert!(screen.contains("Falling back to plain text search"));
        assert!(screen.contains("✓ 'Ann (Dev)' matches pattern (at 4, length 4)"));
        assert!(screen.contains("✗ 'Bob' does not match pattern"));
        assert!(screen.contains("Name: Ann (Dev)"));
        assert!(!screen.contains("Options:"));
    }

    #[test]
    fn test_show_all_clears_the_menu_but_keeps_its_heading() {
        let source = StaticSource::entries(sample_entries());
        let mut terminal = ScriptedTerminal::new(["1", "", "4"]);
        let config = SessionConfig {
            clear_screen: true,
            ..SessionConfig::plain()
        };
        Session::start(&source, &mut terminal, &config)
            .unwrap()
            .run()
            .unwrap();

        let screen = terminal.screen_at(CONTINUE_PROMPT).unwrap();
        assert!(screen.starts_with("Showing all users:\n"));
        assert!(screen.contains("Name: Clementine Bauch"));
    }

    #[test]
    fn test_closed_input_terminates() {
        let (mut session, _) = start(&[]);
        session.run().unwrap();
        assert_eq!(session.state(), State::Terminated);
        assert!(terminal_of(&session).output().contains("Input closed. Exiting..."));
    }

    #[test]
    fn test_closed_input_during_acknowledgment_terminates() {
        let (mut session, _) = start(&["1"]);
        assert_eq!(session.step().unwrap(), State::Terminated);
    }
}
