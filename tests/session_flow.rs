use usersift::config::SessionConfig;
use usersift::error::Error;
use usersift::model::DisplayMode;
use usersift::screens::CONTINUE_PROMPT;
use usersift::session::{Session, State};
use usersift::test_utils::{entry, sample_entries, ScriptedTerminal, StaticSource};

fn run_script(inputs: &[&str]) -> (ScriptedTerminal, DisplayMode) {
    let source = StaticSource::entries(sample_entries());
    let mut terminal = ScriptedTerminal::new(inputs.iter().copied());
    let mode = {
        let mut session = Session::start(&source, &mut terminal, &SessionConfig::plain())
            .expect("session should start");
        session.run().expect("session should run");
        assert_eq!(session.state(), State::Terminated);
        session.display_mode()
    };
    assert_eq!(source.calls(), 1, "records are fetched exactly once");
    (terminal, mode)
}

#[test]
fn test_filter_caret_e_shows_only_ervin() {
    let (terminal, _) = run_script(&["2", "^E", "", "4"]);
    let out = terminal.output();

    assert!(out.contains("Using regex pattern: ^E"));
    assert!(out.contains("✓ 'Ervin Howell' matches pattern (at 0, length 1)"));
    assert!(out.contains("✗ 'Leanne Graham' does not match pattern"));
    assert!(out.contains("✗ 'Clementine Bauch' does not match pattern"));
    assert!(out.contains("Found 1 user(s) matching pattern '^E' in their name."));

    let rendered = &out[out.find("Showing users matching pattern").unwrap()..];
    assert!(rendered.contains("Name: Ervin Howell"));
    assert!(!rendered.contains("Name: Leanne Graham"));
    assert!(out.ends_with("Goodbye!\n"));
}

#[test]
fn test_show_all_uses_selected_format() {
    let (terminal, mode) = run_script(&["3", "4", "1", "", "4"]);
    assert_eq!(mode, DisplayMode::Compact);

    let out = terminal.output();
    assert!(out.contains("Users in compact format:"));
    assert!(out.contains("Leanne Graham | Sincere@april.biz | Kulas Light, Gwenborough"));
    assert!(out.contains("Clementine Bauch | Nathan@yesenia.net | Douglas Extension, McKenziehaven"));
}

#[test]
fn test_format_persists_across_filters() {
    let (terminal, mode) = run_script(&["3", "2", "2", "bauch", "", "2", "howell", "", "4"]);
    assert_eq!(mode, DisplayMode::Structured);

    let out = terminal.output();
    assert_eq!(out.matches("Users in JSON format:").count(), 2);
    assert!(out.contains("\"name\": \"Clementine Bauch\""));
    assert!(out.contains("\"name\": \"Ervin Howell\""));
}

#[test]
fn test_table_format() {
    let (terminal, _) = run_script(&["3", "3", "1", "", "4"]);
    let out = terminal.output();
    assert!(out.contains("Users in table format:"));
    assert!(out.contains("| Name"));
    assert!(out.contains("| City"));
    assert!(out.contains("| Leanne Graham    |"));
}

#[test]
fn test_literal_search() {
    let (terminal, _) = run_script(&["2", r"\e.h", "4"]);
    let out = terminal.output();
    assert!(out.contains(r"Using literal search pattern: e\.h"));
    assert!(out.contains("No users found matching pattern"));
}

#[test]
fn test_malformed_regex_falls_back_and_says_so() {
    let (terminal, _) = run_script(&["2", "[Leanne", "4"]);
    let out = terminal.output();
    assert!(out.contains("Invalid regular expression:"));
    assert!(out.contains("- Use \\. to match a literal dot"));
    assert!(out.contains(r"Falling back to plain text search (pattern was not a valid regex): \[Leanne"));
    assert!(out.contains("No users found matching pattern '[Leanne' in their name."));
}

#[test]
fn test_empty_search_shows_everyone() {
    let (terminal, _) = run_script(&["2", "   ", "", "4"]);
    let out = terminal.output();
    assert!(out.contains("Empty search term - showing all users"));
    for name in ["Leanne Graham", "Ervin Howell", "Clementine Bauch"] {
        assert!(out.contains(&format!("Name: {}", name)));
    }
}

#[test]
fn test_invalid_format_choice_keeps_mode() {
    let (terminal, mode) = run_script(&["3", "6", "", "5", "4"]);
    assert_eq!(mode, DisplayMode::Standard);
    let out = terminal.output();
    assert!(out.contains("Invalid choice. Please enter 1-5."));
    assert_eq!(out.matches("Choose display format:").count(), 2);
}

#[test]
fn test_every_render_waits_for_continue() {
    let (terminal, _) = run_script(&["1", "", "2", "a", "", "4"]);
    let acks = terminal
        .prompts()
        .iter()
        .filter(|p| p.as_str() == CONTINUE_PROMPT)
        .count();
    assert_eq!(acks, 2);
}

#[test]
fn test_fetch_failures_never_reach_menu() {
    let cases: [(fn() -> Error, &str); 4] = [
        (|| Error::FetchTimeout, "The request timed out."),
        (
            || Error::FetchConnection("refused".into()),
            "Could not connect to the server.",
        ),
        (|| Error::FetchHttp(403), "Access to the resource is forbidden."),
        (
            || Error::FetchHttp(500),
            "Server returned an error (Status code: 500)",
        ),
    ];

    for (make_error, expected) in cases {
        let source = StaticSource::failing(make_error);
        let mut terminal = ScriptedTerminal::new(["4"]);
        let result = Session::start(&source, &mut terminal, &SessionConfig::plain());
        assert!(result.is_err());
        drop(result);

        assert!(terminal.output().contains(expected), "missing {:?}", expected);
        assert!(!terminal.output().contains("Options:"));
        assert_eq!(terminal.remaining(), 1);
    }
}

#[test]
fn test_partially_valid_payload_still_starts() {
    let source = StaticSource::entries(vec![
        entry(1, "Leanne Graham"),
        serde_json::json!(42),
        entry(3, ""),
    ]);
    let mut terminal = ScriptedTerminal::new(["4"]);
    {
        let mut session =
            Session::start(&source, &mut terminal, &SessionConfig::plain()).unwrap();
        assert_eq!(session.records().len(), 1);
        session.run().unwrap();
    }
    let out = terminal.output();
    assert!(out.contains("Skipping record #2: not an object"));
    assert!(out.contains("Skipping record #3: empty name"));
}
