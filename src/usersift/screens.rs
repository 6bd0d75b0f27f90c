//! # Screens
//!
//! Everything the session shows around the records themselves: menus, the search help page,
//! leveled messages and the heading above a rendered list.
//!
//! Screens are minijinja templates. Styling goes through a `style` filter that maps semantic
//! names (`title`, `key`, `warning`, ...) to `console::Style`s from [`THEME`]. Templates only
//! name styles, never colors, so switching palettes or turning color off is a one-place change.
//!
//! When color is off the filter passes text through untouched. An unknown style name is
//! flagged with [`MISSING_STYLE_INDICATOR`] in both modes so template typos show up in tests.
//!
//! Whitespace: environments run with `trim_blocks`, so a line holding only a block tag
//! produces no output line of its own.

use crate::error::Result;
use crate::message::{Message, MessageLevel};
use crate::model::{DisplayMode, ValidatedUserSet};
use console::Style;
use minijinja::{Environment, Value};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub const MAIN_PROMPT: &str = "\nEnter your choice (1-4): ";
pub const FORMAT_PROMPT: &str = "\nEnter your choice (1-5): ";
pub const SEARCH_PROMPT: &str =
    "\nEnter a regex pattern to search for (or '\\' + text for literal search): ";
pub const CONTINUE_PROMPT: &str = "\nPress Enter to continue...";

/// Shown after an automatic fallback to plain text search.
pub const ESCAPING_TIPS: [&str; 5] = [
    "Tips:",
    "- Use \\. to match a literal dot",
    "- Use \\* to match a literal asterisk",
    "- Use \\[ to match a literal square bracket",
    "- Add \\ before any special character to match it literally",
];

pub mod names {
    pub const TITLE: &str = "title";
    pub const KEY: &str = "key";
    pub const HINT: &str = "hint";
    pub const CURRENT: &str = "current";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

/// Semantic style names to terminal styles. Styles are forced; whether they are applied at all
/// is decided per [`Screens`] instance.
pub static THEME: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    HashMap::from([
        (names::TITLE, Style::new().bold().force_styling(true)),
        (names::KEY, Style::new().cyan().force_styling(true)),
        (names::HINT, Style::new().dim().force_styling(true)),
        (
            names::CURRENT,
            Style::new().yellow().italic().force_styling(true),
        ),
        (names::INFO, Style::new().dim().force_styling(true)),
        (names::SUCCESS, Style::new().green().force_styling(true)),
        (names::WARNING, Style::new().yellow().force_styling(true)),
        (names::ERROR, Style::new().red().force_styling(true)),
    ])
});

const MAIN_MENU: &str = "main_menu";
const FORMAT_MENU: &str = "format_menu";
const FILTER_HELP: &str = "filter_help";
const MESSAGES: &str = "messages";
const RECORDS: &str = "records";

const MAIN_MENU_TEMPLATE: &str = r#"
{{ "Options:" | style("title") }}
{% for option in options %}
{{ option.key | style("key") }}. {{ option.label }}
{% endfor %}
"#;

const FORMAT_MENU_TEMPLATE: &str = r#"
{{ "Choose display format:" | style("title") }}
{% for option in options %}
{{ option.key | style("key") }}. {{ option.label }}{% if option.current %} {{ "(current)" | style("current") }}{% endif %}

{% endfor %}
"#;

const FILTER_HELP_TEMPLATE: &str = r#"
{{ "Regex Pattern Examples:" | style("title") }}
  ^A          - names starting with A
  a$          - names ending with a
  .*son.*     - names containing 'son'
  [AM].*      - names starting with A or M
  .*\bJohn\b  - names containing the whole word 'John'

{{ "Special Characters:" | style("title") }}
  Add \ before . * + ? ^ $ [ ] ( ) { } | \ to match them literally
  Example: \. matches literal dot, \* matches literal asterisk
  {{ "Start the term with \\ to search for the rest as plain text, e.g. \\A.B" | style("hint") }}

{{ "Available names for reference:" | style("title") }}
{% for name in names %}
  - {{ name }}
{% endfor %}
"#;

const MESSAGES_TEMPLATE: &str = r#"{% for message in messages %}
{{ message.content | style(message.style) }}
{% endfor %}
"#;

const RECORDS_TEMPLATE: &str = r#"{% if heading %}

{{ heading | style("title") }}
{% endif %}
{{ body }}"#;

const TEMPLATES: [(&str, &str); 5] = [
    (MAIN_MENU, MAIN_MENU_TEMPLATE),
    (FORMAT_MENU, FORMAT_MENU_TEMPLATE),
    (FILTER_HELP, FILTER_HELP_TEMPLATE),
    (MESSAGES, MESSAGES_TEMPLATE),
    (RECORDS, RECORDS_TEMPLATE),
];

#[derive(Serialize)]
struct MenuOption {
    key: usize,
    label: String,
    current: bool,
}

#[derive(Serialize)]
struct MenuData {
    options: Vec<MenuOption>,
}

#[derive(Serialize)]
struct FilterHelpData<'a> {
    names: Vec<&'a str>,
}

#[derive(Serialize)]
struct MessageData<'a> {
    content: &'a str,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData<'a> {
    messages: Vec<MessageData<'a>>,
}

#[derive(Serialize)]
struct RecordsData<'a> {
    heading: Option<&'static str>,
    body: &'a str,
}

/// Pre-compiled screen templates bound to a color setting.
pub struct Screens {
    env: Environment<'static>,
}

impl Screens {
    pub fn new(use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_keep_trailing_newline(true);
        register_style_filter(&mut env, use_color);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn main_menu(&self) -> String {
        let labels = [
            "Show all users",
            "Filter users by name (supports regex)",
            "Change display format",
            "Exit",
        ];
        let options = labels
            .iter()
            .enumerate()
            .map(|(i, label)| MenuOption {
                key: i + 1,
                label: label.to_string(),
                current: false,
            })
            .collect();
        self.render_or_report(MAIN_MENU, &MenuData { options })
    }

    pub fn format_menu(&self, current: DisplayMode) -> String {
        let mut options: Vec<MenuOption> = DisplayMode::ALL
            .iter()
            .enumerate()
            .map(|(i, mode)| MenuOption {
                key: i + 1,
                label: format!("{} format", mode),
                current: *mode == current,
            })
            .collect();
        options.push(MenuOption {
            key: options.len() + 1,
            label: "Back to main menu".to_string(),
            current: false,
        });
        self.render_or_report(FORMAT_MENU, &MenuData { options })
    }

    pub fn filter_help(&self, users: &ValidatedUserSet) -> String {
        let data = FilterHelpData {
            names: users.names().collect(),
        };
        self.render_or_report(FILTER_HELP, &data)
    }

    pub fn messages(&self, messages: &[Message]) -> String {
        if messages.is_empty() {
            return String::new();
        }

        let data = MessagesData {
            messages: messages
                .iter()
                .map(|m| MessageData {
                    content: &m.content,
                    style: level_style(m.level),
                })
                .collect(),
        };
        self.render(MESSAGES, &data).unwrap_or_else(|_| {
            messages
                .iter()
                .map(|m| format!("{}\n", m.content))
                .collect()
        })
    }

    pub fn message(&self, message: Message) -> String {
        self.messages(&[message])
    }

    /// Wraps an already rendered record list with the heading for `mode`.
    pub fn records(&self, mode: DisplayMode, body: &str) -> Result<String> {
        let data = RecordsData {
            heading: mode.heading(),
            body,
        };
        self.render(RECORDS, &data)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(data)?)
    }

    fn render_or_report<T: Serialize>(&self, name: &str, data: &T) -> String {
        self.render(name, data)
            .unwrap_or_else(|e| format!("{}\n", e))
    }
}

fn level_style(level: MessageLevel) -> &'static str {
    match level {
        MessageLevel::Info => names::INFO,
        MessageLevel::Success => names::SUCCESS,
        MessageLevel::Warning => names::WARNING,
        MessageLevel::Error => names::ERROR,
    }
}

fn register_style_filter(env: &mut Environment<'static>, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        match THEME.get(name.as_str()) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            Some(_) => text,
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    });
}
