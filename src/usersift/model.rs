use serde::{Deserialize, Serialize};
use std::fmt;

/// One user as served by the directory endpoint.
///
/// Field order here is the serialized order, which the structured presentation relies on.
/// Optional text fields default to empty strings; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub geo: Geo,
}

/// Coordinates are kept as the strings the endpoint sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "catchPhrase")]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

impl UserRecord {
    /// Minimal record with just a name, mostly useful for tests and fixtures.
    pub fn named(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            username: String::new(),
            email: String::new(),
            address: Address::default(),
            phone: String::new(),
            website: String::new(),
            company: Company::default(),
        }
    }
}

/// Records that passed validation, in fetch order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedUserSet {
    records: Vec<UserRecord>,
}

impl ValidatedUserSet {
    /// Wraps `records`, returning `None` when there are none.
    pub(crate) fn new(records: Vec<UserRecord>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    pub fn as_slice(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UserRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept so the type reads like a collection.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }
}

impl<'a> IntoIterator for &'a ValidatedUserSet {
    type Item = &'a UserRecord;
    type IntoIter = std::slice::Iter<'a, UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Standard,
    Structured,
    Tabular,
    Compact,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Standard,
        DisplayMode::Structured,
        DisplayMode::Tabular,
        DisplayMode::Compact,
    ];

    /// Heading printed above a rendering in this mode, if any.
    pub fn heading(self) -> Option<&'static str> {
        match self {
            DisplayMode::Standard => None,
            DisplayMode::Structured => Some("Users in JSON format:"),
            DisplayMode::Tabular => Some("Users in table format:"),
            DisplayMode::Compact => Some("Users in compact format:"),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DisplayMode::Standard => "Standard",
            DisplayMode::Structured => "JSON",
            DisplayMode::Tabular => "Table",
            DisplayMode::Compact => "Compact",
        };
        write!(f, "{}", label)
    }
}

/// Options of the main menu, numbered 1-4 on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    ShowAll,
    Filter,
    ChangeFormat,
    Exit,
}

impl MainChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MainChoice::ShowAll),
            "2" => Some(MainChoice::Filter),
            "3" => Some(MainChoice::ChangeFormat),
            "4" => Some(MainChoice::Exit),
            _ => None,
        }
    }
}

/// Options of the format submenu, numbered 1-5 on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChoice {
    Mode(DisplayMode),
    Back,
}

impl FormatChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(FormatChoice::Mode(DisplayMode::Standard)),
            "2" => Some(FormatChoice::Mode(DisplayMode::Structured)),
            "3" => Some(FormatChoice::Mode(DisplayMode::Tabular)),
            "4" => Some(FormatChoice::Mode(DisplayMode::Compact)),
            "5" => Some(FormatChoice::Back),
            _ => None,
        }
    }
}
