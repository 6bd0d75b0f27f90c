//! # Presentations
//!
//! The four ways a record list can be shown. Each renderer is a pure function from a record
//! slice to text. They share no state and are deterministic: the same records always produce
//! the same bytes.
//!
//! Output is plain text. Styling, headings and the acknowledgment prompt belong to the screens
//! layer, which wraps whatever these functions return.

use crate::error::Result;
use crate::model::{DisplayMode, UserRecord};
use gridline::Grid;

/// Shown instead of blank output when there is nothing to list.
pub const NO_RECORDS: &str = "No users found matching the search criteria.";

pub const SEPARATOR_WIDTH: usize = 50;

pub const TABLE_HEADERS: [&str; 4] = ["Name", "Email", "Street", "City"];

/// Renders `records` in `mode`. Only the structured mode can fail.
pub fn render(mode: DisplayMode, records: &[UserRecord]) -> Result<String> {
    match mode {
        DisplayMode::Standard => Ok(render_standard(records)),
        DisplayMode::Structured => render_structured(records),
        DisplayMode::Tabular => Ok(render_tabular(records)),
        DisplayMode::Compact => Ok(render_compact(records)),
    }
}

pub fn render_standard(records: &[UserRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", NO_RECORDS);
    }

    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();
    for user in records {
        out.push_str(&format!("\nName: {}\n", user.name));
        out.push_str(&format!("Email: {}\n", user.email));
        out.push_str(&format!(
            "Address: {}, {}\n",
            user.address.street, user.address.city
        ));
        out.push_str(&separator);
        out.push('\n');
    }
    out
}

/// Pretty JSON array, two-space indented, fields in declaration order. Empty input gives `[]`.
pub fn render_structured(records: &[UserRecord]) -> Result<String> {
    let mut out = serde_json::to_string_pretty(records)?;
    out.push('\n');
    Ok(out)
}

pub fn render_tabular(records: &[UserRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", NO_RECORDS);
    }

    let mut grid = Grid::new(TABLE_HEADERS);
    for user in records {
        grid.push_row([
            user.name.as_str(),
            user.email.as_str(),
            user.address.street.as_str(),
            user.address.city.as_str(),
        ]);
    }
    grid.render()
}

pub fn render_compact(records: &[UserRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", NO_RECORDS);
    }

    records
        .iter()
        .map(|user| {
            format!(
                "{} | {} | {}, {}\n",
                user.name, user.email, user.address.street, user.address.city
            )
        })
        .collect()
}
