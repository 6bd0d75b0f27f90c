//! # Gridline - Column-Aligned Text Grids
//!
//! A small layout helper that turns a header row plus data rows into a bordered,
//! column-aligned block of text, suitable for printing in a terminal.
//!
//! ```rust
//! use gridline::Grid;
//!
//! let out = Grid::new(["Name", "City"])
//!     .row(["Leanne Graham", "Gwenborough"])
//!     .row(["Ervin Howell", "Wisokyburgh"])
//!     .render();
//!
//! assert!(out.starts_with("+---------------+-------------+\n"));
//! assert!(out.contains("| Ervin Howell  | Wisokyburgh |"));
//! ```
//!
//! ## Layout Rules
//!
//! - Column widths are measured in terminal display cells (via `unicode-width`),
//!   so CJK and emoji content stays aligned.
//! - Each cell gets one space of padding on either side.
//! - The header is separated by a `=` rule, data rows by `-` rules.
//! - Line breaks inside a cell are flattened to spaces; a cell is always one line.
//! - Rows shorter than the widest row are padded with empty cells.

use unicode_width::UnicodeWidthStr;

/// A header row and the data rows rendered beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Creates a grid with the given header cells and no rows.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(|h| flatten(h.into())).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a data row, returning the grid for chaining.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    /// Appends a data row in place.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows
            .push(cells.into_iter().map(|c| flatten(c.into())).collect());
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns: the widest of the header and every row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Display width of each column's widest cell.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.column_count()];
        for line in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in line.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
    }

    /// Renders the grid. Every line, including the last, ends with `\n`.
    /// A grid with no columns renders as an empty string.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        if widths.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        out.push_str(&rule(&widths, '-'));
        out.push_str(&line(&self.headers, &widths));
        out.push_str(&rule(&widths, '='));
        if self.rows.is_empty() {
            return out;
        }
        for row in &self.rows {
            out.push_str(&line(row, &widths));
            out.push_str(&rule(&widths, '-'));
        }
        out
    }
}

fn flatten(cell: String) -> String {
    if cell.contains(['\n', '\r']) {
        cell.replace("\r\n", " ").replace(['\n', '\r'], " ")
    } else {
        cell
    }
}

fn rule(widths: &[usize], fill: char) -> String {
    let mut out = String::from("+");
    for w in widths {
        out.extend(std::iter::repeat(fill).take(w + 2));
        out.push('+');
    }
    out.push('\n');
    out
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(w.saturating_sub(cell.width()) + 1));
        out.push('|');
    }
    out.push('\n');
    out
}
