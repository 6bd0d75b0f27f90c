use crate::message::Message;
use crate::model::{UserRecord, ValidatedUserSet};
use crate::pattern::{CompiledPattern, MatchSpan};

/// Match result for one input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDiagnostic {
    pub name: String,
    pub span: Option<MatchSpan>,
}

impl MatchDiagnostic {
    pub fn matched(&self) -> bool {
        self.span.is_some()
    }

    /// `✓ 'Ervin Howell' matches pattern (at 0, length 1)` or `✗ 'Leanne Graham' does not match pattern`.
    pub fn to_line(&self) -> String {
        match self.span {
            Some(span) => format!(
                "✓ '{}' matches pattern (at {}, length {})",
                self.name, span.start, span.len
            ),
            None => format!("✗ '{}' does not match pattern", self.name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Matching records in input order.
    pub matches: Vec<UserRecord>,
    /// One entry per input record, in input order.
    pub diagnostics: Vec<MatchDiagnostic>,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Result line shown after the diagnostics.
    pub fn summary(&self, pattern: &CompiledPattern) -> Message {
        if self.is_empty() {
            Message::warning(format!(
                "No users found matching pattern '{}' in their name.",
                pattern.term()
            ))
        } else {
            Message::success(format!(
                "Found {} user(s) matching pattern '{}' in their name.",
                self.match_count(),
                pattern.term()
            ))
        }
    }
}

/// Applies `pattern` to every record's name. Stable: matches keep their input order.
pub fn filter(records: &ValidatedUserSet, pattern: &CompiledPattern) -> FilterOutcome {
    let mut matches = Vec::new();
    let mut diagnostics = Vec::with_capacity(records.len());

    for record in records {
        let span = pattern.find(&record.name);
        if span.is_some() {
            matches.push(record.clone());
        }
        diagnostics.push(MatchDiagnostic {
            name: record.name.clone(),
            span,
        });
    }

    FilterOutcome {
        matches,
        diagnostics,
    }
}
