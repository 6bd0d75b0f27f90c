//! Scripted collaborators and fixtures for driving sessions in tests.

use crate::error::{Error, Result};
use crate::fetch::UserSource;
use crate::model::{Address, Company, Geo, UserRecord, ValidatedUserSet};
use crate::terminal::Terminal;
use serde_json::{json, Value};
use std::cell::Cell;
use std::collections::VecDeque;

/// Replays queued input lines and records everything written, prompts included.
/// Once the queue runs dry, reads report closed input.
///
/// Besides the full transcript it keeps the visible screen, which `clear` empties, and a
/// snapshot of that screen at every prompt.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    inputs: VecDeque<String>,
    output: String,
    screen: String,
    prompts: Vec<String>,
    snapshots: Vec<String>,
    clears: usize,
}

impl ScriptedTerminal {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Every prompt shown, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Input lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    /// What was on screen when `prompt` was first shown, prompt included.
    pub fn screen_at(&self, prompt: &str) -> Option<&str> {
        self.prompts
            .iter()
            .position(|p| p == prompt)
            .map(|i| self.snapshots[i].as_str())
    }

    fn echo(&mut self, text: &str) {
        self.output.push_str(text);
        self.screen.push_str(text);
    }
}

impl Terminal for ScriptedTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.echo(prompt);
        self.prompts.push(prompt.to_string());
        self.snapshots.push(self.screen.clone());
        let line = self.inputs.pop_front();
        if let Some(line) = &line {
            self.echo(&format!("{}\n", line));
        }
        Ok(line)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.echo(text);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        self.screen.clear();
        Ok(())
    }
}

/// A user source that answers from memory and counts how often it was asked.
pub struct StaticSource {
    respond: Box<dyn Fn() -> Result<Vec<Value>>>,
    calls: Cell<usize>,
}

impl StaticSource {
    pub fn entries(entries: Vec<Value>) -> Self {
        Self {
            respond: Box::new(move || Ok(entries.clone())),
            calls: Cell::new(0),
        }
    }

    pub fn failing(make_error: fn() -> Error) -> Self {
        Self {
            respond: Box::new(move || Err(make_error())),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl UserSource for StaticSource {
    fn fetch(&self) -> Result<Vec<Value>> {
        self.calls.set(self.calls.get() + 1);
        (self.respond)()
    }
}

pub fn leanne() -> UserRecord {
    UserRecord {
        id: 1,
        name: "Leanne Graham".to_string(),
        username: "Bret".to_string(),
        email: "Sincere@april.biz".to_string(),
        address: Address {
            street: "Kulas Light".to_string(),
            suite: "Apt. 556".to_string(),
            city: "Gwenborough".to_string(),
            zipcode: "92998-3874".to_string(),
            geo: Geo {
                lat: "-37.3159".to_string(),
                lng: "81.1496".to_string(),
            },
        },
        phone: "1-770-736-8031 x56442".to_string(),
        website: "hildegard.org".to_string(),
        company: Company {
            name: "Romaguera-Crona".to_string(),
            catch_phrase: "Multi-layered client-server neural-net".to_string(),
            bs: "harness real-time e-markets".to_string(),
        },
    }
}

pub fn ervin() -> UserRecord {
    UserRecord {
        id: 2,
        name: "Ervin Howell".to_string(),
        username: "Antonette".to_string(),
        email: "Shanna@melissa.tv".to_string(),
        address: Address {
            street: "Victor Plains".to_string(),
            suite: "Suite 879".to_string(),
            city: "Wisokyburgh".to_string(),
            zipcode: "90566-7771".to_string(),
            geo: Geo {
                lat: "-43.9509".to_string(),
                lng: "-34.4618".to_string(),
            },
        },
        phone: "010-692-6593 x09125".to_string(),
        website: "anastasia.net".to_string(),
        company: Company {
            name: "Deckow-Crist".to_string(),
            catch_phrase: "Proactive didactic contingency".to_string(),
            bs: "synergize scalable supply-chains".to_string(),
        },
    }
}

pub fn clementine() -> UserRecord {
    UserRecord {
        id: 3,
        name: "Clementine Bauch".to_string(),
        username: "Samantha".to_string(),
        email: "Nathan@yesenia.net".to_string(),
        address: Address {
            street: "Douglas Extension".to_string(),
            suite: "Suite 847".to_string(),
            city: "McKenziehaven".to_string(),
            zipcode: "59590-4157".to_string(),
            geo: Geo {
                lat: "-68.6102".to_string(),
                lng: "-47.0653".to_string(),
            },
        },
        phone: "1-463-123-4447".to_string(),
        website: "ramiro.info".to_string(),
        company: Company {
            name: "Romaguera-Jacobson".to_string(),
            catch_phrase: "Face to face bifurcated interface".to_string(),
            bs: "e-enable strategic applications".to_string(),
        },
    }
}

/// Leanne Graham, Ervin Howell and Clementine Bauch, in that order.
pub fn sample_users() -> ValidatedUserSet {
    users(vec![leanne(), ervin(), clementine()])
}

/// The sample users as the endpoint would send them.
pub fn sample_entries() -> Vec<Value> {
    sample_users()
        .iter()
        .map(|u| serde_json::to_value(u).unwrap_or(Value::Null))
        .collect()
}

pub fn users_named(names: &[&str]) -> ValidatedUserSet {
    users(
        names
            .iter()
            .enumerate()
            .map(|(i, n)| UserRecord::named(i as u64 + 1, *n))
            .collect(),
    )
}

/// A raw entry with just an id and a name.
pub fn entry(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

fn users(records: Vec<UserRecord>) -> ValidatedUserSet {
    ValidatedUserSet::new(records).unwrap_or_else(|| panic!("fixtures must not be empty"))
}
