use crate::error::{Error, Result};
use crate::message::Message;
use crate::model::{UserRecord, ValidatedUserSet};
use serde_json::Value;

/// Outcome of a successful validation: the usable records plus one warning per dropped entry.
#[derive(Debug)]
pub struct Validation {
    pub users: ValidatedUserSet,
    pub messages: Vec<Message>,
}

/// Keeps the entries that are objects with a non-empty string `name` and a well-typed body.
///
/// Returns [`Error::NoValidRecords`] when nothing survives.
pub fn validate(raw: Vec<Value>) -> Result<Validation> {
    let total = raw.len();
    let mut kept = Vec::with_capacity(total);
    let mut messages = Vec::new();

    for (position, entry) in raw.into_iter().enumerate() {
        match check(entry) {
            Ok(user) => kept.push(user),
            Err(reason) => messages.push(Message::warning(format!(
                "Skipping record #{}: {}",
                position + 1,
                reason
            ))),
        }
    }

    let rejected = total - kept.len();
    match ValidatedUserSet::new(kept) {
        Some(users) => Ok(Validation { users, messages }),
        None => Err(Error::NoValidRecords { rejected }),
    }
}

fn check(entry: Value) -> std::result::Result<UserRecord, String> {
    let Some(object) = entry.as_object() else {
        return Err("not an object".to_string());
    };
    match object.get("name") {
        None | Some(Value::Null) => return Err("missing name".to_string()),
        Some(Value::String(name)) if name.trim().is_empty() => {
            return Err("empty name".to_string())
        }
        Some(Value::String(_)) => {}
        Some(_) => return Err("name is not a string".to_string()),
    }
    serde_json::from_value(entry).map_err(|e| format!("malformed record ({})", e))
}
