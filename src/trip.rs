//! The trip request form and the bodies built from it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::RequestFailure;

/// Which presentation shell is collecting the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shell {
    /// All four fields, relative endpoint, busy indicator.
    #[default]
    Web,
    /// Species and state only, fixed absolute endpoint, no busy indicator.
    Mobile,
}

impl Shell {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shell::Web => "web",
            Shell::Mobile => "mobile",
        }
    }

    /// Whether this shell shows a loading indicator while a request is in flight.
    pub fn has_busy_flag(&self) -> bool {
        matches!(self, Shell::Web)
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shell {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Shell::Web),
            "mobile" => Ok(Shell::Mobile),
            other => anyhow::bail!("unknown shell: {other} (expected web or mobile)"),
        }
    }
}

/// One free-text input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Species,
    State,
    UserLocation,
    DestinationName,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Species,
        Field::State,
        Field::UserLocation,
        Field::DestinationName,
    ];

    /// Key used in the request body.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Species => "species",
            Field::State => "state",
            Field::UserLocation => "user_location",
            Field::DestinationName => "destination_name",
        }
    }

    /// Prompt text, with an example of what goes in.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Species => "Species (e.g., bass)",
            Field::State => "State (e.g., Maine)",
            Field::UserLocation => "Your city or ZIP",
            Field::DestinationName => "Destination (lake or town)",
        }
    }

    pub fn collected_in(&self, shell: Shell) -> bool {
        match shell {
            Shell::Web => true,
            Shell::Mobile => matches!(self, Field::Species | Field::State),
        }
    }
}

/// The four strings held by the form. Created empty, edited one field at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripForm {
    pub species: String,
    pub state: String,
    pub user_location: String,
    pub destination_name: String,
}

impl TripForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Species => &self.species,
            Field::State => &self.state,
            Field::UserLocation => &self.user_location,
            Field::DestinationName => &self.destination_name,
        }
    }

    /// Replace a field with `text` exactly as given.
    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        let slot = match field {
            Field::Species => &mut self.species,
            Field::State => &mut self.state,
            Field::UserLocation => &mut self.user_location,
            Field::DestinationName => &mut self.destination_name,
        };
        *slot = text.into();
    }

    /// Build the JSON body the given shell sends.
    pub fn body(&self, shell: Shell) -> Value {
        let encoded = match shell {
            Shell::Web => serde_json::to_value(WebBody {
                species: &self.species,
                state: &self.state,
                user_location: &self.user_location,
                destination_name: &self.destination_name,
            }),
            Shell::Mobile => serde_json::to_value(MobileBody {
                species: &self.species,
                state: &self.state,
            }),
        };
        // Serializing plain string fields cannot fail.
        encoded.unwrap_or(Value::Null)
    }
}

#[derive(Serialize)]
struct WebBody<'a> {
    species: &'a str,
    state: &'a str,
    user_location: &'a str,
    destination_name: &'a str,
}

#[derive(Serialize)]
struct MobileBody<'a> {
    species: &'a str,
    state: &'a str,
}

/// What came back from a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum TripResult {
    /// The decoded response body, whatever its shape.
    Success(Value),
    /// The request or the decode failed.
    Failure(String),
}

impl TripResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TripResult::Success(_))
    }

    /// The value shown to the user: the response itself, or `{"error": message}`.
    pub fn display_value(&self) -> Value {
        match self {
            TripResult::Success(value) => value.clone(),
            TripResult::Failure(message) => serde_json::json!({ "error": message }),
        }
    }
}

impl From<Result<Value, RequestFailure>> for TripResult {
    fn from(outcome: Result<Value, RequestFailure>) -> Self {
        match outcome {
            Ok(value) => TripResult::Success(value),
            Err(failure) => TripResult::Failure(failure.message().to_string()),
        }
    }
}
