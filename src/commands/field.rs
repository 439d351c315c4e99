use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::trip::Field;

/// Sets one form field to the rest of the line.
pub struct FieldCommand {
    name: &'static str,
    field: Field,
    description: String,
}

impl FieldCommand {
    pub fn new(name: &'static str, field: Field) -> Self {
        let description = match field {
            Field::Species | Field::State => format!("set {}", field.label()),
            Field::UserLocation | Field::DestinationName => {
                format!("set {} (web only)", field.label())
            }
        };
        Self {
            name,
            field,
            description,
        }
    }
}

#[async_trait]
impl Command for FieldCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn usage(&self) -> &str {
        "<text>"
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let shell = info.planner.shell();
        if !self.field.collected_in(shell) {
            println!("  ✗ the {shell} shell does not collect {}", self.field.key());
            return CommandResult::Handled;
        }
        info.planner.edit(self.field, args);
        CommandResult::Handled
    }
}
