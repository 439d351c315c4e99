use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::trip::{Field, TripForm};

pub struct FormCommand;

/// One line per field the shell collects, empty values shown as `(empty)`.
pub(crate) fn form_lines(form: &TripForm, fields: impl Iterator<Item = Field>) -> Vec<String> {
    fields
        .map(|field| {
            let value = form.get(field);
            let shown = if value.is_empty() {
                "(empty)".to_string()
            } else {
                format!("{value:?}")
            };
            format!("  {:<18} {}", field.key(), shown)
        })
        .collect()
}

#[async_trait]
impl Command for FormCommand {
    fn name(&self) -> &str {
        "/form"
    }

    fn description(&self) -> &str {
        "show the current field values"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let shell = info.planner.shell();
        let snapshot = info.planner.snapshot();
        let fields = Field::ALL.into_iter().filter(|f| f.collected_in(shell));
        for line in form_lines(&snapshot.form, fields) {
            println!("{line}");
        }
        CommandResult::Handled
    }
}
