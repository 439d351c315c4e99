use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

/// Placeholder so `/help` shows up in the registry. The registry prints
/// the help text itself since only it knows every command.
pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "/help"
    }

    fn aliases(&self) -> &[&str] {
        &["/h", "/?"]
    }

    fn description(&self) -> &str {
        "show this help"
    }

    async fn execute(&self, _args: &str, _info: &SessionInfo<'_>) -> CommandResult {
        CommandResult::Handled
    }
}
