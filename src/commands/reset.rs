use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct ResetCommand;

#[async_trait]
impl Command for ResetCommand {
    fn name(&self) -> &str {
        "/reset"
    }

    fn description(&self) -> &str {
        "clear every field and the last reply"
    }

    async fn execute(&self, _args: &str, _info: &SessionInfo<'_>) -> CommandResult {
        CommandResult::Reset
    }
}
