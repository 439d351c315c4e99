use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct PlanCommand;

#[async_trait]
impl Command for PlanCommand {
    fn name(&self) -> &str {
        "/plan"
    }

    fn aliases(&self) -> &[&str] {
        &["/p"]
    }

    fn description(&self) -> &str {
        "send the form to the planner and show the reply (Ctrl+C cancels)"
    }

    async fn execute(&self, _args: &str, _info: &SessionInfo<'_>) -> CommandResult {
        CommandResult::Plan
    }
}
