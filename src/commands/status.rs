use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct StatusCommand;

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &str {
        "/status"
    }

    fn description(&self) -> &str {
        "show shell, endpoint, and overlap policy"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let planner = info.planner;
        println!("  shell     {}", planner.shell());
        println!("  endpoint  {}", planner.endpoint());
        println!("  overlap   {}", planner.policy());
        println!("  requests  {}", planner.submissions());
        println!("  settings  {}", info.settings);
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{test_info, test_planner};
    use crate::trip::Shell;

    #[tokio::test]
    async fn returns_handled() {
        let planner = test_planner(Shell::Mobile);
        assert_eq!(
            StatusCommand.execute("", &test_info(&planner)).await,
            CommandResult::Handled
        );
    }

    #[test]
    fn metadata() {
        assert_eq!(StatusCommand.name(), "/status");
        assert!(StatusCommand.aliases().is_empty());
    }
}
