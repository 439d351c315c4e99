use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct ResultCommand;

#[async_trait]
impl Command for ResultCommand {
    fn name(&self) -> &str {
        "/result"
    }

    fn description(&self) -> &str {
        "show the last reply again"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let rendered = info.planner.render();
        if rendered.is_empty() {
            println!("  (no result yet, try /plan)");
        } else {
            println!("{rendered}");
        }
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{test_info, test_planner};
    use crate::trip::Shell;

    #[tokio::test]
    async fn handled_without_result() {
        let planner = test_planner(Shell::Web);
        assert_eq!(
            ResultCommand.execute("", &test_info(&planner)).await,
            CommandResult::Handled
        );
    }
}
