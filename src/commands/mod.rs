//! REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and help generation.

mod field;
mod form;
mod help;
mod plan;
mod quit;
mod reset;
mod result;
mod status;

use async_trait::async_trait;
use std::sync::Arc;

use crate::planner::Planner;
use crate::trip::Field;

/// Session state available to commands during execution.
pub struct SessionInfo<'a> {
    pub planner: &'a Planner,
    pub settings: &'a str,
}

/// What the REPL should do after a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Submit the form and show the result.
    Plan,
    /// Empty the form and drop the result.
    Reset,
    /// Exit the REPL.
    Quit,
}

/// A REPL command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/plan"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/p"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Argument hint shown in `/help`, e.g. `"<text>"`.
    fn usage(&self) -> &str {
        ""
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command. `args` is the rest of the line after the command
    /// name and one separating space, untrimmed.
    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(field::FieldCommand::new("/species", Field::Species)),
            Arc::new(field::FieldCommand::new("/state", Field::State)),
            Arc::new(field::FieldCommand::new("/from", Field::UserLocation)),
            Arc::new(field::FieldCommand::new("/to", Field::DestinationName)),
            Arc::new(form::FormCommand),
            Arc::new(plan::PlanCommand),
            Arc::new(result::ResultCommand),
            Arc::new(reset::ResetCommand),
            Arc::new(status::StatusCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, info: &SessionInfo<'_>) -> CommandResult {
        let (cmd, args) = split_command(input);

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help needs the registry to list all commands
                if command.name() == "/help" {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(args, info).await;
            }
        }

        if cmd.starts_with('/') {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.usage(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `"/species  big bass"` into `("/species", " big bass")`.
fn split_command(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(' ') {
        Some((cmd, args)) => (cmd, args),
        None => (input.trim_end(), ""),
    }
}

fn format_label(name: &str, usage: &str, aliases: &[&str]) -> String {
    let mut label = name.to_string();
    if !usage.is_empty() {
        label.push(' ');
        label.push_str(usage);
    }
    if !aliases.is_empty() {
        label.push_str(&format!(" ({})", aliases.join(", ")));
    }
    label
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use crate::planner::PlannerConfig;
    use crate::state::OverlapPolicy;
    use crate::trip::Shell;

    pub(crate) fn test_planner(shell: Shell) -> Planner {
        Planner::new(
            PlannerConfig {
                shell,
                endpoint: "http://localhost:3000/api/plan_trip".to_string(),
                policy: OverlapPolicy::LatestIssued,
            },
            Arc::new(MockTransport::new(vec![])),
        )
    }

    pub(crate) fn test_info(planner: &Planner) -> SessionInfo<'_> {
        SessionInfo {
            planner,
            settings: ":memory:",
        }
    }

    #[test]
    fn all_builtins_registered() {
        let reg = CommandRegistry::new();
        let names = reg.names();
        for name in [
            "/help", "/species", "/state", "/from", "/to", "/form", "/plan", "/result", "/reset",
            "/status", "/quit",
        ] {
            assert!(names.contains(&name), "missing: {name}");
        }
    }

    #[test]
    fn no_duplicate_triggers() {
        let reg = CommandRegistry::new();
        let triggers = reg.all_triggers();
        let mut seen = Vec::new();
        for t in &triggers {
            assert!(!seen.contains(t), "duplicate trigger: {t}");
            seen.push(t);
        }
    }

    #[test]
    fn help_text_includes_all_commands_and_aliases() {
        let reg = CommandRegistry::new();
        let text = reg.help_text();
        for name in reg.names() {
            assert!(text.contains(name), "help missing: {name}");
        }
        assert!(text.contains("/?"));
        assert!(text.contains("/p"));
        assert!(text.contains("/species <text>"));
    }

    #[test]
    fn split_keeps_argument_whitespace() {
        assert_eq!(split_command("/species  big bass "), ("/species", " big bass "));
        assert_eq!(split_command("  /plan  "), ("/plan", " "));
        assert_eq!(split_command("/plan"), ("/plan", ""));
        assert_eq!(split_command("/state "), ("/state", ""));
    }

    #[tokio::test]
    async fn field_command_edits_planner() {
        let planner = test_planner(Shell::Web);
        let reg = CommandRegistry::new();
        let result = reg.dispatch("/to Sebago Lake", &test_info(&planner)).await;
        assert_eq!(result, CommandResult::Handled);
        assert_eq!(planner.snapshot().form.destination_name, "Sebago Lake");
    }

    #[tokio::test]
    async fn plan_alias_requests_submission() {
        let planner = test_planner(Shell::Web);
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("/p", &test_info(&planner)).await,
            CommandResult::Plan
        );
    }

    #[tokio::test]
    async fn unknown_slash_command_is_handled() {
        let planner = test_planner(Shell::Web);
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("/foobar", &test_info(&planner)).await,
            CommandResult::Handled
        );
    }

    #[tokio::test]
    async fn non_command_passes_through() {
        let planner = test_planner(Shell::Web);
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("bass in maine", &test_info(&planner)).await,
            CommandResult::NotACommand
        );
    }

    #[tokio::test]
    async fn plugin_command_works() {
        struct PingCommand;

        #[async_trait]
        impl Command for PingCommand {
            fn name(&self) -> &str {
                "/ping"
            }
            fn description(&self) -> &str {
                "pong"
            }
            async fn execute(&self, _args: &str, _info: &SessionInfo<'_>) -> CommandResult {
                CommandResult::Handled
            }
        }

        let planner = test_planner(Shell::Web);
        let mut reg = CommandRegistry::new();
        reg.register(Arc::new(PingCommand));
        assert!(reg.names().contains(&"/ping"));
        assert_eq!(
            reg.dispatch("/ping", &test_info(&planner)).await,
            CommandResult::Handled
        );
    }

    #[test]
    fn format_label_variants() {
        assert_eq!(format_label("/form", "", &[]), "/form");
        assert_eq!(format_label("/help", "", &["/h", "/?"]), "/help (/h, /?)");
        assert_eq!(format_label("/state", "<text>", &[]), "/state <text>");
    }
}
