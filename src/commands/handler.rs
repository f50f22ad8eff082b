use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::commands::{CommandError, CommandRegistry, CommandRequest, InvocationStyle, Validation};
use crate::reply::Reply;

/// Routes normalized requests to their commands and answers every one of them
pub struct CommandHandler {
    registry: Arc<CommandRegistry>,
    prefix: String,
}

impl CommandHandler {
    /// Create a new command handler
    ///
    /// # Arguments
    /// * `registry` - The table of available commands
    /// * `prefix` - The legacy command prefix (e.g., "!"), used in usage hints
    ///
    /// # Returns
    /// A new CommandHandler instance
    pub fn new(registry: Arc<CommandRegistry>, prefix: String) -> Self {
        CommandHandler { registry, prefix }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Run a request and produce its reply
    ///
    /// Failures never escape: each one is logged and turned into its fixed reply text.
    pub async fn dispatch(&self, request: &CommandRequest) -> Reply {
        match self.execute(request).await {
            Ok(reply) => reply,
            Err(e) => {
                self.log_failure(request, &e);
                Reply::Text(e.user_message(&self.prefix))
            }
        }
    }

    /// Dispatch a request and send the reply
    ///
    /// # Returns
    /// An error only if the reply could not be delivered
    pub async fn handle(&self, request: CommandRequest) -> Result<()> {
        let reply = self.dispatch(&request).await;
        request.send(&reply).await
    }

    async fn execute(&self, request: &CommandRequest) -> Result<Reply, CommandError> {
        let entry = self
            .registry
            .get_command(&request.command_name, request.invocation_style)
            .ok_or_else(|| CommandError::UnknownCommand(request.command_name.clone()))?;

        if request.invocation_style == InvocationStyle::Structured
            && request.raw_arguments.len() < entry.required_options()
        {
            return Err(CommandError::ValidationFailed(Validation::MissingParameter));
        }

        info!(
            "Executing command: {} ({:?})",
            request.command_name, request.invocation_style
        );
        entry.command.execute(request).await
    }

    fn log_failure(&self, request: &CommandRequest, error: &CommandError) {
        match error {
            CommandError::ProviderError(_) | CommandError::NetworkError | CommandError::Unexpected(_) => {
                error!("Command {} failed: {}", request.command_name, error);
            }
            CommandError::ConfigMissing | CommandError::UnknownCommand(_) => {
                warn!("Command {} rejected: {}", request.command_name, error);
            }
            _ => {
                debug!("Command {} rejected: {}", request.command_name, error);
            }
        }
    }
}
