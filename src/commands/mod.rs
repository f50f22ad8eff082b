mod adapter;
mod basic;
mod error;
mod handler;
mod request;
mod weather;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::reply::Reply;
use crate::weather::WeatherProvider;

pub use adapter::{from_legacy, from_structured, split_prefixed};
pub use basic::{PingCommand, ServerInfoCommand};
pub use error::{CommandError, Validation};
pub use handler::CommandHandler;
pub use request::{CommandRequest, GuildInfo, InvocationStyle, ReplyChannel};
pub use weather::WeatherCommand;

/// Trait for defining chat commands
#[async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    ///
    /// # Arguments
    /// * `request` - The normalized invocation, including its arguments
    ///
    /// # Returns
    /// The reply to send, or the classified failure
    async fn execute(&self, request: &CommandRequest) -> Result<Reply, CommandError>;

    /// Get the help text for this command
    fn help(&self) -> &str;
}

/// A named, typed argument of a structured command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// One row of the command table: a name reachable through one invocation style
pub struct CommandEntry {
    pub name: String,
    pub invocation_style: InvocationStyle,
    /// Declared options, in order; only meaningful for structured entries
    pub options: Vec<CommandOption>,
    pub command: Arc<dyn Command>,
}

impl CommandEntry {
    pub fn legacy<S: Into<String>>(name: S, command: Arc<dyn Command>) -> Self {
        CommandEntry {
            name: name.into(),
            invocation_style: InvocationStyle::Legacy,
            options: Vec::new(),
            command,
        }
    }

    pub fn structured<S: Into<String>>(name: S, command: Arc<dyn Command>) -> Self {
        CommandEntry {
            name: name.into(),
            invocation_style: InvocationStyle::Structured,
            options: Vec::new(),
            command,
        }
    }

    /// Declare a string option (structured entries)
    pub fn option<N: Into<String>, D: Into<String>>(
        mut self,
        name: N,
        description: D,
        required: bool,
    ) -> Self {
        self.options.push(CommandOption {
            name: name.into(),
            description: description.into(),
            required,
        });
        self
    }

    pub fn required_options(&self) -> usize {
        self.options.iter().filter(|option| option.required).count()
    }

    pub fn description(&self) -> &str {
        self.command.help()
    }
}

/// A registry of available commands
///
/// A command reachable through both styles appears as two entries that share
/// one handler.
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Create a new empty command registry
    pub fn new() -> Self {
        CommandRegistry {
            entries: Vec::new(),
        }
    }

    /// Build the bot's command table
    ///
    /// # Arguments
    /// * `config` - Process configuration (latency toggle)
    /// * `weather` - Weather provider shared by both weather entries
    ///
    /// # Returns
    /// The populated registry
    pub fn standard(config: &Config, weather: Arc<dyn WeatherProvider>) -> Self {
        let server_info: Arc<dyn Command> = Arc::new(ServerInfoCommand);
        let weather: Arc<dyn Command> = Arc::new(WeatherCommand::new(weather));

        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::legacy("ping", Arc::new(PingCommand::new(false))));
        registry.register(CommandEntry::structured(
            "ping",
            Arc::new(PingCommand::new(config.ping_reports_latency)),
        ));
        registry.register(CommandEntry::legacy("sunucu", server_info.clone()));
        registry.register(CommandEntry::structured("sunucu", server_info));
        registry.register(CommandEntry::legacy("hava", weather.clone()));
        registry.register(
            CommandEntry::structured("hava-durumu", weather).option("sehir", "Şehir adı", true),
        );
        registry
    }

    /// Register a command entry, replacing any entry with the same name and style
    pub fn register(&mut self, entry: CommandEntry) {
        self.entries
            .retain(|e| !(e.name == entry.name && e.invocation_style == entry.invocation_style));
        self.entries.push(entry);
    }

    /// Check if a command exists for the given style
    #[cfg(test)]
    pub fn has_command<S: AsRef<str>>(&self, name: S, style: InvocationStyle) -> bool {
        self.get_command(name, style).is_some()
    }

    /// Get a command entry from the registry
    ///
    /// # Arguments
    /// * `name` - The name of the command to get
    /// * `style` - The invocation style it was triggered with
    ///
    /// # Returns
    /// Some(entry) if the command exists for that style, None otherwise
    pub fn get_command<S: AsRef<str>>(&self, name: S, style: InvocationStyle) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name.as_ref() && entry.invocation_style == style)
    }

    /// All entries for one style, in registration order
    pub fn entries(&self, style: InvocationStyle) -> impl Iterator<Item = &CommandEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.invocation_style == style)
    }

    /// Get all command names for one style
    pub fn get_command_names(&self, style: InvocationStyle) -> Vec<String> {
        self.entries(style).map(|entry| entry.name.clone()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
