use anyhow::{Context as _, Result};
use serenity::all::{
    Client, Command as ApplicationCommand, CommandDataOptionValue, CommandInteraction,
    CommandOptionType, Context, CreateCommand, CreateCommandOption, EventHandler, GatewayIntents,
    Interaction, Message, Ready,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::commands::{
    CommandHandler, CommandRegistry, InvocationStyle, from_legacy, from_structured, split_prefixed,
};
use crate::config::Config;
use crate::discord::channel::{InteractionChannel, MessageChannel, ShardManagerContainer};

/// Gateway event handler
pub struct Handler {
    commands: Arc<CommandHandler>,
    /// Whether prefixed text commands are processed
    prefix_commands: bool,
}

impl Handler {
    pub fn new(commands: Arc<CommandHandler>, prefix_commands: bool) -> Self {
        Handler {
            commands,
            prefix_commands,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let prefix = self.commands.prefix();
        info!("Logged in as {}", ready.user.name);
        info!("Active in {} guilds", ready.guilds.len());
        info!(
            "Prefix commands: {}",
            self.commands
                .registry()
                .get_command_names(InvocationStyle::Legacy)
                .iter()
                .map(|name| format!("{}{}", prefix, name))
                .collect::<Vec<_>>()
                .join(", ")
        );
        info!(
            "Slash commands: {}",
            self.commands
                .registry()
                .get_command_names(InvocationStyle::Structured)
                .iter()
                .map(|name| format!("/{}", name))
                .collect::<Vec<_>>()
                .join(", ")
        );

        if self.prefix_commands {
            info!("Message Content intent enabled, prefix commands will work");
        } else {
            warn!("Message Content intent disabled, only slash commands will work");
            warn!("Set ENABLE_PREFIX_COMMANDS=true and enable the intent in the Developer Portal");
        }

        let definitions = application_commands(self.commands.registry());
        match ApplicationCommand::set_global_commands(&ctx.http, definitions).await {
            Ok(synced) => info!("Synced {} slash commands", synced.len()),
            Err(e) => error!("Failed to sync slash commands: {}", e),
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || !self.prefix_commands {
            return;
        }

        let Some(tokens) = split_prefixed(&msg.content, self.commands.prefix()) else {
            return;
        };

        info!("[CHAT] {}: {}", msg.author.name, msg.content);

        let channel = Arc::new(MessageChannel::new(ctx, &msg));
        if let Some(request) = from_legacy(tokens, channel) {
            if let Err(e) = self.commands.handle(request).await {
                error!("Error handling command: {}", e);
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            debug!("Ignoring non-command interaction");
            return;
        };

        info!("Received command: /{}", command.data.name);

        let name = command.data.name.clone();
        let arguments = string_options(&command);
        let channel = Arc::new(InteractionChannel::new(ctx, command));
        let request = from_structured(self.commands.registry(), &name, &arguments, channel);

        if let Err(e) = self.commands.handle(request).await {
            error!("Error handling /{}: {}", name, e);
        }
    }
}

/// Collect the string options of a slash command as (name, value) pairs
fn string_options(command: &CommandInteraction) -> Vec<(String, String)> {
    command
        .data
        .options
        .iter()
        .filter_map(|option| match &option.value {
            CommandDataOptionValue::String(value) => Some((option.name.clone(), value.clone())),
            _ => None,
        })
        .collect()
}

/// Slash-command definitions for every structured entry of the table
pub fn application_commands(registry: &CommandRegistry) -> Vec<CreateCommand> {
    registry
        .entries(InvocationStyle::Structured)
        .map(|entry| {
            entry.options.iter().fold(
                CreateCommand::new(&entry.name).description(entry.description()),
                |command, option| {
                    command.add_option(
                        CreateCommandOption::new(
                            CommandOptionType::String,
                            &option.name,
                            &option.description,
                        )
                        .required(option.required),
                    )
                },
            )
        })
        .collect()
}

/// Gateway intents for the configured feature set
pub fn intents(config: &Config) -> GatewayIntents {
    let mut intents = GatewayIntents::GUILDS;
    if config.enable_prefix_commands {
        intents |= GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;
    }
    intents
}

/// Connect to the gateway and process events until Ctrl+C
///
/// # Arguments
/// * `config` - The process configuration
/// * `commands` - The command handler shared by all events
///
/// # Returns
/// An error if the client cannot be built or the gateway connection fails
pub async fn run(config: &Config, commands: Arc<CommandHandler>) -> Result<()> {
    let handler = Handler::new(commands, config.enable_prefix_commands);

    let mut client = Client::builder(&config.discord_token, intents(config))
        .event_handler(handler)
        .await
        .context("Failed to create Discord client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
    }

    let shard_manager = client.shard_manager.clone();

    info!("Connecting to Discord...");
    tokio::select! {
        result = client.start() => {
            result.context("Invalid bot token or gateway connection failure")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
            shard_manager.shutdown_all().await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{StubWeatherProvider, create_test_config};

    #[test]
    fn test_application_commands() {
        let config = create_test_config();
        let registry = CommandRegistry::standard(&config, Arc::new(StubWeatherProvider::not_configured()));

        let definitions: Vec<serde_json::Value> = application_commands(&registry)
            .into_iter()
            .map(|command| serde_json::to_value(command).unwrap())
            .collect();

        let names: Vec<&str> = definitions
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["ping", "sunucu", "hava-durumu"]);

        assert_eq!(
            definitions[2]["description"],
            "Şehir için hava durumu bilgisi getirir"
        );
        assert_eq!(definitions[2]["options"][0]["name"], "sehir");
        assert_eq!(definitions[2]["options"][0]["required"], true);
    }

    #[test]
    fn test_intents() {
        let mut config = create_test_config();

        config.enable_prefix_commands = false;
        let slash_only = intents(&config);
        assert!(slash_only.contains(GatewayIntents::GUILDS));
        assert!(!slash_only.contains(GatewayIntents::MESSAGE_CONTENT));

        config.enable_prefix_commands = true;
        let with_prefix = intents(&config);
        assert!(with_prefix.contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(with_prefix.contains(GatewayIntents::GUILD_MESSAGES));
    }
}
