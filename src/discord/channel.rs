use anyhow::Result;
use async_trait::async_trait;
use serenity::all::{
    ChannelId, CommandInteraction, Context, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, GuildId, Message, ShardManager,
};
use serenity::prelude::TypeMapKey;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::commands::{GuildInfo, ReplyChannel};
use crate::reply::{Reply, ReplyPayload};

/// Client data key under which the shard manager is stored, for latency lookups
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// Convert a reply payload into a serenity embed
pub fn build_embed(payload: &ReplyPayload) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(&payload.title)
        .color(payload.color);
    for field in &payload.fields {
        builder = builder.field(&field.label, &field.value, field.inline);
    }
    if let Some(ref footer) = payload.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }
    builder
}

/// Member count of a guild as currently held in the cache
fn cached_guild(ctx: &Context, guild_id: Option<GuildId>) -> Option<GuildInfo> {
    let guild = guild_id?.to_guild_cached(&ctx.cache)?;
    Some(GuildInfo {
        member_count: guild.member_count,
    })
}

/// Latency of the shard that delivered the event
async fn shard_latency(ctx: &Context) -> Option<Duration> {
    let data = ctx.data.read().await;
    let shard_manager = data.get::<ShardManagerContainer>()?;
    let runners = shard_manager.runners.lock().await;
    runners.get(&ctx.shard_id)?.latency
}

/// Replies to a prefixed text command in the channel it was sent to
pub struct MessageChannel {
    ctx: Context,
    channel_id: ChannelId,
    guild_id: Option<GuildId>,
}

impl MessageChannel {
    pub fn new(ctx: Context, msg: &Message) -> Self {
        MessageChannel {
            ctx,
            channel_id: msg.channel_id,
            guild_id: msg.guild_id,
        }
    }
}

#[async_trait]
impl ReplyChannel for MessageChannel {
    async fn reply(&self, reply: &Reply) -> Result<()> {
        match reply {
            Reply::Text(text) => {
                self.channel_id.say(&self.ctx.http, text).await?;
            }
            Reply::Rich(payload) => {
                let message = CreateMessage::new().embed(build_embed(payload));
                self.channel_id.send_message(&self.ctx.http, message).await?;
            }
        }
        info!("Sent reply to channel {}", self.channel_id);
        Ok(())
    }

    async fn defer(&self) -> Result<()> {
        // Text channels have no acknowledgement window
        Ok(())
    }

    async fn followup(&self, reply: &Reply) -> Result<()> {
        self.reply(reply).await
    }

    fn guild(&self) -> Option<GuildInfo> {
        cached_guild(&self.ctx, self.guild_id)
    }

    async fn latency(&self) -> Option<Duration> {
        shard_latency(&self.ctx).await
    }
}

/// Replies to a slash-command interaction
pub struct InteractionChannel {
    ctx: Context,
    command: CommandInteraction,
}

impl InteractionChannel {
    pub fn new(ctx: Context, command: CommandInteraction) -> Self {
        InteractionChannel { ctx, command }
    }
}

#[async_trait]
impl ReplyChannel for InteractionChannel {
    async fn reply(&self, reply: &Reply) -> Result<()> {
        let message = match reply {
            Reply::Text(text) => CreateInteractionResponseMessage::new().content(text),
            Reply::Rich(payload) => CreateInteractionResponseMessage::new().embed(build_embed(payload)),
        };
        self.command
            .create_response(&self.ctx.http, CreateInteractionResponse::Message(message))
            .await?;
        info!("Responded to /{}", self.command.data.name);
        Ok(())
    }

    async fn defer(&self) -> Result<()> {
        self.command.defer(&self.ctx.http).await?;
        Ok(())
    }

    async fn followup(&self, reply: &Reply) -> Result<()> {
        let followup = match reply {
            Reply::Text(text) => CreateInteractionResponseFollowup::new().content(text),
            Reply::Rich(payload) => CreateInteractionResponseFollowup::new().embed(build_embed(payload)),
        };
        self.command
            .create_followup(&self.ctx.http, followup)
            .await?;
        info!("Sent followup for /{}", self.command.data.name);
        Ok(())
    }

    fn guild(&self) -> Option<GuildInfo> {
        cached_guild(&self.ctx, self.command.guild_id)
    }

    async fn latency(&self) -> Option<Duration> {
        shard_latency(&self.ctx).await
    }
}
