use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

use crate::reply::Reply;

/// How a command was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStyle {
    /// Prefixed text message, e.g. `!hava durumu Ankara`
    Legacy,
    /// Platform-native slash command with typed options
    Structured,
}

/// Snapshot of the guild a command was sent from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuildInfo {
    pub member_count: u64,
}

/// Where replies for one invocation go
///
/// Implemented by the gateway for real traffic and by recording stubs in tests.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Send a reply immediately
    async fn reply(&self, reply: &Reply) -> Result<()>;

    /// Acknowledge receipt; the real reply follows via [`ReplyChannel::followup`]
    async fn defer(&self) -> Result<()>;

    /// Send the reply after a deferral
    async fn followup(&self, reply: &Reply) -> Result<()>;

    /// The guild the invocation came from, read at call time
    fn guild(&self) -> Option<GuildInfo>;

    /// Round-trip latency to the gateway, if known
    async fn latency(&self) -> Option<Duration>;
}

/// One inbound command invocation, normalized from either invocation style
pub struct CommandRequest {
    pub command_name: String,
    pub raw_arguments: Vec<String>,
    pub invocation_style: InvocationStyle,
    reply_channel: Arc<dyn ReplyChannel>,
    deferred: AtomicBool,
}

impl CommandRequest {
    /// Create a new request
    ///
    /// # Arguments
    /// * `command_name` - Name of the invoked command, as typed
    /// * `raw_arguments` - Arguments in order
    /// * `invocation_style` - Legacy or structured
    /// * `reply_channel` - Channel used to answer this invocation
    pub fn new<S: Into<String>>(
        command_name: S,
        raw_arguments: Vec<String>,
        invocation_style: InvocationStyle,
        reply_channel: Arc<dyn ReplyChannel>,
    ) -> Self {
        CommandRequest {
            command_name: command_name.into(),
            raw_arguments,
            invocation_style,
            reply_channel,
            deferred: AtomicBool::new(false),
        }
    }

    pub fn guild(&self) -> Option<GuildInfo> {
        self.reply_channel.guild()
    }

    pub async fn latency(&self) -> Option<Duration> {
        self.reply_channel.latency().await
    }

    /// Acknowledge a structured invocation before slow work
    ///
    /// Legacy invocations have no reply window, so this is a no-op for them.
    /// Deferring twice is also a no-op.
    pub async fn acknowledge(&self) -> Result<()> {
        if self.invocation_style != InvocationStyle::Structured {
            return Ok(());
        }
        if self.is_deferred() {
            return Ok(());
        }

        debug!("Deferring reply for /{}", self.command_name);
        self.reply_channel.defer().await?;
        self.deferred.store(true, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred.load(Ordering::SeqCst)
    }

    /// Send the final reply through whichever path the invocation requires
    pub async fn send(&self, reply: &Reply) -> Result<()> {
        if self.is_deferred() {
            self.reply_channel.followup(reply).await
        } else {
            self.reply_channel.reply(reply).await
        }
    }
}

impl fmt::Debug for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRequest")
            .field("command_name", &self.command_name)
            .field("raw_arguments", &self.raw_arguments)
            .field("invocation_style", &self.invocation_style)
            .field("deferred", &self.is_deferred())
            .finish()
    }
}
