use async_trait::async_trait;

use crate::commands::{Command, CommandError, CommandRequest};
use crate::reply::Reply;

/// A simple ping command that responds with "Pong!"
pub struct PingCommand {
    /// Append the gateway latency when the gateway reports one
    report_latency: bool,
}

impl PingCommand {
    /// Create a new ping command
    ///
    /// # Arguments
    /// * `report_latency` - Whether to append the measured gateway latency
    pub fn new(report_latency: bool) -> Self {
        PingCommand { report_latency }
    }
}

#[async_trait]
impl Command for PingCommand {
    async fn execute(&self, request: &CommandRequest) -> Result<Reply, CommandError> {
        if self.report_latency {
            if let Some(latency) = request.latency().await {
                return Ok(Reply::text(format!(
                    "Pong! 🏓 Gecikme: {} ms",
                    latency.as_millis()
                )));
            }
        }

        Ok(Reply::text("Pong!"))
    }

    fn help(&self) -> &str {
        "Bot'un yanıt verme süresini test eder"
    }
}

/// Shows how many members the current guild has
pub struct ServerInfoCommand;

#[async_trait]
impl Command for ServerInfoCommand {
    async fn execute(&self, request: &CommandRequest) -> Result<Reply, CommandError> {
        let guild = request.guild().ok_or(CommandError::GuildRequired)?;

        Ok(Reply::text(format!(
            "Bu sunucuda **{}** üye bulunuyor.",
            guild.member_count
        )))
    }

    fn help(&self) -> &str {
        "Sunucu bilgilerini gösterir"
    }
}
