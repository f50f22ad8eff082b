use clap::{Parser, Subcommand};

/// A Discord bot for ping, member-count and weather commands
#[derive(Parser, Debug)]
#[command(name = "hava_bot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A Discord bot for ping, member-count and weather commands", long_about = None)]
pub struct Cli {
    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// The prefix for text commands
    #[arg(short, long, default_value = "!")]
    pub prefix: String,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the bot
    Start {
        /// Port for the health check server (overrides HEALTH_PORT)
        #[arg(long)]
        health_port: Option<u16>,
    },

    /// Generate a sample .env file
    GenEnv {
        /// Path to output the sample .env file
        #[arg(default_value = ".env.example")]
        path: String,
    },
}
