//! Discord gateway integration
//!
//! Binds the command layer to serenity: gateway events become [`CommandRequest`]s
//! and replies go back through message or interaction channels.
//!
//! [`CommandRequest`]: crate::commands::CommandRequest

mod channel;
mod handler;

pub use handler::run;
