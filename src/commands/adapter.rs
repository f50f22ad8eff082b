//! Normalizes both invocation styles into a [`CommandRequest`]
//!
//! Prefixed text lines are split on whitespace, with double-quoted runs kept
//! together; slash-command options are put in the order the command table
//! declares them.

use std::sync::Arc;

use crate::commands::{CommandRegistry, CommandRequest, InvocationStyle, ReplyChannel};

/// Strip the prefix from a chat line and split it into tokens
///
/// # Arguments
/// * `content` - The raw message text
/// * `prefix` - The command prefix (e.g., "!")
///
/// # Returns
/// The tokens after the prefix, or None if the line is not a command
pub fn split_prefixed(content: &str, prefix: &str) -> Option<Vec<String>> {
    let without_prefix = content.trim().strip_prefix(prefix)?;

    // The command name must follow the prefix directly
    if without_prefix.starts_with(char::is_whitespace) {
        return None;
    }

    let tokens = tokenize(without_prefix);
    if tokens.is_empty() {
        return None;
    }

    Some(tokens)
}

/// Split on whitespace, keeping a double-quoted run together as one token
///
/// A quote only opens at the start of a token and is removed from the result.
/// Inside a quoted run `\"` is a literal quote; an unclosed quote runs to the
/// end of the line.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            while let Some(c) = chars.next() {
                match c {
                    '\\' if chars.peek() == Some(&'"') => {
                        chars.next();
                        token.push('"');
                    }
                    '"' => break,
                    _ => token.push(c),
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    tokens
}

/// Build a request from legacy tokens (prefix already stripped)
///
/// The first token is the command name, matched case-sensitively; the rest are
/// arguments in order.
pub fn from_legacy(tokens: Vec<String>, reply_channel: Arc<dyn ReplyChannel>) -> Option<CommandRequest> {
    let mut tokens = tokens.into_iter();
    let command_name = tokens.next()?;

    Some(CommandRequest::new(
        command_name,
        tokens.collect(),
        InvocationStyle::Legacy,
        reply_channel,
    ))
}

/// Build a request from a structured invocation
///
/// # Arguments
/// * `registry` - Command table, used for the declared option order
/// * `command_name` - The registered command name
/// * `arguments` - (option name, value) pairs as delivered by the gateway
/// * `reply_channel` - Channel used to answer the interaction
///
/// # Returns
/// A request whose arguments follow the declared option order; absent options are skipped
pub fn from_structured(
    registry: &CommandRegistry,
    command_name: &str,
    arguments: &[(String, String)],
    reply_channel: Arc<dyn ReplyChannel>,
) -> CommandRequest {
    let raw_arguments = registry
        .get_command(command_name, InvocationStyle::Structured)
        .map(|entry| {
            entry
                .options
                .iter()
                .filter_map(|option| {
                    arguments
                        .iter()
                        .find(|(name, _)| *name == option.name)
                        .map(|(_, value)| value.clone())
                })
                .collect()
        })
        .unwrap_or_default();

    CommandRequest::new(
        command_name,
        raw_arguments,
        InvocationStyle::Structured,
        reply_channel,
    )
}
