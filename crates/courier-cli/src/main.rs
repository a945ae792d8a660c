use std::path::PathBuf;

use tracing::debug;

use courier_core::{SEND_COMMAND, UrlFetcher, send_command};
use courier_mailbox::{CommandMailbox, MailboxConfig};
use courier_observe::{LogConfig, LogLevel, init_logging};

mod args;

const LOG_LEVEL_ENV: &str = "COURIER_LOG";
const COMMAND_ROOT_ENV: &str = "COURIER_COMMAND_ROOT";
const DEFAULT_COMMAND_ROOT: &str = "/var/lib/courier/localcommands";

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) logger
    let cfg = LogConfig {
        level: log_level_from_env()?,
        ..Default::default()
    };
    init_logging(&cfg)?;
    debug!("logger initialized");

    // 2) command dispatch
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = tokens.split_first() else {
        anyhow::bail!("usage: courier {SEND_COMMAND} --content <json-or-url>");
    };
    if command != SEND_COMMAND {
        anyhow::bail!("unknown command {command:?}, expected {SEND_COMMAND}");
    }

    let (subcommands, parameters) = args::shape_args(rest);

    // 3) hand-off
    let mailbox = CommandMailbox::new(MailboxConfig::new(command_root_from_env()));
    let message = send_command(&subcommands, &parameters, &mailbox, &UrlFetcher).await?;

    // A rejected or timed-out document still reaches this line; only bad
    // input and load or mailbox failures exit non-zero.
    println!("{message}");
    Ok(())
}

fn log_level_from_env() -> anyhow::Result<LogLevel> {
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(raw) => Ok(LogLevel::new(raw)?),
        Err(_) => Ok(LogLevel::default()),
    }
}

fn command_root_from_env() -> PathBuf {
    std::env::var_os(COMMAND_ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COMMAND_ROOT))
}
