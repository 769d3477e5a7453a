//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::http::{HttpTransport, Transport};
use crate::list::ListOptions;
use crate::resources::notification::{self, NotificationFilter};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing to stdout
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match &self.cli.command {
            Commands::Config => self.print_config(&config, &mut out),
            Commands::Notifications { .. } => {
                let transport: Arc<dyn Transport> =
                    Arc::new(HttpTransport::with_config(config.transport_config())?);
                self.run_with(&config, transport, &mut out).await
            }
        }
    }

    /// Run the CLI command against an explicit transport and writer
    pub async fn run_with<W: Write>(
        &self,
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        out: &mut W,
    ) -> Result<()> {
        match &self.cli.command {
            Commands::Notifications {
                account_sid,
                call_sid,
                log,
                message_date,
                page_size,
                limit,
            } => {
                let account_sid = account_sid
                    .as_deref()
                    .or(config.account_sid.as_deref())
                    .ok_or_else(|| anyhow!("no account SID: pass --account-sid or configure one"))?;

                let filter = NotificationFilter {
                    log: *log,
                    message_date: message_date.clone(),
                };
                let options = ListOptions {
                    page_size: *page_size,
                    limit: *limit,
                };

                let operation = notification::list(account_sid, call_sid, filter, options);
                let mut records = operation
                    .execute(transport)
                    .await
                    .with_context(|| format!("listing notifications for call {call_sid}"))?;

                while let Some(record) = records.next().await {
                    let record = record
                        .with_context(|| format!("listing notifications for call {call_sid}"))?;
                    self.emit(&record, out)?;
                }

                info!(
                    "Listed {} notifications across {} pages",
                    records.yielded(),
                    records.pages_fetched()
                );
                Ok(())
            }
            Commands::Config => self.print_config(config, out),
        }
    }

    /// Build the effective configuration: file, then environment, then flags
    pub fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ClientConfig::default(),
        };
        let mut config = config.with_env();
        if let Some(ref url) = self.cli.base_url {
            config.base_url.clone_from(url);
        }
        config.validate()?;
        Ok(config)
    }

    fn print_config<W: Write>(&self, config: &ClientConfig, out: &mut W) -> Result<()> {
        let mut shown = config.clone();
        if shown.auth_token.is_some() {
            shown.auth_token = Some("***".to_string());
        }
        self.emit(&shown, out)
    }

    fn emit<T: Serialize, W: Write>(&self, value: &T, out: &mut W) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => serde_json::to_writer(&mut *out, value)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, value)?,
        }
        writeln!(out)?;
        Ok(())
    }
}
