//! gateway-hooks - webhook and provider tooling for the proxy
//!
//! `check` validates a configuration file and prints the resulting routes;
//! `fire` sends one synthetic event through them.

#![allow(missing_docs)]

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use gateway_hooks::config::CONFIG_PATH_ENV;
use gateway_hooks::config::models::duration::format_duration;
use gateway_hooks::core::webhooks::{ClientData, EventData, ServerData};
use gateway_hooks::utils::logging::{LogFormat, init_logging};
use gateway_hooks::{Config, GatewayError, WebhookPlugin};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Gateway event webhooks
#[derive(Parser)]
#[command(name = "gateway-hooks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(long, short, env = CONFIG_PATH_ENV, global = true, default_value = "config/gateway-hooks.yml")]
    config: PathBuf,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print the webhook routes
    Check,

    /// Send one synthetic event to the webhooks of a gateway
    Fire {
        /// Gateway the event originates from
        #[arg(long, default_value = "default")]
        gateway: String,

        /// Server id the event targets
        #[arg(long)]
        server: String,

        /// Event type, e.g. PlayerJoin
        #[arg(long, default_value = "PlayerJoin")]
        event: String,

        /// Topics of the event; defaults to the event type
        #[arg(long = "topic")]
        topics: Vec<String>,

        /// Player name
        #[arg(long, default_value = "Steve")]
        username: String,

        /// Client edition
        #[arg(long, default_value = "java")]
        edition: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    if let Err(e) = init_logging(&cli.log_level, format) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_file(&cli.config)
        .await
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let plugin = WebhookPlugin::new();
    match plugin.load(config.raw()) {
        Ok(()) => {}
        Err(GatewayError::PluginDisabled(name)) => info!(plugin = %name, "plugin is disabled"),
        Err(e) => return Err(e).with_context(|| format!("activating {} plugin", plugin.name())),
    }

    match cli.command {
        Commands::Check => {
            print_routes(&plugin);
            let docker = &config.providers.docker;
            if docker.is_enabled() {
                println!(
                    "docker provider: {} network={} prefix={:?} watch={}",
                    docker.endpoint, docker.network, docker.label_prefix, docker.watch
                );
            } else {
                println!("docker provider: disabled");
            }
            Ok(())
        }
        Commands::Fire {
            gateway,
            server,
            event,
            topics,
            username,
            edition,
        } => {
            let topics = if topics.is_empty() {
                vec![event.clone()]
            } else {
                topics
            };
            let data = EventData {
                edition,
                gateway_id: gateway,
                conn: ClientData {
                    network: "tcp".to_string(),
                    local_addr: "0.0.0.0:25565".to_string(),
                    remote_addr: "127.0.0.1:50000".to_string(),
                    username,
                },
                server: ServerData {
                    server_id: server,
                    ..ServerData::default()
                },
                is_login_request: None,
            };

            info!(event = %event, gateway = %data.gateway_id, "firing synthetic event");
            let failures = plugin
                .router()
                .dispatch(&event, topics, Utc::now(), data)
                .await;

            for failure in &failures {
                eprintln!("webhook {}: {}", failure.webhook_id, failure.error);
            }
            if !failures.is_empty() {
                bail!("{} webhook(s) failed", failures.len());
            }
            Ok(())
        }
    }
}

fn print_routes(plugin: &WebhookPlugin) {
    let routes = plugin.router().snapshot();
    let mut gateways: Vec<_> = routes.keys().collect();
    gateways.sort();

    if gateways.is_empty() {
        println!("no webhook routes");
    }
    for gateway in gateways {
        println!("gateway {}", gateway);
        for webhook in &routes[gateway] {
            println!(
                "  {} -> {} format={:?} timeout={} events={:?} servers={:?}",
                webhook.id,
                webhook.url,
                webhook.formatter.kind(),
                format_duration(webhook.dial_timeout),
                webhook.allowed_topics,
                webhook.allowed_servers
            );
        }
    }
}
