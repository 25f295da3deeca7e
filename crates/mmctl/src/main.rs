// # mmctl - Micetro command-line client
//
// A THIN integration layer over `mmws-core` and `mmws-client`:
// 1. Parse the command line
// 2. Read connection settings from environment variables
// 3. Initialize logging and the runtime
// 4. Connect (validate + probe) and run one object operation
//
// No protocol logic lives here.
//
// ## Configuration
//
// - `MM_ENDPOINT`: Server URL, e.g. `https://micetro.example.com`
// - `MM_USERNAME`: User for basic authentication
// - `MM_PASSWORD`: Password for basic authentication
// - `MM_TLS_VERIFY`: Verify the server certificate (default `true`)
// - `MM_TIMEOUT`: Per-request timeout in seconds (default `30`)
// - `MM_LOG_LEVEL`: trace, debug, info, warn or error (default `info`)
//
// ## Example
//
// ```bash
// export MM_ENDPOINT=https://micetro.example.com
// export MM_USERNAME=apiuser
// export MM_PASSWORD=...
//
// mmctl record get dns1.example.com.::www.example.com.:A
// mmctl zone find example.com. dns1.example.com.
// ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use mmws_client::MmClient;
use mmws_core::config::ConnectionConfig;
use mmws_core::traits::{ObjectOperations, Transport};
use mmws_core::{DhcpReservations, DnsRecords, DnsZones};
use serde::Serialize;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes
///
/// - 0: Success
/// - 1: Configuration or startup error (including an unreachable server)
/// - 2: Runtime error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MmctlExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<MmctlExitCode> for ExitCode {
    fn from(code: MmctlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Parser)]
#[command(name = "mmctl", version, about = "Manage Micetro DNS and DHCP objects")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the server is reachable with the configured settings
    Probe,
    /// DNS records
    #[command(subcommand)]
    Record(RecordCommand),
    /// DNS zones
    #[command(subcommand)]
    Zone(ZoneCommand),
    /// DHCP reservations
    #[command(subcommand)]
    Reservation(ReservationCommand),
}

#[derive(Debug, Subcommand)]
enum RecordCommand {
    /// Show a record by reference or import key (server:view:fqdn:type)
    Get { key: String },
    /// Force-delete a record
    Delete { reference: String },
}

#[derive(Debug, Subcommand)]
enum ZoneCommand {
    /// Show the single zone with this name on this authority
    Find { name: String, authority: String },
}

#[derive(Debug, Subcommand)]
enum ReservationCommand {
    /// Show a reservation by name or reference
    Get { name: String },
}

/// Settings read from the environment
struct Settings {
    connection: ConnectionConfig,
    log_level: Level,
}

impl Settings {
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut connection = ConnectionConfig::new(
            lookup("MM_ENDPOINT").unwrap_or_default(),
            lookup("MM_USERNAME").unwrap_or_default(),
            lookup("MM_PASSWORD").unwrap_or_default(),
        );

        if let Some(value) = lookup("MM_TLS_VERIFY") {
            connection = connection.with_tls_verify(parse_bool("MM_TLS_VERIFY", &value)?);
        }

        if let Some(value) = lookup("MM_TIMEOUT") {
            let timeout: u64 = value
                .parse()
                .map_err(|_| anyhow::anyhow!("MM_TIMEOUT must be a number of seconds. Got: {value}"))?;
            if timeout == 0 {
                anyhow::bail!("MM_TIMEOUT must be at least 1 second");
            }
            connection = connection.with_timeout_secs(timeout);
        }

        let log_level = lookup("MM_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_level = match log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => anyhow::bail!(
                "MM_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                log_level
            ),
        };

        Ok(Self {
            connection,
            log_level,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{name} must be true or false. Got: {value}"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return MmctlExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return MmctlExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return MmctlExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run(cli.command, settings.connection).await {
            Ok(()) => MmctlExitCode::Success,
            Err(e) => {
                error!("{:#}", e);
                exit_code_for(&e)
            }
        }
    });

    code.into()
}

/// Startup failures (bad settings, unreachable server) are configuration
/// errors; everything after a successful connect is a runtime error
fn exit_code_for(err: &anyhow::Error) -> MmctlExitCode {
    match err.downcast_ref::<mmws_core::Error>() {
        Some(mmws_core::Error::Config(_) | mmws_core::Error::Connectivity { .. }) => {
            MmctlExitCode::ConfigError
        }
        _ => MmctlExitCode::RuntimeError,
    }
}

async fn run(command: Command, config: ConnectionConfig) -> Result<()> {
    let client = MmClient::connect(config).await?;
    info!("Connected to {}", client.base_url());

    let transport: Arc<dyn Transport> = Arc::new(client);

    match command {
        Command::Probe => {
            println!("ok");
        }
        Command::Record(RecordCommand::Get { key }) => {
            let record = DnsRecords::new(transport).import(&key).await?;
            print_json(&record)?;
        }
        Command::Record(RecordCommand::Delete { reference }) => {
            DnsRecords::new(transport).delete(&reference).await?;
        }
        Command::Zone(ZoneCommand::Find { name, authority }) => {
            let zone = DnsZones::new(transport)
                .find_by_name(&name, &authority)
                .await?;
            print_json(&zone)?;
        }
        Command::Reservation(ReservationCommand::Get { name }) => {
            let Some(reservation) = DhcpReservations::new(transport).read(&name).await? else {
                anyhow::bail!("DHCP reservation {} not found", name);
            };
            print_json(&reservation)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
