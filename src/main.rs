use anyhow::{Context, Result};
use customer_console::api::client::HttpTransport;
use customer_console::console::session::Session;
use customer_console::console::state::CustomerConsole;
use customer_console::core::config::Config;
use customer_console::core::tracing_init::init_tracing;
use std::env;
use std::path::PathBuf;
use tokio::io::{self, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{error, info};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    // Load and validate configuration
    let mut config = Config::from_file(&config_path)
        .context(format!(
            "Failed to load configuration from '{}'. \
            Copy config.example.toml to config.toml and point base_url at the customer service.",
            config_path.display()
        ))?;
    config.apply_env_override()?;

    init_tracing(&config.logging);

    // One request/response cycle at a time per operation class, no worker pool
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        base_url = %config.service.base_url,
        timeout_seconds = config.service.timeout_secs,
        log_level = %config.logging.level,
        "Customer console starting"
    );

    let transport = HttpTransport::new(&config.service)
        .context("Failed to create HTTP transport")?;
    let mut session = Session::new(CustomerConsole::new(transport));

    let mut stdout = io::stdout();
    stdout
        .write_all(
            format!(
                "Customer console for {}, type 'help' for commands\n",
                config.service.base_url
            )
            .as_bytes(),
        )
        .await
        .context("Failed to write banner")?;

    let stdin = BufReader::new(io::stdin());

    tokio::select! {
        result = session.run(stdin, &mut stdout) => {
            if let Err(e) = result {
                error!(error = %e, "Console session failed");
                return Err(e);
            }
        }
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => info!("Received Ctrl+C signal"),
                Err(e) => error!(error = %e, "Failed to listen for Ctrl+C"),
            }
        }
    }

    info!("Customer console shutting down");

    Ok(())
}
