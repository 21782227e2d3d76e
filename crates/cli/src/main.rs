use anyhow::Context;
use bookstore_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Command-line entrypoint for the bookstore service
#[derive(Debug, Parser)]
#[command(name = "bookstore-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Interface to bind, overriding the configured host
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overriding the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the effective settings as JSON
    Settings,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load bookstore settings")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            bookstore_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                address = %settings.bind_address(),
                "bookstore CLI serving"
            );

            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(bookstore_app::run(settings))
        }
        Command::Settings => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["bookstore-cli", "serve", "--port", "9090"]).unwrap();
        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9090));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
