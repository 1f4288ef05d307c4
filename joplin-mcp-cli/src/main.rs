use joplin_mcp::{resolve_config, ConfigSources};
use joplin_mcp_cli::cli::{Cli, Commands};
use joplin_mcp_cli::config::run_config_command;
use joplin_mcp_cli::exit_codes::EXIT_ERROR;
use joplin_mcp_cli::logging;
use joplin_mcp_cli::serve::run_server;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let command = cli.command();

    // Colors only make sense for a human watching stderr
    let ansi = command != Commands::Serve && Cli::should_use_color();
    if let Err(e) = logging::init(cli.log_level(), cli.log_file.as_deref(), ansi) {
        eprintln!("{e:#}");
        process::exit(EXIT_ERROR);
    }

    let resolved = resolve_config(&ConfigSources::from_environment(), &cli.overrides());

    let exit_code = match command {
        Commands::Serve => {
            resolved.log_diagnostics();
            run_server(resolved.config).await
        }
        Commands::Config => {
            let mut stdout = std::io::stdout().lock();
            match run_config_command(&resolved, &mut stdout) {
                Ok(code) => code,
                Err(e) => {
                    tracing::error!("Config error: {:#}", e);
                    EXIT_ERROR
                }
            }
        }
    };

    process::exit(exit_code);
}
