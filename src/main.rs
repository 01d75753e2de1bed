use clap::Parser;

use venuetrack::cli::Cli;
use venuetrack::runtime::modes::{self, Mode};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    venuetrack::config::init_config_from(&cli.config);

    let config = venuetrack::config::get_config();
    // guard 需要存活到进程结束，否则非阻塞日志会丢失
    let _log_guard = venuetrack::system::init_logging(&config);

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => modes::run_server().await,
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
