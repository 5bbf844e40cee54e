use clap::Parser;
use yougile_cli::{cli, commands, error, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);
    if let Err(e) = commands::dispatch(cli).await {
        error::display_error(&e);
        std::process::exit(1);
    }
}
