//! Roster Warp Service Binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use warp::Filter;

use roster_handler::api;
use roster_handler::config::Settings;
use roster_handler::context::RosterContext;
use roster_handler::logging;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

/// Command line arguments for the roster server.
#[derive(Debug, Parser)]
#[clap(name = "Roster server")]
struct ServerArgs {
    /// Optional path to the configuration file. Without it the bundled
    /// defaults are used, overridden by `ROSTER_` environment variables.
    #[clap(short = 'c', long, required = false)]
    config: Option<PathBuf>,

    /// Overrides the configured log output format.
    #[clap(short = 'o', long = "output-format")]
    output_format: Option<LogOutputFormat>,

    /// Seeds every collection with this many fake entries on startup.
    #[cfg(feature = "testing")]
    #[clap(long)]
    populate: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ServerArgs::parse();

    let settings = Settings::new(args.config.as_ref())?;

    let pretty = match args.output_format {
        Some(LogOutputFormat::Pretty) => true,
        Some(LogOutputFormat::Json) => false,
        None => settings.logging.pretty,
    };
    logging::setup_logging(&settings.logging.directives, pretty);

    let addr = settings.server.socket_addr()?;
    let context = RosterContext::new(settings);

    #[cfg(feature = "testing")]
    if let Some(count) = args.populate {
        context.store.populate(count).await;
        info!(count, "seeded collections with fake entries");
    }

    info!(
        paging = ?context.settings.paging,
        "roster context set up for the local server"
    );

    let routes = api::routes::routes(context)
        .recover(api::handlers::handle_rejection)
        .with(warp::log("api"));

    info!(%addr, "server will run locally");
    warp::serve(routes).run(addr).await;
    Ok(())
}
