use anyhow::Result;
use clap::Parser;
use curator::{
    config::Config,
    curation::{CurationRequest, CurationResponse, CurationService},
    telemetry,
};
use std::process::ExitCode;

/// Curate a single article from the command line and print the response
/// envelope as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Article URL (http or https)
    url: String,
    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format());

    let service = CurationService::from_config(&config)?;

    let response = match CurationRequest::new(cli.url).validate() {
        Ok(url) => match service.curate(&url).await {
            Ok(article) => CurationResponse::success(article),
            Err(e) => CurationResponse::failure(e.to_string()),
        },
        Err(e) => CurationResponse::failure(e.to_string()),
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", json);

    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
