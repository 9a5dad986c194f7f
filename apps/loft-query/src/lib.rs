use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use loft_service::{LoftService, SearchRequest};
use loft_storage::db::Db;

/// Runs one search against the configured store and prints the response as JSON.
#[derive(Debug, Parser)]
#[command(
	version = loft_cli::VERSION,
	rename_all = "kebab",
	styles = loft_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, short = 'w', value_name = "ID")]
	pub workspace: String,
	#[arg(long, short = 'e', value_name = "EMAIL", default_value = "")]
	pub email: String,
	#[arg(long, short = 'n', value_name = "N")]
	pub limit: Option<u32>,
	/// Free-text request; multiple words are joined with spaces.
	#[arg(required = true, num_args = 1..)]
	pub query: Vec<String>,
}
impl Args {
	pub fn search_request(&self) -> SearchRequest {
		SearchRequest {
			workspace_id: self.workspace.clone(),
			requester_email: self.email.clone(),
			query: self.query.join(" "),
			limit: self.limit,
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = loft_config::load(&args.config)?;
	// Logs go to stderr so stdout stays machine-readable.
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let db = Db::connect(&config.storage.postgres).await?;

	db.ensure_schema().await?;

	let service = LoftService::new(config, db);

	tracing::debug!(semantic_rerank = service.semantic_rerank_enabled(), "Service ready.");

	let response = service.search(args.search_request()).await?;
	let json = serde_json::to_string_pretty(&response)?;

	println!("{json}");

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn joins_query_words() {
		let args = Args::try_parse_from([
			"loft-query",
			"-c",
			"loft.toml",
			"--workspace",
			"T1",
			"--limit",
			"3",
			"ORCA",
			"dashboard",
			"mockup",
		])
		.expect("Failed to parse args.");
		let req = args.search_request();

		assert_eq!(req.query, "ORCA dashboard mockup");
		assert_eq!(req.workspace_id, "T1");
		assert_eq!(req.requester_email, "");
		assert_eq!(req.limit, Some(3));
	}

	#[test]
	fn requires_a_query() {
		assert!(Args::try_parse_from(["loft-query", "-c", "loft.toml", "-w", "T1"]).is_err());
	}
}
