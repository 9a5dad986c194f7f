use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = loft_query::Args::parse();

	loft_query::run(args).await
}
