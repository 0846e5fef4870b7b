//! BCP CLI binary.
//!
//! This binary provides command-line access to the BCP calculator:
//! - Calculate the Business Complexity Points of a user story
//! - Compare providers over a directory of stories

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_calculate, run_compare};

    // Load .env before configuration reads the environment
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    bcp::init_tracing(&cli.log_level, cli.log_format)?;

    let mut config = bcp::BcpConfig::load()?;
    if let Some(dir) = &cli.prompts_dir {
        config = config.with_prompts_dir(dir);
    }

    // Execute the requested command
    match cli.command {
        Commands::Calculate {
            story_file,
            provider,
            format,
            output_file,
        } => {
            run_calculate(
                config,
                &story_file,
                provider.as_deref(),
                format,
                output_file.as_deref(),
            )
            .await?;
        }

        Commands::Compare {
            stories_dir,
            output_dir,
            providers,
            format,
        } => {
            run_compare(config, &stories_dir, &output_dir, &providers, format).await?;
        }
    }

    Ok(())
}
