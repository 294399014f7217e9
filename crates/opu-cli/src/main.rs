//! 🚀 opu-cli: the front door, the bouncer, the maitre d' of opu.
//!
//! 📦 Thin CLI wrapper: parse args, set up logging, load config, then let the
//! library do the heavy lifting. Like a manager. 🦆

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Bulk-upload the `items` of a JSON file (Kubernetes events or job records) to OpenSearch.
///
/// The password comes from OPENSEARCH_PASS. Everything lands in index `job1`,
/// 1000 documents per request.
#[derive(Debug, Parser)]
#[command(name = "opu", version)]
struct Cli {
    /// 📂 JSON file with a top-level `items` array
    input: PathBuf,

    /// 🔧 Optional TOML file layered over OPU_* environment variables
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// 🚀 main(): where it all begins.
///
/// 🔧 Steps:
/// 1. Init tracing (`RUST_LOG` wins, `info` otherwise)
/// 2. Parse args
/// 3. Load config
/// 4. Run the thing (send it and pray 🙏)
/// 5. Handle errors (cry, then exit 1)
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let app_config = opu::app_config::load_config(cli.config.as_deref())
        .context("💀 In opu-cli, main, we couldn't load the configuration. Take a look at the file and the OPU_* variables.")?;

    let result = opu::run(app_config, &cli.input).await;

    match result {
        Ok(report) => {
            info!("📊 upload summary\n{}", opu::progress::render_summary(&report));
            Ok(())
        }
        Err(err) => {
            error!("💀 error: {}", err);
            // -- 🧅 peel the onion of sadness, one tear-jerking layer at a time
            let mut the_vibes_are_giving_connection_issues = false;
            for cause in err.chain().skip(1) {
                error!("⚠️  cause: {}", cause);
                let cause_str = cause.to_string();
                if cause_str.contains("error sending request")
                    || cause_str.contains("connection refused")
                    || cause_str.contains("Connection refused")
                    || cause_str.contains("tcp connect error")
                    || cause_str.contains("dns error")
                {
                    the_vibes_are_giving_connection_issues = true;
                }
            }

            if the_vibes_are_giving_connection_issues {
                error!(
                    "🔧 hint: looks like the OpenSearch endpoint isn't reachable. \
                    Double-check the URL (OPU_SINK_CONFIG__URL or [sink_config] url), \
                    your network, and that the cluster is actually up. ☕"
                );
            }

            // 🗑️ Exit with prejudice. Process exitus maximus.
            std::process::exit(1);
        }
    }
}
