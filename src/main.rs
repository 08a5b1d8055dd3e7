use anyhow::Result;
use log::error;
use std::path::PathBuf;
use structopt::StructOpt;
use zora_trend_scanner::chunker::{self, Delivery};
use zora_trend_scanner::config::Config;
use zora_trend_scanner::{FixtureProvider, MarketDataProvider, ZoraClient, report, scan};

#[derive(StructOpt, Debug)]
#[structopt(name = "zora-scan")]
struct Opt {
    /// read candidates and details from a JSON fixture instead of the Zora API
    #[structopt(long, parse(from_os_str))]
    fixture: Option<PathBuf>,

    /// number of trending candidates to analyze
    #[structopt(long)]
    limit: Option<usize>,

    /// print only the short summary
    #[structopt(long)]
    quick: bool,

    /// print the scan result as JSON
    #[structopt(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();
    let mut cfg = Config::from_env();
    cfg.scan.override_candidate_limit(opt.limit);

    let provider: Box<dyn MarketDataProvider> = match &opt.fixture {
        Some(path) => Box::new(FixtureProvider::from_path(path)?),
        None => Box::new(ZoraClient::new(cfg.zora_api_url.clone(), cfg.zora_api_key.clone())?),
    };

    println!(
        "{}\n",
        if opt.quick {
            report::QUICK_SCAN_IN_PROGRESS
        } else {
            report::SCAN_IN_PROGRESS
        }
    );

    let result = match scan(provider.as_ref(), &cfg.scan).await {
        Ok(result) => result,
        Err(e) => {
            error!("Scan failed: {}", e);
            println!(
                "{}",
                if opt.quick {
                    report::QUICK_SCAN_FAILED
                } else {
                    report::SCAN_FAILED
                }
            );
            std::process::exit(1);
        }
    };

    if opt.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if opt.quick || result.all_analyses.is_empty() {
        println!("{}", result.summary);
        return Ok(());
    }

    let detailed = report::detailed_report(&result.all_analyses, &result.buy_recommendations);
    let chunks = chunker::split(&detailed);
    for (delivery, chunk) in chunker::plan_delivery(&chunks) {
        if delivery == Delivery::SendNew {
            println!("----------------------------------------");
        }
        println!("{}", chunk);
    }

    Ok(())
}
