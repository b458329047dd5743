use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scout::{ListingExtractor, LocationResolver, ScoutConfig, SearchSpec};

/// Search ebay-kleinanzeigen.de once and print the matching ads
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Search term, e.g. "rennrad 28 zoll"
    term: String,

    /// City name or postal code
    #[arg(short, long)]
    city: String,

    /// Radius around the city in km
    #[arg(short, long, default_value_t = 10)]
    radius: u32,

    /// Exclusive maximum price in EUR
    #[arg(long)]
    max_price: Option<u64>,

    /// Inclusive minimum price in EUR, only used together with --max-price
    #[arg(long)]
    min_price: Option<u64>,

    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Write the ads as JSON to this file
    #[arg(long)]
    json: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = ScoutConfig::from_env()?;

    let resolver = LocationResolver::new(config.clone())?;
    let city = resolver.resolve(&args.city).await?;
    info!(city_id = city.code, city_name = %city.name, "resolved city");

    let spec = SearchSpec::new(&args.term, city.code, args.radius)
        .with_price_range(args.min_price, args.max_price)
        .with_page(args.page);

    let extractor = ListingExtractor::new(config)?;
    let ads = extractor.fetch(&spec).await;

    info!("Found {} ads for {:?} in {}", ads.len(), args.term, city.name);

    for (i, ad) in ads.iter().enumerate() {
        println!("{}. {} ({})", i + 1, ad.title, ad.price_text);
        println!("   {}", ad.location_text);
        println!("   ID: {}", ad.external_id);
        println!("   URL: {}", ad.detail_url);
        println!();
    }

    if let Some(path) = args.json {
        let json = serde_json::to_string_pretty(&ads)?;
        tokio::fs::write(&path, json).await?;
        info!("Saved {} ads to {}", ads.len(), path);
    }

    Ok(())
}
