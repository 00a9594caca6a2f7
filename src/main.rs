use anyhow::Result;
use clap::Parser;
use olxfinder::fetcher::Fetcher;
use olxfinder::scraper::{scrape_listings, search_url};
use olxfinder::{debug, utils};
use std::path::Path;
use url::Url;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OLX classified-ad listings scraper")]
struct Args {
    /// Search query, interpolated into the listings URL
    #[clap(short, long, default_value = "car-cover")]
    query: String,

    /// Maximum number of pages to scrape
    #[clap(short, long, default_value = "3")]
    pages: usize,

    /// Output filename
    #[clap(short, long, default_value = "olx_car_covers.json")]
    output: String,

    /// Directory the output file is written to
    #[clap(long, default_value = "results")]
    output_dir: String,

    /// Marketplace base URL, also used to resolve relative links
    #[clap(long, default_value = "https://www.olx.in")]
    base_url: String,

    /// Minimum politeness delay before each request, in seconds
    #[clap(long, default_value = "2.0")]
    delay_min: f64,

    /// Maximum politeness delay before each request, in seconds
    #[clap(long, default_value = "5.0")]
    delay_max: f64,

    /// Enable debug output
    #[clap(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    debug::set_debug(args.debug);

    let base_url = Url::parse(&args.base_url)?;
    let start_url = search_url(&base_url, &args.query)?;

    println!("Starting OLX scrape for '{}'", args.query);
    let fetcher = Fetcher::with_delay_range((args.delay_min, args.delay_max))?;
    let listings = scrape_listings(&fetcher, &base_url, start_url, Some(args.pages));
    println!("Found {} listings", listings.len());

    let path = utils::save_listings(&listings, &args.output, Path::new(&args.output_dir))?;
    println!("Results saved to: {}", path.display());

    Ok(())
}
