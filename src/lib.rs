pub mod debug;
pub mod fetcher;
pub mod models;
pub mod parser;
pub mod scraper;
pub mod utils;
