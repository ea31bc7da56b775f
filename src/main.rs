//! drivethru-finder CLI entry point
//!
//! Drive-thru restaurant locator - CLI + web app

use drivethru_finder::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
