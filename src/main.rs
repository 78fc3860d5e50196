use anyhow::Result;
use log::error;

use vedirect_dump::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let options = Options::new();

    if let Err(e) = vedirect_dump::run(options).await {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
