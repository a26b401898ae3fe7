//! Convert Example
//!
//! Converts 100 USD to INR with a one-second deadline.
//!
//! # Usage
//!
//! 1. Start the daemon:
//!    ```bash
//!    cargo run --package forex-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --example convert
//!    ```

use forex_sdk::{ConvertRequest, ForexClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = ForexClient::connect("http://127.0.0.1:50051").await?;

    let response = client
        .convert(ConvertRequest::new(100.0, "USD", "INR").with_timeout_ms(1000))
        .await?;

    println!("Converted Amount: {:.6}", response.converted_amount);

    Ok(())
}
