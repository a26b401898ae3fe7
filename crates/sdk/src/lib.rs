//! Forex SDK - Rust Client Library
//!
//! Provides a convenient client for the Forex converter daemon.
//!
//! # Example
//!
//! ```no_run
//! use forex_sdk::{ConvertRequest, ForexClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ForexClient::connect("http://127.0.0.1:50051").await?;
//!
//!     let response = client.convert(ConvertRequest::new(100.0, "USD", "INR")).await?;
//!     println!("Converted: {}", response.converted_amount);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::ForexClient;
pub use error::{code, Result, SdkError};
pub use types::{ConvertRequest, ConvertResponse};
