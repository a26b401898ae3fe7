//! JSON-RPC API Layer
//!
//! Exposes the `Convert` operation as a JSON-RPC 2.0 method.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use jsonrpsee::server::ServerHandle;
pub use server::{RpcServer, RpcServerConfig};
