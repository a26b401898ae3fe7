// Application Layer - Use Cases and Business Logic

pub mod convert;

// Re-exports
pub use convert::ConverterService;
