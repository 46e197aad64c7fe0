pub mod engine;
pub mod export;
pub mod observability;
pub mod persistence;
