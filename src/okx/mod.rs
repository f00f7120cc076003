// src/okx/mod.rs
pub mod asset;
pub mod client;

pub use asset::Exchange;
pub use client::OkxClient;
