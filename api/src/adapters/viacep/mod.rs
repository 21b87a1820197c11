//! ViaCEP adapter
//!
//! HTTP client resolving Brazilian ZIP codes.

pub mod client;

pub use client::ViaCepClient;
