//! Polymarket module - Client implementation for Polymarket CLOB API

pub mod allowances;
pub mod auth;
pub mod client;
pub mod discovery;
pub mod messages;
pub mod rest;
pub mod signer;

pub use client::PolymarketClient;
