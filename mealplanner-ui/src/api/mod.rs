//! Remote calls: hosted meals table, identity provider, suggestion backend.

pub mod client;

pub use client::*;
