//! Legacy permission-map access client

mod client;

pub use client::{LegacyAccessClient, ResourceMapping};
