mod catalog;
mod client;
mod error;

pub use catalog::{find_listing, load_listings, Source, Sourced};
pub use client::{PropertySource, RemoteCatalog};
pub use error::RemoteError;
