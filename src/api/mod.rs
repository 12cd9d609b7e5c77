pub mod catalog_client;
pub mod models;
pub mod service;

pub use catalog_client::CatalogClient;
pub use service::{CardFilter, CatalogService, DuelResolution};
