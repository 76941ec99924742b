//! Core library for the `kair` air-quality monitor.
//!
//! This crate defines:
//! - Shared domain models (cities, readings)
//! - AQI classification and health advice
//! - The search provider abstraction and its Gemini implementation
//! - The data provider with its placeholder fallback
//! - Dashboard state and configuration handling
//!
//! It is used by `kair-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod dashboard;
pub mod decode;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod model;
pub mod provider;

pub use classify::{AqiCategory, HealthAdvice, color_category, health_advice, label};
pub use config::{Config, GeminiConfig};
pub use dashboard::Dashboard;
pub use error::FetchError;
pub use fetch::DataProvider;
pub use model::{City, Pollutants, Reading};
pub use provider::{ProviderId, SearchProvider, provider_from_config};
