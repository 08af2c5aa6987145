//! GoHighLevel Lead Sync Library
//!
//! Loads scraped business leads from a JSON export, tolerating dangling
//! commas, and pushes each one to the GoHighLevel (LeadConnector) contacts API.
//!
//! # Modules
//!
//! - `core`: Domain-layer namespace (mapping, sync loop, models, errors).
//! - `integrations`: External service integrations.
//! - `obs`: Observability and logging.
//! - `config`: Configuration management.
//! - `contact`: Lead to contact payload mapping.
//! - `errors`: Error handling types.
//! - `ghl_client`: LeadConnector contacts client.
//! - `loader`: Leads file loading.
//! - `models`: Lead and contact data models.
//! - `repair`: Dangling-comma JSON recovery.
//! - `sync`: Sequential sync driver and run summary.

pub mod core;
pub mod integrations;
pub mod obs;

pub mod config;
pub mod contact;
pub mod errors;
pub mod ghl_client;
pub mod loader;
pub mod models;
pub mod repair;
pub mod sync;
