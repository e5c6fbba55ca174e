pub mod config;
pub mod data_models;
pub mod detail;
pub mod error;
pub mod fetch_client;
pub mod pipeline;
pub mod view_state;
