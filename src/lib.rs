pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod http_client;
pub mod player_index;
pub mod provider;
pub mod state;
pub mod ui;
