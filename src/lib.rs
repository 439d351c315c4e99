pub mod banner;
pub mod client;
pub mod commands;
pub mod config;
pub mod consts;
pub mod error;
pub mod logging;
pub mod planner;
pub mod render;
pub mod spinner;
pub mod state;
pub mod trip;
