//! Weather tips and a decorative particle background.
//!
//! - [`advisory`] turns a current-weather observation into display-ordered tips.
//! - [`particles`] runs the falling-particle animation over a [`particles::Surface`].
//! - [`service`] exposes both over MCP, fetching conditions from WeatherAPI.

pub mod advisory;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod models;
pub mod particles;
pub mod service;
