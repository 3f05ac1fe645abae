pub mod config;
pub mod logging;

pub mod catalog;
pub mod download;
pub mod http;
pub mod selection;
pub mod synth;
pub mod url_model;
