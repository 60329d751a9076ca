pub mod config;
pub mod logging;

pub mod action;
pub mod classify;
pub mod clock;
pub mod collector;
pub mod error;
pub mod history;
pub mod indicator;
pub mod model;
pub mod protocol;
pub mod runtime;
pub mod store;
pub mod url_model;
