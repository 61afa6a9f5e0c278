pub mod config;
pub mod logging;

pub mod api;
pub mod cache;
pub mod forms;
pub mod normalize;
pub mod pages;
pub mod reconcile;
