//! Diabetes prediction demo: an HTTP inference service around a pre-trained
//! binary classifier, and a terminal client that calls it.

pub mod frontend;
pub mod logger;
pub mod metrics;
pub mod model;
pub mod web;

pub use diabetes_config as config;
pub use diabetes_types as types;
