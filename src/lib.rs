// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod error;
pub mod metrics_source;
pub mod models;
pub mod registry;
pub mod routes;
pub mod version;
