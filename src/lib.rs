pub mod calendar;
pub mod command;
pub mod config;
pub mod day;
pub mod engine;
pub mod ingest;
pub mod limits;
pub mod model;
pub mod observability;
