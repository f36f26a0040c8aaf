pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod poller;
pub mod presence;
pub mod routes;
pub mod store;
