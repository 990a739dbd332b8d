pub mod advisory;
pub mod auth;
pub mod clients;
pub mod config;
pub mod db;
pub mod detection;
pub mod routes;
