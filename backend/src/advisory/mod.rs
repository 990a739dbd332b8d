pub mod prices;
pub mod routes;
pub mod soil;
