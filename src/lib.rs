// Library exports for DevFlow
// Integration tests build the router from here

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
