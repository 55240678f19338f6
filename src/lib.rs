pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod pokeapi;
pub mod routes;
pub mod services;
