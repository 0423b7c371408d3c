//! CFTools Cloud HTTP transport

mod auth;
mod client;
pub mod wire;

pub use auth::{LoginCredentials, TokenProvider};
pub use client::{game_server_resource, HttpClient, DEFAULT_BASE_URL};
