// src/lib.rs

pub mod api;
pub mod cli;
pub mod config;
pub mod identity;
pub mod persona;
pub mod profile;
pub mod responder;
pub mod services;
pub mod state;
pub mod store;

pub use state::AppState;
