// src/services/mod.rs

pub mod chat;

pub use chat::{ChatExchange, ChatService};
