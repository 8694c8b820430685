//! # Storefront Telegram Bot
//!
//! A customer-chat assistant for an online saree store. Customers navigate a
//! fixed menu, browse live catalog content pulled from the store's admin API,
//! and send questions or order numbers that are relayed to a human operator.

pub mod bot;
pub mod catalog;
pub mod circuit_breaker;
pub mod commerce;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod health;
pub mod menu;
pub mod relay;
pub mod render;
pub mod session;
pub mod transport;
