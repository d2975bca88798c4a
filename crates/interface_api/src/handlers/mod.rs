//! Request handlers

pub mod audit;
pub mod session;
pub mod claims;
pub mod health;
pub mod views;
