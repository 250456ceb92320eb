pub mod caption;
pub mod compose;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod layout;
pub mod meta;
pub mod speech;
