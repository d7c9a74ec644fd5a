pub mod message;
pub mod card;
pub mod action;
pub mod conversation;
pub mod event;
pub mod catalog;
pub mod preference;
pub mod config;
pub mod error;
pub mod ids;


pub use error::ChatError;
pub type Result<T> = std::result::Result<T, ChatError>;
