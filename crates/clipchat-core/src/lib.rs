pub mod ports;
pub mod event_bus;
pub mod persist;
pub mod catalog;
pub mod templates;
pub mod responder;
pub mod store;
pub mod registry;
pub mod session;
pub mod preferences;
pub mod context;

#[cfg(test)]
mod tests;
