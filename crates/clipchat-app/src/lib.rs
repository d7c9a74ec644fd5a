//! ClipChat App: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the platform adapters into an `AppContext` and exposes it to
//! the JavaScript renderer through the `ClipChat` class.

mod api;
mod dom;


pub use api::ClipChat;

use wasm_bindgen::prelude::*;

/// WASM entry point: runs once when the module is instantiated
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("ClipChat WASM starting...");
}
