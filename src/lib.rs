// Library target for integration tests and benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can import the engine via `phrasedash::engine::*` / `phrasedash::store::*`.
// The UI modules are only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

pub mod config;
pub mod engine;
pub mod generator;
pub mod session;
pub mod store;

// Private: required by the binary only
mod app;
mod event;
mod ui;
