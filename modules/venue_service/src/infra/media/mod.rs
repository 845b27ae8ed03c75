//! Object store backends

pub mod local;

pub use local::LocalObjectStore;
