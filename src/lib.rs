//! # Pad Bridge Library
//!
//! Shapes Xbox 360 class controller input reports before they reach the host.
//!
//! This library provides the per-device settings model, the store it loads
//! from, and the report transform that applies axis inversion, stick
//! deadzones and trigger combining on every input event.

pub mod config;
pub mod controller;
pub mod error;
pub mod store;
