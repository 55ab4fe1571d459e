//! # Controller Module
//!
//! Xbox 360 class controller input shaping.
//!
//! This module handles:
//! - Per-device settings and merging them from a settings store
//! - Decoding and re-encoding the native input report
//! - Applying inversion, deadzones and trigger combining to each report
//! - Forwarding host rumble requests to the transport

pub mod device;
pub mod processor;
pub mod report;
pub mod rumble;
pub mod settings;
