//! # Controller Device Module
//!
//! One attached controller: its settings and the three host-facing paths
//! that touch them.
//!
//! - **Property set** ([`Controller::set_properties`]) - the host pushes a
//!   settings dictionary; it is merged into the current settings.
//! - **Input report** ([`Controller::received_report`]) - every report from
//!   the device is transformed in place before it goes to the host.
//! - **Output report** ([`Controller::set_report`]) - rumble requests from the
//!   host are validated and forwarded to the transport.
//!
//! ## Thread Safety
//!
//! Property sets may arrive on a different thread from input reports.
//! Settings live behind a `parking_lot::RwLock`: a load holds the write lock
//! for its whole merge, and the report path only holds the read lock long
//! enough to copy the settings. A report therefore always sees either the
//! settings before a load or after it, never a mix.
//!
//! ## Usage
//!
//! ```
//! use pad_bridge::controller::device::Controller;
//! use pad_bridge::controller::report::REPORT_LEN;
//! use pad_bridge::store::MemoryStore;
//!
//! let controller = Controller::new(None);
//! controller.set_properties(Some(&MemoryStore::new().with_bool("CombinedTriggers", true)))?;
//!
//! let mut raw = [0u8; REPORT_LEN];
//! raw[1] = REPORT_LEN as u8;
//! controller.received_report(&mut raw)?;
//! assert_eq!(raw[4], 127); // combined trigger axis at rest
//! # Ok::<(), pad_bridge::error::PadBridgeError>(())
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::processor;
use super::report::InputReport;
use super::rumble::{RumbleRequest, RumbleSink};
use super::settings::ControllerSettings;
use crate::error::{PadBridgeError, Result};
use crate::store::ConfigStore;

/// An attached controller instance.
pub struct Controller {
    settings: RwLock<ControllerSettings>,
    rumble: Option<Arc<dyn RumbleSink>>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("settings", &*self.settings.read())
            .field("rumble", &self.rumble.is_some())
            .finish()
    }
}

impl Controller {
    /// Creates a controller with default settings.
    ///
    /// # Arguments
    ///
    /// * `rumble` - Transport that drives the motors, if the device has any
    #[must_use]
    pub fn new(rumble: Option<Arc<dyn RumbleSink>>) -> Self {
        Self::with_settings(ControllerSettings::default(), rumble)
    }

    /// Creates a controller with the given initial settings.
    #[must_use]
    pub fn with_settings(settings: ControllerSettings, rumble: Option<Arc<dyn RumbleSink>>) -> Self {
        Self {
            settings: RwLock::new(settings),
            rumble,
        }
    }

    /// Returns a copy of the current settings.
    #[must_use]
    pub fn settings(&self) -> ControllerSettings {
        *self.settings.read()
    }

    /// Merges a host-pushed settings dictionary into the current settings.
    ///
    /// # Errors
    ///
    /// Returns `BadArgument` if the host did not send a dictionary; the
    /// settings are left unchanged.
    pub fn set_properties(&self, properties: Option<&dyn ConfigStore>) -> Result<usize> {
        let Some(store) = properties else {
            warn!("Property set without a settings dictionary");
            return Err(PadBridgeError::BadArgument(
                "properties are not a dictionary".to_string(),
            ));
        };

        let mut settings = self.settings.write();
        Ok(settings.load(Some(store)))
    }

    /// Transforms a decoded report with the current settings.
    pub fn process(&self, report: &mut InputReport) {
        let settings = self.settings();
        processor::apply(&settings, report);
    }

    /// Transforms a raw input report buffer in place.
    ///
    /// Only the report fields are rewritten; the buffer keeps its size,
    /// header and reserved bytes.
    ///
    /// # Errors
    ///
    /// Returns `Report` error if the buffer is too short to hold a report or
    /// is not an input report, in which case it is left untouched.
    pub fn received_report(&self, data: &mut [u8]) -> Result<InputReport> {
        let mut report = InputReport::decode(data)?;
        self.process(&mut report);
        report.encode_into(data)?;
        Ok(report)
    }

    /// Handles a host output report.
    ///
    /// Rumble requests are forwarded to the rumble transport together with
    /// the configured rumble type. A controller without a transport accepts
    /// and drops them.
    ///
    /// # Errors
    ///
    /// - `Unsupported`: not a well-formed rumble report
    /// - `Rumble`: the transport failed to send
    pub fn set_report(&self, data: &[u8]) -> Result<()> {
        let request = RumbleRequest::parse(data, self.settings().rumble_type)?;

        match &self.rumble {
            Some(sink) => sink.send_rumble(request),
            None => {
                debug!(
                    large = request.large,
                    small = request.small,
                    "No rumble transport, dropping request"
                );
                Ok(())
            }
        }
    }
}
