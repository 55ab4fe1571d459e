//! # Rumble Module
//!
//! Parses rumble requests from the host's set-output-report path and hands
//! the motor intensities to the transport.
//!
//! Building and sending the actual motor packet is the transport's job; it
//! implements [`RumbleSink`]. This module only validates the host report:
//!
//! | Offset | Value |
//! |--------|-------|
//! | 0 | `0x00` (rumble report) |
//! | 1 | `0x04` (report length, must equal the buffer length) |
//! | 2 | Large motor intensity |
//! | 3 | Small motor intensity |

use crate::error::{PadBridgeError, Result};

/// Report type byte of a rumble output report.
pub const RUMBLE_REPORT_TYPE: u8 = 0x00;

/// Required length of a rumble output report.
pub const RUMBLE_REPORT_LEN: usize = 4;

/// Motor intensities requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RumbleRequest {
    /// Large (low-frequency) motor intensity.
    pub large: u8,
    /// Small (high-frequency) motor intensity.
    pub small: u8,
    /// Device-family rumble encoding selector from the settings.
    pub rumble_type: u8,
}

impl RumbleRequest {
    /// Parses a host output report.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` if the buffer is too short, is not a rumble
    /// report, or declares a length other than [`RUMBLE_REPORT_LEN`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pad_bridge::controller::rumble::RumbleRequest;
    ///
    /// let request = RumbleRequest::parse(&[0x00, 0x04, 0x80, 0x20], 0)?;
    /// assert_eq!((request.large, request.small), (0x80, 0x20));
    ///
    /// assert!(RumbleRequest::parse(&[0x00, 0x05, 0x80, 0x20, 0x00], 0).is_err());
    /// # Ok::<(), pad_bridge::error::PadBridgeError>(())
    /// ```
    pub fn parse(data: &[u8], rumble_type: u8) -> Result<Self> {
        if data.len() < 2 {
            return Err(PadBridgeError::Unsupported(format!(
                "output report too short ({} bytes)",
                data.len()
            )));
        }

        if data[0] != RUMBLE_REPORT_TYPE {
            return Err(PadBridgeError::Unsupported(format!(
                "output report type 0x{:02x}",
                data[0]
            )));
        }

        let declared = usize::from(data[1]);
        if declared != data.len() || declared != RUMBLE_REPORT_LEN {
            return Err(PadBridgeError::Unsupported(format!(
                "rumble report length {} (buffer {} bytes, expected {})",
                declared,
                data.len(),
                RUMBLE_REPORT_LEN
            )));
        }

        Ok(Self {
            large: data[2],
            small: data[3],
            rumble_type,
        })
    }
}

/// Transport side that drives the rumble motors.
#[cfg_attr(test, mockall::automock)]
pub trait RumbleSink: Send + Sync {
    /// Sends motor intensities to the device.
    fn send_rumble(&self, request: RumbleRequest) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let request = RumbleRequest::parse(&[0x00, 0x04, 0xFF, 0x01], 2).unwrap();
        assert_eq!(
            request,
            RumbleRequest {
                large: 0xFF,
                small: 0x01,
                rumble_type: 2
            }
        );
    }

    #[test]
    fn test_parse_short_buffer() {
        assert!(matches!(
            RumbleRequest::parse(&[0x00], 0),
            Err(PadBridgeError::Unsupported(_))
        ));
        assert!(RumbleRequest::parse(&[], 0).is_err());
    }

    #[test]
    fn test_parse_other_report_type() {
        let result = RumbleRequest::parse(&[0x01, 0x03, 0x02], 0);
        match result {
            Err(PadBridgeError::Unsupported(msg)) => assert!(msg.contains("0x01")),
            other => panic!("Expected Unsupported error, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_length_mismatch() {
        // Declared length disagrees with the buffer
        assert!(RumbleRequest::parse(&[0x00, 0x04, 0x10], 0).is_err());
        // Declared length matches the buffer but is not 4
        assert!(RumbleRequest::parse(&[0x00, 0x03, 0x10], 0).is_err());
        assert!(RumbleRequest::parse(&[0x00, 0x06, 0x10, 0x20, 0x00, 0x00], 0).is_err());
    }

    #[test]
    fn test_mock_sink_receives_request() {
        let mut sink = MockRumbleSink::new();
        sink.expect_send_rumble()
            .withf(|r| r.large == 0x40 && r.small == 0x10)
            .times(1)
            .returning(|_| Ok(()));

        let request = RumbleRequest::parse(&[0x00, 0x04, 0x40, 0x10], 0).unwrap();
        assert!(sink.send_rumble(request).is_ok());
    }
}
