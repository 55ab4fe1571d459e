//! # Input Report Module
//!
//! The controller's native input report and its byte layout.
//!
//! ## Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | Report type (`0x00`) |
//! | 1 | 1 | Report length (`0x14`) |
//! | 2 | 2 | Buttons (LE bitmask) |
//! | 4 | 1 | Left trigger |
//! | 5 | 1 | Right trigger |
//! | 6 | 2 | Left stick X (LE i16) |
//! | 8 | 2 | Left stick Y (LE i16) |
//! | 10 | 2 | Right stick X (LE i16) |
//! | 12 | 2 | Right stick Y (LE i16) |
//! | 14 | 6 | Reserved |
//!
//! Decoding only needs the first [`REPORT_FIELDS_LEN`] bytes. Encoding writes
//! the field bytes back in place and leaves the header and reserved bytes
//! exactly as the device sent them, so the host receives a report of the
//! same shape and size.

use bytes::Buf;

use crate::error::{PadBridgeError, Result};

/// Full size of the native input report.
pub const REPORT_LEN: usize = 20;

/// Bytes covered by the decoded fields (header through right stick Y).
pub const REPORT_FIELDS_LEN: usize = 14;

/// Report type byte of an input report.
pub const REPORT_TYPE_INPUT: u8 = 0x00;

const FIELDS_OFFSET: usize = 2;

/// Two-axis analog stick position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stick {
    pub x: i16,
    pub y: i16,
}

impl Stick {
    /// Creates a stick position.
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Decoded controller input report.
///
/// Axis values are native signed 16-bit integers (`-32768..=32767`),
/// triggers are `0..=255`, and `buttons` carries one bit per physical button.
///
/// # Examples
///
/// ```
/// use pad_bridge::controller::report::{InputReport, Stick};
///
/// let report = InputReport {
///     left: Stick::new(-100, 200),
///     trig_l: 50,
///     ..InputReport::default()
/// };
/// assert_eq!(report.right, Stick::new(0, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputReport {
    /// Left analog stick.
    pub left: Stick,
    /// Right analog stick.
    pub right: Stick,
    /// Left trigger.
    pub trig_l: u8,
    /// Right trigger.
    pub trig_r: u8,
    /// Physical button bitmask.
    pub buttons: u16,
}

impl InputReport {
    /// Decodes the report fields from a raw buffer.
    ///
    /// # Errors
    ///
    /// Returns `Report` error if the buffer is shorter than [`REPORT_FIELDS_LEN`]
    /// or its type byte is not [`REPORT_TYPE_INPUT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pad_bridge::controller::report::InputReport;
    ///
    /// let mut raw = [0u8; 20];
    /// raw[1] = 0x14;
    /// raw[2] = 0x10;          // buttons bit 4
    /// raw[4] = 255;           // left trigger fully pressed
    /// raw[6..8].copy_from_slice(&(-1234i16).to_le_bytes());
    ///
    /// let report = InputReport::decode(&raw)?;
    /// assert_eq!(report.buttons, 0x0010);
    /// assert_eq!(report.trig_l, 255);
    /// assert_eq!(report.left.x, -1234);
    /// # Ok::<(), pad_bridge::error::PadBridgeError>(())
    /// ```
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < REPORT_FIELDS_LEN {
            return Err(PadBridgeError::Report(format!(
                "buffer too short: {} bytes, need at least {}",
                data.len(),
                REPORT_FIELDS_LEN
            )));
        }

        if data[0] != REPORT_TYPE_INPUT {
            return Err(PadBridgeError::Report(format!(
                "not an input report: type 0x{:02x}",
                data[0]
            )));
        }

        let mut buf = &data[FIELDS_OFFSET..REPORT_FIELDS_LEN];
        let buttons = buf.get_u16_le();
        let trig_l = buf.get_u8();
        let trig_r = buf.get_u8();
        let left = Stick::new(buf.get_i16_le(), buf.get_i16_le());
        let right = Stick::new(buf.get_i16_le(), buf.get_i16_le());

        Ok(Self {
            left,
            right,
            trig_l,
            trig_r,
            buttons,
        })
    }

    /// Writes the report fields back into a raw buffer in place.
    ///
    /// Header and reserved bytes are not touched.
    ///
    /// # Errors
    ///
    /// Returns `Report` error if the buffer is shorter than [`REPORT_FIELDS_LEN`].
    pub fn encode_into(&self, data: &mut [u8]) -> Result<()> {
        if data.len() < REPORT_FIELDS_LEN {
            return Err(PadBridgeError::Report(format!(
                "buffer too short: {} bytes, need at least {}",
                data.len(),
                REPORT_FIELDS_LEN
            )));
        }

        data[2..4].copy_from_slice(&self.buttons.to_le_bytes());
        data[4] = self.trig_l;
        data[5] = self.trig_r;
        data[6..8].copy_from_slice(&self.left.x.to_le_bytes());
        data[8..10].copy_from_slice(&self.left.y.to_le_bytes());
        data[10..12].copy_from_slice(&self.right.x.to_le_bytes());
        data[12..14].copy_from_slice(&self.right.y.to_le_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_buffer() -> [u8; REPORT_LEN] {
        let mut raw = [0u8; REPORT_LEN];
        raw[0] = REPORT_TYPE_INPUT;
        raw[1] = REPORT_LEN as u8;
        raw[2..4].copy_from_slice(&0x9001u16.to_le_bytes());
        raw[4] = 12;
        raw[5] = 240;
        raw[6..8].copy_from_slice(&i16::MIN.to_le_bytes());
        raw[8..10].copy_from_slice(&i16::MAX.to_le_bytes());
        raw[10..12].copy_from_slice(&(-1i16).to_le_bytes());
        raw[12..14].copy_from_slice(&300i16.to_le_bytes());
        raw[14..].copy_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        raw
    }

    #[test]
    fn test_decode_fields() {
        let report = InputReport::decode(&sample_buffer()).unwrap();

        assert_eq!(report.buttons, 0x9001);
        assert_eq!(report.trig_l, 12);
        assert_eq!(report.trig_r, 240);
        assert_eq!(report.left, Stick::new(i16::MIN, i16::MAX));
        assert_eq!(report.right, Stick::new(-1, 300));
    }

    #[test]
    fn test_decode_short_buffer() {
        let result = InputReport::decode(&[0u8; REPORT_FIELDS_LEN - 1]);
        match result {
            Err(PadBridgeError::Report(msg)) => assert!(msg.contains("too short")),
            other => panic!("Expected Report error, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_accepts_fields_only_buffer() {
        let raw = sample_buffer();
        let report = InputReport::decode(&raw[..REPORT_FIELDS_LEN]).unwrap();
        assert_eq!(report.right.y, 300);
    }

    #[test]
    fn test_encode_preserves_header_and_reserved() {
        let mut raw = sample_buffer();
        let report = InputReport {
            left: Stick::new(5, -5),
            right: Stick::new(0, 0),
            trig_l: 127,
            trig_r: 0,
            buttons: 0x0002,
        };

        report.encode_into(&mut raw).unwrap();

        assert_eq!(raw[0], REPORT_TYPE_INPUT);
        assert_eq!(raw[1], REPORT_LEN as u8);
        assert_eq!(&raw[14..], &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(InputReport::decode(&raw).unwrap(), report);
    }

    #[test]
    fn test_encode_short_buffer() {
        let mut raw = [0u8; 4];
        assert!(InputReport::default().encode_into(&mut raw).is_err());
        assert_eq!(raw, [0u8; 4]);
    }

    #[test]
    fn test_decode_rejects_other_report_type() {
        let mut raw = sample_buffer();
        raw[0] = 0x01;
        match InputReport::decode(&raw) {
            Err(PadBridgeError::Report(msg)) => assert!(msg.contains("0x01")),
            other => panic!("Expected Report error, got: {:?}", other),
        }
    }
}
