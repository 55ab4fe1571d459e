//! # Report Processor Module
//!
//! Applies [`ControllerSettings`] to an [`InputReport`] on every input event.
//!
//! Steps, always in this order:
//!
//! 1. **Inversion** - an X axis whose invert flag is set is replaced by its
//!    bitwise complement (`!v`, so `0` becomes `-1`). Y axes run the other
//!    way: they are complemented unless their invert flag is set, so a
//!    device at defaults reports Y flipped. Downstream consumers expect this
//!    exact encoding, not arithmetic negation.
//! 2. **Deadzone** - per stick. With a non-zero deadzone, an axis whose
//!    magnitude is below it reports `0`. When the stick is linked, an axis is
//!    only zeroed if its partner is inside the deadzone too. When the stick is
//!    normalized, values past the deadzone are stretched linearly from
//!    `deadzone..=32767` onto `0..=32767`, keeping their sign.
//! 3. **Trigger combining** - optionally folds both triggers into the left
//!    trigger as one axis centred at 127 and zeroes the right trigger.
//!
//! The transform keeps no state, never allocates and never fails.
//!
//! ## Usage
//!
//! ```
//! use pad_bridge::controller::processor::apply;
//! use pad_bridge::controller::report::{InputReport, Stick};
//! use pad_bridge::controller::settings::ControllerSettings;
//!
//! let mut settings = ControllerSettings::new();
//! settings.left.invert_y = true; // keep Y as the device sent it
//! settings.left.deadzone = 4000;
//! settings.combined_triggers = true;
//!
//! let mut report = InputReport {
//!     left: Stick::new(1000, 20000),
//!     trig_l: 100,
//!     trig_r: 200,
//!     ..InputReport::default()
//! };
//! apply(&settings, &mut report);
//!
//! assert_eq!(report.left, Stick::new(0, 20000));
//! assert_eq!(report.trig_l, 177);
//! assert_eq!(report.trig_r, 0);
//! ```

use tracing::trace;

use super::report::{InputReport, Stick};
use super::settings::{ControllerSettings, StickSettings};

/// Largest positive axis value.
pub const AXIS_MAX: i32 = i16::MAX as i32;

/// Centre of the combined trigger axis.
pub const TRIGGER_CENTER: u8 = u8::MAX / 2;

/// Transforms `report` in place according to `settings`.
pub fn apply(settings: &ControllerSettings, report: &mut InputReport) {
    log_report("Pre-processed report", report);

    report.left = invert(report.left, &settings.left);
    report.right = invert(report.right, &settings.right);

    report.left = shape_stick(report.left, &settings.left);
    report.right = shape_stick(report.right, &settings.right);

    if settings.combined_triggers {
        report.trig_l = combine_triggers(report.trig_l, report.trig_r);
        report.trig_r = 0;
    }

    log_report("Post-processed report", report);
}

/// Absolute value of an axis reading, widened so `-32768` stays exact.
#[inline]
#[must_use]
pub fn magnitude(value: i16) -> i32 {
    i32::from(value).abs()
}

/// Shapes one axis against its stick's deadzone settings.
///
/// `paired` is the orthogonal axis of the same stick, only consulted when the
/// stick is linked.
///
/// # Examples
///
/// ```
/// use pad_bridge::controller::processor::process_deadzone;
/// use pad_bridge::controller::settings::StickSettings;
///
/// let stick = StickSettings { deadzone: 1000, linked: true, ..StickSettings::default() };
///
/// // Both axes inside: zeroed
/// assert_eq!(process_deadzone(500, 200, &stick), 0);
/// // Partner outside: passes through
/// assert_eq!(process_deadzone(500, 3000, &stick), 500);
/// ```
#[must_use]
pub fn process_deadzone(value: i16, paired: i16, stick: &StickSettings) -> i16 {
    if stick.deadzone <= 0 {
        return value;
    }

    let deadzone = i32::from(stick.deadzone);
    let inside = if stick.linked {
        magnitude(value) < deadzone && magnitude(paired) < deadzone
    } else {
        magnitude(value) < deadzone
    };

    if inside {
        return 0;
    }

    if stick.normalized {
        normalize(value, deadzone)
    } else {
        value
    }
}

/// Stretches an axis value past the deadzone back onto the full range.
fn normalize(value: i16, deadzone: i32) -> i16 {
    let usable = AXIS_MAX - deadzone;
    let scaled = if usable <= 0 {
        // Only full deflection can leave a maximal deadzone
        AXIS_MAX
    } else {
        let past = f64::from((magnitude(value) - deadzone).max(0));
        let out = (f64::from(AXIS_MAX) * past / f64::from(usable)).round() as i32;
        out.min(AXIS_MAX)
    };

    let scaled = scaled as i16;
    if value < 0 {
        -scaled
    } else {
        scaled
    }
}

/// Folds both triggers into a single axis centred at [`TRIGGER_CENTER`].
///
/// # Examples
///
/// ```
/// use pad_bridge::controller::processor::combine_triggers;
///
/// assert_eq!(combine_triggers(0, 0), 127);
/// assert_eq!(combine_triggers(100, 200), 177);
/// assert_eq!(combine_triggers(255, 0), 0);
/// assert_eq!(combine_triggers(0, 255), 254);
/// ```
#[inline]
#[must_use]
pub fn combine_triggers(left: u8, right: u8) -> u8 {
    TRIGGER_CENTER + right / 2 - left / 2
}

#[inline]
fn invert(stick: Stick, settings: &StickSettings) -> Stick {
    Stick {
        x: if settings.invert_x { !stick.x } else { stick.x },
        y: if settings.invert_y { stick.y } else { !stick.y },
    }
}

#[inline]
fn shape_stick(stick: Stick, settings: &StickSettings) -> Stick {
    Stick {
        x: process_deadzone(stick.x, stick.y, settings),
        y: process_deadzone(stick.y, stick.x, settings),
    }
}

#[inline]
fn log_report(message: &str, report: &InputReport) {
    trace!(
        left_x = report.left.x,
        left_y = report.left.y,
        trig_l = report.trig_l,
        right_x = report.right.x,
        right_y = report.right.y,
        trig_r = report.trig_r,
        buttons = report.buttons,
        "{}",
        message
    );
}
