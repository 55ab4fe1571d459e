//! # Controller Settings Module
//!
//! Per-device configuration: axis inversion, stick deadzones, trigger
//! combining, button bindings and the device-family rumble selector.
//!
//! ## Defaults
//!
//! A freshly attached device starts with every invert flag off, no deadzone, separate
//! triggers and the identity button mapping (physical index 11 is skipped,
//! it belongs to the guide button which is handled outside remapping).
//! Invert flags are not symmetric: X is complemented when its flag is set,
//! Y is complemented when its flag is clear, so defaults flip both Y axes.
//!
//! ## Loading
//!
//! [`ControllerSettings::load`] merges whatever recognised keys a
//! [`ConfigStore`] holds into the current settings. It is a partial merge:
//! a missing key, a key of the wrong type or a number outside the field's
//! range leaves that one field untouched and never rolls back keys that were
//! already applied.
//!
//! ## Usage
//!
//! ```
//! use pad_bridge::controller::settings::ControllerSettings;
//! use pad_bridge::store::MemoryStore;
//!
//! let mut settings = ControllerSettings::new();
//! let store = MemoryStore::new()
//!     .with_number("DeadzoneLeft", 5000)
//!     .with_bool("RelativeLeft", true);
//!
//! settings.load(Some(&store));
//! assert_eq!(settings.left.deadzone, 5000);
//! assert!(settings.left.linked);
//! assert_eq!(settings.right.deadzone, 0);
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::store::ConfigStore;

/// Number of remappable logical button slots.
pub const MAPPING_SLOTS: usize = 15;

/// Number of physical button bits in the report bitmask.
pub const PHYSICAL_BUTTONS: u8 = 16;

/// Largest legal deadzone (full stick deflection).
pub const DEADZONE_MAX: i16 = i16::MAX;

/// Default logical slot → physical bit index mapping.
pub const DEFAULT_MAPPING: [u8; MAPPING_SLOTS] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 13, 14, 15];

/// Persisted setting key names.
pub mod keys {
    pub const INVERT_LEFT_X: &str = "InvertLeftX";
    pub const INVERT_LEFT_Y: &str = "InvertLeftY";
    pub const INVERT_RIGHT_X: &str = "InvertRightX";
    pub const INVERT_RIGHT_Y: &str = "InvertRightY";
    pub const DEADZONE_LEFT: &str = "DeadzoneLeft";
    pub const DEADZONE_RIGHT: &str = "DeadzoneRight";
    pub const LINKED_LEFT: &str = "RelativeLeft";
    pub const LINKED_RIGHT: &str = "RelativeRight";
    pub const NORMALIZED_LEFT: &str = "DeadOffLeft";
    pub const NORMALIZED_RIGHT: &str = "DeadOffRight";
    pub const COMBINED_TRIGGERS: &str = "CombinedTriggers";
    pub const RUMBLE_TYPE: &str = "XoneRumbleType";
}

/// Logical button slots, in mapping order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonSlot {
    Up,
    Down,
    Left,
    Right,
    Start,
    Back,
    LeftStickClick,
    RightStickClick,
    LeftBumper,
    RightBumper,
    Guide,
    A,
    B,
    X,
    Y,
}

impl ButtonSlot {
    /// All slots in mapping order.
    pub const ALL: [ButtonSlot; MAPPING_SLOTS] = [
        ButtonSlot::Up,
        ButtonSlot::Down,
        ButtonSlot::Left,
        ButtonSlot::Right,
        ButtonSlot::Start,
        ButtonSlot::Back,
        ButtonSlot::LeftStickClick,
        ButtonSlot::RightStickClick,
        ButtonSlot::LeftBumper,
        ButtonSlot::RightBumper,
        ButtonSlot::Guide,
        ButtonSlot::A,
        ButtonSlot::B,
        ButtonSlot::X,
        ButtonSlot::Y,
    ];

    /// Position of this slot in [`ControllerSettings::mapping`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name of the persisted binding key for this slot.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ButtonSlot::Up => "BindingUp",
            ButtonSlot::Down => "BindingDown",
            ButtonSlot::Left => "BindingLeft",
            ButtonSlot::Right => "BindingRight",
            ButtonSlot::Start => "BindingStart",
            ButtonSlot::Back => "BindingBack",
            ButtonSlot::LeftStickClick => "BindingLSC",
            ButtonSlot::RightStickClick => "BindingRSC",
            ButtonSlot::LeftBumper => "BindingLB",
            ButtonSlot::RightBumper => "BindingRB",
            ButtonSlot::Guide => "BindingGuide",
            ButtonSlot::A => "BindingA",
            ButtonSlot::B => "BindingB",
            ButtonSlot::X => "BindingX",
            ButtonSlot::Y => "BindingY",
        }
    }
}

/// Inversion and deadzone settings for one analog stick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickSettings {
    /// Complement the X axis.
    pub invert_x: bool,
    /// Leave the Y axis uncomplemented. Y is flipped while this is `false`.
    pub invert_y: bool,
    /// Deadzone size, 0 to 32767. Zero disables the deadzone.
    pub deadzone: i16,
    /// X and Y only fall into the deadzone together.
    pub linked: bool,
    /// Rescale output past the deadzone to the full axis range.
    pub normalized: bool,
}

/// Full configuration for one attached controller.
///
/// The value is small and `Copy`, so the report path can take a snapshot and
/// release any lock before transforming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Left stick.
    pub left: StickSettings,
    /// Right stick.
    pub right: StickSettings,
    /// Fold both triggers into a single axis centred at 127.
    pub combined_triggers: bool,
    /// Logical slot → physical bit index, ordered as [`ButtonSlot::ALL`].
    pub mapping: [u8; MAPPING_SLOTS],
    /// Device-family rumble encoding selector.
    pub rumble_type: u8,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            left: StickSettings::default(),
            right: StickSettings::default(),
            combined_triggers: false,
            mapping: DEFAULT_MAPPING,
            rumble_type: 0,
        }
    }
}

impl ControllerSettings {
    /// Creates settings with every field at its default.
    ///
    /// # Examples
    ///
    /// ```
    /// use pad_bridge::controller::settings::ControllerSettings;
    ///
    /// let settings = ControllerSettings::new();
    /// assert_eq!(settings.mapping, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 13, 14, 15]);
    /// assert!(!settings.combined_triggers);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Physical bit index bound to a logical slot.
    #[must_use]
    pub fn binding(&self, slot: ButtonSlot) -> u8 {
        self.mapping[slot.index()]
    }

    /// Merges recognised keys from `store` into these settings.
    ///
    /// Each key is applied independently. Absent keys, keys of the wrong type
    /// and numbers outside the field's range are skipped. A `None` store leaves
    /// the settings as they are.
    ///
    /// # Returns
    ///
    /// Number of keys that were applied.
    pub fn load(&mut self, store: Option<&dyn ConfigStore>) -> usize {
        let Some(store) = store else {
            info!("Failed to load controller settings, keeping current: {}", self);
            return 0;
        };

        let mut applied = 0;

        applied += load_bool(store, keys::INVERT_LEFT_X, &mut self.left.invert_x);
        applied += load_bool(store, keys::INVERT_LEFT_Y, &mut self.left.invert_y);
        applied += load_bool(store, keys::INVERT_RIGHT_X, &mut self.right.invert_x);
        applied += load_bool(store, keys::INVERT_RIGHT_Y, &mut self.right.invert_y);

        applied += load_number(store, keys::DEADZONE_LEFT, &mut self.left.deadzone, |d| *d >= 0);
        applied += load_number(store, keys::DEADZONE_RIGHT, &mut self.right.deadzone, |d| *d >= 0);
        applied += load_bool(store, keys::LINKED_LEFT, &mut self.left.linked);
        applied += load_bool(store, keys::LINKED_RIGHT, &mut self.right.linked);
        applied += load_bool(store, keys::NORMALIZED_LEFT, &mut self.left.normalized);
        applied += load_bool(store, keys::NORMALIZED_RIGHT, &mut self.right.normalized);

        applied += load_bool(store, keys::COMBINED_TRIGGERS, &mut self.combined_triggers);

        applied += load_number(store, keys::RUMBLE_TYPE, &mut self.rumble_type, |_| true);

        for slot in ButtonSlot::ALL {
            applied += load_number(store, slot.key(), &mut self.mapping[slot.index()], |bit| {
                *bit < PHYSICAL_BUTTONS
            });
        }

        info!("Controller settings loaded ({} keys): {}", applied, self);
        applied
    }
}

impl fmt::Display for ControllerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn flag(value: bool) -> &'static str {
            if value {
                "T"
            } else {
                "F"
            }
        }

        fn zone(f: &mut fmt::Formatter<'_>, stick: &StickSettings) -> fmt::Result {
            write!(f, "{}", stick.deadzone)?;
            if stick.linked {
                f.write_str("-linked")?;
            }
            if stick.normalized {
                f.write_str("-normalized")?;
            }
            Ok(())
        }

        write!(
            f,
            "InvertLeft X[{}] Y[{}], InvertRight X[{}] Y[{}], CombinedTriggers[{}], Deadzone Left[",
            flag(self.left.invert_x),
            flag(self.left.invert_y),
            flag(self.right.invert_x),
            flag(self.right.invert_y),
            flag(self.combined_triggers),
        )?;
        zone(f, &self.left)?;
        f.write_str("] Right[")?;
        zone(f, &self.right)?;
        write!(f, "], RumbleType[{}], Mapping{:?}", self.rumble_type, self.mapping)
    }
}

fn load_bool(store: &dyn ConfigStore, key: &str, field: &mut bool) -> usize {
    match store.get_bool(key) {
        Some(value) => {
            *field = value;
            1
        }
        None => {
            debug!(key, "Setting not present");
            0
        }
    }
}

fn load_number<T>(
    store: &dyn ConfigStore,
    key: &str,
    field: &mut T,
    legal: impl Fn(&T) -> bool,
) -> usize
where
    T: TryFrom<u32>,
{
    let Some(raw) = store.get_u32(key) else {
        debug!(key, "Setting not present");
        return 0;
    };

    match T::try_from(raw) {
        Ok(value) if legal(&value) => {
            *field = value;
            1
        }
        _ => {
            warn!(key, value = raw, "Ignoring out-of-range setting");
            0
        }
    }
}
