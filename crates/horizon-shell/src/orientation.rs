//! Screen orientation and rotation angles.
//!
//! This module maps abstract orientation requests (the values a web page
//! passes to `screen.orientation.lock()`) onto the concrete rotation angle the
//! window manager understands.
//!
//! The mapping depends on the device's [`NaturalOrientation`]. The rotation
//! sensor is mounted relative to the device's resting posture, so portrait
//! native and landscape native devices need mirrored tables to express the
//! same four logical orientations:
//!
//! | Requested             | Portrait natural | Landscape natural |
//! |-----------------------|------------------|-------------------|
//! | `PortraitPrimary`     | 0                | 270               |
//! | `PortraitSecondary`   | 180              | 90                |
//! | `LandscapePrimary`    | 270              | 0                 |
//! | `LandscapeSecondary`  | 90               | 180               |
//! | `Natural`             | 0                | 0                 |
//! | `Any`                 | unlocked (-1)    | unlocked (-1)     |
//!
//! # Example
//!
//! ```
//! use horizon_shell::orientation::{resolve_angle, NaturalOrientation, RotationAngle, ScreenOrientation};
//!
//! let natural = NaturalOrientation::from_screen_size(720, 1280);
//! assert_eq!(natural, NaturalOrientation::Portrait);
//!
//! let angle = resolve_angle(ScreenOrientation::LandscapePrimary, natural);
//! assert_eq!(angle, RotationAngle::Deg270);
//! assert_eq!(angle.degrees(), 270);
//! ```

use std::fmt;

use serde::Deserialize;

/// A logical screen orientation.
///
/// Used both for the device's natural orientation and for a requested
/// orientation lock. In configuration files the kebab-case spelling is used
/// (`"portrait-primary"`, `"landscape-secondary"`, `"any"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenOrientation {
    /// Upright portrait.
    PortraitPrimary,
    /// Upside-down portrait.
    PortraitSecondary,
    /// Landscape, rotated counter-clockwise from upright portrait.
    LandscapePrimary,
    /// Landscape, rotated clockwise from upright portrait.
    LandscapeSecondary,
    /// Whatever the device's resting posture is.
    Natural,
    /// No preference; the toolkit rotates freely.
    Any,
}

impl ScreenOrientation {
    /// All orientations in declaration order.
    pub const ALL: [ScreenOrientation; 6] = [
        ScreenOrientation::PortraitPrimary,
        ScreenOrientation::PortraitSecondary,
        ScreenOrientation::LandscapePrimary,
        ScreenOrientation::LandscapeSecondary,
        ScreenOrientation::Natural,
        ScreenOrientation::Any,
    ];

    /// Position of this orientation in [`ScreenOrientation::ALL`].
    pub const fn ordinal(self) -> usize {
        match self {
            ScreenOrientation::PortraitPrimary => 0,
            ScreenOrientation::PortraitSecondary => 1,
            ScreenOrientation::LandscapePrimary => 2,
            ScreenOrientation::LandscapeSecondary => 3,
            ScreenOrientation::Natural => 4,
            ScreenOrientation::Any => 5,
        }
    }

    /// The kebab-case name used in configuration and by web content.
    pub const fn as_str(self) -> &'static str {
        match self {
            ScreenOrientation::PortraitPrimary => "portrait-primary",
            ScreenOrientation::PortraitSecondary => "portrait-secondary",
            ScreenOrientation::LandscapePrimary => "landscape-primary",
            ScreenOrientation::LandscapeSecondary => "landscape-secondary",
            ScreenOrientation::Natural => "natural",
            ScreenOrientation::Any => "any",
        }
    }
}

impl fmt::Display for ScreenOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The device's resting posture, derived once from the screen dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaturalOrientation {
    /// Height is at least the width.
    Portrait,
    /// Width is strictly greater than the height.
    Landscape,
}

impl NaturalOrientation {
    /// Derive the natural orientation from the screen size.
    ///
    /// A square screen counts as portrait.
    pub fn from_screen_size(width: u32, height: u32) -> Self {
        if width > height {
            NaturalOrientation::Landscape
        } else {
            NaturalOrientation::Portrait
        }
    }
}

impl From<NaturalOrientation> for ScreenOrientation {
    fn from(natural: NaturalOrientation) -> Self {
        match natural {
            NaturalOrientation::Portrait => ScreenOrientation::PortraitPrimary,
            NaturalOrientation::Landscape => ScreenOrientation::LandscapePrimary,
        }
    }
}

/// A rotation angle understood by the window manager.
///
/// Only the four right angles and the "unlocked" marker exist, so an invalid
/// angle cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationAngle {
    /// No lock; the toolkit rotates with the sensor. Serialized as `-1`.
    Unlocked,
    /// 0 degrees.
    #[default]
    Deg0,
    /// 90 degrees.
    Deg90,
    /// 180 degrees.
    Deg180,
    /// 270 degrees.
    Deg270,
}

impl RotationAngle {
    /// The four concrete angles, in ascending order.
    pub const CANONICAL: [RotationAngle; 4] = [
        RotationAngle::Deg0,
        RotationAngle::Deg90,
        RotationAngle::Deg180,
        RotationAngle::Deg270,
    ];

    /// The raw degree value, with `-1` for [`RotationAngle::Unlocked`].
    pub const fn degrees(self) -> i32 {
        match self {
            RotationAngle::Unlocked => -1,
            RotationAngle::Deg0 => 0,
            RotationAngle::Deg90 => 90,
            RotationAngle::Deg180 => 180,
            RotationAngle::Deg270 => 270,
        }
    }

    /// Convert an exact degree value (`-1`, `0`, `90`, `180` or `270`).
    pub const fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            -1 => Some(RotationAngle::Unlocked),
            0 => Some(RotationAngle::Deg0),
            90 => Some(RotationAngle::Deg90),
            180 => Some(RotationAngle::Deg180),
            270 => Some(RotationAngle::Deg270),
            _ => None,
        }
    }

    /// Normalize an arbitrary degree value.
    ///
    /// `-1` stays [`RotationAngle::Unlocked`]; anything else is reduced into
    /// `[0, 360)` first, so `450` becomes `90` and `-90` becomes `270`.
    /// Returns `None` when the reduced value is not a right angle.
    pub fn normalize(degrees: i32) -> Option<Self> {
        if degrees == -1 {
            return Some(RotationAngle::Unlocked);
        }
        Self::from_degrees(degrees.rem_euclid(360))
    }

    /// Check whether this is a concrete angle rather than the unlocked marker.
    pub const fn is_locked(self) -> bool {
        !matches!(self, RotationAngle::Unlocked)
    }
}

impl fmt::Display for RotationAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationAngle::Unlocked => f.write_str("unlocked"),
            angle => write!(f, "{}°", angle.degrees()),
        }
    }
}

/// Angles indexed by [`ScreenOrientation::ordinal`] for a portrait natural device.
const PORTRAIT_NATURAL_ANGLES: [RotationAngle; 6] = [
    RotationAngle::Deg0,
    RotationAngle::Deg180,
    RotationAngle::Deg270,
    RotationAngle::Deg90,
    RotationAngle::Deg0,
    RotationAngle::Unlocked,
];

/// Angles indexed by [`ScreenOrientation::ordinal`] for a landscape natural device.
const LANDSCAPE_NATURAL_ANGLES: [RotationAngle; 6] = [
    RotationAngle::Deg270,
    RotationAngle::Deg90,
    RotationAngle::Deg0,
    RotationAngle::Deg180,
    RotationAngle::Deg0,
    RotationAngle::Unlocked,
];

/// Resolve a requested orientation to the rotation angle to lock.
///
/// [`ScreenOrientation::Any`] always resolves to [`RotationAngle::Unlocked`]
/// and [`ScreenOrientation::Natural`] always to [`RotationAngle::Deg0`].
pub fn resolve_angle(requested: ScreenOrientation, natural: NaturalOrientation) -> RotationAngle {
    let table = match natural {
        NaturalOrientation::Portrait => &PORTRAIT_NATURAL_ANGLES,
        NaturalOrientation::Landscape => &LANDSCAPE_NATURAL_ANGLES,
    };
    table[requested.ordinal()]
}
