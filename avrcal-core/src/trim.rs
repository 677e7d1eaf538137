//! Trim value types
//!
//! Raw trims arrive as signed integers so that out-of-range requests can
//! be expressed. Absence is `None`; the legacy `-1` sentinels are only
//! understood at the [`from_sentinel`] boundary.

use crate::variant::{OscillatorRange, ReferencePolicy};

/// Legacy "leave OSCCAL alone" value
pub const NO_OSCCAL: i16 = -1;

/// Legacy "leave the voltage reference alone" value
pub const NO_INTREF: i16 = -1;

/// Map a legacy sentinel-style raw value to an explicit optional value
///
/// Both sentinels are `-1`. Any other value, including other negative
/// numbers, is passed through and left to the range checks.
pub const fn from_sentinel(raw: i16) -> Option<i16> {
    if raw == NO_OSCCAL {
        None
    } else {
        Some(raw)
    }
}

/// An oscillator trim that is legal for its register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OscillatorTrim(u8);

impl OscillatorTrim {
    /// Validate a raw value against the register domain
    pub fn new(value: i16, range: OscillatorRange) -> Option<Self> {
        if range.contains(value) {
            u8::try_from(value).ok().map(Self)
        } else {
            None
        }
    }

    /// Register value
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A reference trim the reference setter should receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReferenceTrim(i16);

impl ReferenceTrim {
    /// Validate a raw value against the variant's reference policy
    pub fn new(value: i16, policy: ReferencePolicy) -> Option<Self> {
        policy.accepts(value).then_some(Self(value))
    }

    /// Value handed to the reference setter
    pub const fn get(self) -> i16 {
        self.0
    }
}
