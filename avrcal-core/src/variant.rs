//! Chip-variant descriptors
//!
//! Every behavioural difference between supported parts is captured by a
//! [`ChipVariant`]: how wide the oscillator register is, whether there is
//! an internal reference to trim (and which values it accepts), and where
//! the calibration sketch left the values in EEPROM.

/// Legal value domain of the oscillator calibration register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OscillatorRange {
    /// Full 8-bit register, 0..=255
    Wide,
    /// 7-bit register, 0..=127
    Narrow,
}

impl OscillatorRange {
    /// Largest value the register accepts
    pub const fn max_legal(self) -> u8 {
        match self {
            OscillatorRange::Wide => 0xFF,
            OscillatorRange::Narrow => 0x7F,
        }
    }

    /// Check if a value lies in `0..=max_legal`
    pub const fn contains(self, value: i16) -> bool {
        value >= 0 && value <= self.max_legal() as i16
    }
}

/// Which reference trims are passed on to the reference setter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReferencePolicy {
    /// Any value `>= 0`
    NonNegative,
    /// Any value `> 0`; zero is skipped like the sentinel
    Positive,
}

impl ReferencePolicy {
    /// Check if the reference setter should be called with `value`
    pub const fn accepts(self, value: i16) -> bool {
        match self {
            ReferencePolicy::NonNegative => value >= 0,
            ReferencePolicy::Positive => value > 0,
        }
    }
}

/// Where the calibration values sit at the top of EEPROM
///
/// Offsets count down from the last cell (`E2END` is offset 0). Words are
/// addressed by their low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageLayout {
    /// Flag byte at `E2END-1` gates the oscillator byte at `E2END`;
    /// reference word at `E2END-3`
    FlagByte,
    /// Oscillator byte at `E2END`, reference word at `E2END-2`, no flag
    Direct,
}

impl StorageLayout {
    /// Offset of the oscillator trim byte
    pub const fn osccal_offset(self) -> usize {
        0
    }

    /// Offset of the "calibration present" flag, if the layout has one
    ///
    /// The flag reads `0` when the oscillator byte is valid.
    pub const fn flag_offset(self) -> Option<usize> {
        match self {
            StorageLayout::FlagByte => Some(1),
            StorageLayout::Direct => None,
        }
    }

    /// Offset of the low byte of the reference trim word
    pub const fn intref_offset(self) -> usize {
        match self {
            StorageLayout::FlagByte => 3,
            StorageLayout::Direct => 2,
        }
    }
}

/// Behaviour descriptor for one family of parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipVariant {
    /// Oscillator register domain
    pub oscillator: OscillatorRange,
    /// Reference trim policy, `None` if the part has no internal reference
    pub reference: Option<ReferencePolicy>,
    /// EEPROM layout of the stored values
    pub layout: StorageLayout,
}

impl ChipVariant {
    /// 8-bit OSCCAL with an internal reference (ATmega328P, ATtiny85, ...)
    pub const WIDE_WITH_REFERENCE: Self = Self {
        oscillator: OscillatorRange::Wide,
        reference: Some(ReferencePolicy::NonNegative),
        layout: StorageLayout::FlagByte,
    };

    /// 8-bit OSCCAL, no internal reference (ATtiny2313, ATtiny13, ...)
    pub const WIDE_NO_REFERENCE: Self = Self {
        oscillator: OscillatorRange::Wide,
        reference: None,
        layout: StorageLayout::FlagByte,
    };

    /// 7-bit OSCCAL with an internal reference
    pub const NARROW_WITH_REFERENCE: Self = Self {
        oscillator: OscillatorRange::Narrow,
        reference: Some(ReferencePolicy::Positive),
        layout: StorageLayout::Direct,
    };

    /// 7-bit OSCCAL, no internal reference
    pub const NARROW_NO_REFERENCE: Self = Self {
        oscillator: OscillatorRange::Narrow,
        reference: None,
        layout: StorageLayout::Direct,
    };

    /// Check if this variant drives a voltage reference
    pub const fn has_reference(&self) -> bool {
        self.reference.is_some()
    }
}

/// Concrete parts with known variant assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Chip {
    ATmega328P,
    ATmega2560,
    ATmega1284P,
    ATtiny85,
    ATtiny84,
    ATtiny441,
    ATtiny841,
    ATtiny828,
    ATtiny1634,
    ATtiny13,
    ATtiny13A,
    ATtiny2313,
    ATtiny2313A,
    ATtiny4313,
}

impl Chip {
    /// Variant descriptor for this part
    pub const fn variant(self) -> ChipVariant {
        match self {
            Chip::ATtiny13
            | Chip::ATtiny13A
            | Chip::ATtiny2313
            | Chip::ATtiny2313A
            | Chip::ATtiny4313 => ChipVariant::WIDE_NO_REFERENCE,
            _ => ChipVariant::WIDE_WITH_REFERENCE,
        }
    }

    /// Datasheet name of the oscillator calibration register
    pub const fn osccal_register_name(self) -> &'static str {
        match self {
            Chip::ATtiny441 | Chip::ATtiny841 | Chip::ATtiny828 | Chip::ATtiny1634 => "OSCCAL0",
            _ => "OSCCAL",
        }
    }
}
