//! Calibrator
//!
//! Owns the hardware collaborators for one part and exposes the two
//! startup entry points: [`Calibrator::apply`] for explicit values and
//! [`Calibrator::load_from_storage`] for values left in EEPROM.

use avrcal_hal::{Eeprom, NoVoltageReference, OscillatorCalibration, VoltageReference};

use crate::variant::{Chip, ChipVariant};

/// Calibration applier bound to a chip variant and its hardware
///
/// Nothing is retained between calls; both entry points can be invoked
/// any number of times and re-apply the same state for the same input.
pub struct Calibrator<E, O, R> {
    pub(crate) variant: ChipVariant,
    pub(crate) eeprom: E,
    pub(crate) osccal: O,
    pub(crate) vref: R,
}

impl<E, O, R> Calibrator<E, O, R>
where
    E: Eeprom,
    O: OscillatorCalibration,
    R: VoltageReference,
{
    /// Create a calibrator for an explicit variant descriptor
    pub fn new(variant: ChipVariant, eeprom: E, osccal: O, vref: R) -> Self {
        Self {
            variant,
            eeprom,
            osccal,
            vref,
        }
    }

    /// Create a calibrator for a known part
    pub fn for_chip(chip: Chip, eeprom: E, osccal: O, vref: R) -> Self {
        Self::new(chip.variant(), eeprom, osccal, vref)
    }

    /// Variant this calibrator follows
    pub fn variant(&self) -> &ChipVariant {
        &self.variant
    }

    /// Current oscillator register value
    pub fn osccal(&self) -> u8 {
        self.osccal.read()
    }

    /// Release the hardware collaborators
    pub fn release(self) -> (E, O, R) {
        (self.eeprom, self.osccal, self.vref)
    }
}

impl<E, O> Calibrator<E, O, NoVoltageReference>
where
    E: Eeprom,
    O: OscillatorCalibration,
{
    /// Create a calibrator for a part without an internal voltage reference
    pub fn without_reference(variant: ChipVariant, eeprom: E, osccal: O) -> Self {
        Self::new(variant, eeprom, osccal, NoVoltageReference)
    }
}
