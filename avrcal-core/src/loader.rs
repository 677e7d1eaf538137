//! Stored calibration loader
//!
//! Reads the values a calibration sketch left at the top of EEPROM and
//! hands them to the applier. The loader never validates; it only
//! decides, for the flag-byte layout, whether the stored oscillator byte
//! may be used at all.

use avrcal_hal::{Eeprom, OscillatorCalibration, VoltageReference};

use crate::apply::ApplyReport;
use crate::calibrator::Calibrator;
use crate::trim::from_sentinel;
use crate::variant::ChipVariant;

/// Flag value meaning "the oscillator byte holds a calibration"
pub const OSCCAL_PRESENT: u8 = 0;

/// Raw values read from EEPROM, before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoredCalibration {
    pub osccal: Option<i16>,
    pub intref: Option<i16>,
}

/// Read the stored calibration for a variant
///
/// Flag-byte layout: the oscillator byte is used only when the flag reads
/// [`OSCCAL_PRESENT`]; the reference word is read regardless of the flag.
/// Direct layout: both values are taken as stored.
///
/// The reference word is only read on parts with a reference. An erased
/// word reads as `-1` and therefore as "absent".
pub fn read_stored<E: Eeprom>(variant: &ChipVariant, eeprom: &mut E) -> StoredCalibration {
    let layout = variant.layout;

    let osccal = match layout.flag_offset() {
        Some(flag_offset) => {
            let flag = eeprom.read_byte_from_end(flag_offset);
            if flag == OSCCAL_PRESENT {
                Some(i16::from(eeprom.read_byte_from_end(layout.osccal_offset())))
            } else {
                debug!("calibration flag is {=u8:#x}, no stored OSCCAL", flag);
                None
            }
        }
        None => Some(i16::from(eeprom.read_byte_from_end(layout.osccal_offset()))),
    };

    let intref = if variant.has_reference() {
        // Stored as a signed 16-bit word
        from_sentinel(eeprom.read_word_from_end(layout.intref_offset()) as i16)
    } else {
        None
    };

    let stored = StoredCalibration { osccal, intref };
    trace!("stored calibration ({:?}): {:?}", layout, stored);
    stored
}

impl<E, O, R> Calibrator<E, O, R>
where
    E: Eeprom,
    O: OscillatorCalibration,
    R: VoltageReference,
{
    /// Read the calibration from EEPROM and apply it
    pub fn load_from_storage(&mut self) -> ApplyReport {
        let stored = read_stored(&self.variant, &mut self.eeprom);
        self.apply(stored.osccal, stored.intref)
    }
}
