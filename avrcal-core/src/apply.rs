//! Explicit calibration applier
//!
//! Validates caller-supplied trims against the variant and writes the
//! legal ones. Out-of-range or absent values are not errors: they mean
//! "keep the factory setting" and simply leave the hardware alone.

use avrcal_hal::{Eeprom, OscillatorCalibration, VoltageReference};

use crate::calibrator::Calibrator;
use crate::trim::{from_sentinel, OscillatorTrim, ReferenceTrim};

/// What happened to the oscillator register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OscillatorOutcome {
    /// Register written with this value
    Written(u8),
    /// No value requested, register untouched
    Absent,
    /// Value outside the register domain, register untouched
    OutOfRange(i16),
}

/// What happened to the voltage reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReferenceOutcome {
    /// Reference setter called with this value
    Set(i16),
    /// No value requested
    Absent,
    /// Value refused by the variant's reference policy
    Rejected(i16),
    /// Part has no internal reference
    Unsupported,
}

/// Record of one apply pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApplyReport {
    pub osccal: OscillatorOutcome,
    pub intref: ReferenceOutcome,
}

impl ApplyReport {
    /// Value written to the oscillator register, if any
    pub fn osccal_written(&self) -> Option<u8> {
        match self.osccal {
            OscillatorOutcome::Written(value) => Some(value),
            _ => None,
        }
    }

    /// Value handed to the reference setter, if any
    pub fn intref_set(&self) -> Option<i16> {
        match self.intref {
            ReferenceOutcome::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Check if the hardware was left completely untouched
    pub fn is_noop(&self) -> bool {
        self.osccal_written().is_none() && self.intref_set().is_none()
    }
}

impl<E, O, R> Calibrator<E, O, R>
where
    E: Eeprom,
    O: OscillatorCalibration,
    R: VoltageReference,
{
    /// Apply explicit calibration values
    ///
    /// `osccal` is written if it lies in the register domain of the
    /// variant. `intref` is passed to the reference setter if the variant
    /// has a reference and its policy accepts the value. On parts without
    /// a reference `intref` is ignored.
    pub fn apply(&mut self, osccal: Option<i16>, intref: Option<i16>) -> ApplyReport {
        let report = ApplyReport {
            osccal: self.apply_osccal(osccal),
            intref: self.apply_intref(intref),
        };
        trace!("calibration apply: {:?}", report);
        report
    }

    /// Apply values using the legacy `-1` sentinels for "leave alone"
    pub fn apply_raw(&mut self, osccal: i16, intref: i16) -> ApplyReport {
        self.apply(from_sentinel(osccal), from_sentinel(intref))
    }

    fn apply_osccal(&mut self, osccal: Option<i16>) -> OscillatorOutcome {
        let Some(raw) = osccal else {
            debug!("OSCCAL not requested, keeping {=u8:#x}", self.osccal.read());
            return OscillatorOutcome::Absent;
        };

        match OscillatorTrim::new(raw, self.variant.oscillator) {
            Some(trim) => {
                self.osccal.write(trim.get());
                info!("OSCCAL set to {=u8:#x}", trim.get());
                OscillatorOutcome::Written(trim.get())
            }
            None => {
                debug!(
                    "OSCCAL {} outside 0..={}, keeping {=u8:#x}",
                    raw,
                    self.variant.oscillator.max_legal(),
                    self.osccal.read()
                );
                OscillatorOutcome::OutOfRange(raw)
            }
        }
    }

    fn apply_intref(&mut self, intref: Option<i16>) -> ReferenceOutcome {
        let Some(policy) = self.variant.reference else {
            return ReferenceOutcome::Unsupported;
        };
        let Some(raw) = intref else {
            debug!("voltage reference not requested");
            return ReferenceOutcome::Absent;
        };

        match ReferenceTrim::new(raw, policy) {
            Some(trim) => {
                self.vref.set_intref(trim.get());
                info!("voltage reference trim set to {}", trim.get());
                ReferenceOutcome::Set(trim.get())
            }
            None => {
                debug!("voltage reference trim {} skipped", raw);
                ReferenceOutcome::Rejected(raw)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockEeprom, MockOscillator, MockReference, FACTORY_OSCCAL};
    use crate::trim::{NO_INTREF, NO_OSCCAL};
    use crate::variant::{Chip, ChipVariant};
    use proptest::prelude::*;

    type TestCalibrator = Calibrator<MockEeprom<64>, MockOscillator, MockReference>;

    fn calibrator(variant: ChipVariant) -> TestCalibrator {
        Calibrator::new(
            variant,
            MockEeprom::erased(),
            MockOscillator::factory(),
            MockReference::default(),
        )
    }

    #[test]
    fn test_wide_full_scale_without_reference_request() {
        let mut cal = calibrator(ChipVariant::WIDE_WITH_REFERENCE);
        let report = cal.apply_raw(0xFF, NO_INTREF);

        assert_eq!(report.osccal, OscillatorOutcome::Written(0xFF));
        assert_eq!(report.intref, ReferenceOutcome::Absent);
        assert_eq!(cal.osccal.value, 0xFF);
        assert_eq!(cal.vref.calls, 0);
    }

    #[test]
    fn test_narrow_rejects_wide_value_but_sets_reference() {
        let mut cal = calibrator(ChipVariant::NARROW_WITH_REFERENCE);
        let report = cal.apply(Some(200), Some(5));

        assert_eq!(report.osccal, OscillatorOutcome::OutOfRange(200));
        assert_eq!(cal.osccal.value, FACTORY_OSCCAL);
        assert_eq!(cal.osccal.writes, 0);
        assert_eq!(cal.vref.last, Some(5));
        assert_eq!(cal.vref.calls, 1);
    }

    #[test]
    fn test_sentinels_leave_everything_alone() {
        let mut cal = calibrator(ChipVariant::WIDE_WITH_REFERENCE);
        let report = cal.apply_raw(NO_OSCCAL, NO_INTREF);

        assert!(report.is_noop());
        assert_eq!(cal.osccal.writes, 0);
        assert_eq!(cal.vref.calls, 0);
    }

    #[test]
    fn test_reference_zero_depends_on_policy() {
        let mut wide = calibrator(ChipVariant::WIDE_WITH_REFERENCE);
        assert_eq!(wide.apply(None, Some(0)).intref, ReferenceOutcome::Set(0));
        assert_eq!(wide.vref.last, Some(0));

        let mut narrow = calibrator(ChipVariant::NARROW_WITH_REFERENCE);
        assert_eq!(narrow.apply(None, Some(0)).intref, ReferenceOutcome::Rejected(0));
        assert_eq!(narrow.vref.calls, 0);
    }

    #[test]
    fn test_reference_ignored_without_reference_path() {
        let mut cal = Calibrator::for_chip(
            Chip::ATtiny2313,
            MockEeprom::<64>::erased(),
            MockOscillator::factory(),
            MockReference::default(),
        );
        let report = cal.apply(Some(0x40), Some(12));

        assert_eq!(report.osccal_written(), Some(0x40));
        assert_eq!(report.intref, ReferenceOutcome::Unsupported);
        assert_eq!(cal.vref.calls, 0);
    }

    #[test]
    fn test_without_reference_constructor() {
        let mut cal = Calibrator::without_reference(
            ChipVariant::NARROW_NO_REFERENCE,
            MockEeprom::<64>::erased(),
            MockOscillator::factory(),
        );
        let report = cal.apply(Some(0x7F), Some(3));

        assert_eq!(report.osccal_written(), Some(0x7F));
        assert_eq!(report.intref, ReferenceOutcome::Unsupported);
        assert_eq!(cal.osccal(), 0x7F);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut once = calibrator(ChipVariant::WIDE_WITH_REFERENCE);
        let first = once.apply(Some(0x45), Some(7));

        let mut twice = calibrator(ChipVariant::WIDE_WITH_REFERENCE);
        twice.apply(Some(0x45), Some(7));
        let second = twice.apply(Some(0x45), Some(7));

        assert_eq!(first, second);
        assert_eq!(once.osccal.value, twice.osccal.value);
        assert_eq!(once.vref.last, twice.vref.last);
    }

    proptest! {
        #[test]
        fn prop_legal_osccal_is_written(value in 0i16..=255) {
            let mut cal = calibrator(ChipVariant::WIDE_WITH_REFERENCE);
            cal.apply(Some(value), None);
            prop_assert_eq!(cal.osccal.value as i16, value);
            prop_assert_eq!(cal.osccal.writes, 1);
        }

        #[test]
        fn prop_illegal_osccal_is_ignored(value in prop_oneof![i16::MIN..0i16, 128i16..=i16::MAX]) {
            let mut cal = calibrator(ChipVariant::NARROW_WITH_REFERENCE);
            let report = cal.apply(Some(value), None);
            prop_assert_eq!(report.osccal, OscillatorOutcome::OutOfRange(value));
            prop_assert_eq!(cal.osccal.value, FACTORY_OSCCAL);
            prop_assert_eq!(cal.osccal.writes, 0);
        }

        #[test]
        fn prop_illegal_wide_osccal_is_ignored(value in prop_oneof![i16::MIN..0i16, 256i16..=i16::MAX]) {
            let mut cal = calibrator(ChipVariant::WIDE_WITH_REFERENCE);
            let report = cal.apply(Some(value), None);
            prop_assert_eq!(report.osccal, OscillatorOutcome::OutOfRange(value));
            prop_assert_eq!(cal.osccal.value, FACTORY_OSCCAL);
            prop_assert_eq!(cal.osccal.writes, 0);
        }

        #[test]
        fn prop_non_negative_reference_is_passed_once(value in 0i16..=i16::MAX) {
            let mut cal = calibrator(ChipVariant::WIDE_WITH_REFERENCE);
            cal.apply(None, Some(value));
            prop_assert_eq!(cal.vref.last, Some(value));
            prop_assert_eq!(cal.vref.calls, 1);
        }
    }
}
