//! Internal voltage reference abstraction
//!
//! The reference trim is handed to an external routine (the Vcc library
//! on AVR boards) which knows how to turn the stored index into a
//! reference setting. What it does with the value is its own business.

/// Setter for the internal voltage reference trim
pub trait VoltageReference {
    /// Apply a reference trim index
    fn set_intref(&mut self, value: i16);
}

impl<T: VoltageReference + ?Sized> VoltageReference for &mut T {
    fn set_intref(&mut self, value: i16) {
        (**self).set_intref(value)
    }
}

/// Placeholder for parts without an internal voltage reference
///
/// Calls are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoVoltageReference;

impl VoltageReference for NoVoltageReference {
    fn set_intref(&mut self, _value: i16) {}
}
