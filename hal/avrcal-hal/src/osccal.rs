//! Oscillator calibration register abstraction
//!
//! On AVR parts this is `OSCCAL` (or `OSCCAL0` on the ATtiny441/841/828/1634
//! family). The register is 8 bits wide on most parts and 7 bits on the
//! narrow ones; the legal range is decided by the caller, not here.

/// The internal RC oscillator calibration register
///
/// Implementations should perform the raw register access for the
/// specific chip without any range checking.
pub trait OscillatorCalibration {
    /// Read the current register value
    fn read(&self) -> u8;

    /// Write a new calibration value
    fn write(&mut self, value: u8);
}

impl<T: OscillatorCalibration + ?Sized> OscillatorCalibration for &mut T {
    fn read(&self) -> u8 {
        (**self).read()
    }

    fn write(&mut self, value: u8) {
        (**self).write(value)
    }
}
