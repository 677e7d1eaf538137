//! Startup calibration for AVR oscillator and voltage-reference trims
//!
//! This crate contains the board-agnostic part of the loader:
//!
//! - Chip-variant descriptors (register width, reference policy, EEPROM layout)
//! - Trim value types and the legacy `-1` sentinels
//! - The applier, which validates values and writes the legal ones
//! - The loader, which reads the values back from the top of EEPROM
//!
//! # Example
//!
//! ```ignore
//! use avrcal_core::{Calibrator, Chip};
//!
//! let mut cal = Calibrator::for_chip(Chip::ATmega328P, eeprom, osccal, vcc);
//! cal.load_from_storage();
//! ```

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod apply;
pub mod calibrator;
pub mod loader;
pub mod trim;
pub mod variant;

#[cfg(test)]
mod mock;

pub use apply::{ApplyReport, OscillatorOutcome, ReferenceOutcome};
pub use calibrator::Calibrator;
pub use loader::{read_stored, StoredCalibration};
pub use trim::{OscillatorTrim, ReferenceTrim, NO_INTREF, NO_OSCCAL};
pub use variant::{Chip, ChipVariant, OscillatorRange, ReferencePolicy, StorageLayout};
