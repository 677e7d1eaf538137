//! avrcal Hardware Abstraction Layer
//!
//! This crate defines the hardware boundary of the calibration loader.
//! Chip support code implements these traits on top of the real
//! peripherals; tests implement them on plain memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Startup code (board crate, sketch)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  avrcal-core (Applier + Loader)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  avrcal-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::Eeprom`] - Read-only access to non-volatile storage
//! - [`osccal::OscillatorCalibration`] - The OSCCAL register
//! - [`vref::VoltageReference`] - The internal reference trim setter

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod osccal;
pub mod storage;
pub mod vref;

// Re-export key traits at crate root for convenience
pub use osccal::OscillatorCalibration;
pub use storage::{Eeprom, ERASED_BYTE};
pub use vref::{NoVoltageReference, VoltageReference};

#[cfg(feature = "embedded-storage")]
pub use storage::ReadStorageEeprom;
