//! Mock hardware shared by the unit tests

use avrcal_hal::{Eeprom, OscillatorCalibration, VoltageReference, ERASED_BYTE};

/// Factory default the mock register starts from
pub const FACTORY_OSCCAL: u8 = 0x9A;

/// EEPROM backed by an array, erased by default
pub struct MockEeprom<const N: usize> {
    pub cells: [u8; N],
}

impl<const N: usize> MockEeprom<N> {
    pub fn erased() -> Self {
        Self {
            cells: [ERASED_BYTE; N],
        }
    }

    /// Store a byte `offset` cells below the last one
    pub fn set_from_end(&mut self, offset: usize, value: u8) {
        self.cells[N - 1 - offset] = value;
    }

    /// Store a little-endian word with its low byte `offset` cells below the last one
    pub fn set_word_from_end(&mut self, offset: usize, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.set_from_end(offset, lo);
        self.set_from_end(offset - 1, hi);
    }
}

impl<const N: usize> Eeprom for MockEeprom<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read_byte(&mut self, address: usize) -> u8 {
        self.cells.get(address).copied().unwrap_or(ERASED_BYTE)
    }
}

/// OSCCAL register that counts writes
pub struct MockOscillator {
    pub value: u8,
    pub writes: usize,
}

impl MockOscillator {
    pub fn factory() -> Self {
        Self {
            value: FACTORY_OSCCAL,
            writes: 0,
        }
    }
}

impl OscillatorCalibration for MockOscillator {
    fn read(&self) -> u8 {
        self.value
    }

    fn write(&mut self, value: u8) {
        self.value = value;
        self.writes += 1;
    }
}

/// Reference setter that records its calls
#[derive(Default)]
pub struct MockReference {
    pub last: Option<i16>,
    pub calls: usize,
}

impl VoltageReference for MockReference {
    fn set_intref(&mut self, value: i16) {
        self.last = Some(value);
        self.calls += 1;
    }
}
