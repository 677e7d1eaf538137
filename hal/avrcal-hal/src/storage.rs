//! Non-volatile storage abstractions
//!
//! The calibration values live in the last few cells of the on-chip
//! EEPROM, so besides plain absolute reads the [`Eeprom`] trait offers
//! reads addressed backwards from the last cell (`E2END`).

/// Value of an erased (never written) EEPROM cell
pub const ERASED_BYTE: u8 = 0xFF;

/// Value of an erased 16-bit EEPROM word
pub const ERASED_WORD: u16 = 0xFFFF;

/// Read-only byte-addressable non-volatile storage
///
/// Reads are treated as immediate and always succeeding. Implementations
/// that can fail must decide on a value themselves; returning
/// [`ERASED_BYTE`] makes the loader treat the cell as "not calibrated".
pub trait Eeprom {
    /// Total size of the storage in bytes
    fn capacity(&self) -> usize;

    /// Read a single byte at an absolute address
    fn read_byte(&mut self, address: usize) -> u8;

    /// Read a little-endian 16-bit word starting at an absolute address
    ///
    /// AVR stores words low byte first, same as `eeprom_read_word`.
    fn read_word(&mut self, address: usize) -> u16 {
        let lo = self.read_byte(address);
        let hi = self.read_byte(address.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Absolute address of the byte `offset` cells below the last one
    ///
    /// Offset 0 is `E2END`. Returns `None` when the storage is too small.
    fn address_from_end(&self, offset: usize) -> Option<usize> {
        self.capacity().checked_sub(1)?.checked_sub(offset)
    }

    /// Read the byte `offset` cells below the last one
    fn read_byte_from_end(&mut self, offset: usize) -> u8 {
        match self.address_from_end(offset) {
            Some(address) => self.read_byte(address),
            None => ERASED_BYTE,
        }
    }

    /// Read the word whose low byte sits `offset` cells below the last one
    ///
    /// The high byte is at `offset - 1`, so `offset` must be at least 1.
    fn read_word_from_end(&mut self, offset: usize) -> u16 {
        match self.address_from_end(offset) {
            Some(address) if offset >= 1 => self.read_word(address),
            _ => ERASED_WORD,
        }
    }
}

impl<T: Eeprom + ?Sized> Eeprom for &mut T {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read_byte(&mut self, address: usize) -> u8 {
        (**self).read_byte(address)
    }

    fn read_word(&mut self, address: usize) -> u16 {
        (**self).read_word(address)
    }
}

/// [`Eeprom`] on top of an `embedded-storage` read-only device
///
/// Device errors are absorbed: the failed cell reads as erased and the
/// error is counted so the caller can inspect it after startup.
#[cfg(feature = "embedded-storage")]
pub struct ReadStorageEeprom<S> {
    storage: S,
    read_errors: u16,
}

#[cfg(feature = "embedded-storage")]
impl<S: embedded_storage::ReadStorage> ReadStorageEeprom<S> {
    /// Wrap a storage device
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            read_errors: 0,
        }
    }

    /// Number of reads that failed and were replaced by erased values
    pub fn read_errors(&self) -> u16 {
        self.read_errors
    }

    /// Release the wrapped device
    pub fn into_inner(self) -> S {
        self.storage
    }

    fn read_into(&mut self, address: usize, buf: &mut [u8]) {
        let ok = u32::try_from(address)
            .ok()
            .map(|offset| self.storage.read(offset, buf).is_ok())
            .unwrap_or(false);

        if !ok {
            warn!("EEPROM read at {} failed, using erased value", address);
            self.read_errors = self.read_errors.saturating_add(1);
            buf.fill(ERASED_BYTE);
        }
    }
}

#[cfg(feature = "embedded-storage")]
impl<S: embedded_storage::ReadStorage> Eeprom for ReadStorageEeprom<S> {
    fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    fn read_byte(&mut self, address: usize) -> u8 {
        let mut buf = [ERASED_BYTE; 1];
        self.read_into(address, &mut buf);
        buf[0]
    }

    fn read_word(&mut self, address: usize) -> u16 {
        let mut buf = [ERASED_BYTE; 2];
        self.read_into(address, &mut buf);
        u16::from_le_bytes(buf)
    }
}
