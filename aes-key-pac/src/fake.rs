//! In-memory stand-in for a register file on a bus.

use core::cell::Cell;

use crate::device::BusAccess;
use crate::register::{RegisterOffset, RegisterValue, REGISTER_BYTES};

/// Words of address space modelled, deliberately larger than either
/// register file so stray accesses past the end are visible.
pub(crate) const WORDS: usize = 16;

pub(crate) struct FakeBus {
    words: [Cell<RegisterValue>; WORDS],
    implemented: [RegisterValue; WORDS],
    floating: Option<RegisterValue>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl FakeBus {
    pub(crate) fn new() -> Self {
        Self {
            words: Default::default(),
            implemented: [RegisterValue::MAX; WORDS],
            floating: None,
            reads: Cell::new(0),
            writes: Cell::new(0),
        }
    }

    /// Nothing answers at this address: writes vanish, reads return `value`.
    pub(crate) fn floating(value: RegisterValue) -> Self {
        Self {
            floating: Some(value),
            ..Self::new()
        }
    }

    pub(crate) fn with_implemented(mut self, offset: RegisterOffset, mask: RegisterValue) -> Self {
        self.implemented[Self::index(offset)] = mask;
        self
    }

    fn index(offset: RegisterOffset) -> usize {
        assert!(offset % REGISTER_BYTES == 0);
        offset / REGISTER_BYTES
    }

    /// Peek without counting a bus transaction.
    pub(crate) fn word(&self, offset: RegisterOffset) -> RegisterValue {
        self.words[Self::index(offset)].get()
    }

    /// Hardware-side change, not a bus transaction.
    pub(crate) fn set_word(&self, offset: RegisterOffset, value: RegisterValue) {
        let index = Self::index(offset);
        self.words[index].set(value & self.implemented[index]);
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.get()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl BusAccess for FakeBus {
    fn read(&self, offset: RegisterOffset) -> RegisterValue {
        self.reads.set(self.reads.get() + 1);
        match self.floating {
            Some(value) => value,
            None => self.word(offset),
        }
    }

    fn write(&self, offset: RegisterOffset, value: RegisterValue) {
        self.writes.set(self.writes.get() + 1);
        if self.floating.is_none() {
            self.set_word(offset, value);
        }
    }
}
