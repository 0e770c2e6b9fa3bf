use core::cell::Cell;
use core::marker::PhantomData;

use crate::device::BusAccess;
use crate::register::{RegisterOffset, RegisterValue};

/// Volatile load/store access to a register file mapped at `base`.
///
/// Each `read` and `write` is a single 32-bit volatile access. The compiler
/// neither elides, merges nor reorders volatile accesses relative to each
/// other, so program order is bus order as long as the mapping itself is
/// uncached device memory. That is the caller's job: on a cached mapping
/// read-after-write checks see the cache, not the peripheral.
///
/// `Mmio` is `Send` but not `Sync`. Nothing serializes multi-register
/// sequences, so sharing one instance between threads has to be a
/// deliberate choice made with external locking.
pub struct Mmio {
    base: usize,
    not_sync: PhantomData<Cell<()>>,
}

impl Mmio {
    /// # Safety
    ///
    /// `base` must be the 4-byte aligned address of a register file that is
    /// mapped, uncached, and at least as large as every offset later passed
    /// to `read`/`write`. Nothing here can check that. An access to an
    /// address with no slave behind it raises a bus fault or stalls the bus
    /// forever; neither comes back to the caller as an error.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            base,
            not_sync: PhantomData,
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    fn address(&self, offset: RegisterOffset) -> usize {
        self.base + offset
    }
}

impl BusAccess for Mmio {
    fn read(&self, offset: RegisterOffset) -> RegisterValue {
        let p = self.address(offset) as *const RegisterValue;
        unsafe {
            p.read_volatile()
        }
    }

    fn write(&self, offset: RegisterOffset, value: RegisterValue) {
        let p = self.address(offset) as *mut RegisterValue;
        unsafe {
            p.write_volatile(value);
        }
    }
}
