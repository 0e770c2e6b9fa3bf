//! Peripheral access for the AXI-Lite AES key register files.
//!
//! Two generated peripherals share one layout pattern: a handful of 32-bit
//! slave registers at consecutive word offsets. `register` describes each
//! variant, `device` reads and writes them over any `BusAccess`, `mmio` is
//! the volatile accessor for a real bus, and `self_test` checks that a base
//! address really points at a correctly wired instance.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod device;
pub mod mmio;
pub mod register;

#[cfg(test)]
mod fake;

pub use device::{Access, BusAccess, Device, Registers};
pub use mmio::Mmio;
pub use register::{
    AesKeyCntl, AesKeyCntlRegister, AxiliteAesKey, AxiliteAesKeyRegister, Register, RegisterFile,
    RegisterOffset, RegisterValue,
};
pub use self_test::{SelfTestError, SelfTestResult};

pub type AesKeyCntlDevice<A> = Device<A, AesKeyCntl>;
pub type AxiliteAesKeyDevice<A> = Device<A, AxiliteAesKey>;

/// Self-test the `aes_key_cntl` instance at `base`.
///
/// # Safety
///
/// Same contract as [`Mmio::new`]. Overwrites every register.
pub unsafe fn aes_key_cntl_self_test(base: usize) -> SelfTestResult<AesKeyCntlRegister> {
    AesKeyCntlDevice::new(Mmio::new(base)).self_test()
}

/// Self-test the `axilite_aes_key` instance at `base`.
///
/// # Safety
///
/// Same contract as [`Mmio::new`]. Overwrites every register.
pub unsafe fn axilite_aes_key_self_test(base: usize) -> SelfTestResult<AxiliteAesKeyRegister> {
    AxiliteAesKeyDevice::new(Mmio::new(base)).self_test()
}
