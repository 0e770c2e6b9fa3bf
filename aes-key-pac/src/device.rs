use core::marker::PhantomData;

use crate::register::*;
use crate::self_test::{self, SelfTestResult};

/// Raw 32-bit register transactions at a byte offset from some base.
///
/// Implementations perform exactly one bus transaction per call, in program
/// order, with no caching, buffering or combining. Neither operation can
/// report failure: a bad base address faults or hangs the caller instead.
pub trait BusAccess {
    fn read(&self, offset: RegisterOffset) -> RegisterValue;
    fn write(&self, offset: RegisterOffset, value: RegisterValue);
}

impl<A> BusAccess for &A
where A: BusAccess + ?Sized,
{
    fn read(&self, offset: RegisterOffset) -> RegisterValue {
        (**self).read(offset)
    }

    fn write(&self, offset: RegisterOffset, value: RegisterValue) {
        (**self).write(offset, value)
    }
}

/// Handle to one register of a device.
pub struct Access<'a, A, R>
where A: BusAccess,
      R: Register,
{
    access: &'a A,
    register: R,
}

impl<'a, A, R> Access<'a, A, R>
where A: BusAccess,
      R: Register,
{
    fn new(access: &'a A, register: R) -> Self {
        Self {
            access,
            register,
        }
    }

    pub fn register(&self) -> R {
        self.register
    }

    pub fn offset(&self) -> RegisterOffset {
        self.register.offset()
    }

    pub fn name(&self) -> &'static str {
        self.register.name()
    }

    pub fn implemented(&self) -> RegisterValue {
        self.register.implemented()
    }

    pub fn read(&self) -> RegisterValue {
        self.access.read(self.offset())
    }

    pub fn write(&self, value: RegisterValue) {
        self.access.write(self.offset(), value)
    }
}

/// Every register of a device, in offset order.
pub struct Registers<'a, A, F>
where A: BusAccess,
      F: RegisterFile,
{
    access: &'a A,
    n: usize,
    file: PhantomData<F>,
}

impl<'a, A, F> Registers<'a, A, F>
where A: BusAccess,
      F: RegisterFile,
{
    fn new(access: &'a A) -> Self {
        Self {
            access,
            n: 0,
            file: PhantomData,
        }
    }
}

impl<'a, A, F> Iterator for Registers<'a, A, F>
where A: BusAccess,
      F: RegisterFile,
{
    type Item = Access<'a, A, F::Register>;

    fn next(&mut self) -> Option<Self::Item> {
        let register = *F::REGISTERS.get(self.n)?;
        self.n += 1;
        Some(Access::new(self.access, register))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = F::REGISTERS.len() - self.n;
        (remaining, Some(remaining))
    }
}

impl<A, F> ExactSizeIterator for Registers<'_, A, F>
where A: BusAccess,
      F: RegisterFile,
{}

/// One instance of a register file peripheral on a bus.
///
/// Holds no copy of register state; every read goes to the hardware.
pub struct Device<A, F>
where A: BusAccess,
      F: RegisterFile,
{
    access: A,
    file: PhantomData<F>,
}

impl<A, F> Device<A, F>
where A: BusAccess,
      F: RegisterFile,
{
    pub fn new(access: A) -> Self {
        Self {
            access,
            file: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        F::NAME
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    pub fn register(&self, register: F::Register) -> Access<'_, A, F::Register> {
        Access::new(&self.access, register)
    }

    pub fn registers(&self) -> Registers<'_, A, F> {
        Registers::new(&self.access)
    }

    pub fn read(&self, register: F::Register) -> RegisterValue {
        self.register(register).read()
    }

    pub fn write(&self, register: F::Register, value: RegisterValue) {
        self.register(register).write(value)
    }

    /// Destructive register read/write check. See [`self_test::run`].
    pub fn self_test(&self) -> SelfTestResult<F::Register> {
        self_test::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeBus;
    use crate::{AesKeyCntlDevice, AxiliteAesKeyDevice};

    #[test]
    fn write_then_read() {
        let device = AesKeyCntlDevice::new(FakeBus::new());
        device.write(AesKeyCntlRegister::SlvReg0, 0xdead_beef);
        assert_eq!(device.read(AesKeyCntlRegister::SlvReg0), 0xdead_beef);
    }

    #[test]
    fn write_reaches_offset() {
        let device = AesKeyCntlDevice::new(FakeBus::new());
        device.write(AesKeyCntlRegister::SlvReg4, 0x0000_0001);
        assert_eq!(device.access().word(0x10), 0x0000_0001);
        for offset in [0x00, 0x04, 0x08, 0x0c] {
            assert_eq!(device.access().word(offset), 0);
        }
    }

    #[test]
    fn no_shadow_copy() {
        let device = AxiliteAesKeyDevice::new(FakeBus::new());
        device.write(AxiliteAesKeyRegister::SlvReg2, 0x1234_5678);
        device.access().set_word(0x08, 0x8765_4321);
        assert_eq!(device.read(AxiliteAesKeyRegister::SlvReg2), 0x8765_4321);
    }

    #[test]
    fn narrow_register_reads_zero_high_bits() {
        let bus = FakeBus::new().with_implemented(0x04, 0x0000_00ff);
        let device = AesKeyCntlDevice::new(bus);
        device.write(AesKeyCntlRegister::SlvReg1, 0xdead_beef);
        assert_eq!(device.read(AesKeyCntlRegister::SlvReg1), 0x0000_00ef);
    }

    const VALUES: [RegisterValue; 6] = [
        0x0000_0000, 0xffff_ffff, 0xdead_beef, 0x5555_5555, 0xaaaa_aaaa, 0x0000_0001,
    ];

    fn write_then_read_every_register<F: RegisterFile>() {
        let device: Device<_, F> = Device::new(FakeBus::new());
        for &register in F::REGISTERS {
            for value in VALUES {
                device.write(register, value);
                assert_eq!(device.read(register), value, "{} 0x{:08x}", register.name(), value);
            }
        }
    }

    #[test]
    fn aes_key_cntl_write_then_read_every_register() {
        write_then_read_every_register::<AesKeyCntl>();
    }

    #[test]
    fn axilite_aes_key_write_then_read_every_register() {
        write_then_read_every_register::<AxiliteAesKey>();
    }

    #[test]
    fn register_handle() {
        let device = AesKeyCntlDevice::new(FakeBus::new());
        let control = device.register(AesKeyCntlRegister::SlvReg4);
        assert_eq!(control.offset(), 0x10);
        control.write(0x0000_00f1);
        assert_eq!(control.read(), 0x0000_00f1);
        assert_eq!(device.access().reads(), 1);
        assert_eq!(device.access().writes(), 1);
    }

    #[test]
    fn one_transaction_per_access() {
        let device = AxiliteAesKeyDevice::new(FakeBus::new());
        device.write(AxiliteAesKeyRegister::SlvReg0, 1);
        let _ = device.read(AxiliteAesKeyRegister::SlvReg0);
        let _ = device.read(AxiliteAesKeyRegister::SlvReg0);
        assert_eq!(device.access().writes(), 1);
        assert_eq!(device.access().reads(), 2);
    }

    #[test]
    fn registers_in_offset_order() {
        let device = AesKeyCntlDevice::new(FakeBus::new());
        let registers = device.registers();
        assert_eq!(registers.len(), 5);

        let mut expected_offset = 0;
        for register in registers {
            assert_eq!(register.offset(), expected_offset);
            expected_offset += REGISTER_BYTES;
        }
        assert_eq!(expected_offset, AesKeyCntl::span());
    }

    #[test]
    fn borrowed_access() {
        let bus = FakeBus::new();
        {
            let device = AxiliteAesKeyDevice::new(&bus);
            device.write(AxiliteAesKeyRegister::SlvReg3, 0xcafe_f00d);
        }
        assert_eq!(bus.word(0x0c), 0xcafe_f00d);
    }

    #[test]
    fn names() {
        let a = AesKeyCntlDevice::new(FakeBus::new());
        let b = AxiliteAesKeyDevice::new(FakeBus::new());
        assert_eq!(a.name(), "aes_key_cntl");
        assert_eq!(b.name(), "axilite_aes_key");
        assert_eq!(a.register(AesKeyCntlRegister::SlvReg3).name(), "slv_reg3");
    }
}
