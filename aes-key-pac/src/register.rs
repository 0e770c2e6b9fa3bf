use core::fmt;

/// Byte offset of a register from the peripheral base address.
pub type RegisterOffset = usize;
pub type RegisterValue = u32;

/// Width of every register on the AXI-Lite slave interface, in bytes.
pub const REGISTER_BYTES: RegisterOffset = 4;

/// A single register in a peripheral's register file.
///
/// Implemented by a field-less enum per peripheral variant, so the only
/// offsets a caller can name are the ones the hardware was generated with.
pub trait Register: Copy + Eq + fmt::Debug + 'static {
    fn offset(self) -> RegisterOffset;
    fn name(self) -> &'static str;

    /// Bits that exist in the hardware. Writes to other bits are dropped and
    /// they read back as zero.
    fn implemented(self) -> RegisterValue {
        RegisterValue::MAX
    }
}

/// Description of one peripheral variant's register file.
pub trait RegisterFile {
    type Register: Register;

    const NAME: &'static str;

    /// Every register, in ascending offset order.
    const REGISTERS: &'static [Self::Register];

    fn register_by_name(name: &str) -> Option<Self::Register> {
        Self::REGISTERS.iter().copied().find(|r| r.name() == name)
    }

    /// Number of bytes of address space the register file occupies.
    fn span() -> RegisterOffset {
        Self::REGISTERS
            .iter()
            .map(|r| r.offset() + REGISTER_BYTES)
            .max()
            .unwrap_or(0)
    }
}

///////////////////////////////////////////////////////////////////////
// aes_key_cntl

/// AES key control peripheral: four key words plus a control register.
pub struct AesKeyCntl;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(usize)]
pub enum AesKeyCntlRegister {
    SlvReg0 = 0x00,
    SlvReg1 = 0x04,
    SlvReg2 = 0x08,
    SlvReg3 = 0x0c,
    SlvReg4 = 0x10,
}

impl Register for AesKeyCntlRegister {
    fn offset(self) -> RegisterOffset {
        self as RegisterOffset
    }

    fn name(self) -> &'static str {
        match self {
            Self::SlvReg0 => "slv_reg0",
            Self::SlvReg1 => "slv_reg1",
            Self::SlvReg2 => "slv_reg2",
            Self::SlvReg3 => "slv_reg3",
            Self::SlvReg4 => "slv_reg4",
        }
    }
}

impl RegisterFile for AesKeyCntl {
    type Register = AesKeyCntlRegister;

    const NAME: &'static str = "aes_key_cntl";

    const REGISTERS: &'static [AesKeyCntlRegister] = &[
        AesKeyCntlRegister::SlvReg0,
        AesKeyCntlRegister::SlvReg1,
        AesKeyCntlRegister::SlvReg2,
        AesKeyCntlRegister::SlvReg3,
        AesKeyCntlRegister::SlvReg4,
    ];
}

///////////////////////////////////////////////////////////////////////
// axilite_aes_key

/// AXI-Lite AES key peripheral: four key words, no control register.
pub struct AxiliteAesKey;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(usize)]
pub enum AxiliteAesKeyRegister {
    SlvReg0 = 0x00,
    SlvReg1 = 0x04,
    SlvReg2 = 0x08,
    SlvReg3 = 0x0c,
}

impl Register for AxiliteAesKeyRegister {
    fn offset(self) -> RegisterOffset {
        self as RegisterOffset
    }

    fn name(self) -> &'static str {
        match self {
            Self::SlvReg0 => "slv_reg0",
            Self::SlvReg1 => "slv_reg1",
            Self::SlvReg2 => "slv_reg2",
            Self::SlvReg3 => "slv_reg3",
        }
    }
}

impl RegisterFile for AxiliteAesKey {
    type Register = AxiliteAesKeyRegister;

    const NAME: &'static str = "axilite_aes_key";

    const REGISTERS: &'static [AxiliteAesKeyRegister] = &[
        AxiliteAesKeyRegister::SlvReg0,
        AxiliteAesKeyRegister::SlvReg1,
        AxiliteAesKeyRegister::SlvReg2,
        AxiliteAesKeyRegister::SlvReg3,
    ];
}
