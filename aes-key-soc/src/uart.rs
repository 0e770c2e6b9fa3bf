use aes_key_pac::{BusAccess, Mmio, RegisterOffset};

/// Offensively dumb UART, completely blocks on every transmitted byte.
pub struct Uart {
    bus: Mmio,
}

const HEXCHAR: &[u8; 16] = b"0123456789abcdef";

impl Uart {
    pub const EOL: u8 = b'\n';
    pub const SPACE: u8 = b' ';

    const TX_DATA: RegisterOffset = 4 * 4;
    const TX_RDY: RegisterOffset = 5 * 4;

    /// # Safety
    ///
    /// `base` must be the UART's register block.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            bus: Mmio::new(base),
        }
    }

    fn tx_rdy(&self) -> bool {
        self.bus.read(Self::TX_RDY) != 0
    }

    pub fn write_char(&self, c: u8) {
        while !self.tx_rdy() {}
        self.bus.write(Self::TX_DATA, c as u32);
    }

    fn write_hex(&self, v: u32, digits: usize) {
        let mut x = v << ((8 - digits) * 4);
        for _ in 0..digits {
            self.write_char(HEXCHAR[(x >> 28) as usize]);
            x <<= 4;
        }
    }

    pub fn write_hex_u8(&self, v: u8) {
        self.write_hex(v as u32, 2);
    }

    pub fn write_hex_u32(&self, v: u32) {
        self.write_hex(v, 8);
    }

    pub fn write_str(&self, s: &str) {
        for &c in s.as_bytes() {
            self.write_char(c);
        }
    }
}
