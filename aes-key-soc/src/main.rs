#![no_std]
#![no_main]

extern crate panic_halt;

use embedded_hal::prelude::*;
use riscv_rt::entry;

use aes_key_pac::{
    AesKeyCntlDevice, AxiliteAesKeyDevice, BusAccess, Device, Mmio, Register, RegisterFile,
    SelfTestError,
};

mod uart;

use uart::Uart;

// SoC address map. Each AXI-Lite slave gets a 64KiB window behind the bridge.
const UART_BASE: usize            = 0x8000_0000;
const AES_KEY_CNTL_BASE: usize    = 0x8010_0000;
const AXILITE_AES_KEY_BASE: usize = 0x8011_0000;

const CPU_FREQUENCY_HZ: u32 = 60_000_000;

fn report_register<R: Register>(uart: &Uart, register: R) {
    uart.write_str(register.name());
    uart.write_str(" @ +");
    uart.write_hex_u8(register.offset() as u8);
}

/// Print the verdict for one instance, e.g.
/// `aes_key_cntl 80100000 fail slv_reg2 @ +08 wrote 00000030 read 00000000`.
fn self_test<A, F>(device: &Device<A, F>, base: usize, uart: &Uart) -> bool
where A: BusAccess,
      F: RegisterFile,
{
    uart.write_str(device.name());
    uart.write_char(Uart::SPACE);
    uart.write_hex_u32(base as u32);
    uart.write_char(Uart::SPACE);

    let result = device.self_test();
    match result {
        Ok(()) => {
            uart.write_str("pass");
        },
        Err(SelfTestError::Mismatch { register, expected, actual }) => {
            uart.write_str("fail ");
            report_register(uart, register);
            uart.write_str(" wrote ");
            uart.write_hex_u32(expected);
            uart.write_str(" read ");
            uart.write_hex_u32(actual);
        },
    }
    uart.write_char(Uart::EOL);

    result.is_ok()
}

#[entry]
fn main() -> ! {
    let uart = unsafe { Uart::new(UART_BASE) };
    let mut delay = riscv::delay::McycleDelay::new(CPU_FREQUENCY_HZ);

    // Both peripherals only hold key material once software loads it, so
    // a destructive self-test right out of reset loses nothing.
    let aes_key_cntl = AesKeyCntlDevice::new(unsafe { Mmio::new(AES_KEY_CNTL_BASE) });
    let axilite_aes_key = AxiliteAesKeyDevice::new(unsafe { Mmio::new(AXILITE_AES_KEY_BASE) });

    uart.write_str("reset\n");

    let mut pass = true;
    pass &= self_test(&aes_key_cntl, AES_KEY_CNTL_BASE, &uart);
    pass &= self_test(&axilite_aes_key, AXILITE_AES_KEY_BASE, &uart);

    loop {
        uart.write_str(if pass { "ok\n" } else { "FAIL\n" });
        delay.delay_ms(1000u32);
    }
}
