use aes_key_pac::{BusAccess, Device, RegisterFile};

pub fn registers_dump<A, F>(device: &Device<A, F>, base: u64)
where A: BusAccess,
      F: RegisterFile,
{
    println!("{}\t@ 0x{base:08x}", device.name());
    for register in device.registers() {
        println!("\t+0x{:02x}\t{:<8}\t0x{:08x}", register.offset(), register.name(), register.read());
    }
}
