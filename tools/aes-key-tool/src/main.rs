use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, Args, ArgEnum};
use console::{style, Color};
use thiserror::Error;

use aes_key_pac::{AesKeyCntl, AxiliteAesKey, Device, Mmio, RegisterFile, RegisterValue};

use crate::devmem::DevMem;
use crate::dump::registers_dump;

mod devmem;
mod dump;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("{}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("{variant} has no register {name:?}")]
    UnknownRegister { variant: &'static str, name: String },
    #[error("self-test overwrites the loaded key; pass --yes to run it anyway")]
    NotConfirmed,
    #[error("{variant} self-test failed: {detail}")]
    SelfTest { variant: &'static str, detail: String },
}

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Variant {
    AesKeyCntl,
    AxiliteAesKey,
}

#[derive(Parser)]
#[clap(author, version, about, long_about=None)]
pub(crate) struct Cli {
    /// Which register file layout the peripheral was generated with.
    #[clap(long, arg_enum)]
    pub variant: Variant,

    /// Physical base address of the peripheral, decimal or 0x-prefixed hex.
    #[clap(long, parse(try_from_str=parse_u64))]
    pub base: u64,

    #[clap(long, default_value="/dev/mem", parse(from_os_str))]
    pub device: PathBuf,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub(crate) struct ReadArgs {
    /// slv_reg0, slv_reg1, ...
    register: String,
}

#[derive(Args)]
pub(crate) struct WriteArgs {
    register: String,

    #[clap(parse(try_from_str=parse_u32))]
    value: RegisterValue,
}

#[derive(Args)]
pub(crate) struct SelfTestArgs {
    /// Accept that every register, key material included, is overwritten.
    #[clap(long)]
    yes: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    #[clap(name="read")]
    Read(ReadArgs),

    #[clap(name="write")]
    Write(WriteArgs),

    #[clap(name="dump")]
    Dump,

    #[clap(name="self-test")]
    SelfTest(SelfTestArgs),
}

fn parse_u64(s: &str) -> std::result::Result<u64, ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.parse(),
    }
}

fn parse_u32(s: &str) -> std::result::Result<u32, ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => s.parse(),
    }
}

fn lookup<F: RegisterFile>(name: &str) -> Result<F::Register> {
    F::register_by_name(name).ok_or_else(|| Error::UnknownRegister {
        variant: F::NAME,
        name: name.to_string(),
    })
}

/// What to do once the peripheral is mapped. Resolved up front so bad
/// arguments never touch the hardware.
enum Action<F: RegisterFile> {
    Read(F::Register),
    Write(F::Register, RegisterValue),
    Dump,
    SelfTest,
}

fn action<F: RegisterFile>(command: &Commands) -> Result<Action<F>> {
    Ok(match command {
        Commands::Read(a) => Action::Read(lookup::<F>(&a.register)?),
        Commands::Write(a) => Action::Write(lookup::<F>(&a.register)?, a.value),
        Commands::Dump => Action::Dump,
        Commands::SelfTest(a) => {
            if !a.yes {
                return Err(Error::NotConfirmed);
            }
            Action::SelfTest
        },
    })
}

fn run<F: RegisterFile>(args: &Cli) -> Result<()> {
    let action = action::<F>(&args.command)?;

    let devmem = DevMem::open(&args.device, args.base, F::span())
        .map_err(|source| Error::Open { path: args.device.clone(), source })?;
    let device: Device<&Mmio, F> = Device::new(devmem.mmio());

    match action {
        Action::Read(register) => {
            println!("0x{:08x}", device.read(register));
        },
        Action::Write(register, value) => {
            device.write(register, value);
        },
        Action::Dump => {
            registers_dump(&device, args.base);
        },
        Action::SelfTest => {
            match device.self_test() {
                Ok(()) => {
                    println!("{}\t@ 0x{:08x}\t{}", F::NAME, args.base, style("PASS").fg(Color::Green));
                },
                Err(e) => {
                    println!("{}\t@ 0x{:08x}\t{}", F::NAME, args.base, style("FAIL").fg(Color::Red));
                    return Err(Error::SelfTest { variant: F::NAME, detail: e.to_string() });
                },
            }
        },
    }

    Ok(())
}

fn main() {
    let args = Cli::parse();

    let result = match args.variant {
        Variant::AesKeyCntl    => run::<AesKeyCntl>(&args),
        Variant::AxiliteAesKey => run::<AxiliteAesKey>(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
