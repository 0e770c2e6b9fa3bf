use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::ptr::{self, NonNull};
use std::io;

use aes_key_pac::Mmio;

/// Page-aligned window covering `[address, address + length)`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Window {
    pub page_base: u64,
    pub page_offset: usize,
    pub map_length: usize,
}

impl Window {
    pub(crate) fn new(address: u64, length: usize, page_size: usize) -> Self {
        assert!(page_size.is_power_of_two());
        let page_mask = page_size as u64 - 1;
        let page_base = address & !page_mask;
        let page_offset = (address - page_base) as usize;
        let map_length = (page_offset + length + page_size - 1) & !(page_size - 1);

        Self {
            page_base,
            page_offset,
            map_length,
        }
    }
}

/// `mmap` file offset for `page_base`, refusing any base the offset type
/// cannot hold rather than truncating it onto another address.
pub(crate) fn file_offset<T: TryFrom<u64>>(page_base: u64) -> io::Result<T> {
    T::try_from(page_base).map_err(|_| io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("base 0x{page_base:x} does not fit in a file offset"),
    ))
}

/// Physical address range mapped into this process through `/dev/mem`.
///
/// Opened with `O_SYNC`, which on ARM and RISC-V Linux gives an uncached
/// device mapping. Without it the self-test reads back the cache.
pub(crate) struct DevMem {
    map: NonNull<libc::c_void>,
    window: Window,
    mmio: Mmio,
}

impl DevMem {
    pub(crate) fn open(path: &Path, address: u64, length: usize) -> io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)?;

        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if page_size <= 0 {
            return Err(io::Error::last_os_error());
        }
        let window = Window::new(address, length, page_size as usize);

        // 64-bit offset even on 32-bit targets, where AXI windows commonly
        // sit at or above 0x8000_0000.
        let offset: libc::off64_t = file_offset(window.page_base)?;

        let map = unsafe {
            libc::mmap64(
                ptr::null_mut(),
                window.map_length,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                offset,
            )
        };
        if map == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }
        let map = NonNull::new(map).ok_or_else(|| io::Error::from(io::ErrorKind::Other))?;

        // Mapping stays valid after the descriptor is closed.
        let base = map.as_ptr() as usize + window.page_offset;
        let mmio = unsafe { Mmio::new(base) };

        Ok(Self {
            map,
            window,
            mmio,
        })
    }

    pub(crate) fn mmio(&self) -> &Mmio {
        &self.mmio
    }
}

impl Drop for DevMem {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.map.as_ptr(), self.window.map_length);
        }
    }
}
