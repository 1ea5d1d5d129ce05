//! Page cache residency via mincore(2).

use std::io;
use std::path::Path;

/// Residency of one file's pages in the OS page cache.
#[derive(Debug, Clone, Copy)]
pub struct Residency {
    pub page_size: usize,
    pub total_pages: usize,
    pub resident_pages: usize,
}

impl Residency {
    pub fn resident_bytes(&self) -> u64 {
        self.resident_pages as u64 * self.page_size as u64
    }

    pub fn percent(&self) -> f64 {
        if self.total_pages == 0 {
            0.0
        } else {
            self.resident_pages as f64 / self.total_pages as f64 * 100.0
        }
    }
}

#[cfg(target_os = "linux")]
pub fn residency(path: &Path) -> io::Result<Residency> {
    use std::fs::File;
    use std::os::fd::AsRawFd;

    let file = File::open(path)?;
    let len = file.metadata()?.len();
    let page_size = page_size();
    if len == 0 {
        return Ok(Residency {
            page_size,
            total_pages: 0,
            resident_pages: 0,
        });
    }
    let total_pages = len.div_ceil(page_size as u64) as usize;

    // SAFETY: PROT_NONE only reserves the address range; the fd stays
    // open until `file` drops, after the mapping is gone.
    unsafe {
        let addr = libc::mmap(
            std::ptr::null_mut(),
            len as libc::size_t,
            libc::PROT_NONE,
            libc::MAP_SHARED,
            file.as_raw_fd(),
            0,
        );
        if addr == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }

        let mut pages = vec![0u8; total_pages];
        let rc = libc::mincore(addr, len as libc::size_t, pages.as_mut_ptr());
        let mincore_err = io::Error::last_os_error();
        libc::munmap(addr, len as libc::size_t);
        if rc != 0 {
            return Err(mincore_err);
        }

        let resident_pages = pages.iter().filter(|&&page| page & 1 == 1).count();
        Ok(Residency {
            page_size,
            total_pages,
            resident_pages,
        })
    }
}

#[cfg(not(target_os = "linux"))]
pub fn residency(_path: &Path) -> io::Result<Residency> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "page cache inspection requires Linux",
    ))
}

#[cfg(target_os = "linux")]
fn page_size() -> usize {
    // SAFETY: sysconf has no side effects.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 { size as usize } else { 4096 }
}
