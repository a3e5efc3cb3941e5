use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    ffi::{CStr, CString},
    io,
    os::unix::ffi::OsStrExt,
    path::{Path, PathBuf},
    time::Instant,
};

pub use self::{clock::*, host::*};

mod clock {
    use super::*;

    pub trait Clock {
        fn now(&self) -> Instant;
    }

    #[derive(Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> Instant {
            Instant::now()
        }
    }

    /// a mock clock.
    #[derive(Default)]
    #[allow(dead_code, reason = "this is a testing utility.")]
    pub struct MockClock {
        times: RefCell<VecDeque<Instant>>,
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            let MockClock { times } = self;

            times
                .borrow_mut()
                .pop_front()
                .expect("mock times should not be empty")
        }
    }

    #[allow(dead_code, reason = "this is a testing utility.")]
    impl MockClock {
        /// returns a clock that ticks `count` times, `step` apart.
        pub fn ticking(count: usize, step: std::time::Duration) -> Self {
            let start = Instant::now();
            let times = (0..count as u32).map(|i| start + step * i).collect();
            Self {
                times: RefCell::new(times),
            }
        }
    }
}

/// abstracts over providers of host statistics.
mod host {
    use super::*;

    /// root filesystem statistics, as reported by `statvfs(3)`.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct FsStats {
        /// the fundamental block size.
        pub block_size: u64,
        /// total blocks.
        pub blocks: u64,
        /// free blocks.
        pub blocks_free: u64,
        /// total inodes.
        pub files: u64,
        /// free inodes.
        pub files_free: u64,
    }

    /// a source of host statistics.
    ///
    /// paths are absolute, as they would appear on the host (e.g. `/proc/stat`).
    pub trait Source {
        /// reads a pseudo-file to a string.
        fn read(&self, path: &Path) -> io::Result<String>;

        /// queries filesystem statistics for the filesystem containing `path`.
        fn fs_stats(&self, path: &Path) -> io::Result<FsStats>;

        /// returns the kernel release, e.g. `6.8.0-45-generic`.
        fn kernel_release(&self) -> io::Result<String>;

        /// returns the number of online processors.
        fn online_cpus(&self) -> Option<usize>;
    }

    /// statistics backed by the running host.
    pub struct Host {
        root: PathBuf,
    }

    /// a mock source of host statistics.
    #[derive(Default)]
    #[allow(dead_code, reason = "this is a testing utility.")]
    pub struct MockSource {
        files: RefCell<HashMap<PathBuf, String>>,
        fs: Option<FsStats>,
        kernel: Option<String>,
        cpus: Option<usize>,
    }

    // === impl Host ===

    impl Default for Host {
        fn default() -> Self {
            Self::rooted("/")
        }
    }

    impl Host {
        /// returns a host source whose pseudo-files live beneath `root`.
        pub fn rooted(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        fn resolve(&self, path: &Path) -> PathBuf {
            let Self { root } = self;
            root.join(path.strip_prefix("/").unwrap_or(path))
        }
    }

    impl Source for Host {
        fn read(&self, path: &Path) -> io::Result<String> {
            std::fs::read_to_string(self.resolve(path))
        }

        fn fs_stats(&self, path: &Path) -> io::Result<FsStats> {
            let path = CString::new(self.resolve(path).as_os_str().as_bytes())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

            // SAFETY: `statvfs` is a plain-old-data struct, and is fully written on success.
            let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
            let ret = unsafe { libc::statvfs(path.as_ptr(), &mut stat) };
            if ret != 0 {
                return Err(io::Error::last_os_error());
            }

            // field widths vary across targets.
            Ok(FsStats {
                block_size: stat.f_frsize as u64,
                blocks: stat.f_blocks as u64,
                blocks_free: stat.f_bfree as u64,
                files: stat.f_files as u64,
                files_free: stat.f_ffree as u64,
            })
        }

        fn kernel_release(&self) -> io::Result<String> {
            // SAFETY: `utsname` is a plain-old-data struct, and is fully written on success.
            let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
            if unsafe { libc::uname(&mut uts) } != 0 {
                return Err(io::Error::last_os_error());
            }

            // SAFETY: the kernel nul-terminates each field.
            let release = unsafe { CStr::from_ptr(uts.release.as_ptr()) };
            Ok(release.to_string_lossy().into_owned())
        }

        fn online_cpus(&self) -> Option<usize> {
            let count = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
            usize::try_from(count).ok().filter(|n| *n > 0)
        }
    }

    // === impl MockSource ===

    #[allow(dead_code, reason = "this is a testing utility.")]
    impl MockSource {
        /// serves `contents` when `path` is read.
        pub fn file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
            self.files.borrow_mut().insert(path.into(), contents.into());
            self
        }

        /// replaces the contents served for `path`.
        pub fn replace(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
            self.files.borrow_mut().insert(path.into(), contents.into());
        }

        pub fn with_fs_stats(self, fs: FsStats) -> Self {
            Self {
                fs: Some(fs),
                ..self
            }
        }

        pub fn with_kernel(self, kernel: impl Into<String>) -> Self {
            Self {
                kernel: Some(kernel.into()),
                ..self
            }
        }

        pub fn with_cpus(self, cpus: usize) -> Self {
            Self {
                cpus: Some(cpus),
                ..self
            }
        }
    }

    impl Source for MockSource {
        fn read(&self, path: &Path) -> io::Result<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn fs_stats(&self, _: &Path) -> io::Result<FsStats> {
            self.fs
                .ok_or_else(|| io::Error::from(io::ErrorKind::Unsupported))
        }

        fn kernel_release(&self) -> io::Result<String> {
            self.kernel
                .clone()
                .ok_or_else(|| io::Error::from(io::ErrorKind::Unsupported))
        }

        fn online_cpus(&self) -> Option<usize> {
            self.cpus
        }
    }
}
