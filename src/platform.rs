//! Timing collaborators used by debug commands.
//!
//! The dispatcher only needs two things from the host: a monotonic
//! millisecond clock for the header line and a blocking sleep between
//! `monitor` iterations. Firmware implements [`Platform`] on top of its RTOS
//! or HAL timer. Hosted builds can use [`StdPlatform`] (feature `std`).
//!
//! ```rust
//! use dbgshell::platform::Platform;
//!
//! struct Ticks {
//!     now: u64,
//! }
//!
//! impl Platform for Ticks {
//!     fn now_ms(&self) -> u64 {
//!         self.now
//!     }
//!
//!     fn sleep_ms(&mut self, ms: u32) {
//!         self.now += u64::from(ms);
//!     }
//! }
//! ```

/// Time source and sleep primitive of the host.
pub trait Platform {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;

    /// Block the calling context for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}

impl<P: Platform + ?Sized> Platform for &mut P {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn sleep_ms(&mut self, ms: u32) {
        (**self).sleep_ms(ms)
    }
}

#[cfg(feature = "std")]
pub use self::hosted::{StdPlatform, Stdout};

#[cfg(feature = "std")]
mod hosted {
    extern crate std;

    use super::Platform;
    use core::fmt;
    use std::io::Write as _;
    use std::time::{Duration, Instant};

    /// [`Platform`] backed by `std::time` and `std::thread::sleep`.
    #[derive(Debug, Clone, Copy)]
    pub struct StdPlatform {
        origin: Instant,
    }

    impl StdPlatform {
        /// Start the clock at zero now.
        pub fn new() -> Self {
            Self { origin: Instant::now() }
        }
    }

    impl Default for StdPlatform {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Platform for StdPlatform {
        fn now_ms(&self) -> u64 {
            u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
        }

        fn sleep_ms(&mut self, ms: u32) {
            std::thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }

    /// `core::fmt::Write` sink that forwards to the process's stdout.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Stdout;

    impl fmt::Write for Stdout {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            std::io::stdout().write_all(s.as_bytes()).map_err(|_| fmt::Error)
        }
    }
}
