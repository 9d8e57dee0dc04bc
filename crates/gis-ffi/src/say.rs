//! `log` facade implementation forwarding records to Tarantool's `say()`.
//!
//! Only the `tarantool` feature installs the logger; the level mapping and
//! record formatting are always available.

use std::ffi::{CStr, CString};
use std::os::raw::c_int;

use log::{Level, LevelFilter, Record};

use crate::error::c_string_until_nul;

/// `enum say_level` from `tarantool/module.h`.
pub const S_ERROR: c_int = 2;
pub const S_WARN: c_int = 4;
pub const S_INFO: c_int = 5;
pub const S_VERBOSE: c_int = 6;
pub const S_DEBUG: c_int = 7;

/// Format handed to `_say`; the message is always passed as its argument.
pub const SAY_FORMAT: &CStr = c"%s";

pub fn say_level(level: Level) -> c_int {
    match level {
        Level::Error => S_ERROR,
        Level::Warn => S_WARN,
        Level::Info => S_INFO,
        Level::Debug => S_VERBOSE,
        Level::Trace => S_DEBUG,
    }
}

/// Max level for bridged records, from a `RUST_LOG`-style value.
pub fn level_filter(value: Option<&str>) -> LevelFilter {
    match value.map(str::trim) {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Arguments for `_say(level, file, line, NULL, SAY_FORMAT, message)`.
#[derive(Debug)]
pub struct SayRecord {
    pub level: c_int,
    pub file: Option<CString>,
    pub line: c_int,
    pub message: CString,
}

pub fn say_record(record: &Record) -> SayRecord {
    SayRecord {
        level: say_level(record.level()),
        file: record.file().and_then(|f| CString::new(f).ok()),
        line: record.line().unwrap_or(0) as c_int,
        message: c_string_until_nul(record.args().to_string()),
    }
}

#[cfg(feature = "tarantool")]
mod host {
    use std::os::raw::{c_char, c_int};
    use std::ptr;
    use std::sync::{Once, OnceLock};

    use log::{Log, Metadata, Record};

    type SayFunc =
        unsafe extern "C" fn(c_int, *const c_char, c_int, *const c_char, *const c_char, ...);

    static START: Once = Once::new();

    /// Address of Tarantool's `sayfunc_t _say` variable, if the process has one.
    fn say_slot() -> Option<*const Option<SayFunc>> {
        static SLOT: OnceLock<usize> = OnceLock::new();
        let addr = *SLOT.get_or_init(|| unsafe {
            libc::dlsym(libc::RTLD_DEFAULT, c"_say".as_ptr()) as usize
        });
        (addr != 0).then_some(addr as *const Option<SayFunc>)
    }

    /// Current `_say`; Tarantool may swap it at runtime, so read every time.
    fn host_say() -> Option<SayFunc> {
        say_slot().and_then(|slot| unsafe { ptr::read(slot) })
    }

    struct SayLogger;

    impl Log for SayLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let Some(say) = host_say() else {
                return;
            };
            let rec = super::say_record(record);
            unsafe {
                say(
                    rec.level,
                    rec.file.as_ref().map_or(ptr::null(), |f| f.as_ptr()),
                    rec.line,
                    ptr::null(),
                    super::SAY_FORMAT.as_ptr(),
                    rec.message.as_ptr(),
                );
            }
        }

        fn flush(&self) {}
    }

    /// Install the `say()` logger. Idempotent.
    pub fn init() {
        START.call_once(|| {
            let filter = super::level_filter(std::env::var("RUST_LOG").ok().as_deref());
            match log::set_logger(&SayLogger) {
                Ok(()) => log::set_max_level(filter),
                Err(e) => eprintln!("gis: logger already set: {:?}", e),
            }
        });
    }

    pub fn installed() -> bool {
        START.is_completed()
    }

}

#[cfg(feature = "tarantool")]
pub use host::{init, installed};
