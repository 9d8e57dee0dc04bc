//! PROJ version accessor.
//!
//! The release string is fetched through a real call into libproj rather
//! than by referencing its data symbols, so the dependency survives
//! aggressive linkers.

/// Version of the linked PROJ library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// e.g. `"Rel. 9.2.0, March 1st, 2023"`.
    pub release: String,
}

impl ProjVersion {
    /// `"major.minor.patch"`.
    pub fn number(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version number embedded in a PROJ release string.
pub fn release_number(release: &str) -> Option<&str> {
    let rest = release.trim().strip_prefix("Rel.")?.trim_start();
    let end = rest
        .find(|c: char| c != '.' && !c.is_ascii_digit())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

#[cfg(feature = "proj")]
mod sys {
    #![allow(non_camel_case_types)]

    use std::os::raw::{c_char, c_int};

    #[repr(C)]
    pub struct PJ_INFO {
        pub major: c_int,
        pub minor: c_int,
        pub patch: c_int,
        pub release: *const c_char,
        pub version: *const c_char,
        pub searchpath: *const c_char,
        pub paths: *const *const c_char,
        pub path_count: usize,
    }

    #[link(name = "proj")]
    extern "C" {
        pub fn proj_info() -> PJ_INFO;
    }
}

/// `proj_info().release`, static storage owned by libproj.
#[cfg(feature = "proj")]
pub fn release_ptr() -> *const std::os::raw::c_char {
    unsafe { sys::proj_info().release }
}

#[cfg(feature = "proj")]
pub fn version() -> ProjVersion {
    let info = unsafe { sys::proj_info() };
    let release = if info.release.is_null() {
        String::new()
    } else {
        unsafe { std::ffi::CStr::from_ptr(info.release) }
            .to_string_lossy()
            .into_owned()
    };
    ProjVersion {
        major: info.major.max(0) as u32,
        minor: info.minor.max(0) as u32,
        patch: info.patch.max(0) as u32,
        release,
    }
}
