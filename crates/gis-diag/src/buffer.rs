use std::ffi::CStr;
use std::os::raw::c_char;

/// Capacity of the last-error buffer in bytes, including the C terminator.
pub const ERROR_BUFFER_CAPACITY: usize = 1024;

/// Fixed-size, always NUL-terminated text buffer holding the last diagnostic.
///
/// Writes never allocate. Text longer than `ERROR_BUFFER_CAPACITY - 1` bytes
/// is truncated at the nearest UTF-8 boundary, and text is cut at the first
/// interior NUL the same way `snprintf("%s")` would.
#[derive(Clone)]
pub struct ErrorBuffer {
    bytes: [u8; ERROR_BUFFER_CAPACITY],
    len: usize,
}

impl Default for ErrorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; ERROR_BUFFER_CAPACITY],
            len: 0,
        }
    }

    /// Overwrite the buffer with `message`, truncating silently.
    pub fn set(&mut self, message: &str) {
        let message = match message.find('\0') {
            Some(nul) => &message[..nul],
            None => message,
        };
        let mut end = message.len().min(ERROR_BUFFER_CAPACITY - 1);
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        self.bytes[..end].copy_from_slice(&message.as_bytes()[..end]);
        self.bytes[end] = 0;
        self.len = end;
    }

    pub fn clear(&mut self) {
        self.bytes[0] = 0;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_str(&self) -> &str {
        // Only whole `&str` prefixes are ever copied in, so this cannot fail.
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.bytes).unwrap_or_default()
    }

    /// Pointer to the terminated text, valid until the next write.
    pub fn as_ptr(&self) -> *const c_char {
        self.bytes.as_ptr().cast()
    }
}

impl std::fmt::Debug for ErrorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ErrorBuffer").field(&self.as_str()).finish()
    }
}
