use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    /// A Win32 call reported failure. `message` is the system text for `code`.
    #[error("{function} failed (code {code}): {message}")]
    Win32 {
        function: &'static str,
        code: u32,
        message: String,
    },

    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}
