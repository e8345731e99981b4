use crate::error::PlatformError;

/// Builds a [`PlatformError::Win32`] out of `GetLastError` for the call named `function`.
pub fn last_error(function: &'static str) -> PlatformError {
    use std::ptr;
    use winapi::um::{
        errhandlingapi::GetLastError,
        winbase::{
            FormatMessageW,
            FORMAT_MESSAGE_FROM_SYSTEM,
            FORMAT_MESSAGE_IGNORE_INSERTS,
        },
    };

    let code = unsafe { GetLastError() };
    let mut buffer = [0u16; 512];
    let len = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            ptr::null(),
            code,
            0,
            buffer.as_mut_ptr(),
            buffer.len() as u32,
            ptr::null_mut(),
        )
    };
    let message = if len == 0 {
        format!("unknown error {}", code)
    } else {
        String::from_utf16_lossy(&buffer[..len as usize]).trim_end().to_owned()
    };

    log::error!("{} failed: {}", function, message);
    PlatformError::Win32 { function, code, message }
}

/// Calls a Win32 function and returns early with [`PlatformError::Win32`] if it returned zero.
#[macro_export]
macro_rules! win_check_non_zero {
    (
        $fn_name:ident( $($arg:expr),* $(,)? ) $(;)?
    ) => {
        {
            let result = unsafe { $fn_name($($arg),*) };
            if result == 0 {
                return Err($crate::debug::last_error(stringify!($fn_name)).into());
            }
            result
        }
    };
}

/// Calls a Win32 function and returns early with [`PlatformError::Win32`] if it returned null.
#[macro_export]
macro_rules! win_check_non_null {
    (
        $fn_name:ident( $($arg:expr),* $(,)? ) $(;)?
    ) => {
        {
            let result = unsafe { $fn_name($($arg),*) };
            if result.is_null() {
                return Err($crate::debug::last_error(stringify!($fn_name)).into());
            }
            result
        }
    };
}
