use std::{
    ffi::OsStr,
    iter::once,
    mem::{self, size_of, MaybeUninit},
    os::windows::ffi::OsStrExt,
    ptr,
};
use winapi::{
    ctypes::c_int,
    shared::{
        minwindef::{self, HINSTANCE},
        windef::{HDC, HWND, POINT, RECT},
    },
    um::{
        libloaderapi::GetModuleHandleW,
        wingdi::{self, BITMAPINFO, StretchDIBits},
        winuser::{
            self,
            AdjustWindowRectEx, CreateWindowExW, GetClientRect, GetCursorPos, GetDC,
            RegisterClassExW, ScreenToClient, WNDCLASSEXW,
        },
    },
};
use crate::{
    error::PlatformError,
    graphics::PixelBuffer,
    input::{Input, KBKey, MouseKey},
    surface::Surface,
};

fn to_wide(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(once(0)).collect()
}

/// Registered window class, unregistered on drop.
struct WindowClass {
    name: Vec<u16>,
    instance: HINSTANCE,
}

impl Drop for WindowClass {
    fn drop(&mut self) {
        let unregistered = unsafe { winuser::UnregisterClassW(self.name.as_ptr(), self.instance) };
        if unregistered == 0 {
            log::warn!("UnregisterClassW failed for window class");
        }
    }
}

/// Win32 window presenting a 32-bit top-down DIB through `StretchDIBits`.
pub struct Window {
    handle: HWND,
    device_context: HDC,
    bitmap_info: BITMAPINFO,
    width: i32,
    height: i32,
    // dropped after the window is destroyed
    _class: WindowClass,
}

impl Window {
    /// Registers a window class named after `title` and creates a hidden window
    /// whose client area is `width` x `height`, with its frame at `(x, y)`.
    pub fn create(title: &str, x: i32, y: i32, width: i32, height: i32) -> Result<Self, PlatformError> {
        if width <= 0 || height <= 0 {
            return Err(PlatformError::InvalidDimensions { width, height });
        }

        let instance = win_check_non_null!( GetModuleHandleW(ptr::null()) );
        let class = {
            let name = to_wide(title);
            let class = WNDCLASSEXW {
                cbSize: size_of::<WNDCLASSEXW>() as u32,
                style: winuser::CS_HREDRAW | winuser::CS_VREDRAW,
                lpfnWndProc: Some(Self::window_class_proc),
                cbClsExtra: 0,
                cbWndExtra: 0,
                hInstance: instance,
                hIcon: unsafe { winuser::LoadIconW(ptr::null_mut(), winuser::IDI_WINLOGO) },
                hCursor: unsafe { winuser::LoadCursorW(ptr::null_mut(), winuser::IDC_ARROW) },
                hbrBackground: ptr::null_mut(),
                lpszMenuName: ptr::null(),
                lpszClassName: name.as_ptr(),
                hIconSm: ptr::null_mut(),
            };
            win_check_non_zero!( RegisterClassExW(&class) );
            WindowClass { name, instance }
        };

        let window_style = winuser::WS_CAPTION | winuser::WS_MINIMIZEBOX | winuser::WS_SYSMENU;
        let mut window_dim = RECT {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        };
        win_check_non_zero!( AdjustWindowRectEx(&mut window_dim, window_style, minwindef::FALSE, 0) );

        let title = to_wide(title);
        let handle = win_check_non_null!(
            CreateWindowExW(
                0,
                class.name.as_ptr(),
                title.as_ptr(),
                window_style,
                x,
                y,
                window_dim.right - window_dim.left,
                window_dim.bottom - window_dim.top,
                ptr::null_mut(),
                ptr::null_mut(),
                instance,
                ptr::null_mut(),
            )
        );

        let mut window = Self {
            handle,
            device_context: ptr::null_mut(),
            bitmap_info: BITMAPINFO {
                bmiHeader: wingdi::BITMAPINFOHEADER {
                    biSize: size_of::<wingdi::BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    biHeight: -height, //NOTE: negative means that bitmap is top-down
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: wingdi::BI_RGB,
                    ..unsafe { mem::zeroed() }
                },
                ..unsafe { mem::zeroed() }
            },
            width,
            height,
            _class: class,
        };

        let client_rect = {
            let mut client_rect = MaybeUninit::<RECT>::uninit();
            win_check_non_zero!( GetClientRect(handle, client_rect.as_mut_ptr()) );
            unsafe { client_rect.assume_init() }
        };
        window.width = client_rect.right - client_rect.left;
        window.height = client_rect.bottom - client_rect.top;
        window.device_context = win_check_non_null!( GetDC(handle) );

        log::info!("created window {}x{} at ({}, {})", window.width, window.height, x, y);
        Ok(window)
    }

    pub fn handle(&self) -> HWND { self.handle }

    pub fn is_active(&self) -> bool {
        self.handle == unsafe { winuser::GetActiveWindow() }
    }

    unsafe extern "system" fn window_class_proc(
        window_handle: HWND,
        message: minwindef::UINT,
        w_param: minwindef::WPARAM,
        l_param: minwindef::LPARAM,
    ) -> minwindef::LRESULT {
        match message {
            winuser::WM_DESTROY => {
                winuser::PostQuitMessage(0);
                0
            }
            _ => winuser::DefWindowProcW(window_handle, message, w_param, l_param),
        }
    }

    fn poll_input(&self, input: &mut Input) -> Result<(), PlatformError> {
        use winuser::GetAsyncKeyState;

        for key in KBKey::ALL {
            let is_down = unsafe { GetAsyncKeyState(key as c_int) } < 0;
            input.keyboard[key].update(is_down);
        }

        let mut mouse_point = POINT { x: 0, y: 0 };
        win_check_non_zero!( GetCursorPos(&mut mouse_point) );
        win_check_non_zero!( ScreenToClient(self.handle, &mut mouse_point) );
        input.mouse.x = mouse_point.x;
        input.mouse.y = mouse_point.y;

        input.mouse[MouseKey::LB].update(unsafe { GetAsyncKeyState(winuser::VK_LBUTTON) } < 0);
        input.mouse[MouseKey::RB].update(unsafe { GetAsyncKeyState(winuser::VK_RBUTTON) } < 0);
        input.mouse[MouseKey::MB].update(unsafe { GetAsyncKeyState(winuser::VK_MBUTTON) } < 0);

        Ok(())
    }
}

impl Surface for Window {
    fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn show(&mut self) {
        unsafe { winuser::ShowWindow(self.handle, winuser::SW_SHOW) };
    }

    fn pump(&mut self, input: &mut Input) -> Result<bool, PlatformError> {
        if !dispatch_messages() {
            return Ok(false);
        }

        if self.is_active() {
            self.poll_input(input)?;
        } else {
            input.release_all();
        }
        Ok(true)
    }

    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), PlatformError> {
        self.bitmap_info.bmiHeader.biWidth = buffer.width();
        self.bitmap_info.bmiHeader.biHeight = -buffer.height();

        win_check_non_zero!(
            StretchDIBits(
                self.device_context,
                0,
                0,
                self.width,
                self.height,
                0,
                0,
                buffer.width(),
                buffer.height(),
                buffer.as_ptr() as *const _,
                &self.bitmap_info,
                wingdi::DIB_RGB_COLORS,
                wingdi::SRCCOPY,
            )
        );
        Ok(())
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        unsafe {
            if !self.device_context.is_null() {
                winuser::ReleaseDC(self.handle, self.device_context);
            }
            if winuser::IsWindow(self.handle) != 0 && winuser::DestroyWindow(self.handle) == 0 {
                log::warn!("DestroyWindow failed");
            }
        }
    }
}

/// Message dispatch loop. Dispatches all messages in queue.
///
/// Returns `false` when WM_QUIT is received and `true` otherwise.
pub fn dispatch_messages() -> bool {
    use winuser::{PeekMessageW, TranslateMessage, DispatchMessageW};

    loop {
        let msg = unsafe {
            let mut msg = MaybeUninit::uninit();
            if PeekMessageW(msg.as_mut_ptr(), ptr::null_mut(), 0, 0, winuser::PM_REMOVE) != 0 {
                Some(msg.assume_init())
            } else {
                None
            }
        };

        match msg {
            None => break true,
            Some(msg) if msg.message == winuser::WM_QUIT => break false,
            Some(msg) => unsafe {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            },
        }
    }
}
