//! Win32 windows presented through Direct3D 11 swap chains.
//!
//! The window procedure never calls back into the shell. It decodes the
//! messages the toolkit cares about into [`OsEvent`]s and parks them in a
//! thread-local queue that [`Direct3D::pump`] hands back to the event loop.

use std::{
    cell::RefCell,
    sync::atomic::{AtomicBool, Ordering},
};

use geometry::{centered, Extent, ScreenPx};
use windows::{
    core::PCWSTR,
    w,
    Win32::{
        Foundation::{HMODULE, HWND, LPARAM, LRESULT, WPARAM},
        Graphics::{
            Direct3D11::{
                ID3D11DepthStencilView, ID3D11Device, ID3D11DeviceContext, ID3D11RenderTargetView,
                D3D11_VIEWPORT,
            },
            Gdi::ValidateRect,
        },
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, GetSystemMetrics,
            LoadCursorW, PeekMessageW, PostQuitMessage, RegisterClassW, TranslateMessage,
            UnregisterClassW, CS_HREDRAW, CS_OWNDC, CS_VREDRAW, IDC_ARROW, MSG, PM_REMOVE,
            SM_CXSCREEN, SM_CYSCREEN, WINDOW_EX_STYLE, WM_CLOSE, WM_KEYDOWN, WM_KEYUP,
            WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_MOUSEMOVE,
            WM_MOUSEWHEEL, WM_PAINT, WM_QUIT, WM_RBUTTONDOWN, WM_RBUTTONUP, WM_SIZE, WM_SYSKEYDOWN,
            WM_SYSKEYUP, WNDCLASSW, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
        },
    },
};

use crate::{
    config::Config,
    error::{fatal, Error},
    event::{Events, NativeId, OsEvent, PumpMode, PumpStatus},
    input::{ButtonState, HeldButtons, KeyCode, MouseButton},
    platform::{Platform, WindowDesc},
};

mod dx;
mod surface;

pub use surface::{NativeWindow, Win32Surface};

fn class_name() -> PCWSTR {
    w!("dxshell")
}

// wParam flags of WM_MOUSEMOVE.
const MK_LBUTTON: usize = 0x0001;
const MK_RBUTTON: usize = 0x0002;
const MK_MBUTTON: usize = 0x0010;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static PENDING: RefCell<Events> = RefCell::new(Events::new());
}

/// The Direct3D 11 device and immediate context shared by every window.
pub struct Direct3D {
    dx: dx::Interfaces,
    instance: HMODULE,
    current: Option<ID3D11RenderTargetView>,
}

impl Direct3D {
    /// Creates the device and registers the window class. Aborts if either
    /// fails or if another instance is alive.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        if INITIALIZED.swap(true, Ordering::SeqCst) {
            fatal(format_args!("the toolkit is already initialized"));
        }

        let instance = match unsafe { GetModuleHandleW(None) } {
            Ok(instance) => instance,
            Err(err) => fatal(format_args!("failed to get module handle: {err}")),
        };

        let class = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW | CS_OWNDC,
            lpfnWndProc: Some(wndproc),
            hInstance: instance,
            hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
            lpszClassName: class_name(),
            ..Default::default()
        };

        if unsafe { RegisterClassW(&class) } == 0 {
            fatal(format_args!(
                "failed to register window class: {}",
                windows::core::Error::from_win32()
            ));
        }

        let dx = dx::Interfaces::new(config);

        Self {
            dx,
            instance,
            current: None,
        }
    }

    #[must_use]
    pub fn device(&self) -> &ID3D11Device {
        &self.dx.device
    }

    #[must_use]
    pub fn context(&self) -> &ID3D11DeviceContext {
        &self.dx.context
    }

    /// The render target view currently bound to the output merger.
    #[must_use]
    pub fn render_target(&self) -> Option<&ID3D11RenderTargetView> {
        self.current.as_ref()
    }

    fn unbind(&mut self) {
        unsafe {
            self.dx
                .context
                .OMSetRenderTargets(None, None::<&ID3D11DepthStencilView>);
        }
        self.current = None;
    }
}

impl Drop for Direct3D {
    fn drop(&mut self) {
        self.unbind();
        unsafe {
            self.dx.context.ClearState();
            let _ = UnregisterClassW(class_name(), self.instance);
        }
        INITIALIZED.store(false, Ordering::SeqCst);
    }
}

impl Platform for Direct3D {
    type Surface = Win32Surface;

    fn create_surface(&mut self, desc: &WindowDesc) -> Result<Win32Surface, Error> {
        let screen: Extent<i32, ScreenPx> =
            Extent::new(unsafe { GetSystemMetrics(SM_CXSCREEN) }, unsafe {
                GetSystemMetrics(SM_CYSCREEN)
            });
        let size = geometry::to_signed(desc.size);
        let origin = centered(screen, size);

        let title: Vec<u16> = desc.title.encode_utf16().chain(Some(0)).collect();

        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                class_name(),
                PCWSTR(title.as_ptr()),
                WS_OVERLAPPEDWINDOW | WS_VISIBLE,
                origin.x,
                origin.y,
                size.width,
                size.height,
                None,
                None,
                self.instance,
                None,
            )
        };

        if hwnd.0 == 0 {
            return Err(Error::Window {
                title: desc.title.to_owned(),
                source: Box::new(windows::core::Error::from_win32()),
            });
        }

        let window = NativeWindow::new(hwnd, self.instance);
        let surface = Win32Surface::new(&self.dx, window, desc.mode)?;
        self.make_current(&surface);
        Ok(surface)
    }

    fn destroy_surface(&mut self, surface: Win32Surface) {
        if self.current.is_some() && self.current.as_ref() == surface.render_target() {
            self.unbind();
        }
        drop(surface);
    }

    fn make_current(&mut self, surface: &Win32Surface) {
        let Some(view) = surface.render_target() else {
            return;
        };

        let viewport = D3D11_VIEWPORT {
            TopLeftX: 0.0,
            TopLeftY: 0.0,
            Width: surface.extent.width as f32,
            Height: surface.extent.height as f32,
            MinDepth: 0.0,
            MaxDepth: 1.0,
        };

        unsafe {
            self.dx.context.OMSetRenderTargets(
                Some(&[Some(view.clone())]),
                None::<&ID3D11DepthStencilView>,
            );
            self.dx.context.RSSetViewports(Some(&[viewport]));
        }
        self.current = Some(view.clone());
    }

    fn resize(
        &mut self,
        surface: &mut Win32Surface,
        extent: Extent<u32, ScreenPx>,
    ) -> Result<(), Error> {
        // Minimized windows report a zero-sized client area.
        if extent.width == 0 || extent.height == 0 {
            log::trace!("skipping resize to {}x{}", extent.width, extent.height);
            return Ok(());
        }

        // Every reference to the back buffer must be released first.
        self.unbind();
        surface.resize(&self.dx, extent)
    }

    fn present(&mut self, surface: &mut Win32Surface) -> Result<(), Error> {
        surface.present()
    }

    fn validate(&mut self, surface: &mut Win32Surface) {
        let _ = unsafe { ValidateRect(surface.hwnd(), None) };
    }

    fn pump(&mut self, mode: PumpMode, events: &mut Events) -> PumpStatus {
        let mut status = PumpStatus::Continue;
        let mut msg = MSG::default();

        match mode {
            PumpMode::Poll => unsafe {
                while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                    if msg.message == WM_QUIT {
                        status = PumpStatus::Quit;
                        break;
                    }
                    TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            },
            PumpMode::Wait => unsafe {
                match GetMessageW(&mut msg, None, 0, 0).0 {
                    -1 => fatal(format_args!(
                        "GetMessageW failed: {}",
                        windows::core::Error::from_win32()
                    )),
                    0 => status = PumpStatus::Quit,
                    _ => {
                        TranslateMessage(&msg);
                        DispatchMessageW(&msg);
                    }
                }
            },
        }

        PENDING.with(|pending| events.extend(pending.borrow_mut().drain(..)));
        status
    }

    fn post_quit(&mut self) {
        unsafe { PostQuitMessage(0) };
    }
}

fn push(hwnd: HWND, event: OsEvent) {
    PENDING.with(|pending| pending.borrow_mut().push((NativeId(hwnd.0 as u64), event)));
}

fn loword(value: isize) -> u16 {
    (value & 0xFFFF) as u16
}

fn hiword(value: isize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

extern "system" fn wndproc(hwnd: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let event = match message {
        WM_PAINT => {
            let _ = unsafe { ValidateRect(hwnd, None) };
            OsEvent::Paint
        }
        WM_CLOSE => OsEvent::CloseRequested,
        WM_SIZE => OsEvent::Resized(Extent::new(
            u32::from(loword(lparam.0)),
            u32::from(hiword(lparam.0)),
        )),
        WM_KEYDOWN | WM_SYSKEYDOWN => OsEvent::KeyDown(KeyCode(wparam.0 as u16)),
        WM_KEYUP | WM_SYSKEYUP => OsEvent::KeyUp(KeyCode(wparam.0 as u16)),
        WM_MOUSEMOVE => {
            let mut held = HeldButtons::empty();
            held.set(HeldButtons::LEFT, wparam.0 & MK_LBUTTON != 0);
            held.set(HeldButtons::MIDDLE, wparam.0 & MK_MBUTTON != 0);
            held.set(HeldButtons::RIGHT, wparam.0 & MK_RBUTTON != 0);

            // Coordinates are signed: they go negative when the mouse is
            // captured and leaves the client area.
            let at = geometry::Point::new(
                i32::from(loword(lparam.0) as i16),
                i32::from(hiword(lparam.0) as i16),
            );
            OsEvent::PointerMoved { at, held }
        }
        WM_LBUTTONDOWN => button(MouseButton::Left, ButtonState::Pressed),
        WM_LBUTTONUP => button(MouseButton::Left, ButtonState::Released),
        WM_MBUTTONDOWN => button(MouseButton::Middle, ButtonState::Pressed),
        WM_MBUTTONUP => button(MouseButton::Middle, ButtonState::Released),
        WM_RBUTTONDOWN => button(MouseButton::Right, ButtonState::Pressed),
        WM_RBUTTONUP => button(MouseButton::Right, ButtonState::Released),
        WM_MOUSEWHEEL => OsEvent::Wheel {
            delta: hiword(wparam.0 as isize) as i16,
        },
        _ => return unsafe { DefWindowProcW(hwnd, message, wparam, lparam) },
    };

    push(hwnd, event);

    // Let the system keys (Alt+F4 and friends) keep working.
    if matches!(message, WM_SYSKEYDOWN | WM_SYSKEYUP) {
        return unsafe { DefWindowProcW(hwnd, message, wparam, lparam) };
    }

    LRESULT(0)
}

fn button(button: MouseButton, state: ButtonState) -> OsEvent {
    OsEvent::Button { button, state }
}
