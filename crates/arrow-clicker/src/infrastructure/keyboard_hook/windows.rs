//! Windows low-level keyboard hook implementation.
//!
//! This module installs a `WH_KEYBOARD_LL` hook on a dedicated Win32
//! message-loop thread that runs at `THREAD_PRIORITY_TIME_CRITICAL` to
//! minimise callback latency.  The hook procedure translates the VK code to
//! a key name and asks the installed handler for a verdict; a
//! [`KeyVerdict::Suppress`] consumes the key by returning non-zero instead of
//! calling `CallNextHookEx`.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use arrow_clicker_core::keymap::windows_vk::vk_to_key_name;
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::{
    GetCurrentThread, GetCurrentThreadId, SetThreadPriority, THREAD_PRIORITY_TIME_CRITICAL,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW,
    SetWindowsHookExW, UnhookWindowsHookEx, HC_ACTION, KBDLLHOOKSTRUCT, KBDLLHOOKSTRUCT_FLAGS,
    LLKHF_EXTENDED, MSG, PM_NOREMOVE, WH_KEYBOARD_LL, WM_KEYDOWN, WM_KEYUP, WM_QUIT,
    WM_SYSKEYDOWN, WM_SYSKEYUP, WM_USER,
};

use crate::application::capture_keys::{HookError, KeyEventHandler, KeyVerdict, KeyboardHook};

/// Handler consulted by [`keyboard_hook_proc`].
///
/// The OS callback carries no user data, so the handler lives in this single
/// slot.  It is filled by [`WindowsKeyboardHook::install`] and emptied by
/// [`WindowsKeyboardHook::uninstall`].
static HANDLER: RwLock<Option<Arc<dyn KeyEventHandler>>> = RwLock::new(None);

/// The running hook thread.
struct HookThread {
    thread_id: u32,
    join: JoinHandle<()>,
}

/// Windows low-level keyboard hook.
#[derive(Default)]
pub struct WindowsKeyboardHook {
    thread: Mutex<Option<HookThread>>,
}

impl WindowsKeyboardHook {
    /// Creates a new (uninstalled) hook.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyboardHook for WindowsKeyboardHook {
    fn install(&self, handler: Arc<dyn KeyEventHandler>) -> Result<(), HookError> {
        let mut slot = self.thread.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(HookError::AlreadyInstalled);
        }
        {
            let mut current = HANDLER.write().unwrap_or_else(PoisonError::into_inner);
            if current.is_some() {
                return Err(HookError::AlreadyInstalled);
            }
            *current = Some(handler);
        }

        let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();
        let join = thread::Builder::new()
            .name("arrow-clicker-hook".to_string())
            .spawn(move || run_hook_message_loop(ready_tx))
            .map_err(|e| {
                clear_handler();
                HookError::InstallFailed(e.to_string())
            })?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => {
                tracing::debug!(thread_id, "keyboard hook installed");
                *slot = Some(HookThread { thread_id, join });
                Ok(())
            }
            Ok(Err(reason)) => {
                let _ = join.join();
                clear_handler();
                Err(HookError::InstallFailed(reason))
            }
            Err(_) => {
                let _ = join.join();
                clear_handler();
                Err(HookError::InstallFailed(
                    "hook thread exited before reporting".to_string(),
                ))
            }
        }
    }

    fn uninstall(&self) {
        let hook_thread = self
            .thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(hook_thread) = hook_thread {
            // SAFETY: posting WM_QUIT to a thread id we own; failure only means
            // the thread has already exited.
            let posted = unsafe {
                PostThreadMessageW(hook_thread.thread_id, WM_QUIT, WPARAM(0), LPARAM(0))
            };
            if let Err(e) = posted {
                tracing::warn!("failed to stop keyboard hook thread: {e}");
            } else if hook_thread.join.join().is_err() {
                tracing::warn!("keyboard hook thread panicked");
            }
            tracing::debug!("keyboard hook removed");
        }
        clear_handler();
    }
}

impl Drop for WindowsKeyboardHook {
    fn drop(&mut self) {
        self.uninstall();
    }
}

fn clear_handler() {
    *HANDLER.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Entry point for the dedicated Win32 message loop thread.
///
/// Reports the thread id (or the install error) on `ready` once the hook is
/// in place, then pumps messages until `WM_QUIT`.
fn run_hook_message_loop(ready: Sender<Result<u32, String>>) {
    let mut msg = MSG::default();

    // SAFETY: plain Win32 calls on the current thread.  PeekMessageW forces
    // creation of the thread message queue so PostThreadMessageW can reach it.
    let thread_id = unsafe {
        let _ = SetThreadPriority(GetCurrentThread(), THREAD_PRIORITY_TIME_CRITICAL);
        let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);
        GetCurrentThreadId()
    };

    // SAFETY: SetWindowsHookExW requires the calling thread to run a message
    // loop, which follows immediately.
    let hook = match unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0) } {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };
    let _ = ready.send(Ok(thread_id));

    // Win32 message loop – blocks until WM_QUIT is posted
    // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            DispatchMessageW(&msg);
        }
        if let Err(e) = UnhookWindowsHookEx(hook) {
            tracing::warn!("UnhookWindowsHookEx failed: {e}");
        }
    }
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// Called by Windows from the hook message loop thread.  It must return
/// quickly to avoid hook removal by the OS, and must never unwind across the
/// FFI boundary.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code == HC_ACTION as i32 {
        // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
        let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);
        let verdict = panic::catch_unwind(AssertUnwindSafe(|| dispatch(kbs, w_param.0 as u32)))
            .unwrap_or(None);
        if verdict == Some(KeyVerdict::Suppress) {
            return LRESULT(1);
        }
    }

    // SAFETY: Forward the event to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}

/// Turns one hook event into a handler verdict.
///
/// Returns `None` for messages that are not key transitions, for VK codes
/// without a name, and when no handler is installed.
fn dispatch(kbs: &KBDLLHOOKSTRUCT, message: u32) -> Option<KeyVerdict> {
    let is_down = match message {
        WM_KEYDOWN | WM_SYSKEYDOWN => true,
        WM_KEYUP | WM_SYSKEYUP => false,
        _ => return None,
    };
    let is_extended = (kbs.flags & LLKHF_EXTENDED) != KBDLLHOOKSTRUCT_FLAGS(0);
    let name = vk_to_key_name(kbs.vkCode as u8, is_extended)?;
    let handler = HANDLER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()?;
    Some(handler.on_key(name, is_down))
}
