//! Trampolines between the engine's C callbacks and [`PlayerListener`]

use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::sync::{Arc, Mutex};

use crate::listener::PlayerListener;
use crate::types::MessageType;

/// Context stored with the engine for the player's lifetime.
///
/// The resolve callback must return a pointer the engine can read after
/// the trampoline returns; `resolve_buf` keeps the last resolved value
/// alive until the next resolve.
pub(crate) struct CallbackContext {
    pub listener: Arc<dyn PlayerListener>,
    resolve_buf: Mutex<CString>,
}

impl CallbackContext {
    pub fn new(listener: Arc<dyn PlayerListener>) -> Box<Self> {
        Box::new(Self {
            listener,
            resolve_buf: Mutex::new(CString::default()),
        })
    }
}

unsafe fn cstr_or_empty(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// C resolve trampoline
///
/// # Safety
///
/// `context` must point to the player's `CallbackContext`. The returned
/// pointer stays valid until the next resolve on the same context.
pub(crate) unsafe extern "C" fn resolve_trampoline(
    context: *mut c_void,
    plugin_namespace: *const c_char,
    variable_identifier: *const c_char,
) -> *const c_char {
    if context.is_null() {
        return ptr::null();
    }
    let ctx = &*(context as *const CallbackContext);
    let namespace = cstr_or_empty(plugin_namespace);
    let identifier = cstr_or_empty(variable_identifier);

    // catch_unwind prevents panics from unwinding across the FFI boundary,
    // which would be undefined behavior.
    let resolved = match catch_unwind(AssertUnwindSafe(|| {
        ctx.listener.resolve_variable(&namespace, &identifier)
    })) {
        Ok(value) => value.unwrap_or_default(),
        Err(_) => {
            log::error!("panic in resolve callback (caught at FFI boundary)");
            String::new()
        }
    };

    let resolved = CString::new(resolved).unwrap_or_default();
    let mut buf = ctx.resolve_buf.lock().unwrap_or_else(|e| e.into_inner());
    *buf = resolved;
    buf.as_ptr()
}

/// C load-completion trampoline
///
/// # Safety
///
/// `context` must point to the player's `CallbackContext`.
pub(crate) unsafe extern "C" fn load_trampoline(
    context: *mut c_void,
    success: c_int,
    error_message: *const c_char,
) {
    if context.is_null() {
        return;
    }
    let ctx = &*(context as *const CallbackContext);
    let error_message = cstr_or_empty(error_message);
    let error_message = (!error_message.is_empty()).then_some(error_message);

    if catch_unwind(AssertUnwindSafe(|| {
        ctx.listener.did_load(success != 0, error_message.as_deref());
    }))
    .is_err()
    {
        log::error!("panic in load callback (caught at FFI boundary)");
    }
}

/// C message trampoline
///
/// # Safety
///
/// `context` must point to the player's `CallbackContext`. For `GENERIC`
/// messages `payload` must be a valid nul-terminated string or null.
pub(crate) unsafe extern "C" fn message_trampoline(
    context: *mut c_void,
    message_identifier: *const c_char,
    sender_identifier: *const c_char,
    message_type: smartplayer_sys::NF_SMART_PLAYER_MESSAGE_TYPE,
    payload: *const c_void,
) {
    if context.is_null() {
        return;
    }
    let ctx = &*(context as *const CallbackContext);
    let identifier = cstr_or_empty(message_identifier);
    let sender = cstr_or_empty(sender_identifier);
    let message_type = MessageType::from_c(message_type);
    let payload = match message_type {
        MessageType::Generic if !payload.is_null() => {
            Some(cstr_or_empty(payload as *const c_char))
        }
        _ => None,
    };

    if catch_unwind(AssertUnwindSafe(|| {
        ctx.listener
            .received_message(&identifier, &sender, message_type, payload.as_deref());
    }))
    .is_err()
    {
        log::error!("panic in message callback (caught at FFI boundary)");
    }
}
