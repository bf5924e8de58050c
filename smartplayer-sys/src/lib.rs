// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 NFSmartPlayer Contributors


//! Raw FFI bindings for the NFSmartPlayer native audio engine
//!
//! This crate provides unsafe, low-level bindings to the player section of
//! the engine's C API (`smartplayer_*`). For a safe, idiomatic Rust API,
//! use the `smartplayer` crate instead.
//!
//! The declarations are hand-maintained against `nf_smart_player.h`; the
//! proprietary engine headers are not available at build time, so bindgen
//! cannot run against them.
//!
//! # Safety
//!
//! All functions in this crate are unsafe and follow C calling conventions.
//! The caller is responsible for:
//! - Ensuring pointers are valid, nul-terminated where the API expects it
//! - Keeping the resolve-callback return value alive until the next resolve
//! - Calling `smartplayer_close` exactly once per handle
//!
//! # Example
//!
//! ```no_run
//! use smartplayer_sys::*;
//!
//! unsafe {
//!     let settings: NF_SMART_PLAYER_SETTINGS = std::mem::zeroed();
//!     let player = smartplayer_open(
//!         None,
//!         std::ptr::null_mut(),
//!         settings,
//!         NF_SMART_PLAYER_DRIVER_TYPE_SOUNDCARD,
//!         c"".as_ptr(),
//!     );
//!     if player.is_null() {
//!         panic!("Failed to open player");
//!     }
//!
//!     // ... use the player ...
//!
//!     smartplayer_close(player);
//! }
//! ```

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use libc::{c_char, c_double, c_float, c_int, c_void, size_t};

#[cfg(feature = "stub")]
mod stub;

/// Message kinds exchanged with the engine.
///
/// These numeric tags are the wire contract with the native side.
pub type NF_SMART_PLAYER_MESSAGE_TYPE = c_int;
pub const NF_SMART_PLAYER_MESSAGE_TYPE_NONE: NF_SMART_PLAYER_MESSAGE_TYPE = 0;
pub const NF_SMART_PLAYER_MESSAGE_TYPE_GENERIC: NF_SMART_PLAYER_MESSAGE_TYPE = 1;

/// Output-destination selector, fixed at `smartplayer_open`.
pub type NF_SMART_PLAYER_DRIVER_TYPE = c_int;
pub const NF_SMART_PLAYER_DRIVER_TYPE_SOUNDCARD: NF_SMART_PLAYER_DRIVER_TYPE = 0;
pub const NF_SMART_PLAYER_DRIVER_TYPE_FILE: NF_SMART_PLAYER_DRIVER_TYPE = 1;

/// Opaque handle to native-side player state.
pub type NF_SMART_PLAYER_HANDLE = *mut c_void;

/// Resolves a named variable for the engine. The returned pointer must stay
/// valid until the next call with the same context.
pub type NF_SMART_PLAYER_RESOLVE_CALLBACK = Option<
    unsafe extern "C" fn(
        context: *mut c_void,
        plugin_namespace: *const c_char,
        variable_identifier: *const c_char,
    ) -> *const c_char,
>;

/// Load-completion notification with success flag and error message.
pub type NF_SMART_PLAYER_LOAD_CALLBACK = Option<
    unsafe extern "C" fn(context: *mut c_void, success: c_int, error_message: *const c_char),
>;

/// Inbound message delivery. For `GENERIC` messages the payload is a
/// nul-terminated string; for `NONE` it is null.
pub type NF_SMART_PLAYER_MESSAGE_CALLBACK = Option<
    unsafe extern "C" fn(
        context: *mut c_void,
        message_identifier: *const c_char,
        sender_identifier: *const c_char,
        message_type: NF_SMART_PLAYER_MESSAGE_TYPE,
        payload: *const c_void,
    ),
>;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NF_SMART_PLAYER_SETTINGS {
    pub osc_read_port: c_int,
    pub osc_write_port: c_int,
    pub osc_address: *const c_char,
    pub localhost_port: c_int,
    pub pump_manually: c_int,
}

extern "C" {
    pub fn smartplayer_open(
        resolve_callback: NF_SMART_PLAYER_RESOLVE_CALLBACK,
        context: *mut c_void,
        settings: NF_SMART_PLAYER_SETTINGS,
        driver_type: NF_SMART_PLAYER_DRIVER_TYPE,
        output_destination: *const c_char,
    ) -> NF_SMART_PLAYER_HANDLE;
    pub fn smartplayer_close(handle: NF_SMART_PLAYER_HANDLE);
    pub fn smartplayer_is_playing(handle: NF_SMART_PLAYER_HANDLE) -> c_int;
    pub fn smartplayer_set_playing(handle: NF_SMART_PLAYER_HANDLE, playing: c_int);
    pub fn smartplayer_render_time(handle: NF_SMART_PLAYER_HANDLE) -> c_double;
    pub fn smartplayer_set_render_time(handle: NF_SMART_PLAYER_HANDLE, time: c_double);
    pub fn smartplayer_is_loaded(handle: NF_SMART_PLAYER_HANDLE) -> c_int;
    pub fn smartplayer_set_json(
        handle: NF_SMART_PLAYER_HANDLE,
        json: *const c_char,
        load_callback: NF_SMART_PLAYER_LOAD_CALLBACK,
    );
    pub fn smartplayer_get_value_for_path(
        handle: NF_SMART_PLAYER_HANDLE,
        path: *const c_char,
    ) -> c_float;
    pub fn smartplayer_set_values_for_path(
        handle: NF_SMART_PLAYER_HANDLE,
        path: *const c_char,
        values: *mut c_float,
        values_length: size_t,
    );
    pub fn smartplayer_set_message_callback(
        handle: NF_SMART_PLAYER_HANDLE,
        message_callback: NF_SMART_PLAYER_MESSAGE_CALLBACK,
    );
    pub fn smartplayer_send_message(
        handle: NF_SMART_PLAYER_HANDLE,
        message_identifier: *const c_char,
        message_type: NF_SMART_PLAYER_MESSAGE_TYPE,
        payload: *const c_void,
    );
    pub fn smartplayer_get_context(handle: NF_SMART_PLAYER_HANDLE) -> *mut c_void;

    // Utilities
    pub fn smartplayer_driver_type_to_string(
        driver_type: NF_SMART_PLAYER_DRIVER_TYPE,
    ) -> *const c_char;
    pub fn smartplayer_driver_type_from_string(
        driver_type_string: *const c_char,
    ) -> NF_SMART_PLAYER_DRIVER_TYPE;

    /// The engine version, exported as a C const
    pub static NF_SMART_PLAYER_VERSION: *const c_char;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        unsafe {
            assert!(!NF_SMART_PLAYER_VERSION.is_null());
            let version = std::ffi::CStr::from_ptr(NF_SMART_PLAYER_VERSION);
            assert!(!version.to_bytes().is_empty());
        }
    }

    #[test]
    fn test_open_close() {
        unsafe {
            let settings: NF_SMART_PLAYER_SETTINGS = std::mem::zeroed();
            let player = smartplayer_open(
                None,
                std::ptr::null_mut(),
                settings,
                NF_SMART_PLAYER_DRIVER_TYPE_SOUNDCARD,
                c"".as_ptr(),
            );
            assert!(!player.is_null(), "Failed to open player");
            smartplayer_close(player);
        }
    }

    #[test]
    fn test_driver_type_strings() {
        unsafe {
            let sound = smartplayer_driver_type_to_string(NF_SMART_PLAYER_DRIVER_TYPE_SOUNDCARD);
            assert_eq!(std::ffi::CStr::from_ptr(sound).to_str().unwrap(), "sound");
            assert_eq!(
                smartplayer_driver_type_from_string(c"file".as_ptr()),
                NF_SMART_PLAYER_DRIVER_TYPE_FILE
            );
        }
    }

    #[test]
    fn test_playback_state_defaults() {
        unsafe {
            let settings: NF_SMART_PLAYER_SETTINGS = std::mem::zeroed();
            let player = smartplayer_open(
                None,
                std::ptr::null_mut(),
                settings,
                NF_SMART_PLAYER_DRIVER_TYPE_SOUNDCARD,
                c"".as_ptr(),
            );
            assert!(!player.is_null());
            assert_eq!(smartplayer_is_playing(player), 0);
            assert_eq!(smartplayer_is_loaded(player), 0);
            assert_eq!(smartplayer_render_time(player), 0.0);
            smartplayer_set_playing(player, 1);
            assert_eq!(smartplayer_is_playing(player), 1);
            smartplayer_close(player);
        }
    }
}
