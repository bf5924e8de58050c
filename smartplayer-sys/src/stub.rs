//! In-crate fake engine
//!
//! Defines every bound `smartplayer_*` symbol so the bindings build and
//! test without the proprietary engine artifact. The fake player keeps
//! playback state, a parameter map, and delivers load and message
//! callbacks synchronously on the calling thread.
//!
//! `smartplayer_set_json` resolves `$name` references through the
//! registered resolve callback and, when the resolved value parses as a
//! float, stores it under the parameter path `name`. That is enough to
//! exercise every callback path from the safe wrapper's tests.

use std::collections::HashMap;

use libc::{c_char, c_double, c_float, c_int, c_void, size_t};

use crate::{
    NF_SMART_PLAYER_DRIVER_TYPE, NF_SMART_PLAYER_DRIVER_TYPE_FILE,
    NF_SMART_PLAYER_DRIVER_TYPE_SOUNDCARD, NF_SMART_PLAYER_HANDLE,
    NF_SMART_PLAYER_LOAD_CALLBACK, NF_SMART_PLAYER_MESSAGE_CALLBACK,
    NF_SMART_PLAYER_MESSAGE_TYPE, NF_SMART_PLAYER_RESOLVE_CALLBACK, NF_SMART_PLAYER_SETTINGS,
};

const SENDER_IDENTIFIER: &std::ffi::CStr = c"com.nativeformat.smartplayer";
const STUB_PLUGIN_NAMESPACE: &std::ffi::CStr = c"com.nativeformat.plugin.stub";

struct StubPlayer {
    playing: bool,
    time: f64,
    loaded: bool,
    values: HashMap<String, Vec<f32>>,
    resolve_callback: NF_SMART_PLAYER_RESOLVE_CALLBACK,
    message_callback: NF_SMART_PLAYER_MESSAGE_CALLBACK,
    context: *mut c_void,
}

unsafe fn player<'a>(handle: NF_SMART_PLAYER_HANDLE) -> &'a mut StubPlayer {
    &mut *(handle as *mut StubPlayer)
}

unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> &'a str {
    if ptr.is_null() {
        return "";
    }
    std::ffi::CStr::from_ptr(ptr).to_str().unwrap_or("")
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_open(
    resolve_callback: NF_SMART_PLAYER_RESOLVE_CALLBACK,
    context: *mut c_void,
    _settings: NF_SMART_PLAYER_SETTINGS,
    _driver_type: NF_SMART_PLAYER_DRIVER_TYPE,
    _output_destination: *const c_char,
) -> NF_SMART_PLAYER_HANDLE {
    Box::into_raw(Box::new(StubPlayer {
        playing: false,
        time: 0.0,
        loaded: false,
        values: HashMap::new(),
        resolve_callback,
        message_callback: None,
        context,
    })) as NF_SMART_PLAYER_HANDLE
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_close(handle: NF_SMART_PLAYER_HANDLE) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut StubPlayer));
    }
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_is_playing(handle: NF_SMART_PLAYER_HANDLE) -> c_int {
    player(handle).playing as c_int
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_set_playing(handle: NF_SMART_PLAYER_HANDLE, playing: c_int) {
    player(handle).playing = playing != 0;
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_render_time(handle: NF_SMART_PLAYER_HANDLE) -> c_double {
    player(handle).time
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_set_render_time(
    handle: NF_SMART_PLAYER_HANDLE,
    time: c_double,
) {
    player(handle).time = time;
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_is_loaded(handle: NF_SMART_PLAYER_HANDLE) -> c_int {
    player(handle).loaded as c_int
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_set_json(
    handle: NF_SMART_PLAYER_HANDLE,
    json: *const c_char,
    load_callback: NF_SMART_PLAYER_LOAD_CALLBACK,
) {
    let player = player(handle);
    let json = cstr_to_str(json).to_owned();
    resolve_variable_references(player, &json);
    player.loaded = true;
    if let Some(load_callback) = load_callback {
        load_callback(player.context, 1, c"".as_ptr());
    }
}

/// Scan for `$name` references and resolve each through the resolve
/// callback, the way graph loading resolves script variables.
unsafe fn resolve_variable_references(player: &mut StubPlayer, json: &str) {
    let Some(resolve) = player.resolve_callback else {
        return;
    };
    let bytes = json.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
            end += 1;
        }
        i = end;
        if end == start {
            continue;
        }
        let name = &json[start..end];
        let mut c_name = name.as_bytes().to_vec();
        c_name.push(0);
        let resolved = resolve(
            player.context,
            STUB_PLUGIN_NAMESPACE.as_ptr(),
            c_name.as_ptr() as *const c_char,
        );
        if let Ok(value) = cstr_to_str(resolved).parse::<f32>() {
            player.values.insert(name.to_owned(), vec![value]);
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_get_value_for_path(
    handle: NF_SMART_PLAYER_HANDLE,
    path: *const c_char,
) -> c_float {
    player(handle)
        .values
        .get(cstr_to_str(path))
        .and_then(|values| values.first())
        .copied()
        .unwrap_or(0.0)
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_set_values_for_path(
    handle: NF_SMART_PLAYER_HANDLE,
    path: *const c_char,
    values: *mut c_float,
    values_length: size_t,
) {
    let values = if values.is_null() || values_length == 0 {
        Vec::new()
    } else {
        std::slice::from_raw_parts(values, values_length).to_vec()
    };
    player(handle).values.insert(cstr_to_str(path).to_owned(), values);
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_set_message_callback(
    handle: NF_SMART_PLAYER_HANDLE,
    message_callback: NF_SMART_PLAYER_MESSAGE_CALLBACK,
) {
    player(handle).message_callback = message_callback;
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_send_message(
    handle: NF_SMART_PLAYER_HANDLE,
    message_identifier: *const c_char,
    message_type: NF_SMART_PLAYER_MESSAGE_TYPE,
    payload: *const c_void,
) {
    let player = player(handle);
    // Messages are routed straight back to the registered callback.
    if let Some(message_callback) = player.message_callback {
        message_callback(
            player.context,
            message_identifier,
            SENDER_IDENTIFIER.as_ptr(),
            message_type,
            payload,
        );
    }
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_get_context(handle: NF_SMART_PLAYER_HANDLE) -> *mut c_void {
    player(handle).context
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_driver_type_to_string(
    driver_type: NF_SMART_PLAYER_DRIVER_TYPE,
) -> *const c_char {
    if driver_type == NF_SMART_PLAYER_DRIVER_TYPE_FILE {
        c"file".as_ptr()
    } else {
        c"sound".as_ptr()
    }
}

#[no_mangle]
pub unsafe extern "C" fn smartplayer_driver_type_from_string(
    driver_type_string: *const c_char,
) -> NF_SMART_PLAYER_DRIVER_TYPE {
    if cstr_to_str(driver_type_string) == "file" {
        NF_SMART_PLAYER_DRIVER_TYPE_FILE
    } else {
        NF_SMART_PLAYER_DRIVER_TYPE_SOUNDCARD
    }
}

/// Pointer-sized wrapper so a C-string const can be exported as a static.
#[repr(transparent)]
pub struct StaticCStr(pub *const c_char);

// Safety: points at immutable 'static data.
unsafe impl Sync for StaticCStr {}

#[no_mangle]
pub static NF_SMART_PLAYER_VERSION: StaticCStr = StaticCStr(b"1.1.0\0".as_ptr().cast());
