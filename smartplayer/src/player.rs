// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 NFSmartPlayer Contributors


//! The player facade over one native engine instance

use std::ffi::{c_void, CStr, CString};
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::callback::{load_trampoline, message_trampoline, resolve_trampoline, CallbackContext};
use crate::error::{Error, Result};
use crate::listener::PlayerListener;
use crate::settings::Settings;
use crate::types::{DriverType, MessageType};

/// One native engine instance.
///
/// Opening acquires the native handle; [`close`](Self::close) releases it
/// exactly once. Dropping an unclosed player closes it as a last resort,
/// but callers should close explicitly for timely release.
///
/// # Example
///
/// ```no_run
/// use smartplayer::{ChannelListener, DriverType, Player};
/// use std::collections::HashMap;
///
/// # fn main() -> smartplayer::Result<()> {
/// let (listener, _events) = ChannelListener::new(HashMap::new());
/// let player = Player::open(listener, DriverType::File, "render.wav")?;
/// player.set_json(r#"{"graphs": []}"#)?;
/// player.close();
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// The engine specifies no discipline for concurrent calls on one handle,
/// so `Player` is `Send` but not `Sync`. Listener callbacks arrive on an
/// engine thread and may run concurrently with methods called here.
pub struct Player {
    handle: NonNull<c_void>,
    /// Owned; freed in `Drop`, after the handle is closed, because the
    /// engine may call back into it until then.
    context: *mut CallbackContext,
    closed: AtomicBool,
    driver_type: DriverType,
    output_path: String,
}

// Safety: the handle and context can move to another thread; the engine
// does not pin them to the opening thread. Not Sync: concurrent method
// calls on one handle are unspecified by the engine.
unsafe impl Send for Player {}

impl Player {
    /// Open a player with default [`Settings`].
    ///
    /// `output_path` is the render destination for [`DriverType::File`];
    /// the engine ignores it for [`DriverType::Soundcard`], pass "".
    pub fn open(
        listener: Arc<dyn PlayerListener>,
        driver_type: DriverType,
        output_path: &str,
    ) -> Result<Self> {
        Self::open_with_settings(listener, driver_type, output_path, &Settings::default())
    }

    /// Open a player with custom [`Settings`].
    pub fn open_with_settings(
        listener: Arc<dyn PlayerListener>,
        driver_type: DriverType,
        output_path: &str,
        settings: &Settings,
    ) -> Result<Self> {
        let c_output_path = CString::new(output_path)?;
        let context = Box::into_raw(CallbackContext::new(listener));
        let handle = unsafe {
            smartplayer_sys::smartplayer_open(
                Some(resolve_trampoline),
                context as *mut c_void,
                settings.as_raw(),
                driver_type.to_c(),
                c_output_path.as_ptr(),
            )
        };
        let Some(handle) = NonNull::new(handle) else {
            // Engine never saw a valid handle; reclaim the context.
            drop(unsafe { Box::from_raw(context) });
            return Err(Error::Open);
        };
        unsafe {
            smartplayer_sys::smartplayer_set_message_callback(
                handle.as_ptr(),
                Some(message_trampoline),
            );
        }
        log::debug!("opened player (driver={driver_type})");
        Ok(Self {
            handle,
            context,
            closed: AtomicBool::new(false),
            driver_type,
            output_path: output_path.to_owned(),
        })
    }

    fn guard(&self) -> Result<smartplayer_sys::NF_SMART_PLAYER_HANDLE> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::Closed);
        }
        Ok(self.handle.as_ptr())
    }

    /// The driver type chosen at open
    pub fn driver_type(&self) -> DriverType {
        self.driver_type
    }

    /// The output path passed at open
    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    /// Whether playback is active
    pub fn playing(&self) -> Result<bool> {
        let handle = self.guard()?;
        Ok(unsafe { smartplayer_sys::smartplayer_is_playing(handle) } != 0)
    }

    /// Start or stop playback
    pub fn set_playing(&self, playing: bool) -> Result<()> {
        let handle = self.guard()?;
        unsafe { smartplayer_sys::smartplayer_set_playing(handle, playing as i32) };
        Ok(())
    }

    /// Current playback position. Unit and range are engine-defined.
    pub fn time(&self) -> Result<f64> {
        let handle = self.guard()?;
        Ok(unsafe { smartplayer_sys::smartplayer_render_time(handle) })
    }

    /// Seek to a playback position
    pub fn set_time(&self, time: f64) -> Result<()> {
        let handle = self.guard()?;
        unsafe { smartplayer_sys::smartplayer_set_render_time(handle, time) };
        Ok(())
    }

    /// Whether engine content has finished loading
    pub fn is_loaded(&self) -> Result<bool> {
        let handle = self.guard()?;
        Ok(unsafe { smartplayer_sys::smartplayer_is_loaded(handle) } != 0)
    }

    /// Read a parameter addressed by a hierarchical path
    pub fn value_for_path(&self, path: &str) -> Result<f32> {
        let handle = self.guard()?;
        let c_path = CString::new(path)?;
        Ok(unsafe { smartplayer_sys::smartplayer_get_value_for_path(handle, c_path.as_ptr()) })
    }

    /// Write a parameter addressed by a hierarchical path.
    ///
    /// Multi-value parameters (vectors) take more than one value.
    pub fn set_values_for_path(&self, path: &str, values: &[f32]) -> Result<()> {
        let handle = self.guard()?;
        if values.is_empty() {
            return Err(Error::InvalidArgument("at least one value is required"));
        }
        let c_path = CString::new(path)?;
        unsafe {
            smartplayer_sys::smartplayer_set_values_for_path(
                handle,
                c_path.as_ptr(),
                values.as_ptr() as *mut f32,
                values.len(),
            );
        }
        Ok(())
    }

    /// Load a JSON graph description into the engine.
    ///
    /// Completion is reported through the listener's
    /// [`did_load`](crate::PlayerListener::did_load); no schema is
    /// enforced at this layer.
    pub fn set_json(&self, json: &str) -> Result<()> {
        let handle = self.guard()?;
        let c_json = CString::new(json)?;
        unsafe {
            smartplayer_sys::smartplayer_set_json(handle, c_json.as_ptr(), Some(load_trampoline));
        }
        Ok(())
    }

    /// Send a fire-and-forget message into the engine.
    ///
    /// [`MessageType::Generic`] requires a payload; [`MessageType::None`]
    /// forbids one.
    pub fn send_message(
        &self,
        message_identifier: &str,
        message_type: MessageType,
        payload: Option<&str>,
    ) -> Result<()> {
        let handle = self.guard()?;
        let c_identifier = CString::new(message_identifier)?;
        match (message_type, payload) {
            (MessageType::None, None) => unsafe {
                smartplayer_sys::smartplayer_send_message(
                    handle,
                    c_identifier.as_ptr(),
                    message_type.to_c(),
                    ptr::null(),
                );
            },
            (MessageType::Generic, Some(payload)) => {
                let c_payload = CString::new(payload)?;
                unsafe {
                    smartplayer_sys::smartplayer_send_message(
                        handle,
                        c_identifier.as_ptr(),
                        message_type.to_c(),
                        c_payload.as_ptr() as *const c_void,
                    );
                }
            }
            (MessageType::None, Some(_)) => {
                return Err(Error::InvalidArgument("a None message carries no payload"))
            }
            (MessageType::Generic, None) => {
                return Err(Error::InvalidArgument("a Generic message requires a payload"))
            }
        }
        Ok(())
    }

    /// Release the native handle. Idempotent; further operations other
    /// than [`is_closed`](Self::is_closed) return [`Error::Closed`].
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        unsafe { smartplayer_sys::smartplayer_close(self.handle.as_ptr()) };
        log::debug!("closed player (driver={})", self.driver_type);
    }

    /// The locally tracked closed flag; not re-queried from the engine
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.close();
        // No callbacks can arrive once the handle is closed.
        drop(unsafe { Box::from_raw(self.context) });
    }
}

/// The engine version string
pub fn player_version() -> &'static str {
    unsafe {
        let ptr = smartplayer_sys::NF_SMART_PLAYER_VERSION;
        if ptr.is_null() {
            return "unknown";
        }
        CStr::from_ptr(ptr).to_str().unwrap_or("unknown")
    }
}

/// Name of the variable the Spotify plugin factory resolves to an access
/// token.
///
/// The engine's C facade does not export the factory variable names; the
/// interface shims carry them as compile-time constants, as here.
pub fn spotify_plugin_factory_access_token_variable() -> &'static str {
    "spotify_access_token"
}

/// Name of the variable the Spotify plugin factory resolves to a token type.
/// See [`spotify_plugin_factory_access_token_variable`].
pub fn spotify_plugin_factory_token_type_variable() -> &'static str {
    "spotify_token_type"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChannelListener, PlayerEvent};
    use std::collections::HashMap;

    fn open_soundcard() -> (Player, crossbeam_channel::Receiver<PlayerEvent>) {
        open_with_variables(HashMap::new())
    }

    fn open_with_variables(
        variables: HashMap<String, String>,
    ) -> (Player, crossbeam_channel::Receiver<PlayerEvent>) {
        let (listener, events) = ChannelListener::new(variables);
        let player = Player::open(listener, DriverType::Soundcard, "").unwrap();
        (player, events)
    }

    #[test]
    fn test_open_starts_unclosed() {
        let (player, _events) = open_soundcard();
        assert!(!player.is_closed());
        assert_eq!(player.driver_type(), DriverType::Soundcard);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (player, _events) = open_soundcard();
        player.close();
        assert!(player.is_closed());
        player.close();
        assert!(player.is_closed());
    }

    #[test]
    fn test_file_driver_open_close() {
        let (listener, _events) = ChannelListener::new(HashMap::new());
        let player = Player::open(listener, DriverType::File, "render.wav").unwrap();
        assert_eq!(player.output_path(), "render.wav");
        player.close();
        assert!(player.is_closed());
    }

    #[test]
    fn test_operations_after_close_error() {
        let (player, _events) = open_soundcard();
        player.close();
        assert!(matches!(player.playing(), Err(Error::Closed)));
        assert!(matches!(player.set_playing(true), Err(Error::Closed)));
        assert!(matches!(player.time(), Err(Error::Closed)));
        assert!(matches!(player.set_time(1.0), Err(Error::Closed)));
        assert!(matches!(player.is_loaded(), Err(Error::Closed)));
        assert!(matches!(
            player.value_for_path("mixer/gain"),
            Err(Error::Closed)
        ));
        assert!(matches!(
            player.set_values_for_path("mixer/gain", &[0.5]),
            Err(Error::Closed)
        ));
        assert!(matches!(player.set_json("{}"), Err(Error::Closed)));
        assert!(matches!(
            player.send_message("id", MessageType::None, None),
            Err(Error::Closed)
        ));
    }

    #[test]
    fn test_playback_state_roundtrip() {
        let (player, _events) = open_soundcard();
        assert!(!player.playing().unwrap());
        player.set_playing(true).unwrap();
        assert!(player.playing().unwrap());

        assert_eq!(player.time().unwrap(), 0.0);
        player.set_time(12.5).unwrap();
        assert_eq!(player.time().unwrap(), 12.5);
    }

    #[test]
    fn test_values_for_path() {
        let (player, _events) = open_soundcard();
        player
            .set_values_for_path("mixer/gain", &[0.5, 0.25])
            .unwrap();
        assert_eq!(player.value_for_path("mixer/gain").unwrap(), 0.5);
        assert_eq!(player.value_for_path("mixer/missing").unwrap(), 0.0);
    }

    #[test]
    fn test_empty_values_rejected() {
        let (player, _events) = open_soundcard();
        assert!(matches!(
            player.set_values_for_path("mixer/gain", &[]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_interior_nul_rejected() {
        let (player, _events) = open_soundcard();
        assert!(matches!(
            player.value_for_path("mixer\0gain"),
            Err(Error::Nul(_))
        ));
    }

    #[test]
    fn test_set_json_delivers_load_event() {
        let (player, events) = open_soundcard();
        assert!(!player.is_loaded().unwrap());
        player.set_json(r#"{"graphs": []}"#).unwrap();
        assert!(player.is_loaded().unwrap());
        match events.try_recv().unwrap() {
            PlayerEvent::Load { success, error } => {
                assert!(success);
                assert!(error.is_none());
            }
            other => panic!("expected load event, got {:?}", other),
        }
    }

    #[test]
    fn test_variables_resolve_through_listener() {
        let variables = HashMap::from([("gain".to_owned(), "0.25".to_owned())]);
        let (player, _events) = open_with_variables(variables);
        player.set_json(r#"{"gain": "$gain"}"#).unwrap();
        assert_eq!(player.value_for_path("gain").unwrap(), 0.25);
    }

    #[test]
    fn test_send_message_echoes_through_listener() {
        let (player, events) = open_soundcard();
        player
            .send_message("com.example.cue", MessageType::Generic, Some("verse-1"))
            .unwrap();
        match events.try_recv().unwrap() {
            PlayerEvent::Message {
                identifier,
                sender,
                message_type,
                payload,
            } => {
                assert_eq!(identifier, "com.example.cue");
                assert!(!sender.is_empty());
                assert_eq!(message_type, MessageType::Generic);
                assert_eq!(payload.as_deref(), Some("verse-1"));
            }
            other => panic!("expected message event, got {:?}", other),
        }
    }

    #[test]
    fn test_none_message_has_no_payload() {
        let (player, events) = open_soundcard();
        player
            .send_message("com.example.ping", MessageType::None, None)
            .unwrap();
        match events.try_recv().unwrap() {
            PlayerEvent::Message {
                message_type,
                payload,
                ..
            } => {
                assert_eq!(message_type, MessageType::None);
                assert!(payload.is_none());
            }
            other => panic!("expected message event, got {:?}", other),
        }
    }

    #[test]
    fn test_message_payload_mismatch_rejected() {
        let (player, _events) = open_soundcard();
        assert!(matches!(
            player.send_message("id", MessageType::Generic, None),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            player.send_message("id", MessageType::None, Some("payload")),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_drop_after_close_is_safe() {
        let (player, _events) = open_soundcard();
        player.close();
        drop(player);
    }

    #[test]
    fn test_static_accessors() {
        assert!(!player_version().is_empty());
        assert!(!spotify_plugin_factory_access_token_variable().is_empty());
        assert!(!spotify_plugin_factory_token_type_variable().is_empty());
    }

    #[test]
    fn test_player_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Player>();
    }
}
