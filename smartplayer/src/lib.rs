//! Safe Rust bindings for the NFSmartPlayer native audio engine
//!
//! NFSmartPlayer plays JSON-described audio graphs through a soundcard or
//! renders them to a file. This crate wraps the engine's C API in an owned
//! [`Player`] handle; the engine itself (graph evaluation, scheduling,
//! decoding) stays behind the FFI boundary.
//!
//! # Quick Start
//!
//! ```no_run
//! use smartplayer::{ChannelListener, DriverType, Player, PlayerEvent};
//! use std::collections::HashMap;
//!
//! fn main() -> smartplayer::Result<()> {
//!     let (listener, events) = ChannelListener::new(HashMap::new());
//!     let player = Player::open(listener, DriverType::Soundcard, "")?;
//!
//!     player.set_json(r#"{"graphs": []}"#)?;
//!     match events.recv() {
//!         Ok(PlayerEvent::Load { success: true, .. }) => player.set_playing(true)?,
//!         other => eprintln!("load failed: {:?}", other),
//!     }
//!
//!     player.close();
//!     Ok(())
//! }
//! ```
//!
//! # API Overview
//!
//! - [`Player`] - one native engine instance, closed exactly once
//! - [`PlayerListener`] - caller-supplied callback surface
//! - [`ChannelListener`] / [`PlayerEvent`] - engine events as a channel
//! - [`Settings`] - engine configuration passed at open
//! - [`DriverType`] / [`MessageType`] - the closed enums of the C API
//!
//! # Thread Safety
//!
//! The engine documents no cross-thread discipline for concurrent calls on
//! one player, so [`Player`] is `Send` but not `Sync`: move it between
//! threads freely, share it only behind an external lock. Listener
//! callbacks arrive on a thread the engine controls; [`PlayerListener`]
//! therefore requires `Send + Sync`.

mod callback;
mod error;
mod events;
mod listener;
mod player;
mod settings;
mod types;

pub use error::{Error, Result};
pub use events::{ChannelListener, PlayerEvent};
pub use listener::PlayerListener;
pub use player::{
    player_version, spotify_plugin_factory_access_token_variable,
    spotify_plugin_factory_token_type_variable, Player,
};
pub use settings::Settings;
pub use types::{DriverType, MessageType};
