//! Engine events as a channel
//!
//! Engine callbacks arrive on a thread the engine controls. Handling them
//! inline invites reentrancy (calling back into the player from inside a
//! callback); forwarding them into a channel lets the caller drain events
//! on a thread of their own choosing.

use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::listener::PlayerListener;
use crate::types::MessageType;

/// One engine callback, as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Content finished loading
    Load {
        success: bool,
        error: Option<String>,
    },
    /// A message arrived from the engine
    Message {
        identifier: String,
        sender: String,
        message_type: MessageType,
        payload: Option<String>,
    },
}

/// A [`PlayerListener`] that resolves variables from a fixed map and
/// forwards load and message callbacks into an unbounded channel.
///
/// ```no_run
/// use smartplayer::{ChannelListener, DriverType, Player};
/// use std::collections::HashMap;
///
/// # fn main() -> smartplayer::Result<()> {
/// let variables = HashMap::from([
///     ("gain".to_owned(), "0.5".to_owned()),
/// ]);
/// let (listener, events) = ChannelListener::new(variables);
/// let player = Player::open(listener, DriverType::Soundcard, "")?;
/// player.set_json(r#"{"gain": "$gain"}"#)?;
/// for event in events.try_iter() {
///     println!("{:?}", event);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ChannelListener {
    variables: HashMap<String, String>,
    sender: Sender<PlayerEvent>,
}

impl ChannelListener {
    /// Create a listener and the receiving end of its event channel.
    pub fn new(variables: HashMap<String, String>) -> (Arc<Self>, Receiver<PlayerEvent>) {
        let (sender, receiver) = unbounded();
        (Arc::new(Self { variables, sender }), receiver)
    }
}

impl PlayerListener for ChannelListener {
    fn resolve_variable(
        &self,
        _plugin_namespace: &str,
        variable_identifier: &str,
    ) -> Option<String> {
        self.variables.get(variable_identifier).cloned()
    }

    fn did_load(&self, success: bool, error_message: Option<&str>) {
        // Receiver gone means nobody is listening; drop the event.
        let _ = self.sender.send(PlayerEvent::Load {
            success,
            error: error_message.map(str::to_owned),
        });
    }

    fn received_message(
        &self,
        message_identifier: &str,
        sender_identifier: &str,
        message_type: MessageType,
        payload: Option<&str>,
    ) {
        let _ = self.sender.send(PlayerEvent::Message {
            identifier: message_identifier.to_owned(),
            sender: sender_identifier.to_owned(),
            message_type,
            payload: payload.map(str::to_owned),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_from_map() {
        let variables = HashMap::from([("token".to_owned(), "abc123".to_owned())]);
        let (listener, _events) = ChannelListener::new(variables);
        assert_eq!(
            listener.resolve_variable("com.example", "token"),
            Some("abc123".to_owned())
        );
        assert_eq!(listener.resolve_variable("com.example", "missing"), None);
    }

    #[test]
    fn test_events_arrive_in_order() {
        let (listener, events) = ChannelListener::new(HashMap::new());
        listener.did_load(true, None);
        listener.received_message("end", "engine", MessageType::None, None);

        assert_eq!(
            events.try_recv().unwrap(),
            PlayerEvent::Load {
                success: true,
                error: None
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            PlayerEvent::Message {
                identifier: "end".to_owned(),
                sender: "engine".to_owned(),
                message_type: MessageType::None,
                payload: None,
            }
        );
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_tolerated() {
        let (listener, events) = ChannelListener::new(HashMap::new());
        drop(events);
        listener.did_load(false, Some("decode error"));
    }
}
