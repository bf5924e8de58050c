//! Caller-supplied callback surface

use crate::types::MessageType;

/// The engine's three callbacks into the caller.
///
/// Supplied to [`Player::open`](crate::Player::open) as an
/// `Arc<dyn PlayerListener>`; the player borrows it for its lifetime and
/// the engine invokes it from a thread it controls, so implementations
/// must be `Send + Sync`. [`ChannelListener`](crate::ChannelListener) is a
/// ready-made implementation that forwards events into a channel.
pub trait PlayerListener: Send + Sync {
    /// Resolve a named variable for the given plugin namespace.
    ///
    /// Returning `None` hands the engine an empty string.
    fn resolve_variable(&self, plugin_namespace: &str, variable_identifier: &str)
        -> Option<String>;

    /// Content finished loading. `error_message` is set when `success` is
    /// false, and may carry engine diagnostics even on success.
    fn did_load(&self, success: bool, error_message: Option<&str>);

    /// A message arrived from the engine. The payload is `Some` only for
    /// [`MessageType::Generic`].
    fn received_message(
        &self,
        message_identifier: &str,
        sender_identifier: &str,
        message_type: MessageType,
        payload: Option<&str>,
    );
}
