//! Engine configuration passed at open

use std::ffi::CString;

use crate::error::Result;

/// Engine settings for [`Player::open_with_settings`](crate::Player::open_with_settings).
///
/// Defaults to the zeroed form: no OSC ports, no localhost port, engine
/// pumps itself.
///
/// ```
/// use smartplayer::Settings;
///
/// let settings = Settings::new()
///     .osc_read_port(7000)
///     .osc_write_port(7001)
///     .pump_manually(false);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Settings {
    osc_read_port: i32,
    osc_write_port: i32,
    osc_address: CString,
    localhost_port: i32,
    pump_manually: bool,
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Port the engine reads OSC control messages from
    pub fn osc_read_port(mut self, port: i32) -> Self {
        self.osc_read_port = port;
        self
    }

    /// Port the engine writes OSC notifications to
    pub fn osc_write_port(mut self, port: i32) -> Self {
        self.osc_write_port = port;
        self
    }

    /// Address the OSC handler binds to
    pub fn osc_address(mut self, address: &str) -> Result<Self> {
        self.osc_address = CString::new(address)?;
        Ok(self)
    }

    /// Port for the localhost control endpoint
    pub fn localhost_port(mut self, port: i32) -> Self {
        self.localhost_port = port;
        self
    }

    /// Pump the render loop manually instead of letting the engine drive it
    pub fn pump_manually(mut self, pump: bool) -> Self {
        self.pump_manually = pump;
        self
    }

    /// Raw struct for `smartplayer_open`. Valid while `self` lives; the
    /// engine copies what it needs during open.
    pub(crate) fn as_raw(&self) -> smartplayer_sys::NF_SMART_PLAYER_SETTINGS {
        smartplayer_sys::NF_SMART_PLAYER_SETTINGS {
            osc_read_port: self.osc_read_port,
            osc_write_port: self.osc_write_port,
            osc_address: self.osc_address.as_ptr(),
            localhost_port: self.localhost_port,
            pump_manually: self.pump_manually as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let raw = Settings::default().as_raw();
        assert_eq!(raw.osc_read_port, 0);
        assert_eq!(raw.osc_write_port, 0);
        assert_eq!(raw.localhost_port, 0);
        assert_eq!(raw.pump_manually, 0);
        assert!(!raw.osc_address.is_null());
    }

    #[test]
    fn test_builder() {
        let settings = Settings::new()
            .osc_read_port(7000)
            .osc_write_port(7001)
            .localhost_port(8080)
            .pump_manually(true)
            .osc_address("127.0.0.1")
            .unwrap();
        let raw = settings.as_raw();
        assert_eq!(raw.osc_read_port, 7000);
        assert_eq!(raw.osc_write_port, 7001);
        assert_eq!(raw.localhost_port, 8080);
        assert_eq!(raw.pump_manually, 1);
    }

    #[test]
    fn test_osc_address_rejects_interior_nul() {
        assert!(Settings::new().osc_address("127.0\0.1").is_err());
    }
}
