//! The closed enums of the engine's C API

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Output destination for a player, fixed at [`Player::open`](crate::Player::open).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverType {
    /// Render to the system soundcard
    Soundcard,
    /// Render to a file at the player's output path
    File,
}

impl DriverType {
    /// Stable numeric tag used across the native boundary
    pub fn num_val(self) -> i32 {
        match self {
            DriverType::Soundcard => 0,
            DriverType::File => 1,
        }
    }

    /// The engine's string form ("sound" / "file")
    pub fn as_str(self) -> &'static str {
        match self {
            DriverType::Soundcard => "sound",
            DriverType::File => "file",
        }
    }

    pub(crate) fn to_c(self) -> smartplayer_sys::NF_SMART_PLAYER_DRIVER_TYPE {
        match self {
            DriverType::Soundcard => smartplayer_sys::NF_SMART_PLAYER_DRIVER_TYPE_SOUNDCARD,
            DriverType::File => smartplayer_sys::NF_SMART_PLAYER_DRIVER_TYPE_FILE,
        }
    }
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sound" => Ok(DriverType::Soundcard),
            "file" => Ok(DriverType::File),
            _ => Err(Error::InvalidArgument("unknown driver type")),
        }
    }
}

/// Kind of a message exchanged with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// No payload
    None,
    /// Nul-terminated string payload
    Generic,
}

impl MessageType {
    /// Stable numeric tag used across the native boundary
    pub fn num_val(self) -> i32 {
        match self {
            MessageType::None => 0,
            MessageType::Generic => 1,
        }
    }

    pub(crate) fn to_c(self) -> smartplayer_sys::NF_SMART_PLAYER_MESSAGE_TYPE {
        match self {
            MessageType::None => smartplayer_sys::NF_SMART_PLAYER_MESSAGE_TYPE_NONE,
            MessageType::Generic => smartplayer_sys::NF_SMART_PLAYER_MESSAGE_TYPE_GENERIC,
        }
    }

    /// Unknown kinds map to `None` so the payload pointer is never read.
    pub(crate) fn from_c(message_type: smartplayer_sys::NF_SMART_PLAYER_MESSAGE_TYPE) -> Self {
        match message_type {
            smartplayer_sys::NF_SMART_PLAYER_MESSAGE_TYPE_GENERIC => MessageType::Generic,
            _ => MessageType::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_type_tags() {
        assert_eq!(DriverType::Soundcard.num_val(), 0);
        assert_eq!(DriverType::File.num_val(), 1);
    }

    #[test]
    fn test_message_type_tags() {
        assert_eq!(MessageType::None.num_val(), 0);
        assert_eq!(MessageType::Generic.num_val(), 1);
    }

    #[test]
    fn test_driver_type_strings() {
        assert_eq!(DriverType::Soundcard.to_string(), "sound");
        assert_eq!(DriverType::File.to_string(), "file");
        assert_eq!("sound".parse::<DriverType>().unwrap(), DriverType::Soundcard);
        assert_eq!("file".parse::<DriverType>().unwrap(), DriverType::File);
        assert!("tape".parse::<DriverType>().is_err());
    }

    #[test]
    fn test_message_type_from_c() {
        assert_eq!(
            MessageType::from_c(smartplayer_sys::NF_SMART_PLAYER_MESSAGE_TYPE_NONE),
            MessageType::None
        );
        assert_eq!(
            MessageType::from_c(smartplayer_sys::NF_SMART_PLAYER_MESSAGE_TYPE_GENERIC),
            MessageType::Generic
        );
        // Unknown kinds fall back to None
        assert_eq!(MessageType::from_c(99), MessageType::None);
    }

    #[test]
    fn test_tags_match_c_constants() {
        assert_eq!(DriverType::Soundcard.num_val(), DriverType::Soundcard.to_c());
        assert_eq!(DriverType::File.num_val(), DriverType::File.to_c());
        assert_eq!(MessageType::None.num_val(), MessageType::None.to_c());
        assert_eq!(MessageType::Generic.num_val(), MessageType::Generic.to_c());
    }
}
