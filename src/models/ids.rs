//! Identifier Types
//!
//! Newtypes for the identifiers the CFTools API understands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Server api id of a CFTools Cloud server resource.
    ServerApiId
);
string_id!(
    /// Internal CFTools account id.
    CfToolsId
);
string_id!(
    /// Steam account id in its 64-bit form.
    SteamId64
);
string_id!(
    /// BattlEye GUID.
    BattlEyeGuid
);
string_id!(
    /// Bohemia Interactive account id.
    BohemiaInteractiveId
);

// == Player Id ==
/// Any identifier that names a player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum PlayerId {
    #[serde(rename = "cftools")]
    CfTools(CfToolsId),
    #[serde(rename = "steam64")]
    Steam64(SteamId64),
    #[serde(rename = "battleye")]
    BattlEye(BattlEyeGuid),
    #[serde(rename = "bohemia")]
    Bohemia(BohemiaInteractiveId),
}

impl PlayerId {
    /// Short tag naming the identifier kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerId::CfTools(_) => "cftools",
            PlayerId::Steam64(_) => "steam64",
            PlayerId::BattlEye(_) => "battleye",
            PlayerId::Bohemia(_) => "bohemia",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlayerId::CfTools(id) => id.as_str(),
            PlayerId::Steam64(id) => id.as_str(),
            PlayerId::BattlEye(id) => id.as_str(),
            PlayerId::Bohemia(id) => id.as_str(),
        }
    }

    /// Rejects identifiers that are empty or only whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.as_str().trim().is_empty() {
            return Err(ClientError::MalformedRequest(format!(
                "{} player id must not be empty",
                self.kind()
            )));
        }
        Ok(())
    }
}

impl From<CfToolsId> for PlayerId {
    fn from(id: CfToolsId) -> Self {
        PlayerId::CfTools(id)
    }
}

impl From<SteamId64> for PlayerId {
    fn from(id: SteamId64) -> Self {
        PlayerId::Steam64(id)
    }
}

impl From<BattlEyeGuid> for PlayerId {
    fn from(id: BattlEyeGuid) -> Self {
        PlayerId::BattlEye(id)
    }
}

impl From<BohemiaInteractiveId> for PlayerId {
    fn from(id: BohemiaInteractiveId) -> Self {
        PlayerId::Bohemia(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_ids() {
        assert!(PlayerId::from(SteamId64::new("76561198000000000")).validate().is_ok());

        let result = PlayerId::from(SteamId64::new("   ")).validate();
        assert!(matches!(result, Err(ClientError::MalformedRequest(_))));

        let result = PlayerId::from(CfToolsId::new("")).validate();
        assert!(matches!(result, Err(ClientError::MalformedRequest(msg)) if msg.contains("cftools")));
    }

    #[test]
    fn test_player_id_serde_shape() {
        let id = PlayerId::from(BattlEyeGuid::new("abc"));
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "battleye", "id": "abc"}));
    }
}
