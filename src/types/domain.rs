//! Creative domains a palette can be applied to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SwatchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Cooking,
    Fashion,
    Interior,
    Art,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Cooking, Domain::Fashion, Domain::Interior, Domain::Art];

    /// Wire name, also the request `path`.
    pub fn slug(self) -> &'static str {
        match self {
            Domain::Cooking => "cooking",
            Domain::Fashion => "fashion",
            Domain::Interior => "interior",
            Domain::Art => "art",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Domain::Cooking => "Cooking",
            Domain::Fashion => "Fashion",
            Domain::Interior => "Interior Design",
            Domain::Art => "Art",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Domain {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().trim_start_matches('/').to_ascii_lowercase();
        match normalized.as_str() {
            "cooking" | "food" => Ok(Domain::Cooking),
            "fashion" => Ok(Domain::Fashion),
            "interior" | "interior-design" | "interior design" | "interiors" => Ok(Domain::Interior),
            "art" | "artwork" => Ok(Domain::Art),
            _ => Err(SwatchError::Parse {
                message: format!("Unknown domain: {}", s),
                help: Some("Use cooking, fashion, interior or art".to_string()),
            }),
        }
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Domain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Cooking".parse::<Domain>().unwrap(), Domain::Cooking);
        assert_eq!("/fashion".parse::<Domain>().unwrap(), Domain::Fashion);
        assert_eq!("Interior Design".parse::<Domain>().unwrap(), Domain::Interior);
        assert_eq!("interior-design".parse::<Domain>().unwrap(), Domain::Interior);
        assert!("gardening".parse::<Domain>().is_err());
    }

    #[test]
    fn test_serde_uses_slug() {
        assert_eq!(serde_json::to_string(&Domain::Interior).unwrap(), r#""interior""#);
        let d: Domain = serde_json::from_str(r#""Art""#).unwrap();
        assert_eq!(d, Domain::Art);
    }
}
