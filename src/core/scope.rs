use crate::core::errors::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Scope
-------------------------------------------------------------------------------------------------*/

/// Deployment scope of a Web ACL and its IP sets: attached to a regional resource (ALB, API
/// Gateway, AppSync, ...) or to a CloudFront distribution at the edge.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum Scope {
    #[default]
    #[serde(rename = "REGIONAL")]
    Regional,

    #[serde(rename = "CLOUDFRONT")]
    Edge,
}

impl Scope {
    /// Value used for the `Scope` property of WAFv2 resources.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Regional => "REGIONAL",
            Scope::Edge => "CLOUDFRONT",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_uppercase().as_str() {
            "REGIONAL" => Ok(Scope::Regional),
            "CLOUDFRONT" | "EDGE" => Ok(Scope::Edge),
            _ => Err(format!("Invalid scope: {value}").into()),
        }
    }
}

// Parameters files go through the same case-insensitive parsing as CLI and env values
impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_from_str() {
        assert_eq!("REGIONAL".parse::<Scope>().unwrap(), Scope::Regional);
        assert_eq!("regional".parse::<Scope>().unwrap(), Scope::Regional);
        assert_eq!("CLOUDFRONT".parse::<Scope>().unwrap(), Scope::Edge);
        assert_eq!("edge".parse::<Scope>().unwrap(), Scope::Edge);
        assert!("GLOBAL".parse::<Scope>().is_err());
    }

    #[test]
    fn test_scope_wire_values() {
        assert_eq!(Scope::Regional.to_string(), "REGIONAL");
        assert_eq!(Scope::Edge.to_string(), "CLOUDFRONT");
        assert_eq!(serde_json::to_string(&Scope::Edge).unwrap(), r#""CLOUDFRONT""#);

        let edge: Scope = serde_json::from_str(r#""EDGE""#).unwrap();
        assert_eq!(edge, Scope::Edge);
    }

    #[test]
    fn test_scope_deserialize_matches_from_str() {
        for value in ["REGIONAL", "regional", "CLOUDFRONT", "cloudfront", "EDGE", "edge"] {
            let deserialized: Scope = serde_json::from_str(&format!(r#""{value}""#)).unwrap();
            assert_eq!(deserialized, value.parse::<Scope>().unwrap());
        }

        let error = serde_json::from_str::<Scope>(r#""global""#).unwrap_err();
        assert!(error.to_string().contains("Invalid scope: global"));
        assert!(serde_json::from_str::<Scope>("1").is_err());
    }

    #[test]
    fn test_scope_default_is_regional() {
        assert_eq!(Scope::default(), Scope::Regional);
    }
}
