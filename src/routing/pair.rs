//! # View/Display Pairs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::errors::RoutingError;

/// Identifies one display of one view
///
/// Serialized as `"{view_id}.{display_id}"`, which is also the key format of
/// the persisted route name index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewDisplayPair {
    view_id: String,
    display_id: String,
}

/// Route names keyed by the pair that owns them
pub type ViewRouteNames = BTreeMap<ViewDisplayPair, String>;

impl ViewDisplayPair {
    pub fn new(view_id: impl Into<String>, display_id: impl Into<String>) -> Self {
        Self {
            view_id: view_id.into(),
            display_id: display_id.into(),
        }
    }

    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    /// Serialized `view.display` key
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ViewDisplayPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.view_id, self.display_id)
    }
}

impl FromStr for ViewDisplayPair {
    type Err = RoutingError;

    /// View ids never contain a dot, so the first dot separates the parts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((view_id, display_id)) if !view_id.is_empty() && !display_id.is_empty() => {
                Ok(Self::new(view_id, display_id))
            }
            _ => Err(RoutingError::InvalidPairKey(s.to_string())),
        }
    }
}

impl Serialize for ViewDisplayPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ViewDisplayPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
