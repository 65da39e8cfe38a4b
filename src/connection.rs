use crate::error::{Error, Result};
use crate::pose::PoseAssignment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a robot module.
/// Maps to the index of its cell in the shape's cell order.
pub type ModuleId = usize;

/// One of the four connector faces of a module, in the module's own rotated frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl ConnectorSide {
    /// The single-letter code used in connection labels.
    pub fn letter(self) -> char {
        match self {
            Self::Top => 'T',
            Self::Bottom => 'B',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'T' => Some(Self::Top),
            'B' => Some(Self::Bottom),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

/// A connector on a specific module, e.g. `"0R"` for the right face of module 0.
///
/// Serialized as its string form so configurations stay readable in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ConnectionLabel {
    /// The module that owns the connector.
    pub module: ModuleId,
    /// Which face of the module is used.
    pub side: ConnectorSide,
}

impl ConnectionLabel {
    pub fn new(module: ModuleId, side: ConnectorSide) -> Self {
        Self { module, side }
    }
}

impl fmt::Display for ConnectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.module, self.side.letter())
    }
}

impl FromStr for ConnectionLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let side = chars
            .next_back()
            .and_then(ConnectorSide::from_letter)
            .ok_or_else(|| Error::InvalidLabel(s.to_string()))?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidLabel(s.to_string()));
        }
        let module = digits
            .parse()
            .map_err(|_| Error::InvalidLabel(s.to_string()))?;
        Ok(Self { module, side })
    }
}

impl From<ConnectionLabel> for String {
    fn from(label: ConnectionLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for ConnectionLabel {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// The two facing connectors of one adjacent module pair.
///
/// The first label belongs to the module visited first in cell order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionPair(pub ConnectionLabel, pub ConnectionLabel);

impl ConnectionPair {
    /// Both labels rendered as strings, in pair order.
    pub fn labels(&self) -> [String; 2] {
        [self.0.to_string(), self.1.to_string()]
    }
}

impl fmt::Display for ConnectionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// The complete connector wiring for one pose assignment of a shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// The pose assignment this wiring was derived from.
    pub poses: PoseAssignment,

    /// One pair per adjacent cell pair, in edge-visitation order.
    pub connections: Vec<ConnectionPair>,
}

impl ConnectionConfig {
    /// The connection pairs as label strings, e.g. `[["0R", "1B"]]`.
    pub fn labels(&self) -> Vec<[String; 2]> {
        self.connections.iter().map(ConnectionPair::labels).collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display_and_parse() {
        let label = ConnectionLabel::new(12, ConnectorSide::Left);
        assert_eq!(label.to_string(), "12L");
        assert_eq!("12L".parse::<ConnectionLabel>().unwrap(), label);
    }

    #[test]
    fn test_label_rejects_malformed() {
        for bad in ["", "R", "0X", "-1T", "a2B", "3"] {
            assert!(
                matches!(bad.parse::<ConnectionLabel>(), Err(Error::InvalidLabel(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_pair_serializes_as_string_array() {
        let pair = ConnectionPair(
            ConnectionLabel::new(0, ConnectorSide::Right),
            ConnectionLabel::new(1, ConnectorSide::Bottom),
        );
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"["0R","1B"]"#);
        let back: ConnectionPair = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);
    }
}
