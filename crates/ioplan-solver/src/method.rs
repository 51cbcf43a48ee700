use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::problem::ProblemKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown method '{0}' (expected nw, lc, vogel or hungarian)")]
pub struct ParseMethodError(pub String);

/// Solution procedure
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    #[cfg_attr(feature = "serde", serde(rename = "nw"))]
    NorthwestCorner,
    #[cfg_attr(feature = "serde", serde(rename = "lc"))]
    LeastCost,
    #[cfg_attr(feature = "serde", serde(rename = "vogel"))]
    Vogel,
    #[cfg_attr(feature = "serde", serde(rename = "hungarian"))]
    Hungarian,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::NorthwestCorner,
        Method::LeastCost,
        Method::Vogel,
        Method::Hungarian,
    ];

    /// Short identifier accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::NorthwestCorner => "nw",
            Method::LeastCost => "lc",
            Method::Vogel => "vogel",
            Method::Hungarian => "hungarian",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Method::NorthwestCorner => "Northwest Corner",
            Method::LeastCost => "Least Cost",
            Method::Vogel => "Vogel's Approximation",
            Method::Hungarian => "Hungarian",
        }
    }

    /// The only problem kind this method accepts
    pub fn kind(&self) -> ProblemKind {
        match self {
            Method::Hungarian => ProblemKind::Assignment,
            _ => ProblemKind::Transportation,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nw" | "northwest" | "northwest-corner" => Ok(Method::NorthwestCorner),
            "lc" | "least-cost" | "leastcost" => Ok(Method::LeastCost),
            "vogel" | "vam" => Ok(Method::Vogel),
            "hungarian" => Ok(Method::Hungarian),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}
