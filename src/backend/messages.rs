use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category tag sent with every query. Names parse in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Pillar {
    #[default]
    #[serde(rename = "FAIV")]
    Faiv,
    Wisdom,
    Strategy,
    Expansion,
    Future,
    Integrity,
}

impl Pillar {
    pub const ALL: [Pillar; 6] = [
        Pillar::Faiv,
        Pillar::Wisdom,
        Pillar::Strategy,
        Pillar::Expansion,
        Pillar::Future,
        Pillar::Integrity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Faiv => "FAIV",
            Pillar::Wisdom => "Wisdom",
            Pillar::Strategy => "Strategy",
            Pillar::Expansion => "Expansion",
            Pillar::Future => "Future",
            Pillar::Integrity => "Integrity",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pillar {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Pillar::ALL
            .into_iter()
            .find(|pillar| pillar.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown pillar: {}", s))
    }
}

impl TryFrom<String> for Pillar {
    type Error = anyhow::Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Body of `POST /query/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub session_id: String,
    pub input_text: String,
    pub pillar: Pillar,
}

/// Reply from `POST /query/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}
