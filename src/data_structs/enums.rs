use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Default)]
pub enum Strand {
    /// Forward strand.
    Forward,
    /// Reverse strand.
    Reverse,
    /// No strand.
    #[default]
    None,
}

impl Strand {
    pub fn is_forward(&self) -> bool {
        matches!(self, Strand::Forward)
    }
}

impl FromStr for Strand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Ok(Strand::None),
        }
    }
}

impl From<Strand> for char {
    fn from(value: Strand) -> Self {
        match value {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::None => '.',
        }
    }
}

impl Display for Strand {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Serialize for Strand {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Strand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        Strand::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Structural role of a block, derived from the feature type.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockRole {
    Cds,
    Promoter,
    Terminator,
}

static ROLE_TABLE: Lazy<HashMap<&'static str, BlockRole>> = Lazy::new(|| {
    HashMap::from_iter([
        ("CDS", BlockRole::Cds),
        // promoter is a subclass of regulatory
        ("regulatory", BlockRole::Promoter),
        ("promoter", BlockRole::Promoter),
        ("terminator", BlockRole::Terminator),
        ("gene", BlockRole::Cds),
        ("mat_peptide", BlockRole::Cds),
    ])
});

impl BlockRole {
    /// Looks up the role of a feature type. Unknown types have no role.
    pub fn from_feature_type(feature_type: &str) -> Option<Self> {
        ROLE_TABLE.get(feature_type).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockRole::Cds => "cds",
            BlockRole::Promoter => "promoter",
            BlockRole::Terminator => "terminator",
        }
    }
}

impl Display for BlockRole {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
