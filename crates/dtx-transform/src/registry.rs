//! Transformer lookup by kind name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::transformers::{
    CategoricalStringTransformer, DateTimeTransformer, FloatTransformer, Transformer,
};

/// Transform kinds, named as they appear in the `Type` field of metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    Float,
    CategoricalString,
    DateTime,
}

impl TransformKind {
    pub const ALL: [TransformKind; 3] = [
        TransformKind::Float,
        TransformKind::CategoricalString,
        TransformKind::DateTime,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Float => "Float",
            TransformKind::CategoricalString => "CategoricalString",
            TransformKind::DateTime => "DateTime",
        }
    }

    /// The registered transformer for this kind.
    pub fn transformer(self) -> &'static Transformer {
        match self {
            TransformKind::Float => &FLOAT,
            TransformKind::CategoricalString => &CATEGORICAL_STRING,
            TransformKind::DateTime => &DATE_TIME,
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown transform kind '{s}'"))
    }
}

static FLOAT: Transformer = Transformer::Float(FloatTransformer);
static CATEGORICAL_STRING: Transformer =
    Transformer::CategoricalString(CategoricalStringTransformer);
static DATE_TIME: Transformer = Transformer::DateTime(DateTimeTransformer);

/// Transformer registered under `name`, if any. Names are case-sensitive.
pub fn lookup(name: &str) -> Option<&'static Transformer> {
    name.parse::<TransformKind>()
        .ok()
        .map(TransformKind::transformer)
}
