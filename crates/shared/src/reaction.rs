use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Closed set of reactions a user can attach to a subject. Declaration
/// order is the tie-break priority when counts are equal, most important
/// first. The emoji/label mapping lives in the presentation layer.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    ThumbsUp,
    Love,
    Laugh,
    Wow,
    Sad,
}

impl ReactionKind {
    pub fn priority(self) -> usize {
        Self::VARIANTS
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(Self::VARIANTS.len())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub kind: ReactionKind,
    pub count: u64,
}

/// Engagement shape exchanged with the gateway and rendered by the UI.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionSnapshot {
    #[serde(default)]
    pub counts: HashMap<ReactionKind, u64>,
    #[serde(default)]
    pub current: Option<ReactionKind>,
    #[serde(default)]
    pub top: Vec<ReactionCount>,
    #[serde(default)]
    pub total: u64,
}
