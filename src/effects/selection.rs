//! Card selection for interactive steps.
//!
//! A `CardSelection` describes which cards an interactive step may pick
//! and how many:
//! - `SelectionSource::Static`: a fixed list of instance ids
//! - `SelectionSource::Zone`: every card in a zone matching a `CardFilter`
//!
//! Zone sources are declarative. Their candidates are computed from the
//! snapshot current at the time the step is reached, not when the step was
//! built, so a discard after a draw sees the drawn cards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardInstance, CardKind, Race, SpellType};
use crate::core::{ErrorCode, GameState, InstanceId, ValidationError, ValidationResult};
use crate::zones::ZoneName;

/// Filters for selectable cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFilter {
    /// Every card.
    Any,
    /// Cards of a broad kind.
    Kind(CardKind),
    /// Spells of a sub-type.
    Spell(SpellType),
    /// Monsters, optionally restricted by race and maximum level.
    Monster {
        race: Option<Race>,
        max_level: Option<u8>,
    },
    /// Every card except one instance (usually the source).
    Except(InstanceId),
    /// All filters must match.
    All(Vec<CardFilter>),
}

impl CardFilter {
    /// Check a card against the filter.
    #[must_use]
    pub fn matches(&self, card: &CardInstance) -> bool {
        match self {
            CardFilter::Any => true,
            CardFilter::Kind(kind) => card.data.kind == *kind,
            CardFilter::Spell(spell_type) => card.data.spell_type == Some(*spell_type),
            CardFilter::Monster { race, max_level } => {
                card.data.is_monster()
                    && race.map_or(true, |r| card.data.race() == Some(r))
                    && max_level.map_or(true, |max| card.data.level() <= max)
            }
            CardFilter::Except(id) => card.instance_id != *id,
            CardFilter::All(filters) => filters.iter().all(|f| f.matches(card)),
        }
    }

    /// Combine with another filter (builder pattern).
    #[must_use]
    pub fn and(self, other: CardFilter) -> Self {
        match self {
            CardFilter::All(mut filters) => {
                filters.push(other);
                CardFilter::All(filters)
            }
            CardFilter::Any => other,
            first => CardFilter::All(vec![first, other]),
        }
    }
}

/// Where selection candidates come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionSource {
    Static(SmallVec<[InstanceId; 8]>),
    Zone { zone: ZoneName, filter: CardFilter },
}

/// What an interactive step asks the player to choose.
///
/// ## Example
///
/// ```
/// use rust_duel::effects::{CardFilter, CardSelection};
/// use rust_duel::zones::ZoneName;
///
/// let discard_two = CardSelection::from_zone(ZoneName::Hand, CardFilter::Any, 2, 2);
/// assert!(!discard_two.cancelable);
/// assert_eq!(discard_two.min, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSelection {
    pub source: SelectionSource,
    pub min: usize,
    pub max: usize,
    pub cancelable: bool,
}

impl CardSelection {
    /// Select from a fixed list of instances.
    pub fn fixed(ids: impl IntoIterator<Item = InstanceId>, min: usize, max: usize) -> Self {
        Self {
            source: SelectionSource::Static(ids.into_iter().collect()),
            min,
            max,
            cancelable: false,
        }
    }

    /// Select from the cards in a zone that match `filter`.
    #[must_use]
    pub fn from_zone(zone: ZoneName, filter: CardFilter, min: usize, max: usize) -> Self {
        Self {
            source: SelectionSource::Zone { zone, filter },
            min,
            max,
            cancelable: false,
        }
    }

    /// Allow the player to cancel (builder pattern).
    #[must_use]
    pub fn cancelable(mut self) -> Self {
        self.cancelable = true;
        self
    }

    /// Candidates against the given snapshot.
    ///
    /// Static ids that no longer exist are dropped.
    #[must_use]
    pub fn candidates(&self, state: &GameState) -> Vec<InstanceId> {
        match &self.source {
            SelectionSource::Static(ids) => ids
                .iter()
                .copied()
                .filter(|&id| state.instance(id).is_some())
                .collect(),
            SelectionSource::Zone { zone, filter } => state
                .zone(*zone)
                .iter()
                .filter(|c| filter.matches(c))
                .map(|c| c.instance_id)
                .collect(),
        }
    }

    /// Build the request shown to the player.
    #[must_use]
    pub fn request(&self, step_id: &str, summary: &str, state: &GameState) -> SelectionRequest {
        SelectionRequest {
            step_id: step_id.to_string(),
            summary: summary.to_string(),
            candidates: self.candidates(state),
            min: self.min,
            max: self.max,
            cancelable: self.cancelable,
        }
    }

    /// Validate chosen ids: count within `[min, max]`, no duplicates, every
    /// id a current candidate.
    pub fn validate(&self, state: &GameState, chosen: &[InstanceId]) -> ValidationResult {
        if chosen.len() < self.min || chosen.len() > self.max {
            return Err(ValidationError::new(
                ErrorCode::InvalidSelection,
                format!(
                    "expected between {} and {} cards, got {}",
                    self.min,
                    self.max,
                    chosen.len()
                ),
            ));
        }
        let candidates = self.candidates(state);
        for (idx, id) in chosen.iter().enumerate() {
            if chosen[..idx].contains(id) {
                return Err(ValidationError::new(
                    ErrorCode::InvalidSelection,
                    format!("{} selected twice", id),
                ));
            }
            if !candidates.contains(id) {
                return Err(ValidationError::new(
                    ErrorCode::InvalidSelection,
                    format!("{} is not a valid choice", id),
                ));
            }
        }
        Ok(())
    }
}

/// What the sequencer exposes while waiting for a selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub step_id: String,
    pub summary: String,
    pub candidates: Vec<InstanceId>,
    pub min: usize,
    pub max: usize,
    pub cancelable: bool,
}
