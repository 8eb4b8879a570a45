//! Game state: the immutable snapshot.
//!
//! ## GameState
//!
//! Complete solo-play state:
//! - Zones (deck, hand, field zones, graveyard, banished)
//! - Life points per side, phase, turn number
//! - Reserved chain-block list
//! - Game result
//! - Turn-scoped allowances and once-per-turn flags
//! - RNG state
//!
//! Engine operations never mutate a snapshot they were given. They clone it
//! (O(1), every collection is an `im` persistent structure), change the
//! clone, and return it. Mutators are therefore crate-internal.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use super::config::DuelConfig;
use super::entity::InstanceId;
use super::error::EngineError;
use super::phase::Phase;
use super::player::{Side, SideMap};
use super::rng::{GameRng, GameRngState};
use crate::cards::{CardCatalog, CardId, CardInstance, EffectId, Placement};
use crate::rules::RuleId;
use crate::stack::ChainBlock;
use crate::zones::{ZoneName, ZonePosition, Zones};

/// Why a game ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryReason {
    /// The losing side's life points reached zero.
    LifePointsDepleted,
    /// The losing side had to draw from an empty deck.
    DeckOut,
    /// A victory-condition rule was satisfied.
    SpecialVictory { rule: RuleId, name: String },
}

/// Outcome of the duel so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    #[default]
    Ongoing,
    Decided { winner: Side, reason: VictoryReason },
}

impl GameResult {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameResult::Decided { .. })
    }

    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::Ongoing => None,
            GameResult::Decided { winner, .. } => Some(*winner),
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&VictoryReason> {
        match self {
            GameResult::Ongoing => None,
            GameResult::Decided { reason, .. } => Some(reason),
        }
    }
}

/// Immutable game snapshot.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardData, CardId, CardRegistry, SpellType};
/// use rust_duel::core::{DuelConfig, GameState, Phase};
/// use rust_duel::zones::ZoneName;
///
/// let mut catalog = CardRegistry::new();
/// catalog.register(CardData::spell(CardId::new(1), "Pot", SpellType::Normal)).unwrap();
///
/// let config = DuelConfig::new().with_opening_hand(2).build().unwrap();
/// let state = GameState::new(&config, &catalog, &[CardId::new(1); 5]).unwrap();
///
/// assert_eq!(state.zones().len(ZoneName::Hand), 2);
/// assert_eq!(state.zones().len(ZoneName::Deck), 3);
/// assert_eq!(state.phase(), Phase::Draw);
/// assert_eq!(state.turn(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    config: DuelConfig,
    zones: Zones,
    life_points: SideMap<i64>,
    phase: Phase,
    turn: u32,
    chain: Vector<ChainBlock>,
    result: GameResult,
    normal_summons_remaining: u32,
    card_once_per_turn: ImHashSet<CardId>,
    effect_once_per_turn: ImHashSet<(InstanceId, EffectId)>,
    rng: GameRngState,
}

impl GameState {
    /// Build the opening snapshot.
    ///
    /// One instance is created per deck-list entry, with ids allocated
    /// sequentially from `InstanceId::first()` in list order. The last
    /// entry ends up on top. The deck is then shuffled (if configured) and
    /// the opening hand drawn.
    pub fn new(
        config: &DuelConfig,
        catalog: &dyn CardCatalog,
        deck: &[CardId],
    ) -> Result<Self, EngineError> {
        if deck.len() < config.opening_hand {
            return Err(EngineError::InvalidConfig(format!(
                "deck of {} cannot supply an opening hand of {}",
                deck.len(),
                config.opening_hand
            )));
        }

        let mut zones = Zones::new();
        let mut next_id = InstanceId::first();
        for &card_id in deck {
            let data = catalog.lookup(card_id)?;
            zones.insert(
                CardInstance::new(next_id, data, ZoneName::Deck),
                ZonePosition::Top,
            );
            next_id = next_id.next();
        }

        let mut rng = GameRng::new(config.seed);
        if config.shuffle_on_start {
            zones.shuffle_deck(&mut rng);
        }

        for _ in 0..config.opening_hand {
            if let Some(top) = zones.top(ZoneName::Deck).map(|c| c.instance_id) {
                zones.move_to(top, ZoneName::Hand, Placement::FACE_UP, ZonePosition::Top);
            }
        }

        let state = Self {
            config: config.clone(),
            zones,
            life_points: SideMap::with_value(config.starting_life),
            phase: Phase::default(),
            turn: 1,
            chain: Vector::new(),
            result: GameResult::Ongoing,
            normal_summons_remaining: config.normal_summons_per_turn,
            card_once_per_turn: ImHashSet::new(),
            effect_once_per_turn: ImHashSet::new(),
            rng: rng.state(),
        };
        state.check_invariants()?;
        Ok(state)
    }

    // === Read access ===

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    #[must_use]
    pub fn zones(&self) -> &Zones {
        &self.zones
    }

    /// Cards in a zone, bottom to top.
    #[must_use]
    pub fn zone(&self, name: ZoneName) -> &Vector<CardInstance> {
        self.zones.zone(name)
    }

    /// Find an instance anywhere.
    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&CardInstance> {
        self.zones.get(id)
    }

    /// Current location of an instance.
    #[must_use]
    pub fn location(&self, id: InstanceId) -> Option<ZoneName> {
        self.instance(id).map(CardInstance::location)
    }

    #[must_use]
    pub fn life(&self, side: Side) -> i64 {
        self.life_points[side]
    }

    #[must_use]
    pub fn life_points(&self) -> &SideMap<i64> {
        &self.life_points
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Turn number (starts at 1).
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Reserved chain-block list. Only one activation resolves at a time,
    /// so the engine itself never stacks blocks here.
    #[must_use]
    pub fn chain(&self) -> &Vector<ChainBlock> {
        &self.chain
    }

    #[must_use]
    pub fn result(&self) -> &GameResult {
        &self.result
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    #[must_use]
    pub fn normal_summons_remaining(&self) -> u32 {
        self.normal_summons_remaining
    }

    /// Has a card-keyed once-per-turn effect of `card` been used this turn?
    #[must_use]
    pub fn card_used_this_turn(&self, card: CardId) -> bool {
        self.card_once_per_turn.contains(&card)
    }

    /// Has `instance` used `effect` this turn?
    #[must_use]
    pub fn effect_used_this_turn(&self, instance: InstanceId, effect: EffectId) -> bool {
        self.effect_once_per_turn.contains(&(instance, effect))
    }

    #[must_use]
    pub fn card_once_per_turn(&self) -> &ImHashSet<CardId> {
        &self.card_once_per_turn
    }

    #[must_use]
    pub fn effect_once_per_turn(&self) -> &ImHashSet<(InstanceId, EffectId)> {
        &self.effect_once_per_turn
    }

    #[must_use]
    pub fn rng_state(&self) -> &GameRngState {
        &self.rng
    }

    /// Check the snapshot invariants.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        self.zones.check_invariants()
    }

    // === Crate-internal mutation (callers work on a clone) ===

    pub(crate) fn zones_mut(&mut self) -> &mut Zones {
        &mut self.zones
    }

    pub(crate) fn life_mut(&mut self, side: Side) -> &mut i64 {
        &mut self.life_points[side]
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_result(&mut self, result: GameResult) {
        self.result = result;
    }

    pub(crate) fn consume_normal_summon(&mut self) {
        self.normal_summons_remaining = self.normal_summons_remaining.saturating_sub(1);
    }

    pub(crate) fn mark_card_used(&mut self, card: CardId) {
        self.card_once_per_turn.insert(card);
    }

    pub(crate) fn mark_effect_used(&mut self, instance: InstanceId, effect: EffectId) {
        self.effect_once_per_turn.insert((instance, effect));
        self.zones.update(instance, |c| {
            if let Some(field) = c.field_mut() {
                field.mark_activated(effect);
            }
        });
    }

    /// Shuffle the deck, advancing the stored RNG state.
    pub(crate) fn shuffle_deck(&mut self) {
        let mut rng = GameRng::from_state(&self.rng);
        self.zones.shuffle_deck(&mut rng);
        self.rng = rng.state();
    }

    /// Start the next turn: bump the turn counter and clear every
    /// turn-scoped flag.
    pub(crate) fn begin_turn(&mut self) {
        self.turn += 1;
        self.normal_summons_remaining = self.config.normal_summons_per_turn;
        self.card_once_per_turn = ImHashSet::new();
        self.effect_once_per_turn = ImHashSet::new();
        self.zones.update_on_field(|c| {
            if let Some(field) = c.field_mut() {
                field.reset_for_turn();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardData, CardRegistry, EffectCategory, SpellType};
    use crate::core::error::RegistryError;

    fn catalog() -> CardRegistry {
        let mut catalog = CardRegistry::new();
        catalog
            .register(CardData::spell(CardId::new(1), "Pot", SpellType::Normal))
            .unwrap();
        catalog
            .register(CardData::spell(CardId::new(2), "Jar", SpellType::QuickPlay))
            .unwrap();
        catalog
    }

    fn unshuffled(hand: usize) -> DuelConfig {
        DuelConfig::new()
            .with_opening_hand(hand)
            .without_shuffle()
            .build()
            .unwrap()
    }

    #[test]
    fn test_sequential_instance_ids() {
        let deck = [CardId::new(1), CardId::new(2), CardId::new(1)];
        let state = GameState::new(&unshuffled(0), &catalog(), &deck).unwrap();

        let ids: Vec<_> = state.zone(ZoneName::Deck).iter().map(|c| c.instance_id.raw()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(state.zones().top(ZoneName::Deck).unwrap().instance_id, InstanceId(3));
    }

    #[test]
    fn test_opening_hand_draws_from_top() {
        let deck = [CardId::new(1), CardId::new(1), CardId::new(2)];
        let state = GameState::new(&unshuffled(1), &catalog(), &deck).unwrap();

        assert_eq!(state.zone(ZoneName::Hand).len(), 1);
        assert_eq!(state.location(InstanceId(3)), Some(ZoneName::Hand));
        assert_eq!(state.life(Side::Player), 8000);
        assert_eq!(state.life(Side::Opponent), 8000);
    }

    #[test]
    fn test_unknown_card_is_fatal() {
        let err = GameState::new(&unshuffled(0), &catalog(), &[CardId::new(9)]).unwrap_err();

        match err {
            EngineError::Registry(RegistryError::Unknown { id, .. }) => assert_eq!(id, "Card(9)"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_deck_rejected() {
        let result = GameState::new(&unshuffled(5), &catalog(), &[CardId::new(1)]);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_seeded_shuffle_is_deterministic() {
        let config = DuelConfig::new().with_opening_hand(0).with_seed(7);
        let deck = vec![CardId::new(1); 20];

        let a = GameState::new(&config, &catalog(), &deck).unwrap();
        let b = GameState::new(&config, &catalog(), &deck).unwrap();

        assert_eq!(a, b);
        assert_ne!(a.rng_state(), &GameRng::new(7).state());
    }

    #[test]
    fn test_begin_turn_clears_flags() {
        let mut state = GameState::new(&unshuffled(0), &catalog(), &[CardId::new(1)]).unwrap();
        let effect = EffectId::new(CardId::new(1), EffectCategory::Ignition);
        state.mark_card_used(CardId::new(1));
        state.mark_effect_used(InstanceId(1), effect);
        state.consume_normal_summon();

        let before = state.clone();
        state.begin_turn();

        assert!(before.card_used_this_turn(CardId::new(1)));
        assert!(before.effect_used_this_turn(InstanceId(1), effect));
        assert!(!state.card_used_this_turn(CardId::new(1)));
        assert!(!state.effect_used_this_turn(InstanceId(1), effect));
        assert_eq!(state.normal_summons_remaining(), 1);
        assert_eq!(state.turn(), 2);
    }

    #[test]
    fn test_game_result() {
        let result = GameResult::Decided {
            winner: Side::Opponent,
            reason: VictoryReason::DeckOut,
        };
        assert!(result.is_terminal());
        assert_eq!(result.winner(), Some(Side::Opponent));
        assert!(!GameResult::Ongoing.is_terminal());
    }

    #[test]
    fn test_state_serialization() {
        let state = GameState::new(&unshuffled(1), &catalog(), &[CardId::new(1), CardId::new(2)]).unwrap();

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }
}
