//! Verb slot timers.
//!
//! Each slot collects dropped cards until its required card types are
//! covered, counts down its duration, emits one completion per token, then
//! cools down back to idle. Timers are driven by `tick(delta_ms)` from
//! whatever scheduler the host runs; they never touch the world directly.
//! Completions reach the world as `VerbAction`s on the shared queue.

use std::collections::BTreeMap;

use crate::model::{CardType, VerbAction, VerbCard, VerbKind, VerbResolution, capitalize};
use crate::queue::SharedActionQueue;

pub const DEFAULT_COOLDOWN_MS: u64 = 700;

// ---------------------------------------------------------------------------
// Slot table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbSlotSpec {
    pub kind: VerbKind,
    /// Card type and how many of it the slot needs.
    pub requires: &'static [(CardType, usize)],
    pub duration_ms: u64,
}

pub const SLOT_SPECS: [VerbSlotSpec; 6] = [
    VerbSlotSpec {
        kind: VerbKind::Work,
        requires: &[(CardType::Location, 1)],
        duration_ms: 3800,
    },
    VerbSlotSpec {
        kind: VerbKind::Scheme,
        requires: &[(CardType::Situation, 1), (CardType::Resource, 1)],
        duration_ms: 5200,
    },
    VerbSlotSpec {
        kind: VerbKind::Train,
        requires: &[(CardType::Person, 1)],
        duration_ms: 4200,
    },
    VerbSlotSpec {
        kind: VerbKind::Recruit,
        requires: &[(CardType::Person, 1), (CardType::Resource, 2)],
        duration_ms: 5600,
    },
    VerbSlotSpec {
        kind: VerbKind::Bribe,
        requires: &[(CardType::Person, 1), (CardType::Resource, 1)],
        duration_ms: 4700,
    },
    VerbSlotSpec {
        kind: VerbKind::Violence,
        requires: &[(CardType::Person, 1), (CardType::Resource, 1)],
        duration_ms: 6100,
    },
];

impl VerbSlotSpec {
    pub fn for_kind(kind: VerbKind) -> &'static VerbSlotSpec {
        match kind {
            VerbKind::Work => &SLOT_SPECS[0],
            VerbKind::Scheme => &SLOT_SPECS[1],
            VerbKind::Train => &SLOT_SPECS[2],
            VerbKind::Recruit => &SLOT_SPECS[3],
            VerbKind::Bribe => &SLOT_SPECS[4],
            VerbKind::Violence => &SLOT_SPECS[5],
        }
    }

    pub fn required(&self, card_type: CardType) -> usize {
        self.requires
            .iter()
            .find(|(t, _)| *t == card_type)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn accepts(&self, card_type: CardType) -> bool {
        self.required(card_type) > 0
    }

    pub fn is_satisfied(&self, cards: &[VerbCard]) -> bool {
        self.requires.iter().all(|(card_type, needed)| {
            cards.iter().filter(|c| c.card_type == *card_type).count() >= *needed
        })
    }

    /// "Needs: Situation + Resource" style label.
    pub fn requirement_label(&self) -> String {
        let parts: Vec<String> = self
            .requires
            .iter()
            .map(|(card_type, n)| {
                let name = capitalize(card_type.as_str());
                if *n > 1 { format!("{n}x {name}") } else { name }
            })
            .collect();
        format!("Needs: {}", parts.join(" + "))
    }
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    Idle,
    Running { remaining_ms: u64 },
    Cooldown { remaining_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The slot does not take this card type.
    Rejected,
    /// Card queued; requirements not yet covered.
    Queued,
    /// Requirements covered; the countdown (re)started from full duration.
    Started,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotCompletion {
    pub token: u64,
    pub slot_id: VerbKind,
    pub cards: Vec<VerbCard>,
}

impl SlotCompletion {
    pub fn action_id(&self) -> String {
        format!("verb-{}-{}", self.slot_id.as_str(), self.token)
    }

    pub fn into_action(self, completed_at_ms: u64) -> VerbAction {
        VerbAction {
            id: self.action_id(),
            slot_id: self.slot_id,
            cards: self.cards,
            completed_at_ms,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerbSlotTimer {
    spec: &'static VerbSlotSpec,
    cooldown_ms: u64,
    phase: SlotPhase,
    queued: Vec<VerbCard>,
    queued_token: Option<u64>,
    /// Highest token that produced a completion. Survives `reset`; tokens at
    /// or below it never emit again.
    last_emitted: Option<u64>,
}

impl VerbSlotTimer {
    pub fn new(kind: VerbKind, cooldown_ms: u64) -> Self {
        Self {
            spec: VerbSlotSpec::for_kind(kind),
            cooldown_ms,
            phase: SlotPhase::Idle,
            queued: Vec::new(),
            queued_token: None,
            last_emitted: None,
        }
    }

    pub fn kind(&self) -> VerbKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &'static VerbSlotSpec {
        self.spec
    }

    pub fn phase(&self) -> SlotPhase {
        self.phase
    }

    pub fn queued(&self) -> &[VerbCard] {
        &self.queued
    }

    pub fn queued_token(&self) -> Option<u64> {
        self.queued_token
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, SlotPhase::Running { .. })
    }

    /// Accept a card. A card of a type that is already full bumps the oldest
    /// card of that type; re-dropping the same card id swaps it in place.
    ///
    /// Drops are accepted in every phase. During cooldown they collect the
    /// next batch while the cooldown keeps running; the batch is held through
    /// the return to idle and starts as soon as it covers the requirements.
    pub fn drop_card(&mut self, token: u64, card: VerbCard) -> DropOutcome {
        let needed = self.spec.required(card.card_type);
        if needed == 0 {
            return DropOutcome::Rejected;
        }

        if let Some(existing) = self.queued.iter_mut().find(|c| c.card_id == card.card_id) {
            *existing = card;
        } else {
            let held = self
                .queued
                .iter()
                .filter(|c| c.card_type == card.card_type)
                .count();
            if held >= needed {
                if let Some(oldest) = self.queued.iter().position(|c| c.card_type == card.card_type) {
                    self.queued.remove(oldest);
                }
            }
            self.queued.push(card);
        }
        self.queued_token = Some(token);

        if self.spec.is_satisfied(&self.queued) {
            self.phase = SlotPhase::Running {
                remaining_ms: self.spec.duration_ms,
            };
            DropOutcome::Started
        } else {
            DropOutcome::Queued
        }
    }

    /// Advance by `delta_ms`. Returns the completion on the tick that enters
    /// cooldown, at most once per token. Entering cooldown consumes the batch.
    /// Tokens are expected to increase from batch to batch.
    pub fn tick(&mut self, delta_ms: u64) -> Option<SlotCompletion> {
        match self.phase {
            SlotPhase::Idle => None,
            SlotPhase::Running { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(delta_ms);
                if remaining_ms > 0 {
                    self.phase = SlotPhase::Running { remaining_ms };
                    return None;
                }
                self.phase = SlotPhase::Cooldown {
                    remaining_ms: self.cooldown_ms,
                };
                self.emit()
            }
            SlotPhase::Cooldown { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(delta_ms);
                self.phase = if remaining_ms > 0 {
                    SlotPhase::Cooldown { remaining_ms }
                } else {
                    SlotPhase::Idle
                };
                None
            }
        }
    }

    /// Drop everything and go idle without emitting.
    pub fn reset(&mut self) {
        self.clear_queue();
    }

    fn emit(&mut self) -> Option<SlotCompletion> {
        let token = self.queued_token.take()?;
        let cards = std::mem::take(&mut self.queued);
        if self.last_emitted.is_some_and(|last| token <= last) {
            return None;
        }
        self.last_emitted = Some(token);
        Some(SlotCompletion {
            token,
            slot_id: self.spec.kind,
            cards,
        })
    }

    fn clear_queue(&mut self) {
        self.queued.clear();
        self.queued_token = None;
        self.phase = SlotPhase::Idle;
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// One timer per verb kind, feeding completions onto the shared queue.
#[derive(Debug, Clone)]
pub struct VerbSlotBoard {
    slots: Vec<VerbSlotTimer>,
    queue: SharedActionQueue,
    next_token: u64,
    last_resolution: BTreeMap<VerbKind, VerbResolution>,
}

impl VerbSlotBoard {
    pub fn new(queue: SharedActionQueue, cooldown_ms: u64) -> Self {
        Self {
            slots: VerbKind::ALL
                .iter()
                .map(|kind| VerbSlotTimer::new(*kind, cooldown_ms))
                .collect(),
            queue,
            next_token: 1,
            last_resolution: BTreeMap::new(),
        }
    }

    pub fn slot(&self, kind: VerbKind) -> Option<&VerbSlotTimer> {
        self.slots.iter().find(|slot| slot.kind() == kind)
    }

    pub fn slots(&self) -> &[VerbSlotTimer] {
        &self.slots
    }

    /// Drop a card on `kind`'s slot under a fresh token.
    pub fn drop_card(&mut self, kind: VerbKind, card: VerbCard) -> DropOutcome {
        let token = self.next_token;
        let Some(slot) = self.slots.iter_mut().find(|slot| slot.kind() == kind) else {
            return DropOutcome::Rejected;
        };
        let outcome = slot.drop_card(token, card);
        if outcome != DropOutcome::Rejected {
            self.next_token += 1;
        }
        outcome
    }

    pub fn reset(&mut self, kind: VerbKind) {
        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.kind() == kind) {
            slot.reset();
        }
    }

    /// Advance every slot and enqueue whatever completed. Returns the
    /// actions that were enqueued.
    pub fn tick(&mut self, delta_ms: u64, now_ms: u64) -> Vec<VerbAction> {
        let mut completed = Vec::new();
        for slot in &mut self.slots {
            if let Some(completion) = slot.tick(delta_ms) {
                tracing::debug!(slot = %completion.slot_id, token = completion.token, "verb slot completed");
                let action = completion.into_action(now_ms);
                self.queue.enqueue(action.clone());
                completed.push(action);
            }
        }
        completed
    }

    /// Remember the latest resolution per slot for display.
    pub fn record_resolution(&mut self, resolution: &VerbResolution) {
        self.last_resolution
            .insert(resolution.slot_id, resolution.clone());
    }

    pub fn last_resolution(&self, kind: VerbKind) -> Option<&VerbResolution> {
        self.last_resolution.get(&kind)
    }
}
