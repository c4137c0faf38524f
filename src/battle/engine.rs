use crate::battle::ability_effects::apply_ability;
use crate::battle::ai::{Behavior, RandomBehavior};
use crate::battle::calculators::calculate_xp_reward;
use crate::battle::catch::{calculate_capture_chance, roll_capture_success};
use crate::battle::state::{
    ActionFailureReason, ActionRejection, Battle, BattleEvent, BattleRng, BattleStatus, EventBus,
    PlayerAction, TurnOwner,
};
use crate::combatant::Combatant;
use crate::errors::BattleResult;
use schema::StatusKind;
use tracing::{debug, info};

/// Which combatant a sub-turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Player,
    Enemy,
}

/// Outcome of the turn-start checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnStart {
    Ready,
    /// Asleep or fully paralyzed. The chosen action is discarded.
    Skipped,
    /// Confusion redirected the attack onto the actor.
    HurtItself,
    /// Status damage downed the actor before it could move.
    Fainted,
}

/// What happens when the player's active combatant goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FaintResponse {
    AutoSwap,
    Defeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Victory {
    Defeated,
    Captured,
}

impl Battle {
    /// Resolve one player action and return the narrated messages.
    ///
    /// Invalid input produces a single explanatory message and leaves the
    /// battle untouched. Errors are reserved for corrupted state.
    pub fn submit_action(&mut self, action: PlayerAction) -> BattleResult<Vec<String>> {
        Ok(self.resolve_action(action)?.messages())
    }

    /// Like `submit_action` but returns the structured events.
    pub fn resolve_action(&mut self, action: PlayerAction) -> BattleResult<EventBus> {
        self.check_consistency()?;

        let mut bus = EventBus::new();
        if let Err(reason) = self.validate_action(action) {
            debug!(battle_id = %self.battle_id, ?action, %reason, "action rejected");
            bus.push(BattleEvent::ActionRejected { reason });
            return Ok(bus);
        }

        debug!(battle_id = %self.battle_id, ?action, "action accepted");
        self.run_player_turn(action, &mut bus);

        if self.status.is_terminal() {
            bus.push(BattleEvent::BattleEnded {
                outcome: self.status,
            });
            info!(
                battle_id = %self.battle_id,
                outcome = ?self.status,
                captured = self.captured,
                "battle ended"
            );
        }

        self.log.extend(bus.messages());
        Ok(bus)
    }

    /// Check an action against the current state without changing anything.
    pub fn validate_action(&self, action: PlayerAction) -> Result<(), ActionRejection> {
        if self.status.is_terminal() {
            return Err(ActionRejection::BattleOver);
        }
        if self.turn_owner != TurnOwner::Player {
            return Err(ActionRejection::NotYourTurn);
        }

        match action {
            PlayerAction::Fight { ability_index } => {
                if self.active().ability(ability_index).is_none() {
                    return Err(ActionRejection::InvalidAbility(ability_index));
                }
            }
            PlayerAction::Swap { party_index } => {
                let member = self
                    .party
                    .get(party_index)
                    .ok_or(ActionRejection::InvalidPartyMember(party_index))?;
                if member.is_fainted() {
                    return Err(ActionRejection::TargetFainted {
                        name: member.name.clone(),
                    });
                }
                if party_index == self.active_index {
                    return Err(ActionRejection::AlreadyActive {
                        name: member.name.clone(),
                    });
                }
            }
            PlayerAction::Run | PlayerAction::ThrowNet => {}
        }
        Ok(())
    }

    // --- PLAYER SUB-TURN ---

    fn run_player_turn(&mut self, action: PlayerAction, bus: &mut EventBus) {
        let fighting = matches!(action, PlayerAction::Fight { .. });

        match self.begin_turn(Side::Player, fighting, bus) {
            TurnStart::Ready => {}
            TurnStart::Skipped | TurnStart::Fainted => {
                self.conclude_player_action(FaintResponse::AutoSwap, bus);
                return;
            }
            TurnStart::HurtItself => {
                self.conclude_player_action(FaintResponse::Defeat, bus);
                return;
            }
        }

        if fighting {
            self.active_mut().remove_status_effect(StatusKind::Protect);
        }

        match action {
            PlayerAction::Fight { ability_index } => {
                self.use_ability(Side::Player, ability_index, bus);
                self.conclude_player_action(FaintResponse::AutoSwap, bus);
            }
            PlayerAction::Swap { party_index } => self.swap_in(party_index, bus),
            PlayerAction::Run => self.attempt_escape(bus),
            PlayerAction::ThrowNet => self.attempt_capture(bus),
        }
    }

    fn swap_in(&mut self, party_index: usize, bus: &mut EventBus) {
        bus.push(BattleEvent::Recalled {
            name: self.active().name.clone(),
        });
        self.active_index = party_index;
        self.participants.record(party_index);
        bus.push(BattleEvent::SentOut {
            name: self.active().name.clone(),
        });
        debug!(battle_id = %self.battle_id, party_index, "player swapped");

        // The swap costs the turn
        self.conclude_player_action(FaintResponse::Defeat, bus);
    }

    fn attempt_escape(&mut self, bus: &mut EventBus) {
        if self.rng.chance(self.config.escape_chance, "escape") {
            self.status = BattleStatus::Escaped;
            bus.push(BattleEvent::EscapeSucceeded);
            return;
        }
        bus.push(BattleEvent::EscapeFailed);
        self.conclude_player_action(FaintResponse::AutoSwap, bus);
    }

    fn attempt_capture(&mut self, bus: &mut EventBus) {
        let chance = calculate_capture_chance(
            &self.enemy,
            &self.config,
            self.modifiers.capture_rate_multiplier(),
        );
        bus.push(BattleEvent::CaptureAttempted {
            target: self.enemy.name.clone(),
            chance,
        });

        if roll_capture_success(chance, &mut self.rng) {
            self.declare_victory(Victory::Captured, bus);
            return;
        }
        bus.push(BattleEvent::CaptureFailed {
            target: self.enemy.name.clone(),
        });
        self.conclude_player_action(FaintResponse::AutoSwap, bus);
    }

    /// Settle the player's half of the turn: a downed enemy ends the battle,
    /// a downed player is handled per `response`, and otherwise the enemy acts.
    fn conclude_player_action(&mut self, response: FaintResponse, bus: &mut EventBus) {
        if self.enemy.is_fainted() {
            self.declare_victory(Victory::Defeated, bus);
            return;
        }
        if self.active().is_fainted() {
            self.handle_player_faint(response, bus);
            if self.status.is_terminal() {
                return;
            }
        }
        self.finish_with_enemy_turn(response, bus);
    }

    // --- ENEMY SUB-TURN ---

    fn finish_with_enemy_turn(&mut self, response: FaintResponse, bus: &mut EventBus) {
        self.run_enemy_turn(bus);

        if self.enemy.is_fainted() {
            self.declare_victory(Victory::Defeated, bus);
        } else if self.active().is_fainted() {
            self.handle_player_faint(response, bus);
        }
    }

    /// The enemy gets the same turn-start checks as the player, then picks
    /// uniformly among its abilities. The turn always returns to the player.
    fn run_enemy_turn(&mut self, bus: &mut EventBus) {
        self.turn_owner = TurnOwner::Enemy;
        bus.push(BattleEvent::TurnPassed {
            to: TurnOwner::Enemy,
        });
        debug!(battle_id = %self.battle_id, enemy = %self.enemy.name, "enemy sub-turn");

        if self.begin_turn(Side::Enemy, true, bus) == TurnStart::Ready {
            self.enemy.remove_status_effect(StatusKind::Protect);
            match RandomBehavior.choose_ability(&self.enemy, &mut self.rng) {
                Some(index) => self.use_ability(Side::Enemy, index, bus),
                None => bus.push(BattleEvent::NoAbilities {
                    name: self.enemy.name.clone(),
                }),
            }
        }

        self.turn_owner = TurnOwner::Player;
        bus.push(BattleEvent::TurnPassed {
            to: TurnOwner::Player,
        });
    }

    // --- SHARED STEPS ---

    /// Tick statuses, then roll sleep, paralysis and (when attacking) confusion.
    fn begin_turn(&mut self, side: Side, attempting_fight: bool, bus: &mut EventBus) -> TurnStart {
        let wake_chance = self.config.wake_chance;
        let paralysis_chance = self.config.full_paralysis_chance;
        let confusion_chance = self.config.confusion_chance;
        let (actor, _, rng) = self.split_for(side);

        bus.extend(actor.process_status_effects_at_turn_start());
        if actor.is_fainted() {
            return TurnStart::Fainted;
        }

        if actor.has_status_effect(StatusKind::Sleep) {
            if rng.chance(wake_chance, "wake up") {
                actor.remove_status_effect(StatusKind::Sleep);
                bus.push(BattleEvent::WokeUp {
                    name: actor.name.clone(),
                });
            } else {
                bus.push(BattleEvent::ActionFailed {
                    name: actor.name.clone(),
                    reason: ActionFailureReason::IsAsleep,
                });
                return TurnStart::Skipped;
            }
        }

        if actor.has_status_effect(StatusKind::Paralysis)
            && rng.chance(paralysis_chance, "full paralysis")
        {
            bus.push(BattleEvent::ActionFailed {
                name: actor.name.clone(),
                reason: ActionFailureReason::IsParalyzed,
            });
            return TurnStart::Skipped;
        }

        if attempting_fight
            && actor.has_status_effect(StatusKind::Confusion)
            && rng.chance(confusion_chance, "confusion")
        {
            let self_hit = actor.max_hp() / 8;
            let damage = actor.take_damage(self_hit);
            bus.push(BattleEvent::ConfusionSelfHit {
                name: actor.name.clone(),
                damage,
            });
            return TurnStart::HurtItself;
        }

        TurnStart::Ready
    }

    /// Protect on the receiving side absorbs the whole ability, whatever it
    /// targets, and is used up.
    fn use_ability(&mut self, side: Side, index: usize, bus: &mut EventBus) {
        let (user, target, rng) = self.split_for(side);
        let Some(template) = user.ability(index).map(|ability| ability.template()) else {
            return;
        };

        if target.has_status_effect(StatusKind::Protect) {
            target.remove_status_effect(StatusKind::Protect);
            bus.push(BattleEvent::AbilityUsed {
                user: user.name.clone(),
                ability: template.id,
            });
            bus.push(BattleEvent::AttackBlocked {
                target: target.name.clone(),
            });
            return;
        }

        apply_ability(template, user, target, rng, bus);
    }

    fn declare_victory(&mut self, victory: Victory, bus: &mut EventBus) {
        self.status = BattleStatus::Won;
        self.captured = victory == Victory::Captured;

        let target = self.enemy.name.clone();
        bus.push(match victory {
            Victory::Defeated => BattleEvent::Fainted { name: target },
            Victory::Captured => BattleEvent::Captured { target },
        });
        self.distribute_xp(bus);
    }

    /// Every participant gets the full award, fainted or not.
    fn distribute_xp(&mut self, bus: &mut EventBus) {
        let amount = calculate_xp_reward(&self.enemy, &self.config, self.modifiers.xp_multiplier());
        let participants = self.participants.participants().to_vec();

        for index in &participants {
            let Some(member) = self.party.get_mut(*index) else {
                continue;
            };
            bus.push(BattleEvent::ExperienceGained {
                name: member.name.clone(),
                amount,
            });
            if let Some(level_up) = member.add_xp(amount, &mut self.rng) {
                bus.push(BattleEvent::LeveledUp {
                    name: member.name.clone(),
                    new_level: level_up.to,
                });
            }
        }
        debug!(
            battle_id = %self.battle_id,
            amount,
            participants = participants.len(),
            "xp distributed"
        );
    }

    fn handle_player_faint(&mut self, response: FaintResponse, bus: &mut EventBus) {
        bus.push(BattleEvent::Fainted {
            name: self.active().name.clone(),
        });

        if response == FaintResponse::AutoSwap {
            if let Some(next) = self.next_healthy_reserve() {
                self.active_index = next;
                self.participants.record(next);
                self.turn_owner = TurnOwner::Player;
                bus.push(BattleEvent::SentOut {
                    name: self.active().name.clone(),
                });
                debug!(battle_id = %self.battle_id, party_index = next, "auto-swap");
                return;
            }
        }
        self.status = BattleStatus::Lost;
    }

    /// First party member, in party order, who can still fight.
    fn next_healthy_reserve(&self) -> Option<usize> {
        self.party
            .iter()
            .enumerate()
            .find(|(index, member)| *index != self.active_index && !member.is_fainted())
            .map(|(index, _)| index)
    }

    /// The acting combatant, its opponent and the RNG as disjoint borrows.
    fn split_for(&mut self, side: Side) -> (&mut Combatant, &mut Combatant, &mut BattleRng) {
        let active = &mut self.party[self.active_index];
        match side {
            Side::Player => (active, &mut self.enemy, &mut self.rng),
            Side::Enemy => (&mut self.enemy, active, &mut self.rng),
        }
    }
}
