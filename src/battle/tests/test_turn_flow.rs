#[cfg(test)]
mod tests {
    use crate::battle::state::{
        BattleEvent, BattleRng, BattleStatus, PlayerAction, TurnOwner,
    };
    use crate::battle::tests::common::{
        assert_ok, create_test_battle, has_event, predictable_rng, TestCombatantBuilder,
    };
    use pretty_assertions::assert_eq;
    use schema::{AbilityId, StatusKind};

    fn sparky() -> TestCombatantBuilder {
        TestCombatantBuilder::new("Sparky")
    }

    fn bitsy() -> TestCombatantBuilder {
        TestCombatantBuilder::new("Bitsy")
    }

    #[test]
    fn test_fight_alternates_turns() {
        // Arrange
        let mut battle = create_test_battle(vec![sparky().build()], bitsy().build(), predictable_rng());

        // Act
        let bus = assert_ok(battle.resolve_action(PlayerAction::Fight { ability_index: 0 }));

        // Assert
        let passes: Vec<TurnOwner> = bus
            .events()
            .iter()
            .filter_map(|event| match event {
                BattleEvent::TurnPassed { to } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(passes, vec![TurnOwner::Enemy, TurnOwner::Player]);
        assert_eq!(battle.turn_owner(), TurnOwner::Player);
        assert_eq!(battle.status(), BattleStatus::Active);
        assert_eq!(battle.enemy().current_hp(), 90);
        assert_eq!(battle.active().current_hp(), 90);
        assert_eq!(
            bus.messages(),
            vec![
                "Sparky used Quick Hit!",
                "Bitsy took 10 damage!",
                "Bitsy used Quick Hit!",
                "Sparky took 10 damage!",
            ]
        );
    }

    #[test]
    fn test_messages_are_appended_to_the_log() {
        let mut battle = create_test_battle(vec![sparky().build()], bitsy().build(), predictable_rng());

        let messages = assert_ok(battle.submit_action(PlayerAction::Fight { ability_index: 0 }));

        assert_eq!(battle.log()[0], "A wild Bitsy appeared!");
        assert_eq!(&battle.log()[1..], messages.as_slice());
    }

    #[test]
    fn test_lethal_ability_ends_battle_without_enemy_turn() {
        let mut battle = create_test_battle(
            vec![sparky().build()],
            bitsy().with_hp(5).build(),
            predictable_rng(),
        );

        let bus = assert_ok(battle.resolve_action(PlayerAction::Fight { ability_index: 0 }));

        assert_eq!(battle.status(), BattleStatus::Won);
        assert!(!battle.was_captured());
        assert_eq!(battle.enemy().current_hp(), 0);
        assert_eq!(battle.active().xp(), 50);
        assert!(!has_event(&bus, |e| matches!(e, BattleEvent::TurnPassed { .. })));
        assert!(has_event(&bus, |e| matches!(
            e,
            BattleEvent::BattleEnded {
                outcome: BattleStatus::Won
            }
        )));
        assert_eq!(
            bus.messages(),
            vec![
                "Sparky used Quick Hit!",
                "Bitsy took 5 damage!",
                "Bitsy was defeated!",
                "Sparky gained 50 XP!",
            ]
        );
    }

    #[test]
    fn test_run_succeeds_on_low_roll() {
        let mut battle = create_test_battle(vec![sparky().build()], bitsy().build(), predictable_rng());

        let messages = assert_ok(battle.submit_action(PlayerAction::Run));

        assert_eq!(battle.status(), BattleStatus::Escaped);
        assert_eq!(messages, vec!["Got away safely!"]);
        assert_eq!(battle.active().current_hp(), 100);
    }

    #[test]
    fn test_failed_run_gives_enemy_a_turn() {
        let rng = BattleRng::new_for_test(vec![80, 50]);
        let mut battle = create_test_battle(vec![sparky().build()], bitsy().build(), rng);

        let messages = assert_ok(battle.submit_action(PlayerAction::Run));

        assert_eq!(battle.status(), BattleStatus::Active);
        assert_eq!(
            messages,
            vec![
                "Couldn't escape!",
                "Bitsy used Quick Hit!",
                "Sparky took 10 damage!",
            ]
        );
    }

    #[test]
    fn test_swap_costs_the_turn() {
        let party = vec![sparky().build(), TestCombatantBuilder::new("Byte").build()];
        let mut battle = create_test_battle(party, bitsy().build(), predictable_rng());

        let messages = assert_ok(battle.submit_action(PlayerAction::Swap { party_index: 1 }));

        assert_eq!(battle.active_index(), 1);
        assert_eq!(battle.participants(), &[0, 1]);
        assert_eq!(battle.party()[0].current_hp(), 100);
        assert_eq!(battle.party()[1].current_hp(), 90);
        assert_eq!(
            messages,
            vec![
                "Sparky, come back!",
                "Go, Byte!",
                "Bitsy used Quick Hit!",
                "Byte took 10 damage!",
            ]
        );
    }

    #[test]
    fn test_enemy_without_abilities_passes() {
        let mut battle = create_test_battle(
            vec![sparky().build()],
            bitsy().with_abilities(vec![]).build(),
            predictable_rng(),
        );

        let messages = assert_ok(battle.submit_action(PlayerAction::Fight { ability_index: 0 }));

        assert_eq!(messages.last().map(String::as_str), Some("Bitsy has no abilities!"));
        assert_eq!(battle.turn_owner(), TurnOwner::Player);
    }

    #[test]
    fn test_enemy_picks_among_its_abilities() {
        // 51 % 2 == 1 selects the second ability
        let rng = BattleRng::new_for_test(vec![50, 51]);
        let enemy = bitsy()
            .with_abilities(vec![AbilityId::QuickHit, AbilityId::Harden])
            .build();
        let mut battle = create_test_battle(vec![sparky().build()], enemy, rng);

        let messages = assert_ok(battle.submit_action(PlayerAction::Fight { ability_index: 0 }));

        assert!(messages.contains(&"Bitsy used Harden!".to_string()));
        assert!(battle.enemy().has_status_effect(StatusKind::DefenseUp));
        assert_eq!(battle.active().current_hp(), 100);
    }

    #[test]
    fn test_protect_blocks_the_enemy_attack() {
        // Nothing here draws from the RNG
        let rng = BattleRng::new_for_test(vec![]);
        let player = sparky()
            .with_abilities(vec![AbilityId::DeferRecover])
            .with_hp(50)
            .build();
        let mut battle = create_test_battle(vec![player], bitsy().build(), rng);

        let bus = assert_ok(battle.resolve_action(PlayerAction::Fight { ability_index: 0 }));

        assert_eq!(battle.active().current_hp(), 100);
        assert!(!battle.active().has_status_effect(StatusKind::Protect));
        assert_eq!(
            bus.messages(),
            vec![
                "Sparky used Defer Recover!",
                "Sparky recovered 50 HP!",
                "Sparky is protecting itself!",
                "Bitsy used Quick Hit!",
                "Sparky was protected from the attack!",
            ]
        );
    }

    #[test]
    fn test_protect_blocks_self_targeted_abilities_too() {
        let rng = BattleRng::new_for_test(vec![]);
        let player = sparky().with_abilities(vec![AbilityId::DeferRecover]).build();
        let enemy = bitsy().with_abilities(vec![AbilityId::Harden]).build();
        let mut battle = create_test_battle(vec![player], enemy, rng);

        let bus = assert_ok(battle.resolve_action(PlayerAction::Fight { ability_index: 0 }));

        assert!(has_event(&bus, |e| *e
            == BattleEvent::AttackBlocked {
                target: "Sparky".to_string(),
            }));
        assert_eq!(
            &bus.messages()[3..],
            &[
                "Bitsy used Harden!".to_string(),
                "Sparky was protected from the attack!".to_string(),
            ]
        );
        // Used up by the block
        assert!(!battle.active().has_status_effect(StatusKind::Protect));
        assert!(!battle.enemy().has_status_effect(StatusKind::DefenseUp));
        assert_eq!(battle.enemy().defense(), 20);
    }

    #[test]
    fn test_enemy_protect_blocks_a_player_buff() {
        let rng = BattleRng::new_for_test(vec![]);
        let player = sparky().with_abilities(vec![AbilityId::Harden]).build();
        let enemy = bitsy()
            .with_abilities(vec![AbilityId::Idle])
            .with_status(StatusKind::Protect, 1)
            .build();
        let mut battle = create_test_battle(vec![player], enemy, rng);

        let bus = assert_ok(battle.resolve_action(PlayerAction::Fight { ability_index: 0 }));

        assert_eq!(
            &bus.messages()[..2],
            &[
                "Sparky used Harden!".to_string(),
                "Bitsy was protected from the attack!".to_string(),
            ]
        );
        assert!(!battle.active().has_status_effect(StatusKind::DefenseUp));
        assert!(!battle.enemy().has_status_effect(StatusKind::Protect));
    }

    #[test]
    fn test_seeded_battles_replay_identically() {
        let play = |seed: u64| {
            let mut battle = create_test_battle(
                vec![sparky().build()],
                bitsy()
                    .with_abilities(vec![AbilityId::QuickHit, AbilityId::GoPanic])
                    .build(),
                BattleRng::from_seed(seed),
            );
            for _ in 0..4 {
                if battle.status().is_terminal() {
                    break;
                }
                assert_ok(battle.submit_action(PlayerAction::Fight { ability_index: 0 }));
            }
            battle.log().to_vec()
        };

        assert_eq!(play(9), play(9));
    }
}
