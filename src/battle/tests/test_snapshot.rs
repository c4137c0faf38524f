#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleRng, BattleStatus, PlayerAction, TurnOwner};
    use crate::battle::tests::common::{
        assert_ok, create_test_battle, predictable_rng, TestCombatantBuilder,
    };
    use crate::errors::{BattleStateError, SnapshotError};
    use crate::event_modifiers::{EventModifiers, FixedModifiers};
    use crate::snapshot::{battle_from_json, battle_to_json, decode_battle, encode_battle};
    use pretty_assertions::assert_eq;
    use schema::StatusKind;
    use std::sync::Arc;

    fn neutral() -> Arc<dyn EventModifiers> {
        Arc::new(FixedModifiers::default())
    }

    fn mid_battle() -> crate::battle::state::Battle {
        let party = vec![
            TestCombatantBuilder::new("Sparky")
                .with_status_intensity(StatusKind::Poison, 4, 3)
                .build(),
            TestCombatantBuilder::new("Byte").build(),
        ];
        let enemy = TestCombatantBuilder::new("Bitsy")
            .with_status(StatusKind::DefenseDown, 5)
            .build();
        let mut battle = create_test_battle(party, enemy, predictable_rng());
        assert_ok(battle.submit_action(PlayerAction::Swap { party_index: 1 }));
        battle
    }

    fn unwrap_snapshot<T>(result: Result<T, SnapshotError>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => panic!("snapshot failed: {}", err),
        }
    }

    #[test]
    fn test_binary_snapshot_round_trips_every_field() {
        let battle = mid_battle();

        let bytes = unwrap_snapshot(encode_battle(&battle));
        let restored = unwrap_snapshot(decode_battle(&bytes, neutral(), predictable_rng()));

        assert_eq!(restored.party(), battle.party());
        assert_eq!(restored.enemy(), battle.enemy());
        assert_eq!(restored.participants(), &[0, 1]);
        assert_eq!(restored.log(), battle.log());
        assert_eq!(restored.status(), BattleStatus::Active);
        assert_eq!(restored.turn_owner(), TurnOwner::Player);
        assert_eq!(restored.config(), battle.config());

        // One tick happened before the swap
        let poison = restored.party()[0].status_effect(StatusKind::Poison).copied();
        assert_eq!(poison.map(|e| (e.turns_remaining, e.intensity)), Some((3, 3)));
        assert_eq!(restored.party()[0].current_hp(), 91);
    }

    #[test]
    fn test_restored_battle_resumes_like_the_original() {
        let mut original = mid_battle();
        let bytes = unwrap_snapshot(encode_battle(&original));
        let mut restored = unwrap_snapshot(decode_battle(&bytes, neutral(), BattleRng::new_for_test(vec![50; 10])));
        original.reattach(neutral(), BattleRng::new_for_test(vec![50; 10]));

        let expected = assert_ok(original.submit_action(PlayerAction::Fight { ability_index: 0 }));
        let actual = assert_ok(restored.submit_action(PlayerAction::Fight { ability_index: 0 }));

        assert_eq!(actual, expected);
        assert_eq!(restored.enemy(), original.enemy());
    }

    #[test]
    fn test_json_snapshot_round_trips() {
        let battle = mid_battle();

        let json = unwrap_snapshot(battle_to_json(&battle));
        let restored = unwrap_snapshot(battle_from_json(&json, neutral(), predictable_rng()));

        assert!(json.contains("\"battle_id\": \"test_battle\""));
        assert_eq!(restored.party(), battle.party());
        assert_eq!(restored.enemy(), battle.enemy());
        assert_eq!(unwrap_snapshot(battle_to_json(&restored)), json);
    }

    #[test]
    fn test_inconsistent_snapshot_is_refused() {
        let mut battle = mid_battle();
        battle.active_index = 5;
        let bytes = unwrap_snapshot(encode_battle(&battle));

        let result = decode_battle(&bytes, neutral(), predictable_rng());

        assert!(matches!(
            result,
            Err(SnapshotError::Inconsistent(BattleStateError::InvalidActiveIndex(5)))
        ));
    }

    fn edited_json(edit: impl FnOnce(&mut serde_json::Value)) -> String {
        let json = unwrap_snapshot(battle_to_json(&mid_battle()));
        let mut value: serde_json::Value = match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(err) => panic!("snapshot json unreadable: {}", err),
        };
        edit(&mut value);
        value.to_string()
    }

    #[test]
    fn test_snapshot_with_hp_above_max_is_refused() {
        let json = edited_json(|value| value["enemy"]["current_hp"] = 200.into());

        let result = battle_from_json(&json, neutral(), predictable_rng());

        match result {
            Err(SnapshotError::Inconsistent(BattleStateError::InconsistentState(reason))) => {
                assert_eq!(reason, "Bitsy has 200 HP above its maximum of 100");
            }
            other => panic!("expected an inconsistent snapshot, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_snapshot_with_repeated_status_is_refused() {
        let json = edited_json(|value| {
            let effects = &mut value["party"][0]["status_effects"];
            let poison = effects[0].clone();
            if let Some(list) = effects.as_array_mut() {
                list.push(poison);
            }
        });

        let result = battle_from_json(&json, neutral(), predictable_rng());

        assert!(matches!(
            result,
            Err(SnapshotError::Inconsistent(BattleStateError::InconsistentState(_)))
        ));
    }

    #[test]
    fn test_garbage_bytes_are_a_binary_error() {
        let result = decode_battle(&[0xff, 0x00, 0x13], neutral(), predictable_rng());
        assert!(matches!(result, Err(SnapshotError::Binary(_))));
    }
}
