//! Command-line demo: one wild encounter played out by a simple autopilot.

use chrono::{TimeDelta, Utc};
use clap::Parser;
use gophermon_battle::battle::catch::{calculate_capture_chance, capture_chance_description};
use gophermon_battle::snapshot::encode_battle;
use gophermon_battle::{
    check_and_evolve, generate_wild, recover_from_blackout, Battle, BattleConfig, BattleRng,
    Combatant, EventKind, EventManager, EventModifiers, PlayerAction,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hard stop for the autopilot so a stalemate cannot loop forever.
const MAX_TURNS: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "gophermon-battle")]
#[command(about = "Run a single wild Gophermon encounter")]
struct Args {
    /// Seed for every random roll in the encounter
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Level of the party and the wild gopher
    #[arg(long, default_value_t = 10)]
    level: u16,

    /// RON file overriding the default battle tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event to run during the encounter, e.g. DoubleXp or ShinyHunt
    #[arg(long, conflicts_with = "random_event")]
    event: Option<EventKind>,

    /// Run a randomly chosen event during the encounter
    #[arg(long)]
    random_event: bool,

    /// Number of gophers in the party
    #[arg(long, default_value_t = 2)]
    party_size: usize,
}

/// Throw a net once the enemy is worn down, otherwise hit as hard as possible.
fn choose_action(battle: &Battle) -> PlayerAction {
    if battle.enemy().hp_fraction() <= 0.25 {
        return PlayerAction::ThrowNet;
    }
    let ability_index = battle
        .active()
        .abilities()
        .iter()
        .enumerate()
        .max_by_key(|(_, ability)| ability.power())
        .map(|(index, _)| index)
        .unwrap_or(0);
    PlayerAction::Fight { ability_index }
}

fn describe(combatant: &Combatant) -> String {
    let (primary, secondary) = combatant.types();
    let types = match secondary {
        Some(secondary) => format!("{:?}/{:?}", primary, secondary),
        None => format!("{:?}", primary),
    };
    format!(
        "{} (Lv {} {:?} {:?}, {}) HP {}/{}",
        combatant.name,
        combatant.level(),
        combatant.rarity,
        combatant.archetype,
        types,
        combatant.current_hp(),
        combatant.max_hp()
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gophermon_battle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };

    let mut rng = BattleRng::from_seed(args.seed);

    let events = EventManager::new();
    let event = match args.event {
        Some(kind) => Some(events.start_event(kind, TimeDelta::hours(1))),
        None if args.random_event => Some(events.start_random_event(TimeDelta::hours(1), &mut rng)),
        None => None,
    };
    if let Some(event) = &event {
        println!("Event active: {} ({})", event.kind, event.kind.description());
    }
    let modifiers = Arc::new(events.modifiers_at(Utc::now()));
    let party: Vec<Combatant> = (0..args.party_size.max(1))
        .map(|_| generate_wild(args.level, modifiers.as_ref(), &mut rng))
        .collect();
    let enemy = generate_wild(args.level, modifiers.as_ref(), &mut rng);

    println!("Your party:");
    for member in &party {
        println!("  {}", describe(member));
    }
    println!("Opponent: {}", describe(&enemy));
    println!();

    let battle_id = format!("demo-{}", args.seed);
    let mut battle = Battle::new(
        battle_id,
        party,
        0,
        enemy,
        modifiers.clone(),
        BattleRng::from_seed(args.seed.wrapping_add(1)),
    )?
    .with_config(config);

    for message in battle.log() {
        println!("{}", message);
    }

    let mut turns = 0;
    while !battle.status().is_terminal() && turns < MAX_TURNS {
        let action = choose_action(&battle);
        if action == PlayerAction::ThrowNet {
            let chance = calculate_capture_chance(
                battle.enemy(),
                battle.config(),
                modifiers.capture_rate_multiplier(),
            );
            println!("(Capture looks {})", capture_chance_description(chance));
        }
        for message in battle.submit_action(action)? {
            println!("{}", message);
        }
        turns += 1;
    }

    let bytes = encode_battle(&battle)?;
    println!();
    println!("Battle ended: {:?} after {} turns", battle.status(), turns);
    println!("Snapshot size: {} bytes", bytes.len());

    let captured = battle.was_captured();
    let (mut party, enemy) = battle.into_combatants();
    if captured {
        println!("{} joins your party!", enemy.name);
        party.push(enemy);
    }

    for member in party.iter_mut() {
        if let Some(evolution) = check_and_evolve(member, modifiers.as_ref(), &mut rng) {
            println!(
                "{} evolved to stage {} and is now {:?}!",
                member.name, evolution.to_stage, evolution.to_rarity
            );
        }
    }

    if recover_from_blackout(&mut party) {
        println!("Your party blacked out and was nursed back to health.");
    }

    for member in &party {
        println!("  {} | XP {}", describe(member), member.xp());
    }
    Ok(())
}
