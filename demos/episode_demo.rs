// Demonstration: drive one reward policy through random episodes.
//
// Build/run from this repo root:
//   RUST_LOG=adversary_reward=debug cargo run --example episode_demo -- --policy decoy --episodes 3 --steps 20

use std::env;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use adversary_reward::table::presets;
use adversary_reward::{
    generate_owner_id, RecurringChange, RewardConfig, RewardKind, RewardPolicy, RewardTable,
    Side, StepOutcome,
};

const ATTACKER_ACTIONS: [&str; 6] = [
    "pingsweep",
    "portscan",
    "discovery",
    "lateral-movement",
    "privilege-escalation",
    "impact",
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let kind: RewardKind = match arg_value(&args, "--policy").unwrap_or("decoy").parse() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("{e}; expected one of decoy, isolate, recurring, restore, step_detected.");
            std::process::exit(2);
        }
    };
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);
    let steps: u64 = arg_value(&args, "--steps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let defender = RewardTable::from_entries(
        Side::Defender,
        [
            ("deploy_decoy", -1.0, 2.0),
            ("remove_decoy", 0.0, 0.0),
            ("nothing", 0.0, 0.0),
        ],
    )
    .unwrap_or_else(|e| fail(e));

    let config = RewardConfig {
        kind,
        max_steps: steps,
        ..RewardConfig::default()
    };
    let mut policy = config
        .build(presets::impact_campaign(), defender)
        .unwrap_or_else(|e| fail(e));
    let mut rng = StdRng::seed_from_u64(seed);

    for episode in 0..episodes {
        policy.reset();
        let mut decoys: Vec<String> = Vec::new();
        let mut total = 0.0;

        for step in 1..=steps {
            let attacker_action = ATTACKER_ACTIONS[rng.gen_range(0..ATTACKER_ACTIONS.len())];
            let on_decoy = !decoys.is_empty() && rng.gen_bool(0.3);

            let (defender_action, owner, change) = match rng.gen_range(0..3) {
                0 => ("deploy_decoy", generate_owner_id(), RecurringChange::Add),
                1 if !decoys.is_empty() => {
                    let idx = rng.gen_range(0..decoys.len());
                    ("remove_decoy", decoys[idx].clone(), RecurringChange::Remove)
                }
                _ => ("nothing", String::new(), RecurringChange::NoChange),
            };
            let defender_success = rng.gen_bool(0.9);
            if defender_success {
                match change {
                    RecurringChange::Add => decoys.push(owner.clone()),
                    RecurringChange::Remove => decoys.retain(|d| d != &owner),
                    RecurringChange::NoChange => {}
                }
            }

            policy.register_defender_outcome(defender_action, &owner, defender_success, change);
            policy.register_attacker_outcome(attacker_action, on_decoy);

            let outcome = StepOutcome::new(attacker_action, defender_action)
                .with_success(rng.gen_bool(0.6), defender_success)
                .alerted(rng.gen_bool(0.2))
                .on_decoy(on_decoy)
                .at_step(step);
            total += policy.evaluate(&outcome).unwrap_or_else(|e| fail(e));
        }

        println!(
            "episode {episode}: policy={} total_reward={total:.2} active_decoys={}",
            policy.name(),
            policy.recurring().defender_len()
        );
    }
}

fn fail(e: adversary_reward::RewardError) -> ! {
    eprintln!("error: {e}");
    std::process::exit(1);
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
