//! Battle Report
//!
//! Simulates a run of seeded battles for one character and reports the
//! experience earned, level-ups, unlocked interactions and activations.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use skill_synergy::core::{set_config, CharacterIdentity, EngineConfig, EngineError, Result};
use skill_synergy::interactions::{
    resolve_eligible, InteractionCatalog, SkillSynergy, TriggerContext,
};
use skill_synergy::progression::{
    milestones_crossed, title_for, LevelUp, SkillDomain, SkillDomainLedger,
};
use skill_synergy::scoring::{demo, CombatScorer, PerformanceRating};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Battle Report - seeded battles through scoring, progression and synergies
#[derive(Parser, Debug)]
#[command(name = "battle_report")]
#[command(about = "Simulate battles for one character and report skill progression")]
struct Args {
    /// Character id (matches character-specific interactions)
    #[arg(long, default_value = "achilles")]
    character: String,

    /// Archetype (matches archetype-specific interactions)
    #[arg(long)]
    archetype: Option<String>,

    /// Starting level for every core domain
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Signature skill as name=level (repeatable)
    #[arg(long = "signature")]
    signatures: Vec<String>,

    /// Archetype skill as name=level (repeatable)
    #[arg(long = "archetype-skill")]
    archetype_skills: Vec<String>,

    /// Number of battles to simulate
    #[arg(long, default_value_t = 10)]
    battles: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config TOML (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interaction catalog TOML (built-in catalog when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Serialize)]
struct BattleEntry {
    battle: u32,
    victory: bool,
    duration_seconds: u32,
    opponent_level: u32,
    experience: BTreeMap<SkillDomain, u64>,
    multiplier: f64,
    rating: PerformanceRating,
    level_ups: Vec<LevelUp>,
    milestones: Vec<String>,
    unlocked: Vec<String>,
    activated: Vec<String>,
    expired: Vec<String>,
}

#[derive(Serialize)]
struct Report {
    character: String,
    archetype: Option<String>,
    seed: u64,
    battles: Vec<BattleEntry>,
    final_levels: BTreeMap<SkillDomain, u32>,
    eligible: Vec<String>,
    mastered: Vec<String>,
    combo_count: u32,
}

fn parse_skill(arg: &str) -> Result<(String, u32)> {
    let invalid = || EngineError::InvalidConfig(format!("expected name=level, got '{}'", arg));
    let (name, level) = arg.split_once('=').ok_or_else(invalid)?;
    let level = level.trim().parse().map_err(|_| invalid())?;
    Ok((name.trim().to_string(), level))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("skill_synergy=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        let config = EngineConfig::load(path)?;
        if set_config(config).is_err() {
            tracing::warn!("Engine config already initialized, ignoring {}", path.display());
        }
    }

    let catalog = match &args.catalog {
        Some(path) => InteractionCatalog::load(path)?,
        None => InteractionCatalog::builtin()?,
    };

    let mut identity = CharacterIdentity::new(args.character.as_str());
    if let Some(archetype) = &args.archetype {
        identity = identity.with_archetype(archetype.as_str());
    }

    let mut ledger = SkillDomainLedger::default();
    for domain in SkillDomain::ALL {
        ledger.set_level(domain, args.level);
    }
    for arg in &args.signatures {
        let (name, level) = parse_skill(arg)?;
        ledger.set_signature_skill(name, level);
    }
    for arg in &args.archetype_skills {
        let (name, level) = parse_skill(arg)?;
        ledger.set_archetype_skill(name, level);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let scorer = CombatScorer::default();
    let mut synergy = SkillSynergy::new(identity.id.clone());

    tracing::info!("Simulating {} battles for {} (seed {})", args.battles, identity.id, seed);

    let mut battles = Vec::with_capacity(args.battles as usize);
    for battle in 1..=args.battles {
        let player_level = ledger.level(SkillDomain::Combat);
        let performance = demo::sample_performance(&mut rng, player_level);
        let reward = scorer.score_with_catalog(&performance, &ledger, &identity, &catalog);
        let level_ups = ledger.apply_reward(&reward);

        // Fire whatever is ready and unconditional, then let the battle play out
        let eligible = resolve_eligible(&catalog, &identity, &ledger);
        let context = TriggerContext::new();
        let mut activated = Vec::new();
        for definition in synergy.activatable(&eligible) {
            if !definition.triggers.matches(&context) {
                continue;
            }
            match synergy.activate(&definition.id, &catalog) {
                Ok(receipt) => activated.push(receipt.interaction_id),
                Err(e) => tracing::debug!("{}", e),
            }
        }
        let expired = synergy.tick(u64::from(performance.duration_seconds));

        let milestones = level_ups
            .iter()
            .flat_map(|l| milestones_crossed(l.previous_level, l.new_level))
            .map(|m| format!("L{} {}", m.level, m.title))
            .collect();

        battles.push(BattleEntry {
            battle,
            victory: performance.is_victory(),
            duration_seconds: performance.duration_seconds,
            opponent_level: performance.opponent_level,
            experience: reward.gains.iter().map(|g| (g.domain, g.experience)).collect(),
            multiplier: reward.multipliers.combined,
            rating: reward.performance_rating,
            level_ups,
            milestones,
            unlocked: reward.unlocked_interaction_ids,
            activated,
            expired,
        });
    }

    let report = Report {
        character: identity.id.to_string(),
        archetype: identity.archetype.as_ref().map(|a| a.to_string()),
        seed,
        battles,
        final_levels: ledger.domains().map(|(domain, level)| (domain, level.level)).collect(),
        eligible: resolve_eligible(&catalog, &identity, &ledger)
            .into_iter()
            .map(|def| def.id.clone())
            .collect(),
        mastered: synergy.mastered_interaction_ids().to_vec(),
        combo_count: synergy.combo_count(),
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text(&report),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn print_text(report: &Report) {
    println!("Battle Report");
    println!("=============");
    println!(
        "Character: {}{}",
        report.character,
        report
            .archetype
            .as_deref()
            .map(|a| format!(" ({})", a))
            .unwrap_or_default()
    );
    println!("Seed: {}", report.seed);
    println!();

    for entry in &report.battles {
        let total: u64 = entry.experience.values().sum();
        println!(
            "#{:<3} {:<7} {:>4}s vs L{:<3} x{:.2}  +{} exp  [{}]",
            entry.battle,
            if entry.victory { "Victory" } else { "Defeat" },
            entry.duration_seconds,
            entry.opponent_level,
            entry.multiplier,
            total,
            entry.rating.name()
        );
        for level_up in &entry.level_ups {
            println!(
                "     {} {} -> {} ({})",
                level_up.domain,
                level_up.previous_level,
                level_up.new_level,
                title_for(level_up.new_level)
            );
        }
        for milestone in &entry.milestones {
            println!("     milestone: {}", milestone);
        }
        if !entry.unlocked.is_empty() {
            println!("     unlocked: {}", entry.unlocked.join(", "));
        }
        if !entry.activated.is_empty() {
            println!("     activated: {}", entry.activated.join(", "));
        }
    }

    println!();
    println!("Final levels:");
    for (domain, level) in &report.final_levels {
        println!("  {:<10} {}", domain.name(), level);
    }
    println!("Eligible interactions: {}", report.eligible.join(", "));
    println!("Mastered: {}", report.mastered.join(", "));
    println!("Combo count: {}", report.combo_count);
}
