use dnd_keeper::character::{
    experience_remaining, level_from_experience, parse_armor_proficiencies, proficiency_bonus,
};
use dnd_keeper::combat::{simulate_cast, CastRequest, CastResult};
use dnd_keeper::config::Config;
use dnd_keeper::dice::DiceFormula;
use dnd_keeper::items::suggest_loadout;
use dnd_keeper::storage::SpellBook;
use rand::Rng;
use std::error::Error;
use tracing_subscriber::EnvFilter;

type CliResult = Result<(), Box<dyn Error>>;

fn print_help() {
    println!("dnd-keeper - D&D 5e rules calculator and campaign keeper\n");
    println!("Usage: dnd-keeper <command> [args]\n");
    println!("Commands:");
    println!("  roll <formula>                                 Roll dice, e.g. 2d6+3");
    println!("  ac <dex_mod> [proficiency...]                  Best armor for a Dexterity modifier");
    println!("  level <xp>                                     Level and proficiency bonus for experience");
    println!("  cast <spell> <ability_mod> <level> [slot]      Simulate casting a spell from the spell book");
    println!("  --version                                      Show version information");
    println!("  --help                                         Show this help message");
    println!("\nEnvironment: DND_KEEPER_DATA_DIR, DND_KEEPER_SEED, DND_KEEPER_SAVE_BONUS, RUST_LOG");
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, what: &str) -> Result<T, String> {
    let raw = args
        .get(index)
        .ok_or_else(|| format!("missing {what}"))?;
    raw.parse()
        .map_err(|_| format!("invalid {what}: '{raw}'"))
}

fn cmd_roll(args: &[String], rng: &mut impl Rng) -> CliResult {
    let input = args.get(2).map(String::as_str).unwrap_or("");
    let Some(formula) = DiceFormula::parse(input)? else {
        println!("Nothing to roll.");
        return Ok(());
    };
    let result = formula.evaluate(0, rng);
    println!("{formula}: rolled {}", result.rolled);
    println!("  min {}  avg {:.1}  max {}", result.min, result.avg, result.max);
    Ok(())
}

fn cmd_ac(args: &[String]) -> CliResult {
    let dex_mod: i32 = parse_arg(args, 2, "Dexterity modifier")?;
    let proficiencies = parse_armor_proficiencies(&args[3..])?;
    let suggestion = suggest_loadout(dex_mod, &proficiencies);

    println!("{}", suggestion.explanation);
    for tip in &suggestion.tips {
        println!("  * {tip}");
    }
    Ok(())
}

fn cmd_level(args: &[String]) -> CliResult {
    let xp: u32 = parse_arg(args, 2, "experience")?;
    let level = level_from_experience(xp);
    println!("Level {level} (proficiency bonus {:+})", proficiency_bonus(level as i32));
    match experience_remaining(level, xp) {
        Some(remaining) => println!("{remaining} XP to level {}", level + 1),
        None => println!("Maximum level reached."),
    }
    Ok(())
}

fn print_cast(result: &CastResult) {
    println!(
        "{} (level {}, cast at {})",
        result.spell_name, result.spell_level, result.cast_level
    );
    println!(
        "  Save DC {}  Spell attack {:+}",
        result.save_dc, result.attack_bonus
    );
    if let Some(attack) = &result.attack {
        let note = if attack.critical {
            " CRITICAL!"
        } else if attack.fumble {
            " fumble"
        } else {
            ""
        };
        println!("  Attack: d20 {} {:+} = {}{note}", attack.d20, attack.bonus, attack.total);
    }
    if let Some(save) = &result.save {
        let outcome = if save.success { "succeeds" } else { "fails" };
        println!(
            "  {} save: d20 {} {:+} = {} vs DC {}: target {outcome} ({} on success)",
            save.ability, save.d20, save.bonus, save.total, save.dc, save.effect
        );
    }
    if !result.damage.formula.is_empty() {
        let kind = result
            .damage
            .damage_type
            .map(|t| format!(" {t}"))
            .unwrap_or_default();
        println!(
            "  Damage: {} = {}{kind} ({}-{})",
            result.damage.formula, result.damage.rolled, result.damage.min, result.damage.max
        );
    }
    if !result.healing.formula.is_empty() {
        println!(
            "  Healing: {} {:+} = {} ({}-{})",
            result.healing.formula,
            result.healing.caster_modifier,
            result.healing.rolled,
            result.healing.min,
            result.healing.max
        );
    }
}

fn cmd_cast(args: &[String], config: &Config, rng: &mut impl Rng) -> CliResult {
    let name = args.get(2).ok_or("missing spell name")?;
    let ability_mod: i32 = parse_arg(args, 3, "ability modifier")?;
    let level: i32 = parse_arg(args, 4, "character level")?;

    let mut book = SpellBook::load_or_init(&config.data_dir)?;
    if book.seed_samples()? > 0 {
        tracing::info!(path = %book.path().display(), "seeded sample spells");
    }
    let spell = book
        .find(name, None)
        .ok_or_else(|| format!("no spell named '{name}' in {}", book.path().display()))?;

    let mut request = CastRequest::new(ability_mod, proficiency_bonus(level))
        .with_target_save_bonus(config.target_save_bonus);
    if args.len() > 5 {
        request = request.at_level(parse_arg(args, 5, "slot level")?);
    }

    let result = simulate_cast(spell, &request, rng)?;
    print_cast(&result);
    Ok(())
}

fn run(args: &[String]) -> CliResult {
    let Some(command) = args.get(1) else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "--version" | "-v" => {
            println!("dnd-keeper {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "roll" | "ac" | "level" | "cast" => {
            let config = Config::from_env()?;
            let mut rng = config.make_rng();
            match command.as_str() {
                "roll" => cmd_roll(args, &mut rng),
                "ac" => cmd_ac(args),
                "level" => cmd_level(args),
                _ => cmd_cast(args, &config, &mut rng),
            }
        }
        other => Err(format!("Unknown command: {other}\nRun 'dnd-keeper --help' for usage.").into()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
