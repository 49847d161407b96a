use std::{
    fs::File,
    io::{BufReader, BufWriter, IsTerminal, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context as _, bail};
use clap::{CommandFactory, FromArgMatches, Parser};
use termfx::effects::{self, EffectFile};
use tracing_subscriber::EnvFilter;

/// Apply visual effects to terminal text piped in from stdin.
#[derive(Parser, Debug)]
#[command(name = "termfx", version, subcommand_required = false)]
struct Cli {
    /// Seed for every random choice, for reproducible runs.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Target frames per second (0 = as fast as possible).
    #[arg(long, global = true, default_value_t = 100)]
    frame_rate: u32,

    /// Read the effect and its options from a JSON file instead of a sub-command.
    #[arg(long)]
    config: Option<PathBuf>,

    /// List the built-in effects and exit.
    #[arg(long)]
    list: bool,

    /// Print an effect's default options as a JSON run file and exit.
    #[arg(long, value_name = "EFFECT")]
    defaults: Option<String>,
}

fn cli_command() -> clap::Command {
    effects::registry()
        .iter()
        .fold(Cli::command(), |cmd, entry| cmd.subcommand((entry.command)()))
        .after_help("Use <EFFECT> --help for effect options.")
}

fn main() -> anyhow::Result<()> {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let matches = cli_command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;
    if cli.list {
        for entry in effects::registry() {
            println!("{:<10} {}", entry.name, entry.about);
        }
        return Ok(());
    }
    if let Some(name) = &cli.defaults {
        let entry = effects::find(name).with_context(|| format!("unknown effect '{name}'"))?;
        let file = serde_json::json!({ "effect": entry.name, "options": (entry.defaults)()? });
        println!("{}", serde_json::to_string_pretty(&file)?);
        return Ok(());
    }
    let effect = resolve_effect(&cli, &matches)?;

    let input = read_piped_input()?;
    let mut canvas = termfx::Canvas::from_text(&input);
    if canvas.is_empty() {
        println!("NO INPUT.");
        return Ok(());
    }

    let mut scheduler = termfx::Scheduler::new(effect, &mut canvas, cli.seed)?;
    let mut backend = termfx::AnsiBackend::new(BufWriter::new(std::io::stdout().lock()));
    scheduler
        .run(
            &mut canvas,
            &mut backend,
            termfx::RunOpts {
                frame_rate: cli.frame_rate,
            },
        )
        .context("run effect")?;
    Ok(())
}

fn resolve_effect(
    cli: &Cli,
    matches: &clap::ArgMatches,
) -> anyhow::Result<Box<dyn termfx::Effect>> {
    match (&cli.config, matches.subcommand()) {
        (Some(_), Some((name, _))) => {
            bail!("--config and the '{name}' sub-command are mutually exclusive")
        }
        (Some(path), None) => Ok(read_effect_file(path)?.into_effect()?),
        (None, Some((name, sub))) => {
            let entry = effects::find(name).with_context(|| format!("unknown effect '{name}'"))?;
            Ok((entry.from_matches)(sub)?)
        }
        (None, None) => {
            cli_command().print_help()?;
            bail!("no effect given")
        }
    }
}

fn read_effect_file(path: &Path) -> anyhow::Result<EffectFile> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let file: EffectFile = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse config JSON '{}'", path.display()))?;
    Ok(file)
}

fn read_piped_input() -> anyhow::Result<String> {
    let mut stdin = std::io::stdin().lock();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut input = String::new();
    stdin
        .read_to_string(&mut input)
        .context("read piped input")?;
    Ok(input)
}
