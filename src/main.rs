use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use password_card::{
    generate_card, CardConfig, CardTables, DrawScheme, FontFamily, OutputPaths, SerialId,
};

/// Generate the front and back SVGs of a password card keyed by a UUID serial.
///
/// The same serial always produces the same card.
#[derive(Parser, Debug, Clone)]
#[command(name = "password-card", version, about)]
struct CliArgs {
    /// UUID used as the card serial. A random one is generated if omitted.
    #[arg(short, long)]
    uuid: Option<String>,

    /// Output path of the card front. Defaults to `<timestamp>_card-front.svg`.
    #[arg(long = "front", visible_alias = "outf")]
    front: Option<PathBuf>,

    /// Output path of the card back. Defaults to `<timestamp>_card-back.svg`.
    #[arg(long = "back", visible_alias = "outb")]
    back: Option<PathBuf>,

    /// Font family for the characters, placed ahead of monospace.
    #[arg(long)]
    font: Option<String>,

    /// Directory holding the cell and card templates.
    #[arg(long, env = "PASSWORD_CARD_TEMPLATES", default_value = ".")]
    template_dir: PathBuf,

    /// Draw scheme: `mt19937` (Python `random` compatible) or `chacha8`.
    #[arg(long, env = "PASSWORD_CARD_SCHEME", default_value_t = DrawScheme::default())]
    scheme: DrawScheme,

    /// Print nothing but warnings and errors.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Echo the generated tables as JSON instead of a grid.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl CliArgs {
    /// Validate arguments into a card configuration.
    fn config(&self) -> anyhow::Result<CardConfig> {
        let defaults = OutputPaths::timestamped(chrono::Local::now().naive_local())?;
        let outputs = OutputPaths::new(
            self.front.clone().unwrap_or_else(|| defaults.front().to_path_buf()),
            self.back.clone().unwrap_or_else(|| defaults.back().to_path_buf()),
        )?;

        let mut config = CardConfig::new(outputs)
            .with_template_dir(&self.template_dir)
            .with_scheme(self.scheme);
        if let Some(font) = &self.font {
            config = config.with_font(FontFamily::new(font.as_str())?);
        }
        Ok(config)
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn echo(tables: &CardTables, json: bool) -> anyhow::Result<()> {
    println!("{}", tables.serial);
    if json {
        println!("{}", serde_json::to_string_pretty(tables)?);
    } else {
        println!("{tables}");
    }
    Ok(())
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let config = args.config().context("invalid configuration")?;
    let serial = match &args.uuid {
        Some(uuid) => uuid.parse::<SerialId>()?,
        None => SerialId::generate(),
    };

    let tables = generate_card(&config, serial).context("card generation failed")?;
    if !args.quiet {
        echo(&tables, args.json)?;
    }
    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    init_tracing(args.quiet);

    if let Err(err) = run(&args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
