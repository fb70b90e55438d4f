use std::path::PathBuf;
use std::process;

use clap::Parser;
use mhw_core::DecorationLookup;
use mhw_core::catalog::DecorationCatalog;
use mhw_core::core_api::Engine;
use mhw_core::layout::LayoutVersion;
use mhw_render::{DomainSelection, Report, render_json, render_text};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVEDATA1000")]
    path: PathBuf,
    /// Save format revision; detected when omitted.
    #[arg(long, value_name = "base|iceborne", value_parser = parse_layout)]
    layout: Option<&'static LayoutVersion>,
    #[arg(long)]
    slots: bool,
    #[arg(long)]
    equipment: bool,
    #[arg(long)]
    decorations: bool,
    #[arg(long = "weapon-usage")]
    weapon_usage: bool,
    #[arg(long)]
    monsters: bool,
    #[arg(long)]
    json: bool,
    /// Decoration table JSON used to name decorations.
    #[arg(long, value_name = "PATH")]
    jewels: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn selection(&self) -> DomainSelection {
        let selected = DomainSelection {
            slots: self.slots,
            equipment: self.equipment,
            decorations: self.decorations,
            weapon_usage: self.weapon_usage,
            monsters: self.monsters,
        };
        if selected.is_any_selected() {
            return selected;
        }
        DomainSelection {
            decorations: self.jewels.is_some(),
            ..DomainSelection::all()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fields = cli.selection();
    if fields.decorations && cli.jewels.is_none() {
        eprintln!("--decorations requires --jewels <PATH>");
        process::exit(2);
    }

    let catalog = cli.jewels.as_ref().map(|path| {
        DecorationCatalog::load(path).unwrap_or_else(|e| {
            eprintln!("Error loading decoration table {}: {e}", path.display());
            process::exit(1);
        })
    });

    let session = Engine::new()
        .open_path(&cli.path, cli.layout)
        .unwrap_or_else(|e| {
            eprintln!("Error decoding save file: {}", cli.path.display());
            eprintln!("  {e}");
            process::exit(1);
        });
    debug!(layout = session.layout().name, "save decoded");

    let lookup = catalog.as_ref().map(|c| c as &dyn DecorationLookup);
    let report = Report::collect(&session, &fields, lookup).unwrap_or_else(|e| {
        eprintln!("Error decoding save file: {}", cli.path.display());
        eprintln!("  {e}");
        process::exit(1);
    });

    if cli.json {
        let rendered = serde_json::to_string_pretty(&render_json(&report)).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    print!("{}", render_text(&report));
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_layout(value: &str) -> Result<&'static LayoutVersion, String> {
    LayoutVersion::from_name(value).ok_or_else(|| {
        format!("invalid layout value '{value}', expected one of: base, iceborne")
    })
}
