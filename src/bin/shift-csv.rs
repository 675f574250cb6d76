#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use shift_csv::{
    export::{export_csv, DirectorySink, MemorySink, EXPORT_FILENAME},
    io,
    session::{Command, Reply, Session},
    SelectionController, UuidColorSource,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Saisie de turni et export CSV pour calendrier
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Catalogue des types de turno (JSON, ou CSV si extension `.csv`)
    #[arg(long, global = true, default_value = "shifts.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister les types de turno avec leur couleur
    Catalog,

    /// Boucle de saisie : une commande par ligne (stdin ou script)
    Run {
        /// Script de commandes ; stdin si absent
        #[arg(long)]
        script: Option<PathBuf>,
        /// Répertoire de destination de `shifts.csv`
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Date du jour (YYYY-MM-DD), pour le marquage
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Convertir un planning `date,type` sauvegardé en `shifts.csv`
    Export {
        #[arg(long)]
        schedule: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let catalog = io::load_catalog(&cli.catalog)?;

    let code = match cli.cmd {
        Commands::Catalog => {
            let today = Local::now().date_naive();
            let session = Session::new(catalog, &mut UuidColorSource, MemorySink::default(), today);
            print!("{}", session.render_picker());
            0
        }
        Commands::Run {
            script,
            out_dir,
            today,
        } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let sink = DirectorySink::new(&out_dir);
            let target = sink.path_for(EXPORT_FILENAME);
            let mut session = Session::new(catalog, &mut UuidColorSource, sink, today);

            let input: Box<dyn BufRead> = match script {
                Some(path) => Box::new(BufReader::new(
                    File::open(&path).with_context(|| format!("opening {}", path.display()))?,
                )),
                None => Box::new(BufReader::new(std::io::stdin())),
            };

            let mut failures = 0usize;
            for line in input.lines() {
                let line = line?;
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let cmd: Command = match line.parse() {
                    Ok(cmd) => cmd,
                    Err(err) => {
                        eprintln!("{err}");
                        failures += 1;
                        continue;
                    }
                };
                match session.apply(cmd) {
                    Ok(Reply::None) => {}
                    Ok(Reply::Text(text)) => println!("{}", text.trim_end()),
                    Ok(Reply::Exported(summary)) => println!(
                        "Exported {} row(s) to {} ({} skipped)",
                        summary.rows,
                        target.display(),
                        summary.skipped
                    ),
                    Err(err) => {
                        eprintln!("{err:#}");
                        failures += 1;
                    }
                }
            }
            // Code 2 = WARNING/INCOMPLETE
            if failures > 0 {
                2
            } else {
                0
            }
        }
        Commands::Export { schedule, out_dir } => {
            let entries = io::import_schedule_csv(&schedule)?;
            let mut controller = SelectionController::new(catalog);
            controller.load_entries(entries);
            let mut sink = DirectorySink::new(&out_dir);
            let summary = export_csv(controller.store(), controller.catalog(), &mut sink)?;
            println!(
                "Exported {} row(s) to {}",
                summary.rows,
                sink.path_for(EXPORT_FILENAME).display()
            );
            if summary.skipped > 0 {
                eprintln!("Skipped {} entry(ies) with unknown shift type", summary.skipped);
                2
            } else {
                0
            }
        }
    };

    std::process::exit(code);
}
