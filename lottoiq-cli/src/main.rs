mod display;
mod load;

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use lottoiq_engine::generator::Predictor;

#[derive(Parser)]
#[command(name = "lottoiq", about = "Analyse Powerball et génération de grilles")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Générer les 5 grilles de l'ensemble
    Predict {
        /// Fichier de tirages (.json ou .csv)
        #[arg(short, long)]
        file: PathBuf,

        /// Seed pour la reproductibilité (défaut : date du jour YYYYMMDD)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Historique des derniers tirages
    History {
        #[arg(short, long)]
        file: PathBuf,

        /// Nombre de tirages affichés
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Classement composite avec contributions par algorithme
    Scores {
        #[arg(short, long)]
        file: PathBuf,

        /// Nombre de numéros affichés
        #[arg(short, long, default_value = "15")]
        top: usize,
    },
}

/// Seed déterministe basé sur la date du jour (YYYYMMDD).
fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    today.year() as u64 * 10_000 + today.month() as u64 * 100 + today.day() as u64
}

/// Le seed réseau est fixe : la projection aléatoire doit rester stable
/// d'une exécution à l'autre, seule la sélection des grilles varie.
const NETWORK_SEED: u64 = 0x4c6f74746f;

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Predict { file, seed } => cmd_predict(&file, seed),
        Command::History { file, last } => cmd_history(&file, last),
        Command::Scores { file, top } => cmd_scores(&file, top),
    }
}

fn cmd_predict(file: &PathBuf, seed: Option<u64>) -> Result<()> {
    // Mode dégradé : un fichier illisible ou vide produit quand même la
    // grille de secours, jamais une erreur.
    let drawings = match load::load_drawings(file) {
        Ok(drawings) => drawings,
        Err(e) => {
            eprintln!("({e:#} — mode dégradé)");
            Vec::new()
        }
    };

    let effective_seed = seed.unwrap_or_else(|| {
        let ds = date_seed();
        println!("(Seed du jour : {ds})");
        ds
    });
    let mut rng = StdRng::seed_from_u64(effective_seed);

    let predictor = Predictor::new(NETWORK_SEED);
    if !drawings.is_empty() {
        println!("{} tirages chargés depuis {:?}", drawings.len(), file);
        display::display_scores(&predictor.aggregator().breakdown(&drawings), 10);
    }

    let sets = predictor.generate(&drawings, &mut rng);
    display::display_sets(&sets);
    Ok(())
}

fn cmd_history(file: &PathBuf, last: usize) -> Result<()> {
    let drawings = load::load_drawings(file)?;
    if drawings.is_empty() {
        bail!("Aucun tirage valide dans {:?}", file);
    }
    display::display_history(&drawings[..last.min(drawings.len())]);
    Ok(())
}

fn cmd_scores(file: &PathBuf, top: usize) -> Result<()> {
    let drawings = load::load_drawings(file)?;
    if drawings.is_empty() {
        bail!("Aucun tirage valide dans {:?}", file);
    }
    let predictor = Predictor::new(NETWORK_SEED);
    display::display_scores(&predictor.aggregator().breakdown(&drawings), top);
    Ok(())
}
