use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Un tirage Powerball historique. `numbers` contient 5 numéros distincts
/// dans [1, 69], `powerball` est dans [1, 26]. Immuable après ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawing {
    pub date: String,
    pub numbers: [u8; 5],
    pub powerball: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Main,
    Bonus,
}

impl Pool {
    pub fn size(&self) -> usize {
        match self {
            Pool::Main => 69,
            Pool::Bonus => 26,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Main => 5,
            Pool::Bonus => 1,
        }
    }

    pub fn numbers_from<'a>(&self, drawing: &'a Drawing) -> &'a [u8] {
        match self {
            Pool::Main => &drawing.numbers,
            Pool::Bonus => std::slice::from_ref(&drawing.powerball),
        }
    }
}

pub fn validate_drawing(numbers: &[u8; 5], powerball: u8) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > 69 {
            bail!("Numéro {} hors limites (1-69)", n);
        }
    }
    if powerball < 1 || powerball > 26 {
        bail!("Powerball {} hors limites (1-26)", powerball);
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro en double : {}", numbers[i]);
            }
        }
    }
    Ok(())
}

/// Stratégie de dérivation d'une grille candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    TopScore,
    Balanced,
    PairPattern,
    Contrarian,
    SmartRandom,
    Fallback,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::TopScore => write!(f, "Score maximal"),
            Strategy::Balanced => write!(f, "Équilibré par zones"),
            Strategy::PairPattern => write!(f, "Motifs de paires"),
            Strategy::Contrarian => write!(f, "À contre-courant"),
            Strategy::SmartRandom => write!(f, "Aléatoire pondéré"),
            Strategy::Fallback => write!(f, "Secours aléatoire"),
        }
    }
}

/// Une grille candidate retournée à l'appelant. `numbers` est trié
/// croissant ; `confidence` vit dans [60, 99].
#[derive(Debug, Clone, Serialize)]
pub struct PredictionSet {
    pub numbers: [u8; 5],
    pub powerball: u8,
    pub strategy: Strategy,
    pub confidence: u8,
    pub rationale: String,
}

/// Agrégats dérivés de l'historique de sélection d'un utilisateur,
/// fournis par le collaborateur de persistance. Seule l'interface
/// d'enrichissement les consomme.
#[derive(Debug, Clone, Default)]
pub struct UserAnalytics {
    pub favorite_numbers: Vec<u8>,
    pub win_rate: f64,
    pub preferred_strategy: Option<Strategy>,
}
