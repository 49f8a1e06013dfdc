pub mod ewma;
pub mod gaps;
pub mod network;
pub mod pairs;

use std::collections::HashMap;

use lottoiq_core::models::{Drawing, Pool};

/// Un scoreur indépendant de l'ensemble. Les scores sont BRUTS (pas des
/// distributions) : l'agrégateur possède les règles de normalisation
/// par algorithme.
pub trait Scorer: Send + Sync {
    fn name(&self) -> &str;
    /// drawings[0] = le tirage le plus récent. Retourne un Vec<f64> de
    /// taille pool.size(), entrées >= 0. Historique vide => tout zéro.
    fn score(&self, drawings: &[Drawing], pool: Pool) -> Vec<f64>;
    fn params(&self) -> HashMap<String, f64>;
}

pub fn validate_scores(scores: &[f64], pool: Pool) -> bool {
    scores.len() == pool.size() && scores.iter().all(|&s| s >= 0.0 && s.is_finite())
}

pub fn make_test_drawings(n: usize) -> Vec<Drawing> {
    (0..n)
        .map(|i| {
            let base = (i % 12) as u8;
            Drawing {
                date: format!("2024-{:02}-{:02}", (i / 28) % 12 + 1, i % 28 + 1),
                numbers: [
                    base * 5 + 1,
                    base * 5 + 2,
                    base * 5 + 3,
                    base * 5 + 4,
                    base * 5 + 5,
                ],
                powerball: base % 26 + 1,
            }
        })
        .collect()
}
