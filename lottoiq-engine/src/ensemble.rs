use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use lottoiq_core::models::{Drawing, Pool};

use crate::scorers::ewma::EwmaScorer;
use crate::scorers::gaps::GapScorer;
use crate::scorers::network::NetworkScorer;
use crate::scorers::pairs::PairScorer;
use crate::scorers::Scorer;

/// Poids fixes par algorithme. `sum_range` et `markov` sont des points
/// d'extension réservés, déclarés mais jamais appliqués par
/// l'agrégateur : leurs constantes de normalisation n'ont jamais été
/// validées en amont.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleWeights {
    pub ewma: f64,
    pub pairs: f64,
    pub gaps: f64,
    pub network: f64,
    pub sum_range: f64,
    pub markov: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            ewma: 0.20,
            pairs: 0.18,
            gaps: 0.16,
            network: 0.17,
            sum_range: 0.15,
            markov: 0.14,
        }
    }
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

// Règles de normalisation linéaire par algorithme, bornées dans [0, 1].
pub fn normalize_ewma(s: f64) -> f64 {
    clamp01(s * 10.0)
}

pub fn normalize_pairs(s: f64) -> f64 {
    clamp01(s / 20.0)
}

pub fn normalize_gaps(s: f64) -> f64 {
    clamp01(s / 4.0)
}

pub fn normalize_network(s: f64) -> f64 {
    clamp01(s)
}

/// Contributions normalisées d'un numéro, pour l'affichage diagnostic.
#[derive(Debug, Clone)]
pub struct NumberBreakdown {
    pub number: u8,
    pub ewma: f64,
    pub pairs: f64,
    pub gaps: f64,
    pub network: f64,
    pub composite: f64,
}

/// Combine les quatre scoreurs en un score composite par numéro
/// principal. Construit une fois par processus ; `composite_scores` ne
/// mute aucun état partagé (chaque appel travaille sur ses propres
/// vecteurs).
pub struct EnsembleAggregator {
    ewma: EwmaScorer,
    pairs: PairScorer,
    gaps: GapScorer,
    network: NetworkScorer,
    pub weights: EnsembleWeights,
}

impl EnsembleAggregator {
    pub fn new(network_seed: u64) -> Self {
        Self::with_weights(network_seed, EnsembleWeights::default())
    }

    pub fn with_weights(network_seed: u64, weights: EnsembleWeights) -> Self {
        Self {
            ewma: EwmaScorer::default(),
            pairs: PairScorer,
            gaps: GapScorer::new(),
            network: NetworkScorer::new(network_seed),
            weights,
        }
    }

    /// Score composite dans [0, 1] pour chaque numéro 1..=69 :
    /// normalisation par algorithme puis somme pondérée (commutative,
    /// indépendante de l'ordre des algorithmes).
    pub fn composite_scores(&self, drawings: &[Drawing]) -> Vec<f64> {
        self.breakdown(drawings).into_iter().map(|b| b.composite).collect()
    }

    pub fn breakdown(&self, drawings: &[Drawing]) -> Vec<NumberBreakdown> {
        let e = self.ewma.score(drawings, Pool::Main);
        let p = self.pairs.score(drawings, Pool::Main);
        let g = self.gaps.score(drawings, Pool::Main);
        let n = self.network.score(drawings, Pool::Main);

        (0..Pool::Main.size())
            .map(|i| {
                let ewma = normalize_ewma(e[i]);
                let pairs = normalize_pairs(p[i]);
                let gaps = normalize_gaps(g[i]);
                let network = normalize_network(n[i]);
                NumberBreakdown {
                    number: (i + 1) as u8,
                    ewma,
                    pairs,
                    gaps,
                    network,
                    composite: self.weights.ewma * ewma
                        + self.weights.pairs * pairs
                        + self.weights.gaps * gaps
                        + self.weights.network * network,
                }
            })
            .collect()
    }

    /// Classement powerball : EWMA seul sur le domaine 1..=26.
    pub fn powerball_scores(&self, drawings: &[Drawing]) -> Vec<f64> {
        self.ewma.score(drawings, Pool::Bonus)
    }
}

/// Numéros triés par score décroissant ; à score égal, numéro croissant
/// (ordre déterministe pour les tests).
pub fn ranked(scores: &[f64]) -> Vec<u8> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    indices.into_iter().map(|i| (i + 1) as u8).collect()
}
