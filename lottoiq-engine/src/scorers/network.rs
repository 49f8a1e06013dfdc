use std::collections::HashMap;

use ndarray::{Array1, Array2};
use rand::distr::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lottoiq_core::models::{Drawing, Pool};

use super::Scorer;

pub const INPUT_DIM: usize = 10;
pub const HIDDEN_DIM: usize = 20;
/// Nombre minimal de tirages pour calculer les features d'entrée.
pub const MIN_DRAWINGS: usize = 10;

const WEIGHT_SCALE: f64 = 0.05;

/// Projection aléatoire fixe 10 -> 20 (ReLU) -> 69 (sigmoïde). Les poids
/// sont tirés une fois à la construction depuis un seed injectable et ne
/// sont JAMAIS entraînés : ce scoreur n'existe que pour diversifier la
/// sortie de l'ensemble, pas comme modèle prédictif.
pub struct NetworkScorer {
    w1: Array2<f64>,
    b1: Array1<f64>,
    w2: Array2<f64>,
    b2: Array1<f64>,
    seed: u64,
}

impl NetworkScorer {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = Uniform::new(-WEIGHT_SCALE, WEIGHT_SCALE).unwrap();
        let out = Pool::Main.size();

        let w1 = Array2::from_shape_fn((HIDDEN_DIM, INPUT_DIM), |_| rng.sample(dist));
        let b1 = Array1::from_shape_fn(HIDDEN_DIM, |_| rng.sample(dist));
        let w2 = Array2::from_shape_fn((out, HIDDEN_DIM), |_| rng.sample(dist));
        let b2 = Array1::from_shape_fn(out, |_| rng.sample(dist));

        Self { w1, b1, w2, b2, seed }
    }

    fn forward(&self, features: &Array1<f64>) -> Array1<f64> {
        let hidden = (self.w1.dot(features) + &self.b1).mapv(relu);
        (self.w2.dot(&hidden) + &self.b2).mapv(sigmoid)
    }
}

fn relu(x: f64) -> f64 {
    x.max(0.0)
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Les 10 features d'entrée, chacune grossièrement dans [0, 1], dérivées
/// des `MIN_DRAWINGS` tirages les plus récents : moyenne par position
/// triée (5), somme moyenne, ratio de numéros impairs, étendue moyenne,
/// powerball moyen, écart-type des sommes.
pub fn extract_features(drawings: &[Drawing]) -> Array1<f64> {
    let window = &drawings[..MIN_DRAWINGS.min(drawings.len())];
    let n = window.len() as f64;

    let mut position_sums = [0.0f64; 5];
    let mut sums = Vec::with_capacity(window.len());
    let mut odd_total = 0.0f64;
    let mut range_total = 0.0f64;
    let mut powerball_total = 0.0f64;

    for drawing in window {
        let mut sorted = drawing.numbers;
        sorted.sort();
        for (p, &v) in sorted.iter().enumerate() {
            position_sums[p] += v as f64;
        }
        sums.push(sorted.iter().map(|&v| v as f64).sum::<f64>());
        odd_total += sorted.iter().filter(|&&v| v % 2 == 1).count() as f64 / 5.0;
        range_total += (sorted[4] - sorted[0]) as f64;
        powerball_total += drawing.powerball as f64;
    }

    let mean_sum = sums.iter().sum::<f64>() / n;
    let sum_variance = sums.iter().map(|s| (s - mean_sum).powi(2)).sum::<f64>() / n;

    let mut features = Array1::zeros(INPUT_DIM);
    for p in 0..5 {
        features[p] = position_sums[p] / n / 69.0;
    }
    features[5] = mean_sum / 345.0;
    features[6] = odd_total / n;
    features[7] = range_total / n / 68.0;
    features[8] = powerball_total / n / 26.0;
    features[9] = sum_variance.sqrt() / 345.0;
    features
}

impl Scorer for NetworkScorer {
    fn name(&self) -> &str {
        "Réseau"
    }

    fn score(&self, drawings: &[Drawing], pool: Pool) -> Vec<f64> {
        let size = pool.size();
        if pool != Pool::Main || drawings.len() < MIN_DRAWINGS {
            return vec![0.0; size];
        }
        let features = extract_features(drawings);
        self.forward(&features).to_vec()
    }

    fn params(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("seed".to_string(), self.seed as f64),
            ("hidden".to_string(), HIDDEN_DIM as f64),
            ("weight_scale".to_string(), WEIGHT_SCALE),
        ])
    }
}
