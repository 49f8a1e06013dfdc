use std::collections::HashMap;

use lottoiq_core::models::{Drawing, Pool};

use super::Scorer;

/// Fréquence lissée exponentiellement, biaisée vers les tirages récents.
/// À chaque apparition d'un numéro : score = alpha·w + (1-alpha)·score,
/// avec w = (1-alpha)^t et t la distance au tirage le plus récent.
/// Les mises à jour s'appliquent en ordre chronologique (du plus ancien
/// au plus récent), de sorte que la dernière contribution d'un numéro
/// porte le poids de sa sortie la plus récente.
pub struct EwmaScorer {
    alpha: f64,
}

impl EwmaScorer {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Default for EwmaScorer {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl Scorer for EwmaScorer {
    fn name(&self) -> &str {
        "EWMA"
    }

    fn score(&self, drawings: &[Drawing], pool: Pool) -> Vec<f64> {
        let size = pool.size();
        let mut scores = vec![0.0f64; size];
        let decay = 1.0 - self.alpha;

        for (t, drawing) in drawings.iter().enumerate().rev() {
            let w = decay.powi(t as i32);
            for &n in pool.numbers_from(drawing) {
                let idx = (n - 1) as usize;
                if idx < size {
                    scores[idx] = self.alpha * w + decay * scores[idx];
                }
            }
        }

        scores
    }

    fn params(&self) -> HashMap<String, f64> {
        HashMap::from([("alpha".to_string(), self.alpha)])
    }
}
