use std::collections::HashMap;

use lottoiq_core::models::{Drawing, Pool};

use super::Scorer;

/// Score de retard : un numéro est "en retard" quand son écart courant
/// dépasse 1.2× son écart historique moyen. Le score est le ratio
/// écart courant / écart moyen, borné à 4.0. Moins de trois sorties
/// historiques => score 0 (données insuffisantes, pas une erreur).
pub struct GapScorer {
    threshold: f64,
    cap: f64,
}

impl GapScorer {
    pub fn new() -> Self {
        Self { threshold: 1.2, cap: 4.0 }
    }
}

impl Default for GapScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for GapScorer {
    fn name(&self) -> &str {
        "Retards"
    }

    fn score(&self, drawings: &[Drawing], pool: Pool) -> Vec<f64> {
        let size = pool.size();
        // Seul le classement principal consomme les retards.
        if pool != Pool::Main {
            return vec![0.0; size];
        }

        let mut scores = vec![0.0f64; size];
        for i in 0..size {
            let number = (i + 1) as u8;

            // Indices d'apparition, 0 = tirage le plus récent.
            let appearances: Vec<usize> = drawings
                .iter()
                .enumerate()
                .filter(|(_, d)| d.numbers.contains(&number))
                .map(|(t, _)| t)
                .collect();

            if appearances.len() <= 2 {
                continue;
            }

            let current_gap = appearances[0] as f64;
            let gaps: Vec<f64> = appearances
                .windows(2)
                .map(|w| (w[1] - w[0]) as f64)
                .collect();
            let mean_gap = gaps.iter().sum::<f64>() / gaps.len() as f64;

            if mean_gap > 0.0 && current_gap > self.threshold * mean_gap {
                scores[i] = (current_gap / mean_gap).min(self.cap);
            }
        }
        scores
    }

    fn params(&self) -> HashMap<String, f64> {
        HashMap::from([("threshold".to_string(), self.threshold), ("cap".to_string(), self.cap)])
    }
}
