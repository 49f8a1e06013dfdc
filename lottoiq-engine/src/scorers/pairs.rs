use std::collections::HashMap;

use lottoiq_core::models::{Drawing, Pool};

use super::Scorer;

/// Poids de récence d'un tirage : 1.0 pour le plus récent, -0.02 par
/// position, plancher à 0.5.
pub fn recency_weight(index: usize) -> f64 {
    (1.0 - 0.02 * index as f64).max(0.5)
}

/// Co-occurrences de paires de numéros principaux, pondérées par la
/// récence. Le score d'un numéro est la somme des poids de toutes les
/// paires auxquelles il participe.
pub struct PairScorer;

/// Carte brute des fréquences de paires (clé ordonnée a < b). Réservée
/// au diagnostic et aux départages, pas à l'agrégation.
pub fn pair_frequencies(drawings: &[Drawing]) -> HashMap<(u8, u8), f64> {
    let mut pairs = HashMap::new();
    for (i, drawing) in drawings.iter().enumerate() {
        let w = recency_weight(i);
        for a in 0..drawing.numbers.len() {
            for b in (a + 1)..drawing.numbers.len() {
                let x = drawing.numbers[a].min(drawing.numbers[b]);
                let y = drawing.numbers[a].max(drawing.numbers[b]);
                *pairs.entry((x, y)).or_insert(0.0) += w;
            }
        }
    }
    pairs
}

impl Scorer for PairScorer {
    fn name(&self) -> &str {
        "Paires"
    }

    fn score(&self, drawings: &[Drawing], pool: Pool) -> Vec<f64> {
        let size = pool.size();
        // Les paires sont une notion du tirage principal uniquement.
        if pool != Pool::Main {
            return vec![0.0; size];
        }

        let mut scores = vec![0.0f64; size];
        for (i, drawing) in drawings.iter().enumerate() {
            let w = recency_weight(i);
            for a in 0..drawing.numbers.len() {
                for b in (a + 1)..drawing.numbers.len() {
                    let ia = (drawing.numbers[a] - 1) as usize;
                    let ib = (drawing.numbers[b] - 1) as usize;
                    if ia < size && ib < size {
                        scores[ia] += w;
                        scores[ib] += w;
                    }
                }
            }
        }
        scores
    }

    fn params(&self) -> HashMap<String, f64> {
        HashMap::from([("decay_per_draw".to_string(), 0.02), ("floor".to_string(), 0.5)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorers::{make_test_drawings, validate_scores};

    #[test]
    fn test_recency_weight_floor() {
        assert_eq!(recency_weight(0), 1.0);
        assert!((recency_weight(10) - 0.8).abs() < 1e-12);
        assert_eq!(recency_weight(25), 0.5);
        assert_eq!(recency_weight(400), 0.5);
    }

    #[test]
    fn test_pairs_shape() {
        let scores = PairScorer.score(&make_test_drawings(30), Pool::Main);
        assert!(validate_scores(&scores, Pool::Main));
    }

    #[test]
    fn test_pairs_bonus_all_zero() {
        let scores = PairScorer.score(&make_test_drawings(30), Pool::Bonus);
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_pairs_empty_all_zero() {
        let scores = PairScorer.score(&[], Pool::Main);
        assert!(scores.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_pairs_single_drawing() {
        // Un tirage : chaque numéro participe à 4 paires de poids 1.0.
        let drawings = vec![Drawing {
            date: "2024-01-01".into(),
            numbers: [3, 11, 25, 40, 68],
            powerball: 5,
        }];
        let scores = PairScorer.score(&drawings, Pool::Main);
        for &n in &[3u8, 11, 25, 40, 68] {
            assert!((scores[(n - 1) as usize] - 4.0).abs() < 1e-12);
        }
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn test_pair_frequencies_ordered_keys() {
        let drawings = vec![Drawing {
            date: "2024-01-01".into(),
            numbers: [40, 3, 25, 11, 68],
            powerball: 5,
        }];
        let pairs = pair_frequencies(&drawings);
        assert_eq!(pairs.len(), 10);
        for (&(a, b), &w) in &pairs {
            assert!(a < b);
            assert!((w - 1.0).abs() < 1e-12);
        }
        assert!(pairs.contains_key(&(3, 40)));
    }

    #[test]
    fn test_pair_frequencies_recency_weighted() {
        let recent = Drawing { date: "2024-01-02".into(), numbers: [1, 2, 3, 4, 5], powerball: 1 };
        let older = Drawing { date: "2024-01-01".into(), numbers: [1, 2, 60, 61, 62], powerball: 1 };
        let pairs = pair_frequencies(&[recent, older]);
        // La paire (1,2) apparaît deux fois : 1.0 + 0.98.
        assert!((pairs[&(1, 2)] - 1.98).abs() < 1e-12);
        assert!((pairs[&(60, 61)] - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_pairs_idempotent() {
        let drawings = make_test_drawings(25);
        assert_eq!(
            PairScorer.score(&drawings, Pool::Main),
            PairScorer.score(&drawings, Pool::Main)
        );
    }
}
