use rand::seq::SliceRandom;
use rand::Rng;

use lottoiq_core::models::{Drawing, PredictionSet, Strategy};

use crate::ensemble::{ranked, EnsembleAggregator, EnsembleWeights};

/// Confiance fixe du mode dégradé (historique inutilisable).
pub const FALLBACK_CONFIDENCE: u8 = 52;

const TOP_POOL: usize = 8;
const SMART_RANDOM_KEEP: f64 = 0.1;
const SMART_RANDOM_MIN_POOL: usize = 8;

/// Générateur de grilles : quatre scoreurs agrégés puis cinq stratégies
/// de dérivation. Construit une fois par processus (le seed fixe la
/// projection du scoreur réseau) ; `generate` ne partage aucun état
/// mutable entre appels, l'aléa est injecté par l'appelant.
pub struct Predictor {
    aggregator: EnsembleAggregator,
}

impl Predictor {
    pub fn new(network_seed: u64) -> Self {
        Self { aggregator: EnsembleAggregator::new(network_seed) }
    }

    pub fn with_weights(network_seed: u64, weights: EnsembleWeights) -> Self {
        Self { aggregator: EnsembleAggregator::with_weights(network_seed, weights) }
    }

    pub fn aggregator(&self) -> &EnsembleAggregator {
        &self.aggregator
    }

    /// Produit exactement 5 grilles différenciées, triées par confiance
    /// décroissante. Historique vide => une seule grille de secours
    /// aléatoire, jamais une erreur.
    pub fn generate(&self, drawings: &[Drawing], rng: &mut impl Rng) -> Vec<PredictionSet> {
        if drawings.is_empty() {
            return vec![fallback_set(rng)];
        }

        let composite = self.aggregator.composite_scores(drawings);
        let ranking = ranked(&composite);
        let powerball_ranking = ranked(&self.aggregator.powerball_scores(drawings));

        let mut sets = vec![
            self.top_score_set(&composite, &ranking, &powerball_ranking, rng),
            self.balanced_set(&composite, &ranking, &powerball_ranking, rng),
            self.pair_pattern_set(&composite, &ranking, &powerball_ranking, rng),
            self.contrarian_set(&composite, &ranking, &powerball_ranking, rng),
            self.smart_random_set(&composite, rng),
        ];
        sets.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        sets
    }

    fn top_score_set(
        &self,
        composite: &[f64],
        ranking: &[u8],
        powerball_ranking: &[u8],
        rng: &mut impl Rng,
    ) -> PredictionSet {
        let pool = ranking[..TOP_POOL].to_vec();
        let numbers = select_optimal_numbers(&pool, rng);
        PredictionSet {
            numbers,
            powerball: pick_powerball(powerball_ranking, rng),
            strategy: Strategy::TopScore,
            confidence: confidence(&numbers, composite),
            rationale: "Les numéros au score composite le plus élevé.".to_string(),
        }
    }

    fn balanced_set(
        &self,
        composite: &[f64],
        ranking: &[u8],
        powerball_ranking: &[u8],
        rng: &mut impl Rng,
    ) -> PredictionSet {
        // Meilleurs scores par zone : 2 en [1,23], 2 en [24,46], 1 en [47,69].
        let mut pool: Vec<u8> = Vec::with_capacity(5);
        pool.extend(ranking.iter().filter(|&&n| n <= 23).take(2));
        pool.extend(ranking.iter().filter(|&&n| (24..=46).contains(&n)).take(2));
        pool.extend(ranking.iter().filter(|&&n| n >= 47).take(1));

        let numbers = select_optimal_numbers(&pool, rng);
        PredictionSet {
            numbers,
            powerball: pick_powerball(powerball_ranking, rng),
            strategy: Strategy::Balanced,
            confidence: confidence(&numbers, composite),
            rationale: "Meilleurs scores répartis sur les zones 1-23, 24-46 et 47-69.".to_string(),
        }
    }

    fn pair_pattern_set(
        &self,
        composite: &[f64],
        ranking: &[u8],
        powerball_ranking: &[u8],
        rng: &mut impl Rng,
    ) -> PredictionSet {
        // Tête de classement + rangs 11 à 15.
        let mut pool: Vec<u8> = ranking[..3].to_vec();
        pool.extend_from_slice(&ranking[10..15]);

        let numbers = select_optimal_numbers(&pool, rng);
        PredictionSet {
            numbers,
            powerball: pick_powerball(powerball_ranking, rng),
            strategy: Strategy::PairPattern,
            confidence: confidence(&numbers, composite),
            rationale: "Tête de classement renforcée par les rangs 11 à 15.".to_string(),
        }
    }

    fn contrarian_set(
        &self,
        composite: &[f64],
        ranking: &[u8],
        powerball_ranking: &[u8],
        rng: &mut impl Rng,
    ) -> PredictionSet {
        // Deux favoris + les dix derniers du classement.
        let mut pool: Vec<u8> = ranking[..2].to_vec();
        pool.extend_from_slice(&ranking[ranking.len() - 10..]);

        let numbers = select_optimal_numbers(&pool, rng);
        let base = confidence(&numbers, composite);
        PredictionSet {
            numbers,
            powerball: pick_powerball(powerball_ranking, rng),
            strategy: Strategy::Contrarian,
            confidence: base.saturating_sub(5).max(60),
            rationale: "Favoris mêlés aux numéros les plus délaissés du classement.".to_string(),
        }
    }

    fn smart_random_set(&self, composite: &[f64], rng: &mut impl Rng) -> PredictionSet {
        // Vivier échantillonné : chaque numéro retenu avec probabilité
        // 0.1, complété jusqu'à 8 candidats. Grille joker : le powerball
        // est uniforme, pas issu du classement.
        let mut pool: Vec<u8> = (1..=69u8)
            .filter(|_| rng.random::<f64>() < SMART_RANDOM_KEEP)
            .collect();
        while pool.len() < SMART_RANDOM_MIN_POOL {
            let n = rng.random_range(1..=69u8);
            if !pool.contains(&n) {
                pool.push(n);
            }
        }

        let numbers = select_optimal_numbers(&pool, rng);
        PredictionSet {
            numbers,
            powerball: rng.random_range(1..=26u8),
            strategy: Strategy::SmartRandom,
            confidence: confidence(&numbers, composite),
            rationale: "Tirage aléatoire pondéré, grille joker.".to_string(),
        }
    }
}

/// Grille de secours : 5 numéros aléatoires distincts + powerball
/// aléatoire, confiance fixe basse.
pub fn fallback_set(rng: &mut impl Rng) -> PredictionSet {
    PredictionSet {
        numbers: select_optimal_numbers(&[], rng),
        powerball: rng.random_range(1..=26u8),
        strategy: Strategy::Fallback,
        confidence: FALLBACK_CONFIDENCE,
        rationale: "Données historiques indisponibles : grille aléatoire.".to_string(),
    }
}

/// Réduit un vivier de candidats à 5 numéros distincts triés croissant.
/// Vivier <= 5 : complété par des numéros aléatoires distincts. Vivier
/// plus large : le meilleur candidat (tête de liste) est toujours
/// conservé, le reste est mélangé pour les 4 dernières places.
pub fn select_optimal_numbers(pool: &[u8], rng: &mut impl Rng) -> [u8; 5] {
    let mut chosen: Vec<u8>;
    if pool.len() <= 5 {
        chosen = pool.to_vec();
        while chosen.len() < 5 {
            let n = rng.random_range(1..=69u8);
            if !chosen.contains(&n) {
                chosen.push(n);
            }
        }
    } else {
        let mut rest = pool[1..].to_vec();
        rest.shuffle(rng);
        chosen = vec![pool[0]];
        chosen.extend_from_slice(&rest[..4]);
    }

    chosen.sort();
    let mut numbers = [0u8; 5];
    numbers.copy_from_slice(&chosen);
    numbers
}

/// Powerball : choix uniforme parmi les 5 premiers du classement
/// (variabilité volontaire, même à entrées identiques).
pub fn pick_powerball(powerball_ranking: &[u8], rng: &mut impl Rng) -> u8 {
    let top = &powerball_ranking[..5.min(powerball_ranking.len())];
    top[rng.random_range(0..top.len())]
}

/// confiance = round(75 + 20 × score composite moyen des numéros
/// choisis), bornée dans [75, 99].
pub fn confidence(numbers: &[u8; 5], composite: &[f64]) -> u8 {
    let mean = numbers
        .iter()
        .map(|&n| composite[(n - 1) as usize])
        .sum::<f64>()
        / numbers.len() as f64;
    ((75.0 + 20.0 * mean).round() as i64).clamp(75, 99) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottoiq_core::models::{validate_drawing, Drawing};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::scorers::make_test_drawings;

    fn assert_valid_set(set: &PredictionSet) {
        validate_drawing(&set.numbers, set.powerball)
            .unwrap_or_else(|e| panic!("grille invalide ({}) : {:?}", e, set));
        assert!(set.numbers.windows(2).all(|w| w[0] < w[1]), "non triée : {:?}", set.numbers);
        assert!((60..=99).contains(&set.confidence), "confiance {} hors bornes", set.confidence);
    }

    #[test]
    fn test_generate_five_valid_sets() {
        let predictor = Predictor::new(42);
        let mut rng = StdRng::seed_from_u64(7);
        let sets = predictor.generate(&make_test_drawings(50), &mut rng);
        assert_eq!(sets.len(), 5);
        for set in &sets {
            assert_valid_set(set);
        }
    }

    #[test]
    fn test_generate_one_set_per_strategy() {
        let predictor = Predictor::new(42);
        let mut rng = StdRng::seed_from_u64(7);
        let sets = predictor.generate(&make_test_drawings(50), &mut rng);
        for strategy in [
            Strategy::TopScore,
            Strategy::Balanced,
            Strategy::PairPattern,
            Strategy::Contrarian,
            Strategy::SmartRandom,
        ] {
            assert_eq!(sets.iter().filter(|s| s.strategy == strategy).count(), 1);
        }
    }

    #[test]
    fn test_generate_sorted_by_confidence() {
        let predictor = Predictor::new(42);
        for seed in 0..10u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sets = predictor.generate(&make_test_drawings(50), &mut rng);
            assert!(sets.windows(2).all(|w| w[0].confidence >= w[1].confidence));
        }
    }

    #[test]
    fn test_generate_seeded_reproducible() {
        let predictor = Predictor::new(42);
        let drawings = make_test_drawings(50);
        let a = predictor.generate(&drawings, &mut StdRng::seed_from_u64(123));
        let b = predictor.generate(&drawings, &mut StdRng::seed_from_u64(123));
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.numbers, y.numbers);
            assert_eq!(x.powerball, y.powerball);
            assert_eq!(x.confidence, y.confidence);
        }
    }

    #[test]
    fn test_generate_empty_fallback() {
        let predictor = Predictor::new(42);
        let mut rng = StdRng::seed_from_u64(7);
        let sets = predictor.generate(&[], &mut rng);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].strategy, Strategy::Fallback);
        assert!((50..=55).contains(&sets[0].confidence));
        validate_drawing(&sets[0].numbers, sets[0].powerball).unwrap();
    }

    #[test]
    fn test_balanced_set_covers_zones() {
        let predictor = Predictor::new(42);
        let mut rng = StdRng::seed_from_u64(7);
        let sets = predictor.generate(&make_test_drawings(50), &mut rng);
        let balanced = sets.iter().find(|s| s.strategy == Strategy::Balanced).unwrap();
        assert_eq!(balanced.numbers.iter().filter(|&&n| n <= 23).count(), 2);
        assert_eq!(balanced.numbers.iter().filter(|&&n| (24..=46).contains(&n)).count(), 2);
        assert_eq!(balanced.numbers.iter().filter(|&&n| n >= 47).count(), 1);
    }

    #[test]
    fn test_powerball_from_top_five() {
        let predictor = Predictor::new(42);
        let drawings = make_test_drawings(50);
        let powerball_top: Vec<u8> =
            ranked(&predictor.aggregator().powerball_scores(&drawings))[..5].to_vec();
        for seed in 0..10u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sets = predictor.generate(&drawings, &mut rng);
            for set in sets.iter().filter(|s| s.strategy != Strategy::SmartRandom) {
                assert!(
                    powerball_top.contains(&set.powerball),
                    "powerball {} hors du top 5 {:?}",
                    set.powerball,
                    powerball_top
                );
            }
        }
    }

    #[test]
    fn test_end_to_end_ever_present_vs_absent() {
        // 50 tirages : le 7 sort à chaque fois, le 68 jamais. La grille
        // "score maximal" doit contenir 7 et exclure 68.
        let drawings: Vec<Drawing> = (0..50usize)
            .map(|i| {
                let offset = (i * 4) % 60;
                let fill = |k: usize| 8 + ((offset + k) % 60) as u8; // 8..=67
                Drawing {
                    date: format!("2024-01-{:02}", i % 28 + 1),
                    numbers: [7, fill(0), fill(1), fill(2), fill(3)],
                    powerball: (i % 26) as u8 + 1,
                }
            })
            .collect();
        for d in &drawings {
            validate_drawing(&d.numbers, d.powerball).unwrap();
        }

        let predictor = Predictor::new(42);
        for seed in 0..10u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sets = predictor.generate(&drawings, &mut rng);
            let top = sets.iter().find(|s| s.strategy == Strategy::TopScore).unwrap();
            assert!(top.numbers.contains(&7), "7 absent de {:?}", top.numbers);
            assert!(!top.numbers.contains(&68), "68 présent dans {:?}", top.numbers);
        }
    }

    #[test]
    fn test_select_optimal_numbers_pads_small_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let numbers = select_optimal_numbers(&[10, 20], &mut rng);
        assert!(numbers.contains(&10) && numbers.contains(&20));
        for i in 0..5 {
            assert!((1..=69).contains(&numbers[i]));
            for j in (i + 1)..5 {
                assert_ne!(numbers[i], numbers[j]);
            }
        }
    }

    #[test]
    fn test_select_optimal_numbers_keeps_head() {
        let pool = [42u8, 1, 2, 3, 4, 5, 6, 9];
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let numbers = select_optimal_numbers(&pool, &mut rng);
            assert!(numbers.contains(&42), "tête de vivier perdue : {:?}", numbers);
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_pick_powerball_within_top() {
        let ranking: Vec<u8> = (1..=26).collect();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert!(pick_powerball(&ranking, &mut rng) <= 5);
        }
    }

    #[test]
    fn test_confidence_bounds() {
        let low = vec![0.0; 69];
        let high = vec![1.0; 69];
        assert_eq!(confidence(&[1, 2, 3, 4, 5], &low), 75);
        assert_eq!(confidence(&[1, 2, 3, 4, 5], &high), 95);
    }
}
