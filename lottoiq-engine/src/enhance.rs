use anyhow::Result;

use lottoiq_core::models::{validate_drawing, PredictionSet, UserAnalytics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancementLevel {
    Light,
    Standard,
    Deep,
}

/// Ajustement proposé par le service externe. `score` vit dans [0, 1].
#[derive(Debug, Clone)]
pub struct Enhancement {
    pub numbers: [u8; 5],
    pub powerball: u8,
    pub score: f64,
    pub factors: Vec<String>,
}

/// Collaborateur d'enrichissement externe (LLM ou autre). Toute erreur
/// est traitée comme "enrichissement indisponible" : le budget de
/// timeout appartient à l'appelant, le moteur ne bloque jamais.
pub trait EnhancementProvider {
    fn enhance(
        &self,
        set: &PredictionSet,
        analytics: &UserAnalytics,
        level: EnhancementLevel,
    ) -> Result<Enhancement>;
}

/// Fournisseur neutre : enrichissement toujours indisponible.
pub struct NoEnhancement;

impl EnhancementProvider for NoEnhancement {
    fn enhance(
        &self,
        _set: &PredictionSet,
        _analytics: &UserAnalytics,
        _level: EnhancementLevel,
    ) -> Result<Enhancement> {
        anyhow::bail!("enrichissement indisponible")
    }
}

/// Applique l'enrichissement à une grille. Échec du fournisseur ou
/// proposition invalide => grille inchangée. En cas de succès, la
/// confiance est recalculée sur le chemin alternatif :
/// clamp(60, 95, base + score×20 + bonus taux de gain (<= 10)
/// + 5 si la stratégie correspond à la préférence utilisateur).
pub fn apply_enhancement(
    set: &PredictionSet,
    provider: &dyn EnhancementProvider,
    analytics: &UserAnalytics,
    level: EnhancementLevel,
) -> PredictionSet {
    let enhancement = match provider.enhance(set, analytics, level) {
        Ok(e) => e,
        Err(_) => return set.clone(),
    };

    let mut enhanced = set.clone();
    if validate_drawing(&enhancement.numbers, enhancement.powerball).is_ok() {
        enhanced.numbers = enhancement.numbers;
        enhanced.numbers.sort();
        enhanced.powerball = enhancement.powerball;
    }

    let win_rate_bonus = ((analytics.win_rate * 10.0).round() as i64).clamp(0, 10);
    let preference_bonus = match analytics.preferred_strategy {
        Some(preferred) if preferred == set.strategy => 5,
        _ => 0,
    };
    let adjusted = set.confidence as i64
        + (enhancement.score.clamp(0.0, 1.0) * 20.0).round() as i64
        + win_rate_bonus
        + preference_bonus;
    enhanced.confidence = adjusted.clamp(60, 95) as u8;

    enhanced
}
