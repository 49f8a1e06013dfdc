use serde_json::Value;

use crate::models::{validate_drawing, Drawing};

/// Borne haute sur l'historique retenu, pour borner le coût des
/// algorithmes en aval.
pub const MAX_HISTORY: usize = 2000;

fn field<'a>(raw: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|k| raw.get(k))
}

fn value_to_u8(v: &Value) -> Option<u8> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|x| u8::try_from(x).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Normalise une date "YYYY-MM-DD" ou un timestamp ISO ("...T00:00:00").
fn parse_date(v: &Value) -> Option<String> {
    let s = v.as_str()?.trim();
    let day = s.split('T').next()?;
    let date = chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Forme Socrata (API open-data) : `winning_numbers` est une chaîne
/// unique "nn nn nn nn nn pb", `draw_date` un timestamp ISO.
pub fn from_socrata(raw: &Value) -> Option<Drawing> {
    let date = parse_date(field(raw, &["draw_date", "date"])?)?;
    let joined = field(raw, &["winning_numbers"])?.as_str()?;
    let parts: Vec<u8> = joined
        .split_whitespace()
        .map(|p| p.parse().ok())
        .collect::<Option<Vec<_>>>()?;
    if parts.len() != 6 {
        return None;
    }
    let mut numbers = [0u8; 5];
    numbers.copy_from_slice(&parts[..5]);
    let powerball = parts[5];
    validate_drawing(&numbers, powerball).ok()?;
    Some(Drawing { date, numbers, powerball })
}

/// Forme objet : tableau de 5 numéros + powerball scalaire, sous
/// différents alias de champs selon la source.
pub fn from_object(raw: &Value) -> Option<Drawing> {
    let date = parse_date(field(raw, &["date", "draw_date"])?)?;
    let values = field(raw, &["numbers", "winning_numbers", "white_balls"])?.as_array()?;
    if values.len() != 5 {
        return None;
    }
    let mut numbers = [0u8; 5];
    for (i, v) in values.iter().enumerate() {
        numbers[i] = value_to_u8(v)?;
    }
    let powerball = value_to_u8(field(raw, &["powerball", "pb", "bonus"])?)?;
    validate_drawing(&numbers, powerball).ok()?;
    Some(Drawing { date, numbers, powerball })
}

/// Essaie chaque adaptateur dans l'ordre. `None` pour toute forme
/// inconnue ou invalide.
pub fn normalize_record(raw: &Value) -> Option<Drawing> {
    from_socrata(raw).or_else(|| from_object(raw))
}

/// Filtre les enregistrements bruts en tirages canoniques : les formes
/// invalides sont abandonnées en silence (c'est un filtre, pas un
/// validateur avec rapport). L'ordre d'entrée est préservé (le plus
/// récent en tête, tel que fourni), plafonné à `MAX_HISTORY`.
pub fn normalize_history(raw: &[Value]) -> Vec<Drawing> {
    raw.iter()
        .filter_map(normalize_record)
        .take(MAX_HISTORY)
        .collect()
}
