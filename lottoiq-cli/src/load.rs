use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use lottoiq_core::convert::{normalize_history, MAX_HISTORY};
use lottoiq_core::models::{validate_drawing, Drawing};

/// Charge un fichier de tirages, JSON ou CSV selon l'extension. Les
/// enregistrements invalides sont abandonnés en silence, comme dans le
/// convertisseur : seul un fichier illisible est une erreur.
pub fn load_drawings(path: &Path) -> Result<Vec<Drawing>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        _ => bail!("Format non reconnu (attendu .json ou .csv) : {:?}", path),
    }
}

fn load_json(path: &Path) -> Result<Vec<Drawing>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let raw: Vec<Value> = serde_json::from_str(&text)
        .with_context(|| format!("JSON invalide (tableau attendu) : {:?}", path))?;
    Ok(normalize_history(&raw))
}

/// Lignes `date;n1;n2;n3;n4;n5;powerball`.
fn load_csv(path: &Path) -> Result<Vec<Drawing>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let mut drawings = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        if let Some(drawing) = parse_csv_record(&record) {
            drawings.push(drawing);
        }
        if drawings.len() >= MAX_HISTORY {
            break;
        }
    }
    Ok(drawings)
}

fn parse_csv_record(record: &csv::StringRecord) -> Option<Drawing> {
    if record.len() < 7 {
        return None;
    }
    let date = record.get(0)?.trim().to_string();
    let mut numbers = [0u8; 5];
    for (i, slot) in numbers.iter_mut().enumerate() {
        *slot = record.get(i + 1)?.trim().parse().ok()?;
    }
    let powerball: u8 = record.get(6)?.trim().parse().ok()?;
    validate_drawing(&numbers, powerball).ok()?;
    Some(Drawing { date, numbers, powerball })
}
