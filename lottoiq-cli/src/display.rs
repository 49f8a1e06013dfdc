use comfy_table::{presets, ContentArrangement, Table};

use lottoiq_core::models::{Drawing, PredictionSet};
use lottoiq_engine::ensemble::NumberBreakdown;

fn base_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

pub fn display_history(drawings: &[Drawing]) {
    let mut table = base_table(vec!["Date", "Numéros", "Powerball"]);
    for drawing in drawings {
        let mut sorted = drawing.numbers;
        sorted.sort();
        let numbers = sorted
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        table.add_row(vec![drawing.date.clone(), numbers, format!("{:2}", drawing.powerball)]);
    }
    println!("{table}");
}

pub fn display_scores(breakdown: &[NumberBreakdown], top: usize) {
    let mut sorted: Vec<&NumberBreakdown> = breakdown.iter().collect();
    sorted.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.number.cmp(&b.number))
    });

    let mut table = base_table(vec!["Numéro", "Composite", "EWMA", "Paires", "Retards", "Réseau"]);
    for entry in sorted.iter().take(top) {
        table.add_row(vec![
            format!("{:2}", entry.number),
            format!("{:.4}", entry.composite),
            format!("{:.3}", entry.ewma),
            format!("{:.3}", entry.pairs),
            format!("{:.3}", entry.gaps),
            format!("{:.3}", entry.network),
        ]);
    }
    println!("── Classement composite ──");
    println!("{table}");
}

pub fn display_sets(sets: &[PredictionSet]) {
    let mut table = base_table(vec!["Stratégie", "Numéros", "PB", "Confiance", "Justification"]);
    for set in sets {
        let numbers = set
            .numbers
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        table.add_row(vec![
            set.strategy.to_string(),
            numbers,
            format!("{:2}", set.powerball),
            format!("{} %", set.confidence),
            set.rationale.clone(),
        ]);
    }
    println!("── Grilles proposées ──");
    println!("{table}");
}
