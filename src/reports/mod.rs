use crate::cmd::simulate::SimulationReport;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use mapguessr::catalog::{Question, QuestionPrompt};
use mapguessr::leaderboard::LeaderboardEntry;
use mapguessr::scorer::Accuracy;
use mapguessr::session::{RoundResult, Summary};

fn label_color(label: Accuracy) -> Color {
    match label {
        Accuracy::Perfect | Accuracy::Correct => Color::Green,
        Accuracy::VeryClose | Accuracy::GoodGuess => Color::Cyan,
        Accuracy::OffABit => Color::Yellow,
        Accuracy::WayOff | Accuracy::Wrong | Accuracy::NoGuess => Color::Red,
    }
}

fn format_distance(distance_m: Option<f64>) -> String {
    match distance_m {
        None => "-".to_string(),
        Some(d) if d < 1000.0 => format!("{:.0} m", d),
        Some(d) => format!("{:.2} km", d / 1000.0),
    }
}

pub fn print_prompt(prompt: &QuestionPrompt) {
    println!(
        "\n📍 Round {}/{}: {}",
        prompt.round,
        prompt.round_count,
        prompt.text()
    );
    if !prompt.image.is_empty() {
        println!("   🖼️  {}", prompt.image);
    }
}

pub fn print_round_result(result: &RoundResult) {
    let guess = result
        .guess
        .map(|g| g.to_string())
        .unwrap_or_else(|| "none".to_string());
    println!(
        "   {} | {} | +{} pts (base {}, streak {} bonus {}) | guess {} target {}",
        result.label,
        format_distance(result.distance_m),
        result.total_points,
        result.base_points,
        result.streak,
        result.streak_bonus,
        guess,
        result.target
    );
}

pub fn print_rounds(rounds: &[RoundResult]) {
    if rounds.is_empty() {
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Answer").add_attribute(Attribute::Bold),
        Cell::new("Distance"),
        Cell::new("Result"),
        Cell::new("Base"),
        Cell::new("Streak"),
        Cell::new("Bonus").fg(Color::Green),
        Cell::new("Points").fg(Color::Cyan),
    ]);

    for (i, align) in [(0, CellAlignment::Right), (2, CellAlignment::Right)] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(align);
        }
    }
    for i in 4..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in rounds {
        table.add_row(vec![
            Cell::new(r.round),
            Cell::new(&r.answer).add_attribute(Attribute::Bold),
            Cell::new(format_distance(r.distance_m)),
            Cell::new(r.label).fg(label_color(r.label)),
            Cell::new(r.base_points),
            Cell::new(r.streak),
            Cell::new(r.streak_bonus).fg(Color::Green),
            Cell::new(r.total_points).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_summary(summary: &Summary) {
    println!("\n🏁 === GAME OVER === 🏁");
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Total Points").add_attribute(Attribute::Bold),
        Cell::new(summary.total_points).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Correct"),
        Cell::new(format!("{} / {}", summary.correct_rounds, summary.round_count)),
    ]);
    table.add_row(vec![
        Cell::new("Total Distance"),
        Cell::new(format!("{:.2} km", summary.total_distance_km())),
    ]);
    table.add_row(vec![Cell::new("Best Streak"), Cell::new(summary.best_streak)]);
    println!("{}", table);
    println!("{}", summary.describe());
}

pub fn print_leaderboard(entries: &[LeaderboardEntry]) {
    println!("\n🏆 Leaderboard");
    if entries.is_empty() {
        println!("   (no entries yet)");
        return;
    }
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Points").fg(Color::Cyan),
        Cell::new("Correct"),
        Cell::new("Distance"),
    ]);
    for i in [0, 2, 3, 4] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    for (i, e) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&e.name),
            Cell::new(e.points).fg(Color::Cyan),
            Cell::new(e.correct),
            Cell::new(format!("{:.2} km", e.distance_km)),
        ]);
    }
    println!("{}", table);
}

pub fn print_simulation_report(report: &SimulationReport) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Games").add_attribute(Attribute::Bold),
        Cell::new(report.games),
    ]);
    table.add_row(vec![
        Cell::new("Mean Points"),
        Cell::new(format!("{:.1}", report.mean_points)).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Min / Max"),
        Cell::new(format!("{} / {}", report.min_points, report.max_points)),
    ]);
    table.add_row(vec![
        Cell::new("Mean Distance"),
        Cell::new(format!("{:.2} km", report.mean_distance_km)),
    ]);
    table.add_row(vec![
        Cell::new("Mean Best Streak"),
        Cell::new(format!("{:.2}", report.mean_best_streak)),
    ]);
    println!("\n{}", table);

    if report.labels.is_empty() {
        return;
    }
    let total: usize = report.labels.iter().map(|(_, n)| n).sum();
    let mut labels = Table::new();
    labels.load_preset(ASCII_FULL);
    labels.add_row(vec![
        Cell::new("Result").add_attribute(Attribute::Bold),
        Cell::new("Rounds"),
        Cell::new("Share"),
    ]);
    for (label, n) in &report.labels {
        labels.add_row(vec![
            Cell::new(label).fg(label_color(*label)),
            Cell::new(n),
            Cell::new(format!("{:.1}%", *n as f64 / total as f64 * 100.0)),
        ]);
    }
    println!("{}", labels);
}

pub fn print_catalog(catalog: &[Question]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Answer").add_attribute(Attribute::Bold),
        Cell::new("Image"),
        Cell::new("Kind"),
    ]);
    for (i, q) in catalog.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&q.answer),
            Cell::new(if q.image.is_empty() { "-" } else { q.image.as_str() }),
            Cell::new(q.coordinate.kind()),
        ]);
    }
    println!("\n{}", table);
}
