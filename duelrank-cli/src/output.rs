/// Output formatting: terminal rankings table and JSON.
use duelrank_core::RankedItem;
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedItem {
    rank: usize,
    item: String,
    rating: f64,
}

#[derive(Serialize)]
struct JsonOutput {
    segment: String,
    context: String,
    items: Vec<JsonRankedItem>,
    total_votes: usize,
}

/// Print a rankings table for one (segment, context) bucket.
pub fn print_table(rows: &[RankedItem], segment_label: &str, question: &str) {
    // Find the widest item name for padding
    let name_width = rows
        .iter()
        .map(|r| r.item.len())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    println!("{segment_label}");
    println!("{question}");
    println!(" # | {:<name_width$} |  Rating", "Item");
    println!("---|-{}-|--------", "-".repeat(name_width));

    for (i, r) in rows.iter().enumerate() {
        println!("{:>2} | {:<name_width$} | {:>7.1}", i + 1, r.item, r.rating);
    }
}

/// Print rankings as JSON.
pub fn print_json(rows: &[RankedItem], segment: &str, context: &str, total_votes: usize) {
    let items: Vec<JsonRankedItem> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| JsonRankedItem {
            rank: i + 1,
            item: r.item.clone(),
            rating: r.rating,
        })
        .collect();

    let output = JsonOutput {
        segment: segment.to_string(),
        context: context.to_string(),
        items,
        total_votes,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
