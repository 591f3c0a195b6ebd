//! Display functions for the line mode and command results

use super::formatters::{create_progress_bar, format_clock, grid_columns};
use crate::commands::SimulationResult;
use crate::view::HeadlessView;
use colored::Colorize;

/// Print the card grid, numbering cards from 1 in placement order
pub fn print_board(view: &HeadlessView, cheat: bool) {
    let placed = view.placed();
    let columns = grid_columns(placed.len());

    println!();
    for (row_index, row) in placed.chunks(columns).enumerate() {
        let mut line = String::from("  ");
        for (column, &element) in row.iter().enumerate() {
            let number = row_index * columns + column + 1;
            let Some(card) = view.element(element) else {
                continue;
            };

            let label = format!("{number:>2}");
            let cell = if card.solved {
                format!("{} {}", label.bright_black(), card.text.green())
            } else if card.face_up {
                format!("{} {}", label.bright_white().bold(), card.text.bright_yellow().bold())
            } else if cheat {
                format!("{} {}", label.cyan(), card.text.dimmed())
            } else {
                format!("{} {}", label.cyan(), "▒▒".bright_black())
            };
            line.push_str(&cell);
            line.push_str("   ");
        }
        println!("{line}");
    }
    println!();
}

/// Print the elapsed-time line
pub fn print_timer(seconds: u64, solved_pairs: usize, pair_count: usize) {
    let bar = create_progress_bar(solved_pairs as f64, pair_count as f64, 20);
    println!(
        "  ⏱  {}   [{}] {solved_pairs}/{pair_count} pairs",
        format_clock(seconds).bright_cyan().bold(),
        bar.green()
    );
}

/// Print the end-of-round celebration
pub fn print_applause(seconds: u64, clicks: u32, mismatches: u32) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    println!(
        "{}",
        "        👏 👏 👏   A L L   P A I R S   F O U N D !   👏 👏 👏"
            .bright_green()
            .bold()
    );
    println!("{}", "═".repeat(60).bright_cyan());
    println!(
        "\n  Time:       {}",
        format_clock(seconds).bright_yellow().bold()
    );
    println!("  Clicks:     {clicks}");
    println!("  Mismatches: {mismatches}\n");
}

/// Print the result of a simulation
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n🤖 {}", "Setup:".bright_cyan().bold());
    println!("   Bot:              {}", result.bot.name());
    println!("   Pairs per round:  {}", result.pair_count);
    println!("   Rounds played:    {}", result.rounds.len());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!(
        "   Average clicks:   {}",
        format!("{:.2}", result.average_clicks).bright_yellow().bold()
    );
    println!(
        "   Fewest clicks:    {}",
        format!("{}", result.min_clicks).green()
    );
    println!(
        "   Most clicks:      {}",
        format!("{}", result.max_clicks).yellow()
    );
    println!(
        "   Average time:     {}",
        format_clock(result.average_seconds.round() as u64)
    );
    println!(
        "   Flawless rounds:  {}/{}",
        result.flawless_rounds,
        result.rounds.len()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());

    if result.rounds.is_empty() {
        return;
    }

    println!("\n📈 {}", "Clicks per round:".bright_cyan().bold());
    let widest = f64::from(result.max_clicks.max(1));
    for (i, round) in result.rounds.iter().enumerate().take(20) {
        let bar = create_progress_bar(f64::from(round.clicks), widest, 40);
        println!("   {:>3}: {} {:4}", i + 1, bar.green(), round.clicks);
    }
}
