//! Simple interactive CLI mode
//!
//! Text-based game without TUI. Timers run on the wall clock and fire
//! whenever the prompt comes back, so a mismatched card hides on the next
//! line of input after its delay has passed.

use crate::config::GameConfig;
use crate::core::Deck;
use crate::game::{MonotonicClock, Session, TimerQueue};
use crate::output::{print_applause, print_board, print_timer};
use crate::view::HeadlessView;
use anyhow::{Context, Result};
use std::io::{self, Write};

/// Line-mode game state
struct LineGame {
    session: Session,
    view: HeadlessView,
    timers: TimerQueue,
    clock: MonotonicClock,
    cheat: bool,
}

impl LineGame {
    fn sync_timers(&mut self) {
        self.timers.advance_to(self.clock.now());
        self.session.dispatch_due(&mut self.timers, &mut self.view);
    }

    fn start(&mut self) -> Result<()> {
        self.timers.advance_to(self.clock.now());
        self.session
            .start(&mut self.view, &mut self.timers)
            .context("failed to deal a new round")
    }

    fn show(&self) {
        print_board(&self.view, self.cheat);
        if let Some(round) = self.session.round() {
            print_timer(
                self.view.timer_seconds(),
                round.solved_pairs(),
                round.pair_count(),
            );
        }
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if the configuration does not fit the deck or there's
/// an I/O error reading user input.
pub fn run_simple(config: GameConfig, deck: Deck) -> Result<()> {
    let cheat = config.cheat;
    let session = Session::new(config, deck)?;
    let mut game = LineGame {
        session,
        view: HeadlessView::new(),
        timers: TimerQueue::new(),
        clock: MonotonicClock::start(),
        cheat,
    };

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Memory Match - Line Mode                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Turn cards over two at a time and find every pair.");
    println!("A card that does not match flips back after a short delay.\n");
    println!("Commands: card number to flip, 'new' for a new round,");
    println!("          'cheat' to peek at every face, 'quit' to exit\n");

    game.start()?;

    loop {
        game.sync_timers();
        game.show();

        let input = get_user_input("Card")?.to_lowercase();
        // Time passes while waiting for input
        game.sync_timers();

        match input.as_str() {
            "quit" | "q" | "exit" => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            "new" | "n" => {
                game.start()?;
                println!("\n🔄 New round started!\n");
                continue;
            }
            "cheat" | "c" => {
                game.cheat = !game.cheat;
                println!(
                    "Cheat mode {}",
                    if game.cheat { "enabled" } else { "disabled" }
                );
                continue;
            }
            "" => continue,
            _ => {}
        }

        let Ok(number) = input.parse::<usize>() else {
            println!("❌ Enter a card number, 'new', 'cheat' or 'quit'\n");
            continue;
        };
        let Some(element) = number.checked_sub(1).and_then(|i| game.view.element_at(i)) else {
            println!("❌ No card {number} on the table\n");
            continue;
        };

        game.session.click(element, &mut game.view, &mut game.timers);

        if game.view.applause_visible() {
            game.show();
            let (clicks, mismatches) = game
                .session
                .round()
                .map_or((0, 0), |round| (round.clicks(), round.mismatches()));
            print_applause(game.view.timer_seconds(), clicks, mismatches);

            match get_user_input("Play again? (yes/no)")?
                .to_lowercase()
                .as_str()
            {
                "yes" | "y" => {
                    game.start()?;
                    println!("\n🔄 New round started!\n");
                }
                _ => {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
            }
        }
    }
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        // EOF behaves like quit
        return Ok("quit".to_string());
    }

    Ok(input.trim().to_string())
}
