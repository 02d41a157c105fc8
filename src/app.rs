//! Terminal host: drives a study session from line input and prints reports.
use flashcards_app::models::{Clock, Deck, MasteryLevel, SessionStatus, StudySession};
use flashcards_app::{Flashcard, Rating, ReviewStore, StudyReport};
use std::io::{self, BufRead, Write};

/// How an interactive pass ended.
#[derive(Debug, PartialEq, Eq)]
pub enum PassEnd {
    Completed { reviewed: usize },
    Quit { reviewed: usize },
}

enum Command {
    Quit,
    Restart,
    Continue,
}

fn parse_rating(input: &str) -> Option<Rating> {
    match input {
        "0" | "a" | "again" => Some(Rating::Fail),
        "2" | "h" | "hard" => Some(Rating::Hard),
        "4" | "g" | "good" => Some(Rating::Good),
        "5" | "e" | "easy" => Some(Rating::Easy),
        _ => None,
    }
}

fn read_command(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

fn control(line: &str) -> Command {
    match line {
        "q" | "quit" => Command::Quit,
        "r" | "restart" => Command::Restart,
        _ => Command::Continue,
    }
}

/// Runs the session until it completes or the user quits (or input ends).
pub fn run_pass<S, C>(
    session: &mut StudySession<Flashcard, S, C>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> eyre::Result<PassEnd>
where
    S: ReviewStore,
    C: Clock,
{
    if session.is_completed() {
        writeln!(out, "All caught up! No cards to review.")?;
        return Ok(PassEnd::Completed { reviewed: 0 });
    }

    loop {
        let Some(card) = session.current_card().cloned() else {
            let reviewed = session.reviewed_count();
            writeln!(out, "Session complete: {reviewed} reviews.")?;
            return Ok(PassEnd::Completed { reviewed });
        };

        writeln!(out)?;
        writeln!(
            out,
            "[{}/{}] {} · {}",
            session.position() + 1,
            session.total_cards(),
            card.case,
            card.category
        )?;
        writeln!(out, "Q: {}", card.question)?;
        write!(out, "(Enter to reveal, r restart, q quit) ")?;
        out.flush()?;

        let Some(line) = read_command(input)? else {
            return Ok(PassEnd::Quit {
                reviewed: session.reviewed_count(),
            });
        };
        match control(&line) {
            Command::Quit => {
                return Ok(PassEnd::Quit {
                    reviewed: session.reviewed_count(),
                });
            }
            Command::Restart => {
                session.restart();
                continue;
            }
            Command::Continue => {}
        }

        session.reveal()?;
        writeln!(out, "A: {}", card.answer)?;
        if !card.explanation.is_empty() {
            writeln!(out, "   {}", card.explanation)?;
        }

        let rating = loop {
            let labels: Vec<String> = Rating::ALL
                .iter()
                .map(|r| format!("{} {}", r.quality(), r.label()))
                .collect();
            write!(out, "Rate [{}]: ", labels.join(", "))?;
            out.flush()?;

            let Some(line) = read_command(input)? else {
                return Ok(PassEnd::Quit {
                reviewed: session.reviewed_count(),
            });
            };
            if let Command::Quit = control(&line) {
                return Ok(PassEnd::Quit {
                reviewed: session.reviewed_count(),
            });
            }
            match parse_rating(&line) {
                Some(rating) => break rating,
                None => writeln!(out, "Unknown rating '{line}'")?,
            }
        };

        let outcome = session.rate(rating)?;
        if outcome.requeued {
            writeln!(out, "Again: this card will come back before the end of the pass.")?;
        } else {
            writeln!(
                out,
                "Next review in {} day(s), on {}.",
                outcome.state.interval, outcome.state.next_review_date
            )?;
        }

        if session.status() == SessionStatus::Completed {
            let reviewed = session.reviewed_count();
            writeln!(out, "Session complete: {reviewed} reviews.")?;
            return Ok(PassEnd::Completed { reviewed });
        }
    }
}

pub fn print_report(report: &StudyReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Cards due today: {}", report.due_count)?;
    writeln!(out, "Day streak: {}", report.streak_days)?;
    writeln!(out)?;
    writeln!(out, "Mastery ({} cards)", report.total_cards)?;
    for level in MasteryLevel::ALL {
        writeln!(out, "  {:<9} {}", level.label(), report.mastery.count(level))?;
    }
    writeln!(out)?;
    writeln!(out, "By case")?;
    for case in &report.by_case {
        writeln!(out, "  {:<24} {}/{}", case.case, case.studied, case.total)?;
    }
    Ok(())
}

pub fn print_catalog(deck: &Deck, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Deck '{}' ({} cards)", deck.name, deck.flashcards.len())?;
    writeln!(out, "Cases:")?;
    for case in deck.cases() {
        writeln!(out, "  {} ({} cards)", case, deck.filter_by_case(&case).len())?;
    }
    writeln!(out, "Categories:")?;
    for category in deck.categories() {
        writeln!(out, "  {} ({} cards)", category, deck.filter_by_category(&category).len())?;
    }
    Ok(())
}
