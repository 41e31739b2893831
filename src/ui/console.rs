use std::io::{self, Write};

use crate::game::{
    controller::{ContinuePrompt, GameController, RenderSink, TriviaSource},
    models::{Category, GameOutcome, GameSnapshot, Phase},
};

/// Terminal renderer: snapshots in, printed views out. Keeps the answer
/// order of the question it last displayed so the input loop can map a
/// typed number back to an answer string.
pub struct ConsoleUi {
    last_answers: Vec<String>,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self {
            last_answers: vec![],
        }
    }

    pub fn last_answers(&self) -> &[String] {
        &self.last_answers
    }

    fn render_scoreboard(&self, snapshot: &GameSnapshot) {
        let [p1, p2] = &snapshot.players;
        println!();
        println!(
            "{}: {} | {}: {}",
            sanitize(&p1.name),
            p1.score,
            sanitize(&p2.name),
            p2.score
        );
    }

    fn render_categories(&self, snapshot: &GameSnapshot) {
        self.render_scoreboard(snapshot);
        println!("Pick a category:");
        for (num, category) in snapshot.available_categories.iter().enumerate() {
            println!("  {}. {}", num + 1, sanitize(&category.name));
        }
    }

    fn render_question(&mut self, snapshot: &GameSnapshot) {
        // The post-answer snapshot carries the same question; the reveal
        // is printed by the input loop, so skip a misleading reshuffle
        if !snapshot.answering {
            return;
        }
        let Some(question) = &snapshot.question else {
            return;
        };

        self.render_scoreboard(snapshot);
        if let Some(number) = snapshot.question_number {
            println!(
                "Question {} of {} - {}",
                number,
                snapshot.question_count,
                sanitize(&snapshot.current_category)
            );
        }

        let player = &snapshot.players[snapshot.current_player];
        println!("{}'s turn ({})", sanitize(&player.name), question.difficulty);
        println!("{}", sanitize(&question.text));

        self.last_answers = question.shuffled_answers(&mut rand::rng());
        for (num, answer) in self.last_answers.iter().enumerate() {
            println!("  {}. {}", num + 1, sanitize(answer));
        }
    }

    fn render_standings(&self, snapshot: &GameSnapshot) {
        self.render_scoreboard(snapshot);
        match snapshot.outcome {
            Some(GameOutcome::Winner(index)) => {
                println!("{} wins!", sanitize(&snapshot.players[index].name));
            }
            Some(GameOutcome::Tie) => println!("It's a tie!"),
            None => {}
        }
    }
}

impl RenderSink for ConsoleUi {
    fn render(&mut self, snapshot: &GameSnapshot) {
        // A recorded fetch failure replaces the normal view with the
        // retry affordance
        if let Some(message) = &snapshot.last_error {
            println!();
            println!("{}. Please check your connection.", sanitize(message));
            return;
        }

        match snapshot.phase {
            Phase::Setup => {}
            Phase::Category => self.render_categories(snapshot),
            Phase::Playing => self.render_question(snapshot),
            Phase::Finished => self.render_standings(snapshot),
        }
    }
}

impl ContinuePrompt for ConsoleUi {
    fn confirm_continue(&mut self, category_name: &str) -> bool {
        println!();
        println!(
            "Category \"{}\" completed!",
            sanitize(&prettify_category(category_name))
        );

        matches!(read_line("Play another category? (y/n): "), Ok(line) if line.eq_ignore_ascii_case("y"))
    }
}

/// Drives the whole game from stdin until the players quit.
pub async fn run<S: TriviaSource>(
    controller: &mut GameController<S, ConsoleUi>,
) -> io::Result<()> {
    println!("=== Trivia Duel ===");

    loop {
        match controller.session().phase() {
            Phase::Setup => {
                let name1 = read_line("Player 1 name: ")?;
                let name2 = read_line("Player 2 name: ")?;
                if let Err(e) = controller.start(&name1, &name2).await {
                    println!("{e}");
                    if controller.can_retry() && !offer_retry(controller).await? {
                        continue;
                    }
                }
            }
            Phase::Category => {
                let available: Vec<Category> =
                    controller.session().available_categories().cloned().collect();
                if available.is_empty() {
                    println!("No categories available.");
                    break;
                }

                let choice = read_line("Category number (or q to quit): ")?;
                if choice.eq_ignore_ascii_case("q") {
                    break;
                }
                let selected = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|num| num.checked_sub(1))
                    .and_then(|index| available.get(index));
                let Some(category) = selected else {
                    println!("Pick a number between 1 and {}", available.len());
                    continue;
                };

                if let Err(e) = controller.select_category(&category.id, &category.name).await {
                    println!("{e}");
                    if controller.can_retry() {
                        offer_retry(controller).await?;
                    }
                }
            }
            Phase::Playing => {
                let count = controller.ui().last_answers().len();
                let choice = read_line("Your answer: ")?;
                let selected = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|num| num.checked_sub(1))
                    .and_then(|index| controller.ui().last_answers().get(index))
                    .cloned();
                let Some(answer) = selected else {
                    println!("Pick a number between 1 and {}", count);
                    continue;
                };

                match controller.submit_answer(&answer) {
                    Ok(outcome) => {
                        if outcome.correct {
                            println!("Correct! +{} points", outcome.points_awarded);
                        } else {
                            println!(
                                "Wrong! The answer was: {}",
                                sanitize(&outcome.correct_answer)
                            );
                        }
                        if let Err(e) = controller.advance() {
                            println!("{e}");
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Phase::Finished => {
                let answer = read_line("Play again? (y/n): ")?;
                if answer.eq_ignore_ascii_case("y") {
                    controller.restart();
                } else {
                    println!("Thanks for playing!");
                    break;
                }
            }
        }
    }

    Ok(())
}

async fn offer_retry<S: TriviaSource>(
    controller: &mut GameController<S, ConsoleUi>,
) -> io::Result<bool> {
    loop {
        let answer = read_line("Retry? (y/n): ")?;
        if !answer.eq_ignore_ascii_case("y") {
            return Ok(false);
        }

        match controller.retry_last_fetch().await {
            Ok(()) => return Ok(true),
            Err(e) => println!("{e}"),
        }
    }
}

/// Strips control characters from untrusted API text before it reaches
/// the terminal. Escape sequences in a category or answer string must
/// never drive the terminal.
pub(crate) fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Category ids read like `science_and_nature`; prettify for prompts.
pub(crate) fn prettify_category(name: &str) -> String {
    name.replace('_', " ")
        .replace(',', ", ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    Ok(line.trim().to_string())
}
