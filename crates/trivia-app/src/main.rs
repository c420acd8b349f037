//! Terminal front end.
//!
//! Thin by design: it renders session snapshots and forwards input and
//! timer events to the service. No quiz logic lives here.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use trivia_app::config::Config;
use trivia_app::ledger::ScoreLedger;
use trivia_app::logging;
use trivia_app::service::QuizService;
use trivia_app::source::{OpenTriviaClient, QuestionSource};
use trivia_app::timer::TimerEvent;
use trivia_core::session::QuizPhase;
use trivia_core::types::Difficulty;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let source = OpenTriviaClient::new(config.api_url.clone(), config.http_timeout);
    let ledger = ScoreLedger::new(&config.data_dir);
    let (mut service, mut events) = QuizService::new(source, ledger);

    print_welcome(&service);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(input)) => {
                        if !handle_input(&mut service, input.trim()).await {
                            break;
                        }
                    }
                    _ => break,
                }
            }
            Some(event) = events.recv() => {
                handle_timer_event(&mut service, event);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    println!("Thanks for playing!");
}

fn print_welcome<S: QuestionSource>(service: &QuizService<S>) {
    println!();
    println!("=== Trivia Quiz ===");
    print_high_scores(service);
    println!("Type a difficulty to start: easy | medium | hard");
    println!("Commands: 1-9 answer, n next, p previous, f finish, scores, reset, quit");
}

fn print_high_scores<S: QuestionSource>(service: &QuizService<S>) {
    let scores = service.high_scores();
    if scores.is_empty() {
        println!("No high scores yet.");
    } else {
        println!("High scores:");
        for (rank, entry) in scores.iter().enumerate() {
            println!(
                "  {}. {}/{} ({}) on {}",
                rank + 1,
                entry.score,
                entry.total_questions,
                entry.difficulty,
                entry.date
            );
        }
    }
}

fn print_question<S: QuestionSource>(service: &QuizService<S>) {
    let session = service.session();
    let (Some(index), Some(question)) = (session.current_index(), session.current_question())
    else {
        return;
    };

    println!();
    println!(
        "Question {}/{} [{}s]",
        index + 1,
        session.questions().len(),
        session.time_left()
    );
    println!("{}", question.text);
    for (number, option) in question.options.iter().enumerate() {
        let marker = if session.current_answer() == Some(option.as_str()) {
            "*"
        } else {
            " "
        };
        println!("  {}{}) {}", marker, number + 1, option);
    }
}

fn print_results<S: QuestionSource>(service: &QuizService<S>) {
    let session = service.session();
    println!();
    println!(
        "Finished! Score: {}/{}",
        session.score().unwrap_or(0),
        session.questions().len()
    );
    print_high_scores(service);
    println!("Type a difficulty to play again, or quit.");
}

async fn handle_input<S: QuestionSource>(service: &mut QuizService<S>, input: &str) -> bool {
    match input {
        "" => {}
        "q" | "quit" | "exit" => return false,
        "scores" => print_high_scores(service),
        "reset" => {
            if service.reset().is_ok() {
                print_welcome(service);
            }
        }
        "n" | "next" => {
            if service.next().is_ok() {
                print_question(service);
            }
        }
        "p" | "previous" => {
            if service.previous().is_ok() {
                print_question(service);
            }
        }
        "f" | "finish" => match service.finish() {
            Ok(()) => print_results(service),
            Err(_) => println!("Nothing to finish yet."),
        },
        _ => {
            if let Ok(difficulty) = input.parse::<Difficulty>() {
                start_quiz(service, difficulty).await;
            } else if let Ok(number) = input.parse::<usize>() {
                select_option(service, number);
            } else {
                println!("Unknown command '{input}'.");
            }
        }
    }
    true
}

async fn start_quiz<S: QuestionSource>(service: &mut QuizService<S>, difficulty: Difficulty) {
    println!("Loading {difficulty} questions...");
    if let Err(err) = service.start(difficulty).await {
        warn!(error = %err, "start rejected");
        return;
    }

    match service.session().phase() {
        QuizPhase::InProgress => print_question(service),
        _ => {
            if let Some(message) = service.session().error() {
                println!("{message}");
            }
        }
    }
}

fn select_option<S: QuestionSource>(service: &mut QuizService<S>, number: usize) {
    let Some(option) = service
        .session()
        .current_question()
        .and_then(|q| q.options.get(number.wrapping_sub(1)))
        .cloned()
    else {
        println!("No such option.");
        return;
    };

    if service.select_answer(option).is_ok() {
        print_question(service);
        if service.session().is_last_question() {
            println!("(last question — type f to finish)");
        }
    }
}

fn handle_timer_event<S: QuestionSource>(service: &mut QuizService<S>, event: TimerEvent) {
    let before = service.session().current_index();

    if let Err(err) = service.handle_timer_event(event) {
        warn!(error = %err, "timer event rejected");
        return;
    }

    let session = service.session();
    match session.phase() {
        QuizPhase::Completed if matches!(event, TimerEvent::Expired { .. }) => {
            println!("\nTime is up on the last question.");
            print_results(service);
        }
        QuizPhase::InProgress => {
            if session.current_index() != before {
                println!("\nTime is up, moving on.");
                print_question(service);
            } else if matches!(session.time_left(), 10 | 5) {
                println!("[{}s left]", session.time_left());
            }
        }
        _ => {}
    }
}
