use trivia_core::question::RawQuestion;
use trivia_core::session::{QuizAction, QuizSession};
use trivia_core::types::Difficulty;

/// A raw batch whose correct answers are `right-0` .. `right-{n-1}`.
pub fn raw_batch(n: usize) -> Vec<RawQuestion> {
    (0..n)
        .map(|i| RawQuestion {
            category: Some("General Knowledge".to_string()),
            question_type: Some("multiple".to_string()),
            difficulty: Some("easy".to_string()),
            question: format!("Question {i}?"),
            correct_answer: format!("right-{i}"),
            incorrect_answers: vec!["wrong-a".to_string(), "wrong-b".to_string(), "wrong-c".to_string()],
        })
        .collect()
}

/// A completed session over `total` questions with exactly `correct` right
/// answers.
pub fn completed_session(correct: usize, total: usize, difficulty: Difficulty) -> QuizSession {
    let mut session = QuizSession::new();
    session.apply(QuizAction::Start { difficulty }).unwrap();

    let mut rng = rand::thread_rng();
    let questions = trivia_core::question::normalize_questions(raw_batch(total), &mut rng);
    session
        .apply(QuizAction::QuestionsLoaded { questions })
        .unwrap();

    for i in 0..total {
        if i < correct {
            let answer = session.questions()[i].answer.clone();
            session.apply(QuizAction::SelectAnswer { answer }).unwrap();
        }
        if i + 1 < total {
            session.apply(QuizAction::Next).unwrap();
        }
    }

    session.apply(QuizAction::Finish).unwrap();
    session
}
