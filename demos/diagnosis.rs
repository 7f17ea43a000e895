//! Diagnosis example: play a business-type diagnosis step by step
//!
//! This example demonstrates:
//! - Building a diagnosis document
//! - Driving a session one answer at a time
//! - Reading the outcome and its breakdown

use quizcore::*;

fn main() -> Result<(), QuizError> {
    let doc = QuizDocument::builder(Mode::Diagnosis)
        .title("Which business type are you?")
        .question("A customer calls with a complaint. You...", |q| {
            q.option("Offer an upgrade", ScoreVector::of(TypeLabel::A, 2))
                .option("Fix the root cause", ScoreVector::of(TypeLabel::B, 2))
                .option("Listen for an hour", ScoreVector::of(TypeLabel::C, 2))
        })
        .question("Your ideal Monday starts with...", |q| {
            q.option("Pipeline review", ScoreVector::of(TypeLabel::A, 1))
                .option("Deep work", ScoreVector::of(TypeLabel::B, 1))
                .option("Team breakfast", ScoreVector::of(TypeLabel::C, 1))
        })
        .question("Pick a metric", |q| {
            q.option("Revenue", ScoreVector::new(2, 0, 0))
                .option("Uptime", ScoreVector::new(0, 2, 0))
                .option("Retention", ScoreVector::new(0, 1, 1))
        })
        .result("A", "Seller", "You grow the business by closing.")
        .result("B", "Builder", "You grow the business by making.")
        .result("C", "Caretaker", "You grow the business through people.")
        .build();

    for issue in doc.lint() {
        println!("warning: {}", issue);
    }

    let answers = [1, 2, 2];
    let mut session = Session::new(&doc);
    session.begin()?;

    for &selected in &answers {
        if let Some(question) = session.current_question() {
            println!("Q: {}", question.text);
            println!("   -> {}", question.options[selected].label);
        }
        session.answer(selected)?;
        let (answered, total) = session.progress();
        println!("   ({}/{}) scores: {:?}", answered, total, session.state().scores);
    }

    if let Some(outcome) = session.outcome() {
        println!("\n=== Result ===");
        println!("{}: {}", outcome.title(), outcome.description());
        println!("Basis: {:?}", outcome.basis);
    }

    // A and B both reach 2; A wins by label order.
    let tie = play(&doc, &[0, 2, 1])?;
    println!("\nTie-break example (A=2, B=2, C=1): {}", tie.title());

    Ok(())
}
