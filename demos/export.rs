//! Export example: produce a standalone quiz page
//!
//! This example demonstrates:
//! - Loading a stored quiz document from JSON
//! - Exporting it to a single offline HTML file
//! - Checking that the page resolves like the hosted player
//!
//! Usage: `cargo run --example export [output.html]`

use quizcore::*;

const STORED: &str = r#"{
    "mode": "test",
    "title": "Web basics",
    "description": "How well do you know the web?",
    "questions": [
        { "text": "What does HTML stand for?", "options": [
            { "label": "HyperText Markup Language", "score": { "A": 1, "B": 0, "C": 0 } },
            { "label": "High Transfer Mail Link", "score": { "A": 0, "B": 0, "C": 0 } }
        ] },
        { "text": "Which tag holds scripts?", "options": [
            { "label": "<style>" },
            { "label": "<script>", "score": { "A": 1 } }
        ] },
        { "text": "Default HTTP port?", "options": [
            { "label": "21" },
            { "label": "80", "score": { "A": 1 } },
            { "label": "443" }
        ] }
    ],
    "results": [
        { "title": "Web wizard", "description": "Nothing gets past you." },
        { "title": "Getting there", "description": "A solid foundation." },
        { "title": "Beginner", "description": "Everyone starts somewhere." }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let doc = QuizDocument::from_json(STORED)?;
    let options = ExportOptions {
        lang: String::from("en"),
        start_label: String::from("Start"),
        restart_label: String::from("Try again"),
        ..ExportOptions::default()
    };
    let artifact = Exporter::new(options).export(&doc)?;

    let answers = [0, 1, 0];
    let hosted = play(&doc, &answers)?;
    let exported = artifact.replay(&answers)?;
    println!("Hosted:   {}", hosted.to_json()?);
    println!("Exported: {}", exported.to_json()?);
    assert_eq!(hosted.to_json()?, exported.to_json()?);

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, artifact.html())?;
            println!("Wrote {} bytes to {}", artifact.html().len(), path);
        }
        None => println!("Artifact is {} bytes (pass a path to save it)", artifact.html().len()),
    }

    Ok(())
}
