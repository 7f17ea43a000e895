//! Portable exporter.
//!
//! Turns a [`QuizDocument`] into a single self-contained HTML page: the
//! document is embedded as an inline JSON block and the engine as an
//! inline script, so the page plays offline with no host, no network and
//! no external assets.
//!
//! An [`Artifact`] can also be replayed from Rust with
//! [`Artifact::replay`], which applies the inline script's rules (ported
//! as [`PortableEngine`]) to the artifact's own embedded data. For
//! `diagnosis` and `test` documents both the replayed outcome and the
//! outcome the script itself serializes are byte-identical to the hosted
//! [`play`](crate::session::play).

use crate::error::QuizError;
use crate::model::QuizDocument;
use crate::outcome::Outcome;
use crate::portable::PortableEngine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ENGINE_SCRIPT: &str = include_str!("engine.js");
const DATA_OPEN: &str = r#"<script type="application/json" id="quiz-data">"#;
const OPTIONS_OPEN: &str = r#"<script type="application/json" id="quiz-options">"#;
const ENGINE_OPEN: &str = "<script>\n";
const SCRIPT_CLOSE: &str = "</script>";

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}\
button{display:block;width:100%;margin:.5rem 0;padding:.75rem;font-size:1rem;cursor:pointer}\
.quiz-progress{color:#666}.quiz-error{color:#b00}";

/// Presentation settings for exported artifacts.
///
/// Every field has a default, so hosts can deserialize a partial
/// settings object.
///
/// # Examples
///
/// ```rust
/// use quizcore::ExportOptions;
///
/// let options: ExportOptions = serde_json::from_str(r#"{"lang": "en"}"#).unwrap();
/// assert_eq!(options.lang, "en");
/// assert!(options.show_progress);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// `lang` attribute of the page.
    pub lang: String,
    /// Page `<title>`; the document title when `None`.
    pub page_title: Option<String>,
    pub start_label: String,
    pub restart_label: String,
    /// Show "n / total" above each question.
    pub show_progress: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            lang: String::from("ja"),
            page_title: None,
            start_label: String::from("スタート"),
            restart_label: String::from("もう一度"),
            show_progress: true,
        }
    }
}

/// Builds standalone artifacts.
///
/// # Examples
///
/// ```rust
/// use quizcore::*;
///
/// let doc = QuizDocument::builder(Mode::Test)
///     .title("Quick check")
///     .question("1 + 1?", |q| q.correct("2").wrong("3"))
///     .tier("Great", "")
///     .tier("OK", "")
///     .tier("Keep going", "")
///     .build();
///
/// let artifact = Exporter::default().export(&doc).unwrap();
/// assert!(artifact.html().contains("<title>Quick check</title>"));
/// assert_eq!(artifact.replay(&[0]).unwrap(), play(&doc, &[0]).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export a document. Documents with no results are refused, since
    /// the artifact could never show one.
    pub fn export(&self, document: &QuizDocument) -> Result<Artifact, QuizError> {
        if document.results.is_empty() {
            return Err(QuizError::NoResultsAvailable {
                mode: document.mode,
            });
        }

        let data = script_json(document)?;
        let options = script_json(&self.options)?;
        let title = self
            .options
            .page_title
            .as_deref()
            .unwrap_or(document.title.as_str());

        let mut html = String::with_capacity(ENGINE_SCRIPT.len() + data.len() + 1024);
        html.push_str("<!DOCTYPE html>\n<html lang=\"");
        html.push_str(&escape_html(&self.options.lang));
        html.push_str("\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str("<title>");
        html.push_str(&escape_html(title));
        html.push_str("</title>\n<style>");
        html.push_str(STYLE);
        html.push_str("</style>\n</head>\n<body>\n<main id=\"quiz-root\"></main>\n");
        html.push_str(DATA_OPEN);
        html.push_str(&data);
        html.push_str(SCRIPT_CLOSE);
        html.push('\n');
        html.push_str(OPTIONS_OPEN);
        html.push_str(&options);
        html.push_str(SCRIPT_CLOSE);
        html.push('\n');
        html.push_str(ENGINE_OPEN);
        html.push_str(ENGINE_SCRIPT);
        html.push_str(SCRIPT_CLOSE);
        html.push_str("\n</body>\n</html>\n");

        tracing::debug!(
            "Exported {} quiz: questions={}, results={}, bytes={}",
            document.mode,
            document.questions.len(),
            document.results.len(),
            html.len()
        );
        Ok(Artifact { html })
    }
}

/// A self-contained exported quiz page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    html: String,
}

impl Artifact {
    /// Wrap previously exported HTML, e.g. loaded back from storage.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    fn block(&self, open: &str, name: &str) -> Result<&str, QuizError> {
        let start = self
            .html
            .find(open)
            .ok_or_else(|| QuizError::ArtifactData(format!("missing {name} block")))?
            + open.len();
        let len = self.html[start..]
            .find(SCRIPT_CLOSE)
            .ok_or_else(|| QuizError::ArtifactData(format!("unterminated {name} block")))?;
        Ok(&self.html[start..start + len])
    }

    /// Text of the embedded data block, exactly as the page holds it.
    pub fn embedded_json(&self) -> Result<&str, QuizError> {
        self.block(DATA_OPEN, "quiz-data")
    }

    /// The inline engine script.
    pub fn script(&self) -> Result<&str, QuizError> {
        self.block(ENGINE_OPEN, "engine script")
    }

    /// The raw embedded document data.
    pub fn embedded_data(&self) -> Result<Value, QuizError> {
        serde_json::from_str(self.embedded_json()?).map_err(|e| QuizError::ArtifactData(e.to_string()))
    }

    /// The embedded document, parsed into the typed model.
    pub fn embedded_document(&self) -> Result<QuizDocument, QuizError> {
        serde_json::from_value(self.embedded_data()?)
            .map_err(|e| QuizError::ArtifactData(e.to_string()))
    }

    /// Play `answers` through the artifact's rules and embedded data.
    pub fn replay(&self, answers: &[usize]) -> Result<Outcome, QuizError> {
        self.replay_with_rng(answers, &mut rand::thread_rng())
    }

    pub fn replay_with_rng<R: Rng + ?Sized>(
        &self,
        answers: &[usize],
        rng: &mut R,
    ) -> Result<Outcome, QuizError> {
        let data = self.embedded_data()?;
        PortableEngine::new(&data)?.run(answers, rng)
    }
}

/// JSON safe to place inside a `<script>` element.
///
/// `<` only occurs inside JSON strings, where `\u003c` decodes back to it.
fn script_json<T: Serialize>(value: &T) -> Result<String, QuizError> {
    let json = serde_json::to_string(value).map_err(|e| QuizError::Export(e.to_string()))?;
    Ok(json.replace('<', "\\u003c"))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
