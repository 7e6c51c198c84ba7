use crate::ui::style as ui;
use bandcoach::feedback::{
    BandScore, Brainstorm, EssayFeedback, FeedbackResponse, Rewrite, SpeakingFeedback,
};
use std::fmt::Write as _;

pub fn render_response(response: &FeedbackResponse) -> String {
    match response {
        FeedbackResponse::Writing2(feedback) => render_essay(feedback, "Task Response"),
        FeedbackResponse::Writing1(feedback) => render_essay(feedback, "Task Achievement"),
        FeedbackResponse::Speaking(feedback) => render_speaking(feedback),
        FeedbackResponse::Brainstorm(ideas) => render_brainstorm(ideas),
        FeedbackResponse::GrammarFix { text }
        | FeedbackResponse::StyleTransform { text, .. }
        | FeedbackResponse::Chat { reply: text } => text.clone(),
    }
}

fn band_line(out: &mut String, label: &str, band: BandScore) {
    let _ = writeln!(out, "  {label:<32} {}", ui::accent(band));
}

fn criterion(out: &mut String, label: &str, text: &str) {
    let _ = writeln!(out, "\n{}\n  {}", ui::cyan(label), text.trim());
}

fn rewrites(out: &mut String, rewrites: &[Rewrite]) {
    if rewrites.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", ui::header("Sentence upgrades"));
    for rewrite in rewrites {
        let _ = writeln!(out, "  {} {}", ui::dim("before:"), rewrite.original);
        let _ = writeln!(out, "  {} {}\n", ui::value("after: "), rewrite.improved);
    }
}

fn render_essay(feedback: &EssayFeedback, first_criterion: &str) -> String {
    let scores = &feedback.scores;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}\n",
        ui::header("Overall band"),
        ui::accent(scores.overall)
    );
    band_line(&mut out, first_criterion, scores.task_response);
    band_line(&mut out, "Coherence and Cohesion", scores.coherence);
    band_line(&mut out, "Lexical Resource", scores.lexical);
    band_line(&mut out, "Grammatical Range and Accuracy", scores.grammar);

    let text = &feedback.feedback;
    criterion(&mut out, first_criterion, &text.task_response);
    criterion(&mut out, "Coherence and Cohesion", &text.coherence);
    criterion(&mut out, "Lexical Resource", &text.lexical);
    criterion(&mut out, "Grammatical Range and Accuracy", &text.grammar);

    rewrites(&mut out, &feedback.comparisons);

    if let Some(essay) = feedback.improved_essay.as_deref() {
        let _ = writeln!(out, "\n{}\n{}", ui::header("Band 9 version"), essay.trim());
    }
    out.trim_end().to_string()
}

fn render_speaking(feedback: &SpeakingFeedback) -> String {
    let scores = &feedback.scores;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}\n",
        ui::header("Overall band"),
        ui::accent(scores.overall)
    );
    band_line(&mut out, "Fluency and Coherence", scores.fluency);
    band_line(&mut out, "Lexical Resource", scores.lexical);
    band_line(&mut out, "Grammatical Range and Accuracy", scores.grammar);
    band_line(&mut out, "Pronunciation", scores.pronunciation);

    let text = &feedback.feedback;
    criterion(&mut out, "Fluency and Coherence", &text.fluency);
    criterion(&mut out, "Lexical Resource", &text.lexical);
    criterion(&mut out, "Grammatical Range and Accuracy", &text.grammar);
    criterion(&mut out, "Pronunciation", &text.pronunciation);

    if !feedback.fillers.is_empty() {
        let _ = writeln!(
            out,
            "\n{} {}",
            ui::cyan("Filler words:"),
            feedback.fillers.join(", ")
        );
    }

    rewrites(&mut out, &feedback.comparisons);
    out.trim_end().to_string()
}

fn render_brainstorm(ideas: &Brainstorm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", ui::header("Agree"));
    for point in &ideas.agree {
        let _ = writeln!(out, "  {} {point}", ui::accent("+"));
    }
    let _ = writeln!(out, "\n{}", ui::header("Disagree"));
    for point in &ideas.disagree {
        let _ = writeln!(out, "  {} {point}", ui::accent("-"));
    }
    let _ = writeln!(out, "\n{}\n  {}", ui::header("Structure"), ideas.structure);
    out.trim_end().to_string()
}
