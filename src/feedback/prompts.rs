//! Instruction templates sent to the provider.
//!
//! Learner text and exam prompts are embedded verbatim; scoring templates
//! spell out the exact JSON shape the reply parser expects.

use super::request::{EssayTask, StyleMode};

pub const CREDENTIAL_CHECK: &str = "Test";

pub const TUTOR_SYSTEM: &str = "You are a friendly, expert IELTS tutor. Answer questions about \
the IELTS exam, explain grammar and vocabulary with short examples, and keep replies focused and \
practical. When the learner shares writing, point out the most important improvements first.";

const ESSAY_SCHEMA: &str = r#"{
  "scores": {
    "taskResponse": number,
    "coherence": number,
    "lexical": number,
    "grammar": number,
    "overall": number
  },
  "feedback": {
    "taskResponse": "specific feedback string",
    "coherence": "specific feedback string",
    "lexical": "specific feedback string",
    "grammar": "specific feedback string"
  },
  "comparisons": [
    { "original": "a weak sentence copied from the text", "improved": "Band 9 rewrite of that sentence" }
  ],
  "improvedEssay": "optional Band 9 version of the whole text"
}"#;

const SPEAKING_SCHEMA: &str = r#"{
  "scores": {
    "fluency": number,
    "lexical": number,
    "grammar": number,
    "pronunciation": number,
    "overall": number
  },
  "feedback": {
    "fluency": "specific feedback string",
    "lexical": "specific feedback string",
    "grammar": "specific feedback string",
    "pronunciation": "specific feedback string"
  },
  "fillers": ["filler words the candidate relied on"],
  "comparisons": [
    { "original": "a weak sentence from the transcript", "improved": "Band 9 way to say it" }
  ]
}"#;

const BRAINSTORM_SCHEMA: &str = r#"{
  "agree": ["point 1", "point 2", "point 3"],
  "disagree": ["point 1", "point 2", "point 3"],
  "structure": "Recommended concise essay structure (e.g. Intro > Body 1 > Body 2 > Conclusion)"
}"#;

const SCORE_RULES: &str = "Every score is a number from 0 to 9 in steps of 0.5. \
Return only the JSON object, with no markdown and no commentary.";

pub fn essay_scoring(task: EssayTask, prompt: &str, essay: &str) -> String {
    let criteria = match task {
        EssayTask::Task2 => {
            "1. Task Response (taskResponse): does the essay answer every part of the question with a clear, developed position?\n\
             2. Coherence and Cohesion (coherence)\n\
             3. Lexical Resource (lexical)\n\
             4. Grammatical Range and Accuracy (grammar)"
        }
        EssayTask::Task1 => {
            "1. Task Achievement (taskResponse): is there a clear overview, are the key features selected and compared, are the data accurate?\n\
             2. Coherence and Cohesion (coherence)\n\
             3. Lexical Resource (lexical)\n\
             4. Grammatical Range and Accuracy (grammar)"
        }
    };
    let (kind, rewrites) = match task {
        EssayTask::Task2 => ("IELTS Writing Task 2 essay", "Include exactly 2 comparisons."),
        EssayTask::Task1 => (
            "IELTS Academic Writing Task 1 report",
            "Include up to 2 comparisons.",
        ),
    };

    format!(
        "Act as an expert IELTS examiner. Assess the following {kind} against the official criteria:\n\
         {criteria}\n\n\
         Give a band score for each criterion and an overall band, then specific, constructive \
         feedback for each criterion. {rewrites}\n\n\
         Respond with a JSON object of this shape:\n{ESSAY_SCHEMA}\n\n\
         {SCORE_RULES}\n\n\
         Prompt: \"{prompt}\"\n\n\
         Essay:\n{essay}\n"
    )
}

pub fn speaking_assessment(prompt: &str, transcript: &str) -> String {
    format!(
        "Act as an expert IELTS speaking examiner. The transcript below is a candidate's answer \
         to the cue card or question shown. Assess it against the official criteria:\n\
         1. Fluency and Coherence (fluency)\n\
         2. Lexical Resource (lexical)\n\
         3. Grammatical Range and Accuracy (grammar)\n\
         4. Pronunciation (pronunciation), judged from hesitation markers, self-corrections and \
         word choice visible in the transcript\n\n\
         Respond with a JSON object of this shape:\n{SPEAKING_SCHEMA}\n\n\
         {SCORE_RULES}\n\n\
         Question: \"{prompt}\"\n\n\
         Transcript:\n{transcript}\n"
    )
}

pub fn brainstorm(prompt: &str) -> String {
    format!(
        "Act as an IELTS tutor. Brainstorm ideas for the following essay prompt: \"{prompt}\".\n\
         Respond with a JSON object of this shape:\n{BRAINSTORM_SCHEMA}\n\n\
         Return only the JSON object, with no markdown and no commentary.\n"
    )
}

pub fn style_transform(mode: StyleMode, text: &str) -> String {
    let instruction = match mode {
        StyleMode::Academic => {
            "Rewrite the following text so that it would likely achieve IELTS Band 9. Use \
             sophisticated vocabulary and complex grammatical structures, but keep it natural."
        }
        StyleMode::Concise => {
            "Rewrite the following text to be more concise and direct, while maintaining an \
             academic tone."
        }
    };
    format!("{instruction}\nReturn only the rewritten text, no explanations.\n\nText: \"{text}\"")
}

pub fn grammar_repair(text: &str) -> String {
    format!(
        "Correct all grammar, punctuation, and spelling errors in the following text.\n\
         Return ONLY the corrected text, no explanations.\n\n\
         Text: \"{text}\""
    )
}
