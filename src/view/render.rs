use std::fmt::Write;

use crate::model::{AiResult, CategorizeResponse, Content, QuizResponse, SummaryResponse};

pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";

/// Confidence as a whole percentage, rounded half up.
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

pub fn confidence_label(confidence: f64) -> String {
    format!("{}% confidence", confidence_percent(confidence))
}

/// `0 -> 'A'`, `1 -> 'B'`, ... Indices outside the alphabet still map to
/// the neighbouring code points (`-1 -> '@'`); only unrepresentable ones
/// become `?`.
pub fn option_letter(index: i64) -> char {
    index
        .checked_add(65)
        .and_then(|code| u32::try_from(code).ok())
        .and_then(char::from_u32)
        .unwrap_or('?')
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_ai_result(result: &AiResult) -> String {
    let body = match result {
        AiResult::Summary(summary) => render_summary(summary),
        AiResult::Quiz(quiz) => render_quiz(quiz),
        AiResult::Categorize(categories) => render_categorize(categories),
    };
    format!(
        "{BOLD}AI Generated {}{RESET}\n\n{}",
        capitalize(result.kind().as_str()),
        body
    )
}

pub fn render_summary(summary: &SummaryResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{BOLD}Summary{RESET}");
    let _ = writeln!(out, "{}", summary.summary);
    let _ = writeln!(out, "Word count: {}\n", summary.word_count);
    let _ = writeln!(out, "{BOLD}Key Points{RESET}");
    for point in &summary.key_points {
        let _ = writeln!(out, "  * {}", point);
    }
    out
}

pub fn render_quiz(quiz: &QuizResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{BOLD}Quiz ({} questions){RESET}\n",
        quiz.total_questions
    );
    for (index, question) in quiz.questions.iter().enumerate() {
        let _ = writeln!(out, "{BOLD}Question {}{RESET}", index + 1);
        let _ = writeln!(out, "{}", question.question);
        for (option_index, option) in question.options.iter().enumerate() {
            let marker = if option_index as i64 == question.correct_answer {
                "[x]"
            } else {
                "[ ]"
            };
            let _ = writeln!(
                out,
                "  {} {}. {}",
                marker,
                option_letter(option_index as i64),
                option
            );
        }
        if let Some(explanation) = &question.explanation {
            let _ = writeln!(out, "  Explanation: {}", explanation);
        }
        out.push('\n');
    }
    out
}

pub fn render_categorize(categories: &CategorizeResponse) -> String {
    let percent = confidence_percent(categories.confidence);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{BOLD}Categories{RESET} ({})",
        confidence_label(categories.confidence)
    );
    for category in &categories.categories {
        let _ = writeln!(out, "  - {}", category);
    }
    let _ = writeln!(out, "\nConfidence Score: {}%", percent);
    let _ = writeln!(
        out,
        "The AI is {}% confident in these category suggestions.",
        percent
    );
    out
}

/// Quiz as plain text, one block per question.
pub fn quiz_text(quiz: &QuizResponse) -> String {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let options = q
                .options
                .iter()
                .enumerate()
                .map(|(j, opt)| format!("{}. {}", option_letter(j as i64), opt))
                .collect::<Vec<String>>()
                .join("\n");
            let explanation = q
                .explanation
                .as_ref()
                .map(|e| format!("Explanation: {}", e))
                .unwrap_or_default();
            format!(
                "Question {}: {}\n{}\nCorrect Answer: {}\n{}\n",
                i + 1,
                q.question,
                options,
                option_letter(q.correct_answer),
                explanation
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Plain-text export of a result and the file name it is saved under.
pub fn export_text(result: &AiResult) -> (&'static str, String) {
    match result {
        AiResult::Summary(summary) => ("summary.txt", summary.summary.clone()),
        AiResult::Quiz(quiz) => ("quiz.txt", quiz_text(quiz)),
        AiResult::Categorize(categories) => ("categories.txt", categories.categories.join("\n")),
    }
}

fn short_date(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

pub fn render_content_list(items: &[Content]) -> String {
    if items.is_empty() {
        return String::from(
            "No content yet\nGet started by creating your first piece of content or generating something with AI.\n",
        );
    }

    let mut out = String::new();
    for item in items {
        let _ = write!(
            out,
            "{BOLD}{}{RESET}  [{}]  {}",
            item.title, item.content_type, item.id
        );
        if let Some(category) = item.category.as_deref().filter(|c| !c.is_empty()) {
            let _ = write!(out, "  ({})", category);
        }
        let _ = writeln!(out, "  {}", short_date(&item.created_at));
    }
    out
}

pub fn render_content(item: &Content) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{BOLD}{}{RESET}", item.title);
    let _ = writeln!(out, "id: {}", item.id);
    let _ = writeln!(out, "type: {}", item.content_type);
    if let Some(category) = &item.category {
        let _ = writeln!(out, "category: {}", category);
    }
    let _ = writeln!(out, "created: {}\n", short_date(&item.created_at));
    let _ = writeln!(out, "{}", item.content);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizQuestion;

    fn quiz() -> QuizResponse {
        QuizResponse {
            total_questions: 2,
            questions: vec![
                QuizQuestion {
                    question: "2 + 2?".into(),
                    options: vec!["3".into(), "4".into(), "5".into(), "22".into()],
                    correct_answer: 1,
                    explanation: Some("Basic addition.".into()),
                },
                QuizQuestion {
                    question: "Capital of France?".into(),
                    options: vec!["Paris".into(), "Rome".into()],
                    correct_answer: 0,
                    explanation: None,
                },
            ],
        }
    }

    #[test]
    fn confidence_rounds_to_whole_percent() {
        assert_eq!(confidence_label(0.999), "100% confidence");
        assert_eq!(confidence_label(0.004), "0% confidence");
        assert_eq!(confidence_percent(0.126), 13);
        assert_eq!(confidence_percent(0.5), 50);
    }

    #[test]
    fn option_letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
        assert_eq!(option_letter(5), 'F');
        assert_eq!(option_letter(-1), '@');
        assert_eq!(option_letter(-100), '?');
    }

    #[test]
    fn negative_answer_index_renders_without_a_mark() {
        let mut quiz = quiz();
        quiz.questions[0].correct_answer = -1;

        let rendered = render_quiz(&quiz);
        assert!(!rendered.contains("[x] A. 3"));
        assert!(rendered.contains("[ ] B. 4"));
        assert!(quiz_text(&quiz).contains("Correct Answer: @\n"));
    }

    #[test]
    fn quiz_text_matches_export_layout() {
        let text = quiz_text(&quiz());
        assert_eq!(
            text,
            "Question 1: 2 + 2?\nA. 3\nB. 4\nC. 5\nD. 22\nCorrect Answer: B\nExplanation: Basic addition.\n\n\
             Question 2: Capital of France?\nA. Paris\nB. Rome\nCorrect Answer: A\n\n"
        );
    }

    #[test]
    fn quiz_render_marks_correct_option() {
        let rendered = render_quiz(&quiz());
        assert!(rendered.contains("[x] B. 4"));
        assert!(rendered.contains("[ ] A. 3"));
        assert!(rendered.contains("Explanation: Basic addition."));
    }

    #[test]
    fn categorize_render_shows_rounded_confidence() {
        let rendered = render_ai_result(&AiResult::Categorize(CategorizeResponse {
            categories: vec!["Biology".into(), "Chemistry".into()],
            confidence: 0.999,
        }));
        assert!(rendered.contains("AI Generated Categorize"));
        assert!(rendered.contains("100% confidence"));
        assert!(rendered.contains("  - Chemistry"));
    }

    #[test]
    fn export_file_names() {
        let (name, body) = export_text(&AiResult::Categorize(CategorizeResponse {
            categories: vec!["a".into(), "b".into()],
            confidence: 0.1,
        }));
        assert_eq!(name, "categories.txt");
        assert_eq!(body, "a\nb");
        assert_eq!(export_text(&AiResult::Quiz(quiz())).0, "quiz.txt");
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert!(render_content_list(&[]).starts_with("No content yet"));
    }
}
