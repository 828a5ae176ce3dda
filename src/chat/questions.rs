//! Yes/no style side questions answered by the completion endpoint
//!
//! A question prompt lists the input and a numbered set of questions, then
//! ends with an answers tag telling the model to reply as a numbered list.
//! [`parse_answers`] turns that list back into one string per question.

use crate::llm::{CompletionClient, CompletionParams};
use regex::Regex;
use std::sync::LazyLock;

pub const INPUT_TAG: &str = "[Input]";
pub const QUESTIONS_TAG: &str = "[Questions]";
pub const ANSWERS_TAG: &str = "[Concise Answers (one answer per question on a newline with cardinal number at the beginning of the line, e.g. 1. answer)]";

/// Token allowance per question.
const MAX_TOKENS_PER_QUESTION: u32 = 30;

static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\. (.*)").expect("numbered line pattern is valid")
});

/// Build the question prompt, or `None` when there is nothing to ask about.
pub fn build_question_prompt(input: &str, questions: &[&str]) -> Option<String> {
    if input.is_empty() || questions.is_empty() {
        return None;
    }

    let numbered: String = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let q = q.replace(['\n', '\t'], " ");
            format!("{}. {}\n", i + 1, q.trim())
        })
        .collect();

    Some(format!(
        "{INPUT_TAG}\n{}\n\n{QUESTIONS_TAG}\n{numbered}\n{ANSWERS_TAG}\n",
        input.trim()
    ))
}

/// Sampling parameters for a prompt asking `question_count` questions.
pub fn question_params(question_count: usize) -> CompletionParams {
    CompletionParams {
        max_tokens: MAX_TOKENS_PER_QUESTION * question_count as u32,
        temperature: 0.2,
        top_p: 1.0,
        frequency_penalty: 0.0,
        presence_penalty: 1.0,
        ..CompletionParams::default()
    }
}

/// Extract the numbered answers that follow `answers_tag` in `output`.
///
/// Line `i` counts as answer `i` when it carries (or is given) the number
/// `i`. Lines whose number disagrees with their position are dropped. A
/// missing tag yields no answers.
pub fn parse_answers(output: &str, answers_tag: &str) -> Vec<String> {
    let Some(start) = output.find(answers_tag) else {
        return Vec::new();
    };
    let rest = output[start + answers_tag.len()..].trim();
    if rest.is_empty() {
        return Vec::new();
    }

    rest.split('\n')
        .enumerate()
        .filter_map(|(i, line)| {
            let n = i + 1;
            let line = if line.starts_with(&format!("{n}.")) {
                line.to_string()
            } else {
                format!("{n}. {line}")
            };

            let caps = NUMBERED_LINE.captures(&line)?;
            let number: usize = caps.get(1)?.as_str().parse().ok()?;
            (number == n).then(|| caps.get(2).map_or("", |m| m.as_str()).to_string())
        })
        .collect()
}

/// Ask `questions` about `input` and return the parsed answers.
///
/// Completion failures are logged and reported as no answers.
pub async fn ask(client: &dyn CompletionClient, input: &str, questions: &[&str]) -> Vec<String> {
    let Some(prompt) = build_question_prompt(input, questions) else {
        return Vec::new();
    };
    tracing::debug!("Question prompt: {}", prompt);

    match client.complete(&prompt, &question_params(questions.len())).await {
        Ok(answers) => {
            let answers = format!("{ANSWERS_TAG}\n{answers}");
            tracing::debug!("Question answers: {}", answers);
            parse_answers(&answers, ANSWERS_TAG)
        }
        Err(e) => {
            tracing::warn!("Question completion failed, treating as unanswered: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::MockCompletionClient;
    use crate::types::AppError;
    use rstest::rstest;

    #[test]
    fn test_build_question_prompt_layout() {
        let prompt = build_question_prompt(
            "  User: call me Bob  ",
            &["Is this a name?", "What\tis\nthe name?"],
        )
        .unwrap();

        assert_eq!(
            prompt,
            format!(
                "[Input]\nUser: call me Bob\n\n[Questions]\n1. Is this a name?\n2. What is the name?\n\n{}\n",
                ANSWERS_TAG
            )
        );
    }

    #[test]
    fn test_build_question_prompt_requires_input_and_questions() {
        assert!(build_question_prompt("", &["q"]).is_none());
        assert!(build_question_prompt("input", &[]).is_none());
    }

    #[test]
    fn test_question_params_scale_with_count() {
        let params = question_params(2);
        assert_eq!(params.max_tokens, 60);
        assert_eq!(params.temperature, 0.2);
        assert_eq!(params.frequency_penalty, 0.0);
        assert_eq!(params.presence_penalty, 1.0);
        assert_eq!(params.best_of, 1);
    }

    #[test]
    fn test_parse_well_formed_list() {
        let output = format!("{}\n1. Yes\n2. Bob\n3. Blue", ANSWERS_TAG);
        assert_eq!(parse_answers(&output, ANSWERS_TAG), vec!["Yes", "Bob", "Blue"]);
    }

    #[test]
    fn test_parse_numbers_unnumbered_lines() {
        let output = format!("{}\nYes\nBob", ANSWERS_TAG);
        assert_eq!(parse_answers(&output, ANSWERS_TAG), vec!["Yes", "Bob"]);
    }

    #[test]
    fn test_parse_ignores_text_before_tag() {
        let output = "noise 1. ignored\n[Answers]\n1. first\n2. second";
        assert_eq!(parse_answers(output, "[Answers]"), vec!["first", "second"]);
    }

    #[test]
    fn test_parse_tag_with_regex_metacharacters() {
        let tag = "[A*(b)-c]";
        let output = format!("{tag}\n1. ok");
        assert_eq!(parse_answers(&output, tag), vec!["ok"]);
    }

    #[rstest]
    #[case::missing_tag("1. Yes\n2. Bob")]
    #[case::empty_after_tag("[Answers]")]
    #[case::whitespace_after_tag("[Answers]   \n  ")]
    fn test_parse_degrades_to_empty(#[case] output: &str) {
        assert!(parse_answers(output, "[Answers]").is_empty());
    }

    #[test]
    fn test_parse_skips_out_of_order_lines() {
        // "2.5." keeps its prefix, then the captured number 5 is rejected
        let output = "[Answers]\n1. Yes\n2.5. odd\nthird";
        assert_eq!(parse_answers(output, "[Answers]"), vec!["Yes", "third"]);
    }

    #[test]
    fn test_parse_keeps_empty_answer_text() {
        let output = "[Answers]\n1. Yes\n\n3. x";
        assert_eq!(parse_answers(output, "[Answers]"), vec!["Yes", "", "x"]);
    }

    #[tokio::test]
    async fn test_ask_parses_completion() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|prompt, params| prompt.starts_with("[Input]\nhi") && params.max_tokens == 60)
            .times(1)
            .returning(|_, _| Ok("1. yes\n2. Bob".to_string()));

        let answers = ask(&client, "hi", &["q1", "q2"]).await;
        assert_eq!(answers, vec!["yes", "Bob"]);
    }

    #[tokio::test]
    async fn test_ask_swallows_completion_errors() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .returning(|_, _| Err(AppError::LLM("boom".to_string())));

        assert!(ask(&client, "hi", &["q1", "q2"]).await.is_empty());
    }

    #[tokio::test]
    async fn test_ask_skips_call_for_empty_input() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().never();

        assert!(ask(&client, "", &["q1"]).await.is_empty());
    }
}
