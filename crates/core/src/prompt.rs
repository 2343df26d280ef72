//! Prompt Composer
//!
//! Pure functions that map a session's fixed settings to the instruction
//! context sent to the completion service, and to the templated opening
//! greeting. No I/O, deterministic for identical inputs; the directive
//! tables are total over the configuration enums.

use crate::session::{InterviewType, Tone, Verbosity};

/// Maximum length of the topic reference embedded in a greeting.
const TOPIC_REFERENCE_LIMIT: usize = 100;

const STAY_IN_CHARACTER: &str =
    "Important: You are simulating a real interview. Stay in character throughout.";

fn base_directive(interview_type: InterviewType) -> &'static str {
    match interview_type {
        InterviewType::SystemDesign => {
            "You are an experienced ML/AI system design interviewer.\n\
             Your role is to guide candidates through system design problems for machine learning systems.\n\
             Focus on: scalability, data pipelines, model serving, monitoring, and trade-offs.\n\
             Ask probing questions about their design choices and help them think through edge cases.\n\
             The candidate may be drawing on a canvas - reference their diagrams when appropriate."
        }
        InterviewType::LiveCoding => {
            "You are an experienced coding interviewer for ML/AI positions.\n\
             Your role is to present coding problems and guide candidates through solving them.\n\
             Focus on: algorithm efficiency, code quality, ML-specific implementations (data preprocessing,\n\
             model evaluation, feature engineering).\n\
             Provide hints when stuck, but let them drive the solution.\n\
             The candidate is writing code in an editor - reference their code when appropriate."
        }
        InterviewType::MlTheory => {
            "You are an expert ML/AI interviewer testing theoretical knowledge.\n\
             Your role is to ask questions about machine learning concepts, deep learning, statistics,\n\
             and AI fundamentals.\n\
             Cover topics like: gradient descent, regularization, bias-variance tradeoff, neural network\n\
             architectures, transformers, attention mechanisms, loss functions, optimization.\n\
             The candidate may write formulas - acknowledge and discuss their mathematical notation."
        }
        InterviewType::Coaching => {
            "You are a supportive ML/AI career coach.\n\
             Your role is to help candidates prepare for their interviews, provide advice on career development,\n\
             discuss salary negotiations, review their experience, and build their confidence.\n\
             Be encouraging but honest. Help them articulate their experiences effectively."
        }
    }
}

fn tone_directive(tone: Tone) -> &'static str {
    match tone {
        Tone::Friendly => {
            "Be warm, encouraging, and supportive. Use positive reinforcement frequently."
        }
        Tone::Neutral => {
            "Be professional and balanced. Provide objective feedback without being too warm or cold."
        }
        Tone::Adversarial => {
            "Be challenging and push back on answers. Play devil's advocate. Test their conviction and ability to defend their choices under pressure."
        }
    }
}

fn verbosity_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Low => {
            "Keep responses brief and to the point. Ask one question at a time. Minimal explanation."
        }
        Verbosity::Medium => {
            "Provide moderate detail in responses. Balance between brevity and thoroughness."
        }
        Verbosity::High => {
            "Provide detailed explanations and context. Elaborate on concepts when relevant."
        }
    }
}

fn greeting_template(interview_type: InterviewType) -> &'static str {
    match interview_type {
        InterviewType::SystemDesign => {
            "Hello! I'm excited to work through a system design problem with you today. We'll be designing {topic}. Before we dive in, could you tell me a bit about your experience with ML system design?"
        }
        InterviewType::LiveCoding => {
            "Hi there! Today we're going to work through a coding problem together. {topic}. Feel free to think out loud as you work through it. Ready to see the problem?"
        }
        InterviewType::MlTheory => {
            "Welcome! Today we'll explore some machine learning concepts together. {topic}. Let's start with a foundational question to warm up."
        }
        InterviewType::Coaching => {
            "Hi! I'm here to help you prepare for your ML interviews and career journey. {topic}. What aspects of your interview preparation would you like to focus on today?"
        }
    }
}

/// Greeting rewrites applied for the adversarial tone: specific lead-ins
/// become terser alternatives.
const ADVERSARIAL_REWRITES: &[(&str, &str)] = &[
    ("I'm excited to", "I'm ready to"),
    ("Great to meet you! ", ""),
];

/// Tone transform table: each arm is a pure greeting -> greeting rewrite.
fn apply_tone(tone: Tone, greeting: String) -> String {
    match tone {
        Tone::Friendly => format!("Great to meet you! {greeting}"),
        Tone::Neutral => greeting,
        Tone::Adversarial => ADVERSARIAL_REWRITES
            .iter()
            .fold(greeting, |greeting, (from, to)| greeting.replace(from, to)),
    }
}

/// Treats empty or whitespace-only topics as absent.
fn normalize_topic(topic: Option<&str>) -> Option<&str> {
    topic.map(str::trim).filter(|topic| !topic.is_empty())
}

/// Short topic reference for greetings: first line of the topic, cut at
/// roughly [`TOPIC_REFERENCE_LIMIT`] characters.
fn topic_reference(topic: &str) -> String {
    let first_line = topic.lines().next().unwrap_or(topic).trim();
    first_line.chars().take(TOPIC_REFERENCE_LIMIT).collect()
}

/// Builds the complete system instruction for a session's settings.
///
/// The output always contains the tone and verbosity directives verbatim;
/// a non-empty topic is appended verbatim at the end.
pub fn compose(
    interview_type: InterviewType,
    tone: Tone,
    verbosity: Verbosity,
    topic: Option<&str>,
) -> String {
    let mut instruction = format!(
        "{}\n\nCommunication Style:\n{}\n{}\n\n{}",
        base_directive(interview_type),
        tone_directive(tone),
        verbosity_directive(verbosity),
        STAY_IN_CHARACTER,
    );
    if let Some(topic) = normalize_topic(topic) {
        instruction.push_str("\n\nThe interview problem/topic is:\n");
        instruction.push_str(topic);
    }
    instruction
}

/// Produces the interviewer's opening greeting for a new session.
pub fn opening(interview_type: InterviewType, tone: Tone, topic: Option<&str>) -> String {
    let topic_text = match normalize_topic(topic) {
        Some(topic) => format!("The topic is: {}", topic_reference(topic)),
        None => "I'll present the topic shortly".to_string(),
    };
    let greeting = greeting_template(interview_type).replace("{topic}", &topic_text);
    apply_tone(tone, greeting)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_is_deterministic() {
        let first = compose(
            InterviewType::SystemDesign,
            Tone::Neutral,
            Verbosity::Medium,
            Some("Recommendation System"),
        );
        let second = compose(
            InterviewType::SystemDesign,
            Tone::Neutral,
            Verbosity::Medium,
            Some("Recommendation System"),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_compose_contains_directives_verbatim_for_all_settings() {
        for interview_type in InterviewType::ALL {
            for tone in Tone::ALL {
                for verbosity in Verbosity::ALL {
                    let instruction = compose(interview_type, tone, verbosity, None);
                    assert!(instruction.contains(tone_directive(tone)));
                    assert!(instruction.contains(verbosity_directive(verbosity)));
                    assert!(instruction.contains(STAY_IN_CHARACTER));
                }
            }
        }
    }

    #[test]
    fn test_compose_appends_topic_verbatim() {
        let topic = "Bias-Variance Tradeoff\n\nLet's discuss the bias-variance tradeoff.";
        let instruction = compose(
            InterviewType::MlTheory,
            Tone::Neutral,
            Verbosity::High,
            Some(topic),
        );
        assert!(instruction.contains("The interview problem/topic is:"));
        assert!(instruction.ends_with(topic));
    }

    #[test]
    fn test_compose_treats_blank_topic_as_absent() {
        let with_blank = compose(
            InterviewType::Coaching,
            Tone::Friendly,
            Verbosity::Low,
            Some("   \n  "),
        );
        let without = compose(InterviewType::Coaching, Tone::Friendly, Verbosity::Low, None);
        assert_eq!(with_blank, without);
        assert!(!with_blank.contains("The interview problem/topic is:"));
    }

    #[test]
    fn test_opening_references_topic() {
        let opening_text = opening(
            InterviewType::MlTheory,
            Tone::Neutral,
            Some("Bias-Variance Tradeoff"),
        );
        assert!(opening_text.contains("The topic is: Bias-Variance Tradeoff"));
    }

    #[test]
    fn test_opening_without_topic_uses_placeholder() {
        let opening_text = opening(InterviewType::LiveCoding, Tone::Neutral, None);
        assert!(opening_text.contains("I'll present the topic shortly"));
    }

    #[test]
    fn test_opening_truncates_topic_reference() {
        let long_topic = "x".repeat(250);
        let opening_text = opening(InterviewType::SystemDesign, Tone::Neutral, Some(&long_topic));
        assert!(opening_text.contains(&"x".repeat(100)));
        assert!(!opening_text.contains(&"x".repeat(101)));
    }

    #[test]
    fn test_opening_uses_first_topic_line_only() {
        let topic = "ML Model Serving Platform\n\nDesign a scalable serving platform.";
        let opening_text = opening(InterviewType::SystemDesign, Tone::Neutral, Some(topic));
        assert!(opening_text.contains("The topic is: ML Model Serving Platform"));
        assert!(!opening_text.contains("Design a scalable serving platform"));
    }

    #[test]
    fn test_friendly_tone_prepends_preamble() {
        let opening_text = opening(InterviewType::Coaching, Tone::Friendly, None);
        assert!(opening_text.starts_with("Great to meet you! "));
    }

    #[test]
    fn test_adversarial_tone_rewrites_lead_ins() {
        let opening_text = opening(
            InterviewType::SystemDesign,
            Tone::Adversarial,
            Some("Fraud Detection Pipeline"),
        );
        assert!(!opening_text.contains("excited"));
        assert!(opening_text.contains("I'm ready to"));
        assert!(!opening_text.contains("Great to meet you"));
    }

    #[test]
    fn test_adversarial_ml_theory_scenario() {
        let opening_text = opening(
            InterviewType::MlTheory,
            Tone::Adversarial,
            Some("Bias-Variance Tradeoff"),
        );
        assert!(!opening_text.contains("Great to meet you"));
        assert!(opening_text.contains("Bias-Variance Tradeoff"));
    }
}
