use std::sync::LazyLock;

use jackpot_core::errors::{ExternalServiceError, JackpotResult};
use jackpot_core::models::{AgentPrediction, AgentStrategy};
use regex::Regex;

static ANSWER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*ANSWER:[ \t]*(.+?)\s*$").ok());
static CONFIDENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)CONFIDENCE:\s*(\d+(?:\.\d+)?)").ok());
static REASONING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*REASONING:[ \t]*(.+?)\s*$").ok());

fn capture<'a>(pattern: &LazyLock<Option<Regex>>, content: &'a str) -> Option<&'a str> {
    pattern
        .as_ref()
        .and_then(|re| re.captures(content))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

const DEFAULT_CONFIDENCE: f64 = 0.5;
const MAX_REASONING_CHARS: usize = 50;

/// Parse an `ANSWER / CONFIDENCE / REASONING` reply.
///
/// Only the answer line is required. Confidence is read as a percentage,
/// defaults to 0.5 and is clamped to [0, 1].
pub fn parse_response(
    agent: AgentStrategy,
    content: &str,
    latency_ms: u64,
) -> JackpotResult<AgentPrediction> {
    let answer = capture(&ANSWER, content)
        .map(|m| m.trim().trim_matches('"').trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ExternalServiceError::MalformedResponse {
            service: agent.name().to_string(),
            reason: "no ANSWER line".to_string(),
        })?;

    let confidence = capture(&CONFIDENCE, content)
        .and_then(|m| m.parse::<f64>().ok())
        .map(|pct| pct / 100.0)
        .unwrap_or(DEFAULT_CONFIDENCE)
        .clamp(0.0, 1.0);

    let reasoning = capture(&REASONING, content)
        .map(|m| m.chars().take(MAX_REASONING_CHARS).collect())
        .unwrap_or_else(|| "No reasoning".to_string());

    Ok(AgentPrediction {
        agent,
        answer,
        confidence,
        reasoning,
        latency_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_reply() {
        let p = parse_response(
            AgentStrategy::Lateral,
            "ANSWER: Monopoly\nCONFIDENCE: 82\nREASONING: takeover=board game",
            120,
        )
        .unwrap();
        assert_eq!(p.answer, "Monopoly");
        assert!((p.confidence - 0.82).abs() < 1e-12);
        assert_eq!(p.reasoning, "takeover=board game");
        assert_eq!(p.latency_ms, 120);
    }

    #[test]
    fn tolerates_case_and_surrounding_chatter() {
        let p = parse_response(
            AgentStrategy::Literal,
            "Sure!\nanswer: \"Ice Cream\"\nconfidence: 40.5",
            0,
        )
        .unwrap();
        assert_eq!(p.answer, "Ice Cream");
        assert!((p.confidence - 0.405).abs() < 1e-12);
        assert_eq!(p.reasoning, "No reasoning");
    }

    #[test]
    fn missing_confidence_defaults_and_excess_clamps() {
        let p = parse_response(AgentStrategy::WildCard, "ANSWER: Jenga", 0).unwrap();
        assert_eq!(p.confidence, 0.5);
        let p = parse_response(AgentStrategy::WildCard, "ANSWER: Jenga\nCONFIDENCE: 250", 0).unwrap();
        assert_eq!(p.confidence, 1.0);
    }

    #[test]
    fn reasoning_is_truncated() {
        let long = "x".repeat(80);
        let p = parse_response(AgentStrategy::Wordsmith, &format!("ANSWER: A\nREASONING: {long}"), 0).unwrap();
        assert_eq!(p.reasoning.chars().count(), 50);
    }

    #[test]
    fn missing_answer_is_malformed() {
        assert!(parse_response(AgentStrategy::Lateral, "I think it's Monopoly", 0).is_err());
        assert!(parse_response(AgentStrategy::Lateral, "ANSWER:   \nCONFIDENCE: 3", 0).is_err());
    }
}
