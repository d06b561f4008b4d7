use jackpot_core::constants::{MAX_EXPLANATION_CHARS, MAX_THEME_CHARS, ORACLE_TOP_N};
use jackpot_core::errors::{ExternalServiceError, JackpotResult};
use jackpot_core::models::{OracleGuess, OracleSynthesis};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawSynthesis {
    #[serde(default)]
    top_3: Vec<RawGuess>,
    #[serde(default)]
    key_theme: Option<String>,
    #[serde(default)]
    blind_spot: Option<String>,
    #[serde(default)]
    misdirection_detected: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGuess {
    #[serde(default)]
    answer: String,
    #[serde(default)]
    confidence: Value,
    #[serde(default)]
    explanation: String,
}

/// Parse an oracle reply. Markdown code fences are tolerated; at least one
/// guess with a non-empty answer is required.
pub fn parse_synthesis(content: &str) -> JackpotResult<OracleSynthesis> {
    let body = strip_fences(content);
    let raw: RawSynthesis = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

    let top_3: Vec<OracleGuess> = raw
        .top_3
        .into_iter()
        .filter(|g| !g.answer.trim().is_empty())
        .take(ORACLE_TOP_N)
        .map(|g| OracleGuess {
            answer: g.answer.trim().to_string(),
            confidence: percent(&g.confidence),
            explanation: truncate(&g.explanation, MAX_EXPLANATION_CHARS),
        })
        .collect();
    if top_3.is_empty() {
        return Err(malformed("no guesses".to_string()));
    }

    Ok(OracleSynthesis {
        top_3,
        key_theme: truncate(raw.key_theme.as_deref().unwrap_or("Analysis pending"), MAX_THEME_CHARS),
        blind_spot: truncate(raw.blind_spot.as_deref().unwrap_or("None identified"), MAX_THEME_CHARS),
        misdirection_detected: raw
            .misdirection_detected
            .map(|m| truncate(&m, MAX_THEME_CHARS))
            .filter(|m| !m.is_empty()),
        degraded: false,
        degradation_reason: None,
        latency_ms: 0,
    })
}

fn strip_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line, then the closing fence.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Confidence as an integer percentage, clamped to 0..=100. Missing or
/// non-numeric values read as 50.
fn percent(value: &Value) -> u8 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|v| v.is_finite())
        .unwrap_or(50.0)
        .round()
        .clamp(0.0, 100.0) as u8
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    text.trim().chars().take(max_chars).collect()
}

fn malformed(reason: String) -> jackpot_core::errors::JackpotError {
    ExternalServiceError::MalformedResponse {
        service: "oracle".to_string(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"{
        "top_3": [
            {"answer": "Monopoly", "confidence": 92, "explanation": "takeover, dice, jail"},
            {"answer": "Risk", "confidence": 145, "explanation": "conquest"},
            {"answer": "Life", "confidence": "30%", "explanation": "flavors of life"},
            {"answer": "Clue", "confidence": 5, "explanation": "extra"}
        ],
        "key_theme": "Board games with a business twist",
        "blind_spot": "dicey may mean risky",
        "misdirection_detected": "flavors as editions"
    }"#;

    #[test]
    fn parses_and_clamps() {
        let s = parse_synthesis(REPLY).unwrap();
        assert_eq!(s.top_3.len(), 3);
        assert_eq!(s.top_3[0].answer, "Monopoly");
        assert_eq!(s.top_3[1].confidence, 100);
        assert_eq!(s.top_3[2].confidence, 30);
        assert_eq!(s.misdirection_detected.as_deref(), Some("flavors as editions"));
        assert!(!s.degraded);
    }

    #[test]
    fn tolerates_code_fences() {
        let fenced = format!("```json\n{REPLY}\n```");
        assert_eq!(parse_synthesis(&fenced).unwrap().top_answer(), Some("Monopoly"));
    }

    #[test]
    fn truncates_long_explanations() {
        let long = "x".repeat(400);
        let reply = format!(r#"{{"top_3": [{{"answer": "A", "confidence": 1, "explanation": "{long}"}}]}}"#);
        let s = parse_synthesis(&reply).unwrap();
        assert_eq!(s.top_3[0].explanation.chars().count(), MAX_EXPLANATION_CHARS);
        assert_eq!(s.key_theme, "Analysis pending");
    }

    #[test]
    fn rejects_prose_and_empty_guesses() {
        assert!(parse_synthesis("I believe it is Monopoly.").is_err());
        assert!(parse_synthesis(r#"{"top_3": []}"#).is_err());
        assert!(parse_synthesis(r#"{"top_3": [{"answer": "  "}]}"#).is_err());
    }
}
