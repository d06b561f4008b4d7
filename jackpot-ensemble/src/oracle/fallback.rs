use jackpot_core::constants::{MAX_THEME_CHARS, ORACLE_TOP_N};
use jackpot_core::models::{OracleGuess, OracleSynthesis, RankedEntity, VotingResult};

use super::parse::truncate;
use crate::voting::normalize_answer;

/// Local synthesis used when the oracle is unavailable.
///
/// The Bayesian leader comes first, then the voting pick if it differs,
/// then further Bayesian candidates up to three guesses.
pub fn fallback_synthesis(
    candidates: &[RankedEntity],
    voting: &VotingResult,
    reason: &str,
    latency_ms: u64,
) -> OracleSynthesis {
    let mut top_3: Vec<OracleGuess> = Vec::with_capacity(ORACLE_TOP_N);
    let mut push = |guess: OracleGuess| {
        let key = normalize_answer(&guess.answer);
        if top_3.len() < ORACLE_TOP_N && !top_3.iter().any(|g| normalize_answer(&g.answer) == key) {
            top_3.push(guess);
        }
    };

    let mut rest = candidates.iter();
    if let Some(leader) = rest.next() {
        push(from_candidate(leader, "Bayesian leader"));
    }
    if let Some(pick) = &voting.recommended_pick {
        push(OracleGuess {
            answer: pick.clone(),
            confidence: to_percent(voting.recommended_confidence),
            explanation: format!(
                "Agent vote, {} of {} agents",
                voting.vote_breakdown.first().map_or(0, |t| t.agents.len()),
                voting.responding_agents
            ),
        });
    }
    for candidate in rest {
        push(from_candidate(candidate, "Bayesian candidate"));
    }

    OracleSynthesis {
        top_3,
        key_theme: "Oracle unavailable; local synthesis".to_string(),
        blind_spot: "None identified".to_string(),
        misdirection_detected: None,
        degraded: true,
        degradation_reason: Some(truncate(reason, MAX_THEME_CHARS)),
        latency_ms,
    }
}

fn from_candidate(candidate: &RankedEntity, label: &str) -> OracleGuess {
    OracleGuess {
        answer: candidate.name.clone(),
        confidence: to_percent(candidate.confidence),
        explanation: format!("{label} (p={:.2})", candidate.probability),
    }
}

fn to_percent(value: f64) -> u8 {
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}
