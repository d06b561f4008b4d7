//! Conclusions carried from one clue to the next.
//!
//! After each clue the vote and the oracle's pick are condensed into a
//! [`ClueInsight`]. Later clues see the trail as a prompt section, and the
//! caller gets a per-answer confidence history.

use jackpot_core::models::{
    AgentOutcome, AgentSnapshot, ClueInsight, ConfidenceTrend, HypothesisTrack, OracleSynthesis,
    VotingResult,
};

use crate::voting::normalize_answer;

const INSIGHT_CHARS: usize = 50;
const QUOTED_INSIGHT_CHARS: usize = 40;
/// Smallest clue-to-clue confidence change shown as movement.
const STEP_DELTA: f64 = 0.05;
/// Smallest change over the whole trail that counts as a trend.
const TREND_DELTA: f64 = 0.1;

/// Condense one clue's vote and synthesis.
///
/// `previous` is the insight of the clue before, if it ran the full pipeline.
pub fn capture(
    clue_index: usize,
    clue_text: &str,
    outcomes: &[AgentOutcome],
    voting: &VotingResult,
    oracle: &OracleSynthesis,
    previous: Option<&ClueInsight>,
) -> ClueInsight {
    let top = voting.vote_breakdown.first();
    let alt = voting.vote_breakdown.get(1);
    let top_confidence = top.map_or(0.0, |t| t.avg_confidence);

    let agent_snapshots = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            AgentOutcome::Responded(p) => Some(AgentSnapshot {
                agent: p.agent,
                answer: p.answer.clone(),
                confidence: p.confidence,
                insight: p.reasoning.trim().chars().take(INSIGHT_CHARS).collect(),
            }),
            AgentOutcome::Absent { .. } => None,
        })
        .collect();

    let (oracle_pick, key_theme) = if oracle.degraded {
        (None, None)
    } else {
        let theme = oracle.key_theme.trim();
        (
            oracle.top_3.first().cloned(),
            (!theme.is_empty()).then(|| theme.to_string()),
        )
    };

    ClueInsight {
        clue_index,
        clue_text: clue_text.trim().to_string(),
        top_answer: top.map(|t| t.answer.clone()),
        top_confidence,
        top_agents: top.map(|t| t.agents.clone()).unwrap_or_default(),
        alt_answer: alt.map(|t| t.answer.clone()),
        alt_confidence: alt.map(|t| t.avg_confidence),
        confidence_delta: previous.map(|p| top_confidence - p.top_confidence),
        agreement_strength: voting.agreement_strength,
        agent_snapshots,
        oracle_pick,
        key_theme,
    }
}

/// The trail as an agent prompt section. None when there is no trail.
pub fn render_prior_analysis(trail: &[ClueInsight]) -> Option<String> {
    if trail.is_empty() {
        return None;
    }

    let mut lines = vec!["PRIOR ANALYSIS:".to_string(), String::new()];
    for insight in trail {
        lines.push(format!("=== CLUE {}: \"{}\" ===", insight.clue_index, insight.clue_text));
        for snapshot in &insight.agent_snapshots {
            let quoted: String = snapshot
                .insight
                .replace('"', "'")
                .chars()
                .take(QUOTED_INSIGHT_CHARS)
                .collect();
            lines.push(format!(
                "  {}: {} ({:.0}%) - \"{quoted}\"",
                snapshot.agent,
                snapshot.answer,
                snapshot.confidence * 100.0
            ));
        }
        match &insight.top_answer {
            Some(answer) => lines.push(format!(
                "  >> VOTE: {answer} ({}/5 agree, {}) {}",
                insight.top_agents.len(),
                insight.agreement_strength.as_str(),
                step_marker(insight.confidence_delta)
            )),
            None => lines.push("  >> VOTE: no agent answered".to_string()),
        }
        if let Some(pick) = &insight.oracle_pick {
            lines.push(format!(
                "  >> ORACLE: {} ({}%) - \"{}\"",
                pick.answer,
                pick.confidence,
                insight.key_theme.as_deref().unwrap_or_default()
            ));
        }
        lines.push(String::new());
    }

    if trail.len() >= 2 {
        lines.push(format!("[TREND: {}]", summarize(trail)));
    } else {
        lines.pop();
    }
    Some(lines.join("\n"))
}

fn step_marker(delta: Option<f64>) -> String {
    match delta {
        None => "[NEW]".to_string(),
        Some(d) if d > STEP_DELTA => format!("[+{:.0}%]", d * 100.0),
        Some(d) if d < -STEP_DELTA => format!("[{:.0}%]", d * 100.0),
        Some(_) => "[stable]".to_string(),
    }
}

/// One line on how the leading answer moved across the trail.
fn summarize(trail: &[ClueInsight]) -> String {
    let (Some(first), Some(last)) = (trail.first(), trail.last()) else {
        return String::new();
    };
    let span = trail.len();
    match (first.top_answer.as_deref(), last.top_answer.as_deref()) {
        (Some(a), Some(b)) if normalize_answer(a) == normalize_answer(b) => {
            let delta = last.top_confidence - first.top_confidence;
            if delta > TREND_DELTA {
                format!("{b} strengthening (+{:.0}% over {span} clues)", delta * 100.0)
            } else if delta < -TREND_DELTA {
                format!("{b} weakening ({:.0}% over {span} clues)", delta * 100.0)
            } else {
                format!("{b} holding steady across {span} clues")
            }
        }
        (Some(a), Some(b)) => format!("Shifted from {a} to {b}"),
        (None, Some(b)) => format!("{b} emerged by clue {}", last.clue_index),
        (_, None) => format!("No agent consensus by clue {}", last.clue_index),
    }
}

/// Confidence history of every answer voted first or second, in order of
/// first appearance.
pub fn hypothesis_tracks(trail: &[ClueInsight]) -> Vec<HypothesisTrack> {
    let mut tracks: Vec<HypothesisTrack> = Vec::new();
    let mut record = |answer: &str, confidence: f64| {
        let key = normalize_answer(answer);
        if key.is_empty() {
            return;
        }
        match tracks.iter_mut().find(|t| t.answer == key) {
            Some(track) => track.history.push(confidence),
            None => tracks.push(HypothesisTrack {
                answer: key,
                history: vec![confidence],
                trend: ConfidenceTrend::New,
            }),
        }
    };

    for insight in trail {
        if let Some(answer) = &insight.top_answer {
            record(answer.as_str(), insight.top_confidence);
        }
        if let (Some(answer), Some(confidence)) = (&insight.alt_answer, insight.alt_confidence) {
            if confidence > 0.0 {
                record(answer.as_str(), confidence);
            }
        }
    }

    for track in &mut tracks {
        track.trend = trend_of(&track.history);
    }
    tracks
}

fn trend_of(history: &[f64]) -> ConfidenceTrend {
    let (Some(first), Some(last)) = (history.first(), history.last()) else {
        return ConfidenceTrend::New;
    };
    if history.len() < 2 {
        return ConfidenceTrend::New;
    }
    let delta = last - first;
    if delta > TREND_DELTA {
        ConfidenceTrend::Rising
    } else if delta < -TREND_DELTA {
        ConfidenceTrend::Falling
    } else {
        ConfidenceTrend::Stable
    }
}
