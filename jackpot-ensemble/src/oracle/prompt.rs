use jackpot_core::constants::MAX_CLUES;
use jackpot_core::models::{ClueInsight, RankedEntity, VotingResult};

pub const ORACLE_SYSTEM_PROMPT: &str = "\
You are the Oracle, the final synthesizer for a trivia prediction team.
You see the clue log, a probabilistic candidate ranking and a vote from five
specialist agents. Weigh them, look for the theme connecting every clue and
name what the others may be missing.

Reply with JSON only:
{
  \"top_3\": [
    {\"answer\": \"...\", \"confidence\": 0-100, \"explanation\": \"one or two sentences\"}
  ],
  \"key_theme\": \"five to ten words\",
  \"blind_spot\": \"five to fifteen words\",
  \"misdirection_detected\": \"the trap in the latest clue, or null\"
}
Give exactly three guesses, most likely first.";

const RULE: &str = "==================================================";

/// User prompt for the oracle. A pure function of its inputs.
pub fn build_prompt(
    candidates: &[RankedEntity],
    voting: &VotingResult,
    clues: &[String],
    prior: &[ClueInsight],
) -> String {
    let current = clues.len();
    let mut lines = vec![
        format!("CURRENT STATE: Clue {current} of {MAX_CLUES}"),
        String::new(),
        "CLUES REVEALED:".to_string(),
    ];
    for (i, clue) in clues.iter().enumerate() {
        let marker = if i + 1 == current { ">>>" } else { "   " };
        lines.push(format!("{marker} Clue {}: \"{}\"", i + 1, clue.trim()));
    }

    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push("BAYESIAN CANDIDATES:".to_string());
    lines.push(RULE.to_string());
    for (rank, c) in candidates.iter().enumerate() {
        lines.push(format!(
            "{}. {} [{}] p={:.3} confidence={:.0}%",
            rank + 1,
            c.name,
            c.category,
            c.probability,
            c.confidence * 100.0
        ));
    }

    lines.push(String::new());
    lines.push(RULE.to_string());
    lines.push("AGENT VOTE:".to_string());
    lines.push(RULE.to_string());
    match &voting.recommended_pick {
        Some(pick) => lines.push(format!(
            "Recommended: {pick} ({:.0}%, {} of {} agents, agreement {:?})",
            voting.recommended_confidence * 100.0,
            voting.vote_breakdown.first().map_or(0, |t| t.agents.len()),
            voting.responding_agents,
            voting.agreement_strength
        )),
        None => lines.push("No agent responded.".to_string()),
    }
    if let Some(insight) = &voting.key_insight {
        lines.push(format!("Key insight: {insight}"));
    }
    for tally in voting.vote_breakdown.iter().take(3) {
        let agents: Vec<&str> = tally.agents.iter().map(|a| a.name()).collect();
        lines.push(format!("  {}: {:.2} ({})", tally.answer, tally.weight, agents.join(", ")));
    }

    if !prior.is_empty() {
        lines.push(String::new());
        lines.push(RULE.to_string());
        lines.push("PRIOR CLUE ANALYSES:".to_string());
        lines.push(RULE.to_string());
        for insight in prior {
            lines.push(format!("Clue {}: \"{}\"", insight.clue_index, insight.clue_text));
            match &insight.top_answer {
                Some(answer) => lines.push(format!(
                    "  Top Pick: {answer} ({:.0}%)",
                    insight.top_confidence * 100.0
                )),
                None => lines.push("  Top Pick: none".to_string()),
            }
            lines.push(format!("  Agreement: {}", insight.agreement_strength.as_str()));
            if let Some(pick) = &insight.oracle_pick {
                lines.push(format!("  Oracle Pick: {} ({}%)", pick.answer, pick.confidence));
            }
        }
    }

    lines.push(String::new());
    lines.push("Provide your TOP 3 GUESSES as JSON.".to_string());
    lines.join("\n")
}
