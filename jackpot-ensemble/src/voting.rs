use std::cmp::Ordering;

use jackpot_core::config::EnsembleConfig;
use jackpot_core::models::{
    AgentOutcome, AgentStrategy, AgreementStrength, ClueStage, VoteTally, VotingResult,
};
use tracing::debug;

const ARTICLES: [&str; 3] = ["the ", "a ", "an "];

/// Comparison key for an answer: trimmed, lowercased, leading article dropped.
pub fn normalize_answer(answer: &str) -> String {
    let lowered = answer.trim().to_lowercase();
    ARTICLES
        .iter()
        .find_map(|article| lowered.strip_prefix(article))
        .map(|rest| rest.trim_start().to_string())
        .unwrap_or(lowered)
}

/// Strategy weight by stage: wordplay early, literal late.
pub fn stage_weight(agent: AgentStrategy, stage: ClueStage) -> f64 {
    use AgentStrategy::*;
    let row: [f64; 5] = match stage {
        ClueStage::PolysemyTrap => [1.5, 1.5, 1.0, 0.5, 1.2],
        ClueStage::Functional => [1.3, 1.3, 1.1, 0.7, 1.0],
        ClueStage::PopCulturePivot => [1.0, 1.0, 1.2, 1.0, 0.8],
        ClueStage::DirectHint => [0.9, 0.9, 1.1, 1.2, 0.7],
        ClueStage::Giveaway => [0.8, 0.8, 1.0, 1.3, 0.6],
    };
    match agent {
        Lateral => row[0],
        Wordsmith => row[1],
        PopCulture => row[2],
        Literal => row[3],
        WildCard => row[4],
    }
}

struct Bucket {
    key: String,
    tally: VoteTally,
    confidence_sum: f64,
    best: Option<(f64, String)>,
}

/// Weighted vote over the agents that responded.
///
/// Each vote weighs the agent's confidence, scaled by [`stage_weight`] when
/// enabled. Absent agents do not count toward agreement.
pub fn vote(outcomes: &[AgentOutcome], stage: ClueStage, config: &EnsembleConfig) -> VotingResult {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut responding = 0;

    for prediction in outcomes.iter().filter_map(AgentOutcome::prediction) {
        let key = normalize_answer(&prediction.answer);
        if key.is_empty() {
            continue;
        }
        responding += 1;

        let scale = if config.stage_weights_enabled {
            stage_weight(prediction.agent, stage)
        } else {
            1.0
        };
        let index = match buckets.iter().position(|b| b.key == key) {
            Some(i) => i,
            None => {
                buckets.push(Bucket {
                    key,
                    tally: VoteTally {
                        answer: prediction.answer.trim().to_string(),
                        weight: 0.0,
                        agents: Vec::new(),
                        avg_confidence: 0.0,
                    },
                    confidence_sum: 0.0,
                    best: None,
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[index];
        bucket.tally.weight += prediction.confidence * scale;
        bucket.tally.agents.push(prediction.agent);
        bucket.confidence_sum += prediction.confidence;
        if bucket.best.as_ref().map_or(true, |(c, _)| prediction.confidence > *c) {
            bucket.best = Some((prediction.confidence, prediction.reasoning.clone()));
        }
    }

    if responding == 0 {
        return VotingResult::empty();
    }

    for bucket in &mut buckets {
        bucket.tally.avg_confidence = bucket.confidence_sum / bucket.tally.agents.len() as f64;
    }
    buckets.sort_by(|a, b| {
        b.tally
            .weight
            .partial_cmp(&a.tally.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| earliest(&a.tally).cmp(&earliest(&b.tally)))
    });

    let supporters = buckets[0].tally.agents.len();
    let agreement_strength = agreement(supporters, responding, config);
    let key_insight = buckets[0].best.as_ref().map(|(_, r)| r.clone());
    let recommended_pick = Some(buckets[0].tally.answer.clone());
    let recommended_confidence = buckets[0].tally.avg_confidence;

    debug!(
        pick = ?recommended_pick,
        supporters,
        responding,
        agreement = ?agreement_strength,
        "ensemble vote"
    );

    VotingResult {
        vote_breakdown: buckets.into_iter().map(|b| b.tally).collect(),
        recommended_pick,
        recommended_confidence,
        agreement_strength,
        responding_agents: responding,
        key_insight,
    }
}

fn earliest(tally: &VoteTally) -> usize {
    tally
        .agents
        .iter()
        .map(|a| a.priority())
        .min()
        .unwrap_or(usize::MAX)
}

fn agreement(supporters: usize, responding: usize, config: &EnsembleConfig) -> AgreementStrength {
    if responding == 0 || supporters == 0 {
        return AgreementStrength::None;
    }
    let share = supporters as f64 / responding as f64;
    if responding >= config.strong_min_responders && share >= config.strong_agreement_ratio {
        AgreementStrength::Strong
    } else if supporters >= config.moderate_min_supporters {
        AgreementStrength::Moderate
    } else {
        AgreementStrength::Weak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_articles_and_case() {
        assert_eq!(normalize_answer("  The Eiffel Tower "), "eiffel tower");
        assert_eq!(normalize_answer("an Apple"), "apple");
        assert_eq!(normalize_answer("Theater"), "theater");
        assert_eq!(normalize_answer("A"), "a");
    }

    #[test]
    fn literal_gains_weight_late() {
        assert!(
            stage_weight(AgentStrategy::Literal, ClueStage::Giveaway)
                > stage_weight(AgentStrategy::Literal, ClueStage::PolysemyTrap)
        );
        assert!(
            stage_weight(AgentStrategy::Wordsmith, ClueStage::PolysemyTrap)
                > stage_weight(AgentStrategy::Wordsmith, ClueStage::Giveaway)
        );
    }

    #[test]
    fn agreement_thresholds() {
        let config = EnsembleConfig::default();
        assert_eq!(agreement(4, 5, &config), AgreementStrength::Strong);
        assert_eq!(agreement(3, 3, &config), AgreementStrength::Strong);
        assert_eq!(agreement(3, 5, &config), AgreementStrength::Moderate);
        assert_eq!(agreement(2, 2, &config), AgreementStrength::Moderate);
        assert_eq!(agreement(1, 5, &config), AgreementStrength::Weak);
        assert_eq!(agreement(0, 0, &config), AgreementStrength::None);
    }
}
