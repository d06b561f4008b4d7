//! Guess-now recommendation.

use jackpot_core::config::SessionConfig;
use jackpot_core::constants::MAX_CLUES;
use jackpot_core::models::{GuessRecommendation, RankedEntity};

/// Advise guessing when the leader's confidence clears the threshold for
/// this clue. The last clue always guesses if there is a leader.
pub fn recommend(
    config: &SessionConfig,
    clue_index: usize,
    top: Option<&RankedEntity>,
) -> GuessRecommendation {
    let final_clue = clue_index >= MAX_CLUES;
    let threshold = if final_clue {
        0.0
    } else {
        config.guess_threshold(clue_index)
    };

    let Some(top) = top else {
        return GuessRecommendation {
            should_guess: false,
            threshold,
            top_confidence: 0.0,
            rationale: "No candidates to guess".to_string(),
        };
    };

    let should_guess = final_clue || top.confidence >= threshold;
    let rationale = if final_clue {
        format!("Final clue: guess {}", top.name)
    } else if should_guess {
        format!(
            "{} at {:.0}% confidence clears the {:.0}% bar for clue {clue_index}",
            top.name,
            top.confidence * 100.0,
            threshold * 100.0
        )
    } else {
        format!(
            "{} at {:.0}% confidence is under the {:.0}% bar for clue {clue_index}",
            top.name,
            top.confidence * 100.0,
            threshold * 100.0
        )
    };

    GuessRecommendation {
        should_guess,
        threshold,
        top_confidence: top.confidence,
        rationale,
    }
}

#[cfg(test)]
mod tests {
    use jackpot_core::models::Category;

    use super::*;

    fn leader(confidence: f64) -> RankedEntity {
        RankedEntity {
            name: "Monopoly".into(),
            category: Category::Thing,
            probability: 0.4,
            confidence,
            reasoning: String::new(),
            evidence: Vec::new(),
        }
    }

    #[test]
    fn thresholds_follow_the_clue_index() {
        let config = SessionConfig::default();
        assert!(!recommend(&config, 1, Some(&leader(0.45))).should_guess);
        assert!(recommend(&config, 1, Some(&leader(0.55))).should_guess);
        assert!(!recommend(&config, 3, Some(&leader(0.70))).should_guess);
        assert!(recommend(&config, 3, Some(&leader(0.75))).should_guess);
        assert!(!recommend(&config, 4, Some(&leader(0.50))).should_guess);
        assert!(recommend(&config, 4, Some(&leader(0.90))).should_guess);
    }

    #[test]
    fn bar_rises_until_the_final_clue() {
        let config = SessionConfig::default();
        let bars: Vec<f64> = (1..MAX_CLUES)
            .map(|clue| recommend(&config, clue, Some(&leader(0.0))).threshold)
            .collect();
        assert!(bars.windows(2).all(|w| w[0] < w[1]), "bars {bars:?}");
        assert!((bars[0] - 0.50).abs() < f64::EPSILON);
        assert!((bars[3] - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn last_clue_always_guesses() {
        let rec = recommend(&SessionConfig::default(), 5, Some(&leader(0.01)));
        assert!(rec.should_guess);
        assert_eq!(rec.threshold, 0.0);
        assert!(rec.rationale.starts_with("Final clue"));
    }

    #[test]
    fn nothing_to_guess_without_a_leader() {
        let rec = recommend(&SessionConfig::default(), 5, None);
        assert!(!rec.should_guess);
        assert_eq!(rec.top_confidence, 0.0);
    }
}
