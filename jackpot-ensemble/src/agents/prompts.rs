use jackpot_core::constants::MAX_CLUES;
use jackpot_core::models::{AgentStrategy, Category, ClueInsight};

use crate::trail::render_prior_analysis;

const RESPONSE_FORMAT: &str = "\
Respond in exactly this format:
ANSWER: <your single best answer, canonical spelling>
CONFIDENCE: <integer 0-100>
REASONING: <two to four words>";

const CONTEXT: &str = "\
Clues are written to mislead: expect double meanings and category traps. \
The answer is a person, place or thing; things are the most common.";

fn specialty(agent: AgentStrategy) -> &'static str {
    match agent {
        AgentStrategy::Lateral => {
            "Chain associations across clues. Take each key word through two or three \
             related concepts and look for where the chains from different clues meet. \
             Riddle-like clues usually describe an everyday object."
        }
        AgentStrategy::Wordsmith => {
            "Read every clue as wordplay first. Look for puns, homophones, idioms and \
             words with a second meaning (flavors can mean editions, dicey can mean dice)."
        }
        AgentStrategy::PopCulture => {
            "Favor what is famous right now: celebrities, brands, shows, viral moments \
             and well-known quotes. A clue that sounds generic often points at something trending."
        }
        AgentStrategy::Literal => {
            "Take the clues at face value and name the most direct fit, then check it \
             against every clue. Reject answers that only fit one clue."
        }
        AgentStrategy::WildCard => {
            "Propose the answer the others are least likely to reach. Prefer a creative \
             but defensible fit over the obvious one."
        }
    }
}

/// System prompt for one strategy. Starts with the strategy title.
pub fn system_prompt(agent: AgentStrategy) -> String {
    format!(
        "You are the {} on a trivia prediction team.\n\n{}\n\n{}\n\n{}",
        agent.title(),
        CONTEXT,
        specialty(agent),
        RESPONSE_FORMAT
    )
}

/// Sampling temperature per strategy.
pub fn temperature(agent: AgentStrategy) -> f64 {
    match agent {
        AgentStrategy::Literal => 0.1,
        AgentStrategy::WildCard => 0.9,
        _ => 0.2,
    }
}

/// The clue list as sent to every agent, after the conclusions drawn on
/// earlier clues.
pub fn user_prompt(clues: &[String], category_hint: Option<Category>, prior: &[ClueInsight]) -> String {
    let mut lines = Vec::with_capacity(clues.len() + 8);
    if let Some(category) = category_hint {
        lines.push(format!("[Category hint: {}]", category.as_str().to_uppercase()));
        lines.push(String::new());
    }
    if let Some(context) = render_prior_analysis(prior) {
        lines.push(context);
        lines.push(String::new());
    }
    lines.push("CLUES REVEALED:".to_string());
    for (i, clue) in clues.iter().enumerate() {
        lines.push(format!("  Clue {}: \"{}\"", i + 1, clue.trim()));
    }
    lines.push(String::new());
    lines.push(format!("We are on Clue {} of {MAX_CLUES}.", clues.len()));
    lines.push("Provide your prediction.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_name_only_their_own_title() {
        for agent in AgentStrategy::ALL {
            let prompt = system_prompt(agent);
            for other in AgentStrategy::ALL {
                assert_eq!(prompt.contains(other.title()), other == agent, "{agent} vs {other}");
            }
            assert!(!prompt.contains("Oracle"));
        }
    }

    #[test]
    fn user_prompt_lists_clues_and_position() {
        let clues = vec!["Savors many flavors".to_string(), "Round and round".to_string()];
        let prompt = user_prompt(&clues, Some(Category::Thing), &[]);
        assert!(prompt.starts_with("[Category hint: THING]"));
        assert!(prompt.contains("Clue 2: \"Round and round\""));
        assert!(prompt.contains("We are on Clue 2 of 5."));
        assert!(!prompt.contains("PRIOR ANALYSIS"));
    }

    #[test]
    fn earlier_conclusions_come_before_the_clues() {
        use jackpot_core::models::AgreementStrength;

        let clues = vec!["Savors many flavors".to_string(), "Round and round".to_string()];
        let first = ClueInsight {
            clue_index: 1,
            clue_text: clues[0].clone(),
            top_answer: Some("Ice Cream".into()),
            top_confidence: 0.6,
            top_agents: vec![AgentStrategy::Literal, AgentStrategy::PopCulture],
            alt_answer: None,
            alt_confidence: None,
            confidence_delta: None,
            agreement_strength: AgreementStrength::Moderate,
            agent_snapshots: Vec::new(),
            oracle_pick: None,
            key_theme: None,
        };
        let prompt = user_prompt(&clues, None, &[first]);
        let context = prompt.find("PRIOR ANALYSIS:").unwrap();
        let revealed = prompt.find("CLUES REVEALED:").unwrap();
        assert!(context < revealed);
        assert!(prompt.contains(">> VOTE: Ice Cream (2/5 agree, moderate) [NEW]"));
    }

    #[test]
    fn wild_card_runs_hot() {
        assert!(temperature(AgentStrategy::WildCard) > temperature(AgentStrategy::Lateral));
        assert!(temperature(AgentStrategy::Literal) < temperature(AgentStrategy::Lateral));
    }
}
