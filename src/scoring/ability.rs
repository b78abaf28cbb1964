//! Extra-question ability.
//!
//! During the fixed question cycle a player may pay the ability cost to ask
//! one extra question of a chosen target. Once per player per round, paid up
//! front; only the base-commit refund gives the points back.

use tracing::debug;

use crate::core::{Roster, Round, TransitionError};
use crate::turns::QuestionTurn;

/// Check whether `asker` may buy an extra question of `target`.
pub fn check_purchase(
    roster: &Roster,
    round: &Round,
    asker: &str,
    target: &str,
    cost: i64,
) -> Result<(), TransitionError> {
    let buyer = roster
        .get(asker)
        .ok_or_else(|| TransitionError::UnknownPlayer(asker.to_string()))?;
    if !roster.contains(target) {
        return Err(TransitionError::UnknownPlayer(target.to_string()));
    }
    if asker == target {
        return Err(TransitionError::SelfTarget);
    }
    if round.ability_used_by.contains(asker) {
        return Err(TransitionError::AbilityAlreadyUsed(asker.to_string()));
    }
    if buyer.score() < cost {
        return Err(TransitionError::InsufficientPoints {
            name: asker.to_string(),
            score: buyer.score(),
            cost,
        });
    }
    Ok(())
}

/// Buy the ability: deduct `cost`, mark the asker and queue the question.
pub fn purchase(
    roster: &mut Roster,
    round: &mut Round,
    asker: &str,
    target: &str,
    cost: i64,
) -> Result<QuestionTurn, TransitionError> {
    check_purchase(roster, round, asker, target, cost)?;

    if let Some(buyer) = roster.get_mut(asker) {
        buyer.adjust_score(-cost);
    }
    round.ability_used_by.insert(asker.to_string());
    let turn = QuestionTurn::new(asker, target);
    round.extra_questions.push(turn.clone());
    debug!(asker, target, cost, "ability purchased");
    Ok(turn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameMode, SpyCountPolicy};
    use crate::words::Category;

    fn setup(scores: &[(&str, i64)]) -> (Roster, Round) {
        let mut roster = Roster::new();
        for (name, score) in scores {
            roster.add(name, 0, 8).unwrap();
            roster.get_mut(name).unwrap().adjust_score(*score);
        }
        let round = Round::new(
            1,
            GameMode::Spy,
            SpyCountPolicy::Single,
            Category::random(),
            vec!["C".into()],
            "Pizza".into(),
            None,
        );
        (roster, round)
    }

    #[test]
    fn test_purchase_deducts_and_records() {
        let (mut roster, mut round) = setup(&[("A", 200), ("B", 0), ("C", 0)]);

        let turn = purchase(&mut roster, &mut round, "A", "B", 200).unwrap();
        assert_eq!(turn, QuestionTurn::new("A", "B"));
        assert_eq!(roster.get("A").unwrap().score(), 0);
        assert!(round.ability_used_by.contains("A"));
        assert_eq!(round.extra_questions.len(), 1);
    }

    #[test]
    fn test_purchase_once_per_round() {
        let (mut roster, mut round) = setup(&[("A", 600), ("B", 0), ("C", 0)]);
        purchase(&mut roster, &mut round, "A", "B", 200).unwrap();

        assert_eq!(
            purchase(&mut roster, &mut round, "A", "C", 200),
            Err(TransitionError::AbilityAlreadyUsed("A".into()))
        );
        assert_eq!(roster.get("A").unwrap().score(), 400);
    }

    #[test]
    fn test_purchase_rejections_leave_score() {
        let (mut roster, mut round) = setup(&[("A", 199), ("B", 500), ("C", 0)]);

        assert_eq!(
            purchase(&mut roster, &mut round, "A", "B", 200),
            Err(TransitionError::InsufficientPoints {
                name: "A".into(),
                score: 199,
                cost: 200
            })
        );
        assert_eq!(purchase(&mut roster, &mut round, "B", "B", 200), Err(TransitionError::SelfTarget));
        assert_eq!(
            purchase(&mut roster, &mut round, "B", "Zed", 200),
            Err(TransitionError::UnknownPlayer("Zed".into()))
        );
        assert_eq!(roster.get("A").unwrap().score(), 199);
        assert_eq!(roster.get("B").unwrap().score(), 500);
        assert!(round.ability_used_by.is_empty());
    }
}
