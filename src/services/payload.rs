//! Normalizes the values of an open form into a play submission.

use crate::{
    dto::play::{
        ExtraPointAttempt, ExtraPointDetails, ExtraPointResult, FieldGoalDetails,
        FieldGoalResult, KickoffDetails, PassDetails, PenaltyDetails, PlayDetails, PlayRequest,
        PuntDetails, RunDetails, SituationSnapshot,
    },
    state::form::{FormSession, PlayType, fields},
};

const DEFAULT_KICK_YARDS: i32 = 60;
const DEFAULT_PUNT_YARDS: i32 = 40;
const DEFAULT_KICK_DISTANCE: i32 = 30;
const DEFAULT_PENALTY_YARDS: i32 = 5;

/// Build the request for `form`, prefixed with the current situation.
///
/// Numeric fields that do not parse fall back to their defaults; unselected radio groups
/// fall back to their documented default member.
pub fn build_request(form: &FormSession, situation: SituationSnapshot) -> PlayRequest {
    let details = match form.play_type() {
        PlayType::Run => PlayDetails::Run(run(form)),
        PlayType::Pass => PlayDetails::Pass(pass(form)),
        PlayType::Penalty => PlayDetails::Penalty(penalty(form)),
        PlayType::Kickoff => PlayDetails::Kickoff(KickoffDetails {
            kicker: form.player(fields::KICKER),
            kick_yards: form.number(fields::KICK_YARDS, DEFAULT_KICK_YARDS),
            is_touchback: form.is_active(fields::IS_TOUCHBACK),
            is_onside_kick: form.is_active(fields::IS_ONSIDE_KICK),
            out_of_bounds: form.is_active(fields::OUT_OF_BOUNDS),
            notes: notes(form),
        }),
        PlayType::Punt => PlayDetails::Punt(PuntDetails {
            punter: form.player(fields::PUNTER),
            punt_yards: form.number(fields::PUNT_YARDS, DEFAULT_PUNT_YARDS),
            is_touchback: form.is_active(fields::IS_TOUCHBACK),
            is_blocked: form.is_active(fields::IS_BLOCKED),
            out_of_bounds: form.is_active(fields::OUT_OF_BOUNDS),
            notes: notes(form),
        }),
        PlayType::FieldGoal => PlayDetails::FieldGoal(field_goal(form)),
        PlayType::ExtraPoint => PlayDetails::ExtraPoint(extra_point(form)),
    };

    PlayRequest { situation, details }
}

fn notes(form: &FormSession) -> String {
    form.text(fields::NOTES).to_string()
}

fn run(form: &FormSession) -> RunDetails {
    let fumbled = form.is_active(fields::FUMBLED);
    RunDetails {
        ball_carrier: form.player(fields::BALL_CARRIER),
        yards_gained: form.number(fields::YARDS_GAINED, 0),
        is_touchdown: form.is_active(fields::IS_TOUCHDOWN),
        is_first_down: form.is_active(fields::IS_FIRST_DOWN),
        fumbled,
        fumble_lost: fumbled,
        notes: notes(form),
    }
}

/// A sack carries its loss in `sack_yards`, never in `yards_gained`.
fn pass(form: &FormSession) -> PassDetails {
    let was_sacked = form.is_active(fields::WAS_SACKED);
    let yards = form.number(fields::YARDS_GAINED, 0);
    let fumbled = form.is_active(fields::FUMBLED);
    PassDetails {
        quarterback: form.player(fields::QUARTERBACK),
        receiver: form.player(fields::RECEIVER),
        is_complete: form.is_active(fields::IS_COMPLETE),
        yards_gained: if was_sacked { 0 } else { yards },
        is_touchdown: form.is_active(fields::IS_TOUCHDOWN),
        is_first_down: form.is_active(fields::IS_FIRST_DOWN),
        is_interception: form.is_active(fields::IS_INTERCEPTION),
        was_sacked,
        sack_yards: if was_sacked {
            -yards.saturating_abs()
        } else {
            0
        },
        fumbled,
        fumble_lost: fumbled,
        notes: notes(form),
    }
}

fn penalty(form: &FormSession) -> PenaltyDetails {
    let accepted = form.is_active(fields::ACCEPTED);
    PenaltyDetails {
        penalty_description: form.text(fields::PENALTY_NAME).to_string(),
        penalty_yards: form.number(fields::PENALTY_YARDS_INPUT, DEFAULT_PENALTY_YARDS),
        on_offense: form.text(fields::PENALTY_ON_OFFENSE) == "true",
        accepted,
        declined: !accepted,
        repeat_down: form.is_active(fields::REPEAT_DOWN),
        auto_first_down: form.is_active(fields::AUTO_FIRST_DOWN),
        notes: notes(form),
    }
}

fn field_goal(form: &FormSession) -> FieldGoalDetails {
    let result = match form.active_in(&[fields::FG_GOOD, fields::FG_BLOCK]) {
        Some(fields::FG_GOOD) => FieldGoalResult::Good,
        Some(_) => FieldGoalResult::Block,
        None => FieldGoalResult::default(),
    };
    FieldGoalDetails {
        kicker: form.player(fields::KICKER),
        kick_distance: form.number(fields::KICK_DISTANCE, DEFAULT_KICK_DISTANCE),
        result,
        notes: notes(form),
    }
}

fn extra_point(form: &FormSession) -> ExtraPointDetails {
    let attempt_type = match form.active_in(&[fields::TWO_PT_RUN, fields::TWO_PT_PASS]) {
        Some(fields::TWO_PT_RUN) => ExtraPointAttempt::TwoPointRun,
        Some(_) => ExtraPointAttempt::TwoPointPass,
        None => ExtraPointAttempt::default(),
    };
    let result = if form.is_active(fields::EP_GOOD) {
        ExtraPointResult::Good
    } else {
        ExtraPointResult::default()
    };
    ExtraPointDetails {
        attempt_type,
        result,
        kicker: match attempt_type {
            ExtraPointAttempt::Kick => form.player(fields::EP_KICKER),
            _ => None,
        },
        notes: notes(form),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        services::form_factory::build_form,
        state::{
            game::GameState,
            penalty::PenaltyCatalog,
            roster::{Player, Roster},
        },
    };

    fn open(play_type: PlayType) -> FormSession {
        let roster = Roster::new(
            [(22, "RB"), (4, "K")]
                .into_iter()
                .map(|(id, position)| Player {
                    id,
                    number: id as u32,
                    first_name: "Pat".into(),
                    last_name: format!("Player{id}"),
                    position: position.into(),
                })
                .collect(),
        );
        FormSession::from_spec(&build_form(play_type, &roster, &PenaltyCatalog))
    }

    fn situation() -> SituationSnapshot {
        GameState {
            quarter: 2,
            down: Some(3),
            distance: Some(7),
            ball_position: Some(-10),
            ..GameState::default()
        }
        .situation()
    }

    #[test]
    fn run_payload_carries_situation_and_fumble_lost() {
        let mut form = open(PlayType::Run);
        form.set_player(fields::BALL_CARRIER, Some(22)).unwrap();
        form.set_number(fields::YARDS_GAINED, "12").unwrap();
        form.toggle(fields::FUMBLED).unwrap();
        form.set_text(fields::NOTES, "outside zone").unwrap();

        let request = build_request(&form, situation());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "quarter": 2, "down": 3, "distance": 7, "ball_position": -10,
                "ball_carrier": 22, "yards_gained": 12, "is_touchdown": false,
                "is_first_down": false, "fumbled": true, "fumble_lost": true,
                "notes": "outside zone"
            })
        );
    }

    #[test]
    fn sack_moves_yardage_into_sack_yards() {
        let mut form = open(PlayType::Pass);
        form.toggle(fields::WAS_SACKED).unwrap();
        form.set_number(fields::YARDS_GAINED, "7").unwrap();

        let PlayDetails::Pass(details) = build_request(&form, situation()).details else {
            panic!("expected pass details");
        };
        assert!(details.was_sacked);
        assert_eq!(details.yards_gained, 0);
        assert_eq!(details.sack_yards, -7);

        form.set_number(fields::YARDS_GAINED, "-4").unwrap();
        let PlayDetails::Pass(details) = build_request(&form, situation()).details else {
            panic!("expected pass details");
        };
        assert_eq!(details.sack_yards, -4);

        form.toggle(fields::WAS_SACKED).unwrap();
        let PlayDetails::Pass(details) = build_request(&form, situation()).details else {
            panic!("expected pass details");
        };
        assert_eq!(details.yards_gained, -4);
        assert_eq!(details.sack_yards, 0);
    }

    #[test]
    fn field_goal_defaults_to_miss() {
        let mut form = open(PlayType::FieldGoal);
        let PlayDetails::FieldGoal(details) = build_request(&form, situation()).details else {
            panic!("expected field goal details");
        };
        assert_eq!(details.result, FieldGoalResult::Miss);
        assert_eq!(details.kick_distance, 30);

        form.toggle(fields::FG_BLOCK).unwrap();
        let PlayDetails::FieldGoal(details) = build_request(&form, situation()).details else {
            panic!("expected field goal details");
        };
        assert_eq!(details.result, FieldGoalResult::Block);
    }

    #[test]
    fn extra_point_kicker_only_for_kicks() {
        let mut form = open(PlayType::ExtraPoint);
        form.set_player(fields::EP_KICKER, Some(4)).unwrap();

        let PlayDetails::ExtraPoint(details) = build_request(&form, situation()).details else {
            panic!("expected extra point details");
        };
        assert_eq!(details.attempt_type, ExtraPointAttempt::Kick);
        assert_eq!(details.result, ExtraPointResult::Miss);
        assert_eq!(details.kicker, Some(4));

        form.toggle(fields::TWO_PT_PASS).unwrap();
        form.toggle(fields::EP_GOOD).unwrap();
        let PlayDetails::ExtraPoint(details) = build_request(&form, situation()).details else {
            panic!("expected extra point details");
        };
        assert_eq!(details.attempt_type, ExtraPointAttempt::TwoPointPass);
        assert_eq!(details.result, ExtraPointResult::Good);
        assert_eq!(details.kicker, None);
    }

    #[test]
    fn penalty_declined_mirrors_accepted() {
        let mut form = open(PlayType::Penalty);
        form.choose_penalty(14, &PenaltyCatalog).unwrap();
        form.toggle(fields::DECLINED).unwrap();

        let PlayDetails::Penalty(details) = build_request(&form, situation()).details else {
            panic!("expected penalty details");
        };
        assert_eq!(details.penalty_description, "Facemask");
        assert_eq!(details.penalty_yards, 15);
        assert!(!details.on_offense);
        assert!(!details.accepted);
        assert!(details.declined);
        assert!(details.auto_first_down);
    }

    #[test]
    fn non_numeric_yardage_falls_back_to_default() {
        let mut form = open(PlayType::Kickoff);
        form.set_number(fields::KICK_YARDS, "far").unwrap();
        let PlayDetails::Kickoff(details) = build_request(&form, situation()).details else {
            panic!("expected kickoff details");
        };
        assert_eq!(details.kick_yards, 60);
    }
}
