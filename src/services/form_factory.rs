//! Builds the input description for each play type from the roster and penalty catalog.

use crate::state::{
    form::{
        FieldSpec, FormSpec, PenaltyOption, PlayType, PlayerOption, ToggleSpec, fields,
    },
    penalty::PenaltyCatalog,
    roster::Roster,
};

/// Common yardage deltas offered as one-tap shortcuts.
pub const QUICK_YARDS: [i32; 17] = [
    -10, -5, -2, -1, 0, 1, 2, 3, 4, 5, 7, 10, 15, 20, 30, 40, 50,
];

const RUSHERS: &[&str] = &["RB", "FB", "QB", "WR", "TE"];
const PASSERS: &[&str] = &["QB"];
const RECEIVERS: &[&str] = &["WR", "TE", "RB", "FB"];
const KICKERS: &[&str] = &["K"];
const PUNTERS: &[&str] = &["P"];

/// Signed label shown on a quick-yards button (`+5`, `-2`, `0`).
pub fn quick_yard_label(yards: i32) -> String {
    if yards > 0 {
        format!("+{yards}")
    } else {
        yards.to_string()
    }
}

/// Describe the form for `play_type`.
pub fn build_form(play_type: PlayType, roster: &Roster, catalog: &PenaltyCatalog) -> FormSpec {
    let (title, fields) = match play_type {
        PlayType::Run => ("Run Play", run_fields(roster)),
        PlayType::Pass => ("Pass Play", pass_fields(roster)),
        PlayType::Penalty => ("Penalty", penalty_fields(catalog)),
        PlayType::Kickoff => ("Kickoff", kickoff_fields(roster)),
        PlayType::Punt => ("Punt", punt_fields(roster)),
        PlayType::FieldGoal => ("Field Goal", field_goal_fields(roster)),
        PlayType::ExtraPoint => ("Extra Point / 2-Point", extra_point_fields(roster)),
    };

    FormSpec {
        play_type,
        title,
        fields,
    }
}

fn run_fields(roster: &Roster) -> Vec<FieldSpec> {
    vec![
        player_picker(roster, fields::BALL_CARRIER, "Ball Carrier", RUSHERS),
        yardage(fields::YARDS_GAINED, "Yards Gained", 0),
        toggles(&[
            (fields::IS_TOUCHDOWN, "TD"),
            (fields::IS_FIRST_DOWN, "1st Down"),
            (fields::FUMBLED, "Fumble"),
        ]),
        notes(),
    ]
}

fn pass_fields(roster: &Roster) -> Vec<FieldSpec> {
    vec![
        player_picker(roster, fields::QUARTERBACK, "Quarterback", PASSERS),
        player_picker(roster, fields::RECEIVER, "Receiver", RECEIVERS),
        toggles(&[(fields::IS_COMPLETE, "Complete"), (fields::WAS_SACKED, "Sack")]),
        yardage(fields::YARDS_GAINED, "Yards", 0),
        toggles(&[
            (fields::IS_TOUCHDOWN, "TD"),
            (fields::IS_FIRST_DOWN, "1st Down"),
            (fields::IS_INTERCEPTION, "INT"),
            (fields::FUMBLED, "Fumble"),
        ]),
        notes(),
    ]
}

fn penalty_fields(catalog: &PenaltyCatalog) -> Vec<FieldSpec> {
    let entries = catalog
        .all()
        .iter()
        .enumerate()
        .map(|(index, definition)| PenaltyOption {
            index,
            name: definition.name,
            yards_label: format!("{} yds", definition.yards),
        })
        .collect();

    vec![
        FieldSpec::PenaltyList { entries },
        FieldSpec::Hidden {
            id: fields::PENALTY_NAME,
            value: "",
        },
        FieldSpec::Hidden {
            id: fields::PENALTY_YARDS_VAL,
            value: "0",
        },
        FieldSpec::Hidden {
            id: fields::PENALTY_ON_OFFENSE,
            value: "true",
        },
        FieldSpec::Hidden {
            id: fields::PENALTY_AUTO_FIRST,
            value: "false",
        },
        FieldSpec::Numeric {
            id: fields::PENALTY_YARDS_INPUT,
            label: "Yards",
            default: 5,
            quick_yards: None,
        },
        radio(
            "Disposition",
            &[(fields::ACCEPTED, "Accepted"), (fields::DECLINED, "Declined")],
        ),
        toggles(&[
            (fields::REPEAT_DOWN, "Repeat Down"),
            (fields::AUTO_FIRST_DOWN, "Auto 1st Down"),
        ]),
        notes(),
    ]
}

fn kickoff_fields(roster: &Roster) -> Vec<FieldSpec> {
    vec![
        player_picker(roster, fields::KICKER, "Kicker", KICKERS),
        distance(fields::KICK_YARDS, "Kick Distance (yards)", 60),
        toggles(&[
            (fields::IS_TOUCHBACK, "Touchback"),
            (fields::IS_ONSIDE_KICK, "Onside"),
            (fields::OUT_OF_BOUNDS, "Out of Bounds"),
        ]),
        notes(),
    ]
}

fn punt_fields(roster: &Roster) -> Vec<FieldSpec> {
    vec![
        player_picker(roster, fields::PUNTER, "Punter", PUNTERS),
        distance(fields::PUNT_YARDS, "Punt Distance (yards)", 40),
        toggles(&[
            (fields::IS_TOUCHBACK, "Touchback"),
            (fields::IS_BLOCKED, "Blocked"),
            (fields::OUT_OF_BOUNDS, "Out of Bounds"),
        ]),
        notes(),
    ]
}

fn field_goal_fields(roster: &Roster) -> Vec<FieldSpec> {
    vec![
        player_picker(roster, fields::KICKER, "Kicker", KICKERS),
        distance(fields::KICK_DISTANCE, "Kick Distance (yards)", 30),
        radio(
            "Result",
            &[
                (fields::FG_GOOD, "GOOD"),
                (fields::FG_MISS, "MISSED"),
                (fields::FG_BLOCK, "BLOCKED"),
            ],
        ),
        notes(),
    ]
}

fn extra_point_fields(roster: &Roster) -> Vec<FieldSpec> {
    vec![
        radio(
            "Attempt Type",
            &[
                (fields::PAT_KICK, "PAT Kick"),
                (fields::TWO_PT_RUN, "2pt Run"),
                (fields::TWO_PT_PASS, "2pt Pass"),
            ],
        ),
        player_picker(roster, fields::EP_KICKER, "Kicker (PAT)", KICKERS),
        radio(
            "Result",
            &[(fields::EP_GOOD, "GOOD"), (fields::EP_MISS, "NO GOOD")],
        ),
        notes(),
    ]
}

fn player_picker(
    roster: &Roster,
    id: &'static str,
    label: &'static str,
    positions: &[&str],
) -> FieldSpec {
    let options = roster
        .filter_by_positions(positions)
        .map(|player| PlayerOption {
            id: player.id,
            label: player.option_label(),
        })
        .collect();

    FieldSpec::PlayerPicker { id, label, options }
}

/// Gain/loss input with the quick palette.
fn yardage(id: &'static str, label: &'static str, default: i32) -> FieldSpec {
    FieldSpec::Numeric {
        id,
        label,
        default,
        quick_yards: Some(&QUICK_YARDS),
    }
}

/// Kick/punt distance input, typed directly.
fn distance(id: &'static str, label: &'static str, default: i32) -> FieldSpec {
    FieldSpec::Numeric {
        id,
        label,
        default,
        quick_yards: None,
    }
}

fn toggles(specs: &[(&'static str, &'static str)]) -> FieldSpec {
    FieldSpec::Toggles {
        toggles: toggle_specs(specs),
    }
}

fn radio(label: &'static str, specs: &[(&'static str, &'static str)]) -> FieldSpec {
    FieldSpec::RadioGroup {
        label,
        members: toggle_specs(specs),
    }
}

fn toggle_specs(specs: &[(&'static str, &'static str)]) -> Vec<ToggleSpec> {
    specs
        .iter()
        .map(|&(id, label)| ToggleSpec { id, label })
        .collect()
}

fn notes() -> FieldSpec {
    FieldSpec::Notes { id: fields::NOTES }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::roster::Player;

    fn roster() -> Roster {
        let entries = [
            (1, 12, "QB"),
            (2, 22, "RB"),
            (3, 88, "WR"),
            (4, 3, "K"),
            (5, 9, "P"),
            (6, 55, "LB"),
            (7, 81, "TE"),
        ];
        Roster::new(
            entries
                .into_iter()
                .map(|(id, number, position)| Player {
                    id,
                    number,
                    first_name: "Pat".into(),
                    last_name: format!("Player{id}"),
                    position: position.into(),
                })
                .collect(),
        )
    }

    fn picker_ids(spec: &FormSpec, field: &str) -> Vec<u64> {
        spec.fields
            .iter()
            .find_map(|f| match f {
                FieldSpec::PlayerPicker { id, options, .. } if *id == field => {
                    Some(options.iter().map(|o| o.id).collect())
                }
                _ => None,
            })
            .unwrap_or_default()
    }

    fn radio_groups(spec: &FormSpec) -> Vec<Vec<&'static str>> {
        spec.fields
            .iter()
            .filter_map(|f| match f {
                FieldSpec::RadioGroup { members, .. } => {
                    Some(members.iter().map(|m| m.id).collect())
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn run_form_filters_ball_carriers() {
        let spec = build_form(PlayType::Run, &roster(), &PenaltyCatalog);
        assert_eq!(spec.title, "Run Play");
        assert_eq!(picker_ids(&spec, fields::BALL_CARRIER), vec![1, 2, 3, 7]);
        assert!(spec.fields.iter().any(|f| matches!(
            f,
            FieldSpec::Numeric { id, default: 0, quick_yards: Some(palette), .. }
                if *id == fields::YARDS_GAINED && palette.len() == 17
        )));
    }

    #[test]
    fn pass_form_has_two_pickers() {
        let spec = build_form(PlayType::Pass, &roster(), &PenaltyCatalog);
        assert_eq!(picker_ids(&spec, fields::QUARTERBACK), vec![1]);
        assert_eq!(picker_ids(&spec, fields::RECEIVER), vec![2, 3, 7]);
        assert!(radio_groups(&spec).is_empty());
    }

    #[test]
    fn kicking_forms_use_kickers_and_defaults() {
        let kickoff = build_form(PlayType::Kickoff, &roster(), &PenaltyCatalog);
        assert_eq!(picker_ids(&kickoff, fields::KICKER), vec![4]);
        assert!(kickoff.fields.iter().any(|f| matches!(
            f,
            FieldSpec::Numeric { default: 60, quick_yards: None, .. }
        )));

        let punt = build_form(PlayType::Punt, &roster(), &PenaltyCatalog);
        assert_eq!(picker_ids(&punt, fields::PUNTER), vec![5]);

        let fg = build_form(PlayType::FieldGoal, &roster(), &PenaltyCatalog);
        assert_eq!(
            radio_groups(&fg),
            vec![vec![fields::FG_GOOD, fields::FG_MISS, fields::FG_BLOCK]]
        );
    }

    #[test]
    fn extra_point_declares_two_radio_groups() {
        let spec = build_form(PlayType::ExtraPoint, &roster(), &PenaltyCatalog);
        assert_eq!(
            radio_groups(&spec),
            vec![
                vec![fields::PAT_KICK, fields::TWO_PT_RUN, fields::TWO_PT_PASS],
                vec![fields::EP_GOOD, fields::EP_MISS],
            ]
        );
        assert_eq!(picker_ids(&spec, fields::EP_KICKER), vec![4]);
    }

    #[test]
    fn penalty_form_lists_catalog() {
        let spec = build_form(PlayType::Penalty, &roster(), &PenaltyCatalog);
        let entries = spec
            .fields
            .iter()
            .find_map(|f| match f {
                FieldSpec::PenaltyList { entries } => Some(entries.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(entries.len(), PenaltyCatalog.len());
        assert_eq!(entries[1].name, "Holding (Offense)");
        assert_eq!(entries[1].yards_label, "10 yds");
        assert_eq!(
            radio_groups(&spec),
            vec![vec![fields::ACCEPTED, fields::DECLINED]]
        );
    }

    #[test]
    fn quick_yard_labels_are_signed() {
        assert_eq!(quick_yard_label(5), "+5");
        assert_eq!(quick_yard_label(-2), "-2");
        assert_eq!(quick_yard_label(0), "0");
    }
}
