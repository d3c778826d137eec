//! Play types, form descriptions and the transient field values of an open form.
//!
//! A [`FormSpec`] is the declarative description produced by the form factory; a
//! [`FormSession`] is the live set of values the operator edits until the form is
//! submitted or discarded. Toggle and radio-group discipline is enforced here, on every
//! interaction.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    dto::validation::parse_leading_int,
    state::penalty::{PenaltyCatalog, PenaltySelection},
};

/// Logical field identifiers shared by the form factory and the payload builder.
pub mod fields {
    /// Runner on a run play.
    pub const BALL_CARRIER: &str = "ball_carrier";
    /// Passer on a pass play.
    pub const QUARTERBACK: &str = "quarterback";
    /// Targeted receiver on a pass play.
    pub const RECEIVER: &str = "receiver";
    /// Kicker on kickoffs and field goals.
    pub const KICKER: &str = "kicker";
    /// Punter on a punt.
    pub const PUNTER: &str = "punter";
    /// Kicker of a PAT attempt.
    pub const EP_KICKER: &str = "ep_kicker";

    /// Gain or loss on a run or pass.
    pub const YARDS_GAINED: &str = "yards_gained";
    /// Kickoff distance.
    pub const KICK_YARDS: &str = "kick_yards";
    /// Punt distance.
    pub const PUNT_YARDS: &str = "punt_yards";
    /// Field goal attempt distance.
    pub const KICK_DISTANCE: &str = "kick_distance";
    /// Enforced penalty yardage, editable after picking a penalty.
    pub const PENALTY_YARDS_INPUT: &str = "penalty_yards_input";

    /// Play ended in a touchdown.
    pub const IS_TOUCHDOWN: &str = "is_touchdown";
    /// Play gained a first down.
    pub const IS_FIRST_DOWN: &str = "is_first_down";
    /// Ball was fumbled; sent as lost.
    pub const FUMBLED: &str = "fumbled";
    /// Pass was caught.
    pub const IS_COMPLETE: &str = "is_complete";
    /// Quarterback was sacked.
    pub const WAS_SACKED: &str = "was_sacked";
    /// Pass was intercepted.
    pub const IS_INTERCEPTION: &str = "is_interception";
    /// Kick or punt ended in a touchback.
    pub const IS_TOUCHBACK: &str = "is_touchback";
    /// Kickoff was an onside attempt.
    pub const IS_ONSIDE_KICK: &str = "is_onside_kick";
    /// Punt was blocked.
    pub const IS_BLOCKED: &str = "is_blocked";
    /// Kickoff went out of bounds.
    pub const OUT_OF_BOUNDS: &str = "out_of_bounds";
    /// Penalty replays the down.
    pub const REPEAT_DOWN: &str = "repeat_down";
    /// Penalty grants an automatic first down.
    pub const AUTO_FIRST_DOWN: &str = "auto_first_down";

    /// Penalty was accepted.
    pub const ACCEPTED: &str = "accepted";
    /// Penalty was declined.
    pub const DECLINED: &str = "declined";
    /// Field goal is good.
    pub const FG_GOOD: &str = "fg_good";
    /// Field goal missed.
    pub const FG_MISS: &str = "fg_miss";
    /// Field goal blocked.
    pub const FG_BLOCK: &str = "fg_block";
    /// Conversion succeeded.
    pub const EP_GOOD: &str = "ep_good";
    /// Conversion failed.
    pub const EP_MISS: &str = "ep_miss";
    /// Conversion attempted as a kick.
    pub const PAT_KICK: &str = "pat_kick";
    /// Two-point attempt by run.
    pub const TWO_PT_RUN: &str = "two_pt_run";
    /// Two-point attempt by pass.
    pub const TWO_PT_PASS: &str = "two_pt_pass";

    /// Catalog name of the chosen penalty.
    pub const PENALTY_NAME: &str = "penalty_name";
    /// Catalog yardage of the chosen penalty.
    pub const PENALTY_YARDS_VAL: &str = "penalty_yards_val";
    /// Whether the chosen penalty is on the offense.
    pub const PENALTY_ON_OFFENSE: &str = "penalty_on_offense";
    /// Whether the chosen penalty grants a first down.
    pub const PENALTY_AUTO_FIRST: &str = "penalty_auto_first";

    /// Free-text notes sent with every play.
    pub const NOTES: &str = "play_notes";
}

/// Fields the quick-yards palette writes into, in lookup order.
const YARDAGE_FIELDS: [&str; 4] = [
    fields::YARDS_GAINED,
    fields::KICK_YARDS,
    fields::PUNT_YARDS,
    fields::KICK_DISTANCE,
];

/// Kinds of play the tracker can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    Run,
    Pass,
    Penalty,
    Kickoff,
    Punt,
    FieldGoal,
    ExtraPoint,
}

impl PlayType {
    /// Every play type, offense first.
    pub const ALL: [PlayType; 7] = [
        PlayType::Run,
        PlayType::Pass,
        PlayType::Penalty,
        PlayType::Kickoff,
        PlayType::Punt,
        PlayType::FieldGoal,
        PlayType::ExtraPoint,
    ];

    /// Snake-case identifier (`field_goal`).
    pub fn as_str(self) -> &'static str {
        match self {
            PlayType::Run => "run",
            PlayType::Pass => "pass",
            PlayType::Penalty => "penalty",
            PlayType::Kickoff => "kickoff",
            PlayType::Punt => "punt",
            PlayType::FieldGoal => "field_goal",
            PlayType::ExtraPoint => "extra_point",
        }
    }

    /// Path segment of the remote endpoint recording this play type.
    pub fn endpoint(self) -> &'static str {
        match self {
            PlayType::FieldGoal => "field-goal",
            PlayType::ExtraPoint => "extra-point",
            other => other.as_str(),
        }
    }

}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown play type name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown play type `{0}`")]
pub struct UnknownPlayType(pub String);

impl FromStr for PlayType {
    type Err = UnknownPlayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        PlayType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownPlayType(s.to_string()))
    }
}

/// Declarative description of the inputs shown for one play type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSpec {
    pub play_type: PlayType,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// One block of inputs inside a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSpec {
    /// Roster-filtered player picker; no selection is a valid value.
    PlayerPicker {
        id: &'static str,
        label: &'static str,
        options: Vec<PlayerOption>,
    },
    /// Integer input with a default and an optional quick-select palette.
    Numeric {
        id: &'static str,
        label: &'static str,
        default: i32,
        quick_yards: Option<&'static [i32]>,
    },
    /// Independent toggles, each flipped on its own.
    Toggles { toggles: Vec<ToggleSpec> },
    /// Mutually exclusive toggles: at most one member active.
    RadioGroup {
        label: &'static str,
        members: Vec<ToggleSpec>,
    },
    /// Selectable penalty list backed by the catalog.
    PenaltyList { entries: Vec<PenaltyOption> },
    /// Value carried with the form but never edited directly.
    Hidden {
        id: &'static str,
        value: &'static str,
    },
    /// Free-text notes.
    Notes { id: &'static str },
}

/// A single toggle, standalone or inside a radio group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleSpec {
    /// Field id, one of [`fields`].
    pub id: &'static str,
    /// Text on the button.
    pub label: &'static str,
}

/// One selectable roster entry of a player picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerOption {
    /// Roster player id sent in the payload.
    pub id: u64,
    /// `#12 Tom Brady (QB)`.
    pub label: String,
}

/// Row of the penalty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PenaltyOption {
    /// Position passed to [`FormSession::choose_penalty`].
    pub index: usize,
    /// Catalog name, e.g. `Holding`.
    pub name: &'static str,
    /// Yardage as shown in the list (`10 yds`).
    pub yards_label: String,
}

/// Current value of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Player(Option<u64>),
    /// Raw text as typed, plus the value used when it does not parse.
    Number { text: String, default: i32 },
    Toggle(bool),
    Text(String),
    Hidden(String),
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Player(_) => "player",
            FieldValue::Number { .. } => "number",
            FieldValue::Toggle(_) => "toggle",
            FieldValue::Text(_) => "text",
            FieldValue::Hidden(_) => "hidden",
        }
    }
}

/// Errors raised while editing an open form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form has no field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` is a {actual} field, expected {expected}")]
    WrongKind {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("field `{field}` is not a member of the selected group")]
    NotInGroup { field: String },
    #[error("no penalty at index {0}")]
    UnknownPenalty(usize),
    #[error("form has no yardage field")]
    NoYardageField,
    #[error("`{raw}` is not a player id for `{field}`")]
    InvalidPlayer { field: String, raw: String },
}

/// Values of the form currently open in the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    id: Uuid,
    play_type: PlayType,
    fields: IndexMap<&'static str, FieldValue>,
    radio_groups: Vec<Vec<&'static str>>,
    /// Player ids each picker offers.
    player_choices: IndexMap<&'static str, Vec<u64>>,
}

impl FormSession {
    /// Create a fresh session holding the defaults declared by `spec`.
    pub fn from_spec(spec: &FormSpec) -> Self {
        let mut fields = IndexMap::new();
        let mut radio_groups = Vec::new();
        let mut player_choices = IndexMap::new();

        for field in &spec.fields {
            match field {
                FieldSpec::PlayerPicker { id, options, .. } => {
                    fields.insert(*id, FieldValue::Player(None));
                    player_choices.insert(*id, options.iter().map(|option| option.id).collect());
                }
                FieldSpec::Numeric { id, default, .. } => {
                    fields.insert(
                        *id,
                        FieldValue::Number {
                            text: default.to_string(),
                            default: *default,
                        },
                    );
                }
                FieldSpec::Toggles { toggles } => {
                    for toggle in toggles {
                        fields.insert(toggle.id, FieldValue::Toggle(false));
                    }
                }
                FieldSpec::RadioGroup { members, .. } => {
                    for member in members {
                        fields.insert(member.id, FieldValue::Toggle(false));
                    }
                    radio_groups.push(members.iter().map(|member| member.id).collect());
                }
                FieldSpec::PenaltyList { .. } => {}
                FieldSpec::Hidden { id, value } => {
                    fields.insert(*id, FieldValue::Hidden((*value).to_string()));
                }
                FieldSpec::Notes { id } => {
                    fields.insert(*id, FieldValue::Text(String::new()));
                }
            }
        }

        Self {
            id: Uuid::new_v4(),
            play_type: spec.play_type,
            fields,
            radio_groups,
            player_choices,
        }
    }

    /// Identity of this session; a new one is minted every time a form opens.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn play_type(&self) -> PlayType {
        self.play_type
    }

    /// Iterate over the field values in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(id, value)| (*id, value))
    }

    /// Flip an independent toggle, or select it within its radio group.
    ///
    /// Returns the toggle's new state.
    pub fn toggle(&mut self, field: &str) -> Result<bool, FormError> {
        if let Some(group) = self.group_of(field) {
            self.select(&group, field)?;
            return Ok(true);
        }

        let slot = self.toggle_slot(field)?;
        *slot = !*slot;
        Ok(*slot)
    }

    /// Activate `field` and deactivate every other member of `group`.
    pub fn select(&mut self, group: &[&str], field: &str) -> Result<(), FormError> {
        if !group.iter().any(|member| *member == field) {
            return Err(FormError::NotInGroup {
                field: field.to_string(),
            });
        }
        // Validate every member before mutating so a bad group leaves the form untouched.
        for member in group {
            self.toggle_slot(member)?;
        }
        for member in group {
            *self.toggle_slot(member)? = *member == field;
        }
        Ok(())
    }

    /// Whether a toggle is on; unknown fields read as off.
    pub fn is_active(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(FieldValue::Toggle(true)))
    }

    /// The active member of `group`, if any.
    pub fn active_in(&self, group: &[&'static str]) -> Option<&'static str> {
        group.iter().copied().find(|member| self.is_active(member))
    }

    /// Selected player id, or `None` when nothing is picked or the field is absent.
    pub fn player(&self, field: &str) -> Option<u64> {
        match self.fields.get(field) {
            Some(FieldValue::Player(id)) => *id,
            _ => None,
        }
    }

    /// Integer value of a numeric field, coerced to its default when the text is not numeric.
    ///
    /// `fallback` is used when the field is absent from the form.
    pub fn number(&self, field: &str, fallback: i32) -> i32 {
        match self.fields.get(field) {
            Some(FieldValue::Number { text, default }) => parse_leading_int(text)
                .and_then(|value| i32::try_from(value).ok())
                .unwrap_or(*default),
            _ => fallback,
        }
    }

    /// Text or hidden value; empty when absent.
    pub fn text(&self, field: &str) -> &str {
        match self.fields.get(field) {
            Some(FieldValue::Text(value)) | Some(FieldValue::Hidden(value)) => value.as_str(),
            _ => "",
        }
    }

    /// Pick a player, or clear the picker with `None`.
    ///
    /// Only ids the picker offers are accepted.
    pub fn set_player(&mut self, field: &str, player: Option<u64>) -> Result<(), FormError> {
        if let (Some(id), Some(FieldValue::Player(_))) = (player, self.fields.get(field)) {
            self.check_choice(field, id)?;
        }
        match self.slot(field)? {
            FieldValue::Player(slot) => {
                *slot = player;
                Ok(())
            }
            other => Err(wrong_kind(field, "player", other)),
        }
    }

    /// Replace the raw text of a numeric field; coercion happens when the value is read.
    pub fn set_number(&mut self, field: &str, text: impl Into<String>) -> Result<(), FormError> {
        match self.slot(field)? {
            FieldValue::Number { text: slot, .. } => {
                *slot = text.into();
                Ok(())
            }
            other => Err(wrong_kind(field, "number", other)),
        }
    }

    pub fn set_text(&mut self, field: &str, text: impl Into<String>) -> Result<(), FormError> {
        match self.slot(field)? {
            FieldValue::Text(slot) => {
                *slot = text.into();
                Ok(())
            }
            other => Err(wrong_kind(field, "text", other)),
        }
    }

    /// Set a player, number or text field from raw operator input.
    pub fn set_value(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        if matches!(self.slot(field)?, FieldValue::Player(_)) {
            let trimmed = raw.trim();
            let player = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.parse().map_err(|_| invalid_player(field, raw))?)
            };
            return self.set_player(field, player);
        }

        match self.slot(field)? {
            FieldValue::Number { text, .. } => {
                *text = raw.to_string();
                Ok(())
            }
            FieldValue::Text(text) => {
                *text = raw.to_string();
                Ok(())
            }
            other => Err(wrong_kind(field, "number or text", other)),
        }
    }

    /// Write a quick-select value into the form's primary yardage field.
    pub fn apply_quick_yards(&mut self, yards: i32) -> Result<&'static str, FormError> {
        let target = YARDAGE_FIELDS
            .into_iter()
            .find(|field| self.fields.contains_key(field))
            .ok_or(FormError::NoYardageField)?;
        self.set_number(target, yards.to_string())?;
        Ok(target)
    }

    /// Copy a catalog entry into the penalty fields.
    ///
    /// Forces accepted on and declined off, and switches the auto-first-down toggle on when
    /// the definition grants one. Never switches it off.
    pub fn choose_penalty(
        &mut self,
        index: usize,
        catalog: &PenaltyCatalog,
    ) -> Result<PenaltySelection, FormError> {
        let definition = catalog.get(index).ok_or(FormError::UnknownPenalty(index))?;
        let selection = PenaltySelection::from(definition);

        self.set_hidden(fields::PENALTY_NAME, selection.name.clone())?;
        self.set_hidden(fields::PENALTY_YARDS_VAL, selection.yards.to_string())?;
        self.set_hidden(fields::PENALTY_ON_OFFENSE, selection.on_offense.to_string())?;
        self.set_hidden(fields::PENALTY_AUTO_FIRST, selection.auto_first.to_string())?;
        self.set_number(fields::PENALTY_YARDS_INPUT, selection.yards.to_string())?;

        self.select(&[fields::ACCEPTED, fields::DECLINED], fields::ACCEPTED)?;
        if selection.auto_first {
            *self.toggle_slot(fields::AUTO_FIRST_DOWN)? = true;
        }

        Ok(selection)
    }

    fn set_hidden(&mut self, field: &str, value: String) -> Result<(), FormError> {
        match self.slot(field)? {
            FieldValue::Hidden(slot) => {
                *slot = value;
                Ok(())
            }
            other => Err(wrong_kind(field, "hidden", other)),
        }
    }

    fn check_choice(&self, field: &str, id: u64) -> Result<(), FormError> {
        let offered = self
            .player_choices
            .get(field)
            .is_some_and(|choices| choices.contains(&id));
        if offered {
            Ok(())
        } else {
            Err(invalid_player(field, &id.to_string()))
        }
    }

    fn group_of(&self, field: &str) -> Option<Vec<&'static str>> {
        self.radio_groups
            .iter()
            .find(|group| group.iter().any(|member| *member == field))
            .cloned()
    }

    fn slot(&mut self, field: &str) -> Result<&mut FieldValue, FormError> {
        self.fields
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))
    }

    fn toggle_slot(&mut self, field: &str) -> Result<&mut bool, FormError> {
        match self.slot(field)? {
            FieldValue::Toggle(active) => Ok(active),
            other => Err(wrong_kind(field, "toggle", other)),
        }
    }
}

fn invalid_player(field: &str, raw: &str) -> FormError {
    FormError::InvalidPlayer {
        field: field.to_string(),
        raw: raw.to_string(),
    }
}

fn wrong_kind(field: &str, expected: &'static str, actual: &FieldValue) -> FormError {
    FormError::WrongKind {
        field: field.to_string(),
        expected,
        actual: actual.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::form_factory::build_form,
        state::roster::{Player, Roster},
    };

    fn roster() -> Roster {
        let entries = [(1, 12, "QB"), (22, 22, "RB"), (88, 88, "TE"), (4, 3, "K")];
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

    fn open(play_type: PlayType) -> FormSession {
        FormSession::from_spec(&build_form(play_type, &roster(), &PenaltyCatalog))
    }

    #[test]
    fn play_type_parsing_and_endpoints() {
        assert_eq!("field-goal".parse::<PlayType>(), Ok(PlayType::FieldGoal));
        assert_eq!("EXTRA_POINT".parse::<PlayType>(), Ok(PlayType::ExtraPoint));
        assert!("special_teams".parse::<PlayType>().is_err());
        assert_eq!(PlayType::FieldGoal.endpoint(), "field-goal");
        assert_eq!(PlayType::ExtraPoint.endpoint(), "extra-point");
        assert_eq!(PlayType::Run.endpoint(), "run");
    }

    #[test]
    fn independent_toggles_flip_alone() {
        let mut form = open(PlayType::Run);
        assert_eq!(form.toggle(fields::IS_TOUCHDOWN), Ok(true));
        assert_eq!(form.toggle(fields::FUMBLED), Ok(true));
        assert_eq!(form.toggle(fields::IS_TOUCHDOWN), Ok(false));
        assert!(!form.is_active(fields::IS_TOUCHDOWN));
        assert!(form.is_active(fields::FUMBLED));
    }

    #[test]
    fn radio_group_never_has_two_active() {
        let mut form = open(PlayType::FieldGoal);
        let group = [fields::FG_GOOD, fields::FG_MISS, fields::FG_BLOCK];
        assert_eq!(form.active_in(&group), None);

        let sequence = [
            fields::FG_GOOD,
            fields::FG_BLOCK,
            fields::FG_BLOCK,
            fields::FG_MISS,
            fields::FG_GOOD,
        ];
        for pick in sequence {
            form.select(&group, pick).unwrap();
            let active = group.iter().filter(|f| form.is_active(f)).count();
            assert_eq!(active, 1);
            assert_eq!(form.active_in(&group), Some(pick));
        }

        // Tapping a member goes through the same exclusivity.
        form.toggle(fields::FG_MISS).unwrap();
        assert_eq!(form.active_in(&group), Some(fields::FG_MISS));
        assert_eq!(group.iter().filter(|f| form.is_active(f)).count(), 1);
    }

    #[test]
    fn select_rejects_foreign_member() {
        let mut form = open(PlayType::ExtraPoint);
        let err = form
            .select(&[fields::EP_GOOD, fields::EP_MISS], fields::PAT_KICK)
            .unwrap_err();
        assert!(matches!(err, FormError::NotInGroup { .. }));
        assert!(!form.is_active(fields::PAT_KICK));
    }

    #[test]
    fn penalty_selection_forces_accepted_and_auto_first() {
        let mut form = open(PlayType::Penalty);
        form.toggle(fields::DECLINED).unwrap();
        assert!(form.is_active(fields::DECLINED));

        // Facemask grants an automatic first down.
        let selection = form.choose_penalty(14, &PenaltyCatalog).unwrap();
        assert!(selection.auto_first);
        assert!(form.is_active(fields::ACCEPTED));
        assert!(!form.is_active(fields::DECLINED));
        assert!(form.is_active(fields::AUTO_FIRST_DOWN));
        assert_eq!(form.text(fields::PENALTY_NAME), "Facemask");
        assert_eq!(form.text(fields::PENALTY_ON_OFFENSE), "false");
        assert_eq!(form.number(fields::PENALTY_YARDS_INPUT, 5), 15);

        // A definition without auto_first leaves the toggle as it was.
        form.choose_penalty(0, &PenaltyCatalog).unwrap();
        assert!(form.is_active(fields::AUTO_FIRST_DOWN));
        assert_eq!(form.text(fields::PENALTY_ON_OFFENSE), "true");

        assert_eq!(
            form.choose_penalty(99, &PenaltyCatalog),
            Err(FormError::UnknownPenalty(99))
        );
    }

    #[test]
    fn numeric_fields_coerce_to_default() {
        let mut form = open(PlayType::Kickoff);
        assert_eq!(form.number(fields::KICK_YARDS, 0), 60);
        form.set_number(fields::KICK_YARDS, "abc").unwrap();
        assert_eq!(form.number(fields::KICK_YARDS, 0), 60);
        form.set_number(fields::KICK_YARDS, "45").unwrap();
        assert_eq!(form.number(fields::KICK_YARDS, 0), 45);
        assert_eq!(form.number(fields::YARDS_GAINED, 7), 7);
    }

    #[test]
    fn quick_yards_target_primary_field() {
        let mut form = open(PlayType::Punt);
        assert_eq!(form.apply_quick_yards(30), Ok(fields::PUNT_YARDS));
        assert_eq!(form.number(fields::PUNT_YARDS, 0), 30);

        let mut form = open(PlayType::ExtraPoint);
        assert_eq!(form.apply_quick_yards(5), Err(FormError::NoYardageField));
    }

    #[test]
    fn set_value_dispatches_on_kind() {
        let mut form = open(PlayType::Run);
        form.set_value(fields::BALL_CARRIER, "22").unwrap();
        assert_eq!(form.player(fields::BALL_CARRIER), Some(22));
        form.set_value(fields::BALL_CARRIER, "").unwrap();
        assert_eq!(form.player(fields::BALL_CARRIER), None);
        assert!(matches!(
            form.set_value(fields::BALL_CARRIER, "x"),
            Err(FormError::InvalidPlayer { .. })
        ));
        assert!(matches!(
            form.set_value(fields::IS_TOUCHDOWN, "1"),
            Err(FormError::WrongKind { .. })
        ));
        assert!(matches!(
            form.set_value("nope", "1"),
            Err(FormError::UnknownField(_))
        ));
    }

    #[test]
    fn pickers_only_accept_offered_players() {
        let mut form = open(PlayType::Run);
        form.set_value(fields::BALL_CARRIER, "22").unwrap();

        // The kicker is on the roster but not offered as a ball carrier.
        assert_eq!(
            form.set_value(fields::BALL_CARRIER, "4"),
            Err(FormError::InvalidPlayer {
                field: fields::BALL_CARRIER.into(),
                raw: "4".into()
            })
        );
        assert_eq!(
            form.set_player(fields::BALL_CARRIER, Some(999)),
            Err(FormError::InvalidPlayer {
                field: fields::BALL_CARRIER.into(),
                raw: "999".into()
            })
        );
        assert_eq!(form.player(fields::BALL_CARRIER), Some(22));

        let mut form = open(PlayType::FieldGoal);
        assert!(form.set_player(fields::KICKER, Some(22)).is_err());
        form.set_player(fields::KICKER, Some(4)).unwrap();
        form.set_player(fields::KICKER, None).unwrap();
        assert_eq!(form.player(fields::KICKER), None);
    }

    #[test]
    fn empty_roster_offers_no_players() {
        let spec = build_form(PlayType::Pass, &Roster::default(), &PenaltyCatalog);
        let mut form = FormSession::from_spec(&spec);
        assert!(matches!(
            form.set_value(fields::QUARTERBACK, "1"),
            Err(FormError::InvalidPlayer { .. })
        ));
        form.set_value(fields::QUARTERBACK, "  ").unwrap();
        assert_eq!(form.player(fields::QUARTERBACK), None);
    }
}
