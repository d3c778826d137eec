use thiserror::Error;

use crate::state::form::PlayType;

/// What the operator is looking at when no request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Play-type buttons are shown.
    SelectingType,
    /// Special-teams submenu is shown.
    SpecialTeamsMenu,
    /// A form of the given type is open.
    FormOpen(PlayType),
    /// A play was saved and the follow-up form opens once the chain delay elapses.
    ChainPending(PlayType),
}

/// High-level phases of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    SelectingType,
    SpecialTeamsMenu,
    FormOpen(PlayType),
    ChainPending(PlayType),
    /// A request holds the submission lock.
    Submitting(Pending),
}

/// Request currently holding the submission lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// A play of this type is being recorded; its form stays open.
    Play(PlayType),
    /// Undo in flight; `resume` is where the operator lands once it completes.
    Undo { resume: Screen },
}

impl From<Screen> for TrackerPhase {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::SelectingType => TrackerPhase::SelectingType,
            Screen::SpecialTeamsMenu => TrackerPhase::SpecialTeamsMenu,
            Screen::FormOpen(kind) => TrackerPhase::FormOpen(kind),
            Screen::ChainPending(kind) => TrackerPhase::ChainPending(kind),
        }
    }
}

impl TrackerPhase {
    /// The screen shown in this phase, if no request is in flight.
    pub fn screen(self) -> Option<Screen> {
        match self {
            TrackerPhase::SelectingType => Some(Screen::SelectingType),
            TrackerPhase::SpecialTeamsMenu => Some(Screen::SpecialTeamsMenu),
            TrackerPhase::FormOpen(kind) => Some(Screen::FormOpen(kind)),
            TrackerPhase::ChainPending(kind) => Some(Screen::ChainPending(kind)),
            TrackerPhase::Submitting(_) => None,
        }
    }

    /// Type of the form currently open, including one being submitted.
    pub fn open_form(self) -> Option<PlayType> {
        match self {
            TrackerPhase::FormOpen(kind) | TrackerPhase::Submitting(Pending::Play(kind)) => {
                Some(kind)
            }
            _ => None,
        }
    }
}

/// Intents that can be applied to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// Operator picked a play type, or a chained form auto-opened.
    OpenForm(PlayType),
    OpenSpecialTeams,
    /// Back to type selection, discarding any open form.
    Cancel,
    /// The open form is being sent.
    Submit,
    BeginUndo,
    /// The service recorded the play; `chain` names the follow-up form, if any.
    SubmissionSucceeded { chain: Option<PlayType> },
    /// The play was refused or never reached the service.
    SubmissionFailed,
    UndoFinished,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the invalid event was received.
    pub from: TrackerPhase,
    /// The event that cannot be applied from this phase.
    pub event: TrackerEvent,
}

/// Snapshot of the current state machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: TrackerPhase,
    /// Increments on each applied transition.
    pub version: usize,
}

/// Dispatcher owning the tracker's navigation and submission phases.
#[derive(Debug, Clone)]
pub struct TrackerStateMachine {
    phase: TrackerPhase,
    version: usize,
}

impl Default for TrackerStateMachine {
    fn default() -> Self {
        Self {
            phase: TrackerPhase::SelectingType,
            version: 0,
        }
    }
}

impl TrackerStateMachine {
    /// Create a new state machine showing the play-type buttons.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            version: self.version,
        }
    }

    /// Check whether `event` would be accepted without applying it.
    pub fn can_apply(&self, event: TrackerEvent) -> bool {
        self.compute_transition(event).is_ok()
    }

    /// Apply `event`, returning the new phase.
    pub fn apply(&mut self, event: TrackerEvent) -> Result<TrackerPhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        self.version += 1;
        Ok(next)
    }

    /// Compute a transition from an event if the transition is valid.
    fn compute_transition(&self, event: TrackerEvent) -> Result<TrackerPhase, InvalidTransition> {
        let invalid = || InvalidTransition {
            from: self.phase,
            event,
        };

        let next = match (self.phase, event) {
            (TrackerPhase::FormOpen(kind), TrackerEvent::Submit) => {
                TrackerPhase::Submitting(Pending::Play(kind))
            }
            (
                TrackerPhase::Submitting(Pending::Play(_)),
                TrackerEvent::SubmissionSucceeded { chain },
            ) => match chain {
                Some(kind) => TrackerPhase::ChainPending(kind),
                None => TrackerPhase::SelectingType,
            },
            (TrackerPhase::Submitting(Pending::Play(kind)), TrackerEvent::SubmissionFailed) => {
                TrackerPhase::FormOpen(kind)
            }
            (TrackerPhase::Submitting(Pending::Undo { resume }), TrackerEvent::UndoFinished) => {
                resume.into()
            }
            // Undo does not freeze the screen: navigation retargets where it resumes.
            (TrackerPhase::Submitting(Pending::Undo { resume }), event) => {
                let resume = navigate(resume, event).ok_or_else(invalid)?;
                TrackerPhase::Submitting(Pending::Undo { resume })
            }
            (TrackerPhase::Submitting(Pending::Play(_)), _) => return Err(invalid()),
            (phase, TrackerEvent::BeginUndo) => {
                let resume = phase.screen().ok_or_else(invalid)?;
                TrackerPhase::Submitting(Pending::Undo { resume })
            }
            (phase, event) => {
                let screen = phase.screen().ok_or_else(invalid)?;
                navigate(screen, event).ok_or_else(invalid)?.into()
            }
        };

        Ok(next)
    }
}

/// Screen-to-screen moves driven by the operator or the chain timer.
fn navigate(screen: Screen, event: TrackerEvent) -> Option<Screen> {
    match (screen, event) {
        (_, TrackerEvent::OpenForm(kind)) => Some(Screen::FormOpen(kind)),
        (Screen::SelectingType | Screen::ChainPending(_), TrackerEvent::OpenSpecialTeams) => {
            Some(Screen::SpecialTeamsMenu)
        }
        (
            Screen::SpecialTeamsMenu | Screen::FormOpen(_) | Screen::ChainPending(_),
            TrackerEvent::Cancel,
        ) => Some(Screen::SelectingType),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(sm: &mut TrackerStateMachine, event: TrackerEvent) -> TrackerPhase {
        sm.apply(event).unwrap()
    }

    #[test]
    fn initial_state_is_type_selection() {
        let sm = TrackerStateMachine::new();
        assert_eq!(sm.phase(), TrackerPhase::SelectingType);
        assert_eq!(sm.snapshot().version, 0);
    }

    #[test]
    fn submit_success_returns_to_selection() {
        let mut sm = TrackerStateMachine::new();
        assert_eq!(
            apply(&mut sm, TrackerEvent::OpenForm(PlayType::Run)),
            TrackerPhase::FormOpen(PlayType::Run)
        );
        assert_eq!(
            apply(&mut sm, TrackerEvent::Submit),
            TrackerPhase::Submitting(Pending::Play(PlayType::Run))
        );
        assert_eq!(sm.phase().open_form(), Some(PlayType::Run));
        assert_eq!(
            apply(&mut sm, TrackerEvent::SubmissionSucceeded { chain: None }),
            TrackerPhase::SelectingType
        );
        assert_eq!(sm.snapshot().version, 3);
    }

    #[test]
    fn touchdown_chains_into_extra_point() {
        let mut sm = TrackerStateMachine::new();
        apply(&mut sm, TrackerEvent::OpenForm(PlayType::Pass));
        apply(&mut sm, TrackerEvent::Submit);
        assert_eq!(
            apply(
                &mut sm,
                TrackerEvent::SubmissionSucceeded {
                    chain: Some(PlayType::ExtraPoint)
                }
            ),
            TrackerPhase::ChainPending(PlayType::ExtraPoint)
        );
        assert_eq!(
            apply(&mut sm, TrackerEvent::OpenForm(PlayType::ExtraPoint)),
            TrackerPhase::FormOpen(PlayType::ExtraPoint)
        );
    }

    #[test]
    fn failed_submission_keeps_form_open() {
        let mut sm = TrackerStateMachine::new();
        apply(&mut sm, TrackerEvent::OpenForm(PlayType::Punt));
        apply(&mut sm, TrackerEvent::Submit);
        assert_eq!(
            apply(&mut sm, TrackerEvent::SubmissionFailed),
            TrackerPhase::FormOpen(PlayType::Punt)
        );
    }

    #[test]
    fn special_teams_menu_navigation() {
        let mut sm = TrackerStateMachine::new();
        assert_eq!(
            apply(&mut sm, TrackerEvent::OpenSpecialTeams),
            TrackerPhase::SpecialTeamsMenu
        );
        assert_eq!(apply(&mut sm, TrackerEvent::Cancel), TrackerPhase::SelectingType);

        apply(&mut sm, TrackerEvent::OpenSpecialTeams);
        assert_eq!(
            apply(&mut sm, TrackerEvent::OpenForm(PlayType::FieldGoal)),
            TrackerPhase::FormOpen(PlayType::FieldGoal)
        );
        assert_eq!(apply(&mut sm, TrackerEvent::Cancel), TrackerPhase::SelectingType);
    }

    #[test]
    fn play_submission_freezes_navigation() {
        let mut sm = TrackerStateMachine::new();
        apply(&mut sm, TrackerEvent::OpenForm(PlayType::Run));
        apply(&mut sm, TrackerEvent::Submit);

        for event in [
            TrackerEvent::Submit,
            TrackerEvent::Cancel,
            TrackerEvent::BeginUndo,
            TrackerEvent::OpenForm(PlayType::Kickoff),
            TrackerEvent::UndoFinished,
        ] {
            let err = sm.apply(event).unwrap_err();
            assert_eq!(err.from, TrackerPhase::Submitting(Pending::Play(PlayType::Run)));
            assert_eq!(err.event, event);
        }
    }

    #[test]
    fn undo_resumes_where_it_started() {
        let mut sm = TrackerStateMachine::new();
        apply(&mut sm, TrackerEvent::OpenForm(PlayType::Penalty));
        assert_eq!(
            apply(&mut sm, TrackerEvent::BeginUndo),
            TrackerPhase::Submitting(Pending::Undo {
                resume: Screen::FormOpen(PlayType::Penalty)
            })
        );
        assert_eq!(sm.phase().open_form(), None);
        assert_eq!(
            apply(&mut sm, TrackerEvent::UndoFinished),
            TrackerPhase::FormOpen(PlayType::Penalty)
        );
    }

    #[test]
    fn navigation_during_undo_retargets_resume() {
        let mut sm = TrackerStateMachine::new();
        apply(&mut sm, TrackerEvent::BeginUndo);
        apply(&mut sm, TrackerEvent::OpenForm(PlayType::Kickoff));
        assert_eq!(
            sm.phase(),
            TrackerPhase::Submitting(Pending::Undo {
                resume: Screen::FormOpen(PlayType::Kickoff)
            })
        );
        assert!(!sm.can_apply(TrackerEvent::Submit));
        assert!(!sm.can_apply(TrackerEvent::BeginUndo));
        assert_eq!(
            apply(&mut sm, TrackerEvent::UndoFinished),
            TrackerPhase::FormOpen(PlayType::Kickoff)
        );
    }

    #[test]
    fn invalid_transition_returns_error() {
        let mut sm = TrackerStateMachine::new();
        let err = sm.apply(TrackerEvent::Submit).unwrap_err();
        assert_eq!(err.from, TrackerPhase::SelectingType);
        assert_eq!(err.event, TrackerEvent::Submit);

        assert!(sm.apply(TrackerEvent::Cancel).is_err());
        assert!(sm.apply(TrackerEvent::SubmissionFailed).is_err());
        assert_eq!(sm.snapshot().version, 0);
    }
}
