/// Declarative play forms built from the roster and penalty catalog.
pub mod form_factory;
/// Transient operator notifications with auto-dismiss.
pub mod notifications;
/// Normalization of an open form into a play submission body.
pub mod payload;
/// Manual score and quarter corrections.
pub mod score_service;
/// Play submission and chained form scheduling.
pub mod submission_service;
/// Navigation, form edits and feed refresh.
pub mod tracker_service;
/// Undo of the last recorded play.
pub mod undo_service;
