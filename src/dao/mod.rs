/// Error type shared by every tracker service backend.
pub mod remote;
/// Remote tracker service abstraction and its backends.
pub mod tracker_service;
