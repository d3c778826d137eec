/// Request bodies sent to the tracker endpoints.
pub mod play;
/// Response bodies and their projections into domain replies.
pub mod response;
/// Seed data supplied by the hosting page.
pub mod seed;
pub mod validation;
