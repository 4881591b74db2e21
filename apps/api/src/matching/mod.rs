// Skill/profession matching core.
// models + scorer + aggregator are pure: no I/O, no logging, no shared state.
// payload and handlers sit on the HTTP boundary and feed validated values in.

pub mod aggregator;
pub mod handlers;
pub mod models;
pub mod payload;
pub mod scorer;

use thiserror::Error;

use crate::matching::models::ProfessionId;

/// Typed failures of the matching core. Always returned, never logged here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Profession {profession_id} has no skill requirements")]
    EmptyRequirements { profession_id: ProfessionId },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
