// Immutable snapshot types supplied by the persistence layer.

pub mod composition;
pub mod player;
pub mod team;

pub use composition::Composition;
pub use player::{EligibilityHistory, Gender, MatchCounts, NationalityClass, Phase, Player, Variant};
pub use team::{Competition, FixtureResult, Team, TeamFixture};
