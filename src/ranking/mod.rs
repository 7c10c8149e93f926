pub mod aggregate;
pub mod engine;
pub mod rank;

pub use aggregate::{aggregate, ParticipantTotal};
pub use engine::run;
pub use rank::{
    rank, RankedParticipant, RankingSet, RankingTable, LANGUAGE_TABLE_SIZE, MEDIUM_TABLE_SIZE,
};
