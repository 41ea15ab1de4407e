pub mod lsi;
pub mod search;
pub mod session;

pub use lsi::{LatentSemanticModel, LsiModel};
pub use search::{Relevant, Scored, SimilarityIndex, filter_relevant, rank};
pub use session::{Index, IngestReport, SearchOutcome, Session};
