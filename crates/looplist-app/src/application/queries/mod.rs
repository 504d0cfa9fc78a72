mod loop_queries;

pub use loop_queries::LoopQueries;
