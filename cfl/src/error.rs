use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CflError {
    /// The edge refers to a node or a label outside of the declared domain.
    #[error("invalid edge {src} -{label}-> {dst}: {reason}")]
    InvalidEdge {
        src: usize,
        dst: usize,
        label: String,
        reason: String,
    },

    /// Popped from a worklist that has no pending edges.
    #[error("pop called on an empty worklist")]
    EmptyQueue,

    /// The same production body was given two different heads.
    #[error("production body {body} already derives {existing}, cannot also derive {head}")]
    ConflictingProduction {
        body: String,
        existing: String,
        head: String,
    },

    /// Interning a new name would overflow the symbol space.
    #[error("the alphabet cannot hold more than {limit} symbols")]
    TooManySymbols { limit: usize },
}
