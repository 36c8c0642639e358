//! This crate contains the building blocks to compute
//! [CFL-reachability](https://research.cs.wisc.edu/wpis/papers/tr1386.pdf)
//! closures. An edge `u -L-> v` in the closed graph means that there is a
//! path from `u` to `v` whose label sequence reduces to the nonterminal `L`.
//! Points-to, alias and value-flow analyses can all be phrased this way by
//! choosing the right grammar.
//!
//! The building blocks are:
//! * a [grammar](grammar::Grammar) describing how two adjacent edges compose,
//! * an [edge-indexed graph](graph::LabeledGraph) with successor and
//!   predecessor views grouped by label,
//! * a [worklist](worklist::Worklist) with configurable pop order,
//! * and the [closure engine](solvers::ClosureEngine) driving everything
//!   to a fixpoint.
//!
//! Building the initial graph from a program is the job of a frontend, look
//! at the cflr-lib crate for an example that reads edge lists from text.
//!
//! Some resources to learn more about CFL-reachability:
//! * [Program Analysis via Graph Reachability, Thomas Reps](https://research.cs.wisc.edu/wpis/papers/tr1386.pdf)
//! * [Interconvertibility of Set Constraints and Context-Free Language Reachability, Melski and Reps](https://research.cs.wisc.edu/wpis/papers/pepm97.pdf)
//! * [Refinement-Based Context-Sensitive Points-To Analysis for Java, Sridharan and Bodik](https://manu.sridharan.net/files/pldi06.pdf)
//! * [Static Program Analysis, Anders Møller and Michael I. Schwartzbach](https://cs.au.dk/~amoeller/spa/)
//!
//! Other libraries and frameworks:
//! * [SVF](https://github.com/SVF-tools/SVF)
//! * [Graspan](https://github.com/Graspan/Graspan-C)
//! * [Souffle](https://souffle-lang.github.io/)

/// Errors reported by the graph, the worklist and the production tables.
pub mod error;

/// Labels, interned symbol alphabets and grammars. A grammar decides which
/// label two adjacent edges compose to.
pub mod grammar;

/// The labeled graph with fast membership tests and adjacency indices.
pub mod graph;

/// The fixpoint engine closing a graph under a grammar.
pub mod solvers;

/// Queues of edges waiting for propagation.
pub mod worklist;

pub use error::CflError;


#[cfg(test)]
mod graph_tests;
