use log::{debug, trace, warn};

use crate::error::CflError;
use crate::grammar::Grammar;
use crate::graph::{Edge, LabeledGraph};
use crate::worklist::{Worklist, WorklistOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Initial edges are not queued yet.
    Seeding,
    /// The worklist is being drained.
    Propagating,
    /// No production can derive a new edge anymore. Terminal.
    Closed,
}

/// How a run ended. A truncated run still produced a valid subset of the
/// closure, it is just not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Closed,
    Truncated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClosureStats {
    /// Number of edges popped from the worklist.
    pub iterations: usize,
    /// Edges in the graph before seeding.
    pub initial_edges: usize,
    /// Edges added by productions, including epsilon self loops.
    pub derived_edges: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClosureResult {
    pub outcome: Outcome,
    pub stats: ClosureStats,
}

/// Worklist driven closure of a labeled graph under a grammar. The engine
/// owns the graph mutably for the duration of the run, nothing else can
/// add edges while it is propagating.
///
/// Every popped edge `u -l-> v` is composed in both directions:
/// * forward with every `v -r-> w`, deriving `u -combine(l, r)-> w`,
/// * backward with every `x -p-> u`, deriving `x -combine(p, l)-> v`.
///
/// Both contributing edges of any composition are popped at some point, and
/// whichever comes second finds the other one in the indices. Edges are
/// only added, and there are finitely many of them, so the loop terminates.
pub struct ClosureEngine<'a, G: Grammar> {
    grammar: &'a G,
    graph: &'a mut LabeledGraph<G::Label>,
    worklist: Worklist<G::Label>,
    state: EngineState,
    stats: ClosureStats,
}

impl<'a, G: Grammar> ClosureEngine<'a, G> {
    pub fn new(grammar: &'a G, graph: &'a mut LabeledGraph<G::Label>, order: WorklistOrder) -> Self {
        Self {
            grammar,
            graph,
            worklist: Worklist::new(order),
            state: EngineState::Seeding,
            stats: ClosureStats::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn stats(&self) -> ClosureStats {
        self.stats
    }

    /// The graph as derived so far. Always a subset of the final closure.
    pub fn graph(&self) -> &LabeledGraph<G::Label> {
        &*self.graph
    }

    /// Number of edges still waiting for propagation.
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }

    /// Queue every initial edge once and add the epsilon self loops. Does
    /// nothing after the first call.
    pub fn seed(&mut self) -> Result<(), CflError> {
        if self.state != EngineState::Seeding {
            return Ok(());
        }

        self.stats.initial_edges = self.graph.len();
        for &edge in self.graph.edges() {
            self.worklist.push(edge);
        }

        let grammar = self.grammar;
        for &head in grammar.epsilon() {
            for node in 0..self.graph.node_count() {
                self.derive(Edge::new(node, node, head))?;
            }
        }

        debug!(
            "Seeded worklist with {} edges over {} nodes.",
            self.worklist.len(),
            self.graph.node_count()
        );
        self.state = EngineState::Propagating;
        Ok(())
    }

    /// Propagate a single edge. Returns false once the graph is closed.
    pub fn step(&mut self) -> Result<bool, CflError> {
        match self.state {
            EngineState::Seeding => self.seed()?,
            EngineState::Propagating => {}
            EngineState::Closed => return Ok(false),
        }

        if self.worklist.is_empty() {
            debug!(
                "Closed after {} iterations, derived {} edges.",
                self.stats.iterations, self.stats.derived_edges
            );
            self.state = EngineState::Closed;
            return Ok(false);
        }

        let edge = self.worklist.pop()?;
        self.stats.iterations += 1;
        self.propagate(edge)?;
        Ok(true)
    }

    /// Drive the engine until the graph is closed or `iteration_limit` edges
    /// were popped. A limit of zero means no limit. A truncated run can be
    /// resumed by calling `run` again.
    pub fn run(&mut self, iteration_limit: usize) -> Result<Outcome, CflError> {
        let start = self.stats.iterations;
        while self.step()? {
            let done = self.stats.iterations - start;
            if iteration_limit > 0 && done >= iteration_limit && !self.worklist.is_empty() {
                warn!(
                    "Iteration limit of {iteration_limit} reached with {} edges pending, the result is incomplete.",
                    self.worklist.len()
                );
                return Ok(Outcome::Truncated);
            }
        }
        Ok(Outcome::Closed)
    }

    fn propagate(&mut self, edge: Edge<G::Label>) -> Result<(), CflError> {
        let Edge { src, dst, label } = edge;
        let grammar = self.grammar;

        if let Some(head) = grammar.unary(label) {
            self.derive(Edge {
                src,
                dst,
                label: head,
            })?;
        }

        // src -label-> dst -next-> target
        let forward: Vec<_> = self
            .graph
            .successors_by_label(dst)
            .iter()
            .filter_map(|(&next, targets)| Some((grammar.combine(label, next)?, targets)))
            .flat_map(|(head, targets)| {
                targets.iter().map(move |&target| Edge {
                    src,
                    dst: target,
                    label: head,
                })
            })
            .collect();
        for derived in forward {
            self.derive(derived)?;
        }

        // origin -prev-> src -label-> dst
        let backward: Vec<_> = self
            .graph
            .predecessors_by_label(src)
            .iter()
            .filter_map(|(&prev, origins)| Some((grammar.combine(prev, label)?, origins)))
            .flat_map(|(head, origins)| {
                origins.iter().map(move |&origin| Edge {
                    src: origin,
                    dst,
                    label: head,
                })
            })
            .collect();
        for derived in backward {
            self.derive(derived)?;
        }

        Ok(())
    }

    fn derive(&mut self, edge: Edge<G::Label>) -> Result<bool, CflError> {
        if !self.graph.insert(edge)? {
            return Ok(false);
        }
        trace!("Derived {edge:?}.");
        self.stats.derived_edges += 1;
        self.worklist.push(edge);
        Ok(true)
    }
}

/// Closes a graph under a grammar using a worklist.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct SolveClosure {
    /// Maximum number of edges to pop. If the limit is reached the solver
    /// stops and reports [`Outcome::Truncated`]. Zero means no limit.
    pub iteration_limit: usize,
    pub order: WorklistOrder,
}

impl SolveClosure {
    /// Run the solver adding the derived edges to `graph` in place.
    pub fn solve_in_place<G: Grammar>(
        &self,
        grammar: &G,
        graph: &mut LabeledGraph<G::Label>,
    ) -> Result<ClosureResult, CflError> {
        let mut engine = ClosureEngine::new(grammar, graph, self.order);
        let outcome = engine.run(self.iteration_limit)?;
        Ok(ClosureResult {
            outcome,
            stats: engine.stats(),
        })
    }

    /// Build a graph over the nodes `0..node_count` from the initial edges
    /// and close it.
    pub fn solve<G: Grammar>(
        &self,
        grammar: &G,
        node_count: usize,
        edges: impl IntoIterator<Item = Edge<G::Label>>,
    ) -> Result<(LabeledGraph<G::Label>, ClosureResult), CflError> {
        let mut graph = LabeledGraph::from_edges(node_count, edges)?;
        let result = self.solve_in_place(grammar, &mut graph)?;
        Ok((graph, result))
    }
}
