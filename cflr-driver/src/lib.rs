use cfl::grammar::Alphabet;
use cfl::solvers::SolveClosure;
use cfl::worklist::WorklistOrder;
use cflr_lib::{
    build_graph, default_grammar,
    dot::import_dot,
    load_edges, load_grammar,
    report::{dump_edges, print_closure, print_summary},
};
use clap::{Parser as CommandLineParser, ValueEnum};
use log::info;
use utils::DiagnosticEmitter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Default)]
pub enum CLIOrder {
    #[default]
    Fifo,
    Lifo,
    Priority,
    Random,
}

#[derive(Debug, CommandLineParser, Default)]
#[command(
    name = "cflr",
    version,
    about = "Close a labeled graph under a context-free grammar."
)]
pub struct Opt {
    /// File with the productions of the grammar, one `Head -> Body` per line.
    /// Defaults to the single rule `S -> A B`.
    #[arg(long, value_name = "FILE")]
    pub grammar: Option<String>,

    /// The graph file is a graphviz dump whose edge colors are the labels.
    #[arg(long)]
    pub dot: bool,

    /// Order in which the worklist propagates edges.
    #[arg(long, value_enum, default_value_t)]
    pub order: CLIOrder,

    /// Seed for the random worklist order.
    #[arg(long, default_value_t)]
    pub seed: u64,

    /// Stop after propagating this many edges. Zero means no limit.
    #[arg(long, default_value_t)]
    pub iteration_limit: usize,

    /// Print every edge of the closed graph.
    #[arg(long)]
    pub dump: bool,

    /// Only print edges with this label.
    #[arg(long, value_name = "LABEL")]
    pub label: Option<String>,

    /// File containing the initial edges, one `src dst label` per line.
    pub filename: String,
}

impl Opt {
    fn order(&self) -> WorklistOrder {
        match self.order {
            CLIOrder::Fifo => WorklistOrder::Fifo,
            CLIOrder::Lifo => WorklistOrder::Lifo,
            CLIOrder::Priority => WorklistOrder::Priority,
            CLIOrder::Random => WorklistOrder::Random(self.seed),
        }
    }
}

pub fn process_source(
    graph_src: &str,
    grammar_src: Option<&str>,
    diag: &mut DiagnosticEmitter,
    opts: &Opt,
) -> Option<()> {
    let grammar = match grammar_src {
        Some(src) => load_grammar(src, Alphabet::new(), diag)?,
        None => match default_grammar() {
            Ok(grammar) => grammar,
            Err(err) => {
                diag.err_ln(&format!("Error: {err}"));
                return None;
            }
        },
    };
    info!("Loaded {} productions.", grammar.productions.len());

    let edges = if opts.dot {
        import_dot(graph_src, grammar.alphabet, diag)?
    } else {
        load_edges(graph_src, grammar.alphabet, diag)?
    };
    let mut graph = build_graph(&edges, diag)?;
    diag.out_ln(&format!("Loaded graph with {} edges.", graph.len()));
    print_summary(&graph, &edges.alphabet, diag);

    let label = match &opts.label {
        Some(name) => {
            let Some(sym) = edges.alphabet.lookup(name) else {
                diag.err_ln(&format!("Error: unknown label '{name}'."));
                return None;
            };
            Some(sym)
        }
        None => None,
    };

    let solver = SolveClosure {
        iteration_limit: opts.iteration_limit,
        order: opts.order(),
    };
    let result = match solver.solve_in_place(&grammar.productions, &mut graph) {
        Ok(result) => result,
        Err(err) => {
            diag.err_ln(&format!("Error: {err}"));
            return None;
        }
    };
    print_closure(&result, diag);

    if opts.dump || label.is_some() {
        dump_edges(&graph, &edges.alphabet, edges.node_names.as_deref(), label, diag);
    }

    Some(())
}
