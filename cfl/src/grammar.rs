use core::fmt::Debug;
use core::hash::Hash;
use core::marker::PhantomData;

use rustc_hash::FxHashMap;

use crate::error::CflError;

/// Labels are the terminals and nonterminals of the grammar that edges can
/// carry. Any small value type works, a hand written `enum` for a fixed
/// grammar or a [`Symbol`] interned from text.
pub trait Label: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> Label for T {}

/// A grammar symbol interned into an [`Alphabet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(pub u16);

/// Maps symbol names to [`Symbol`]s and back. Every name is interned at most
/// once, so symbols can be compared by value.
#[derive(Debug, Clone, Default)]
pub struct Alphabet {
    names: Vec<String>,
    index: FxHashMap<String, Symbol>,
}

impl Alphabet {
    pub const CAPACITY: usize = u16::MAX as usize + 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol of `name`, adding it if it is new. Fails once all
    /// `u16` values are taken.
    pub fn intern(&mut self, name: &str) -> Result<Symbol, CflError> {
        if let Some(&sym) = self.index.get(name) {
            return Ok(sym);
        }
        let sym = u16::try_from(self.names.len())
            .map(Symbol)
            .map_err(|_| CflError::TooManySymbols {
                limit: Self::CAPACITY,
            })?;
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), sym);
        Ok(sym)
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.index.get(name).copied()
    }

    pub fn name(&self, sym: Symbol) -> &str {
        &self.names[sym.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.names.len()).map(|i| Symbol(i as u16))
    }
}

/// The production rules of a context-free grammar in normal form. The closure
/// engine only ever talks to the grammar through this trait, so grammars can
/// be swapped without touching the engine.
///
/// Requirements for every method:
/// * Deterministic: the same arguments always produce the same answer.
/// * Pure: no side effects, the engine might ask the same question many times.
pub trait Grammar {
    type Label: Label;

    /// Binary production `H -> left right`. Given the edges `u -left-> v` and
    /// `v -right-> w` returns the label `H` of the derived edge `u -H-> w`.
    /// Returns `None` when the grammar has no production for this body, which
    /// is the expected outcome for most pairs and not an error.
    fn combine(&self, left: Self::Label, right: Self::Label) -> Option<Self::Label>;

    /// Unary production `H -> label`. An edge `u -label-> v` also
    /// implies `u -H-> v`.
    fn unary(&self, _label: Self::Label) -> Option<Self::Label> {
        None
    }

    /// Heads of the epsilon productions `H -> ε`. Every node gets a self
    /// loop with these labels.
    fn epsilon(&self) -> &[Self::Label] {
        &[]
    }
}

/// Small utility so users do not need to create a new struct for every
/// binary-only grammar.
pub struct FnGrammar<F, L>
where
    L: Label,
    F: Fn(L, L) -> Option<L>,
{
    func: F,
    phantom: PhantomData<L>,
}

impl<F, L> FnGrammar<F, L>
where
    L: Label,
    F: Fn(L, L) -> Option<L>,
{
    /// Create a grammar from a closure or function implementing `combine`.
    pub fn new(func: F) -> Self {
        Self {
            func,
            phantom: PhantomData,
        }
    }
}

impl<F, L> Grammar for FnGrammar<F, L>
where
    L: Label,
    F: Fn(L, L) -> Option<L>,
{
    type Label = L;

    fn combine(&self, left: L, right: L) -> Option<L> {
        (self.func)(left, right)
    }
}

/// Table driven grammar. Every production body has at most one head, adding a
/// second head for the same body is rejected.
#[derive(Debug, Clone)]
pub struct ProductionTable<L: Label> {
    binary: FxHashMap<(L, L), L>,
    unary: FxHashMap<L, L>,
    epsilon: Vec<L>,
}

impl<L: Label> Default for ProductionTable<L> {
    fn default() -> Self {
        Self {
            binary: FxHashMap::default(),
            unary: FxHashMap::default(),
            epsilon: Vec::new(),
        }
    }
}

impl<L: Label> ProductionTable<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the production `head -> left right`.
    pub fn add_binary(&mut self, head: L, left: L, right: L) -> Result<&mut Self, CflError> {
        match self.binary.get(&(left, right)) {
            Some(&existing) if existing != head => Err(CflError::ConflictingProduction {
                body: format!("{left:?} {right:?}"),
                existing: format!("{existing:?}"),
                head: format!("{head:?}"),
            }),
            Some(_) => Ok(self),
            None => {
                self.binary.insert((left, right), head);
                Ok(self)
            }
        }
    }

    /// Add the production `head -> body`.
    pub fn add_unary(&mut self, head: L, body: L) -> Result<&mut Self, CflError> {
        match self.unary.get(&body) {
            Some(&existing) if existing != head => Err(CflError::ConflictingProduction {
                body: format!("{body:?}"),
                existing: format!("{existing:?}"),
                head: format!("{head:?}"),
            }),
            Some(_) => Ok(self),
            None => {
                self.unary.insert(body, head);
                Ok(self)
            }
        }
    }

    /// Add the production `head -> ε`.
    pub fn add_epsilon(&mut self, head: L) -> &mut Self {
        if !self.epsilon.contains(&head) {
            self.epsilon.push(head);
        }
        self
    }

    /// Number of productions in the table.
    pub fn len(&self) -> usize {
        self.binary.len() + self.unary.len() + self.epsilon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every label mentioned by a production, sorted.
    pub fn labels(&self) -> Vec<L> {
        let mut labels: Vec<L> = self
            .binary
            .iter()
            .flat_map(|(&(l, r), &h)| [l, r, h])
            .chain(self.unary.iter().flat_map(|(&b, &h)| [b, h]))
            .chain(self.epsilon.iter().copied())
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

impl<L: Label> Grammar for ProductionTable<L> {
    type Label = L;

    fn combine(&self, left: L, right: L) -> Option<L> {
        self.binary.get(&(left, right)).copied()
    }

    fn unary(&self, label: L) -> Option<L> {
        self.unary.get(&label).copied()
    }

    fn epsilon(&self) -> &[L] {
        &self.epsilon
    }
}
