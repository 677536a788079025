//! Traits describing the read-only collaborators around the core.
//!
//! Oracles expose the declarative action catalog and the external
//! cost/score formulas. The [`Env`] aggregate bundles them so checks and
//! operators can reach everything they need without hard coupling to
//! concrete implementations. Both are fixed at startup and never mutated,
//! so sharing one env across threads is safe.

mod compute;
mod tables;

pub use compute::{BaselineCompute, ComputeOracle};
pub use tables::{StaticTables, TablesOracle};

/// Aggregates the read-only oracles required by checks and operators.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, T, C>
where
    T: TablesOracle + ?Sized,
    C: ComputeOracle + ?Sized,
{
    tables: &'a T,
    compute: &'a C,
}

/// Trait-object form consumed throughout the action framework.
pub type SynthEnv<'a> = Env<'a, dyn TablesOracle + 'a, dyn ComputeOracle + 'a>;

impl<'a, T, C> Env<'a, T, C>
where
    T: TablesOracle + ?Sized,
    C: ComputeOracle + ?Sized,
{
    pub fn new(tables: &'a T, compute: &'a C) -> Self {
        Self { tables, compute }
    }

    /// The declarative action catalog.
    pub fn tables(&self) -> &'a T {
        self.tables
    }

    /// The cost/score collaborator.
    pub fn compute(&self) -> &'a C {
        self.compute
    }
}

impl<'a, T, C> Env<'a, T, C>
where
    T: TablesOracle + 'a,
    C: ComputeOracle + 'a,
{
    /// Converts to the trait-object form consumed by the action framework.
    pub fn as_synth_env(&self) -> SynthEnv<'a> {
        Env::new(self.tables as &dyn TablesOracle, self.compute as &dyn ComputeOracle)
    }
}

impl SynthEnv<'static> {
    /// Built-in catalog paired with the identity compute collaborator.
    ///
    /// Handy for tests and for drivers that have not wired a tuned
    /// collaborator yet.
    pub fn baseline() -> Self {
        static TABLES: StaticTables = StaticTables::new();
        static COMPUTE: BaselineCompute = BaselineCompute;
        Env::new(&TABLES, &COMPUTE)
    }
}
