use log::{info, warn};

use crate::expression::Expression;
use crate::generator::{ExpressionGenerator, GeneratorConfig};
use crate::operator::OperatorTable;
use crate::solver::errors::SolverError;
use crate::store::{ExpressionStore, ExternalStore, StoreError, StoreKind, WordStore};

/// The finished expression set for one slot count, ready to be evaluated
#[derive(Debug)]
pub struct ExpressionIndex {
    ops: OperatorTable,
    store: Box<dyn ExpressionStore>,
}

impl ExpressionIndex {
    pub fn new(ops: OperatorTable, store: Box<dyn ExpressionStore>) -> Self {
        Self { ops, store }
    }

    /// Generate the set described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails.
    pub fn generate(config: &GeneratorConfig, ops: OperatorTable) -> Result<Self, SolverError> {
        let store = ExpressionGenerator::new(config.clone(), ops.clone())?.generate()?;
        Ok(Self::new(ops, store))
    }

    /// Load the set stored in `backend`, regenerating and rewriting it if the stored
    /// copy is missing or corrupt
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails for a non-recoverable reason, or if
    /// regenerating or rewriting fails.
    pub fn load_or_generate<W: WordStore + 'static>(
        config: &GeneratorConfig,
        ops: OperatorTable,
        backend: W,
    ) -> Result<Self, SolverError> {
        let num_values = config.num_values;
        match ExternalStore::load(&ops, num_values, &backend) {
            Ok(buffer) => {
                let store = ExternalStore::from_parts(buffer, backend);
                return Ok(Self::new(ops, Box::new(store)));
            }
            Err(err) if err.is_recoverable() => {
                warn!(
                    "Stored expressions over {} values are unusable ({}), regenerating",
                    num_values, err
                );
            }
            Err(err) => return Err(err.into()),
        }

        let generated = ExpressionGenerator::new(
            config.clone().with_store(StoreKind::Packed),
            ops.clone(),
        )?
        .generate()?;

        let mut store = ExternalStore::create(&ops, num_values, backend)?;
        for expr in generated.to_vec()? {
            store.push(expr)?;
        }
        store.flush()?;
        info!(
            "Stored {} regenerated expressions over {} values",
            store.len(),
            num_values
        );

        Ok(Self::new(ops, Box::new(store)))
    }

    pub fn ops(&self) -> &OperatorTable {
        &self.ops
    }

    pub fn store(&self) -> &dyn ExpressionStore {
        self.store.as_ref()
    }

    pub fn num_values(&self) -> usize {
        self.store.num_values()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the record is corrupt.
    pub fn get(&self, index: usize) -> Result<Expression, StoreError> {
        self.store.get(index)
    }
}
