use crate::dedup::AdmissionPolicy;
use crate::store::StoreKind;

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of slots in the finished set
    pub num_values: usize,
    pub policy: AdmissionPolicy,
    /// Backend for the finished set; smaller sizes never go to an external store
    pub store: StoreKind,
}

impl GeneratorConfig {
    pub fn new(num_values: usize) -> Self {
        Self {
            num_values,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: AdmissionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    /// Backend for the intermediate set of `num_values` values
    pub(crate) fn store_for(&self, num_values: usize) -> StoreKind {
        match &self.store {
            StoreKind::External(_) if num_values != self.num_values => StoreKind::Packed,
            kind => kind.clone(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_values: 4,
            policy: AdmissionPolicy::default(),
            store: StoreKind::default(),
        }
    }
}
