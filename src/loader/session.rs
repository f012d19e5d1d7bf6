use std::collections::HashMap;
use std::sync::Arc;

use super::InstanceRegistry;
use crate::error::ResolveError;

/// State shared by one top-level load and every nested load it triggers.
///
/// Registries built during the call tree are reused instead of rebuilt, and
/// the stack of classes being built is tracked so that a reference cycle
/// fails with [`ResolveError::CyclicReference`] instead of recursing forever.
#[derive(Debug, Default)]
pub struct LoadSession {
    loaded: HashMap<String, Arc<InstanceRegistry>>,
    in_progress: Vec<String>,
}

impl LoadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self, class: &str) -> Option<Arc<InstanceRegistry>> {
        self.loaded.get(class).cloned()
    }

    pub fn enter(&mut self, class: &str) -> Result<(), ResolveError> {
        if let Some(start) = self.in_progress.iter().position(|c| c == class) {
            let mut chain = self.in_progress[start..].to_vec();
            chain.push(class.to_string());
            return Err(ResolveError::cyclic_reference(chain));
        }
        self.in_progress.push(class.to_string());
        Ok(())
    }

    pub fn exit(&mut self, class: &str) {
        if let Some(idx) = self.in_progress.iter().rposition(|c| c == class) {
            self.in_progress.truncate(idx);
        }
    }

    pub fn record(&mut self, registry: Arc<InstanceRegistry>) {
        self.loaded.insert(registry.class().to_string(), registry);
    }

    pub fn depth(&self) -> usize {
        self.in_progress.len()
    }
}
