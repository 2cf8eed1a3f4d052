//! The registry shared by every builder of one mapping compilation pass.

mod resolve;
use resolve::DataTypeResolver;

use crate::mapping::{ComponentMetadata, Schema, ToOneAssociationMetadata};
use crate::{Config, Error, Result};

use indexmap::IndexMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Holds the partially built metadata graph and the queue of deferred join
/// column type resolvers for one compilation pass.
///
/// The pass runs in two phases:
///
/// 1. Classes are built and [registered](Self::register_component) in any
///    order, possibly from several threads. Building a to-one association
///    queues one resolver per join column instead of looking at the target,
///    which may not be registered yet.
/// 2. [`resolve`](Self::resolve) consumes the context, drains the resolver
///    queue to a fixed point and hands back the immutable [`Schema`].
pub struct MetadataBuildingContext {
    config: Config,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    /// Registered classes, in registration order
    components: IndexMap<String, ComponentMetadata>,

    /// Pending join column type resolvers. A resolver's position is its id.
    resolvers: Vec<DataTypeResolver>,
}

/// Identifies a deferred join column type resolver within its context.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ResolverId(pub(crate) usize);

impl MetadataBuildingContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: Mutex::new(State::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Hands a fully built class over to the context.
    pub fn register_component(&self, component: ComponentMetadata) -> Result<()> {
        let mut state = self.state();

        if state.components.contains_key(&component.class_name) {
            return Err(Error::invalid_mapping(format!(
                "class `{}` is registered more than once",
                component.class_name
            )));
        }

        log::debug!(
            "registered class `{}`; identifier={:?}",
            component.class_name,
            component.identifier
        );

        state
            .components
            .insert(component.class_name.clone(), component);
        Ok(())
    }

    pub fn is_registered(&self, class_name: &str) -> bool {
        self.state().components.contains_key(class_name)
    }

    /// Queues resolution of the type of the join column at `column_index` of
    /// `association`.
    ///
    /// The resolver refers to the join column by class, field and position
    /// rather than holding on to it, so it always sees the registered
    /// metadata, never a stale copy. It runs during [`resolve`](Self::resolve)
    /// if the registered join column at that position still carries the
    /// returned id; resolvers of discarded builds never run.
    pub fn create_lazy_data_type_resolver(
        &self,
        association: &ToOneAssociationMetadata,
        column_index: usize,
    ) -> ResolverId {
        let mut state = self.state();
        let id = ResolverId(state.resolvers.len());

        log::debug!(
            "deferring type of join column #{} of `{}::{}` until `{}` is known; resolver={:?}",
            column_index,
            association.source_entity,
            association.field_name,
            association.target_entity,
            id
        );

        state.resolvers.push(DataTypeResolver::new(
            id,
            &association.source_entity,
            &association.field_name,
            column_index,
            &association.target_entity,
        ));
        id
    }

    /// Number of resolvers queued so far.
    pub fn pending_resolvers(&self) -> usize {
        self.state().resolvers.len()
    }

    /// Ends phase 1 and resolves every deferred join column type.
    ///
    /// Fails on the first resolver whose target class was never registered,
    /// and with a circular resolution error when the remaining resolvers only
    /// wait on each other.
    pub fn resolve(self) -> Result<Schema> {
        let State {
            mut components,
            resolvers,
        } = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        resolve::drain(&self.config, &mut components, &resolvers)?;

        let schema = Schema { components };
        schema.verify()?;

        log::debug!(
            "mapping pass complete; classes={}; resolvers={}",
            schema.components.len(),
            resolvers.len()
        );

        Ok(schema)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // Writers only append while holding the lock; a poisoned lock still
        // guards consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MetadataBuildingContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for MetadataBuildingContext {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        fmt.debug_struct("MetadataBuildingContext")
            .field("config", &self.config)
            .field("components", &state.components.keys().collect::<Vec<_>>())
            .field("resolvers", &state.resolvers.len())
            .finish()
    }
}

impl ResolverId {
    /// Id of a join column that has not been bound to a resolver yet.
    pub(crate) const fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl fmt::Debug for ResolverId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ResolverId({})", self.0)
    }
}
