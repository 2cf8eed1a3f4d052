use super::ResolverId;
use crate::mapping::{Column, ComponentMetadata, DataType, JoinColumnMetadata};
use crate::{Config, Error, Result};

use indexmap::IndexMap;
use std::collections::HashSet;

/// Binds the type of one join column to the type of the column it
/// references.
///
/// Created in phase 1 by
/// [`create_lazy_data_type_resolver`](super::MetadataBuildingContext::create_lazy_data_type_resolver)
/// and run in phase 2. Running a resolver is idempotent.
#[derive(Debug, Clone)]
pub(crate) struct DataTypeResolver {
    id: ResolverId,

    /// Class declaring the association
    source_entity: String,

    /// The association's field
    field_name: String,

    /// Position of the join column within the association
    column_index: usize,

    /// Class owning the referenced column
    target_entity: String,
}

/// Where a resolver's join column points to, found without mutating
/// anything.
struct Target<'a> {
    join_column: &'a JoinColumnMetadata,
    referenced_column_name: &'a str,
    column: Column<'a>,
}

enum Resolution {
    Resolved,
    Pending,
}

/// Runs resolvers until all are resolved.
///
/// Only resolvers bound to a registered join column run. Builds whose result
/// was discarded leave resolvers no join column points to; those are skipped.
///
/// Each pass runs every pending resolver once, in creation order. A resolver
/// whose referenced column is itself a join column still waiting on its type
/// stays pending for the next pass. A pass that resolves nothing means the
/// remaining resolvers wait on each other.
pub(super) fn drain(
    config: &Config,
    components: &mut IndexMap<String, ComponentMetadata>,
    resolvers: &[DataTypeResolver],
) -> Result<()> {
    let mut pending: Vec<&DataTypeResolver> = resolvers
        .iter()
        .filter(|resolver| resolver.is_bound(components))
        .collect();

    if pending.len() < resolvers.len() {
        log::trace!(
            "skipping {} resolvers of discarded builds",
            resolvers.len() - pending.len()
        );
    }

    let mut pass = 0;

    while !pending.is_empty() {
        pass += 1;
        let before = pending.len();
        let mut remaining = Vec::with_capacity(before);

        for resolver in pending {
            match resolver.resolve(config, components)? {
                Resolution::Resolved => {}
                Resolution::Pending => remaining.push(resolver),
            }
        }

        log::trace!(
            "resolution pass {pass}; resolved={}; pending={}",
            before - remaining.len(),
            remaining.len()
        );

        if remaining.len() == before {
            return Err(circular(components, resolvers, remaining[0]));
        }

        pending = remaining;
    }

    Ok(())
}

impl DataTypeResolver {
    pub(super) fn new(
        id: ResolverId,
        source_entity: &str,
        field_name: &str,
        column_index: usize,
        target_entity: &str,
    ) -> Self {
        Self {
            id,
            source_entity: source_entity.to_string(),
            field_name: field_name.to_string(),
            column_index,
            target_entity: target_entity.to_string(),
        }
    }

    /// True if a registered join column still waits on this resolver.
    fn is_bound(&self, components: &IndexMap<String, ComponentMetadata>) -> bool {
        matches!(
            self.join_column(components),
            Ok(join_column) if join_column.ty.resolver() == Some(self.id)
        )
    }

    fn resolve(
        &self,
        config: &Config,
        components: &mut IndexMap<String, ComponentMetadata>,
    ) -> Result<Resolution> {
        let target = self.target(components)?;

        let Some(ty) = target.column.ty().cloned() else {
            log::trace!(
                "{:?}: `{}.{}` is not resolved yet",
                self.id,
                self.target_entity,
                target.referenced_column_name
            );
            return Ok(Resolution::Pending);
        };

        let retarget = target.join_column.implicit_referenced_column;
        let referenced_column_name = target.referenced_column_name.to_string();

        let join_column = self.join_column_mut(components)?;

        if retarget {
            if join_column.implicit_name {
                join_column.column_name = config
                    .naming_strategy()
                    .join_column_name(&self.field_name, &referenced_column_name);
            }
            join_column.referenced_column_name = referenced_column_name;
        }

        log::trace!(
            "{:?}: `{}.{}` resolved to {}",
            self.id,
            self.source_entity,
            join_column.column_name,
            ty
        );

        join_column.ty = DataType::Resolved(ty);
        Ok(Resolution::Resolved)
    }

    /// Finds the join column and the column it references.
    ///
    /// A join column without a declared referenced column points at the
    /// target's first identifier column.
    fn target<'a>(
        &self,
        components: &'a IndexMap<String, ComponentMetadata>,
    ) -> Result<Target<'a>> {
        let Some(target) = components.get(&self.target_entity) else {
            return Err(Error::unresolvable_target_entity(
                &self.source_entity,
                &self.field_name,
                &self.target_entity,
            ));
        };

        let join_column = self.join_column(components)?;

        let referenced_column_name = if join_column.implicit_referenced_column {
            match target.identifier_columns().first() {
                Some(column) => *column,
                None => {
                    return Err(Error::invalid_mapping(format!(
                        "`{}::{}` references `{}`, which has no identifier",
                        self.source_entity, self.field_name, self.target_entity
                    )))
                }
            }
        } else {
            join_column.referenced_column_name.as_str()
        };

        let Some(column) = target.column(referenced_column_name) else {
            return Err(Error::invalid_mapping(format!(
                "`{}::{}` references column `{}`, which `{}` does not have",
                self.source_entity, self.field_name, referenced_column_name, self.target_entity
            )));
        };

        Ok(Target {
            join_column,
            referenced_column_name,
            column,
        })
    }

    fn join_column<'a>(
        &self,
        components: &'a IndexMap<String, ComponentMetadata>,
    ) -> Result<&'a JoinColumnMetadata> {
        components
            .get(&self.source_entity)
            .and_then(|source| source.association(&self.field_name))
            .and_then(|association| association.join_columns.get(self.column_index))
            .ok_or_else(|| self.unregistered())
    }

    fn join_column_mut<'a>(
        &self,
        components: &'a mut IndexMap<String, ComponentMetadata>,
    ) -> Result<&'a mut JoinColumnMetadata> {
        let unregistered = self.unregistered();

        components
            .get_mut(&self.source_entity)
            .and_then(|source| source.association_mut(&self.field_name))
            .and_then(|association| association.join_columns.get_mut(self.column_index))
            .ok_or(unregistered)
    }

    fn unregistered(&self) -> Error {
        Error::invalid_mapping(format!(
            "join column #{} of `{}::{}` is not registered",
            self.column_index, self.source_entity, self.field_name
        ))
    }

    fn describe(&self, components: &IndexMap<String, ComponentMetadata>) -> String {
        match self.join_column(components) {
            Ok(join_column) => format!("{}.{}", self.source_entity, join_column.column_name),
            Err(_) => format!("{}::{}", self.source_entity, self.field_name),
        }
    }
}

/// Builds the error for resolvers that wait on each other, walking from
/// `start` along referenced columns until a resolver repeats.
fn circular(
    components: &IndexMap<String, ComponentMetadata>,
    resolvers: &[DataTypeResolver],
    start: &DataTypeResolver,
) -> Error {
    let mut visited = HashSet::new();
    let mut path = vec![start.describe(components)];
    let mut current = start;

    visited.insert(current.id);

    while let Ok(target) = current.target(components) {
        path.push(format!(
            "{}.{}",
            current.target_entity, target.referenced_column_name
        ));

        let next = target
            .column
            .pending_resolver()
            .and_then(|id| resolvers.get(id.0));

        match next {
            Some(next) if visited.insert(next.id) => current = next,
            _ => break,
        }
    }

    Error::circular_identifier_resolution(path)
}
