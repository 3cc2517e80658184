//! Dual-authored service schemas
//!
//! Every module defines the same DTO group twice, once per family, and
//! exposes a [`GroupResolver`] that picks one at bootstrap. The groups are
//! assembled into the service namespace with [`service_schemas`].

pub mod billing;
pub mod organization;
pub mod user;
pub mod worker;

use tracing::info;

use crate::aggregate::{aggregate, SchemaEntries, SchemaGroup};
use crate::context::ValidatorContext;
use crate::error::{Result, SchemaError};
use crate::family::FamilySchema;
use crate::options::SchemaOptions;
use crate::resolver::SchemaResolver;
use crate::typebox::TypeBoxSchema;
use crate::zod::ZodSchema;

/// A named group of schemas resolved for one family
pub type ServiceGroup = FamilySchema<SchemaGroup<ZodSchema>, SchemaGroup<TypeBoxSchema>>;

/// Resolver over schema groups
pub type GroupResolver = SchemaResolver<SchemaGroup<ZodSchema>, SchemaGroup<TypeBoxSchema>>;

pub const ORGANIZATION_SCHEMAS: &str = "OrganizationSchemas";
pub const USER_SCHEMAS: &str = "UserSchemas";
pub const PLAN_SCHEMAS: &str = "PlanSchemas";
pub const WORKER_OPTIONS_SCHEMAS: &str = "WorkerOptionsSchemas";

/// Unresolved entries for every catalog group
pub fn service_entries() -> SchemaEntries<ServiceGroup> {
    SchemaEntries::new()
        .with(ORGANIZATION_SCHEMAS, organization::resolver())
        .with(USER_SCHEMAS, user::resolver())
        .with(PLAN_SCHEMAS, billing::resolver())
        .with(WORKER_OPTIONS_SCHEMAS, worker::resolver())
}

/// Resolve the whole catalog for `ctx`
pub fn service_schemas(ctx: &ValidatorContext) -> Result<SchemaGroup<ServiceGroup>> {
    let group = aggregate(&service_entries(), ctx)?;
    info!(family = %ctx.family, groups = group.len(), "resolved service schemas");
    Ok(group)
}

/// One DTO as authored for both families
#[derive(Debug, Clone)]
pub struct SchemaPair {
    pub group: String,
    pub name: String,
    pub zod: ZodSchema,
    pub typebox: TypeBoxSchema,
}

/// Resolve the catalog under both families and pair schemas up by name.
///
/// A schema present on one side only is reported as `InvalidSchema`.
pub fn pairs(options: &SchemaOptions) -> Result<Vec<SchemaPair>> {
    let zod = service_schemas(&ValidatorContext::zod(options.clone()))?;
    let typebox = service_schemas(&ValidatorContext::typebox(options.clone()))?;

    let mut pairs = Vec::new();
    for (group_name, resolved) in zod.iter() {
        let (Some(zod_group), Some(typebox_group)) = (
            resolved.zod(),
            typebox.get(group_name).and_then(|g| g.typebox()),
        ) else {
            return Err(SchemaError::InvalidSchema(format!(
                "{} is not resolved for both families",
                group_name
            )));
        };
        if zod_group.len() != typebox_group.len() {
            return Err(SchemaError::InvalidSchema(format!(
                "{} defines {} zod schemas but {} typebox schemas",
                group_name,
                zod_group.len(),
                typebox_group.len()
            )));
        }
        for (name, zod_schema) in zod_group.iter() {
            let typebox_schema = typebox_group.get(name).ok_or_else(|| {
                SchemaError::InvalidSchema(format!("{}.{} has no typebox counterpart", group_name, name))
            })?;
            pairs.push(SchemaPair {
                group: group_name.to_string(),
                name: name.to_string(),
                zod: zod_schema.clone(),
                typebox: typebox_schema.clone(),
            });
        }
    }
    Ok(pairs)
}
