//! Schema resolver: pick one family's schema at configuration time

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::aggregate::SchemaEntry;
use crate::context::ValidatorContext;
use crate::error::{Result, SchemaError};
use crate::family::{FamilySchema, ValidatorFamily};
use crate::options::SchemaOptions;

/// A family-specific shape factory
pub type ShapeFactory<R> = Arc<dyn Fn(&SchemaOptions) -> Result<R> + Send + Sync>;

/// Holds one factory per family and dispatches on the context's family
pub struct SchemaResolver<A, B> {
    zod: ShapeFactory<A>,
    typebox: ShapeFactory<B>,
}

impl<A, B> SchemaResolver<A, B> {
    pub fn new<FA, FB>(zod: FA, typebox: FB) -> Self
    where
        FA: Fn(&SchemaOptions) -> Result<A> + Send + Sync + 'static,
        FB: Fn(&SchemaOptions) -> Result<B> + Send + Sync + 'static,
    {
        Self {
            zod: Arc::new(zod),
            typebox: Arc::new(typebox),
        }
    }

    /// Invoke the factory for `ctx.family`.
    ///
    /// The mock family is rejected with `UnsupportedValidator`. Factory errors
    /// are returned unchanged.
    pub fn resolve(&self, ctx: &ValidatorContext) -> Result<FamilySchema<A, B>> {
        debug!(family = %ctx.family, uuid_id = ctx.options.uuid_id, "resolving schema");
        match ctx.family {
            ValidatorFamily::Zod => (self.zod)(&ctx.options).map(FamilySchema::Zod),
            ValidatorFamily::TypeBox => (self.typebox)(&ctx.options).map(FamilySchema::TypeBox),
            ValidatorFamily::Mock => Err(SchemaError::UnsupportedValidator { family: ctx.family }),
        }
    }

    /// Resolve from a textual family tag
    pub fn resolve_tag(&self, tag: &str, options: &SchemaOptions) -> Result<FamilySchema<A, B>> {
        let ctx = ValidatorContext::new(tag.parse()?, options.clone());
        self.resolve(&ctx)
    }
}

impl<A, B> Clone for SchemaResolver<A, B> {
    fn clone(&self) -> Self {
        Self {
            zod: Arc::clone(&self.zod),
            typebox: Arc::clone(&self.typebox),
        }
    }
}

impl<A, B> fmt::Debug for SchemaResolver<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaResolver").finish_non_exhaustive()
    }
}

impl<A, B> From<SchemaResolver<A, B>> for SchemaEntry<FamilySchema<A, B>>
where
    A: 'static,
    B: 'static,
{
    fn from(resolver: SchemaResolver<A, B>) -> Self {
        SchemaEntry::factory(move |ctx| resolver.resolve(ctx))
    }
}
