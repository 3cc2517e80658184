//! Billing plan schemas

use crate::aggregate::SchemaGroup;
use crate::error::Result;
use crate::options::SchemaOptions;
use crate::typebox::{TSchema, Type, TypeBoxSchema};
use crate::zod::{z, ZodSchema};

use super::GroupResolver;

pub const CREATE_PLAN: &str = "CreatePlanSchema";
pub const UPDATE_PLAN: &str = "UpdatePlanSchema";
pub const PLAN: &str = "PlanSchema";

/// Option key for the billing provider enum map; there is no default
pub const PROVIDER_ENUM: &str = "billing_provider";

pub const CADENCES: [&str; 3] = ["weekly", "monthly", "annually"];

pub fn zod_plan(options: &SchemaOptions) -> Result<SchemaGroup<ZodSchema>> {
    let provider = options.require_enum(PROVIDER_ENUM)?.clone();
    let id = || if options.uuid_id { z::uuid() } else { z::number() };

    let create = z::object([
        ("name", z::string()),
        ("description", z::string().optional()),
        ("price", z::number()),
        ("cadence", z::union(CADENCES.map(z::literal))),
        ("features", z::array(z::string())),
        ("seatLimit", z::bigint().optional()),
        ("externalId", z::string()),
        ("billingProvider", z::native_enum(provider)),
        ("active", z::boolean()),
    ]);
    let update = create.partial().extend([("id", id())]);
    let plan = create.extend([("id", id())]);

    Ok(SchemaGroup::new()
        .with(CREATE_PLAN, create)
        .with(UPDATE_PLAN, update)
        .with(PLAN, plan))
}

fn typebox_fields(options: &SchemaOptions) -> Result<Vec<(&'static str, TSchema)>> {
    let provider = options.require_enum(PROVIDER_ENUM)?;
    Ok(vec![
        ("name", Type::string()),
        ("description", Type::optional(Type::string())),
        ("price", Type::number()),
        ("cadence", Type::union(CADENCES.map(Type::literal))),
        ("features", Type::array(Type::string())),
        ("seatLimit", Type::optional(Type::big_int())),
        ("externalId", Type::string()),
        ("billingProvider", Type::enumeration(provider)),
        ("active", Type::boolean()),
    ])
}

pub fn typebox_plan(options: &SchemaOptions) -> Result<SchemaGroup<TypeBoxSchema>> {
    let id = || if options.uuid_id { Type::uuid() } else { Type::number() };

    let create = Type::object(typebox_fields(options)?);
    let update = Type::object(
        typebox_fields(options)?
            .into_iter()
            .map(|(name, schema)| (name, Type::optional(schema)))
            .chain(std::iter::once(("id", id()))),
    );
    let plan = Type::object(
        typebox_fields(options)?
            .into_iter()
            .chain(std::iter::once(("id", id()))),
    );

    Ok(SchemaGroup::new()
        .with(CREATE_PLAN, create.compile()?)
        .with(UPDATE_PLAN, update.compile()?)
        .with(PLAN, plan.compile()?))
}

pub fn resolver() -> GroupResolver {
    GroupResolver::new(zod_plan, typebox_plan)
}
