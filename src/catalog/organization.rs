//! Organization schemas

use serde_json::{json, Map, Value};

use crate::aggregate::SchemaGroup;
use crate::error::Result;
use crate::options::SchemaOptions;
use crate::typebox::{TSchema, Type, TypeBoxSchema};
use crate::zod::{z, ZodSchema};

use super::GroupResolver;

pub const CREATE_ORGANIZATION: &str = "CreateOrganizationSchema";
pub const UPDATE_ORGANIZATION: &str = "UpdateOrganizationSchema";
pub const ORGANIZATION: &str = "OrganizationSchema";

/// Option key for the organization status enum map
pub const STATUS_ENUM: &str = "organization_status";

/// Status members used when the options do not supply any
pub fn default_status() -> Map<String, Value> {
    let mut members = Map::new();
    members.insert("ACTIVE".into(), json!("active"));
    members.insert("INACTIVE".into(), json!("inactive"));
    members
}

fn status(options: &SchemaOptions) -> Map<String, Value> {
    options.enum_map(STATUS_ENUM).cloned().unwrap_or_else(default_status)
}

pub fn zod_organization(options: &SchemaOptions) -> Result<SchemaGroup<ZodSchema>> {
    let id = || if options.uuid_id { z::uuid() } else { z::number() };

    let create = z::object([
        ("name", z::string()),
        ("domain", z::string()),
        ("subscription", z::string()),
        ("logoUrl", z::uri().optional()),
        ("status", z::native_enum(status(options))),
    ]);
    let update = create.partial().extend([("id", id())]);
    let organization = create.extend([
        ("id", id()),
        ("createdAt", z::date()),
        ("updatedAt", z::date()),
    ]);

    Ok(SchemaGroup::new()
        .with(CREATE_ORGANIZATION, create)
        .with(UPDATE_ORGANIZATION, update)
        .with(ORGANIZATION, organization))
}

fn typebox_fields(options: &SchemaOptions) -> Vec<(&'static str, TSchema)> {
    vec![
        ("name", Type::string()),
        ("domain", Type::string()),
        ("subscription", Type::string()),
        ("logoUrl", Type::optional(Type::uri())),
        ("status", Type::enumeration(&status(options))),
    ]
}

pub fn typebox_organization(options: &SchemaOptions) -> Result<SchemaGroup<TypeBoxSchema>> {
    let id = || if options.uuid_id { Type::uuid() } else { Type::number() };

    let create = Type::object(typebox_fields(options));

    let mut update_fields: Vec<(&str, TSchema)> = vec![("id", id())];
    update_fields.extend(
        typebox_fields(options)
            .into_iter()
            .map(|(name, schema)| (name, Type::optional(schema))),
    );
    let update = Type::object(update_fields);

    let mut organization_fields = typebox_fields(options);
    organization_fields.extend([
        ("id", id()),
        ("createdAt", Type::date()),
        ("updatedAt", Type::date()),
    ]);
    let organization = Type::object(organization_fields).with_annotation("title", "Organization");

    Ok(SchemaGroup::new()
        .with(CREATE_ORGANIZATION, create.compile()?)
        .with(UPDATE_ORGANIZATION, update.compile()?)
        .with(ORGANIZATION, organization.compile()?))
}

pub fn resolver() -> GroupResolver {
    GroupResolver::new(zod_organization, typebox_organization)
}
