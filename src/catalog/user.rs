//! User schemas

use crate::aggregate::SchemaGroup;
use crate::error::Result;
use crate::options::SchemaOptions;
use crate::typebox::{TSchema, Type, TypeBoxSchema};
use crate::zod::{z, ZodSchema};

use super::GroupResolver;

pub const CREATE_USER: &str = "CreateUserSchema";
pub const UPDATE_USER: &str = "UpdateUserSchema";
pub const USER: &str = "UserSchema";

pub fn zod_user(options: &SchemaOptions) -> Result<SchemaGroup<ZodSchema>> {
    let id = || if options.uuid_id { z::uuid() } else { z::number() };

    let create = z::object([
        ("email", z::email()),
        ("firstName", z::string()),
        ("lastName", z::string()),
        ("organizationId", id()),
        ("roleIds", z::array(id())),
        ("phoneNumber", z::string().optional()),
        ("metadata", z::record(z::string(), z::unknown()).optional()),
    ]);
    let update = create.partial().extend([("id", id())]);
    let user = z::object([
        ("id", id()),
        ("email", z::email()),
        ("firstName", z::string()),
        ("lastName", z::string()),
        ("organization", z::object([("id", id()), ("name", z::string())])),
        ("roles", z::array(z::object([("id", id()), ("name", z::string())]))),
        ("phoneNumber", z::string().optional()),
        ("metadata", z::record(z::string(), z::unknown()).optional()),
        ("createdAt", z::date()),
        ("deletedAt", z::nullish()),
    ]);

    Ok(SchemaGroup::new()
        .with(CREATE_USER, create)
        .with(UPDATE_USER, update)
        .with(USER, user))
}

fn create_fields(options: &SchemaOptions) -> Vec<(&'static str, TSchema)> {
    let id = || if options.uuid_id { Type::uuid() } else { Type::number() };
    vec![
        ("email", Type::email()),
        ("firstName", Type::string()),
        ("lastName", Type::string()),
        ("organizationId", id()),
        ("roleIds", Type::array(id())),
        ("phoneNumber", Type::optional(Type::string())),
        ("metadata", Type::optional(Type::record(Type::string(), Type::unknown()))),
    ]
}

pub fn typebox_user(options: &SchemaOptions) -> Result<SchemaGroup<TypeBoxSchema>> {
    let id = || if options.uuid_id { Type::uuid() } else { Type::number() };

    let create = Type::object(create_fields(options));
    let update = Type::object(
        std::iter::once(("id", id())).chain(
            create_fields(options)
                .into_iter()
                .map(|(name, schema)| (name, Type::optional(schema))),
        ),
    );
    let user = Type::object([
        ("id", id()),
        ("email", Type::email()),
        ("firstName", Type::string()),
        ("lastName", Type::string()),
        ("organization", Type::object([("id", id()), ("name", Type::string())])),
        ("roles", Type::array(Type::object([("id", id()), ("name", Type::string())]))),
        ("phoneNumber", Type::optional(Type::string())),
        ("metadata", Type::optional(Type::record(Type::string(), Type::unknown()))),
        ("createdAt", Type::date()),
        ("deletedAt", Type::nullish()),
    ]);

    Ok(SchemaGroup::new()
        .with(CREATE_USER, create.compile()?)
        .with(UPDATE_USER, update.compile()?)
        .with(USER, user.compile()?))
}

pub fn resolver() -> GroupResolver {
    GroupResolver::new(zod_user, typebox_user)
}
