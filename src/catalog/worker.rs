//! Worker option schemas (database polling and queue-backed workers)

use crate::aggregate::SchemaGroup;
use crate::error::Result;
use crate::options::SchemaOptions;
use crate::typebox::{Type, TypeBoxSchema};
use crate::zod::{z, ZodSchema};

use super::GroupResolver;

pub const DATABASE_WORKER_OPTIONS: &str = "DatabaseWorkerOptionsSchema";
pub const QUEUE_WORKER_OPTIONS: &str = "QueueWorkerOptionsSchema";

pub fn zod_worker_options(_options: &SchemaOptions) -> Result<SchemaGroup<ZodSchema>> {
    let database = z::object([
        ("pageSize", z::number()),
        ("retries", z::number()),
        ("interval", z::number()),
    ]);
    let queue = z::object([
        ("backoffType", z::union([z::literal("fixed"), z::literal("exponential")])),
        ("retries", z::number()),
        ("interval", z::number()),
        ("queueOptions", z::object([("connection", z::object([("url", z::uri())]))])),
    ]);
    Ok(SchemaGroup::new()
        .with(DATABASE_WORKER_OPTIONS, database)
        .with(QUEUE_WORKER_OPTIONS, queue))
}

pub fn typebox_worker_options(_options: &SchemaOptions) -> Result<SchemaGroup<TypeBoxSchema>> {
    // properties declared in a different order than the Zod side on purpose
    let database = Type::object([
        ("interval", Type::number()),
        ("retries", Type::number()),
        ("pageSize", Type::number()),
    ]);
    let queue = Type::object([
        (
            "queueOptions",
            Type::object([("connection", Type::object([("url", Type::uri())]))]),
        ),
        ("backoffType", Type::union([Type::literal("fixed"), Type::literal("exponential")])),
        ("interval", Type::number()),
        ("retries", Type::number()),
    ]);
    Ok(SchemaGroup::new()
        .with(DATABASE_WORKER_OPTIONS, database.compile()?)
        .with(QUEUE_WORKER_OPTIONS, queue.compile()?))
}

pub fn resolver() -> GroupResolver {
    GroupResolver::new(zod_worker_options, typebox_worker_options)
}
