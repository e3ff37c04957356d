//! # Stone Files
//!
//! **INTERNAL USE ONLY**: This crate holds the code a generator emits for the `files` and `auth`
//! namespaces, written out by hand. It exists to exercise `stone-core` end to end (structs,
//! unions, timestamps, collections and route tables) and as the route catalog of the `stone` CLI.
//! It is not intended for production use.
use stone_core::RouteDescriptor;

pub mod auth;
pub mod files;

/// Every route of the bundled namespaces, in declaration order.
pub fn routes() -> Vec<&'static RouteDescriptor> {
    files::routes::all()
        .into_iter()
        .chain(auth::routes::all())
        .collect()
}

/// Looks a route up by its `namespace/name`.
pub fn find_route(full_name: &str) -> Option<&'static RouteDescriptor> {
    let (namespace, name) = full_name.split_once('/')?;
    routes()
        .into_iter()
        .find(|route| route.namespace() == namespace && route.name() == name)
}
