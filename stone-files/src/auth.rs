//! Routes of the `auth` namespace. None of them carries a typed payload.
pub mod routes {
    use stone_core::RouteDescriptor;
    use std::sync::LazyLock;

    pub static TOKEN_REVOKE: LazyLock<RouteDescriptor> = LazyLock::new(|| {
        RouteDescriptor::new(
            "token/revoke",
            "auth",
            false,
            None,
            None,
            [("style", "rpc"), ("host", "api")],
        )
    });

    pub fn all() -> Vec<&'static RouteDescriptor> {
        vec![&*TOKEN_REVOKE]
    }
}
