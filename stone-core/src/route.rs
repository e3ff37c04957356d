//! # Route Descriptors
//!
//! A [`RouteDescriptor`] binds the identity of one RPC endpoint to the converters needed to
//! interpret its payloads. Generated code creates one per endpoint when it is loaded and shares
//! it read-only across every call to that endpoint.
//!
//! Construction is the only mutation point: every field is supplied to [`RouteDescriptor::new`]
//! and there are no setters. Nothing here performs I/O; picking a route, sending the request
//! and decoding the reply belong to the transport layer (see [`crate::response`]).
use crate::serializable::ConverterRef;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Attribute key holding the [`RouteStyle`] of a route.
pub const STYLE_ATTR: &str = "style";

/// How the transport should carry a route's payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteStyle {
    /// Arguments and result both travel as JSON bodies.
    Rpc,
    /// Arguments travel in a header, the body carries the uploaded content.
    Upload,
    /// Arguments travel in a header, the response body carries the downloaded content.
    Download,
}

impl RouteStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStyle::Rpc => "rpc",
            RouteStyle::Upload => "upload",
            RouteStyle::Download => "download",
        }
    }
}

impl fmt::Display for RouteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown route style '{0}'")]
pub struct UnknownRouteStyle(String);

impl FromStr for RouteStyle {
    type Err = UnknownRouteStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rpc" => Ok(RouteStyle::Rpc),
            "upload" => Ok(RouteStyle::Upload),
            "download" => Ok(RouteStyle::Download),
            other => Err(UnknownRouteStyle(other.to_string())),
        }
    }
}

/// Immutable metadata for one RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    name: String,
    namespace: String,
    deprecated: bool,
    result: Option<ConverterRef>,
    error: Option<ConverterRef>,
    attrs: BTreeMap<String, String>,
}

impl RouteDescriptor {
    /// Creates the descriptor of an endpoint.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the route within its namespace (e.g. `get_metadata`).
    /// * `namespace` - Namespace the route belongs to (e.g. `files`).
    /// * `deprecated` - Whether the endpoint is deprecated.
    /// * `result` - Converter of the success payload, `None` when the route has no typed result.
    /// * `error` - Converter of the route-specific error payload, `None` when it has none.
    /// * `attrs` - Free-form endpoint metadata (e.g. `style`, `host`). When a key repeats,
    ///   the last value wins.
    pub fn new<I, K, V>(
        name: impl Into<String>,
        namespace: impl Into<String>,
        deprecated: bool,
        result: Option<ConverterRef>,
        error: Option<ConverterRef>,
        attrs: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            deprecated,
            result,
            error,
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns `namespace/name` (e.g. `files/get_metadata`), the form routes are addressed by.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    pub fn deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn result_converter(&self) -> Option<ConverterRef> {
        self.result
    }

    pub fn error_converter(&self) -> Option<ConverterRef> {
        self.error
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// The `style` attribute, if present and one of the known styles.
    pub fn style(&self) -> Option<RouteStyle> {
        self.attr(STYLE_ATTR)?.parse().ok()
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())?;
        if self.deprecated {
            f.write_str(" (deprecated)")?;
        }
        Ok(())
    }
}
