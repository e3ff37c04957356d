//! Data types and routes of the `files` namespace.
use stone_core::{
    Serializable, SerializationError, WireValue,
    converters::{
        collection,
        object::{self, ObjectBuilder},
        timestamp,
    },
    time::OffsetDateTime,
};

/// Date pattern of every timestamp field in this namespace. It has second precision, so
/// sub-second parts of an instant do not survive a round trip.
pub const TIMESTAMP_FORMAT: &str = "yyyy-MM-dd'T'HH:mm:ss'Z'";

// Serializing a timestamp only fails on an unusable pattern, and TIMESTAMP_FORMAT is fixed.
fn serialize_timestamp(value: &OffsetDateTime) -> WireValue {
    timestamp::serialize(value, TIMESTAMP_FORMAT).expect("TIMESTAMP_FORMAT is a valid date pattern")
}

fn deserialize_timestamp(wire: &WireValue) -> Result<OffsetDateTime, SerializationError> {
    timestamp::deserialize(wire, TIMESTAMP_FORMAT)
}

/// Arguments of `get_metadata`.
#[derive(Debug, Clone, PartialEq)]
pub struct GetMetadataArg {
    pub path: String,
    pub include_deleted: bool,
}

impl Serializable for GetMetadataArg {
    fn serialize(&self) -> WireValue {
        ObjectBuilder::new()
            .field("path", self.path.serialize())
            .field("include_deleted", self.include_deleted.serialize())
            .build()
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        let fields = object::expect_object(wire)?;
        Ok(Self {
            path: object::required(fields, "path")?,
            include_deleted: object::optional(fields, "include_deleted")?.unwrap_or(false),
        })
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

/// Metadata of a file.
///
/// Timestamps travel with [`TIMESTAMP_FORMAT`] and are truncated to whole seconds on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    pub name: String,
    pub id: String,
    pub path_lower: Option<String>,
    pub client_modified: OffsetDateTime,
    pub server_modified: OffsetDateTime,
    pub rev: String,
    pub size: u64,
    pub content_hash: Option<String>,
}

impl Serializable for FileMetadata {
    fn serialize(&self) -> WireValue {
        ObjectBuilder::new()
            .field("name", self.name.serialize())
            .field("id", self.id.serialize())
            .optional_field("path_lower", self.path_lower.as_ref().map(String::serialize))
            .field("client_modified", serialize_timestamp(&self.client_modified))
            .field("server_modified", serialize_timestamp(&self.server_modified))
            .field("rev", self.rev.serialize())
            .field("size", self.size.serialize())
            .optional_field("content_hash", self.content_hash.as_ref().map(String::serialize))
            .build()
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        let fields = object::expect_object(wire)?;
        Ok(Self {
            name: object::required(fields, "name")?,
            id: object::required(fields, "id")?,
            path_lower: object::optional(fields, "path_lower")?,
            client_modified: object::required_with(fields, "client_modified", deserialize_timestamp)?,
            server_modified: object::required_with(fields, "server_modified", deserialize_timestamp)?,
            rev: object::required(fields, "rev")?,
            size: object::required(fields, "size")?,
            content_hash: object::optional(fields, "content_hash")?,
        })
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListRevisionsResult {
    pub is_deleted: bool,
    pub entries: Vec<FileMetadata>,
}

impl Serializable for ListRevisionsResult {
    fn serialize(&self) -> WireValue {
        ObjectBuilder::new()
            .field("is_deleted", self.is_deleted.serialize())
            .field("entries", collection::serialize(&self.entries, FileMetadata::serialize))
            .build()
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        let fields = object::expect_object(wire)?;
        Ok(Self {
            is_deleted: object::required(fields, "is_deleted")?,
            entries: object::required_with(fields, "entries", |entries| {
                collection::deserialize(entries, FileMetadata::deserialize)
            })?,
        })
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

/// Error of the lookup based routes. Unknown tags fall back to [`LookupError::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    MalformedPath(Option<String>),
    NotFound,
    NotFile,
    Other,
}

impl Serializable for LookupError {
    fn serialize(&self) -> WireValue {
        match self {
            LookupError::MalformedPath(path) => object::tagged(
                "malformed_path",
                ObjectBuilder::new()
                    .optional_field("malformed_path", path.as_ref().map(String::serialize)),
            ),
            LookupError::NotFound => object::bare_tag("not_found"),
            LookupError::NotFile => object::bare_tag("not_file"),
            LookupError::Other => object::bare_tag("other"),
        }
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        let variant = object::union_tag(wire)?;
        match variant.tag {
            "malformed_path" => {
                let path = match variant.fields {
                    Some(fields) => object::optional(fields, "malformed_path")?,
                    None => None,
                };
                Ok(LookupError::MalformedPath(path))
            }
            "not_found" => Ok(LookupError::NotFound),
            "not_file" => Ok(LookupError::NotFile),
            _ => Ok(LookupError::Other),
        }
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

pub mod routes {
    use super::{FileMetadata, ListRevisionsResult, LookupError};
    use std::sync::LazyLock;
    use stone_core::{ConverterRef, RouteDescriptor};

    const FILE_METADATA: ConverterRef = ConverterRef::of::<FileMetadata>();
    const LOOKUP_ERROR: ConverterRef = ConverterRef::of::<LookupError>();

    pub static GET_METADATA: LazyLock<RouteDescriptor> = LazyLock::new(|| {
        RouteDescriptor::new(
            "get_metadata",
            "files",
            false,
            Some(FILE_METADATA),
            Some(LOOKUP_ERROR),
            [("style", "rpc"), ("host", "api")],
        )
    });

    pub static DELETE: LazyLock<RouteDescriptor> = LazyLock::new(|| {
        RouteDescriptor::new(
            "delete",
            "files",
            true,
            Some(FILE_METADATA),
            Some(LOOKUP_ERROR),
            [("style", "rpc"), ("host", "api")],
        )
    });

    pub static LIST_REVISIONS: LazyLock<RouteDescriptor> = LazyLock::new(|| {
        RouteDescriptor::new(
            "list_revisions",
            "files",
            false,
            Some(ConverterRef::of::<ListRevisionsResult>()),
            Some(LOOKUP_ERROR),
            [("style", "rpc"), ("host", "api")],
        )
    });

    pub static DOWNLOAD: LazyLock<RouteDescriptor> = LazyLock::new(|| {
        RouteDescriptor::new(
            "download",
            "files",
            false,
            Some(FILE_METADATA),
            Some(LOOKUP_ERROR),
            [("style", "download"), ("host", "content")],
        )
    });

    pub fn all() -> Vec<&'static RouteDescriptor> {
        vec![&*GET_METADATA, &*DELETE, &*LIST_REVISIONS, &*DOWNLOAD]
    }
}
