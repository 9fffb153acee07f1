//! Application-wide constants

/// Group name reserved for the built-in super-user group.
pub const RESERVED_GROUP_NAME: &str = "AllPermission";

pub const SORT_DESCENDING: &str = "DESC";

/// Prefixes used when formatting sequence values into entity ids.
pub const GROUP_ID_PREFIX: &str = "GRP";
pub const GROUP_PERMISSION_ID_PREFIX: &str = "GPM";
pub const GROUP_USER_MAPPING_ID_PREFIX: &str = "GUM";
pub const SEQUENCE_WIDTH: usize = 6;

pub const DEFAULT_USER_TYPE: &str = "Admin";
