/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const ADMIN_ROUTE_COMPONENT: &str = "admin";
pub const ADMIN_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", ADMIN_ROUTE_COMPONENT);

/// Name shown when an event has no usable speaker information.
pub const DEFAULT_SPEAKER_PLACEHOLDER: &str = "Team";

/// Author value that the speaker fallback never treats as a person.
pub const RESERVED_AUTHOR_NAME: &str = "admin";

/// Page size used when a list request does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on a requested page size.
pub const MAX_PAGE_SIZE: u32 = 100;
