/// Name of the cookie carrying the signed session token
pub const AUTH_COOKIE_NAME: &str = "jwt";

/// Token lifetime when TOKEN_TTL_DAYS is not set (one month)
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Upper bound for TOKEN_TTL_DAYS (ten years)
pub const MAX_TOKEN_TTL_DAYS: i64 = 3650;

/// bcrypt work factor for stored password hashes
pub const BCRYPT_COST: u32 = 10;

/// Column limits from the schema
pub const MAX_HABIT_NAME_LEN: usize = 100;
pub const MAX_COLOR_LEN: usize = 30;
pub const MAX_USERNAME_LEN: usize = 100;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

/// bcrypt only looks at the first 72 bytes
pub const MAX_PASSWORD_LEN: usize = 72;

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_UNAUTHENTICATED: &str = "Unauthenticated";

pub const ERR_VALIDATION_FAILED: &str = "Validation failed";

pub const ERR_INVALID_CREDENTIALS: &str = "Invalid username or password";

pub const ERR_HABIT_NAME_TAKEN: &str = "A habit list with this name already exists";

pub const ERR_HABIT_LIST_CONFLICT: &str = "Habit list update conflicts with existing data";
