// ABOUTME: Application constants organized by domain
// ABOUTME: Matching threshold, field limits, defaults, and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Ingredient matching
pub mod matching {
    /// Minimum number of distinct shared ingredient names for a recipe to match.
    ///
    /// Fixed, not configurable. A recipe with a single ingredient can never be
    /// returned by a non-empty ingredient search.
    pub const MIN_MATCHING_INGREDIENTS: i64 = 2;
}

/// Field constraints enforced at the request boundary
pub mod limits {
    /// Shortest accepted recipe name
    pub const RECIPE_NAME_MIN_CHARS: usize = 3;
    /// Longest accepted recipe name
    pub const RECIPE_NAME_MAX_CHARS: usize = 100;
    /// Longest accepted recipe description
    pub const RECIPE_DESCRIPTION_MAX_CHARS: usize = 1000;
    /// Shortest accepted step description
    pub const STEP_DESCRIPTION_MIN_CHARS: usize = 10;
    /// Longest accepted step description
    pub const STEP_DESCRIPTION_MAX_CHARS: usize = 1000;
    /// Longest accepted ingredient name
    pub const INGREDIENT_NAME_MAX_CHARS: usize = 100;
    /// Longest accepted preference or allergy tag
    pub const TAG_MAX_CHARS: usize = 100;
    /// Shortest accepted password
    pub const PASSWORD_MIN_LENGTH: usize = 8;
    /// Shortest string that can hold `a@b.c`
    pub const EMAIL_MIN_LENGTH: usize = 6;
}

/// Default values for runtime configuration
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;
    /// Default bind address
    pub const HOST: &str = "127.0.0.1";
    /// Default SQLite database location
    pub const DATABASE_URL: &str = "sqlite:./data/forkast.db";
    /// Default session token lifetime
    pub const JWT_EXPIRY_HOURS: i64 = 24;
    /// Default request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Default number of recently used ingredients considered for recommendations
    pub const RECENT_INGREDIENTS_LIMIT: u32 = 20;
    /// Default number of ingredients returned by the most-used listing
    pub const FREQUENT_INGREDIENTS_LIMIT: u32 = 20;
    /// Default CORS origin list
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// Service identifiers
pub mod service_names {
    /// Name reported by the health endpoint and startup logs
    pub const FORKAST_SERVER: &str = "forkast-server";
}

/// JSON Web Token settings
pub mod jwt {
    /// Length in bytes of a generated signing secret
    pub const GENERATED_SECRET_BYTES: usize = 64;
}

/// Shared error message fragments
pub mod error_messages {
    /// Login failure message; identical for unknown email and wrong password
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    /// Registration conflict message
    pub const EMAIL_ALREADY_REGISTERED: &str = "User with this email already exists";
    /// Missing bearer token
    pub const MISSING_AUTH_HEADER: &str = "Missing Authorization header";
    /// Header present but not `Bearer <token>`
    pub const INVALID_AUTH_HEADER: &str = "Authorization header must use the Bearer scheme";
}
