//! Shared constants for catalog integration tests

// ============================================================================
// Test Users
// ============================================================================

pub const ALICE_MOBILE: &str = "555-0100";
pub const BOB_MOBILE: &str = "555-0199";
pub const CAROL_MOBILE: &str = "555-0142";

// ============================================================================
// Test Catalog
// ============================================================================

pub const BEATLES: &str = "Beatles";
pub const ABBEY: &str = "Abbey";

/// Both songs of "Abbey" are 300 long.
pub const COME_TOGETHER: &str = "Come Together";
pub const SOMETHING: &str = "Something";
