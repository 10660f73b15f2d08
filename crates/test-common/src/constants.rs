//! Common test constants used across multiple test files.

/// Channel where standard commands are accepted
pub const STANDARD_CHANNEL: &str = "music";

/// Channel whose members may run admin commands
pub const ADMIN_CHANNEL: &str = "music-admin";

/// Chat user ids
pub const ALICE: &str = "U0ALICE";
pub const BOB: &str = "U0BOB";
pub const CAROL: &str = "U0CAROL";
