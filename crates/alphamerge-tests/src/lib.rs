//! Integration tests for alphamerge crates.
//!
//! End-to-end checks of `compose`: real files in, a real PNG out, decoded
//! again with the same readers a user's viewer would rely on.
