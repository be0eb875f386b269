// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stateless, pure translations between bytes and their string representations.
//!
//! Every function here is total over its legal input domain and rejects
//! malformed input, or a malformed base64 variant, with a
//! [`ByteEncodingError`](crate::errors::ByteEncodingError) instead of
//! coercing it.

mod base64;
mod byte_encoder;

pub use self::base64::{base64_string_from_bytes, bytes_from_base64_string, Base64Variant};
pub use byte_encoder::{
    binary_string_from_bytes, bytes_from_binary_string, bytes_from_hex_string, chunk,
    hex_string_from_bytes,
};
