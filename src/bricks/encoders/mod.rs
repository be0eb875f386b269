// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod a1z26;
pub mod base64;
pub mod caesar_cipher;
pub mod case_transform;
pub mod reverse;
pub mod rot13;
pub mod unicode_code_points;

pub use a1z26::A1Z26Encoder;
pub use self::base64::Base64Encoder;
pub use caesar_cipher::CaesarCipherEncoder;
pub use case_transform::CaseTransformEncoder;
pub use reverse::ReverseEncoder;
pub use rot13::Rot13Encoder;
pub use unicode_code_points::UnicodeCodePointsEncoder;
