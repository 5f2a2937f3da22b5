//! The portable "password" codec.
//!
//! A password is the full save state as a copy-pasteable string: JSON,
//! deflated (zlib), then base64. Decoding strips all whitespace first so
//! a password mangled by line-wrapping still loads.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::save::store::{SaveData, SaveError};

/// The encode/decode port for portable save blobs.
pub trait PasswordCodec {
    fn encode(&self, data: &SaveData) -> Result<String, SaveError>;
    fn decode(&self, password: &str) -> Result<SaveData, SaveError>;
}

/// JSON → zlib → base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeflatePasswordCodec;

impl PasswordCodec for DeflatePasswordCodec {
    fn encode(&self, data: &SaveData) -> Result<String, SaveError> {
        let json = serde_json::to_vec(data).map_err(|e| SaveError::Serialize(e.to_string()))?;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;
        Ok(BASE64.encode(compressed))
    }

    fn decode(&self, password: &str) -> Result<SaveData, SaveError> {
        let cleaned: String = password.chars().filter(|c| !c.is_whitespace()).collect();
        let compressed = BASE64
            .decode(cleaned.as_bytes())
            .map_err(|e| SaveError::Corrupt(format!("not valid base64: {}", e)))?;

        let mut json = Vec::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut json)
            .map_err(|e| SaveError::Corrupt(format!("decompression failed: {}", e)))?;

        serde_json::from_slice(&json).map_err(|e| SaveError::Corrupt(e.to_string()))
    }
}
