//! Share link tokens.
//!
//! A token is a version prefix followed by the payload JSON, deflated
//! inside a single-entry zip archive and encoded as URL-safe base64 so it
//! can sit in a URL fragment. `v2=` tokens carry a full project snapshot;
//! `v1=` tokens carry a legacy single-layout payload. A leading `#` is
//! accepted when decoding.

use std::io::{Cursor, Read, Write};

use base64::{engine::general_purpose, Engine as _};
use slabkit_core::ShareError;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::model::Project;
use crate::serialization::{import_project, Snapshot};

const ENTRY_NAME: &str = "snapshot.json";

/// Token format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareVersion {
    /// Legacy single-layout payload.
    V1,
    /// Full project snapshot.
    V2,
}

impl ShareVersion {
    pub fn prefix(&self) -> &'static str {
        match self {
            ShareVersion::V1 => "v1=",
            ShareVersion::V2 => "v2=",
        }
    }
}

/// Decoded token body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub version: ShareVersion,
    pub json: String,
}

impl SharePayload {
    /// Turns the payload into a project, migrating legacy content.
    pub fn into_project(self) -> slabkit_core::Result<Project> {
        let project = match self.version {
            ShareVersion::V2 => Snapshot::from_json(self.json).restore()?,
            ShareVersion::V1 => import_project(&self.json)?,
        };
        Ok(project)
    }
}

fn compression(err: impl std::fmt::Display) -> ShareError {
    ShareError::Compression {
        reason: err.to_string(),
    }
}

fn deflate(json: &str) -> Result<Vec<u8>, ShareError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    // fixed timestamp so equal payloads give equal tokens
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());
    zip.start_file(ENTRY_NAME, options).map_err(compression)?;
    zip.write_all(json.as_bytes()).map_err(compression)?;
    let cursor = zip.finish().map_err(compression)?;
    Ok(cursor.into_inner())
}

fn inflate(bytes: Vec<u8>) -> Result<String, ShareError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(compression)?;
    let mut entry = archive.by_index(0).map_err(compression)?;
    let mut raw = Vec::new();
    entry.read_to_end(&mut raw).map_err(compression)?;
    String::from_utf8(raw).map_err(|_| ShareError::NotUtf8)
}

/// Encodes payload JSON as a token of the given version.
pub fn encode_token_as(version: ShareVersion, json: &str) -> Result<String, ShareError> {
    let body = general_purpose::URL_SAFE_NO_PAD.encode(deflate(json)?);
    Ok(format!("{}{}", version.prefix(), body))
}

/// Encodes a full snapshot as a `v2=` token.
pub fn encode_token(json: &str) -> Result<String, ShareError> {
    encode_token_as(ShareVersion::V2, json)
}

pub fn encode_project(project: &Project) -> Result<String, ShareError> {
    let snapshot = Snapshot::capture(project).map_err(compression)?;
    encode_token(snapshot.as_str())
}

/// Decodes a token back to the exact JSON text it was built from.
pub fn decode_token(token: &str) -> Result<SharePayload, ShareError> {
    let token = token.trim();
    let token = token.strip_prefix('#').unwrap_or(token);
    let (prefix, body) = token.split_once('=').ok_or(ShareError::MissingPrefix)?;
    let version = match prefix {
        "v1" => ShareVersion::V1,
        "v2" => ShareVersion::V2,
        other if other.starts_with('v') => {
            return Err(ShareError::UnknownVersion {
                prefix: format!("{other}="),
            })
        }
        _ => return Err(ShareError::MissingPrefix),
    };
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(body.trim_end_matches('='))
        .map_err(|e| ShareError::Base64 {
            reason: e.to_string(),
        })?;
    let json = inflate(bytes)?;
    tracing::debug!(?version, len = json.len(), "share token decoded");
    Ok(SharePayload { version, json })
}
