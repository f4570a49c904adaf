// Signature store - JSON loading for the reference library
//
// Document layout:
//
//   {
//     "HELLO": { "features": { "hand_movement": 0.4, "hand_shape": "open" } },
//     "YES":   { "features": { "hand_shape": "fist", "two_hands": false } }
//   }
//
// The top-level object is walked with a map visitor so entries land in
// document order (serde_json's default Map would sort the keys). Extra keys
// on an entry or inside `features` are ignored.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use super::{GestureSignature, SignatureDatabase, SignatureFeatures};
use crate::error::SignatureStoreError;

/// Default location of the reference store
pub const DEFAULT_SIGNATURES_PATH: &str = "data/gestures.json";

#[derive(Deserialize)]
struct StoreEntry {
    #[serde(default)]
    features: SignatureFeatures,
}

impl<'de> Deserialize<'de> for SignatureDatabase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = SignatureDatabase;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping sign names to { \"features\": { .. } }")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut signatures = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, entry)) = map.next_entry::<String, StoreEntry>()? {
                    signatures.push(GestureSignature::new(name, entry.features));
                }
                Ok(SignatureDatabase::from_signatures(signatures))
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}

impl SignatureDatabase {
    /// Parse a store document held in memory
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, SignatureStoreError> {
        serde_json::from_str(json).map_err(|err| SignatureStoreError::Parse {
            path: origin.to_string(),
            details: err.to_string(),
        })
    }

    /// Load the store from disk
    ///
    /// # Returns
    /// * `Ok(db)` - Parsed database; a missing file yields an empty database
    /// * `Err(SignatureStoreError::Io)` - File exists but could not be read
    /// * `Err(SignatureStoreError::Parse)` - File content is malformed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SignatureStoreError> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::warn!(
                    "[SignatureStore] No store at {}, starting with an empty database",
                    origin
                );
                return Ok(Self::empty());
            }
            Err(err) => {
                return Err(SignatureStoreError::Io {
                    path: origin,
                    details: err.to_string(),
                })
            }
        };

        let db = Self::from_json_str(&contents, &origin)?;
        log::info!(
            "[SignatureStore] Loaded {} signatures from {}",
            db.len(),
            origin
        );
        Ok(db)
    }
}
