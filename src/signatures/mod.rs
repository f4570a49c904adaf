// Signatures - immutable reference library of known signs
//
// The database is an ordered sequence, not a map: when two signatures score
// the same for a window, the one that appears first in the store wins, so
// document order has to survive loading.
//
// Each scored feature is an explicit Option. A key absent from the store is
// excluded from scoring for that signature (see analysis::scorer).

mod store;

pub use store::DEFAULT_SIGNATURES_PATH;

use serde::{Deserialize, Serialize};

use crate::analysis::features::HandShape;

/// Partial feature vector stored for a reference sign
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignatureFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_movement: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_shape: Option<HandShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_hands: Option<bool>,
}

impl SignatureFeatures {
    /// True when no scored key is present
    pub fn is_empty(&self) -> bool {
        self.hand_movement.is_none()
            && self.hand_height.is_none()
            && self.hand_distance.is_none()
            && self.hand_shape.is_none()
            && self.two_hands.is_none()
    }
}

/// A named reference entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureSignature {
    pub name: String,
    pub features: SignatureFeatures,
}

impl GestureSignature {
    pub fn new(name: impl Into<String>, features: SignatureFeatures) -> Self {
        Self {
            name: name.into(),
            features,
        }
    }
}

/// Ordered, read-only collection of reference signatures
///
/// Built once at startup and shared as `Arc<SignatureDatabase>`; no
/// method mutates it after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatureDatabase {
    signatures: Vec<GestureSignature>,
}

impl SignatureDatabase {
    /// Database with no signatures; every window fails the threshold
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from signatures in priority order
    ///
    /// A repeated name keeps its first position and takes the later
    /// features, matching how the JSON store resolves duplicate keys.
    pub fn from_signatures<I>(signatures: I) -> Self
    where
        I: IntoIterator<Item = GestureSignature>,
    {
        let mut ordered: Vec<GestureSignature> = Vec::new();
        for signature in signatures {
            match ordered.iter_mut().find(|s| s.name == signature.name) {
                Some(existing) => {
                    log::warn!(
                        "[SignatureStore] Duplicate signature '{}', keeping the later definition",
                        signature.name
                    );
                    existing.features = signature.features;
                }
                None => ordered.push(signature),
            }
        }
        Self { signatures: ordered }
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Signatures in store order
    pub fn iter(&self) -> std::slice::Iter<'_, GestureSignature> {
        self.signatures.iter()
    }

    pub fn get(&self, name: &str) -> Option<&GestureSignature> {
        self.signatures.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(|s| s.name.as_str())
    }
}

impl<'a> IntoIterator for &'a SignatureDatabase {
    type Item = &'a GestureSignature;
    type IntoIter = std::slice::Iter<'a, GestureSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
