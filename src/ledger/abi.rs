//! ABI Document Normalization
//!
//! Contract ABI documents arrive in a small closed set of shapes
//! depending on how they were exported: a raw entry array, an object
//! wrapping the array under `abi` (compiler artifact), or a module
//! wrapper under `default` (bundler re-export). They are validated once
//! at the boundary into a single canonical entry list; nothing
//! downstream ever sniffs shapes.

use serde::{Serialize, Deserialize};
use serde_json::Value;
use thiserror::Error;

/// One parameter of an ABI function or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    /// Parameter name.
    #[serde(default)]
    pub name: String,
    /// Solidity type string.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// One entry of a contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEntry {
    /// Entry kind: `function`, `event`, `constructor`, ...
    #[serde(rename = "type")]
    pub kind: String,
    /// Entry name; constructors and fallbacks have none.
    #[serde(default)]
    pub name: Option<String>,
    /// Declared inputs.
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
}

/// The closed set of accepted ABI document shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AbiDocument {
    /// A raw entry array.
    Entries(Vec<AbiEntry>),
    /// A compiler artifact wrapping the array under `abi`.
    Wrapped {
        /// The wrapped entry array.
        abi: Vec<AbiEntry>,
    },
    /// A module wrapper under `default` (itself any accepted shape).
    Module {
        /// The wrapped document.
        default: Box<AbiDocument>,
    },
}

impl AbiDocument {
    /// Collapse the document into its canonical entry list.
    pub fn into_entries(self) -> Vec<AbiEntry> {
        match self {
            AbiDocument::Entries(entries) => entries,
            AbiDocument::Wrapped { abi } => abi,
            AbiDocument::Module { default } => default.into_entries(),
        }
    }
}

/// ABI boundary failures.
#[derive(Debug, Error)]
pub enum AbiError {
    /// The document matched none of the accepted shapes.
    #[error("unrecognized ABI document shape: {0}")]
    Shape(#[from] serde_json::Error),

    /// A required entry is missing from the ABI.
    #[error("ABI has no {kind} named {name:?}")]
    Missing {
        /// Entry kind looked for.
        kind: String,
        /// Entry name looked for.
        name: String,
    },
}

/// Normalize an ABI document into its canonical entry list.
pub fn normalize_abi(doc: &Value) -> Result<Vec<AbiEntry>, AbiError> {
    let doc: AbiDocument = serde_json::from_value(doc.clone())?;
    Ok(doc.into_entries())
}

/// The anchoring contract surface the client needs: the registration
/// function and the event it emits. Resolved once from a normalized
/// ABI, then used by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInterface {
    /// Name of the function that records a commitment.
    pub register_fn: String,
    /// Name of the event carrying the published record.
    pub record_event: String,
}

impl ContractInterface {
    /// Default names used by the anchoring contract.
    pub const REGISTER_FN: &'static str = "registerProof";
    /// Default event name.
    pub const RECORD_EVENT: &'static str = "ProofRegistered";

    /// Resolve the interface from an ABI document, verifying that both
    /// required entries exist.
    pub fn from_document(doc: &Value) -> Result<ContractInterface, AbiError> {
        let entries = normalize_abi(doc)?;
        let require = |kind: &str, name: &str| -> Result<(), AbiError> {
            let found = entries
                .iter()
                .any(|e| e.kind == kind && e.name.as_deref() == Some(name));
            if found {
                Ok(())
            } else {
                Err(AbiError::Missing {
                    kind: kind.to_string(),
                    name: name.to_string(),
                })
            }
        };
        require("function", Self::REGISTER_FN)?;
        require("event", Self::RECORD_EVENT)?;
        Ok(ContractInterface {
            register_fn: Self::REGISTER_FN.to_string(),
            record_event: Self::RECORD_EVENT.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries_json() -> Value {
        json!([
            {
                "type": "function",
                "name": "registerProof",
                "inputs": [
                    { "name": "proof", "type": "bytes32" },
                    { "name": "cid", "type": "string" }
                ]
            },
            {
                "type": "event",
                "name": "ProofRegistered",
                "inputs": [
                    { "name": "owner", "type": "address" },
                    { "name": "proof", "type": "bytes32" },
                    { "name": "cid", "type": "string" },
                    { "name": "timestamp", "type": "uint256" },
                    { "name": "meta", "type": "bytes32" }
                ]
            },
            { "type": "constructor", "inputs": [] }
        ])
    }

    #[test]
    fn test_raw_array_shape() {
        let entries = normalize_abi(&entries_json()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name.as_deref(), Some("registerProof"));
    }

    #[test]
    fn test_wrapped_shape() {
        let doc = json!({ "abi": entries_json() });
        let entries = normalize_abi(&doc).unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_module_wrapper_shape() {
        let doc = json!({ "default": { "abi": entries_json() } });
        let entries = normalize_abi(&doc).unwrap();
        assert_eq!(entries.len(), 3);

        // A module wrapping the raw array is also accepted.
        let doc = json!({ "default": entries_json() });
        assert_eq!(normalize_abi(&doc).unwrap().len(), 3);
    }

    #[test]
    fn test_unrecognized_shape_rejected() {
        let doc = json!({ "something": "else" });
        assert!(matches!(normalize_abi(&doc), Err(AbiError::Shape(_))));
    }

    #[test]
    fn test_interface_resolution() {
        let iface = ContractInterface::from_document(&entries_json()).unwrap();
        assert_eq!(iface.register_fn, "registerProof");
        assert_eq!(iface.record_event, "ProofRegistered");
    }

    #[test]
    fn test_interface_missing_entry() {
        let doc = json!([
            { "type": "function", "name": "somethingElse", "inputs": [] }
        ]);
        assert!(matches!(
            ContractInterface::from_document(&doc),
            Err(AbiError::Missing { .. })
        ));
    }
}
