//! Artifact writers for the persisted run output.
//!
//! Each run produces two files under the output directory, both named from
//! the topic slug:
//!
//! ```text
//! data_storage/
//! ├── Quantum_Computing.md    # H1 of the slug + article body
//! └── Quantum_Computing.json  # topic, research_summary, article
//! ```
//!
//! Re-running with the same topic overwrites both files in place; there is
//! no versioning.

pub mod json;
pub mod markdown;
