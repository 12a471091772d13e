//! File format handlers for RPG Maker data containers

pub mod marshal;
pub mod scripts;

// Re-export main types
pub use marshal::{parse_marshal_bytes, string_bytes};
pub use scripts::{
    MarshalDecoder, ScriptContent, ScriptDecoder, ScriptRecord, load_scripts, records_from_value,
};
