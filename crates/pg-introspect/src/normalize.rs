//! Type normalization: raw catalog type names to [`ColumnType`].
//!
//! `information_schema.columns.data_type` reports `ARRAY` and `USER-DEFINED`
//! as sentinels, with the real name in `udt_name`. Some tools also spell a
//! length into the type name (`varchar[32]`), which is lifted out here so no
//! consumer has to parse brackets.

use std::num::ParseIntError;

use thiserror::Error;

use crate::core::ColumnType;

/// `data_type` sentinel for array columns.
pub const ARRAY_SENTINEL: &str = "ARRAY";

/// `data_type` sentinel for user-defined types.
pub const USER_DEFINED_SENTINEL: &str = "USER-DEFINED";

/// Why a bracketed length could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeParseError {
    /// Brackets present, but the last `]` does not end the name.
    #[error("unknown bracket format in type name {0:?}")]
    UnknownBracketFormat(String),

    /// Bracket contents are not an unsigned integer.
    #[error("invalid length in type name {type_name:?}: {source}")]
    InvalidLength {
        type_name: String,
        source: ParseIntError,
    },
}

/// Result of [`normalize_type`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub column_type: ColumnType,
    /// Set when a length was present but unreadable; the type name then is
    /// the unmodified working string.
    pub warning: Option<TypeParseError>,
}

/// Normalize a column's reported type.
pub fn normalize_type(data_type: &str, udt_name: &str) -> Normalized {
    let mut column_type = ColumnType::default();

    let working = match data_type {
        ARRAY_SENTINEL => {
            column_type.is_array = true;
            // element type names are the udt name minus a leading underscore
            strip_first_char(udt_name)
        }
        USER_DEFINED_SENTINEL => {
            column_type.is_user_defined = true;
            udt_name
        }
        other => other,
    };

    let mut warning = None;
    column_type.name = match calculate_length(working) {
        Ok(Some((length, base))) if length > 0 => {
            column_type.length = Some(length);
            base.to_string()
        }
        Ok(_) => working.to_string(),
        Err(e) => {
            warning = Some(e);
            working.to_string()
        }
    };

    Normalized {
        column_type,
        warning,
    }
}

/// Split a `name[n]` type into its length and the name without brackets.
///
/// Returns `Ok(None)` when there is no `[` at all. Whether the length is a
/// maximum (`varchar[32]`) or exact (`char[32]`) is intrinsic to the type
/// name and left to the caller.
pub fn calculate_length(typ: &str) -> Result<Option<(u32, &str)>, TypeParseError> {
    let Some(idx) = typ.find('[') else {
        return Ok(None);
    };

    match typ.rfind(']') {
        Some(end) if end == typ.len() - 1 => {
            let length = typ[idx + 1..end].parse::<u32>().map_err(|source| {
                TypeParseError::InvalidLength {
                    type_name: typ.to_string(),
                    source,
                }
            })?;
            Ok(Some((length, &typ[..idx])))
        }
        _ => Err(TypeParseError::UnknownBracketFormat(typ.to_string())),
    }
}

fn strip_first_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}
