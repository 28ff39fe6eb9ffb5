//! Ordering rules for field values.
//!
//! Null sorts after every concrete value in both directions, so missing
//! data stays at the bottom of the table whichever way a column is
//! toggled. Direction only flips the order of non-null pairs.

use crate::data::records::FieldValue;
use std::cmp::Ordering;

/// Compare two field values for sorting.
///
/// `ascending` selects the direction applied to non-null pairs.
/// `fold_case` lowercases text before comparing.
pub fn compare_values(
    a: &FieldValue,
    b: &FieldValue,
    ascending: bool,
    fold_case: bool,
) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_non_null(a, b, fold_case);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        }
    }
}

/// Compare two optional cell slots. A missing slot (row shorter than the
/// schema, or an unknown sort field) ranks with `Null`.
pub fn compare_slots(
    a: Option<&FieldValue>,
    b: Option<&FieldValue>,
    ascending: bool,
    fold_case: bool,
) -> Ordering {
    static NULL: FieldValue = FieldValue::Null;
    compare_values(
        a.unwrap_or(&NULL),
        b.unwrap_or(&NULL),
        ascending,
        fold_case,
    )
}

fn compare_non_null(a: &FieldValue, b: &FieldValue, fold_case: bool) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => {
            if fold_case {
                x.to_lowercase().cmp(&y.to_lowercase())
            } else {
                x.cmp(y)
            }
        }
        (FieldValue::Integer(x), FieldValue::Integer(y)) => x.cmp(y),
        (FieldValue::Float(x), FieldValue::Float(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        // Mixed numeric kinds compare on the number line.
        (FieldValue::Integer(x), FieldValue::Float(y)) => {
            (*x as f64).partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Float(x), FieldValue::Integer(y)) => {
            x.partial_cmp(&(*y as f64)).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Boolean(x), FieldValue::Boolean(y)) => x.cmp(y),
        // Mismatched kinds fall back to their display strings.
        _ => {
            let sa = a.to_string();
            let sb = b.to_string();
            if fold_case {
                sa.to_lowercase().cmp(&sb.to_lowercase())
            } else {
                sa.cmp(&sb)
            }
        }
    }
}
