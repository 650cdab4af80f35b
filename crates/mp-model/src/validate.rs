// validate.rs — Input bounds checking.
//
// Every tracker entry point validates caller input with these functions
// before touching the store: validation failures must never leave a
// partial write behind. Bounds are passed in by the caller so the
// tracker's configuration stays the single source of truth for limits.

use crate::error::ValidationError;
use crate::goal::Visibility;

/// Check a goal title: non-empty (after trimming) and within the bound.
///
/// Length is counted in characters, not bytes, so multi-byte titles get
/// the full budget.
pub fn validate_title(title: &str, max_chars: usize) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let actual = title.chars().count();
    if actual > max_chars {
        return Err(ValidationError::TitleTooLong {
            max: max_chars,
            actual,
        });
    }
    Ok(())
}

/// Check a milestone description: non-empty (after trimming) and within
/// the bound.
pub fn validate_description(description: &str, max_chars: usize) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    let actual = description.chars().count();
    if actual > max_chars {
        return Err(ValidationError::DescriptionTooLong {
            max: max_chars,
            actual,
        });
    }
    Ok(())
}

/// Check a visibility policy: a shared goal must name at least one
/// principal and at most `max_shared`. Public and private carry no
/// payload to validate.
pub fn validate_visibility(
    visibility: &Visibility,
    max_shared: usize,
) -> Result<(), ValidationError> {
    match visibility {
        Visibility::Public | Visibility::Private => Ok(()),
        Visibility::SharedWith { principals } => {
            if principals.is_empty() {
                return Err(ValidationError::EmptyShareSet);
            }
            if principals.len() > max_shared {
                return Err(ValidationError::ShareSetTooLarge {
                    max: max_shared,
                    actual: principals.len(),
                });
            }
            Ok(())
        }
    }
}
