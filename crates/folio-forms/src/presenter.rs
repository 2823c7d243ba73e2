//! Renders validation verdicts onto a field's error region.

use tracing::debug;

use crate::field::Field;
use crate::surface::FormSurface;
use crate::validation::ValidationResult;

/// Writes a field's verdict to the surface.
///
/// The presenter only touches the field it is given. A verdict equal to the
/// one already shown produces no surface write.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPresenter;

impl ErrorPresenter {
    /// Creates a presenter.
    pub fn new() -> Self {
        Self
    }

    /// Presents a verdict. Returns whether the displayed state changed.
    pub fn present<S: FormSurface + ?Sized>(
        &self,
        field: &mut Field,
        result: ValidationResult,
        surface: &mut S,
    ) -> bool {
        if field.validity == result {
            return false;
        }

        debug!(field = %field.name, valid = result.is_valid(), "presenting verdict");
        surface.write_error(&field.name, result.reason());
        field.validity = result;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;
    use crate::surface::MemorySurface;

    fn name_field() -> Field {
        Field::from_spec(&FieldSpec::text("name").required())
    }

    #[test]
    fn test_present_invalid_then_valid() {
        let presenter = ErrorPresenter::new();
        let mut surface = MemorySurface::new();
        let mut field = name_field();

        let changed = presenter.present(
            &mut field,
            ValidationResult::Invalid("Name is required".into()),
            &mut surface,
        );
        assert!(changed);
        assert!(field.is_invalid());
        assert_eq!(surface.error("name"), Some("Name is required"));

        assert!(presenter.present(&mut field, ValidationResult::Valid, &mut surface));
        assert!(!field.is_invalid());
        assert_eq!(surface.error("name"), None);
    }

    #[test]
    fn test_present_is_idempotent() {
        let presenter = ErrorPresenter::new();
        let mut surface = MemorySurface::new();
        let mut field = name_field();
        let invalid = ValidationResult::Invalid("Name is required".into());

        presenter.present(&mut field, invalid.clone(), &mut surface);
        let after_first = (field.clone(), surface.errors.clone());
        assert!(!presenter.present(&mut field, invalid, &mut surface));
        assert_eq!((field.clone(), surface.errors.clone()), after_first);
        assert_eq!(surface.error_writes, 1);

        presenter.present(&mut field, ValidationResult::Valid, &mut surface);
        assert!(!presenter.present(&mut field, ValidationResult::Valid, &mut surface));
        assert_eq!(surface.error_writes, 2);
        assert!(surface.errors.is_empty());
    }

    #[test]
    fn test_changed_reason_is_rewritten() {
        let presenter = ErrorPresenter::new();
        let mut surface = MemorySurface::new();
        let mut field = name_field();

        presenter.present(
            &mut field,
            ValidationResult::Invalid("Name is required".into()),
            &mut surface,
        );
        presenter.present(
            &mut field,
            ValidationResult::Invalid("Name must be at least 2 characters".into()),
            &mut surface,
        );
        assert_eq!(
            surface.error("name"),
            Some("Name must be at least 2 characters")
        );
    }

    #[test]
    fn test_present_never_touches_other_fields() {
        let presenter = ErrorPresenter::new();
        let mut surface = MemorySurface::new();
        surface.write_error("email", Some("Please enter a valid email address"));
        let mut field = name_field();

        presenter.present(
            &mut field,
            ValidationResult::Invalid("Name is required".into()),
            &mut surface,
        );
        assert_eq!(
            surface.error("email"),
            Some("Please enter a valid email address")
        );
    }
}
