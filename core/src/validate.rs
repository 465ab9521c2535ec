//! Structural checks applied to a parameter before it enters the registry.
//!
//! Catches specs that could never be typed on a command line (missing or
//! malformed spellings) and arity bounds that are inverted or break the fixed
//! arity of leading and directive parameters.

use crate::{ParameterSpec, RegistrationError, UNBOUNDED};

/// Validates a spec about to be registered.
///
/// Returns the first problem found. Duplicate spellings are detected by the
/// registry itself, since they depend on what was registered before.
pub(crate) fn validate_spec(spec: &ParameterSpec) -> Result<(), RegistrationError> {
    if spec.long().is_none() && spec.short().is_none() {
        return Err(RegistrationError::MissingName);
    }

    if let Some(long) = spec.long() {
        validate_long(long)?;
    }
    if let Some(short) = spec.short() {
        validate_short(short)?;
    }

    if spec.is_leading() && spec.short().is_none() {
        return Err(RegistrationError::InvalidName {
            name: spec.display_name(),
            reason: "a leading parameter needs a short name",
        });
    }

    let fixed = if spec.is_leading() {
        Some((1, 1))
    } else if spec.is_directive() {
        Some((0, UNBOUNDED))
    } else {
        None
    };
    let arity = (spec.min_arity(), spec.max_arity());
    if spec.min_arity() > spec.max_arity() || fixed.is_some_and(|fixed| fixed != arity) {
        return Err(RegistrationError::InvalidArity {
            name: spec.display_name(),
            min: spec.min_arity(),
            max: spec.max_arity(),
        });
    }

    Ok(())
}

fn validate_long(long: &str) -> Result<(), RegistrationError> {
    let invalid = |reason: &'static str| RegistrationError::InvalidName {
        name: format!("--{long}"),
        reason,
    };

    if long.is_empty() {
        return Err(invalid("long name cannot be empty"));
    }
    if long.starts_with('-') {
        return Err(invalid("long name must not start with '-'"));
    }
    if long.contains('=') {
        return Err(invalid("long name must not contain '='"));
    }
    if long.chars().any(char::is_whitespace) {
        return Err(invalid("long name must not contain whitespace"));
    }
    Ok(())
}

fn validate_short(short: char) -> Result<(), RegistrationError> {
    if short == '-' || short == '=' || short.is_whitespace() {
        return Err(RegistrationError::InvalidName {
            name: format!("-{short}"),
            reason: "short name must be a printable character other than '-' or '='",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::Param;

    use super::*;

    #[test]
    fn test_accepts_valid_spec() {
        let param = Param::new(Some("files"), Some('f')).arity(1, 2);
        assert_eq!(validate_spec(param.spec()), Ok(()));
    }

    #[test]
    fn test_rejects_missing_name() {
        let param = Param::new(None, None);
        assert_eq!(
            validate_spec(param.spec()),
            Err(RegistrationError::MissingName)
        );
    }

    #[test]
    fn test_rejects_dashed_long_name() {
        let param = Param::long("--files");
        assert!(matches!(
            validate_spec(param.spec()),
            Err(RegistrationError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_rejects_equals_in_long_name() {
        let param = Param::long("key=value");
        assert!(matches!(
            validate_spec(param.spec()),
            Err(RegistrationError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_rejects_dash_short_name() {
        let param = Param::short('-');
        assert_eq!(
            validate_spec(param.spec()),
            Err(RegistrationError::InvalidName {
                name: "--".to_string(),
                reason: "short name must be a printable character other than '-' or '='",
            })
        );
    }

    #[test]
    fn test_rejects_inverted_arity() {
        let param = Param::long("files").arity(3, 1);
        assert_eq!(
            validate_spec(param.spec()),
            Err(RegistrationError::InvalidArity {
                name: "--files".to_string(),
                min: 3,
                max: 1,
            })
        );
    }

    #[test]
    fn test_accepts_unbounded_arity() {
        let param = Param::long("save").arity(0, UNBOUNDED);
        assert_eq!(validate_spec(param.spec()), Ok(()));
    }

    #[test]
    fn test_rejects_leading_without_short() {
        let param = Param::long("define").leading();
        assert!(matches!(
            validate_spec(param.spec()),
            Err(RegistrationError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_rejects_leading_with_changed_arity() {
        let param = Param::short('D').leading().arity(0, 0);
        assert_eq!(
            validate_spec(param.spec()),
            Err(RegistrationError::InvalidArity {
                name: "-D".to_string(),
                min: 0,
                max: 0,
            })
        );
    }

    #[test]
    fn test_rejects_directive_with_changed_arity() {
        let param = Param::long("exec").directive().arity(0, 0);
        assert!(matches!(
            validate_spec(param.spec()),
            Err(RegistrationError::InvalidArity { min: 0, max: 0, .. })
        ));

        let param = Param::long("exec").directive().arity(1, UNBOUNDED);
        assert!(matches!(
            validate_spec(param.spec()),
            Err(RegistrationError::InvalidArity { .. })
        ));
    }

    #[test]
    fn test_accepts_builder_defaults_for_fixed_kinds() {
        assert_eq!(validate_spec(Param::short('D').leading().spec()), Ok(()));
        assert_eq!(validate_spec(Param::long("exec").directive().spec()), Ok(()));
    }
}
