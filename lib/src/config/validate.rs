use super::ValueValidator;

#[derive(Clone, Debug)]
pub struct NonEmptyValidator { }

impl ValueValidator<String> for self::NonEmptyValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        if value.is_empty() {
            Err("value must not be empty".to_owned())
        } else {
            Ok(())
        }
    }
}

pub const NON_EMPTY: &NonEmptyValidator = &NonEmptyValidator {};

/// Accepts names that are safe to use unquoted in DDL: ASCII letters, digits
/// and `_`, not starting with a digit.
#[derive(Clone, Debug)]
pub struct SqlIdentifierValidator { }

impl ValueValidator<String> for self::SqlIdentifierValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        let valid_start = value.chars().next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = value.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid_start && valid_rest && value.len() <= 63 {
            Ok(())
        } else {
            Err(format!("not a plain SQL identifier: {value}"))
        }
    }
}

pub const SQL_IDENTIFIER: &SqlIdentifierValidator = &SqlIdentifierValidator {};

/// PINs are stored in a `VARCHAR(10)` column.
#[derive(Clone, Debug)]
pub struct PinValidator { }

impl ValueValidator<String> for self::PinValidator {
    fn validate(&self, pin: &String) -> Result<(), String> {
        if pin.is_empty() || pin.len() > 10 {
            Err(format!("PIN must be 1 to 10 digits long: {pin}"))
        } else if !pin.chars().all(|c| c.is_ascii_digit()) {
            Err(format!("PIN must contain only digits: {pin}"))
        } else {
            Ok(())
        }
    }
}

pub const PIN: &PinValidator = &PinValidator {};

#[cfg(test)]
mod tests {
    use super::super::ValueValidator;
    use super::{NON_EMPTY, PIN, SQL_IDENTIFIER};

    #[test]
    fn identifiers() {
        assert!(SQL_IDENTIFIER.validate(&"kobo".to_owned()).is_ok());
        assert!(SQL_IDENTIFIER.validate(&"_kobo_2".to_owned()).is_ok());
        assert!(SQL_IDENTIFIER.validate(&"2kobo".to_owned()).is_err());
        assert!(SQL_IDENTIFIER.validate(&"kobo\"; --".to_owned()).is_err());
        assert!(SQL_IDENTIFIER.validate(&"".to_owned()).is_err());
    }

    #[test]
    fn pins() {
        assert!(PIN.validate(&"1234".to_owned()).is_ok());
        assert!(PIN.validate(&"12345678901".to_owned()).is_err());
        assert!(PIN.validate(&"12a4".to_owned()).is_err());
        assert!(PIN.validate(&"".to_owned()).is_err());
    }

    #[test]
    fn non_empty() {
        assert!(NON_EMPTY.validate(&"x".to_owned()).is_ok());
        assert!(NON_EMPTY.validate(&"".to_owned()).is_err());
    }
}
