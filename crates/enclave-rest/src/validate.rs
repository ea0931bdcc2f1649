//! Parameter validation shared by endpoint methods

/// Endpoint parameters that failed validation before any request was sent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Neither or both of two mutually exclusive identifiers were given
    #[error("exactly one of {first} or {second} must be set")]
    ExactlyOneOf {
        first: &'static str,
        second: &'static str,
    },

    /// A mandatory parameter was missing or empty
    #[error("{0} is required")]
    Required(&'static str),
}

/// Which of two identifiers was supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneOf<'a> {
    First(&'a str),
    Second(&'a str),
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Require that exactly one of two identifiers is set
///
/// Empty strings count as absent.
pub fn exactly_one<'a>(
    first_name: &'static str,
    first: Option<&'a str>,
    second_name: &'static str,
    second: Option<&'a str>,
) -> Result<OneOf<'a>, ValidationError> {
    match (present(first), present(second)) {
        (Some(value), None) => Ok(OneOf::First(value)),
        (None, Some(value)) => Ok(OneOf::Second(value)),
        _ => Err(ValidationError::ExactlyOneOf {
            first: first_name,
            second: second_name,
        }),
    }
}

/// Require a non-empty value
pub fn required<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    present(value).ok_or(ValidationError::Required(name))
}
