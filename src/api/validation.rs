use super::ApiError;

pub const MAX_TITLE_LEN: usize = 60;
pub const MAX_YEAR_LEN: usize = 4;
pub const MAX_NAME_LEN: usize = 20;

/// Shown for every rejected form, matching the single message the pages expect.
pub const INVALID_INPUT: &str = "Invalid input.";

fn within(value: &str, max: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max
}

/// Title must be 1..=60 characters and year 1..=4 characters.
/// The year is not checked for being numeric.
pub fn validate_movie(title: &str, year: &str) -> Result<(), &'static str> {
    if within(title, MAX_TITLE_LEN) && within(year, MAX_YEAR_LEN) {
        Ok(())
    } else {
        Err(INVALID_INPUT)
    }
}

pub fn validate_display_name(name: &str) -> Result<(), &'static str> {
    if within(name, MAX_NAME_LEN) {
        Ok(())
    } else {
        Err(INVALID_INPUT)
    }
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), &'static str> {
    if username.is_empty() || password.is_empty() {
        return Err(INVALID_INPUT);
    }
    Ok(())
}

/// Path ids must be positive integers; anything else addresses no movie.
pub fn parse_movie_id(raw: &str) -> Result<i32, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::not_found("Movie", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_movie() {
        assert!(validate_movie("Leon", "1994").is_ok());
        assert!(validate_movie(&"a".repeat(60), "1").is_ok());
        assert!(validate_movie("", "1994").is_err());
        assert!(validate_movie("Leon", "").is_err());
        assert!(validate_movie(&"a".repeat(61), "1994").is_err());
        assert!(validate_movie("Leon", "19945").is_err());
        // Not numerically checked
        assert!(validate_movie("Leon", "abcd").is_ok());
    }

    #[test]
    fn test_lengths_count_characters() {
        assert!(validate_movie(&"é".repeat(60), "1994").is_ok());
        assert!(validate_display_name(&"名".repeat(20)).is_ok());
        assert!(validate_display_name(&"名".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("Jimmy Ma").is_ok());
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name(&"a".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("admin", "secret").is_ok());
        assert!(validate_credentials("", "secret").is_err());
        assert!(validate_credentials("admin", "").is_err());
    }

    #[test]
    fn test_parse_movie_id() {
        assert_eq!(parse_movie_id("12").unwrap(), 12);
        assert!(parse_movie_id("0").is_err());
        assert!(parse_movie_id("-1").is_err());
        assert!(parse_movie_id("abc").is_err());
        assert!(parse_movie_id("99999999999").is_err());
    }
}
