use std::fmt;

/// Application runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Test,
    Prod,
}

impl Environment {
    /// Local runs are allowed conveniences (canned plan responses when no
    /// API key is configured) that other environments refuse.
    pub fn is_local(&self) -> bool {
        matches!(self, Environment::Local)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "Local",
            Environment::Test => "Test",
            Environment::Prod => "Prod",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Prod),
            other => Err(format!(
                "Invalid environment: {}. Expected: local, test, or prod",
                other
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_known_names_when_parsing_then_environment_resolves() {
        assert_eq!(Environment::try_from("local".to_string()), Ok(Environment::Local));
        assert_eq!(Environment::try_from("Test".to_string()), Ok(Environment::Test));
        assert_eq!(Environment::try_from("production".to_string()), Ok(Environment::Prod));
        assert!(Environment::try_from("staging".to_string()).is_err());
    }

    #[test]
    fn given_environment_when_checking_locality_then_only_local_qualifies() {
        assert!(Environment::Local.is_local());
        assert!(!Environment::Test.is_local());
        assert!(!Environment::Prod.is_local());
    }
}
