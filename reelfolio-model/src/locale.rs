use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Site languages. Spanish is the default and the fallback for content that
/// has no translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Resolve a route parameter, falling back to the default locale for
    /// anything unknown.
    pub fn from_param(param: Option<&str>) -> Locale {
        param
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_default(&self) -> bool {
        *self == Locale::default()
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(ModelError::InvalidLocale(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_params_fall_back_to_spanish() {
        assert_eq!(Locale::from_param(Some("en")), Locale::En);
        assert_eq!(Locale::from_param(Some("EN")), Locale::En);
        assert_eq!(Locale::from_param(Some("fr")), Locale::Es);
        assert_eq!(Locale::from_param(None), Locale::Es);
    }

    #[test]
    fn rejects_unknown_locale() {
        assert!("pt".parse::<Locale>().is_err());
    }
}
