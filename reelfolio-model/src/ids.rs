use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize)
        )]
        pub struct $name(pub Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a project row.
    ProjectId
);

uuid_id!(
    /// Identifier of a portfolio gallery.
    GalleryId
);

uuid_id!(
    /// Identifier of a portfolio photo row.
    PhotoId
);

impl GalleryId {
    /// Gallery that owns photos found under the legacy `portfolio/` folder.
    pub const DEFAULT: GalleryId = GalleryId(Uuid::from_u128(1));

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gallery_id_matches_seeded_row() {
        assert_eq!(
            GalleryId::DEFAULT.to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
        assert!(GalleryId::DEFAULT.is_default());
        assert!(!GalleryId::new().is_default());
    }

    #[test]
    fn parses_trimmed_uuid() {
        let id: PhotoId = " 00000000-0000-0000-0000-000000000007 "
            .parse()
            .expect("valid uuid");
        assert_eq!(id.to_uuid(), Uuid::from_u128(7));
    }
}
