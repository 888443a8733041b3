use std::{fmt::Display, str::FromStr};

use crate::{MashovError, error};

pub mod attendance;
pub mod grade;
pub mod group;

/// The per-student data categories the portal serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Grades,
    Groups,
    Behavior,
}

impl Resource {
    /// Path segment under `/students/{userId}/`.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Grades => "grades",
            Resource::Groups => "groups",
            Resource::Behavior => "behave",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Grades => "grades",
            Resource::Groups => "groups",
            Resource::Behavior => "behavior",
        };
        f.write_str(name)
    }
}

impl FromStr for Resource {
    type Err = MashovError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grades" => Ok(Resource::Grades),
            "groups" => Ok(Resource::Groups),
            "behavior" | "behave" => Ok(Resource::Behavior),
            _ => Err(error!("unknown resource name")),
        }
    }
}

#[cfg(feature = "chrono")]
pub(crate) fn parse_portal_date(value: &str) -> Option<chrono::NaiveDateTime> {
    chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}
