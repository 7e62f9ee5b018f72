// src/types/site.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Job boards the scout knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    WorkUa,
    RobotaUa,
}

impl Site {
    pub const ALL: [Site; 2] = [Site::WorkUa, Site::RobotaUa];

    pub fn domain(&self) -> &'static str {
        match self {
            Site::WorkUa => "work.ua",
            Site::RobotaUa => "robota.ua",
        }
    }

    /// Number shown in the site selection menu.
    pub fn menu_number(&self) -> u8 {
        match self {
            Site::WorkUa => 1,
            Site::RobotaUa => 2,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

impl FromStr for Site {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "work.ua" | "workua" | "work_ua" => Ok(Site::WorkUa),
            "2" | "robota.ua" | "robotaua" | "robota_ua" => Ok(Site::RobotaUa),
            other => Err(ConfigurationError::UnknownSite(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site_choice() {
        assert_eq!("1".parse::<Site>(), Ok(Site::WorkUa));
        assert_eq!(" Work.ua ".parse::<Site>(), Ok(Site::WorkUa));
        assert_eq!("2".parse::<Site>(), Ok(Site::RobotaUa));
        assert_eq!("robotaua".parse::<Site>(), Ok(Site::RobotaUa));
        assert_eq!(
            "3".parse::<Site>(),
            Err(ConfigurationError::UnknownSite("3".to_string()))
        );
    }
}
