//! X.500-style member names identifying flow participants.

use crate::error::{HarnessError, Result};
use std::fmt;
use std::str::FromStr;

/// Name of a network member, e.g. `CN=Bob, O=R3, L=London, C=GB`.
///
/// `O`, `L` and `C` are mandatory, `CN`, `OU` and `ST` are optional. Attribute
/// order in the input does not matter; `Display` always renders the canonical
/// order so two names parsed from differently ordered strings compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberName {
    common_name: Option<String>,
    organization_unit: Option<String>,
    organization: String,
    locality: String,
    state: Option<String>,
    country: String,
}

impl MemberName {
    /// Parse a member name from its string form.
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = |reason: &str| HarnessError::InvalidMemberName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let mut common_name = None;
        let mut organization_unit = None;
        let mut organization = None;
        let mut locality = None;
        let mut state = None;
        let mut country = None;

        for part in name.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| invalid("attributes must be KEY=value pairs"))?;
            let value = value.trim();
            if value.is_empty() {
                return Err(invalid("attribute values must not be empty"));
            }

            let slot = match key.trim().to_ascii_uppercase().as_str() {
                "CN" => &mut common_name,
                "OU" => &mut organization_unit,
                "O" => &mut organization,
                "L" => &mut locality,
                "ST" => &mut state,
                "C" => &mut country,
                other => {
                    return Err(invalid(&format!("unsupported attribute '{}'", other)));
                }
            };
            if slot.replace(value.to_string()).is_some() {
                return Err(invalid("duplicate attribute"));
            }
        }

        let organization = organization.ok_or_else(|| invalid("missing O attribute"))?;
        let locality = locality.ok_or_else(|| invalid("missing L attribute"))?;
        let country = country.ok_or_else(|| invalid("missing C attribute"))?;
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid("C must be a two-letter upper-case country code"));
        }

        Ok(Self {
            common_name,
            organization_unit,
            organization,
            locality,
            state,
            country,
        })
    }

    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref()
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

impl FromStr for MemberName {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(cn) = &self.common_name {
            write!(f, "CN={}, ", cn)?;
        }
        if let Some(ou) = &self.organization_unit {
            write!(f, "OU={}, ", ou)?;
        }
        write!(f, "O={}, L={}, ", self.organization, self.locality)?;
        if let Some(st) = &self.state {
            write!(f, "ST={}, ", st)?;
        }
        write!(f, "C={}", self.country)
    }
}
