//! Package identifiers, semantic versions, and version requirements.
//!
//! Versions order by SemVer 2.0 precedence, with build metadata as the final
//! tie-break so that two versions compare equal only when they are identical.
//! Requirements are comma-separated comparators such as `>=1.2.0, <2.0.0`.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use buckle_util::errors::BuckleError;
use serde::{Deserialize, Serialize};

/// Unique name of a package.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A concrete package version with a total order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemanticVersion(semver::Version);

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    pub fn parse(input: &str) -> Result<Self, BuckleError> {
        semver::Version::parse(input.trim())
            .map(Self)
            .map_err(|e| BuckleError::Version {
                input: input.to_string(),
                message: e.to_string(),
            })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl From<semver::Version> for SemanticVersion {
    fn from(version: semver::Version) -> Self {
        Self(version)
    }
}

impl FromStr for SemanticVersion {
    type Err = BuckleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A predicate selecting acceptable versions of a package.
///
/// Keeps the text it was parsed from so failures can be reported verbatim.
/// Equality and hashing only consider the parsed comparators, so `>=1.0`
/// and `>= 1.0` are the same requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersionRequirement {
    original: String,
    req: semver::VersionReq,
}

impl SemanticVersionRequirement {
    pub fn parse(input: &str) -> Result<Self, BuckleError> {
        let req = semver::VersionReq::parse(input.trim()).map_err(|e| BuckleError::Requirement {
            input: input.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            original: input.trim().to_string(),
            req,
        })
    }

    /// The requirement that accepts every release version (`*`).
    pub fn any() -> Self {
        Self::from(semver::VersionReq::STAR)
    }

    /// Whether `version` satisfies this requirement.
    pub fn matches(&self, version: &SemanticVersion) -> bool {
        self.req.matches(version.as_semver())
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl From<semver::VersionReq> for SemanticVersionRequirement {
    fn from(req: semver::VersionReq) -> Self {
        Self {
            original: req.to_string(),
            req,
        }
    }
}

impl PartialEq for SemanticVersionRequirement {
    fn eq(&self, other: &Self) -> bool {
        self.req == other.req
    }
}

impl Eq for SemanticVersionRequirement {}

impl Hash for SemanticVersionRequirement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.req.hash(state);
    }
}

impl FromStr for SemanticVersionRequirement {
    type Err = BuckleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersionRequirement {
    type Error = BuckleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SemanticVersionRequirement> for String {
    fn from(req: SemanticVersionRequirement) -> Self {
        req.original
    }
}

impl fmt::Display for SemanticVersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
