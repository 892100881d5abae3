use crate::error::CliError;
use semver::{Prerelease, Version};
use std::fmt;

/// The five bump strategies offered for every release run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bump {
    PrereleaseAlpha,
    PrereleaseBeta,
    Patch,
    Minor,
    Major,
}

impl Bump {
    /// Fixed proposal order: prereleases first, then patch, minor, major.
    pub const ALL: [Bump; 5] = [
        Bump::PrereleaseAlpha,
        Bump::PrereleaseBeta,
        Bump::Patch,
        Bump::Minor,
        Bump::Major,
    ];
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bump::PrereleaseAlpha => "prerelease-alpha",
            Bump::PrereleaseBeta => "prerelease-beta",
            Bump::Patch => "patch",
            Bump::Minor => "minor",
            Bump::Major => "major",
        };
        write!(f, "{}", label)
    }
}

/// Parse a trimmed version string, mapping failures to [CliError::InvalidVersion].
pub fn parse_version(raw: &str) -> Result<Version, CliError> {
    Version::parse(raw).map_err(|e| CliError::InvalidVersion(raw.to_string(), e.to_string()))
}

/// Compute the next version for a bump strategy.
///
/// Follows node-semver `inc` semantics: bumping a release component of a
/// prerelease version first "closes" the prerelease instead of skipping ahead,
/// and a prerelease bump either increments the trailing counter or starts a
/// fresh `<suffix>.0` series on the next patch version.
pub fn next_version(current: &Version, bump: Bump) -> Version {
    let mut next = current.clone();
    next.build = semver::BuildMetadata::EMPTY;

    match bump {
        Bump::Major => {
            if !next.pre.is_empty() && next.minor == 0 && next.patch == 0 {
                next.pre = Prerelease::EMPTY;
            } else {
                next.major += 1;
                next.minor = 0;
                next.patch = 0;
                next.pre = Prerelease::EMPTY;
            }
        }
        Bump::Minor => {
            if !next.pre.is_empty() && next.patch == 0 {
                next.pre = Prerelease::EMPTY;
            } else {
                next.minor += 1;
                next.patch = 0;
                next.pre = Prerelease::EMPTY;
            }
        }
        Bump::Patch => {
            if !next.pre.is_empty() {
                next.pre = Prerelease::EMPTY;
            } else {
                next.patch += 1;
            }
        }
        Bump::PrereleaseAlpha => apply_prerelease(&mut next, "alpha"),
        Bump::PrereleaseBeta => apply_prerelease(&mut next, "beta"),
    }

    next
}

fn apply_prerelease(version: &mut Version, suffix: &str) {
    let next_pre = match split_prerelease(version.pre.as_str(), suffix) {
        Some(counter) => format!("{}.{}", suffix, counter + 1),
        None => {
            if version.pre.is_empty() {
                version.patch += 1;
            }
            format!("{}.0", suffix)
        }
    };
    // The string is always "<suffix>.<digits>", a valid prerelease
    version.pre = Prerelease::new(&next_pre).unwrap();
}

/// Extract the counter from a `<suffix>.<n>` prerelease, if it matches.
fn split_prerelease(pre: &str, suffix: &str) -> Option<u64> {
    let rest = pre.strip_prefix(suffix)?.strip_prefix('.')?;
    rest.parse::<u64>().ok()
}

/// All five proposed next versions for `current`, in [Bump::ALL] order.
pub fn candidates(current: &Version) -> Vec<(Bump, Version)> {
    Bump::ALL
        .iter()
        .map(|&bump| (bump, next_version(current, bump)))
        .collect()
}
