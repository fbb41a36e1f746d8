// Domain rules - Business logic and policies

use chrono::{Datelike, Local, NaiveDateTime};
use rand::Rng;

use crate::domain::errors::*;
use crate::domain::model::*;


/// Tags the muxer writes on its own, even with all input metadata stripped
pub const MUXER_MANAGED_TAGS: &[&str] = &[
    "encoder",
    "major_brand",
    "minor_version",
    "compatible_brands",
    "creation_time",
];

/// Timestamp layout used in the generated comment
pub const COMMENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Knobs of the metadata generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPolicy {
    pub title_stem: String,
    pub artist_stem: String,
    pub copyright_owner: String,
    /// Inclusive lower bound of the random suffix
    pub suffix_min: u32,
    /// Inclusive upper bound of the random suffix
    pub suffix_max: u32,
    /// Candidates tried per field: suffix, suffix + 1, ...
    pub max_attempts: u32,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            title_stem: "AutoTitle".to_string(),
            artist_stem: "AutoArtist".to_string(),
            copyright_owner: "AutoMetaSystem".to_string(),
            suffix_min: 1000,
            suffix_max: 9999,
            max_attempts: 2,
        }
    }
}

impl GenerationPolicy {
    /// Validate the policy before any generation happens
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("title_stem", &self.title_stem),
            ("artist_stem", &self.artist_stem),
            ("copyright_owner", &self.copyright_owner),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::BadArgs(format!("{} cannot be empty", name)));
            }
        }
        if self.suffix_min > self.suffix_max {
            return Err(DomainError::BadArgs(format!(
                "suffix_min ({}) must not exceed suffix_max ({})",
                self.suffix_min, self.suffix_max
            )));
        }
        if self.max_attempts == 0 {
            return Err(DomainError::BadArgs("max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Produces replacement metadata that differs from what the file carried
pub struct MetadataGenerator {
    policy: GenerationPolicy,
}

impl MetadataGenerator {
    pub fn new(policy: GenerationPolicy) -> Result<Self, DomainError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Draw a suffix and read the clock once, then generate
    pub fn generate(&self, old: &TagSet) -> Result<GeneratedTags, DomainError> {
        let suffix = rand::rng().random_range(self.policy.suffix_min..=self.policy.suffix_max);
        let now = Local::now().naive_local();
        self.generate_with(old, suffix, now)
    }

    /// Deterministic core of [`generate`](Self::generate)
    pub fn generate_with(
        &self,
        old: &TagSet,
        suffix: u32,
        now: NaiveDateTime,
    ) -> Result<GeneratedTags, DomainError> {
        let title = self.fresh_value(ManagedTag::Title, &self.policy.title_stem, old, suffix)?;
        let artist = self.fresh_value(ManagedTag::Artist, &self.policy.artist_stem, old, suffix)?;

        Ok(GeneratedTags {
            title,
            artist,
            comment: format!(
                "Metadata replaced automatically at {}",
                now.format(COMMENT_TIMESTAMP_FORMAT)
            ),
            // The drawn suffix, not a fallback one
            copyright: format!("© {} {}_{}", now.year(), self.policy.copyright_owner, suffix),
        })
    }

    /// First `{stem}_{n}` candidate, n counting up from `suffix`, that differs
    /// from the old value of `tag`
    fn fresh_value(
        &self,
        tag: ManagedTag,
        stem: &str,
        old: &TagSet,
        suffix: u32,
    ) -> Result<String, DomainError> {
        let old_value = old.get_or_empty(tag.key());
        for attempt in 0..self.policy.max_attempts {
            let candidate = format!("{}_{}", stem, u64::from(suffix) + u64::from(attempt));
            if candidate != old_value {
                return Ok(candidate);
            }
            tracing::debug!(key = tag.key(), %candidate, "candidate collides with old value");
        }
        Err(DomainError::GenerationExhausted {
            key: tag.key().to_string(),
            attempts: self.policy.max_attempts,
        })
    }
}

/// Compares re-probed tags with the generated ones
pub struct TagComparator;

impl TagComparator {
    /// Build a report; in strict mode muxer-managed keys count as leftovers too
    pub fn compare(expected: &GeneratedTags, actual: &TagSet, strict: bool) -> VerificationReport {
        let mut report = VerificationReport::default();

        for (key, value) in expected.entries() {
            match actual.get(key) {
                Some(found) if found == value => report.matched.push(key.to_string()),
                Some(found) => report.mismatched.push(TagMismatch {
                    key: key.to_string(),
                    expected: value.to_string(),
                    actual: found.to_string(),
                }),
                None => report.missing.push(key.to_string()),
            }
        }

        report.leftover = actual
            .keys()
            .filter(|key| !ManagedTag::ALL.iter().any(|tag| tag.key() == *key))
            .filter(|key| strict || !MUXER_MANAGED_TAGS.contains(key))
            .map(str::to_string)
            .collect();

        report
    }
}
