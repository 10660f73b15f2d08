use std::path::PathBuf;

use url::Url;

use crate::validation::{ValidationErrorCategory, ValidationIssue, ValidationIssues};

use super::AppConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// The config file path
    ///
    pub(crate) config_file_path: Option<PathBuf>,

    /// List of validation issues found
    ///
    pub(crate) issues: ValidationIssues,
}

impl ValidationResult {
    #[must_use]
    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    #[must_use]
    pub fn issues(&self) -> &ValidationIssues {
        &self.issues
    }

    #[must_use]
    pub fn with_config_file_path(mut self, path: PathBuf) -> Self {
        self.config_file_path = Some(path);
        self
    }
}

impl AppConfig {
    /// Full validation for the `AppConfig`
    ///
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut issues = Vec::new();

        issues.extend(validate_channels(
            &self.standard_channel,
            &self.admin_channel,
        ));
        issues.extend(validate_required(
            "spotify.client_id",
            &self.spotify.client_id,
        ));
        issues.extend(validate_required(
            "spotify.client_secret",
            &self.spotify.client_secret,
        ));
        issues.extend(validate_region(&self.spotify.region));
        issues.extend(validate_sonos_address(&self.sonos.address));

        ValidationResult {
            config_file_path: None,
            issues: issues.into(),
        }
    }
}

fn validate_required(field: &str, value: &str) -> Option<ValidationIssue> {
    value.trim().is_empty().then(|| {
        ValidationIssue::error(
            ValidationErrorCategory::RequiredField,
            field,
            &format!("The `{field}` field exists, but has no value"),
            Some(&format!("Set a value for `{field}`")),
        )
    })
}

fn validate_channels(standard: &str, admin: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    issues.extend(validate_required("standard_channel", standard));
    issues.extend(validate_required("admin_channel", admin));

    if !standard.is_empty() && standard == admin {
        issues.push(ValidationIssue::error(
            ValidationErrorCategory::Conflict,
            "admin_channel",
            "The admin channel is the same as the standard channel, so everyone is an admin",
            Some("Use a separate channel for admins. Ex. `admin_channel: music-admin`"),
        ));
    }

    issues
}

fn validate_region(region: &str) -> Option<ValidationIssue> {
    let looks_like_country = region.len() == 2 && region.chars().all(|c| c.is_ascii_uppercase());

    (!looks_like_country).then(|| {
        ValidationIssue::warning(
            ValidationErrorCategory::InvalidValue,
            "spotify.region",
            "The region does not look like an ISO 3166-1 alpha-2 country code",
            Some("Use a two letter country code. Ex. `region: US`"),
        )
    })
}

fn validate_sonos_address(address: &str) -> Option<ValidationIssue> {
    if let Some(issue) = validate_required("sonos.address", address) {
        return Some(issue);
    }

    let well_formed = Url::parse(&format!("http://{address}"))
        .ok()
        .is_some_and(|url| url.path() == "/" && url.host_str().is_some_and(|h| !h.is_empty()));

    (!well_formed).then(|| {
        ValidationIssue::error(
            ValidationErrorCategory::AddressFormat,
            "sonos.address",
            "The `sonos.address` field is not a host or host:port",
            Some("Set the speaker's address. Ex. `address: 192.168.1.20` or `address: 192.168.1.20:1400`"),
        )
    })
}
