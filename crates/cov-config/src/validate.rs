use std::collections::HashSet;

use crate::catalogs::{REQUIRED, USER_ROLES};
use crate::covgen::CovgenConfig;
use crate::reports::WeightNormalization;

/// Internal validation, called automatically during `CovgenConfig::from_str` / `load`.
pub(crate) fn validate(config: &CovgenConfig) -> anyhow::Result<()> {
    let g = &config.generation;

    // index names follow the document store's rules
    if g.index.is_empty() || !g.index.chars().all(is_index_char) {
        anyhow::bail!(
            "generation.index must be non-empty lowercase [a-z0-9_-.], got {:?}",
            g.index,
        );
    }

    if g.days == 0 {
        anyhow::bail!("generation.days must be > 0");
    }
    if g.batch_size == 0 {
        anyhow::bail!("generation.batch_size must be > 0");
    }
    if g.max_reports == 0 {
        anyhow::bail!("generation.max_reports must be >= 1");
    }

    match g.volume()? {
        crate::Volume::DailyBaseline(v) | crate::Volume::Annual(v) => {
            if !v.is_finite() || v < 0.0 {
                anyhow::bail!("generation: volume must be finite and >= 0, got {v}");
            }
        }
    }
    if !g.jitter.is_finite() || g.jitter < 0.0 {
        anyhow::bail!("generation.jitter must be finite and >= 0, got {}", g.jitter);
    }
    check_rate("generation.substitution_rate", g.substitution_rate)?;
    check_rate("generation.intranet_ratio", g.intranet_ratio)?;
    g.business_hours()?;

    // users
    if config.users.count == 0 {
        anyhow::bail!("users.count must be > 0");
    }
    if config.users.max_roles == 0 {
        anyhow::bail!("users.max_roles must be >= 1");
    }
    if let Some(admin) = &config.users.admin {
        if !(admin.url.starts_with("http://") || admin.url.starts_with("https://")) {
            anyhow::bail!("users.admin.url must start with http:// or https://, got {:?}", admin.url);
        }
        if admin.batch_size == 0 {
            anyhow::bail!("users.admin.batch_size must be > 0");
        }
    }

    for name in REQUIRED {
        config.catalogs.require(name)?;
    }
    let roles = config.catalogs.require(USER_ROLES)?;
    for role in &config.users.delegation_roles {
        if !roles.contains(role) {
            anyhow::bail!("users.delegation_roles: {role:?} is not listed in [catalogs.user_roles]");
        }
    }

    // report types
    let reports = &config.report_types;
    if reports.entries.is_empty() {
        anyhow::bail!("report_types.entries must contain at least one report type");
    }
    let mut seen = HashSet::new();
    for (i, entry) in reports.entries.iter().enumerate() {
        if !seen.insert(entry.id.as_str()) {
            anyhow::bail!("report_types.entries[{i}]: duplicate id {:?}", entry.id);
        }
        if !entry.weight.is_finite() {
            anyhow::bail!("report_types.entries[{i}]: weight must be finite");
        }
        if reports.normalize == WeightNormalization::None && entry.weight < 0.0 {
            anyhow::bail!(
                "report_types.entries[{i}]: weight must be >= 0 when normalize = \"none\""
            );
        }
    }

    Ok(())
}

fn is_index_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.')
}

fn check_rate(name: &str, value: f64) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&value) {
        anyhow::bail!("{name} must be within [0, 1], got {value}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
