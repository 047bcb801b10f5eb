//! `HEADER_001`/`HEADER_002`. The header has no `EntityId`, so these run
//! once per validation rather than through the per-tag registry.

use crate::codec::envelope::{MAX_HEADER_VERSION, MIN_HEADER_VERSION};
use crate::domain::save::Header;
use crate::validator::Issue;

pub fn check(header: &Header) -> Vec<Issue> {
    let mut issues = Vec::new();

    if header.game_version.trim().is_empty() {
        issues.push(
            Issue::warning("HEADER_001", "game version is missing").with_path("header"),
        );
    }

    if !(MIN_HEADER_VERSION..=MAX_HEADER_VERSION).contains(&header.header_version) {
        issues.push(
            Issue::warning(
                "HEADER_002",
                format!(
                    "header version {} is outside the supported [{MIN_HEADER_VERSION},{MAX_HEADER_VERSION}] range",
                    header.header_version
                ),
            )
            .with_path("header")
            .with_context(header.header_version.to_string()),
        );
    }

    issues
}
