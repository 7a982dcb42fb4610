//! Build metadata shown in the about window.
//!
//! The commit and build time come from the compile-time environment, e.g.
//! `GREENCALC_COMMIT=$(git rev-parse HEAD) GREENCALC_BUILD_TIME=$(date -u +%FT%TZ) cargo build`.

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub build_time: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: match option_env!("GREENCALC_COMMIT") {
                Some(commit) => commit,
                None => UNKNOWN,
            },
            build_time: match option_env!("GREENCALC_BUILD_TIME") {
                Some(time) => time,
                None => UNKNOWN,
            },
        }
    }

    /// First seven characters of the commit hash.
    pub fn short_commit(&self) -> &'static str {
        let commit = self.commit;
        match commit.char_indices().nth(7) {
            Some((idx, _)) => &commit[..idx],
            None => commit,
        }
    }
}
