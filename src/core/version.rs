//! Build metadata and the handler API version.
//! Includes the generated version.rs from the build script so there is a
//! single source of truth for the binary and for handler compatibility checks.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Parse the handler API version string from the build script into u32.
/// Falls back to a stable default if parsing fails.
pub fn get_api_version() -> u32 {
    HANDLER_API_VERSION.parse().unwrap_or(20250727)
}

/// Major component (year) of an API version
pub fn major_version(api_version: u32) -> u32 {
    api_version / 10000
}

/// Same major version (year) is compatible
pub fn is_api_compatible(handler_api_version: u32) -> bool {
    major_version(get_api_version()) == major_version(handler_api_version)
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_version_is_year() {
        assert_eq!(major_version(20250727), 2025);
        assert_eq!(major_version(20240101), 2024);
    }

    #[test]
    fn test_same_year_is_compatible() {
        let current = get_api_version();
        assert!(is_api_compatible(current));
        assert!(is_api_compatible(major_version(current) * 10000 + 101));
        assert!(!is_api_compatible((major_version(current) - 1) * 10000 + 101));
    }
}
