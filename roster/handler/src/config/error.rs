//! Configuration errors.

/// Configuration error variants.
#[derive(Debug, thiserror::Error)]
pub enum RosterConfigError {
    /// The default page size must be at least one and no larger than the
    /// maximum page size.
    #[error("[paging] default_limit must be between 1 and max_limit ({max}), got {default}")]
    InvalidDefaultLimit {
        /// Configured default page size.
        default: u32,
        /// Configured maximum page size.
        max: u32,
    },

    /// The maximum page size is above the hard cap.
    #[error("[paging] max_limit cannot exceed {cap}, got {0}", cap = super::MAX_PAGE_LIMIT)]
    MaxLimitAboveCap(u32),

    /// A duration option was set to zero.
    #[error("[{0}] must be non-zero")]
    ZeroDurationForbidden(&'static str),

    /// The listen host is not an IP address.
    #[error("[server] host must be an IP address, got '{0}'")]
    InvalidHost(String),
}
