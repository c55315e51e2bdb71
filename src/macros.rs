// GrassThink - Greenhouse decision and aggregation core
// Copyright (c) 2025 GrassThink contributors
//
// Licensed under the MIT License.
// See LICENSE file for details.

//! Logging shims over the `log` facade.
//!
//! Expand to nothing unless the `logging` feature is enabled.

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "logging")]
        {
            log::debug!($($arg)*);
        }
        #[cfg(not(feature = "logging"))]
        {
            if false {
                let _ = format!($($arg)*);
            }
        }
    };
}

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "logging")]
        {
            log::trace!($($arg)*);
        }
        #[cfg(not(feature = "logging"))]
        {
            if false {
                let _ = format!($($arg)*);
            }
        }
    };
}
