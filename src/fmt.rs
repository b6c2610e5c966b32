//! Logging macros that forward to `defmt` on the board and to `log` elsewhere.
//! With neither backend the arguments are still type-checked but nothing is emitted.
//!
//! Format strings must stay within the common subset of both backends:
//! `{}` for integers and `{:?}` for crate types (which derive both `Debug`
//! and, on the board, `defmt::Format`).
#![macro_use]
#![allow(unused_macros)]

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "board")]
        ::defmt::debug!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "board")))]
        ::log::debug!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "board")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "board")]
        ::defmt::info!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "board")))]
        ::log::info!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "board")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "board")]
        ::defmt::warn!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "board")))]
        ::log::warn!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "board")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "board")]
        ::defmt::error!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "board")))]
        ::log::error!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "board")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
