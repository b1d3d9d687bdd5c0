//! compression/registry.rs
//! Backend registry: name resolution and factory functions.

use std::ops::RangeInclusive;

use crate::compression::codecs::{DeflateBackend, Lz4Backend, ZstdBackend};
use crate::compression::constants::{
    backend_names, DEFAULT_LEVEL_DEFLATE, DEFAULT_LEVEL_ZSTD, DEFLATE_LEVEL_MAX, DEFLATE_LEVEL_MIN,
};
use crate::compression::types::{CompressionBackend, CompressionError};

/// Static description of a registered backend.
#[derive(Debug)]
pub struct BackendInfo {
    pub name: &'static str,
    pub supports_level: bool,
    pub default_level: Option<i32>,
    /// Levels the backend accepts; `None` when levels are ignored.
    pub level_range: fn() -> Option<RangeInclusive<i32>>,
    /// Shared default-level instance.
    pub instance: &'static dyn CompressionBackend,
}

impl BackendInfo {
    pub fn level_range(&self) -> Option<RangeInclusive<i32>> {
        (self.level_range)()
    }
}

static LZ4: Lz4Backend = Lz4Backend::new();
static DEFLATE: DeflateBackend = DeflateBackend::new(DEFAULT_LEVEL_DEFLATE as u32);
static ZSTD: ZstdBackend = ZstdBackend::new(DEFAULT_LEVEL_ZSTD);

/// Registered backends, in listing order.
static BACKENDS: [BackendInfo; 3] = [
    BackendInfo {
        name: backend_names::LZ4,
        supports_level: false,
        default_level: None,
        level_range: || None,
        instance: &LZ4,
    },
    BackendInfo {
        name: backend_names::DEFLATE,
        supports_level: true,
        default_level: Some(DEFAULT_LEVEL_DEFLATE),
        level_range: || Some(DEFLATE_LEVEL_MIN..=DEFLATE_LEVEL_MAX),
        instance: &DEFLATE,
    },
    BackendInfo {
        name: backend_names::ZSTD,
        supports_level: true,
        default_level: Some(DEFAULT_LEVEL_ZSTD),
        level_range: || Some(zstd::compression_level_range()),
        instance: &ZSTD,
    },
];

/// Normalize a user-supplied name the way sysfs attribute writes arrive
/// (`echo lz4 > comp_algorithm` carries a trailing newline).
fn normalize(name: &str) -> &str {
    name.trim()
}

pub fn resolve(name: &str) -> Result<&'static BackendInfo, CompressionError> {
    let wanted = normalize(name);
    BACKENDS
        .iter()
        .find(|info| info.name == wanted)
        .ok_or_else(|| CompressionError::UnsupportedBackend { name: wanted.to_string() })
}

/// Default-level backend registered under `name`.
pub fn find(name: &str) -> Option<&'static dyn CompressionBackend> {
    resolve(name).ok().map(|info| info.instance)
}

pub fn lookup(name: &str) -> Result<&'static dyn CompressionBackend, CompressionError> {
    let info = resolve(name)?;
    log::debug!("selected compression backend {}", info.name);
    Ok(info.instance)
}

pub fn is_available(name: &str) -> bool {
    resolve(name).is_ok()
}

pub fn available_backends() -> Vec<&'static str> {
    BACKENDS.iter().map(|info| info.name).collect()
}

/// The device's algorithm listing: every name, the selected one bracketed.
///
/// `available_show("zstd")` yields `"lz4 deflate [zstd]\n"`.
pub fn available_show(selected: &str) -> String {
    let selected = normalize(selected);
    let names: Vec<String> = BACKENDS
        .iter()
        .map(|info| {
            if info.name == selected {
                format!("[{}]", info.name)
            } else {
                info.name.to_string()
            }
        })
        .collect();
    format!("{}\n", names.join(" "))
}

/// Build a backend instance with an explicit level.
///
/// `level = None` picks the backend default. Levels outside the backend's
/// range are clamped; backends without levels ignore the argument.
pub fn create_backend(
    name: &str,
    level: Option<i32>,
) -> Result<Box<dyn CompressionBackend>, CompressionError> {
    let info = resolve(name)?;
    let level = match (info.level_range(), level.or(info.default_level)) {
        (Some(range), Some(l)) => Some(l.clamp(*range.start(), *range.end())),
        _ => None,
    };
    log::debug!("building compression backend {} (level {:?})", info.name, level);

    let backend: Box<dyn CompressionBackend> = match info.name {
        backend_names::DEFLATE => Box::new(DeflateBackend::new(
            level.unwrap_or(DEFAULT_LEVEL_DEFLATE) as u32,
        )),
        backend_names::ZSTD => Box::new(ZstdBackend::new(level.unwrap_or(DEFAULT_LEVEL_ZSTD))),
        _ => Box::new(Lz4Backend::new()),
    };
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_names_are_unique() {
        let names = available_backends();
        for (i, a) in names.iter().enumerate() {
            assert!(names[i + 1..].iter().all(|b| b != a), "duplicate backend {a}");
        }
    }

    #[test]
    fn instances_report_their_registered_name() {
        for info in BACKENDS.iter() {
            assert_eq!(info.instance.name(), info.name);
        }
    }

    #[test]
    fn default_levels_are_within_range() {
        for info in BACKENDS.iter() {
            match (info.level_range(), info.default_level) {
                (Some(range), Some(level)) => assert!(range.contains(&level), "{}", info.name),
                (None, None) => assert!(!info.supports_level),
                _ => panic!("{}: level metadata is inconsistent", info.name),
            }
        }
    }
}
