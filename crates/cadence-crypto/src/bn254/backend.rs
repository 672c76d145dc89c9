//! Arithmetic backend selection

use super::{parse_point, parse_scalar, POINT_LEN};
use crate::CryptoError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// G1 operations over the precompile byte layout.
///
/// Implementations must agree byte-for-byte on every input, including the
/// inputs they reject.
pub trait Bn254Backend: Send + Sync + fmt::Debug {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Sum of the two points encoded at offsets 0 and 64
    fn g1_add(&self, input: &[u8]) -> Option<[u8; POINT_LEN]>;

    /// Product of the point at offset 0 and the scalar at offset 64
    fn g1_mul(&self, input: &[u8]) -> Option<[u8; POINT_LEN]>;
}

/// Pure-Rust backend built on [`super::G1Point`]
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableBn254;

impl Bn254Backend for PortableBn254 {
    fn name(&self) -> &'static str {
        "portable"
    }

    fn g1_add(&self, input: &[u8]) -> Option<[u8; POINT_LEN]> {
        let a = parse_point(input, 0)?;
        let b = parse_point(input, 64)?;
        Some(a.add(&b).to_bytes())
    }

    fn g1_mul(&self, input: &[u8]) -> Option<[u8; POINT_LEN]> {
        let point = parse_point(input, 0)?;
        let scalar = parse_scalar(input, 64)?;
        Some(point.multiply(&scalar).to_bytes())
    }
}

/// Whether to use the native backend
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NativeMode {
    /// Native when compiled in, portable otherwise
    #[default]
    Auto,
    /// Native or fail
    Enabled,
    /// Always portable
    Disabled,
}

impl FromStr for NativeMode {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(NativeMode::Auto),
            "enabled" | "on" | "true" => Ok(NativeMode::Enabled),
            "disabled" | "off" | "false" => Ok(NativeMode::Disabled),
            other => Err(CryptoError::InvalidNativeMode(other.to_string())),
        }
    }
}

impl fmt::Display for NativeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NativeMode::Auto => "auto",
            NativeMode::Enabled => "enabled",
            NativeMode::Disabled => "disabled",
        };
        f.write_str(s)
    }
}

/// Whether this build carries the native backend
pub fn native_available() -> bool {
    cfg!(feature = "native-bn254")
}

/// Resolve the backend for `mode`. Called once when an engine is built.
pub fn select_backend(mode: NativeMode) -> Result<Arc<dyn Bn254Backend>, CryptoError> {
    let backend: Arc<dyn Bn254Backend> = match (mode, native_available()) {
        (NativeMode::Disabled, _) | (NativeMode::Auto, false) => Arc::new(PortableBn254),
        (NativeMode::Enabled, false) => {
            return Err(CryptoError::BackendUnavailable("native-bn254"));
        }
        (NativeMode::Enabled, true) | (NativeMode::Auto, true) => native_backend(),
    };
    info!(backend = backend.name(), mode = %mode, "Selected alt_bn128 backend");
    Ok(backend)
}

#[cfg(feature = "native-bn254")]
fn native_backend() -> Arc<dyn Bn254Backend> {
    Arc::new(super::NativeBn254)
}

#[cfg(not(feature = "native-bn254"))]
fn native_backend() -> Arc<dyn Bn254Backend> {
    Arc::new(PortableBn254)
}
