//! cSHAKE256 parameter set.
//!
//! Single source of truth for the sponge geometry and the
//! domain-separation suffixes. The 256-bit security strength fixes
//! the rate/capacity split of the 1600-bit Keccak state.

/// Width of the Keccak state in bytes (1600 bits).
pub const STATE_BYTES: usize = 200;

/// Bytes absorbed or squeezed per permutation call at 256-bit security.
pub const RATE_BYTES: usize = 136;

/// Bytes of state never touched by absorb or squeeze.
pub const CAPACITY_BYTES: usize = STATE_BYTES - RATE_BYTES; // 64

/// Domain-separation suffix for plain SHAKE (FIPS 202 §6.2).
pub(crate) const DELIM_SHAKE: u8 = 0x1f;

/// Domain-separation suffix for cSHAKE with a non-empty function name
/// or customization string (SP 800-185 §3.3).
pub(crate) const DELIM_CSHAKE: u8 = 0x04;
