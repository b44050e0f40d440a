//! Customizable SHAKE (cSHAKE256) extendable-output hashing.
//!
//! A streaming sponge XOF backed by Keccak-f[1600] (FIPS 202), with
//! the domain-customization layer of NIST SP 800-185: a function name
//! and a customization string are length-encoded and absorbed ahead of
//! the input, separating different uses of the same primitive. With
//! both strings empty the output is bit-identical to plain SHAKE256.
//!
//! # Parameters
//!
//! - **Permutation**: Keccak-f[1600], 24 rounds
//! - **Rate**: 136 bytes per permutation call
//! - **Capacity**: 64 bytes (256-bit security strength)
//! - **Domain suffix**: `0x1f` (SHAKE) / `0x04` (cSHAKE)
//! - **Output**: any caller-chosen length, streamed on demand
//!
//! # Examples
//!
//! ```
//! use brine_cshake::Custom;
//!
//! let digest = Custom::shake().once_to_bytes(b"Hello, World!", 32);
//!
//! let tagged = Custom::new(b"myproto", b"v1")?
//!     .create()
//!     .chain_absorb(b"Hello, World!")?
//!     .squeeze(32);
//! assert_ne!(digest, tagged);
//! # Ok::<(), brine_cshake::Error>(())
//! ```
//!
//! The keystream can also be XORed into a buffer in place, for
//! masking fixed-size data without a second allocation:
//!
//! ```
//! use brine_cshake::Custom;
//!
//! let mut buffer = [1u8, 2, 3, 4];
//! let mut hasher = Custom::shake().create().chain_absorb(b"key material")?;
//! hasher.squeeze_xor(&mut buffer);
//! # Ok::<(), brine_cshake::Error>(())
//! ```

mod encoding;
mod error;
pub mod params;
mod permutation;
mod sponge;

pub use error::Error;
pub use sponge::{Custom, Hasher};

/// SHAKE256 of `input`, producing `output_len` bytes.
pub fn shake(input: &[u8], output_len: usize) -> Vec<u8> {
    Custom::shake().once_to_bytes(input, output_len)
}

/// cSHAKE256 of `input` under a function name and customization string.
pub fn cshake(
    name: &[u8],
    custom_string: &[u8],
    input: &[u8],
    output_len: usize,
) -> Result<Vec<u8>, Error> {
    Ok(Custom::new(name, custom_string)?.once_to_bytes(input, output_len))
}

/// XOR `buffer` in place with the keystream derived from `input`.
///
/// Applying the same mask twice restores the original buffer.
pub fn mask(
    name: &[u8],
    custom_string: &[u8],
    input: &[u8],
    buffer: &mut [u8],
) -> Result<(), Error> {
    let mut hasher = Custom::new(name, custom_string)?.create();
    hasher.absorb(input)?;
    hasher.squeeze_xor(buffer);
    Ok(())
}
