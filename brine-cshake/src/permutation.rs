//! Keccak-f[1600], the permutation underlying the sponge.
//!
//! 24 rounds of theta, rho, pi, chi and iota over a 5 × 5 grid of
//! 64-bit lanes, exactly as specified in FIPS 202 §3. Rotation
//! offsets, lane traversal order and round constants are the published
//! values; any deviation breaks interoperability.

use crunchy::unroll;

/// Number of 64-bit lanes in the Keccak state (5 × 5).
pub(crate) const STATE_WORDS: usize = 25;

/// Rotation offsets for the rho step, in pi traversal order.
const ROTATIONS: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Lane traversal order for the combined rho/pi step.
const LANE_ORDER: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Round constants XORed into lane (0, 0) by the iota step.
const ROUND_CONSTANTS: [u64; 24] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// Apply Keccak-f[1600] to the state in place.
///
/// Lanes are indexed `x + 5 * y` per FIPS 202 §3.1.2.
#[allow(unused_assignments)]
pub(crate) fn permute(lanes: &mut [u64; STATE_WORDS]) {
    for &round_constant in &ROUND_CONSTANTS {
        // Theta: XOR each lane with the parity of two neighbouring columns.
        let mut parity = [0u64; 5];
        unroll! {
            for x in 0..5 {
                unroll! {
                    for y_step in 0..5 {
                        parity[x] ^= lanes[x + y_step * 5];
                    }
                }
            }
        }
        unroll! {
            for x in 0..5 {
                let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
                unroll! {
                    for y_step in 0..5 {
                        lanes[x + y_step * 5] ^= d;
                    }
                }
            }
        }

        // Rho and pi: rotate each lane and move it to its new position,
        // chasing the displaced lane around the traversal cycle.
        let mut carry = lanes[1];
        unroll! {
            for i in 0..24 {
                let displaced = lanes[LANE_ORDER[i]];
                lanes[LANE_ORDER[i]] = carry.rotate_left(ROTATIONS[i]);
                carry = displaced;
            }
        }

        // Chi: the only non-linear step, applied row by row.
        unroll! {
            for y_step in 0..5 {
                let y = y_step * 5;
                let mut row = [0u64; 5];
                unroll! {
                    for x in 0..5 {
                        row[x] = lanes[y + x];
                    }
                }
                unroll! {
                    for x in 0..5 {
                        lanes[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
                    }
                }
            }
        }

        // Iota
        lanes[0] ^= round_constant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_known_answer() {
        // First application of Keccak-f[1600] to the all-zero state.
        let mut lanes = [0u64; STATE_WORDS];
        permute(&mut lanes);
        assert_eq!(lanes[0], 0xf1258f7940e1dde7);
        assert_eq!(lanes[1], 0x84d5ccf933c0478a);
        assert_eq!(lanes[24], 0xeaf1ff7b5ceca249);
    }

    #[test]
    fn permutation_is_deterministic() {
        let mut s1 = [0u64; STATE_WORDS];
        let mut s2 = [0u64; STATE_WORDS];
        permute(&mut s1);
        permute(&mut s2);
        assert_eq!(s1, s2);
    }

    #[test]
    fn different_inputs_different_outputs() {
        let mut s1 = [0u64; STATE_WORDS];
        let mut s2 = [0u64; STATE_WORDS];
        s2[0] = 1;
        permute(&mut s1);
        permute(&mut s2);
        assert_ne!(s1, s2);
    }

    #[test]
    fn repeated_application_keeps_mixing() {
        let mut lanes = [0u64; STATE_WORDS];
        permute(&mut lanes);
        let after_one = lanes;
        permute(&mut lanes);
        assert_ne!(lanes, after_one);
    }
}
