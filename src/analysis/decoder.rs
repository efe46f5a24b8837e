//! Length-prefixed LSB message decoding.
//!
//! The embedding convention this decoder recovers: a 32-bit big-endian
//! payload length in the first 32 LSBs of a channel, followed by the
//! payload bytes packed most-significant-bit first, one bit per pixel.
//!
//! Decoding is a single-pass decision procedure. Malformed input is an
//! expected, frequent outcome and every rejection path is an explicit
//! branch that returns [`DecodeOutcome::NoMessage`] with the failed gate;
//! nothing in here panics or returns an error for bad bits.

use crate::config::{ConfigError, DecoderConfig};
use crate::extraction::BitSequence;

/// Size of the length header in bits.
const HEADER_BITS: usize = 32;

/// Printable ASCII range used by the plausibility gate.
const PRINTABLE_RANGE: std::ops::RangeInclusive<u32> = 32..=126;

/// Outcome of a decode attempt.
///
/// Absence of a message is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A plausible message passed every gate.
    Message(String),
    /// No plausible message; the reason names the gate that rejected it.
    NoMessage(RejectReason),
}

impl DecodeOutcome {
    /// Returns the decoded message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            DecodeOutcome::Message(msg) => Some(msg),
            DecodeOutcome::NoMessage(_) => None,
        }
    }

    /// Consumes the outcome, returning the decoded message if any.
    pub fn into_message(self) -> Option<String> {
        match self {
            DecodeOutcome::Message(msg) => Some(msg),
            DecodeOutcome::NoMessage(_) => None,
        }
    }
}

/// Why a decode attempt found no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Fewer than 32 bits available; no room for a length header.
    TooFewBits,
    /// Header length was zero or above the configured maximum.
    ImplausibleLength,
    /// Header promised more payload than the channel holds.
    TruncatedPayload,
    /// Payload decoded to an empty string.
    EmptyPayload,
    /// Too few printable characters in the decoded payload.
    UnprintablePayload,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::TooFewBits => "too few bits for a length header",
            RejectReason::ImplausibleLength => "implausible length header",
            RejectReason::TruncatedPayload => "truncated payload",
            RejectReason::EmptyPayload => "empty payload",
            RejectReason::UnprintablePayload => "payload mostly unprintable",
        };
        f.write_str(s)
    }
}

/// Decoder for length-prefixed messages in a channel's LSB sequence.
pub struct MessageDecoder {
    config: DecoderConfig,
}

impl MessageDecoder {
    /// Creates a decoder, validating the configuration eagerly.
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Attempts to recover a message from a channel's LSB bit sequence.
    pub fn decode(&self, bits: &BitSequence) -> DecodeOutcome {
        let raw = bits.as_slice();

        if raw.len() < HEADER_BITS {
            return DecodeOutcome::NoMessage(RejectReason::TooFewBits);
        }

        let length = read_length(&raw[..HEADER_BITS]) as usize;
        if length == 0 || length > self.config.max_bytes {
            tracing::trace!(length, max_bytes = self.config.max_bytes, "length gate rejected");
            return DecodeOutcome::NoMessage(RejectReason::ImplausibleLength);
        }

        let required = HEADER_BITS + length * 8;
        if raw.len() < required {
            return DecodeOutcome::NoMessage(RejectReason::TruncatedPayload);
        }

        let payload = pack_bytes(&raw[HEADER_BITS..required]);

        // Lossy decode: invalid UTF-8 becomes U+FFFD instead of failing
        let message = String::from_utf8_lossy(&payload).into_owned();
        if message.is_empty() {
            return DecodeOutcome::NoMessage(RejectReason::EmptyPayload);
        }

        let total = message.chars().count();
        let printable = message
            .chars()
            .filter(|c| PRINTABLE_RANGE.contains(&(*c as u32)))
            .count();
        if (printable as f64) / (total as f64) < self.config.printable_ratio {
            tracing::trace!(printable, total, "printability gate rejected");
            return DecodeOutcome::NoMessage(RejectReason::UnprintablePayload);
        }

        DecodeOutcome::Message(message)
    }
}

/// Packs a 32-bit slice of 0/1 values into a big-endian unsigned integer.
///
/// Bits are consumed most-significant first, matching the embedding order.
fn read_length(bits: &[u8]) -> u32 {
    debug_assert_eq!(bits.len(), HEADER_BITS);
    bits.iter().fold(0u32, |acc, &b| (acc << 1) | (b as u32))
}

/// Packs 0/1 values into bytes, most-significant bit first.
fn pack_bytes(bits: &[u8]) -> Vec<u8> {
    debug_assert_eq!(bits.len() % 8, 0);
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encodes a payload the way an embedder would: 32-bit big-endian
    /// length followed by the payload bytes, MSB first, one bit per entry.
    fn embed(payload: &[u8]) -> Vec<u8> {
        let mut bits = Vec::with_capacity(HEADER_BITS + payload.len() * 8);
        let len = payload.len() as u32;
        for i in (0..32).rev() {
            bits.push(((len >> i) & 1) as u8);
        }
        for &byte in payload {
            for i in (0..8).rev() {
                bits.push((byte >> i) & 1);
            }
        }
        bits
    }

    fn decoder() -> MessageDecoder {
        MessageDecoder::new(DecoderConfig::default()).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let bits = BitSequence::from_bits(embed(b"Hello, steganalysis!"));
        assert_eq!(
            decoder().decode(&bits),
            DecodeOutcome::Message("Hello, steganalysis!".to_string())
        );
    }

    #[test]
    fn test_single_byte_message() {
        // Header 0x00000001, payload 0x41 ('A')
        let bits = BitSequence::from_bits(embed(b"A"));
        assert_eq!(decoder().decode(&bits), DecodeOutcome::Message("A".into()));
    }

    #[test]
    fn test_too_few_bits() {
        let bits = BitSequence::from_bits(vec![1; 31]);
        assert_eq!(
            decoder().decode(&bits),
            DecodeOutcome::NoMessage(RejectReason::TooFewBits)
        );
    }

    #[test]
    fn test_empty_sequence() {
        let bits = BitSequence::from_bits(vec![]);
        assert_eq!(
            decoder().decode(&bits),
            DecodeOutcome::NoMessage(RejectReason::TooFewBits)
        );
    }

    #[test]
    fn test_all_ones_header_rejected() {
        // Length = 4294967295, far above the 1024-byte default cap
        let bits = BitSequence::from_bits(vec![1; 64]);
        assert_eq!(
            decoder().decode(&bits),
            DecodeOutcome::NoMessage(RejectReason::ImplausibleLength)
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        let bits = BitSequence::from_bits(vec![0; 64]);
        assert_eq!(
            decoder().decode(&bits),
            DecodeOutcome::NoMessage(RejectReason::ImplausibleLength)
        );
    }

    #[test]
    fn test_capacity_gate_exact_and_one_short() {
        let full = embed(b"hi");
        assert_eq!(full.len(), 32 + 16);

        let exact = BitSequence::from_bits(full.clone());
        assert_eq!(decoder().decode(&exact), DecodeOutcome::Message("hi".into()));

        let mut short = full;
        short.pop();
        let short = BitSequence::from_bits(short);
        assert_eq!(
            decoder().decode(&short),
            DecodeOutcome::NoMessage(RejectReason::TruncatedPayload)
        );
    }

    #[test]
    fn test_unprintable_payload_rejected() {
        let payload: Vec<u8> = (0..16).map(|_| 0x01).collect(); // control chars
        let bits = BitSequence::from_bits(embed(&payload));
        assert_eq!(
            decoder().decode(&bits),
            DecodeOutcome::NoMessage(RejectReason::UnprintablePayload)
        );
    }

    #[test]
    fn test_printable_ratio_boundary() {
        // 8 printable + 2 control chars = 0.8 exactly, not strictly below
        let mut payload = b"ABCDEFGH".to_vec();
        payload.extend([0x01, 0x02]);
        let bits = BitSequence::from_bits(embed(&payload));

        let outcome = decoder().decode(&bits);
        assert!(outcome.message().is_some());

        // One more control char pushes the ratio below 0.8
        let mut payload = b"ABCDEFGH".to_vec();
        payload.extend([0x01, 0x02, 0x03]);
        let bits = BitSequence::from_bits(embed(&payload));
        assert_eq!(
            decoder().decode(&bits),
            DecodeOutcome::NoMessage(RejectReason::UnprintablePayload)
        );
    }

    #[test]
    fn test_invalid_utf8_replaced_not_fatal() {
        // 0xFF is never valid UTF-8; lossy decode must still produce output
        let payload = vec![0xFF; 8];
        let bits = BitSequence::from_bits(embed(&payload));

        // Replacement characters are unprintable, so the gate rejects
        assert_eq!(
            decoder().decode(&bits),
            DecodeOutcome::NoMessage(RejectReason::UnprintablePayload)
        );
    }

    #[test]
    fn test_max_bytes_configurable() {
        let small = MessageDecoder::new(DecoderConfig {
            max_bytes: 4,
            ..Default::default()
        })
        .unwrap();

        let bits = BitSequence::from_bits(embed(b"hello"));
        assert_eq!(
            small.decode(&bits),
            DecodeOutcome::NoMessage(RejectReason::ImplausibleLength)
        );

        let bits = BitSequence::from_bits(embed(b"hey"));
        assert_eq!(small.decode(&bits), DecodeOutcome::Message("hey".into()));
    }

    #[test]
    fn test_trailing_noise_ignored() {
        let mut bits = embed(b"payload");
        bits.extend([1, 0, 1, 1, 0, 0, 1, 0]); // junk past the declared length
        let bits = BitSequence::from_bits(bits);
        assert_eq!(
            decoder().decode(&bits),
            DecodeOutcome::Message("payload".into())
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = MessageDecoder::new(DecoderConfig {
            max_bytes: 0,
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_read_length_big_endian() {
        let mut bits = vec![0u8; 32];
        bits[31] = 1; // ...0001
        assert_eq!(read_length(&bits), 1);

        bits[24] = 1; // ...1000_0001
        assert_eq!(read_length(&bits), 129);
    }
}
