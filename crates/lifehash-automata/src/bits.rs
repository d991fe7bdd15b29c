//! MSB-first bit streams over byte buffers.
//!
//! [`BitAggregator`] packs bits into bytes; [`BitEnumerator`] reads them back.
//! Both are used for grid snapshots and for drawing entropy from a digest.

use thiserror::Error;

/// Attempted to read past the end of a [`BitEnumerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bit enumerator underflow")]
pub struct Underflow;

// ============================================================================
// Writer
// ============================================================================

/// Accumulates single bits into a growing byte buffer, most significant bit first.
#[derive(Debug, Clone, Default)]
pub struct BitAggregator {
    data: Vec<u8>,
    mask: u8,
}

impl BitAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty aggregator with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            mask: 0,
        }
    }

    /// Appends one bit. A new byte is started only when the current one is full.
    pub fn append(&mut self, bit: bool) {
        if self.mask == 0 {
            self.mask = 0x80;
            self.data.push(0);
        }

        if bit {
            if let Some(last) = self.data.last_mut() {
                *last |= self.mask;
            }
        }

        self.mask >>= 1;
    }

    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the aggregator and returns the finished buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl Extend<bool> for BitAggregator {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.append(bit);
        }
    }
}

impl FromIterator<bool> for BitAggregator {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(iter);
        aggregator
    }
}

// ============================================================================
// Reader
// ============================================================================

/// Reads bits from a byte buffer, most significant bit first.
#[derive(Debug, Clone)]
pub struct BitEnumerator<'a> {
    data: &'a [u8],
    index: usize,
    mask: u8,
}

impl<'a> BitEnumerator<'a> {
    /// Creates a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            index: 0,
            mask: 0x80,
        }
    }

    /// Returns true while another bit can be read.
    ///
    /// Exhaustion is detected only once the mask of the final byte runs out,
    /// which keeps the reader bit-compatible with existing LifeHash images.
    pub fn has_next(&self) -> bool {
        self.mask != 0 || self.index + 1 != self.data.len()
    }

    /// Reads one bit.
    pub fn next_bit(&mut self) -> Result<bool, Underflow> {
        if !self.has_next() {
            return Err(Underflow);
        }

        if self.mask == 0 {
            self.mask = 0x80;
            self.index += 1;
        }

        let byte = self.data.get(self.index).ok_or(Underflow)?;
        let bit = byte & self.mask != 0;
        self.mask >>= 1;
        Ok(bit)
    }

    /// Reads `bits` bits into an unsigned integer, most significant bit first.
    pub fn next_n(&mut self, bits: u32) -> Result<u32, Underflow> {
        debug_assert!(bits <= 32);
        let mut value = 0u32;
        for _ in 0..bits {
            value = (value << 1) | u32::from(self.next_bit()?);
        }
        Ok(value)
    }

    /// Reads a 2-bit unsigned integer.
    pub fn next_uint2(&mut self) -> Result<u8, Underflow> {
        Ok(self.next_n(2)? as u8)
    }

    /// Reads an 8-bit unsigned integer.
    pub fn next_uint8(&mut self) -> Result<u8, Underflow> {
        Ok(self.next_n(8)? as u8)
    }

    /// Reads a 16-bit unsigned integer.
    pub fn next_uint16(&mut self) -> Result<u16, Underflow> {
        Ok(self.next_n(16)? as u16)
    }

    /// Reads 16 bits as a fraction in [0, 1].
    pub fn next_frac(&mut self) -> Result<f64, Underflow> {
        Ok(f64::from(self.next_uint16()?) / 65535.0)
    }
}

impl Iterator for BitEnumerator<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.next_bit().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregator_msb_first() {
        let agg: BitAggregator = [true, false, true, false, false, false, false, true]
            .into_iter()
            .collect();
        assert_eq!(agg.as_bytes(), &[0b1010_0001]);
    }

    #[test]
    fn test_aggregator_partial_byte() {
        let mut agg = BitAggregator::new();
        assert!(agg.as_bytes().is_empty());

        agg.append(true);
        assert_eq!(agg.as_bytes(), &[0x80]);

        agg.extend([false; 7]);
        agg.append(true);
        assert_eq!(agg.into_bytes(), vec![0x80, 0x80]);
    }

    #[test]
    fn test_enumerator_reads_every_bit() {
        let data = [0xA5u8, 0x0F];
        let bits: Vec<bool> = BitEnumerator::new(&data).collect();
        assert_eq!(bits.len(), 16);
        assert_eq!(
            &bits[..8],
            &[true, false, true, false, false, true, false, true]
        );
        assert!(bits[12..].iter().all(|&b| b));
    }

    #[test]
    fn test_enumerator_underflow() {
        let data = [0xFFu8];
        let mut e = BitEnumerator::new(&data);
        for _ in 0..8 {
            assert!(e.has_next());
            assert_eq!(e.next_bit(), Ok(true));
        }
        assert!(!e.has_next());
        assert_eq!(e.next_bit(), Err(Underflow));
    }

    #[test]
    fn test_enumerator_empty_buffer() {
        let mut e = BitEnumerator::new(&[]);
        assert_eq!(e.next_bit(), Err(Underflow));
    }

    #[test]
    fn test_next_n_composes_msb_first() {
        let data = [0b1101_0010u8, 0xFF, 0x00, 0x80];
        let mut e = BitEnumerator::new(&data);
        assert_eq!(e.next_uint2(), Ok(0b11));
        assert_eq!(e.next_n(3), Ok(0b010));
        assert_eq!(e.next_n(3), Ok(0b010));
        assert_eq!(e.next_uint16(), Ok(0xFF00));
        assert_eq!(e.next_uint8(), Ok(0x80));
        assert!(!e.has_next());
    }

    #[test]
    fn test_next_frac_range() {
        let ones = [0xFFu8, 0xFF];
        assert_eq!(BitEnumerator::new(&ones).next_frac(), Ok(1.0));

        let zeros = [0u8, 0];
        assert_eq!(BitEnumerator::new(&zeros).next_frac(), Ok(0.0));

        let half = [0x80u8, 0x00];
        let frac = BitEnumerator::new(&half).next_frac().unwrap();
        assert!((frac - 32768.0 / 65535.0).abs() < 1e-12);
    }

    #[test]
    fn test_underflow_propagates_through_composed_reads() {
        let data = [0xABu8];
        let mut e = BitEnumerator::new(&data);
        assert_eq!(e.next_uint16(), Err(Underflow));
    }

    #[test]
    fn test_roundtrip_through_aggregator() {
        let digest: Vec<u8> = (0u8..32).map(|i| i.wrapping_mul(37)).collect();
        let agg: BitAggregator = BitEnumerator::new(&digest).collect();
        assert_eq!(agg.into_bytes(), digest);
    }
}
