//! Block buffering and Merkle–Damgård padding shared by every hash engine.

use zeroize::Zeroize;

/// Partial-block buffer for an `N`-byte compression function.
///
/// Invariant: `pos < N` between calls, so there is always room for the
/// `0x80` padding byte.
#[derive(Clone, Zeroize)]
pub(crate) struct BlockBuffer<const N: usize> {
    block: [u8; N],
    pos: usize,
    total: u128,
}

impl<const N: usize> BlockBuffer<N> {
    pub(crate) const fn new() -> Self {
        Self {
            block: [0u8; N],
            pos: 0,
            total: 0,
        }
    }

    /// Total number of bytes absorbed so far.
    pub(crate) fn total_len(&self) -> u128 {
        self.total
    }

    /// Appends `data`, invoking `compress` once per completed block.
    pub(crate) fn absorb(&mut self, mut data: &[u8], mut compress: impl FnMut(&[u8; N])) {
        self.total = self.total.wrapping_add(data.len() as u128);

        if self.pos > 0 {
            let take = (N - self.pos).min(data.len());
            self.block[self.pos..self.pos + take].copy_from_slice(&data[..take]);
            self.pos += take;
            data = &data[take..];

            if self.pos < N {
                return;
            }

            compress(&self.block);
            self.pos = 0;
        }

        let mut blocks = data.chunks_exact(N);
        for chunk in &mut blocks {
            if let Ok(block) = <&[u8; N]>::try_from(chunk) {
                compress(block);
            }
        }

        let rest = blocks.remainder();
        self.block[..rest.len()].copy_from_slice(rest);
        self.pos = rest.len();
    }

    /// Applies the final padding: `0x80`, zeros, then the encoded message
    /// length in the last `length.len()` bytes of the final block.
    ///
    /// The buffer is wiped and reset afterwards.
    pub(crate) fn finish(&mut self, length: &[u8], mut compress: impl FnMut(&[u8; N])) {
        let tail = N - length.len();

        self.block[self.pos] = 0x80;
        self.block[self.pos + 1..].fill(0);

        if self.pos + 1 > tail {
            compress(&self.block);
            self.block.fill(0);
        }

        self.block[tail..].copy_from_slice(length);
        compress(&self.block);

        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<const N: usize>(chunks: &[&[u8]]) -> (Vec<[u8; N]>, BlockBuffer<N>) {
        let mut out = Vec::new();
        let mut buf = BlockBuffer::<N>::new();
        for chunk in chunks {
            buf.absorb(chunk, |b| out.push(*b));
        }
        (out, buf)
    }

    #[test]
    fn absorb_emits_whole_blocks_only() {
        let (blocks, buf) = collect::<4>(&[b"ab", b"cdef", b"g"]);
        assert_eq!(blocks, vec![*b"abcd"]);
        assert_eq!(buf.pos, 3);
        assert_eq!(buf.total_len(), 7);
    }

    #[test]
    fn finish_spills_into_extra_block() {
        let (_, mut buf) = collect::<8>(&[b"1234567"]);
        let mut out = Vec::new();
        buf.finish(&[0xAA, 0xBB], |b| out.push(*b));

        assert_eq!(out.len(), 2);
        assert_eq!(out[0], *b"1234567\x80");
        assert_eq!(out[1], [0, 0, 0, 0, 0, 0, 0xAA, 0xBB]);
    }

    #[test]
    fn finish_fits_in_one_block() {
        let (_, mut buf) = collect::<8>(&[b"12"]);
        let mut out = Vec::new();
        buf.finish(&[0x10], |b| out.push(*b));

        assert_eq!(out, vec![[b'1', b'2', 0x80, 0, 0, 0, 0, 0x10]]);
    }
}
