use super::{Md5State, S, T};

/// Compresses a single 512-bit block into `state`.
pub fn compress(block: &[u8; 64], state: &mut [u32; 4]) {
    let mut m = [0u32; 16];
    for (slot, bytes) in m.iter_mut().zip(block.chunks_exact(4)) {
        *slot = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..64 {
        let (f, g) = match i / 16 {
            0 => ((b & c) | ((!b) & d), i),
            1 => ((d & b) | ((!d) & c), (5 * i + 1) % 16),
            2 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };

        let f = f.wrapping_add(a).wrapping_add(T[i]).wrapping_add(m[g]);

        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(f.rotate_left(S[i / 16][i % 4]));
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d]) {
        *s = s.wrapping_add(v);
    }
}

/// Computes the MD5 digest of `input`.
pub fn md5(input: &[u8]) -> [u8; 16] {
    let mut engine = Md5State::new();
    engine.update(input);

    let mut out = [0u8; 16];
    engine.finalize_into(&mut out);
    out
}
