// Canonical byte encoding of the fields covered by proof-of-work

use crate::core::Block;

/// Base-16 text of a signed integer: lowercase, unpadded, `-` for negatives
pub fn int_to_hex(n: i64) -> Vec<u8> {
    if n < 0 {
        format!("-{:x}", n.unsigned_abs()).into_bytes()
    } else {
        format!("{:x}", n).into_bytes()
    }
}

/// Base-16 text of an unsigned integer
pub fn uint_to_hex(n: u64) -> Vec<u8> {
    format!("{:x}", n).into_bytes()
}

/// Concatenate the mined fields of `block` with a candidate nonce.
///
/// Order is fixed and there are no delimiters:
/// prev hash | data | hex(timestamp) | hex(target bits) | hex(nonce).
/// The genesis block contributes no predecessor bytes.
pub fn prepare_data(block: &Block, target_bits: u32, nonce: u64) -> Vec<u8> {
    let prev = block.prev_hash_bytes();
    let timestamp = int_to_hex(block.timestamp());
    let bits = uint_to_hex(u64::from(target_bits));
    let nonce = uint_to_hex(nonce);

    let mut buf = Vec::with_capacity(
        prev.len() + block.data().len() + timestamp.len() + bits.len() + nonce.len(),
    );
    buf.extend_from_slice(prev);
    buf.extend_from_slice(block.data());
    buf.extend_from_slice(&timestamp);
    buf.extend_from_slice(&bits);
    buf.extend_from_slice(&nonce);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Hash256;

    #[test]
    fn test_int_to_hex() {
        assert_eq!(int_to_hex(0), b"0");
        assert_eq!(int_to_hex(255), b"ff");
        assert_eq!(int_to_hex(1_700_000_000), b"6553f100");
        assert_eq!(int_to_hex(-26), b"-1a");
        assert_eq!(int_to_hex(i64::MIN), b"-8000000000000000");
    }

    #[test]
    fn test_uint_to_hex() {
        assert_eq!(uint_to_hex(24), b"18");
        assert_eq!(uint_to_hex(u64::MAX), b"ffffffffffffffff");
    }

    #[test]
    fn test_prepare_data_genesis_layout() {
        let block = Block::candidate(b"Genesis Block".to_vec(), None, 0x10);
        assert_eq!(prepare_data(&block, 24, 7), b"Genesis Block10187".to_vec());
    }

    #[test]
    fn test_prepare_data_includes_prev_hash_first() {
        let prev = Hash256::new([0xaa; 32]);
        let block = Block::candidate(b"x".to_vec(), Some(prev), 1);
        let data = prepare_data(&block, 8, 255);

        assert_eq!(&data[..32], &[0xaa; 32]);
        assert_eq!(&data[32..], b"x18ff");
    }
}
