//! Account address type (20 bytes)

use std::fmt;

/// 20-byte account address, as carried in the low bytes of a stack word
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of address in bytes
    pub const LEN: usize = 20;

    /// Zero address (0x0000...0000)
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Address whose low eight bytes hold `value` big-endian.
    ///
    /// Precompiled contracts live at these small reserved addresses.
    pub const fn from_low_u64_be(value: u64) -> Self {
        let be = value.to_be_bytes();
        let mut bytes = [0u8; 20];
        let mut i = 0;
        while i < 8 {
            bytes[12 + i] = be[i];
            i += 1;
        }
        Address(bytes)
    }

    /// Address held in the low 20 bytes of a 32-byte stack word; the high
    /// 12 bytes are ignored.
    pub fn from_word(word: &[u8; 32]) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[12..]);
        Address(bytes)
    }

    /// Left-pad into a 32-byte stack word
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&self.0);
        word
    }

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert_eq!(Address::default(), Address::ZERO);
        assert_eq!(
            Address::ZERO.to_string(),
            "0x0000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_from_low_u64_be() {
        let addr = Address::from_low_u64_be(7);
        assert_eq!(
            addr.to_string(),
            "0x0000000000000000000000000000000000000007"
        );

        let addr = Address::from_low_u64_be(0x0102);
        assert_eq!(addr.as_bytes()[18], 0x01);
        assert_eq!(addr.as_bytes()[19], 0x02);
    }

    #[test]
    fn test_const_precompile_address() {
        const MUL: Address = Address::from_low_u64_be(7);
        assert!(!MUL.is_zero());
        assert_eq!(MUL.as_bytes()[..19], [0u8; 19]);
    }

    #[test]
    fn test_word_conversion_drops_high_bytes() {
        let mut word = [0xAAu8; 32];
        word[31] = 0x07;
        let addr = Address::from_word(&word);
        assert_eq!(addr.as_bytes()[19], 0x07);
        assert_eq!(addr.as_bytes()[0], 0xAA);

        let back = addr.to_word();
        assert_eq!(&back[..12], &[0u8; 12]);
        assert_eq!(&back[12..], addr.as_bytes());
    }

    #[test]
    fn test_address_ordering() {
        assert!(Address::from_low_u64_be(4) < Address::from_low_u64_be(7));
    }

    #[test]
    fn test_debug_format() {
        let addr = Address::from_low_u64_be(4);
        assert_eq!(
            format!("{:?}", addr),
            "Address(0x0000000000000000000000000000000000000004)"
        );
    }
}
