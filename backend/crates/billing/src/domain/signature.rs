//! Checkout callback signature
//!
//! The gateway signs `orderId|paymentId` with HMAC-SHA256 under the key
//! secret and hands the lowercase hex digest to the browser.

use platform::crypto::{constant_time_eq, hmac_sha256_hex};

/// Signature the gateway would produce for this order and payment
pub fn expected_signature(secret: &[u8], order_id: &str, payment_id: &str) -> String {
    hmac_sha256_hex(secret, format!("{order_id}|{payment_id}").as_bytes())
}

/// Constant-time check of a presented signature, byte for byte
pub fn signature_matches(secret: &[u8], order_id: &str, payment_id: &str, presented: &str) -> bool {
    let expected = expected_signature(secret, order_id, payment_id);
    constant_time_eq(expected.as_bytes(), presented.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_matches() {
        let sig = expected_signature(b"secret", "order_1", "pay_1");
        assert_eq!(sig.len(), 64);
        assert!(signature_matches(b"secret", "order_1", "pay_1", &sig));
        assert!(!signature_matches(b"other", "order_1", "pay_1", &sig));
        assert!(!signature_matches(b"secret", "order_1", "pay_2", &sig));
        assert!(!signature_matches(b"secret", "order_1", "pay_1", "deadbeef"));
    }

    #[test]
    fn test_padding_is_not_stripped() {
        let sig = expected_signature(b"secret", "order_1", "pay_1");
        assert!(!signature_matches(b"secret", "order_1", "pay_1", &format!(" {sig}")));
        assert!(!signature_matches(b"secret", "order_1", "pay_1", &format!("{sig}\n")));
        assert!(!signature_matches(b"secret", "order_1", "pay_1", &sig.to_uppercase()));
    }

    #[test]
    fn test_separator_is_part_of_the_message() {
        // "ab|c" and "a|bc" must not collide
        let a = expected_signature(b"secret", "ab", "c");
        let b = expected_signature(b"secret", "a", "bc");
        assert_ne!(a, b);
    }
}
