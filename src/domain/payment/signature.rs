//! Payment callback signature verification.
//!
//! The gateway signs `"{order_id}|{payment_id}"` with HMAC-SHA256 under the
//! shared key secret and sends the hex digest alongside the callback. We
//! recompute and compare in constant time; a mismatch leaves all state
//! untouched.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for gateway payment signatures.
pub struct PaymentSignatureVerifier {
    secret: String,
}

impl PaymentSignatureVerifier {
    /// Creates a verifier with the gateway's shared key secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies a callback signature.
    ///
    /// `supplied` is the hex digest sent by the gateway. Returns false on
    /// any mismatch, including malformed hex.
    pub fn verify(&self, order_id: &str, payment_id: &str, supplied: &str) -> bool {
        let Ok(supplied) = hex::decode(supplied) else {
            return false;
        };
        let expected = self.compute(order_id, payment_id);
        constant_time_compare(&expected, &supplied)
    }

    /// Computes the expected signature bytes for an order/payment pair.
    fn compute(&self, order_id: &str, payment_id: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Signs an order/payment pair, producing the hex digest the gateway
    /// would send. Used by tests and local tooling.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        hex::encode(self.compute(order_id, payment_id))
    }
}

/// Constant-time byte comparison; length mismatch short-circuits, which
/// leaks only the length.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_signature_verifies() {
        let verifier = PaymentSignatureVerifier::new("test_secret");
        let sig = verifier.sign("order_1", "pay_1");
        assert!(verifier.verify("order_1", "pay_1", &sig));
    }

    #[test]
    fn tampered_signature_fails() {
        let verifier = PaymentSignatureVerifier::new("test_secret");
        let mut sig = verifier.sign("order_1", "pay_1");
        // Flip the last hex digit
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });
        assert!(!verifier.verify("order_1", "pay_1", &sig));
    }

    #[test]
    fn signature_binds_order_and_payment() {
        let verifier = PaymentSignatureVerifier::new("test_secret");
        let sig = verifier.sign("order_1", "pay_1");
        assert!(!verifier.verify("order_2", "pay_1", &sig));
        assert!(!verifier.verify("order_1", "pay_2", &sig));
    }

    #[test]
    fn wrong_secret_fails() {
        let signer = PaymentSignatureVerifier::new("secret_a");
        let verifier = PaymentSignatureVerifier::new("secret_b");
        let sig = signer.sign("order_1", "pay_1");
        assert!(!verifier.verify("order_1", "pay_1", &sig));
    }

    #[test]
    fn malformed_hex_fails_cleanly() {
        let verifier = PaymentSignatureVerifier::new("test_secret");
        assert!(!verifier.verify("order_1", "pay_1", "not-hex!"));
        assert!(!verifier.verify("order_1", "pay_1", ""));
    }
}
