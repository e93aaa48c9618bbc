//! Webhook signature verification

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "sha256=";

/// Check an `X-Hub-Signature-256` value against the HMAC-SHA256 of `body`.
///
/// The digest comparison is constant-time.
pub fn verify_signature(secret: &[u8], body: &[u8], signature: &str) -> bool {
    let Some(hex_part) = signature.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };
    let Ok(provided) = hex::decode(hex_part) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&provided).is_ok()
}

/// Compute the `X-Hub-Signature-256` value GitHub would send for `body`
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(body);
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Example from the GitHub webhook documentation
    const SECRET: &[u8] = b"It's a Secret to Everybody";
    const BODY: &[u8] = b"Hello, World!";
    const SIGNATURE: &str =
        "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17";

    #[test]
    fn test_reference_signature() {
        assert!(verify_signature(SECRET, BODY, SIGNATURE));
        assert_eq!(sign(SECRET, BODY), SIGNATURE);
    }

    #[test]
    fn test_rejects_tampered_body() {
        assert!(!verify_signature(SECRET, b"Hello, World?", SIGNATURE));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        assert!(!verify_signature(b"another secret", BODY, SIGNATURE));
    }

    #[test]
    fn test_rejects_malformed_header() {
        let digest = SIGNATURE.trim_start_matches(SIGNATURE_PREFIX);
        assert!(!verify_signature(SECRET, BODY, digest));
        assert!(!verify_signature(SECRET, BODY, &format!("sha1={}", digest)));
        assert!(!verify_signature(SECRET, BODY, "sha256=not-hex"));
        assert!(!verify_signature(SECRET, BODY, ""));
    }
}
