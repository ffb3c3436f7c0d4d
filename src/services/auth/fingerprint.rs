use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

const FINGERPRINT_LEN: usize = 12;

/// Short, non-reversible token identifier for log correlation.
/// Raw tokens never go to the log.
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut encoded = URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(FINGERPRINT_LEN);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = token_fingerprint("aaa.bbb.ccc");
        assert_eq!(a.len(), FINGERPRINT_LEN);
        assert_eq!(a, token_fingerprint("aaa.bbb.ccc"));
        assert_ne!(a, token_fingerprint("aaa.bbb.ccd"));
    }
}
