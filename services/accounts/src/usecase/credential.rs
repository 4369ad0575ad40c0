use sha2::{Digest, Sha256};

fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// One-way transform of a plaintext password to its storable form.
/// Deterministic: login compares digests directly.
pub fn hash_password(plain: &str) -> String {
    sha256_hex(plain)
}

/// Content-derived signature for signed links: the digest of the subject's
/// email. Deterministic, so re-issuing a link for the same (purpose, email)
/// lands on the same cache key.
pub fn email_signature(email: &str) -> String {
    sha256_hex(email)
}
