use {
    sha2::{Digest, Sha512},
    subtle::ConstantTimeEq,
};

/// Provider signing digest: hex(sha512(order_id + status_code + gross_amount
/// + server_key)), over the field values exactly as delivered.
pub fn expected_signature(
    order_id: &str,
    status_code: &str,
    gross_amount: &str,
    server_key: &str,
) -> String {
    let mut hasher = Sha512::new();
    hasher.update(order_id.as_bytes());
    hasher.update(status_code.as_bytes());
    hasher.update(gross_amount.as_bytes());
    hasher.update(server_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time comparison against the `signature_key` the provider sent.
pub fn verify(
    order_id: &str,
    status_code: &str,
    gross_amount: &str,
    server_key: &str,
    provided: &str,
) -> bool {
    let expected = expected_signature(order_id, status_code, gross_amount, server_key);
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
