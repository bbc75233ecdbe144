use arena_model::{Address, ScorePayload, SignatureError};
use libsecp256k1::{recover, Message, PublicKey, RecoveryId, Signature};
use sha3::{Digest, Keccak256};

/// Length of a recoverable signature: `r (32) || s (32) || v (1)`.
pub const SIGNATURE_LEN: usize = 65;

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Personal-message digest: `keccak256(prefix || keccak256(message))`.
pub fn personal_message_digest(message: &[u8]) -> [u8; 32] {
    let inner = keccak256(message);
    let mut buf = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + inner.len());
    buf.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    buf.extend_from_slice(&inner);
    keccak256(&buf)
}

/// Digest a backend signer signs for the given payload.
pub fn payload_digest(payload: &ScorePayload) -> [u8; 32] {
    personal_message_digest(&payload.signed_message())
}

/// Address of a secp256k1 public key: last 20 bytes of the keccak of its
/// uncompressed encoding without the tag byte.
pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    let serialized = public_key.serialize();
    let hash = keccak256(&serialized[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::new(bytes)
}

/// Recovers the identity that produced a signature over a digest.
pub trait SignatureRecovery {
    /// Recover the signer.
    ///
    /// # Errors
    /// Returns [`SignatureError::Malformed`] when the signature cannot be used.
    fn recover(&self, digest: &[u8; 32], signature: &[u8]) -> Result<Address, SignatureError>;
}

/// secp256k1 recovery over 65-byte `r || s || v` signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl SignatureRecovery for Secp256k1Recovery {
    fn recover(&self, digest: &[u8; 32], signature: &[u8]) -> Result<Address, SignatureError> {
        if signature.len() != SIGNATURE_LEN {
            return Err(SignatureError::Malformed(
                "invalid signature length; expected 65 bytes",
            ));
        }
        let v = signature[64];
        let v = if v >= 27 { v - 27 } else { v };
        if v > 1 {
            return Err(SignatureError::Malformed("invalid recovery id"));
        }
        let rid =
            RecoveryId::parse(v).map_err(|_| SignatureError::Malformed("invalid recovery id"))?;
        let sig = Signature::parse_standard_slice(&signature[..64])
            .map_err(|_| SignatureError::Malformed("invalid signature format"))?;
        let msg = Message::parse(digest);
        let pk = recover(&msg, &sig, &rid)
            .map_err(|_| SignatureError::Malformed("secp256k1 public key recovery failed"))?;
        Ok(address_from_public_key(&pk))
    }
}

/// Checks that score payloads were attested by the trusted signer.
#[derive(Debug, Clone, Default)]
pub struct Authenticator<R = Secp256k1Recovery> {
    recovery: R,
}

impl<R: SignatureRecovery> Authenticator<R> {
    /// Create with the given recovery primitive.
    pub fn new(recovery: R) -> Self {
        Self { recovery }
    }

    /// Verify `signature` over `payload` against `trusted_signer`.
    pub fn verify(
        &self,
        payload: &ScorePayload,
        signature: &[u8],
        trusted_signer: &Address,
    ) -> Result<(), SignatureError> {
        let recovered = self.recovery.recover(&payload_digest(payload), signature)?;
        if recovered != *trusted_signer {
            return Err(SignatureError::UnexpectedSigner {
                expected: *trusted_signer,
                recovered,
            });
        }
        Ok(())
    }
}

/// Signs score payloads with the backend key.
#[cfg(feature = "signer")]
#[derive(Clone)]
pub struct BackendSigner {
    secret: libsecp256k1::SecretKey,
    address: Address,
}

#[cfg(feature = "signer")]
impl BackendSigner {
    /// Create from a 32-byte secret key.
    pub fn from_bytes(secret: &[u8; 32]) -> crate::Result<Self> {
        let secret = libsecp256k1::SecretKey::parse(secret)
            .map_err(|_| crate::Error::custom("invalid secret key"))?;
        let address = address_from_public_key(&PublicKey::from_secret_key(&secret));
        Ok(Self { secret, address })
    }

    /// Create from a hex-encoded secret key, with or without `0x`.
    pub fn from_hex(secret: &str) -> crate::Result<Self> {
        let secret = secret.trim();
        let secret = secret.strip_prefix("0x").unwrap_or(secret);
        let bytes = hex::decode(secret).map_err(crate::Error::custom)?;
        let bytes = <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| crate::Error::custom("secret key must be 32 bytes"))?;
        Self::from_bytes(&bytes)
    }

    /// Signer address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a payload, returning `r || s || v` with `v` in `{27, 28}`.
    pub fn sign(&self, payload: &ScorePayload) -> [u8; SIGNATURE_LEN] {
        let msg = Message::parse(&payload_digest(payload));
        let (sig, rid) = libsecp256k1::sign(&msg, &self.secret);
        let mut out = [0u8; SIGNATURE_LEN];
        out[..64].copy_from_slice(&sig.serialize());
        out[64] = rid.serialize() + 27;
        out
    }
}

#[cfg(feature = "signer")]
impl std::fmt::Debug for BackendSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
