//! Transaction signing.
//!
//! Signers see only the transaction hash; how key material is stored is up
//! to the implementation.

use crate::types::{DecoratedSignature, TransactionEnvelope};
use crate::TxError;
use ed25519_dalek::{Signer, SigningKey};
use remit_types::strkey::{decode_check, PAYLOAD_SIZE};
use remit_types::{AccountId, VersionByte};

pub trait TransactionSigner: Send + Sync {
    /// Account whose key produces the signatures.
    fn account_id(&self) -> AccountId;

    /// Sign a 32-byte transaction hash.
    fn sign_hash(&self, hash: &[u8; 32]) -> Result<DecoratedSignature, TxError>;
}

/// In-memory ed25519 key pair.
#[derive(Debug)]
pub struct KeyPairSigner {
    key: SigningKey,
}

impl KeyPairSigner {
    pub fn from_seed(seed: &[u8; PAYLOAD_SIZE]) -> Self {
        Self {
            key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse an 'S...' seed string.
    pub fn from_secret_seed(seed: &str) -> Result<Self, TxError> {
        let bytes = decode_check(VersionByte::Seed, seed)?;
        Ok(Self::from_seed(&bytes))
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }
}

impl TransactionSigner for KeyPairSigner {
    fn account_id(&self) -> AccountId {
        AccountId::from_bytes(self.public_key())
    }

    fn sign_hash(&self, hash: &[u8; 32]) -> Result<DecoratedSignature, TxError> {
        let public = self.public_key();
        let mut hint = [0u8; 4];
        hint.copy_from_slice(&public[28..]);
        Ok(DecoratedSignature {
            hint,
            signature: self.key.sign(hash).to_bytes().to_vec(),
        })
    }
}

impl TransactionEnvelope {
    /// Hash the transaction and append the signer's signature.
    pub fn sign(&mut self, signer: &dyn TransactionSigner) -> Result<(), TxError> {
        let hash = self.hash()?;
        let signature = signer.sign_hash(&hash)?;
        self.signatures.push(signature);
        Ok(())
    }
}
