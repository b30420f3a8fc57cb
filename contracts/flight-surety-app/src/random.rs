//! Index selection for the oracle engine.
//!
//! The engine never reads entropy directly; it draws from an `IndexSource`.
//! Contract calls use `LedgerEntropy`, tests can substitute any sequence.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::config::ORACLE_INDEX_SPACE;
use crate::storage;

pub trait IndexSource {
    /// Next index in `0..ORACLE_INDEX_SPACE`.
    fn next_index(&mut self) -> u32;
}

/// Hash of the account, a contract-wide nonce and the ledger position.
///
/// Not predictable by the caller before the ledger closes, but fully
/// reproducible from the same account, nonce, sequence and timestamp.
pub struct LedgerEntropy<'a> {
    env: &'a Env,
    account: Address,
}

impl<'a> LedgerEntropy<'a> {
    pub fn new(env: &'a Env, account: &Address) -> Self {
        Self {
            env,
            account: account.clone(),
        }
    }
}

impl IndexSource for LedgerEntropy<'_> {
    fn next_index(&mut self) -> u32 {
        let nonce = storage::next_nonce(self.env);
        let ledger = self.env.ledger();

        let mut material: Bytes = self.account.clone().to_xdr(self.env);
        material.extend_from_array(&nonce.to_be_bytes());
        material.extend_from_array(&ledger.sequence().to_be_bytes());
        material.extend_from_array(&ledger.timestamp().to_be_bytes());

        let digest: BytesN<32> = self.env.crypto().sha256(&material).into();
        index_from_digest(&digest.to_array())
    }
}

fn index_from_digest(digest: &[u8; 32]) -> u32 {
    let word = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    word % ORACLE_INDEX_SPACE
}

/// Draw `count` distinct indices, discarding repeats.
pub fn distinct_indexes(env: &Env, source: &mut impl IndexSource, count: u32) -> Vec<u32> {
    let mut indexes = Vec::new(env);
    while indexes.len() < count {
        let candidate = source.next_index();
        if !indexes.iter().any(|index| index == candidate) {
            indexes.push_back(candidate);
        }
    }
    indexes
}
