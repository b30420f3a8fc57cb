use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::oracles::{Oracle, OracleRequest, RequestKey};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 518_400;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 17_280;
const PERSISTENT_BUMP_AMOUNT: u32 = 518_400;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Ledger,
    Token,
    Nonce,
    Oracle(Address),
    Request(RequestKey),
    Responses(RequestKey, u32),
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn persist<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    let storage = env.storage().persistent();
    storage.set(key, value);
    storage.extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn ledger(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Ledger)
}

pub fn token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Token)
}

pub fn set_wiring(env: &Env, owner: &Address, ledger: &Address, token: &Address) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Owner, owner);
    instance.set(&DataKey::Ledger, ledger);
    instance.set(&DataKey::Token, token);
}

/// Returns the current nonce and advances it.
pub fn next_nonce(env: &Env) -> u64 {
    let nonce: u64 = env.storage().instance().get(&DataKey::Nonce).unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::Nonce, &nonce.wrapping_add(1));
    nonce
}

pub fn oracle(env: &Env, oracle: &Address) -> Option<Oracle> {
    env.storage()
        .persistent()
        .get(&DataKey::Oracle(oracle.clone()))
}

pub fn set_oracle(env: &Env, address: &Address, oracle: &Oracle) {
    persist(env, &DataKey::Oracle(address.clone()), oracle);
}

pub fn request(env: &Env, key: &RequestKey) -> Option<OracleRequest> {
    env.storage()
        .persistent()
        .get(&DataKey::Request(key.clone()))
}

pub fn set_request(env: &Env, key: &RequestKey, request: &OracleRequest) {
    persist(env, &DataKey::Request(key.clone()), request);
}

pub fn responses(env: &Env, key: &RequestKey, status_code: u32) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Responses(key.clone(), status_code))
        .unwrap_or(Vec::new(env))
}

pub fn set_responses(env: &Env, key: &RequestKey, status_code: u32, oracles: &Vec<Address>) {
    persist(env, &DataKey::Responses(key.clone(), status_code), oracles);
}
