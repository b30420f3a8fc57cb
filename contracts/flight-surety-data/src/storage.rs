use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Airline, Flight, FlightKey, Insurance};

// ~1 day / ~30 days at 5s ledgers
const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 518_400;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 17_280;
const PERSISTENT_BUMP_AMOUNT: u32 = 518_400;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Token,
    Operational,
    RegisteredCount,
    AuthorizedCaller(Address),
    Airline(Address),
    Vote(Address, Address),
    Flight(FlightKey),
    Insurance(FlightKey, Address),
    InsureeCount(FlightKey),
    Insuree(FlightKey, u32),
    CreditCursor(FlightKey),
    Credit(Address),
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

// -- instance ------------------------------------------------------------

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Token)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
}

pub fn is_operational(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Operational)
        .unwrap_or(false)
}

pub fn set_operational(env: &Env, mode: bool) {
    env.storage().instance().set(&DataKey::Operational, &mode);
}

pub fn registered_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::RegisteredCount)
        .unwrap_or(0)
}

pub fn set_registered_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::RegisteredCount, &count);
}

pub fn is_authorized(env: &Env, contract: &Address) -> bool {
    env.storage()
        .instance()
        .has(&DataKey::AuthorizedCaller(contract.clone()))
}

pub fn set_authorized(env: &Env, contract: &Address, authorized: bool) {
    let key = DataKey::AuthorizedCaller(contract.clone());
    if authorized {
        env.storage().instance().set(&key, &true);
    } else {
        env.storage().instance().remove(&key);
    }
}

// -- airlines --------------------------------------------------------------

pub fn airline(env: &Env, airline: &Address) -> Option<Airline> {
    env.storage()
        .persistent()
        .get(&DataKey::Airline(airline.clone()))
}

pub fn set_airline(env: &Env, airline: &Address, record: &Airline) {
    persist(env, &DataKey::Airline(airline.clone()), record);
}

pub fn has_voted(env: &Env, nominee: &Address, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Vote(nominee.clone(), voter.clone()))
}

pub fn record_vote(env: &Env, nominee: &Address, voter: &Address) {
    persist(env, &DataKey::Vote(nominee.clone(), voter.clone()), &true);
}

// -- flights ---------------------------------------------------------------

pub fn flight(env: &Env, key: &FlightKey) -> Option<Flight> {
    env.storage()
        .persistent()
        .get(&DataKey::Flight(key.clone()))
}

pub fn set_flight(env: &Env, key: &FlightKey, flight: &Flight) {
    persist(env, &DataKey::Flight(key.clone()), flight);
}

// -- insurance -------------------------------------------------------------

pub fn insurance(env: &Env, key: &FlightKey, passenger: &Address) -> Option<Insurance> {
    env.storage()
        .persistent()
        .get(&DataKey::Insurance(key.clone(), passenger.clone()))
}

pub fn set_insurance(env: &Env, key: &FlightKey, insurance: &Insurance) {
    persist(
        env,
        &DataKey::Insurance(key.clone(), insurance.passenger.clone()),
        insurance,
    );
}

/// Number of passengers insured on the flight, in purchase order.
pub fn insuree_count(env: &Env, key: &FlightKey) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::InsureeCount(key.clone()))
        .unwrap_or(0)
}

pub fn insuree(env: &Env, key: &FlightKey, position: u32) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Insuree(key.clone(), position))
}

pub fn push_insuree(env: &Env, key: &FlightKey, passenger: &Address) {
    let position = insuree_count(env, key);
    persist(env, &DataKey::Insuree(key.clone(), position), passenger);
    persist(env, &DataKey::InsureeCount(key.clone()), &(position + 1));
}

/// Position of the first insuree not yet visited by batch crediting.
pub fn credit_cursor(env: &Env, key: &FlightKey) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::CreditCursor(key.clone()))
        .unwrap_or(0)
}

pub fn set_credit_cursor(env: &Env, key: &FlightKey, position: u32) {
    persist(env, &DataKey::CreditCursor(key.clone()), &position);
}

pub fn credit(env: &Env, passenger: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Credit(passenger.clone()))
        .unwrap_or(0)
}

pub fn set_credit(env: &Env, passenger: &Address, amount: i128) {
    persist(env, &DataKey::Credit(passenger.clone()), &amount);
}
