//! Client side of the flight surety data contract.
//!
//! The record types are local mirrors of the data contract's definitions
//! for cross-contract deserialization. Field names and types must match the
//! data contract exactly.

use soroban_sdk::{contractclient, contracttype, Address, Env, Symbol};

use crate::error::Error;
use crate::storage;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Airline {
    pub is_registered: bool,
    pub required_votes: u32,
    pub received_votes: u32,
    pub funding_amount: i128,
}

impl Airline {
    pub fn awaiting_votes(&self) -> bool {
        self.required_votes > self.received_votes
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlightKey {
    pub airline: Address,
    pub flight: Symbol,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Flight {
    pub is_registered: bool,
    pub status_code: u32,
    pub airline: Address,
    pub flight: Symbol,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Insurance {
    pub passenger: Address,
    pub amount: i128,
    pub paid: bool,
}

#[contractclient(name = "LedgerClient")]
pub trait Ledger {
    fn is_operational(env: Env) -> bool;

    fn get_airline(env: Env, airline: Address) -> Option<Airline>;
    fn registered_airline_count(env: Env) -> u32;
    fn has_voted(env: Env, nominee: Address, voter: Address) -> bool;
    fn register_airline(env: Env, caller: Address, nominee: Address, required_votes: u32)
        -> Airline;
    fn vote_airline(env: Env, caller: Address, voter: Address, nominee: Address) -> Airline;
    fn fund_airline(env: Env, caller: Address, airline: Address, amount: i128) -> Airline;

    fn get_flight(env: Env, key: FlightKey) -> Option<Flight>;
    fn register_flight(
        env: Env,
        caller: Address,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Flight;
    fn update_flight_status(env: Env, caller: Address, key: FlightKey, status_code: u32) -> bool;

    fn get_insurance(env: Env, key: FlightKey, passenger: Address) -> Option<Insurance>;
    fn buy(env: Env, caller: Address, key: FlightKey, passenger: Address, amount: i128)
        -> Insurance;
    fn credit_insurees(env: Env, caller: Address, key: FlightKey, limit: u32) -> i128;
    fn credit_insuree(env: Env, caller: Address, key: FlightKey, passenger: Address) -> i128;
    fn pending_insurees(env: Env, key: FlightKey) -> u32;
    fn get_credit(env: Env, passenger: Address) -> i128;
    fn pay(env: Env, caller: Address, passenger: Address) -> i128;
}

/// Client for the wired data contract, provided the system is running.
pub fn operational(env: &Env) -> Result<LedgerClient<'_>, Error> {
    let address = storage::ledger(env).ok_or(Error::NotInitialized)?;
    let client = LedgerClient::new(env, &address);
    if !client.is_operational() {
        return Err(Error::NotOperational);
    }
    Ok(client)
}
