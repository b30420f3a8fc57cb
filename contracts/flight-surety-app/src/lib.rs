//! Flight Surety Application Contract
//!
//! Business rules of the flight insurance system. Airlines are admitted by
//! multi-party consensus and must fund the pool before they take part;
//! passengers insure registered flights; a pool of fee-paying oracles
//! settles flight status by quorum, and an airline-caused delay credits
//! every insuree with 1.5x the premium.
//!
//! All records and the value pool live in the data contract. This contract
//! must be authorized there before any state-changing call will succeed.

#![no_std]

mod config;
mod error;
mod events;
mod flights;
mod governance;
mod insurance;
mod ledger;
mod oracles;
mod random;
mod storage;

#[cfg(test)]
extern crate std;


pub use config::*;
pub use error::{Error, ErrorKind};
pub use ledger::{Airline, Flight, FlightKey, Insurance};
pub use oracles::{Oracle, OracleRequest, RequestKey};

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Vec};

use random::LedgerEntropy;

#[contract]
pub struct FlightSuretyApp;

#[contractimpl]
impl FlightSuretyApp {
    /// Wire the contract to its data contract and value token.
    ///
    /// # Arguments
    /// * `owner` - Account allowed to withdraw collected oracle fees
    /// * `data_contract` - Address of the deployed `FlightSuretyData`
    /// * `token` - Asset used for funding, premiums, fees and payouts
    pub fn initialize(
        env: Env,
        owner: Address,
        data_contract: Address,
        token: Address,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        storage::set_wiring(&env, &owner, &data_contract, &token);
        storage::extend_instance_ttl(&env);

        events::initialized(&env, &owner, &data_contract, &token);
        Ok(())
    }

    /// Mirrors the data contract's operating status.
    pub fn is_operational(env: Env) -> bool {
        ledger::operational(&env).is_ok()
    }

    // ---------------------------------------------------------------------
    // Airlines
    // ---------------------------------------------------------------------

    /// Nominate `nominee`. The caller must be a funded airline.
    ///
    /// While fewer than four airlines are registered the nominee is admitted
    /// at once; afterwards it waits for votes from half of them.
    pub fn register_airline(env: Env, caller: Address, nominee: Address) -> Result<Airline, Error> {
        storage::extend_instance_ttl(&env);
        governance::register_airline(&env, caller, nominee)
    }

    pub fn vote_for_airline(env: Env, caller: Address, nominee: Address) -> Result<Airline, Error> {
        storage::extend_instance_ttl(&env);
        governance::vote_for_airline(&env, caller, nominee)
    }

    pub fn provide_funding(env: Env, caller: Address, amount: i128) -> Result<Airline, Error> {
        storage::extend_instance_ttl(&env);
        governance::provide_funding(&env, caller, amount)
    }

    pub fn get_airline(env: Env, airline: Address) -> Result<Option<Airline>, Error> {
        let ledger = Self::ledger_client(&env)?;
        Ok(ledger.get_airline(&airline))
    }

    pub fn is_airline_funded(env: Env, airline: Address) -> Result<bool, Error> {
        let ledger = Self::ledger_client(&env)?;
        Ok(ledger
            .get_airline(&airline)
            .map(|record| governance::is_funded(&record))
            .unwrap_or(false))
    }

    pub fn registered_airline_count(env: Env) -> Result<u32, Error> {
        Ok(Self::ledger_client(&env)?.registered_airline_count())
    }

    // ---------------------------------------------------------------------
    // Flights
    // ---------------------------------------------------------------------

    pub fn register_flight(
        env: Env,
        caller: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Result<Flight, Error> {
        storage::extend_instance_ttl(&env);
        flights::register_flight(&env, caller, flight, timestamp)
    }

    pub fn get_flight(
        env: Env,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Result<Option<Flight>, Error> {
        let ledger = Self::ledger_client(&env)?;
        Ok(ledger.get_flight(&oracles::flight_key(airline, flight, timestamp)))
    }

    // ---------------------------------------------------------------------
    // Insurance
    // ---------------------------------------------------------------------

    /// Insure `passenger` on a registered, unresolved flight for at most one unit.
    pub fn purchase_insurance(
        env: Env,
        passenger: Address,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
        amount: i128,
    ) -> Result<Insurance, Error> {
        storage::extend_instance_ttl(&env);
        let key = oracles::flight_key(airline, flight, timestamp);
        insurance::purchase_insurance(&env, passenger, key, amount)
    }

    pub fn get_insurance(
        env: Env,
        passenger: Address,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Result<Option<Insurance>, Error> {
        let ledger = Self::ledger_client(&env)?;
        Ok(ledger.get_insurance(&oracles::flight_key(airline, flight, timestamp), &passenger))
    }

    pub fn get_credit(env: Env, passenger: Address) -> Result<i128, Error> {
        Ok(Self::ledger_client(&env)?.get_credit(&passenger))
    }

    /// Pay out the passenger's accumulated credit.
    pub fn charge_insurance(env: Env, passenger: Address) -> Result<i128, Error> {
        storage::extend_instance_ttl(&env);
        insurance::charge_insurance(&env, passenger)
    }

    /// Credit the passenger's own policy on a flight delayed by the airline.
    pub fn claim_insurance(
        env: Env,
        passenger: Address,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Result<i128, Error> {
        storage::extend_instance_ttl(&env);
        let key = oracles::flight_key(airline, flight, timestamp);
        insurance::claim_insurance(&env, passenger, key)
    }

    /// Credit the next batch of insurees. Anyone may push the payout along.
    pub fn credit_insurees(
        env: Env,
        caller: Address,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Result<i128, Error> {
        storage::extend_instance_ttl(&env);
        let key = oracles::flight_key(airline, flight, timestamp);
        insurance::credit_insurees(&env, caller, key)
    }

    pub fn pending_insurees(
        env: Env,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Result<u32, Error> {
        let ledger = Self::ledger_client(&env)?;
        Ok(ledger.pending_insurees(&oracles::flight_key(airline, flight, timestamp)))
    }

    // ---------------------------------------------------------------------
    // Oracles
    // ---------------------------------------------------------------------

    /// Pay `fee` (at least one unit) and receive three distinct indices.
    pub fn register_oracle(env: Env, caller: Address, fee: i128) -> Result<Vec<u32>, Error> {
        storage::extend_instance_ttl(&env);
        let mut source = LedgerEntropy::new(&env, &caller);
        oracles::register_oracle(&env, caller, fee, &mut source)
    }

    pub fn get_my_indexes(env: Env, caller: Address) -> Result<Vec<u32>, Error> {
        oracles::indexes_of(&env, &caller)
    }

    pub fn is_oracle(env: Env, oracle: Address) -> bool {
        storage::oracle(&env, &oracle).is_some()
    }

    /// Ask the oracles for a flight's status. Returns the drawn index.
    pub fn fetch_flight_status(
        env: Env,
        caller: Address,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Result<u32, Error> {
        storage::extend_instance_ttl(&env);
        let mut source = LedgerEntropy::new(&env, &caller);
        let key = oracles::flight_key(airline, flight, timestamp);
        oracles::fetch_flight_status(&env, caller, key, &mut source)
    }

    pub fn submit_oracle_response(
        env: Env,
        caller: Address,
        index: u32,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
        status_code: u32,
    ) -> Result<(), Error> {
        storage::extend_instance_ttl(&env);
        let key = oracles::flight_key(airline, flight, timestamp);
        oracles::submit_oracle_response(&env, caller, index, key, status_code)
    }

    pub fn get_request(
        env: Env,
        index: u32,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Option<OracleRequest> {
        oracles::get_request(&env, index, oracles::flight_key(airline, flight, timestamp))
    }

    /// Number of oracles that reported `status_code` for the request.
    pub fn get_response_count(
        env: Env,
        index: u32,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
        status_code: u32,
    ) -> u32 {
        oracles::response_count(
            &env,
            index,
            oracles::flight_key(airline, flight, timestamp),
            status_code,
        )
    }

    // ---------------------------------------------------------------------
    // Administration
    // ---------------------------------------------------------------------

    /// Send collected oracle registration fees to `to` (owner only).
    pub fn withdraw_fees(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        ledger::operational(&env)?;
        let owner = storage::owner(&env).ok_or(Error::NotInitialized)?;
        owner.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let token_address = storage::token(&env).ok_or(Error::NotInitialized)?;
        let token = token::Client::new(&env, &token_address);
        let this = env.current_contract_address();
        if token.balance(&this) < amount {
            return Err(Error::InsufficientFees);
        }

        token.transfer(&this, &to, &amount);
        storage::extend_instance_ttl(&env);
        events::fees_withdrawn(&env, &to, amount);

        Ok(())
    }

    pub fn get_owner(env: Env) -> Option<Address> {
        storage::owner(&env)
    }

    pub fn get_data_contract(env: Env) -> Option<Address> {
        storage::ledger(&env)
    }

    fn ledger_client(env: &Env) -> Result<ledger::LedgerClient<'_>, Error> {
        let address = storage::ledger(env).ok_or(Error::NotInitialized)?;
        Ok(ledger::LedgerClient::new(env, &address))
    }
}
