//! Flight Surety Data Contract
//!
//! Ledger of record for the flight insurance system: airlines and their
//! admission votes, registered flights and their resolved status, insurance
//! purchases, credited payouts and the value pool backing them.
//!
//! The ledger does not decide who may do what. Every mutating entry point is
//! reserved for contracts the owner has authorized (the application
//! contract), which enforce the business rules before writing here.

#![no_std]

mod error;
mod events;
mod storage;
mod types;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test;

pub use error::Error;
pub use types::{
    payout_for, Airline, Flight, FlightKey, Insurance, STATUS_CODE_LATE_AIRLINE,
    STATUS_CODE_UNKNOWN,
};

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Symbol};

#[contract]
pub struct FlightSuretyData;

#[contractimpl]
impl FlightSuretyData {
    /// Initialize the ledger.
    ///
    /// # Arguments
    /// * `owner` - Account allowed to pause the system and authorize callers
    /// * `first_airline` - Airline registered at deployment, without votes
    /// * `token` - Asset used for funding, premiums and payouts
    pub fn initialize(
        env: Env,
        owner: Address,
        first_airline: Address,
        token: Address,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        storage::set_owner(&env, &owner);
        storage::set_token(&env, &token);
        storage::set_operational(&env, true);

        let record = Airline {
            is_registered: true,
            required_votes: 0,
            received_votes: 0,
            funding_amount: 0,
        };
        storage::set_airline(&env, &first_airline, &record);
        storage::set_registered_count(&env, 1);
        storage::extend_instance_ttl(&env);

        events::initialized(&env, &owner, &first_airline);
        events::airline_registered(&env, &first_airline, &record);

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Administration
    // ---------------------------------------------------------------------

    pub fn is_operational(env: Env) -> bool {
        storage::is_operational(&env)
    }

    /// Pause or resume every state-mutating operation (owner only).
    pub fn set_operating_status(env: Env, mode: bool) -> Result<(), Error> {
        let owner = storage::owner(&env).ok_or(Error::NotInitialized)?;
        owner.require_auth();

        storage::set_operational(&env, mode);
        storage::extend_instance_ttl(&env);
        events::operating_status(&env, mode);

        Ok(())
    }

    /// Allow `contract` to call the privileged ledger operations (owner only).
    pub fn authorize_caller(env: Env, contract: Address) -> Result<(), Error> {
        Self::require_operational(&env)?;
        let owner = storage::owner(&env).ok_or(Error::NotInitialized)?;
        owner.require_auth();

        if storage::is_authorized(&env, &contract) {
            return Err(Error::CallerAlreadyAuthorized);
        }

        storage::set_authorized(&env, &contract, true);
        storage::extend_instance_ttl(&env);
        events::caller_authorized(&env, &contract, true);

        Ok(())
    }

    pub fn deauthorize_caller(env: Env, contract: Address) -> Result<(), Error> {
        Self::require_operational(&env)?;
        let owner = storage::owner(&env).ok_or(Error::NotInitialized)?;
        owner.require_auth();

        if !storage::is_authorized(&env, &contract) {
            return Err(Error::CallerNotAuthorized);
        }

        storage::set_authorized(&env, &contract, false);
        events::caller_authorized(&env, &contract, false);

        Ok(())
    }

    pub fn is_authorized_caller(env: Env, contract: Address) -> bool {
        storage::is_authorized(&env, &contract)
    }

    pub fn get_owner(env: Env) -> Option<Address> {
        storage::owner(&env)
    }

    pub fn get_token(env: Env) -> Option<Address> {
        storage::token(&env)
    }

    // ---------------------------------------------------------------------
    // Airlines
    // ---------------------------------------------------------------------

    /// Record a new airline. A nominee created with `required_votes == 0`
    /// is registered immediately.
    pub fn register_airline(
        env: Env,
        caller: Address,
        nominee: Address,
        required_votes: u32,
    ) -> Result<Airline, Error> {
        Self::require_authorized(&env, &caller)?;

        if storage::airline(&env, &nominee).is_some() {
            return Err(Error::AirlineAlreadyExists);
        }

        let record = Airline {
            is_registered: required_votes == 0,
            required_votes,
            received_votes: 0,
            funding_amount: 0,
        };
        storage::set_airline(&env, &nominee, &record);
        if record.is_registered {
            storage::set_registered_count(&env, storage::registered_count(&env) + 1);
        }

        events::airline_registered(&env, &nominee, &record);
        Ok(record)
    }

    /// Count one vote from `voter` for a pending nominee.
    ///
    /// The nominee becomes registered on the vote that makes
    /// `received_votes == required_votes`; it never receives more.
    pub fn vote_airline(
        env: Env,
        caller: Address,
        voter: Address,
        nominee: Address,
    ) -> Result<Airline, Error> {
        Self::require_authorized(&env, &caller)?;

        let mut record = storage::airline(&env, &nominee).ok_or(Error::AirlineNotFound)?;
        if record.is_registered {
            return Err(Error::AirlineAlreadyRegistered);
        }
        if storage::has_voted(&env, &nominee, &voter) {
            return Err(Error::DuplicateVote);
        }

        storage::record_vote(&env, &nominee, &voter);
        record.received_votes += 1;
        if record.received_votes >= record.required_votes {
            record.is_registered = true;
            storage::set_registered_count(&env, storage::registered_count(&env) + 1);
            log!(&env, "airline admitted by consensus", nominee, record.received_votes);
        }
        storage::set_airline(&env, &nominee, &record);

        events::airline_voted(&env, &nominee, &voter, &record);
        Ok(record)
    }

    /// Book `amount` of funding the caller has already moved into this
    /// contract on behalf of `airline`.
    pub fn fund_airline(
        env: Env,
        caller: Address,
        airline: Address,
        amount: i128,
    ) -> Result<Airline, Error> {
        Self::require_authorized(&env, &caller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let mut record = storage::airline(&env, &airline).ok_or(Error::AirlineNotFound)?;
        if !record.is_registered {
            return Err(Error::AirlineNotRegistered);
        }

        record.funding_amount += amount;
        storage::set_airline(&env, &airline, &record);

        events::airline_funded(&env, &airline, amount, record.funding_amount);
        Ok(record)
    }

    pub fn get_airline(env: Env, airline: Address) -> Option<Airline> {
        storage::airline(&env, &airline)
    }

    /// Whether `airline` exists and is registered.
    pub fn is_airline(env: Env, airline: Address) -> bool {
        storage::airline(&env, &airline)
            .map(|record| record.is_registered)
            .unwrap_or(false)
    }

    pub fn registered_airline_count(env: Env) -> u32 {
        storage::registered_count(&env)
    }

    pub fn has_voted(env: Env, nominee: Address, voter: Address) -> bool {
        storage::has_voted(&env, &nominee, &voter)
    }

    // ---------------------------------------------------------------------
    // Flights
    // ---------------------------------------------------------------------

    pub fn register_flight(
        env: Env,
        caller: Address,
        airline: Address,
        flight: Symbol,
        timestamp: u64,
    ) -> Result<Flight, Error> {
        Self::require_authorized(&env, &caller)?;

        let registered = storage::airline(&env, &airline)
            .map(|record| record.is_registered)
            .unwrap_or(false);
        if !registered {
            return Err(Error::AirlineNotRegistered);
        }

        let key = FlightKey {
            airline: airline.clone(),
            flight: flight.clone(),
            timestamp,
        };
        if storage::flight(&env, &key).is_some() {
            return Err(Error::FlightAlreadyRegistered);
        }

        let record = Flight {
            is_registered: true,
            status_code: STATUS_CODE_UNKNOWN,
            airline,
            flight,
            timestamp,
        };
        storage::set_flight(&env, &key, &record);

        events::flight_registered(&env, &key);
        Ok(record)
    }

    /// Write the consensus status of a flight.
    ///
    /// Returns `false` without touching state when the flight already holds
    /// a non-UNKNOWN status, or when `status_code` is UNKNOWN itself.
    pub fn update_flight_status(
        env: Env,
        caller: Address,
        key: FlightKey,
        status_code: u32,
    ) -> Result<bool, Error> {
        Self::require_authorized(&env, &caller)?;

        let mut record = storage::flight(&env, &key).ok_or(Error::FlightNotFound)?;
        if record.is_resolved() {
            log!(&env, "flight status already resolved", key.flight, record.status_code);
            return Ok(false);
        }
        if status_code == STATUS_CODE_UNKNOWN {
            return Ok(false);
        }

        record.status_code = status_code;
        storage::set_flight(&env, &key, &record);

        events::flight_status(&env, &key, status_code);
        Ok(true)
    }

    pub fn get_flight(env: Env, key: FlightKey) -> Option<Flight> {
        storage::flight(&env, &key)
    }

    // ---------------------------------------------------------------------
    // Insurance
    // ---------------------------------------------------------------------

    /// Record a purchase whose premium the caller has already moved into
    /// this contract.
    pub fn buy(
        env: Env,
        caller: Address,
        key: FlightKey,
        passenger: Address,
        amount: i128,
    ) -> Result<Insurance, Error> {
        Self::require_authorized(&env, &caller)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let flight = storage::flight(&env, &key).ok_or(Error::FlightNotFound)?;
        if flight.is_resolved() {
            return Err(Error::FlightAlreadyResolved);
        }
        if storage::insurance(&env, &key, &passenger).is_some() {
            return Err(Error::InsuranceAlreadyPurchased);
        }

        let insurance = Insurance {
            passenger: passenger.clone(),
            amount,
            paid: false,
        };
        storage::set_insurance(&env, &key, &insurance);

        storage::push_insuree(&env, &key, &passenger);

        events::insurance_bought(&env, &key, &insurance);
        Ok(insurance)
    }

    /// Credit the next `limit` insurees of a flight that resolved
    /// LATE_AIRLINE, in purchase order.
    ///
    /// Progress is kept per flight, so successive calls walk the whole list
    /// once. Records already paid through `credit_insuree` are skipped.
    /// Returns the total credited by this call.
    pub fn credit_insurees(
        env: Env,
        caller: Address,
        key: FlightKey,
        limit: u32,
    ) -> Result<i128, Error> {
        Self::require_authorized(&env, &caller)?;
        Self::require_payout(&env, &key)?;

        let start = storage::credit_cursor(&env, &key);
        let end = storage::insuree_count(&env, &key).min(start.saturating_add(limit));

        let mut total: i128 = 0;
        for position in start..end {
            let Some(passenger) = storage::insuree(&env, &key, position) else {
                continue;
            };
            if let Some(insurance) = storage::insurance(&env, &key, &passenger) {
                total += Self::credit(&env, &key, insurance);
            }
        }
        if end > start {
            storage::set_credit_cursor(&env, &key, end);
        }

        Ok(total)
    }

    /// Credit a single passenger's policy on a flight that resolved
    /// LATE_AIRLINE. Returns 0 when the policy was already paid.
    pub fn credit_insuree(
        env: Env,
        caller: Address,
        key: FlightKey,
        passenger: Address,
    ) -> Result<i128, Error> {
        Self::require_authorized(&env, &caller)?;
        Self::require_payout(&env, &key)?;

        let insurance =
            storage::insurance(&env, &key, &passenger).ok_or(Error::InsuranceNotFound)?;
        Ok(Self::credit(&env, &key, insurance))
    }

    /// Insurees that batch crediting has not reached yet.
    pub fn pending_insurees(env: Env, key: FlightKey) -> u32 {
        storage::insuree_count(&env, &key).saturating_sub(storage::credit_cursor(&env, &key))
    }

    /// Transfer the passenger's whole credit out of the pool.
    ///
    /// The credit is zeroed before the transfer; if the transfer fails the
    /// call reverts and the credit is left as it was.
    pub fn pay(env: Env, caller: Address, passenger: Address) -> Result<i128, Error> {
        Self::require_authorized(&env, &caller)?;

        let amount = storage::credit(&env, &passenger);
        if amount <= 0 {
            return Err(Error::NoCredit);
        }
        let token = storage::token(&env).ok_or(Error::NotInitialized)?;

        storage::set_credit(&env, &passenger, 0);
        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &passenger,
            &amount,
        );

        events::insuree_paid(&env, &passenger, amount);
        Ok(amount)
    }

    pub fn get_insurance(env: Env, key: FlightKey, passenger: Address) -> Option<Insurance> {
        storage::insurance(&env, &key, &passenger)
    }

    pub fn insuree_count(env: Env, key: FlightKey) -> u32 {
        storage::insuree_count(&env, &key)
    }

    pub fn get_insuree(env: Env, key: FlightKey, position: u32) -> Option<Address> {
        storage::insuree(&env, &key, position)
    }

    pub fn get_credit(env: Env, passenger: Address) -> i128 {
        storage::credit(&env, &passenger)
    }

    // Helper functions

    fn require_operational(env: &Env) -> Result<(), Error> {
        if !storage::is_initialized(env) {
            return Err(Error::NotInitialized);
        }
        if !storage::is_operational(env) {
            return Err(Error::NotOperational);
        }
        Ok(())
    }

    fn require_payout(env: &Env, key: &FlightKey) -> Result<(), Error> {
        let flight = storage::flight(env, key).ok_or(Error::FlightNotFound)?;
        if flight.status_code != STATUS_CODE_LATE_AIRLINE {
            return Err(Error::PayoutNotQualified);
        }
        Ok(())
    }

    /// Flip `paid` and add the payout to the passenger's credit.
    fn credit(env: &Env, key: &FlightKey, mut insurance: Insurance) -> i128 {
        if insurance.paid {
            return 0;
        }
        let amount = payout_for(insurance.amount);
        insurance.paid = true;
        storage::set_insurance(env, key, &insurance);

        let passenger = insurance.passenger;
        storage::set_credit(env, &passenger, storage::credit(env, &passenger) + amount);
        events::insuree_credited(env, &passenger, amount);
        amount
    }

    fn require_authorized(env: &Env, caller: &Address) -> Result<(), Error> {
        Self::require_operational(env)?;
        if !storage::is_authorized(env, caller) {
            return Err(Error::CallerNotAuthorized);
        }
        caller.require_auth();
        storage::extend_instance_ttl(env);
        Ok(())
    }
}
