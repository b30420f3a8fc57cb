//! Passenger side of the escrow: premiums in, payouts out.
//!
//! Premiums move straight into the data contract, which holds the pool and
//! pays credits back out on withdrawal. When a flight resolves LATE_AIRLINE
//! the first batch of insurees is credited with the resolution; the rest are
//! credited by later `credit_insurees` calls from anyone, or by each
//! passenger claiming their own policy.

use soroban_sdk::{token, Address, Env};

use crate::config::{
    CREDIT_BATCH_SIZE, MAX_INSURANCE_AMOUNT, STATUS_CODE_LATE_AIRLINE, STATUS_CODE_UNKNOWN,
};
use crate::error::Error;
use crate::ledger::{self, FlightKey, Insurance, LedgerClient};
use crate::storage;

pub fn purchase_insurance(
    env: &Env,
    passenger: Address,
    key: FlightKey,
    amount: i128,
) -> Result<Insurance, Error> {
    let ledger = ledger::operational(env)?;
    passenger.require_auth();

    let flight = ledger.get_flight(&key).ok_or(Error::FlightNotFound)?;
    if !flight.is_registered {
        return Err(Error::FlightNotFound);
    }
    if flight.status_code != STATUS_CODE_UNKNOWN {
        return Err(Error::FlightAlreadyResolved);
    }
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if amount > MAX_INSURANCE_AMOUNT {
        return Err(Error::InsuranceCapExceeded);
    }
    if ledger.get_insurance(&key, &passenger).is_some() {
        return Err(Error::InsuranceAlreadyPurchased);
    }

    let token = storage::token(env).ok_or(Error::NotInitialized)?;
    token::Client::new(env, &token).transfer(&passenger, &ledger.address, &amount);

    Ok(ledger.buy(&env.current_contract_address(), &key, &passenger, &amount))
}

/// Withdraw the passenger's whole credit. Returns the amount paid.
pub fn charge_insurance(env: &Env, passenger: Address) -> Result<i128, Error> {
    let ledger = ledger::operational(env)?;
    passenger.require_auth();

    if ledger.get_credit(&passenger) <= 0 {
        return Err(Error::NothingToWithdraw);
    }
    Ok(ledger.pay(&env.current_contract_address(), &passenger))
}

/// Credit the next batch of insurees on a flight that resolved LATE_AIRLINE.
pub fn credit_insurees(env: &Env, caller: Address, key: FlightKey) -> Result<i128, Error> {
    let ledger = ledger::operational(env)?;
    caller.require_auth();
    require_payout(&ledger, &key)?;

    Ok(ledger.credit_insurees(&env.current_contract_address(), &key, &CREDIT_BATCH_SIZE))
}

/// Credit the passenger's own policy without waiting for the batch to reach it.
pub fn claim_insurance(env: &Env, passenger: Address, key: FlightKey) -> Result<i128, Error> {
    let ledger = ledger::operational(env)?;
    passenger.require_auth();
    require_payout(&ledger, &key)?;

    let insurance = ledger
        .get_insurance(&key, &passenger)
        .ok_or(Error::InsuranceNotFound)?;
    if insurance.paid {
        return Err(Error::InsuranceAlreadyCredited);
    }
    Ok(ledger.credit_insuree(&env.current_contract_address(), &key, &passenger))
}

fn require_payout(ledger: &LedgerClient, key: &FlightKey) -> Result<(), Error> {
    let flight = ledger.get_flight(key).ok_or(Error::FlightNotFound)?;
    if flight.status_code != STATUS_CODE_LATE_AIRLINE {
        return Err(Error::PayoutNotQualified);
    }
    Ok(())
}
