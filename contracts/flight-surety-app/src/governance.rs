//! Airline admission and funding rules.
//!
//! The first four airlines are admitted by any funded airline. From then on
//! a nominee needs votes from half of the registered airlines (rounded up),
//! counted at nomination time, and may only fund itself once admitted.

use soroban_sdk::{log, token, Address, Env};

use crate::config::{DIRECT_REGISTRATION_LIMIT, MIN_AIRLINE_FUNDING};
use crate::error::Error;
use crate::ledger::{self, Airline, LedgerClient};
use crate::storage;

/// Votes a new nominee needs when `registered` airlines already exist.
pub fn required_votes_for(registered: u32) -> u32 {
    if registered < DIRECT_REGISTRATION_LIMIT {
        0
    } else {
        registered.div_ceil(2)
    }
}

pub fn is_funded(airline: &Airline) -> bool {
    airline.is_registered && airline.funding_amount >= MIN_AIRLINE_FUNDING
}

/// Fails unless `airline` is registered and has reached the minimum funding.
pub(crate) fn require_funded_airline(ledger: &LedgerClient, airline: &Address) -> Result<(), Error> {
    let record = ledger
        .get_airline(airline)
        .ok_or(Error::AirlineNotRegistered)?;
    if !record.is_registered {
        return Err(Error::AirlineNotRegistered);
    }
    if record.funding_amount < MIN_AIRLINE_FUNDING {
        return Err(Error::AirlineNotFunded);
    }
    Ok(())
}

pub fn register_airline(env: &Env, caller: Address, nominee: Address) -> Result<Airline, Error> {
    let ledger = ledger::operational(env)?;
    caller.require_auth();
    require_funded_airline(&ledger, &caller)?;

    if ledger.get_airline(&nominee).is_some() {
        return Err(Error::AirlineAlreadyExists);
    }

    let required_votes = required_votes_for(ledger.registered_airline_count());
    let record = ledger.register_airline(&env.current_contract_address(), &nominee, &required_votes);

    log!(env, "airline nominated", nominee, required_votes);
    Ok(record)
}

pub fn vote_for_airline(env: &Env, caller: Address, nominee: Address) -> Result<Airline, Error> {
    let ledger = ledger::operational(env)?;
    caller.require_auth();
    require_funded_airline(&ledger, &caller)?;

    let record = ledger.get_airline(&nominee).ok_or(Error::AirlineNotFound)?;
    if record.is_registered {
        return Err(Error::AirlineAlreadyRegistered);
    }
    if ledger.has_voted(&nominee, &caller) {
        return Err(Error::DuplicateVote);
    }

    Ok(ledger.vote_airline(&env.current_contract_address(), &caller, &nominee))
}

/// Move `amount` from the airline into the pool held by the data contract.
///
/// The first contribution must bring the airline to the minimum funding;
/// later top-ups may be any positive amount.
pub fn provide_funding(env: &Env, caller: Address, amount: i128) -> Result<Airline, Error> {
    let ledger = ledger::operational(env)?;
    caller.require_auth();

    let record = ledger
        .get_airline(&caller)
        .ok_or(Error::AirlineNotRegistered)?;
    if record.awaiting_votes() {
        return Err(Error::AwaitingConsensus);
    }
    if !record.is_registered {
        return Err(Error::AirlineNotRegistered);
    }
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if record.funding_amount.saturating_add(amount) < MIN_AIRLINE_FUNDING {
        return Err(Error::FundingBelowMinimum);
    }

    let token = storage::token(env).ok_or(Error::NotInitialized)?;
    token::Client::new(env, &token).transfer(&caller, &ledger.address, &amount);

    Ok(ledger.fund_airline(&env.current_contract_address(), &caller, &amount))
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_four_airlines_need_no_votes() {
        for registered in 0..DIRECT_REGISTRATION_LIMIT {
            assert_eq!(required_votes_for(registered), 0);
        }
        assert_eq!(required_votes_for(4), 2);
        assert_eq!(required_votes_for(5), 3);
        assert_eq!(required_votes_for(6), 3);
    }

    proptest! {
        #[test]
        fn prop_required_votes_is_half_rounded_up(registered in DIRECT_REGISTRATION_LIMIT..10_000u32) {
            let required = required_votes_for(registered);
            prop_assert!(required * 2 >= registered);
            prop_assert!(required * 2 <= registered + 1);
            prop_assert!(required <= registered);
        }
    }
}
