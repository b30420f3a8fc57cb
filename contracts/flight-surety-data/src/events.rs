//! Events published by the ledger. Topics are single short symbols so
//! indexers can filter on the first topic alone.

use soroban_sdk::{symbol_short, Address, Env};

use crate::types::{Airline, FlightKey, Insurance};

pub(crate) fn initialized(env: &Env, owner: &Address, first_airline: &Address) {
    env.events()
        .publish((symbol_short!("init"),), (owner.clone(), first_airline.clone()));
}

pub(crate) fn operating_status(env: &Env, mode: bool) {
    env.events().publish((symbol_short!("op_stat"),), (mode,));
}

pub(crate) fn caller_authorized(env: &Env, contract: &Address, authorized: bool) {
    env.events()
        .publish((symbol_short!("auth_call"),), (contract.clone(), authorized));
}

pub(crate) fn airline_registered(env: &Env, airline: &Address, record: &Airline) {
    env.events().publish(
        (symbol_short!("air_reg"),),
        (airline.clone(), record.is_registered, record.required_votes),
    );
}

pub(crate) fn airline_voted(env: &Env, nominee: &Address, voter: &Address, record: &Airline) {
    env.events().publish(
        (symbol_short!("air_vote"),),
        (
            nominee.clone(),
            voter.clone(),
            record.received_votes,
            record.is_registered,
        ),
    );
}

pub(crate) fn airline_funded(env: &Env, airline: &Address, amount: i128, total: i128) {
    env.events()
        .publish((symbol_short!("air_fund"),), (airline.clone(), amount, total));
}

pub(crate) fn flight_registered(env: &Env, key: &FlightKey) {
    env.events().publish(
        (symbol_short!("flt_reg"),),
        (key.airline.clone(), key.flight.clone(), key.timestamp),
    );
}

pub(crate) fn flight_status(env: &Env, key: &FlightKey, status_code: u32) {
    env.events().publish(
        (symbol_short!("flt_stat"),),
        (key.airline.clone(), key.flight.clone(), key.timestamp, status_code),
    );
}

pub(crate) fn insurance_bought(env: &Env, key: &FlightKey, insurance: &Insurance) {
    env.events().publish(
        (symbol_short!("ins_buy"),),
        (
            key.airline.clone(),
            key.flight.clone(),
            key.timestamp,
            insurance.passenger.clone(),
            insurance.amount,
        ),
    );
}

pub(crate) fn insuree_credited(env: &Env, passenger: &Address, credit: i128) {
    env.events()
        .publish((symbol_short!("ins_cred"),), (passenger.clone(), credit));
}

pub(crate) fn insuree_paid(env: &Env, passenger: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("ins_pay"),), (passenger.clone(), amount));
}
