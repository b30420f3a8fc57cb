//! Events consumed by oracle relayers and the passenger front end.

use soroban_sdk::{symbol_short, Address, Env, Vec};

use crate::ledger::FlightKey;

pub(crate) fn initialized(env: &Env, owner: &Address, ledger: &Address, token: &Address) {
    env.events().publish(
        (symbol_short!("init"),),
        (owner.clone(), ledger.clone(), token.clone()),
    );
}

pub(crate) fn oracle_registered(env: &Env, oracle: &Address, indexes: &Vec<u32>) {
    env.events()
        .publish((symbol_short!("orc_reg"),), (oracle.clone(), indexes.clone()));
}

/// Relayers answer this with `submit_oracle_response` from every oracle
/// holding `index`.
pub(crate) fn oracle_request(env: &Env, index: u32, key: &FlightKey) {
    env.events().publish(
        (symbol_short!("orc_req"),),
        (index, key.airline.clone(), key.flight.clone(), key.timestamp),
    );
}

pub(crate) fn oracle_report(env: &Env, index: u32, key: &FlightKey, status_code: u32) {
    env.events().publish(
        (symbol_short!("orc_rep"),),
        (
            index,
            key.airline.clone(),
            key.flight.clone(),
            key.timestamp,
            status_code,
        ),
    );
}

pub(crate) fn flight_status_info(env: &Env, index: u32, key: &FlightKey, status_code: u32) {
    env.events().publish(
        (symbol_short!("flt_info"),),
        (
            index,
            key.airline.clone(),
            key.flight.clone(),
            key.timestamp,
            status_code,
        ),
    );
}

pub(crate) fn fees_withdrawn(env: &Env, to: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("fee_wd"),), (to.clone(), amount));
}
