//! Oracle consensus engine.
//!
//! Oracles pay a fee to register and receive three fixed indices. A status
//! request for a flight is opened under one drawn index and only oracles
//! holding that index may answer it. The first status code reported by
//! `MIN_RESPONSES` distinct oracles closes the request and becomes the
//! flight's status. Codes are never compared with each other.
//!
//! Requests that never reach quorum stay open.

use soroban_sdk::{contracttype, log, token, Address, Env, Symbol, Vec};

use crate::config::{
    is_known_status_code, CREDIT_BATCH_SIZE, INDEXES_PER_ORACLE, MIN_RESPONSES,
    ORACLE_REGISTRATION_FEE, STATUS_CODE_LATE_AIRLINE, STATUS_CODE_UNKNOWN,
};
use crate::error::Error;
use crate::events;
use crate::ledger::{self, FlightKey, LedgerClient};
use crate::random::{distinct_indexes, IndexSource};
use crate::storage;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Oracle {
    pub indexes: Vec<u32>,
}

impl Oracle {
    pub fn holds(&self, index: u32) -> bool {
        self.indexes.iter().any(|held| held == index)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestKey {
    pub index: u32,
    pub flight: FlightKey,
}

/// One outstanding status inquiry. `status_code` holds the winning code
/// once the request is closed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleRequest {
    pub requester: Address,
    pub is_open: bool,
    pub responders: Vec<Address>,
    pub status_code: u32,
}

pub fn register_oracle(
    env: &Env,
    caller: Address,
    fee: i128,
    source: &mut impl IndexSource,
) -> Result<Vec<u32>, Error> {
    ledger::operational(env)?;
    caller.require_auth();

    if fee < ORACLE_REGISTRATION_FEE {
        return Err(Error::RegistrationFeeTooLow);
    }
    if storage::oracle(env, &caller).is_some() {
        return Err(Error::OracleAlreadyRegistered);
    }

    let token = storage::token(env).ok_or(Error::NotInitialized)?;
    token::Client::new(env, &token).transfer(&caller, &env.current_contract_address(), &fee);

    let indexes = distinct_indexes(env, source, INDEXES_PER_ORACLE);
    storage::set_oracle(
        env,
        &caller,
        &Oracle {
            indexes: indexes.clone(),
        },
    );

    events::oracle_registered(env, &caller, &indexes);
    Ok(indexes)
}

pub fn indexes_of(env: &Env, oracle: &Address) -> Result<Vec<u32>, Error> {
    storage::oracle(env, oracle)
        .map(|record| record.indexes)
        .ok_or(Error::OracleNotRegistered)
}

/// Open (or re-announce) a status request for a registered, unresolved flight.
///
/// Returns the drawn index. A closed request is never reopened.
pub fn fetch_flight_status(
    env: &Env,
    caller: Address,
    key: FlightKey,
    source: &mut impl IndexSource,
) -> Result<u32, Error> {
    let ledger = ledger::operational(env)?;
    caller.require_auth();

    let flight = ledger.get_flight(&key).ok_or(Error::FlightNotFound)?;
    if flight.status_code != STATUS_CODE_UNKNOWN {
        return Err(Error::FlightAlreadyResolved);
    }

    let index = source.next_index();
    let request_key = RequestKey {
        index,
        flight: key.clone(),
    };
    match storage::request(env, &request_key) {
        Some(request) if !request.is_open => return Err(Error::RequestClosed),
        Some(_) => {}
        None => storage::set_request(
            env,
            &request_key,
            &OracleRequest {
                requester: caller,
                is_open: true,
                responders: Vec::new(env),
                status_code: STATUS_CODE_UNKNOWN,
            },
        ),
    }

    events::oracle_request(env, index, &key);
    Ok(index)
}

/// Record one oracle's report.
///
/// Unauthorized oracles fail loudly. Reports for unknown or already
/// closed requests are dropped without error: late answers to a resolved
/// request are expected traffic.
pub fn submit_oracle_response(
    env: &Env,
    caller: Address,
    index: u32,
    key: FlightKey,
    status_code: u32,
) -> Result<(), Error> {
    let ledger = ledger::operational(env)?;
    caller.require_auth();

    let oracle = storage::oracle(env, &caller).ok_or(Error::OracleNotRegistered)?;
    if !oracle.holds(index) {
        return Err(Error::IndexNotAssigned);
    }
    if !is_known_status_code(status_code) {
        return Err(Error::InvalidStatusCode);
    }

    let request_key = RequestKey {
        index,
        flight: key.clone(),
    };
    let Some(mut request) = storage::request(env, &request_key) else {
        log!(env, "response for unknown request dropped", caller, index);
        return Ok(());
    };
    if !request.is_open {
        log!(env, "response for closed request dropped", caller, index);
        return Ok(());
    }
    if request.responders.iter().any(|responder| responder == caller) {
        return Err(Error::DuplicateResponse);
    }

    request.responders.push_back(caller.clone());
    let mut agreeing = storage::responses(env, &request_key, status_code);
    agreeing.push_back(caller);
    storage::set_responses(env, &request_key, status_code, &agreeing);

    events::oracle_report(env, index, &key, status_code);

    if agreeing.len() >= MIN_RESPONSES {
        request.is_open = false;
        request.status_code = status_code;
        storage::set_request(env, &request_key, &request);
        process_flight_status(env, &ledger, index, &key, status_code);
    } else {
        storage::set_request(env, &request_key, &request);
    }

    Ok(())
}

/// Apply a consensus result to the flight and start the payout when the
/// airline is at fault.
///
/// An UNKNOWN consensus only closes the request; the flight stays open for
/// another fetch.
fn process_flight_status(
    env: &Env,
    ledger: &LedgerClient,
    index: u32,
    key: &FlightKey,
    status_code: u32,
) {
    if status_code == STATUS_CODE_UNKNOWN {
        log!(env, "request closed without a status", index, key.flight);
        return;
    }

    let this = env.current_contract_address();
    if !ledger.update_flight_status(&this, key, &status_code) {
        log!(env, "consensus reached on an already resolved flight", index, status_code);
        return;
    }

    events::flight_status_info(env, index, key, status_code);

    if status_code == STATUS_CODE_LATE_AIRLINE {
        let credited = ledger.credit_insurees(&this, key, &CREDIT_BATCH_SIZE);
        log!(env, "insurees credited", key.flight, credited);
    }
}

pub fn get_request(env: &Env, index: u32, key: FlightKey) -> Option<OracleRequest> {
    storage::request(env, &RequestKey { index, flight: key })
}

pub fn response_count(env: &Env, index: u32, key: FlightKey, status_code: u32) -> u32 {
    storage::responses(env, &RequestKey { index, flight: key }, status_code).len()
}

pub fn flight_key(airline: Address, flight: Symbol, timestamp: u64) -> FlightKey {
    FlightKey {
        airline,
        flight,
        timestamp,
    }
}
