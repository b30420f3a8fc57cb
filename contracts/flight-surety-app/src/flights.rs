use soroban_sdk::{log, Address, Env, Symbol};

use crate::error::Error;
use crate::governance::require_funded_airline;
use crate::ledger::{self, Flight, FlightKey};

/// Register a flight for the calling airline. The status starts as UNKNOWN.
pub fn register_flight(
    env: &Env,
    caller: Address,
    flight: Symbol,
    timestamp: u64,
) -> Result<Flight, Error> {
    let ledger = ledger::operational(env)?;
    caller.require_auth();
    require_funded_airline(&ledger, &caller)?;

    let key = FlightKey {
        airline: caller.clone(),
        flight: flight.clone(),
        timestamp,
    };
    if ledger.get_flight(&key).is_some() {
        return Err(Error::FlightAlreadyRegistered);
    }

    let record = ledger.register_flight(&env.current_contract_address(), &caller, &flight, &timestamp);
    log!(env, "flight registered", caller, flight, timestamp);
    Ok(record)
}
