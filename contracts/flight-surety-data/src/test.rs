use super::*;
use soroban_sdk::testutils::{Address as _, MockAuth, MockAuthInvoke};
use soroban_sdk::{symbol_short, token, Address, Env, IntoVal};

const UNIT: i128 = 10_000_000;

struct TestEnv {
    env: Env,
    contract_id: Address,
    token_addr: Address,
    owner: Address,
    first_airline: Address,
    app: Address,
}

impl TestEnv {
    fn client(&self) -> FlightSuretyDataClient<'_> {
        FlightSuretyDataClient::new(&self.env, &self.contract_id)
    }

    fn key(&self, airline: &Address, flight: &str, timestamp: u64) -> FlightKey {
        FlightKey {
            airline: airline.clone(),
            flight: Symbol::new(&self.env, flight),
            timestamp,
        }
    }
}

fn setup() -> TestEnv {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let first_airline = Address::generate(&env);
    let app = Address::generate(&env);

    let token_admin = Address::generate(&env);
    let token_addr = env
        .register_stellar_asset_contract_v2(token_admin)
        .address();

    let contract_id = env.register(FlightSuretyData, ());
    let client = FlightSuretyDataClient::new(&env, &contract_id);
    client.initialize(&owner, &first_airline, &token_addr);
    client.authorize_caller(&app);

    TestEnv {
        env,
        contract_id,
        token_addr,
        owner,
        first_airline,
        app,
    }
}

#[test]
fn test_initialize() {
    let t = setup();
    let client = t.client();

    assert!(client.is_operational());
    assert_eq!(client.get_owner(), Some(t.owner.clone()));
    assert_eq!(client.get_token(), Some(t.token_addr.clone()));
    assert_eq!(client.registered_airline_count(), 1);

    let airline = client.get_airline(&t.first_airline).unwrap();
    assert!(airline.is_registered);
    assert_eq!(airline.required_votes, 0);
    assert_eq!(airline.funding_amount, 0);

    assert_eq!(
        client.try_initialize(&t.owner, &t.first_airline, &t.token_addr),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_privileged_calls_need_authorized_caller() {
    let t = setup();
    let client = t.client();
    let stranger = Address::generate(&t.env);
    let nominee = Address::generate(&t.env);

    assert!(client.is_authorized_caller(&t.app));
    assert!(!client.is_authorized_caller(&stranger));

    assert_eq!(
        client.try_register_airline(&stranger, &nominee, &0),
        Err(Ok(Error::CallerNotAuthorized))
    );
    assert!(client.get_airline(&nominee).is_none());

    assert_eq!(
        client.try_authorize_caller(&t.app),
        Err(Ok(Error::CallerAlreadyAuthorized))
    );

    client.deauthorize_caller(&t.app);
    assert_eq!(
        client.try_register_airline(&t.app, &nominee, &0),
        Err(Ok(Error::CallerNotAuthorized))
    );
}

#[test]
fn test_set_operating_status_requires_owner() {
    let t = setup();
    let client = t.client();
    let stranger = Address::generate(&t.env);

    t.env.mock_auths(&[MockAuth {
        address: &stranger,
        invoke: &MockAuthInvoke {
            contract: &t.contract_id,
            fn_name: "set_operating_status",
            args: (false,).into_val(&t.env),
            sub_invokes: &[],
        },
    }]);
    assert!(client.try_set_operating_status(&false).is_err());
    assert!(client.is_operational());

    t.env.mock_all_auths();
    client.set_operating_status(&false);
    assert!(!client.is_operational());
}

#[test]
fn test_paused_ledger_rejects_mutations() {
    let t = setup();
    let client = t.client();
    let nominee = Address::generate(&t.env);
    let other_app = Address::generate(&t.env);

    client.set_operating_status(&false);

    assert_eq!(
        client.try_authorize_caller(&other_app),
        Err(Ok(Error::NotOperational))
    );
    assert_eq!(
        client.try_register_airline(&t.app, &nominee, &0),
        Err(Ok(Error::NotOperational))
    );
    assert_eq!(
        client.try_register_flight(&t.app, &t.first_airline, &symbol_short!("N707"), &100),
        Err(Ok(Error::NotOperational))
    );

    client.set_operating_status(&true);
    client.register_airline(&t.app, &nominee, &0);
    assert!(client.is_airline(&nominee));
}

#[test]
fn test_direct_registration_counts_airline() {
    let t = setup();
    let client = t.client();
    let nominee = Address::generate(&t.env);

    let record = client.register_airline(&t.app, &nominee, &0);
    assert!(record.is_registered);
    assert_eq!(client.registered_airline_count(), 2);

    assert_eq!(
        client.try_register_airline(&t.app, &nominee, &0),
        Err(Ok(Error::AirlineAlreadyExists))
    );
}

#[test]
fn test_voting_registers_nominee_at_threshold() {
    let t = setup();
    let client = t.client();
    let nominee = Address::generate(&t.env);
    let voter_a = Address::generate(&t.env);
    let voter_b = Address::generate(&t.env);

    let record = client.register_airline(&t.app, &nominee, &2);
    assert!(!record.is_registered);
    assert_eq!(client.registered_airline_count(), 1);

    let record = client.vote_airline(&t.app, &voter_a, &nominee);
    assert_eq!(record.received_votes, 1);
    assert!(!record.is_registered);

    assert_eq!(
        client.try_vote_airline(&t.app, &voter_a, &nominee),
        Err(Ok(Error::DuplicateVote))
    );
    assert_eq!(client.get_airline(&nominee).unwrap().received_votes, 1);
    assert!(client.has_voted(&nominee, &voter_a));

    let record = client.vote_airline(&t.app, &voter_b, &nominee);
    assert_eq!(record.received_votes, 2);
    assert!(record.is_registered);
    assert_eq!(client.registered_airline_count(), 2);

    let late_voter = Address::generate(&t.env);
    assert_eq!(
        client.try_vote_airline(&t.app, &late_voter, &nominee),
        Err(Ok(Error::AirlineAlreadyRegistered))
    );
    assert_eq!(client.get_airline(&nominee).unwrap().received_votes, 2);
}

#[test]
fn test_vote_for_unknown_airline() {
    let t = setup();
    let client = t.client();
    let voter = Address::generate(&t.env);
    let ghost = Address::generate(&t.env);

    assert_eq!(
        client.try_vote_airline(&t.app, &voter, &ghost),
        Err(Ok(Error::AirlineNotFound))
    );
}

#[test]
fn test_fund_airline() {
    let t = setup();
    let client = t.client();
    let pending = Address::generate(&t.env);
    client.register_airline(&t.app, &pending, &2);

    let record = client.fund_airline(&t.app, &t.first_airline, &(10 * UNIT));
    assert_eq!(record.funding_amount, 10 * UNIT);
    let record = client.fund_airline(&t.app, &t.first_airline, &UNIT);
    assert_eq!(record.funding_amount, 11 * UNIT);

    assert_eq!(
        client.try_fund_airline(&t.app, &pending, &(10 * UNIT)),
        Err(Ok(Error::AirlineNotRegistered))
    );
    assert_eq!(
        client.try_fund_airline(&t.app, &t.first_airline, &0),
        Err(Ok(Error::InvalidAmount))
    );
}

#[test]
fn test_register_flight_once() {
    let t = setup();
    let client = t.client();
    let flight = symbol_short!("N707");

    let record = client.register_flight(&t.app, &t.first_airline, &flight, &1_000);
    assert!(record.is_registered);
    assert_eq!(record.status_code, STATUS_CODE_UNKNOWN);

    assert_eq!(
        client.try_register_flight(&t.app, &t.first_airline, &flight, &1_000),
        Err(Ok(Error::FlightAlreadyRegistered))
    );

    // same number, different departure is a different flight
    client.register_flight(&t.app, &t.first_airline, &flight, &2_000);

    let stranger = Address::generate(&t.env);
    assert_eq!(
        client.try_register_flight(&t.app, &stranger, &flight, &1_000),
        Err(Ok(Error::AirlineNotRegistered))
    );
}

#[test]
fn test_flight_status_written_once() {
    let t = setup();
    let client = t.client();
    client.register_flight(&t.app, &t.first_airline, &symbol_short!("N707"), &1_000);
    let key = t.key(&t.first_airline, "N707", 1_000);

    assert!(!client.update_flight_status(&t.app, &key, &STATUS_CODE_UNKNOWN));
    assert!(client.update_flight_status(&t.app, &key, &STATUS_CODE_LATE_AIRLINE));
    assert!(!client.update_flight_status(&t.app, &key, &10));
    assert_eq!(
        client.get_flight(&key).unwrap().status_code,
        STATUS_CODE_LATE_AIRLINE
    );

    let missing = t.key(&t.first_airline, "N999", 1_000);
    assert_eq!(
        client.try_update_flight_status(&t.app, &missing, &10),
        Err(Ok(Error::FlightNotFound))
    );
}

#[test]
fn test_buy_rejects_duplicates_and_resolved_flights() {
    let t = setup();
    let client = t.client();
    let passenger = Address::generate(&t.env);
    client.register_flight(&t.app, &t.first_airline, &symbol_short!("N707"), &1_000);
    let key = t.key(&t.first_airline, "N707", 1_000);

    let insurance = client.buy(&t.app, &key, &passenger, &UNIT);
    assert_eq!(insurance.amount, UNIT);
    assert!(!insurance.paid);

    assert_eq!(
        client.try_buy(&t.app, &key, &passenger, &(UNIT / 2)),
        Err(Ok(Error::InsuranceAlreadyPurchased))
    );
    assert_eq!(client.get_insurance(&key, &passenger).unwrap().amount, UNIT);
    assert_eq!(client.insuree_count(&key), 1);
    assert_eq!(client.get_insuree(&key, &0), Some(passenger.clone()));

    client.update_flight_status(&t.app, &key, &10);
    let late_passenger = Address::generate(&t.env);
    assert_eq!(
        client.try_buy(&t.app, &key, &late_passenger, &UNIT),
        Err(Ok(Error::FlightAlreadyResolved))
    );
}

#[test]
fn test_credit_insurees_pays_once() {
    let t = setup();
    let client = t.client();
    let alice = Address::generate(&t.env);
    let bob = Address::generate(&t.env);
    client.register_flight(&t.app, &t.first_airline, &symbol_short!("N707"), &1_000);
    let key = t.key(&t.first_airline, "N707", 1_000);

    client.buy(&t.app, &key, &alice, &UNIT);
    client.buy(&t.app, &key, &bob, &(UNIT / 2));

    assert_eq!(
        client.try_credit_insurees(&t.app, &key, &10),
        Err(Ok(Error::PayoutNotQualified))
    );

    client.update_flight_status(&t.app, &key, &STATUS_CODE_LATE_AIRLINE);
    let total = client.credit_insurees(&t.app, &key, &10);
    assert_eq!(total, UNIT * 3 / 2 + UNIT * 3 / 4);
    assert_eq!(client.get_credit(&alice), 15_000_000);
    assert_eq!(client.get_credit(&bob), 7_500_000);
    assert!(client.get_insurance(&key, &alice).unwrap().paid);

    assert_eq!(client.credit_insurees(&t.app, &key, &10), 0);
    assert_eq!(client.get_credit(&alice), 15_000_000);
}

#[test]
fn test_credit_insurees_walks_in_batches() {
    let t = setup();
    let client = t.client();
    client.register_flight(&t.app, &t.first_airline, &symbol_short!("N707"), &1_000);
    let key = t.key(&t.first_airline, "N707", 1_000);

    let mut passengers = std::vec::Vec::new();
    for _ in 0..5 {
        let passenger = Address::generate(&t.env);
        client.buy(&t.app, &key, &passenger, &UNIT);
        passengers.push(passenger);
    }
    client.update_flight_status(&t.app, &key, &STATUS_CODE_LATE_AIRLINE);
    assert_eq!(client.pending_insurees(&key), 5);

    assert_eq!(client.credit_insurees(&t.app, &key, &2), 2 * 15_000_000);
    assert_eq!(client.pending_insurees(&key), 3);
    assert_eq!(client.get_credit(&passengers[1]), 15_000_000);
    assert_eq!(client.get_credit(&passengers[2]), 0);

    // the last passenger claims ahead of the batch and is skipped later
    assert_eq!(client.credit_insuree(&t.app, &key, &passengers[4]), 15_000_000);

    assert_eq!(client.credit_insurees(&t.app, &key, &10), 2 * 15_000_000);
    assert_eq!(client.pending_insurees(&key), 0);
    assert_eq!(client.credit_insurees(&t.app, &key, &10), 0);
    for passenger in passengers.iter() {
        assert_eq!(client.get_credit(passenger), 15_000_000);
        assert!(client.get_insurance(&key, passenger).unwrap().paid);
    }
}

#[test]
fn test_credit_insuree_pays_once() {
    let t = setup();
    let client = t.client();
    let passenger = Address::generate(&t.env);
    let stranger = Address::generate(&t.env);
    client.register_flight(&t.app, &t.first_airline, &symbol_short!("N707"), &1_000);
    let key = t.key(&t.first_airline, "N707", 1_000);
    client.buy(&t.app, &key, &passenger, &UNIT);

    assert_eq!(
        client.try_credit_insuree(&t.app, &key, &passenger),
        Err(Ok(Error::PayoutNotQualified))
    );

    client.update_flight_status(&t.app, &key, &STATUS_CODE_LATE_AIRLINE);
    assert_eq!(
        client.try_credit_insuree(&t.app, &key, &stranger),
        Err(Ok(Error::InsuranceNotFound))
    );
    assert_eq!(client.credit_insuree(&t.app, &key, &passenger), 15_000_000);
    assert_eq!(client.credit_insuree(&t.app, &key, &passenger), 0);
    assert_eq!(client.get_credit(&passenger), 15_000_000);
}

#[test]
fn test_pay_transfers_and_zeroes_credit() {
    let t = setup();
    let client = t.client();
    let passenger = Address::generate(&t.env);
    client.register_flight(&t.app, &t.first_airline, &symbol_short!("N707"), &1_000);
    let key = t.key(&t.first_airline, "N707", 1_000);

    token::StellarAssetClient::new(&t.env, &t.token_addr).mint(&t.contract_id, &(10 * UNIT));
    client.buy(&t.app, &key, &passenger, &UNIT);
    client.update_flight_status(&t.app, &key, &STATUS_CODE_LATE_AIRLINE);
    client.credit_insurees(&t.app, &key, &10);

    let paid = client.pay(&t.app, &passenger);
    assert_eq!(paid, 15_000_000);
    assert_eq!(client.get_credit(&passenger), 0);

    let token = token::Client::new(&t.env, &t.token_addr);
    assert_eq!(token.balance(&passenger), 15_000_000);
    assert_eq!(token.balance(&t.contract_id), 10 * UNIT - 15_000_000);

    assert_eq!(
        client.try_pay(&t.app, &passenger),
        Err(Ok(Error::NoCredit))
    );
}

#[test]
fn test_failed_transfer_keeps_credit() {
    let t = setup();
    let client = t.client();
    let passenger = Address::generate(&t.env);
    client.register_flight(&t.app, &t.first_airline, &symbol_short!("N707"), &1_000);
    let key = t.key(&t.first_airline, "N707", 1_000);

    // nothing was ever moved into the pool, so the transfer cannot succeed
    client.buy(&t.app, &key, &passenger, &UNIT);
    client.update_flight_status(&t.app, &key, &STATUS_CODE_LATE_AIRLINE);
    client.credit_insurees(&t.app, &key, &10);

    assert!(client.try_pay(&t.app, &passenger).is_err());
    assert_eq!(client.get_credit(&passenger), 15_000_000);
}
