#![allow(dead_code)]

use offering_deploy::{
    config::{var, Config, Mnemonic},
    endpoint::Endpoint,
    ledger::{Connect, EndpointSource, LedgerClient, Sender, SubmissionHandle, Wallet},
    types::{message::InternalMessage, stack::StackEntry, Address, Cell, CellBuilder, Coins},
};
use std::{
    future::{self, Ready},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use thiserror::Error;

pub const CONTRACT_RAW: &str =
    "0:7f4df4500183c056d83b046fd6db0ab486f663ab96e34ff4b81ab2d6dd5c5b4f";

/// The scenario deploy message: 0.5 coins, state init inline, empty body.
pub const DEPLOY_MESSAGE_BOC: &str = "b5ee9c724101030100ae00026962003fa6fa2800c1e02b6c1d8237eb6d855a437b31d5cb71a7fa5c0d596b6eae2da7a0ee6b28000000000000000000000000000232020100d98002222222222222222222222222222222222222222222222222222222222222223000888888888888888888888888888888888888888888888888888888888888888a0019999999999999999999999999999999999999999999999999999999999999998000000100000000400008deadbeefdb391794";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("stub failure: {0}")]
pub struct StubError(pub &'static str);

// A ledger answering every balance query and getter call with fixed values.
#[derive(Debug)]
pub struct StubLedger {
    balance: Result<Coins, StubError>,
    stack: Result<Vec<StackEntry>, StubError>,
    pub balance_queries: AtomicUsize,
    pub calls: Mutex<Vec<(Address, String, usize)>>,
}

// Records every message instead of sending it.
#[derive(Debug, Default)]
pub struct StubSender {
    fail: bool,
    pub sent: Arc<Mutex<Vec<InternalMessage>>>,
}

// Senders opened from this wallet share its message log.
#[derive(Debug, Default)]
pub struct StubWallet {
    pub sent: Arc<Mutex<Vec<InternalMessage>>>,
    pub opened: AtomicUsize,
}

#[derive(Debug)]
pub struct StubEndpoints {
    result: Result<String, StubError>,
    pub queries: AtomicUsize,
}

// Hands out the same ledger for every endpoint and records each connection.
#[derive(Debug)]
pub struct StubConnect<'a> {
    ledger: &'a StubLedger,
    pub connected: Mutex<Vec<Endpoint>>,
}

impl StubLedger {
    pub fn with_balance(nano: u128) -> Self {
        Self::new(Ok(Coins(nano)), Ok(vec![]))
    }

    pub fn failing() -> Self {
        Self::new(Err(StubError("unreachable")), Err(StubError("unreachable")))
    }

    pub fn with_stack(stack: Vec<StackEntry>) -> Self {
        Self::new(Ok(Coins::ZERO), Ok(stack))
    }

    fn new(balance: Result<Coins, StubError>, stack: Result<Vec<StackEntry>, StubError>) -> Self {
        Self {
            balance,
            stack,
            balance_queries: AtomicUsize::new(0),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn balance_queries(&self) -> usize {
        self.balance_queries.load(Ordering::SeqCst)
    }
}

impl StubSender {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<InternalMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl StubWallet {
    pub fn sent(&self) -> Vec<InternalMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl StubEndpoints {
    pub fn new(result: Result<String, StubError>) -> Self {
        Self {
            result,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl<'a> StubConnect<'a> {
    pub fn new(ledger: &'a StubLedger) -> Self {
        Self {
            ledger,
            connected: Mutex::new(vec![]),
        }
    }

    pub fn connected(&self) -> Vec<Endpoint> {
        self.connected.lock().unwrap().clone()
    }
}

impl LedgerClient for StubLedger {
    type Error = StubError;
    type BalanceFuture = Ready<Result<Coins, StubError>>;
    type CallFuture = Ready<Result<Vec<StackEntry>, StubError>>;

    fn get_balance(&self, _address: Address) -> Self::BalanceFuture {
        self.balance_queries.fetch_add(1, Ordering::SeqCst);
        future::ready(self.balance.clone())
    }

    fn call(&self, address: Address, method: &str, args: Vec<StackEntry>) -> Self::CallFuture {
        self.calls
            .lock()
            .unwrap()
            .push((address, method.to_string(), args.len()));
        future::ready(self.stack.clone())
    }
}

impl LedgerClient for &StubLedger {
    type Error = StubError;
    type BalanceFuture = Ready<Result<Coins, StubError>>;
    type CallFuture = Ready<Result<Vec<StackEntry>, StubError>>;

    fn get_balance(&self, address: Address) -> Self::BalanceFuture {
        (**self).get_balance(address)
    }

    fn call(&self, address: Address, method: &str, args: Vec<StackEntry>) -> Self::CallFuture {
        (**self).call(address, method, args)
    }
}

impl<'a> Connect for StubConnect<'a> {
    type Client = &'a StubLedger;
    type Error = StubError;

    fn connect(&self, endpoint: &Endpoint) -> Result<&'a StubLedger, StubError> {
        self.connected.lock().unwrap().push(endpoint.clone());
        Ok(self.ledger)
    }
}

impl Sender for StubSender {
    type Error = StubError;
    type Future = Ready<Result<SubmissionHandle, StubError>>;

    fn send(&self, message: InternalMessage) -> Self::Future {
        if self.fail {
            return future::ready(Err(StubError("rejected")));
        }
        let handle = SubmissionHandle::for_message(&message).unwrap();
        self.sent.lock().unwrap().push(message);
        future::ready(Ok(handle))
    }
}

impl Wallet for StubWallet {
    type Sender = StubSender;
    type Error = StubError;

    fn open(&self, mnemonic: &Mnemonic) -> Result<StubSender, StubError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        match mnemonic.words().count() {
            24 => Ok(StubSender {
                fail: false,
                sent: self.sent.clone(),
            }),
            _ => Err(StubError("expected 24 words")),
        }
    }
}

impl EndpointSource for StubEndpoints {
    type Error = StubError;
    type Future = Ready<Result<String, StubError>>;

    fn endpoint(&self) -> Self::Future {
        self.queries.fetch_add(1, Ordering::SeqCst);
        future::ready(self.result.clone())
    }
}

pub fn mnemonic_24() -> String {
    vec!["abandon"; 23].join(" ") + " art"
}

pub fn vars() -> Vec<(&'static str, String)> {
    vec![
        (
            var::OWNER_ADDRESS,
            "0:1111111111111111111111111111111111111111111111111111111111111111".to_string(),
        ),
        (
            var::USDT_ADDRESS,
            "0:2222222222222222222222222222222222222222222222222222222222222222".to_string(),
        ),
        (
            var::PROJECT_TOKEN_ADDRESS,
            "0:3333333333333333333333333333333333333333333333333333333333333333".to_string(),
        ),
        (var::MNEMONIC, mnemonic_24()),
    ]
}

pub fn config() -> Config {
    Config::from_vars(vars()).unwrap()
}

/// Stand-in for compiled contract code.
pub fn code() -> Cell {
    let mut b = CellBuilder::new();
    b.store_uint(0xDEAD_BEEF, 32).unwrap();
    b.build().unwrap()
}
