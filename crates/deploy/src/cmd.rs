use clap::Subcommand;
use offering_deploy::{
    artifact::{self, ARTIFACT_FILE},
    config::{Config, ENV_FILE},
    contract::{
        codec,
        op::{Asset, CHANGE_RATE},
    },
    types::{boc, Cell, Coins, FriendlyFlags},
};
use serde::Serialize;
use std::path::{Path, PathBuf};


#[derive(Subcommand)]
pub enum Cmd {
    /// Print the address the configured contract deploys to
    Address {
        /// Compiled contract code
        #[clap(long, default_value = ARTIFACT_FILE)]
        code: PathBuf,

        /// Print as JSON
        #[clap(long)]
        json: bool,
    },

    /// Print a message body as a hex encoded bag of cells
    Encode {
        #[command(subcommand)]
        body: Body,
    },
}

#[derive(Subcommand)]
pub enum Body {
    /// Withdraw the counterparty asset
    WithdrawCounterparty {
        /// Amount in the asset's smallest unit
        #[clap(long)]
        amount: u128,
        /// Correlation id
        #[clap(long)]
        query_id: Option<u64>,
    },

    /// Withdraw the priced asset
    WithdrawPriced {
        /// Amount in the asset's smallest unit
        #[clap(long)]
        amount: u128,
        /// Correlation id
        #[clap(long)]
        query_id: Option<u64>,
    },

    /// Change the offering rate
    ChangeRate {
        /// The new rate
        #[clap(long)]
        rate: u32,
        /// Correlation id
        #[clap(long)]
        query_id: Option<u64>,
    },
}

#[derive(Serialize)]
struct AddressReport {
    address: offering_deploy::types::Address,
    friendly: String,
    non_bounceable: String,
    data_hash: String,
}

impl Cmd {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self {
            Cmd::Address { code, json } => address(code, *json)?,
            Cmd::Encode { body } => {
                let boc = boc::serialize(&body.encode()?, true);
                println!("{}", hex::encode(boc));
            }
        }
        Ok(())
    }
}

impl Body {
    fn encode(&self) -> anyhow::Result<Cell> {
        let cell = match *self {
            Body::WithdrawCounterparty { amount, query_id } => {
                codec::encode_withdraw(Asset::Counterparty.withdraw_op(), Coins(amount), query_id)?
            }
            Body::WithdrawPriced { amount, query_id } => {
                codec::encode_withdraw(Asset::Priced.withdraw_op(), Coins(amount), query_id)?
            }
            Body::ChangeRate { rate, query_id } => {
                codec::encode_change_rate(CHANGE_RATE, rate, query_id)?
            }
        };
        Ok(cell)
    }
}

fn address(code: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::from_env_file(Path::new(ENV_FILE))?;
    let code = artifact::load_code(code)?;
    let descriptor = config.descriptor(code)?;
    let address = descriptor.address();
    let non_bounceable = FriendlyFlags {
        bounceable: false,
        ..Default::default()
    };
    let report = AddressReport {
        address,
        friendly: address.to_string(),
        non_bounceable: address.to_friendly(non_bounceable),
        data_hash: hex::encode(offering_hash::repr_hash(descriptor.data())),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Contract address: {}", report.friendly);
        println!("Raw: {}", address.to_raw_string());
        println!("Non-bounceable: {}", report.non_bounceable);
    }
    Ok(())
}
