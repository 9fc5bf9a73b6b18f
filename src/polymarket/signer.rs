//! EIP-712 signing for Polymarket orders and API key requests

use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip712::{Eip712, TypedData};
use ethers::types::{Address, H256};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

use super::messages::SignedOrder;
use crate::common::errors::{BotError, Result};
use crate::common::types::{OrderIntent, Side, TickSize};

/// CTF Exchange on Polygon, verifying contract for regular markets
pub const CTF_EXCHANGE_ADDRESS: &str = "0x4bFb41d5B3570DeFd03C39a9A4D8dE6Bd8B8982E";
/// Neg-risk CTF Exchange on Polygon
pub const NEG_RISK_CTF_EXCHANGE_ADDRESS: &str = "0xC5d563A36AE78145C45a50134d48A1215220f80a";

const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
const CLOB_AUTH_MESSAGE: &str = "This message attests that I control the given wallet";

/// USDC and outcome tokens both use 6 decimals on-chain
const TOKEN_DECIMALS: u32 = 6;
/// Share sizes are accepted with at most 2 decimals
const SIZE_DECIMALS: u32 = 2;

/// Wallet-backed signer for orders and L1 auth
pub struct OrderSigner {
    wallet: LocalWallet,
    address: Address,
    funder: Address,
    signature_type: u8,
    chain_id: u64,
}

impl OrderSigner {
    pub fn new(
        private_key: &str,
        funder_address: &str,
        signature_type: u8,
        chain_id: u64,
    ) -> Result<Self> {
        let wallet = private_key
            .trim_start_matches("0x")
            .parse::<LocalWallet>()
            .map_err(|e| BotError::Configuration(format!("Invalid private key: {}", e)))?
            .with_chain_id(chain_id);

        let address = wallet.address();
        let funder = Address::from_str(funder_address).map_err(|e| {
            BotError::Configuration(format!("Invalid funder address {}: {}", funder_address, e))
        })?;

        Ok(Self {
            wallet,
            address,
            funder,
            signature_type,
            chain_id,
        })
    }

    /// Signing wallet address, 0x-prefixed lowercase hex
    pub fn address(&self) -> String {
        format!("{:?}", self.address)
    }

    /// Funding wallet address, 0x-prefixed lowercase hex
    pub fn funder(&self) -> String {
        format!("{:?}", self.funder)
    }

    /// Build and sign the exchange order for an intent.
    ///
    /// GTC orders carry no expiration.
    pub fn sign_order(&self, intent: &OrderIntent, neg_risk: bool) -> Result<SignedOrder> {
        let (maker_amount, taker_amount) = order_amounts(intent.price, intent.size, intent.tick_size);
        let maker_amount = to_token_units(maker_amount);
        let taker_amount = to_token_units(taker_amount);
        let salt = u64::from(Uuid::new_v4().as_fields().0);
        // Exchange side index: 0 = BUY
        let side_index = match intent.side {
            Side::Buy => 0u8,
        };

        let exchange = if neg_risk {
            NEG_RISK_CTF_EXCHANGE_ADDRESS
        } else {
            CTF_EXCHANGE_ADDRESS
        };

        let typed_data = json!({
            "types": {
                "EIP712Domain": [
                    {"name": "name", "type": "string"},
                    {"name": "version", "type": "string"},
                    {"name": "chainId", "type": "uint256"},
                    {"name": "verifyingContract", "type": "address"}
                ],
                "Order": [
                    {"name": "salt", "type": "uint256"},
                    {"name": "maker", "type": "address"},
                    {"name": "signer", "type": "address"},
                    {"name": "taker", "type": "address"},
                    {"name": "tokenId", "type": "uint256"},
                    {"name": "makerAmount", "type": "uint256"},
                    {"name": "takerAmount", "type": "uint256"},
                    {"name": "expiration", "type": "uint256"},
                    {"name": "nonce", "type": "uint256"},
                    {"name": "feeRateBps", "type": "uint256"},
                    {"name": "side", "type": "uint8"},
                    {"name": "signatureType", "type": "uint8"}
                ]
            },
            "primaryType": "Order",
            "domain": {
                "name": "Polymarket CTF Exchange",
                "version": "1",
                "chainId": self.chain_id,
                "verifyingContract": exchange
            },
            "message": {
                "salt": salt,
                "maker": self.funder(),
                "signer": self.address(),
                "taker": ZERO_ADDRESS,
                "tokenId": intent.token_id,
                "makerAmount": maker_amount,
                "takerAmount": taker_amount,
                "expiration": "0",
                "nonce": "0",
                "feeRateBps": "0",
                "side": side_index,
                "signatureType": self.signature_type
            }
        });

        let signature = self.sign_typed_data(typed_data)?;

        Ok(SignedOrder {
            salt,
            maker: self.funder(),
            signer: self.address(),
            taker: ZERO_ADDRESS.to_string(),
            token_id: intent.token_id.clone(),
            maker_amount,
            taker_amount,
            expiration: "0".to_string(),
            nonce: "0".to_string(),
            fee_rate_bps: "0".to_string(),
            side: intent.side,
            signature_type: self.signature_type,
            signature,
        })
    }

    /// Sign the `ClobAuth` attestation used by L1 endpoints
    pub fn sign_clob_auth(&self, timestamp: i64, nonce: u64) -> Result<String> {
        let typed_data = json!({
            "types": {
                "EIP712Domain": [
                    {"name": "name", "type": "string"},
                    {"name": "version", "type": "string"},
                    {"name": "chainId", "type": "uint256"}
                ],
                "ClobAuth": [
                    {"name": "address", "type": "address"},
                    {"name": "timestamp", "type": "string"},
                    {"name": "nonce", "type": "uint256"},
                    {"name": "message", "type": "string"}
                ]
            },
            "primaryType": "ClobAuth",
            "domain": {
                "name": "ClobAuthDomain",
                "version": "1",
                "chainId": self.chain_id
            },
            "message": {
                "address": self.address(),
                "timestamp": timestamp.to_string(),
                "nonce": nonce,
                "message": CLOB_AUTH_MESSAGE
            }
        });

        self.sign_typed_data(typed_data)
    }

    fn sign_typed_data(&self, typed_data: serde_json::Value) -> Result<String> {
        let typed_data: TypedData = serde_json::from_value(typed_data)?;
        let hash = typed_data
            .encode_eip712()
            .map_err(|e| BotError::Signing(format!("EIP-712 encoding failed: {}", e)))?;
        let signature = self.wallet.sign_hash(H256::from(hash))?;

        Ok(format!("0x{}", hex::encode(signature.to_vec())))
    }
}

/// Maker and taker amounts of a buy, before scaling to token units.
///
/// The maker pays `size * price` dollars for `size` shares. Size is truncated
/// to 2 decimals and the dollar amount to the tick's decimals plus 2, always
/// toward zero.
pub fn order_amounts(price: Decimal, size: Decimal, tick_size: TickSize) -> (Decimal, Decimal) {
    let shares = size.round_dp_with_strategy(SIZE_DECIMALS, RoundingStrategy::ToZero);
    let dollars = (shares * price)
        .round_dp_with_strategy(tick_size.decimals() + SIZE_DECIMALS, RoundingStrategy::ToZero);

    (dollars, shares)
}

/// Scale to 6-decimal token units as an integer string
fn to_token_units(amount: Decimal) -> String {
    (amount * Decimal::from(10u64.pow(TOKEN_DECIMALS)))
        .trunc()
        .normalize()
        .to_string()
}
