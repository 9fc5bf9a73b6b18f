//! Token approvals required before trading
//!
//! Nothing here sends a transaction. The operator approves these contracts
//! once, from the Polymarket UI or a block explorer.

use serde::Serialize;

use super::signer::{CTF_EXCHANGE_ADDRESS, NEG_RISK_CTF_EXCHANGE_ADDRESS};

/// Collateral the exchanges spend on buys (USDC.e on Polygon)
pub const USDC_ADDRESS: &str = "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174";
/// Conditional Tokens contract holding outcome shares
pub const CONDITIONAL_TOKENS_ADDRESS: &str = "0x4D97DCd97eC945f40cF65F87097ACe5EA0476045";
/// Adapter that converts positions on neg-risk markets
pub const NEG_RISK_ADAPTER_ADDRESS: &str = "0xd91E80cF2E7be2e162c6513ceD06f1dD0dA35296";

const POLYGONSCAN_TOKEN_URL: &str = "https://polygonscan.com/token";

/// A contract that must be approved to spend USDC and outcome tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApprovalTarget {
    pub name: &'static str,
    pub address: &'static str,
}

/// Everything an operator needs to set up allowances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowanceReport {
    pub usdc: &'static str,
    pub conditional_tokens: &'static str,
    pub spenders: Vec<ApprovalTarget>,
    /// Where the current USDC allowance can be read
    pub explorer_url: String,
}

/// Contracts to approve, in the order they should be checked
pub fn approval_targets() -> Vec<ApprovalTarget> {
    vec![
        ApprovalTarget {
            name: "Main Exchange",
            address: CTF_EXCHANGE_ADDRESS,
        },
        ApprovalTarget {
            name: "Neg Risk Exchange",
            address: NEG_RISK_CTF_EXCHANGE_ADDRESS,
        },
        ApprovalTarget {
            name: "Neg Risk Adapter",
            address: NEG_RISK_ADAPTER_ADDRESS,
        },
    ]
}

pub fn allowance_report() -> AllowanceReport {
    AllowanceReport {
        usdc: USDC_ADDRESS,
        conditional_tokens: CONDITIONAL_TOKENS_ADDRESS,
        spenders: approval_targets(),
        explorer_url: format!("{}/{}#readContract", POLYGONSCAN_TOKEN_URL, USDC_ADDRESS),
    }
}
