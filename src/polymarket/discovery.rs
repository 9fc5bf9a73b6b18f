//! Low-price outcome discovery over Gamma markets

use rust_decimal::Decimal;
use serde::Serialize;

use super::messages::GammaMarket;

/// One outcome of a market, zipped from Gamma's string-encoded arrays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeToken {
    pub outcome: String,
    pub price: Option<Decimal>,
    pub token_id: Option<String>,
}

/// An outcome priced at or below the requested ceiling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowPriceOutcome {
    pub question: Option<String>,
    pub outcome: String,
    pub token_id: Option<String>,
    pub price: Decimal,
    pub condition_id: Option<String>,
}

fn decode_list(encoded: Option<&str>) -> Option<Vec<String>> {
    match encoded {
        None => Some(Vec::new()),
        Some(raw) => serde_json::from_str(raw).ok(),
    }
}

/// Zip outcomes, prices and token ids by position.
///
/// Missing prices or ids become `None`; any malformed list yields no tokens.
pub fn parse_market_tokens(market: &GammaMarket) -> Vec<OutcomeToken> {
    let (Some(outcomes), Some(prices), Some(token_ids)) = (
        decode_list(market.outcomes.as_deref()),
        decode_list(market.outcome_prices.as_deref()),
        decode_list(market.clob_token_ids.as_deref()),
    ) else {
        return Vec::new();
    };

    let mut tokens = Vec::with_capacity(outcomes.len());
    for (i, outcome) in outcomes.into_iter().enumerate() {
        let price = match prices.get(i) {
            Some(raw) => match raw.parse::<Decimal>() {
                Ok(price) => Some(price),
                Err(_) => return Vec::new(),
            },
            None => None,
        };

        tokens.push(OutcomeToken {
            outcome,
            price,
            token_id: token_ids.get(i).cloned(),
        });
    }
    tokens
}

/// Keep markets whose question contains `query`, ignoring case.
///
/// A blank query keeps everything; markets without a question never match a
/// non-blank one.
pub fn filter_by_question(markets: Vec<GammaMarket>, query: &str) -> Vec<GammaMarket> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return markets;
    }

    markets
        .into_iter()
        .filter(|market| {
            market
                .question
                .as_deref()
                .is_some_and(|question| question.to_lowercase().contains(&query))
        })
        .collect()
}

/// Readable view of one market for the operator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketDetails {
    pub question: Option<String>,
    pub condition_id: Option<String>,
    pub outcomes: Vec<OutcomeToken>,
    pub volume: Option<String>,
    pub liquidity: Option<String>,
    pub end_date: Option<String>,
}

impl From<&GammaMarket> for MarketDetails {
    fn from(market: &GammaMarket) -> Self {
        Self {
            question: market.question.clone(),
            condition_id: market.condition_id.clone(),
            outcomes: parse_market_tokens(market),
            volume: market.volume.clone(),
            liquidity: market.liquidity.clone(),
            end_date: market.end_date.clone(),
        }
    }
}

/// Every outcome with `0 < price <= max_price`, cheapest first
pub fn find_low_price_outcomes(markets: &[GammaMarket], max_price: Decimal) -> Vec<LowPriceOutcome> {
    let mut results: Vec<LowPriceOutcome> = markets
        .iter()
        .flat_map(|market| {
            parse_market_tokens(market)
                .into_iter()
                .filter_map(move |token| {
                    let price = token.price?;
                    (price > Decimal::ZERO && price <= max_price).then(|| LowPriceOutcome {
                        question: market.question.clone(),
                        outcome: token.outcome,
                        token_id: token.token_id,
                        price,
                        condition_id: market.condition_id.clone(),
                    })
                })
        })
        .collect();

    results.sort_by(|a, b| a.price.cmp(&b.price));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn market(question: &str, outcomes: &str, prices: &str, ids: &str) -> GammaMarket {
        GammaMarket {
            id: None,
            question: Some(question.to_string()),
            condition_id: Some(format!("cond-{}", question)),
            slug: None,
            end_date: None,
            volume: None,
            liquidity: None,
            outcomes: Some(outcomes.to_string()),
            outcome_prices: Some(prices.to_string()),
            clob_token_ids: Some(ids.to_string()),
            active: Some(true),
            closed: Some(false),
        }
    }

    #[test]
    fn test_parse_market_tokens() {
        let m = market("q", r#"["Yes","No"]"#, r#"["0.031","0.969"]"#, r#"["1","2"]"#);
        let tokens = parse_market_tokens(&m);

        assert_eq!(
            tokens,
            vec![
                OutcomeToken {
                    outcome: "Yes".to_string(),
                    price: Some(dec!(0.031)),
                    token_id: Some("1".to_string()),
                },
                OutcomeToken {
                    outcome: "No".to_string(),
                    price: Some(dec!(0.969)),
                    token_id: Some("2".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_short_lists_leave_gaps() {
        let m = market("q", r#"["Yes","No"]"#, r#"["0.5"]"#, r#"[]"#);
        let tokens = parse_market_tokens(&m);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].price, None);
        assert_eq!(tokens[0].token_id, None);
    }

    #[test]
    fn test_malformed_lists_yield_nothing() {
        let m = market("q", "not json", r#"["0.5"]"#, r#"["1"]"#);
        assert!(parse_market_tokens(&m).is_empty());

        let m = market("q", r#"["Yes"]"#, r#"["cheap"]"#, r#"["1"]"#);
        assert!(parse_market_tokens(&m).is_empty());
    }

    #[test]
    fn test_find_low_price_outcomes_filters_and_sorts() {
        let markets = vec![
            market("a", r#"["Yes","No"]"#, r#"["0.04","0.96"]"#, r#"["a1","a2"]"#),
            market("b", r#"["Yes","No"]"#, r#"["0","1"]"#, r#"["b1","b2"]"#),
            market("c", r#"["Yes","No"]"#, r#"["0.95","0.005"]"#, r#"["c1","c2"]"#),
            market("d", r#"["Yes","No"]"#, r#"["0.05","0.95"]"#, r#"["d1","d2"]"#),
        ];

        let found = find_low_price_outcomes(&markets, dec!(0.05));
        let ids: Vec<_> = found.iter().map(|o| o.token_id.as_deref().unwrap()).collect();

        assert_eq!(ids, vec!["c2", "a1", "d1"]);
        assert_eq!(found[0].condition_id.as_deref(), Some("cond-c"));
    }

    #[test]
    fn test_filter_by_question_ignores_case() {
        let markets = vec![
            market("Will BITCOIN hit 200k?", r#"["Yes","No"]"#, r#"["0.02","0.98"]"#, r#"["1","2"]"#),
            market("Election winner", r#"["A","B"]"#, r#"["0.5","0.5"]"#, r#"["3","4"]"#),
        ];

        let found = filter_by_question(markets.clone(), "bitcoin");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question.as_deref(), Some("Will BITCOIN hit 200k?"));

        assert_eq!(filter_by_question(markets.clone(), "  ").len(), 2);
        assert!(filter_by_question(markets, "weather").is_empty());
    }

    #[test]
    fn test_market_details() {
        let mut m = market("q", r#"["Yes","No"]"#, r#"["0.01","0.99"]"#, r#"["1","2"]"#);
        m.volume = Some("2500.5".to_string());
        m.end_date = Some("2026-12-31T00:00:00Z".to_string());

        let details = MarketDetails::from(&m);
        assert_eq!(details.condition_id.as_deref(), Some("cond-q"));
        assert_eq!(details.outcomes.len(), 2);
        assert_eq!(details.volume.as_deref(), Some("2500.5"));
        assert_eq!(details.liquidity, None);
    }
}
