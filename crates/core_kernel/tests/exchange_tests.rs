//! Tests for exchange-rate resolution and freshness
//!
//! Each resolution strategy is exercised on its own and through the
//! standard chain, including the USD cross-rate fallback.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::{
    are_rates_fresh, resolve_rate, AnchorCrossRate, Currency, DirectRate, ExchangeRate,
    FreshnessPolicy, IdentityRate, InverseRate, RateResolutionChain, RateResolver,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap()
}

fn quote(base: Currency, target: Currency, rate: Decimal) -> ExchangeRate {
    ExchangeRate::new(base, target, rate, now())
}

fn approx(actual: Decimal, expected: Decimal) -> bool {
    (actual - expected).abs() < dec!(0.0001)
}

mod resolution {
    use super::*;

    #[test]
    fn test_identity_resolves_without_quotes() {
        assert_eq!(resolve_rate(Currency::INR, Currency::INR, &[]), Some(Decimal::ONE));
        assert_eq!(IdentityRate.resolve(Currency::INR, Currency::USD, &[]), None);
    }

    #[test]
    fn test_direct_quote() {
        let rates = vec![quote(Currency::USD, Currency::INR, dec!(83.12))];
        assert_eq!(resolve_rate(Currency::USD, Currency::INR, &rates), Some(dec!(83.12)));
    }

    #[test]
    fn test_reciprocal_of_inverse_pair() {
        let rates = vec![quote(Currency::EUR, Currency::USD, dec!(1.1765))];
        let rate = resolve_rate(Currency::USD, Currency::EUR, &rates).unwrap();
        assert!(approx(rate, dec!(0.85)), "got {}", rate);
    }

    #[test]
    fn test_cross_rate_through_usd() {
        // 1 GBP = 1.25 USD, 1 INR = 0.012 USD -> 1 GBP = 104.1666.. INR
        let rates = vec![
            quote(Currency::GBP, Currency::USD, dec!(1.25)),
            quote(Currency::INR, Currency::USD, dec!(0.012)),
        ];
        let rate = resolve_rate(Currency::GBP, Currency::INR, &rates).unwrap();
        assert!(approx(rate, dec!(104.16666)), "got {}", rate);
    }

    #[test]
    fn test_cross_rate_accepts_usd_quoted_legs() {
        // Legs quoted from USD outward are inverted before crossing
        let rates = vec![
            quote(Currency::USD, Currency::EUR, dec!(0.8)),
            quote(Currency::USD, Currency::JPY, dec!(150)),
        ];
        let rate = resolve_rate(Currency::EUR, Currency::JPY, &rates).unwrap();
        assert!(approx(rate, dec!(187.5)), "got {}", rate);
    }

    #[test]
    fn test_cross_rate_strategy_alone() {
        let rates = vec![
            quote(Currency::AUD, Currency::USD, dec!(0.66)),
            quote(Currency::CAD, Currency::USD, dec!(0.73)),
        ];
        let cross = AnchorCrossRate::default();
        assert!(cross.resolve(Currency::AUD, Currency::CAD, &rates).is_some());
        assert_eq!(DirectRate.resolve(Currency::AUD, Currency::CAD, &rates), None);
        assert_eq!(InverseRate.resolve(Currency::AUD, Currency::CAD, &rates), None);
    }

    #[test]
    fn test_unresolvable_pair_is_none() {
        let rates = vec![quote(Currency::GBP, Currency::USD, dec!(1.25))];
        assert_eq!(resolve_rate(Currency::GBP, Currency::SGD, &rates), None);
        assert_eq!(resolve_rate(Currency::GBP, Currency::SGD, &[]), None);
    }

    #[test]
    fn test_custom_chain_without_cross_rates() {
        let chain = RateResolutionChain::empty().with(DirectRate).with(InverseRate);
        let rates = vec![
            quote(Currency::GBP, Currency::USD, dec!(1.25)),
            quote(Currency::INR, Currency::USD, dec!(0.012)),
        ];
        assert_eq!(chain.resolve(Currency::GBP, Currency::INR, &rates), None);
        assert_eq!(chain.strategy_names(), vec!["direct", "inverse"]);
    }

    #[test]
    fn test_inverse_quote() {
        let q = quote(Currency::EUR, Currency::USD, dec!(1.25)).with_source("ecb");
        let inverse = q.inverse().unwrap();
        assert_eq!(inverse.base_currency, Currency::USD);
        assert_eq!(inverse.target_currency, Currency::EUR);
        assert_eq!(inverse.rate, dec!(0.8));
        assert_eq!(inverse.source.as_deref(), Some("ecb"));
        assert!(quote(Currency::EUR, Currency::USD, Decimal::ZERO).inverse().is_none());
    }
}

mod freshness {
    use super::*;

    fn aged(minutes: i64) -> ExchangeRate {
        ExchangeRate::new(
            Currency::USD,
            Currency::EUR,
            dec!(0.85),
            now() - Duration::minutes(minutes),
        )
    }

    #[test]
    fn test_all_fresh_rates() {
        let rates = vec![aged(5), aged(59)];
        assert!(are_rates_fresh(&rates, Duration::hours(1), now()));
    }

    #[test]
    fn test_exact_boundary_is_fresh() {
        assert!(are_rates_fresh(&[aged(60)], Duration::hours(1), now()));
    }

    #[test]
    fn test_single_stale_rate_marks_set_stale() {
        let rates = vec![aged(1), aged(2), aged(61)];
        assert!(!are_rates_fresh(&rates, Duration::hours(1), now()));
    }

    #[test]
    fn test_empty_set_is_fresh() {
        assert!(are_rates_fresh(&[], Duration::hours(1), now()));
    }

    #[test]
    fn test_policy_default_is_one_hour() {
        let policy = FreshnessPolicy::default();
        assert_eq!(policy.max_age, Duration::hours(1));
        assert!(policy.all_fresh(&[aged(30)], now()));
        assert!(!policy.all_fresh(&[aged(90)], now()));
        assert!(FreshnessPolicy::from_hours(2).all_fresh(&[aged(90)], now()));
    }

    #[test]
    fn test_age() {
        assert_eq!(aged(15).age(now()), Duration::minutes(15));
    }
}
