//! Unit tests for currencies, precision rounding and conversion
//!
//! Tests cover the supported currency set, half-away-from-zero rounding,
//! zero- and three-decimal currencies, and conversion provenance.

use core_kernel::{convert, get_currency, round_to_precision, Currency, CurrencyAmount, MoneyError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod currency_lookup {
    use super::*;

    #[test]
    fn test_every_supported_currency_round_trips_through_its_code() {
        for currency in Currency::ALL {
            assert_eq!(get_currency(currency.code()), Some(currency));
            assert_eq!(currency.code().parse::<Currency>(), Ok(currency));
        }
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        assert_eq!(get_currency("ZZZ"), None);
        assert_eq!(get_currency(""), None);
    }

    #[test]
    fn test_from_str_reports_unsupported_code() {
        let result = "BTC".parse::<Currency>();
        assert_eq!(result, Err(MoneyError::UnsupportedCurrency("BTC".to_string())));
    }

    #[test]
    fn test_currency_metadata() {
        assert_eq!(Currency::INR.symbol(), "₹");
        assert_eq!(Currency::INR.name(), "Indian Rupee");
        assert_eq!(Currency::JPY.decimal_places(), 0);
        assert_eq!(Currency::KWD.decimal_places(), 3);
        assert_eq!(Currency::EUR.decimal_places(), 2);
    }

    #[test]
    fn test_serde_uses_iso_code() {
        let json = serde_json::to_string(&Currency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");
        let back: Currency = serde_json::from_str("\"AED\"").unwrap();
        assert_eq!(back, Currency::AED);
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_to_precision(dec!(0.125), Currency::USD), dec!(0.13));
        assert_eq!(round_to_precision(dec!(-0.125), Currency::USD), dec!(-0.13));
        assert_eq!(round_to_precision(dec!(0.124), Currency::USD), dec!(0.12));
    }

    #[test]
    fn test_zero_decimal_currency_is_integral() {
        let rounded = round_to_precision(dec!(1234.5), Currency::JPY);
        assert_eq!(rounded, dec!(1235));
        assert_eq!(rounded.fract(), Decimal::ZERO);
    }

    #[test]
    fn test_three_decimal_currency() {
        assert_eq!(round_to_precision(dec!(10.12345), Currency::KWD), dec!(10.123));
        assert_eq!(round_to_precision(dec!(10.1235), Currency::KWD), dec!(10.124));
    }

    #[test]
    fn test_currency_round_helper_matches_free_function() {
        assert_eq!(Currency::INR.round(dec!(99.995)), round_to_precision(dec!(99.995), Currency::INR));
    }
}

mod conversion {
    use super::*;

    #[test]
    fn test_convert_usd_to_eur() {
        let converted = convert(dec!(100), Currency::USD, Currency::EUR, dec!(0.85)).unwrap();
        assert_eq!(converted.amount, dec!(85));
        assert!(converted.is_converted());
    }

    #[test]
    fn test_convert_same_currency() {
        let converted = convert(dec!(100), Currency::USD, Currency::USD, dec!(1)).unwrap();
        assert_eq!(converted.amount, dec!(100));
        assert_eq!(converted.base_amount, Some(dec!(100)));
        assert_eq!(converted.exchange_rate, Some(dec!(1)));
    }

    #[test]
    fn test_same_currency_ignores_supplied_rate() {
        let converted = convert(dec!(42.42), Currency::INR, Currency::INR, dec!(83.1)).unwrap();
        assert_eq!(converted.amount, dec!(42.42));
        assert_eq!(converted.exchange_rate, Some(Decimal::ONE));
    }

    #[test]
    fn test_convert_rounds_to_target_precision() {
        let converted = convert(dec!(10), Currency::USD, Currency::JPY, dec!(151.237)).unwrap();
        assert_eq!(converted.amount, dec!(1512));

        let converted = convert(dec!(10), Currency::USD, Currency::INR, dec!(83.3333)).unwrap();
        assert_eq!(converted.amount, dec!(833.33));
    }

    #[test]
    fn test_overflowing_conversion_is_an_error() {
        let result = convert(Decimal::MAX, Currency::USD, Currency::INR, dec!(83.25));
        assert!(matches!(result, Err(MoneyError::Overflow { .. })));

        let identity = convert(Decimal::MAX, Currency::USD, Currency::USD, dec!(83.25)).unwrap();
        assert_eq!(identity.amount, Decimal::MAX);
    }

    #[test]
    fn test_plain_amount_has_no_provenance() {
        let amount = CurrencyAmount::new(dec!(5), Currency::EUR);
        assert!(!amount.is_converted());
        let json = serde_json::to_value(&amount).unwrap();
        assert!(json.get("exchangeRate").is_none());
        assert!(json.get("baseAmount").is_none());
    }

    #[test]
    fn test_converted_amount_serializes_provenance() {
        let converted = convert(dec!(100), Currency::USD, Currency::EUR, dec!(0.85)).unwrap();
        let json = serde_json::to_value(&converted).unwrap();
        assert_eq!(json["currency"], "EUR");
        assert!(json.get("exchangeRate").is_some());
        assert!(json.get("baseAmount").is_some());
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_currency() -> impl Strategy<Value = Currency> {
        proptest::sample::select(Currency::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn rounding_is_idempotent(
            mantissa in -10_000_000_000i64..10_000_000_000i64,
            scale in 0u32..8u32,
            currency in any_currency()
        ) {
            let x = Decimal::new(mantissa, scale);
            let once = round_to_precision(x, currency);
            prop_assert_eq!(round_to_precision(once, currency), once);
        }

        #[test]
        fn rounding_never_exceeds_currency_scale(
            mantissa in -10_000_000_000i64..10_000_000_000i64,
            scale in 0u32..8u32,
            currency in any_currency()
        ) {
            let rounded = round_to_precision(Decimal::new(mantissa, scale), currency);
            prop_assert!(rounded.scale() <= currency.decimal_places());
        }
    }
}
