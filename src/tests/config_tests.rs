// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::{BfpConfig, ContractCheck, S16_SQRT_MAX_DEPTH, S32_SQRT_MAX_DEPTH};
use crate::error::BfpError;

#[test]
fn test_defaults() {
    let config = BfpConfig::default();
    assert!(!config.allow_saturation);
    assert_eq!(config.checks, ContractCheck::Debug);
    assert_eq!(config.sqrt_depth_s16, S16_SQRT_MAX_DEPTH);
    assert_eq!(config.sqrt_depth_s32, S32_SQRT_MAX_DEPTH);
    assert!(config.keep_headroom_on_narrowing);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_partial_json_fills_defaults() {
    let config: BfpConfig =
        serde_json::from_str(r#"{ "allow_saturation": true, "checks": "always" }"#).unwrap();
    assert!(config.allow_saturation);
    assert_eq!(config.checks, ContractCheck::Always);
    assert_eq!(config.sqrt_depth_s32, S32_SQRT_MAX_DEPTH);
    assert!(config.keep_headroom_on_narrowing);
}

#[test]
fn test_json_round_trip() {
    let config = BfpConfig {
        checks: ContractCheck::Off,
        sqrt_depth_s16: 8,
        ..BfpConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""checks":"off""#));
    let back: BfpConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_unknown_check_mode_rejected() {
    let res: Result<BfpConfig, _> = serde_json::from_str(r#"{ "checks": "sometimes" }"#);
    assert!(res.is_err());
}

#[test]
fn test_validate_rejects_out_of_range_depths() {
    let config = BfpConfig {
        sqrt_depth_s32: 32,
        ..BfpConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(BfpError::InvalidSqrtDepth { depth: 32, max: 31 })
    );

    let config = BfpConfig {
        sqrt_depth_s16: 16,
        ..BfpConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(BfpError::InvalidSqrtDepth { depth: 16, max: 15 })
    );
}

#[test]
fn test_sqrt_depth_by_width() {
    let config = BfpConfig {
        sqrt_depth_s16: 5,
        sqrt_depth_s32: 20,
        ..BfpConfig::default()
    };
    assert_eq!(config.sqrt_depth::<i16>(), 5);
    assert_eq!(config.sqrt_depth::<i32>(), 20);
}

#[test]
fn test_error_messages() {
    let e = BfpError::LengthMismatch {
        expected: 4,
        found: 3,
    };
    assert_eq!(std::format!("{}", e), "Length mismatch: expected 4, found 3");
    assert_eq!(
        std::format!("{}", BfpError::InvalidSqrtDepth { depth: 0, max: 15 }),
        "Invalid sqrt depth 0: must be in 1..=15"
    );
}
