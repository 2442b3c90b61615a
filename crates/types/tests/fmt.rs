use offering_types::{Address, AddressParseError, Coins, CoinsParseError, FriendlyFlags};
use prop::test_runner::FileFailurePersistence;
use proptest::{prelude::*, test_runner::Config};

const ZERO_BOUNCEABLE: &str = "EQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAM9c";
const ZERO_NON_BOUNCEABLE: &str = "UQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAJKZ";
const CONTRACT_RAW: &str = "0:7f4df4500183c056d83b046fd6db0ab486f663ab96e34ff4b81ab2d6dd5c5b4f";
const CONTRACT_FRIENDLY: &str = "EQB_TfRQAYPAVtg7BG_W2wq0hvZjq5bjT_S4GrLW3VxbTwT7";

proptest! {
    #![proptest_config(Config::with_failure_persistence(FileFailurePersistence::WithSource("regressions")))]

    #[test]
    fn address_roundtrip(workchain in any::<i8>(), hash in prop::array::uniform32(0u8..)) {
        let addr = Address::new(workchain, hash);

        // `fmt::Debug`
        let raw = format!("{addr:?}");
        // `fmt::Display`
        let display = format!("{addr}");
        // `fmt::LowerHex`
        let lower_hex = format!("{addr:x}");

        prop_assert_eq!(raw.parse::<Address>().unwrap(), addr);
        prop_assert_eq!(display.parse::<Address>().unwrap(), addr);
        prop_assert_eq!(display.len(), 48);
        prop_assert_eq!(lower_hex.len(), 64);
    }

    #[test]
    fn friendly_flags_roundtrip(
        hash in prop::array::uniform32(0u8..),
        bounceable in any::<bool>(),
        test_only in any::<bool>(),
    ) {
        let addr = Address::new(0, hash);
        let flags = FriendlyFlags { bounceable, test_only, url_safe: false };
        let encoded = addr.to_friendly(flags);
        let (parsed, parsed_flags) = Address::parse_friendly(&encoded).unwrap();
        prop_assert_eq!(parsed, addr);
        prop_assert_eq!(parsed_flags.bounceable, bounceable);
        prop_assert_eq!(parsed_flags.test_only, test_only);
    }

    #[test]
    fn coins_roundtrip(nano in 0u128..(1 << 120)) {
        let coins = Coins(nano);
        let display = coins.to_string();
        prop_assert_eq!(display.parse::<Coins>().unwrap(), coins);
    }
}

#[test]
fn zero_address_forms() {
    let zero = Address::new(0, [0; 32]);
    assert_eq!(zero.to_friendly(FriendlyFlags::default()), ZERO_BOUNCEABLE);
    let non_bounceable = FriendlyFlags {
        bounceable: false,
        ..Default::default()
    };
    assert_eq!(zero.to_friendly(non_bounceable), ZERO_NON_BOUNCEABLE);
    assert_eq!(
        zero.to_raw_string(),
        "0:0000000000000000000000000000000000000000000000000000000000000000"
    );
}

#[test]
fn contract_address_forms() {
    let addr: Address = CONTRACT_RAW.parse().unwrap();
    assert_eq!(addr.to_string(), CONTRACT_FRIENDLY);
    let (parsed, flags) = Address::parse_friendly(CONTRACT_FRIENDLY).unwrap();
    assert_eq!(parsed, addr);
    assert!(flags.bounceable);
    assert!(flags.url_safe);
}

#[test]
fn friendly_checksum_is_checked() {
    let mut corrupted = ZERO_BOUNCEABLE.to_string();
    corrupted.replace_range(10..11, "B");
    assert_eq!(
        Address::parse_friendly(&corrupted).unwrap_err(),
        AddressParseError::Checksum
    );
    assert_eq!(
        Address::parse_friendly("EQAA").unwrap_err(),
        AddressParseError::InvalidLength(4)
    );
}

#[test]
fn invalid_raw_addresses() {
    for s in ["0:abcd", "x:00", "300:7f4df4500183c056d83b046fd6db0ab486f663ab96e34ff4b81ab2d6dd5c5b4f"] {
        assert!(matches!(
            s.parse::<Address>().unwrap_err(),
            AddressParseError::InvalidRaw(_)
        ), "{s}");
    }
}

#[test]
fn coins_display() {
    assert_eq!(Coins(0).to_string(), "0");
    assert_eq!(Coins(200_000_000).to_string(), "0.2");
    assert_eq!(Coins(1_500_000_000).to_string(), "1.5");
    assert_eq!(Coins(1).to_string(), "0.000000001");
}

#[test]
fn coins_parse() {
    assert_eq!("0.5".parse::<Coins>().unwrap(), Coins(500_000_000));
    assert_eq!("2".parse::<Coins>().unwrap(), Coins(2_000_000_000));
    assert_eq!("0.000000001".parse::<Coins>().unwrap(), Coins(1));
    assert_eq!(
        "0.0000000001".parse::<Coins>().unwrap_err(),
        CoinsParseError::TooPrecise("0.0000000001".into())
    );
    for s in ["", ".5", "1.2.3", "-1", "1e9"] {
        assert_eq!(
            s.parse::<Coins>().unwrap_err(),
            CoinsParseError::Invalid(s.into())
        );
    }
}

#[test]
fn coins_parse_rejects_empty_fraction() {
    for s in ["1.", "0.", "."] {
        assert_eq!(
            s.parse::<Coins>().unwrap_err(),
            CoinsParseError::Invalid(s.into())
        );
    }
}

#[test]
fn serde_human_readable() {
    let addr: Address = CONTRACT_RAW.parse().unwrap();
    let json = serde_json::to_string(&addr).unwrap();
    assert_eq!(json, format!("\"{CONTRACT_RAW}\""));
    assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), addr);
    let friendly = format!("\"{CONTRACT_FRIENDLY}\"");
    assert_eq!(serde_json::from_str::<Address>(&friendly).unwrap(), addr);

    let coins = Coins(500_000_000);
    let json = serde_json::to_string(&coins).unwrap();
    assert_eq!(json, "\"500000000\"");
    assert_eq!(serde_json::from_str::<Coins>(&json).unwrap(), coins);
}
