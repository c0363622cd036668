use composer_calldata::encoding::{
    catalog::GoldenFixture, errors::EncodingError, evm::encoder_registry::EncoderRegistry,
};

const FIXTURES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/golden_outputs.json");

fn registry() -> EncoderRegistry {
    EncoderRegistry::new(None).unwrap()
}

#[test]
fn test_golden_fixtures_match() {
    let fixtures = GoldenFixture::load_all(FIXTURES_PATH).unwrap();
    let mismatches = registry().verify_fixtures(&fixtures);
    assert!(mismatches.is_empty(), "mismatching fixtures: {:#?}", mismatches);
}

#[test]
fn test_every_catalog_entry_has_a_fixture() {
    let fixtures = GoldenFixture::load_all(FIXTURES_PATH).unwrap();
    let registry = registry();
    for entry in registry.catalog().entries() {
        assert!(
            fixtures
                .iter()
                .any(|fixture| fixture.name == entry.name),
            "no fixture for {}",
            entry.name
        );
    }
}

#[test]
fn test_rejection_aborts_the_whole_encode() {
    let args: Vec<String> = [
        "0x",
        "0x1de17a0000000000000000000000000000000000",
        "0x1de17a0000000000000000000000000000000000",
        "0x1de17a0000000000000000000000000000000000",
        "3",
    ]
    .iter()
    .map(|arg| arg.to_string())
    .collect();
    let result = registry().encode("encodeWooStyleSwap", &args);
    assert_eq!(
        result,
        Err(EncodingError::InvalidInput("Woo swaps do not support the flash pay config".to_string()))
    );
}

#[test]
fn test_attach_branch_rejects_dangling_split_data() {
    let args: Vec<String> =
        ["0xabcd", "0", "0", "0x1234"].iter().map(|arg| arg.to_string()).collect();
    let result = registry().encode("attachBranch", &args);
    assert!(matches!(result, Err(EncodingError::InvalidInput(_))));
}
