//! End-to-end normalization of JSON transaction requests.

use alloy_primitives::Address;
use linea::abi::{coerce_args, parse_function};
use linea::chain::{DEFAULT_MAX_GAS, GasLimit};
use linea::config::parse_config;
use linea::{Error, Linea, ProviderContext, TransactionRequest, TransactionType};
use rstest::rstest;
use serde_json::{Value, json};

const CONTRACT: &str = "0x274b028b03A250cA03644E6c578D81f019eE1323";

fn request(fields: Value) -> TransactionRequest {
    serde_json::from_value(fields).unwrap()
}

fn local() -> ProviderContext {
    ProviderContext::for_network("local", None).unwrap()
}

#[test]
fn test_local_gas_limit_is_max() {
    let linea = Linea::default();
    assert_eq!(linea.config().local.gas_limit, GasLimit::Max);
}

#[rstest]
#[case::integer(json!({"type": 0}))]
#[case::hex(json!({"type": "0x0"}))]
#[case::gas_price(json!({"gas_price": 1_000_000_000u64}))]
#[case::null_gas_price(json!({"gas_price": null}))]
fn test_static_fee_on_local(#[case] fields: Value) {
    let tx = Linea::default()
        .create_transaction(request(fields), Some(&local()))
        .unwrap();
    assert_eq!(tx.tx_type(), TransactionType::Static);
    assert_eq!(tx.gas_limit(), Some(DEFAULT_MAX_GAS));
}

#[test]
fn test_serialized_transaction_shape() {
    let provider = ProviderContext::for_network("mainnet", None).unwrap();
    let tx = Linea::default()
        .create_transaction(
            request(json!({
                "from": CONTRACT,
                "gas": 21000,
                "max_fee": 30,
                "max_priority_fee": 2,
                "value": "1 gwei",
            })),
            Some(&provider),
        )
        .unwrap();

    let value = serde_json::to_value(&tx).unwrap();
    assert_eq!(value["type"], json!(2));
    assert_eq!(value["chainId"], json!(59144));
    assert_eq!(value["gas"], json!(21000));
    assert_eq!(value["maxFeePerGas"], json!(30));
    assert_eq!(value["maxPriorityFeePerGas"], json!(2));
    assert_eq!(value["requiredConfirmations"], json!(1));
    assert_eq!(value["value"], json!("0x3b9aca00"));
    assert!(value.get("gasPrice").is_none());
}

#[test]
fn test_configured_default_type_applies() {
    let config = parse_config("[mainnet]\ndefault_transaction_type = 0\n").unwrap();
    let provider = ProviderContext::for_network("mainnet", None).unwrap();
    let tx = Linea::new(config)
        .create_transaction(TransactionRequest::default(), Some(&provider))
        .unwrap();
    assert_eq!(tx.tx_type(), TransactionType::Static);
    assert_eq!(tx.gas_limit(), None);
}

#[test]
fn test_fixed_gas_limit_policy() {
    let config = parse_config("[goerli]\ngas_limit = 8000000\n").unwrap();
    let provider = ProviderContext::for_network("goerli", None).unwrap();
    let tx = Linea::new(config)
        .create_transaction(TransactionRequest::default(), Some(&provider))
        .unwrap();
    assert_eq!(tx.gas_limit(), Some(8_000_000));
    assert_eq!(tx.chain_id(), Some(59140));
}

#[rstest]
#[case::access_list(json!({"type": 1}), "conversion")]
#[case::bad_chain_id(json!({"chainId": "mainnet"}), "conversion")]
#[case::mixed_fees(json!({"type": 2, "gas_price": 1}), "construction")]
#[case::partial_signature(json!({"v": 27}), "construction")]
fn test_rejections(#[case] fields: Value, #[case] kind: &str) {
    let err = Linea::default()
        .create_transaction(request(fields), Some(&local()))
        .unwrap_err();
    assert!(err.to_string().starts_with(kind), "{err}");
}

#[rstest]
#[case::static_fee(0)]
#[case::dynamic_fee(2)]
fn test_encode_foo_and_bar(#[case] tx_type: u64) {
    let function = parse_function("fooAndBar()").unwrap();
    let address: Address = CONTRACT.parse().unwrap();
    let tx = Linea::default()
        .encode_transaction(
            address,
            &function,
            &[],
            request(json!({"type": tx_type})),
            Some(&local()),
        )
        .unwrap();

    assert_eq!(u64::from(tx.tx_type().code()), tx_type);
    assert_eq!(tx.gas_limit(), Some(DEFAULT_MAX_GAS));
    assert_eq!(tx.common().receiver, Some(address));
    assert_eq!(tx.common().data.as_ref(), function.selector().as_slice());
}

#[test]
fn test_encode_with_arguments() {
    let function = parse_function("function transfer(address to, uint256 amount)").unwrap();
    let args = coerce_args(&function.inputs, &[CONTRACT, "5"]).unwrap();
    let tx = Linea::default()
        .encode_transaction(
            CONTRACT.parse().unwrap(),
            &function,
            &args,
            TransactionRequest::default(),
            Some(&local()),
        )
        .unwrap();
    assert_eq!(tx.common().data.len(), 4 + 32 * 2);

    let err = coerce_args(&function.inputs, &["5"]).unwrap_err();
    assert!(matches!(err, Error::Abi(_)));
}
