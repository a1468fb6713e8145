//! End-to-end flows across the registry, escrow, price feed and ledger
//! contracts, deployed side by side on an in-process chain.

use cosmwasm_std::{coins, Addr, Coin, Empty, Uint128};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use pharma_chain_config::DeploymentConfig;
use pharma_chain_types::escrow::{
    EscrowResponse, ExecuteMsg as EscrowExecuteMsg, QueryMsg as EscrowQueryMsg,
};
use pharma_chain_types::ledger::{
    BatchQuoteResponse, BatchResponse, ExecuteMsg as LedgerExecuteMsg,
    QueryMsg as LedgerQueryMsg, ReturnRequestResponse,
};
use pharma_chain_types::registry::ExecuteMsg as RegistryExecuteMsg;
use pharma_chain_types::{BatchStatus, PaymentState, ReturnStatus, Role};

const DENOM: &str = "uatom";
const STARTING_BALANCE: u128 = 1_000;

// ═══════════════════════════════════════════════════════════════════════════
// DEPLOYMENT
// ═══════════════════════════════════════════════════════════════════════════

fn registry_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        pharma_role_registry::contract::execute,
        pharma_role_registry::contract::instantiate,
        pharma_role_registry::contract::query,
    ))
}

fn escrow_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        pharma_escrow::contract::execute,
        pharma_escrow::contract::instantiate,
        pharma_escrow::contract::query,
    ))
}

fn price_feed_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        pharma_price_feed::contract::execute,
        pharma_price_feed::contract::instantiate,
        pharma_price_feed::contract::query,
    ))
}

fn ledger_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        pharma_supply_chain::contract::execute,
        pharma_supply_chain::contract::instantiate,
        pharma_supply_chain::contract::query,
    ))
}

struct Suite {
    app: App,
    admin: Addr,
    manufacturer: Addr,
    distributor: Addr,
    retailer: Addr,
    registry: Addr,
    escrow: Addr,
    ledger: Addr,
}

impl Suite {
    fn new() -> Self {
        let mut app = App::default();
        let admin = app.api().addr_make("admin");
        let manufacturer = app.api().addr_make("manufacturer");
        let distributor = app.api().addr_make("distributor");
        let retailer = app.api().addr_make("retailer");

        app.init_modules(|router, _, storage| {
            for buyer in [&distributor, &retailer] {
                router
                    .bank
                    .init_balance(storage, buyer, coins(STARTING_BALANCE, DENOM))
                    .unwrap();
            }
        });

        let deployment = DeploymentConfig::testnet();

        let registry_code = app.store_code(registry_contract());
        let escrow_code = app.store_code(escrow_contract());
        let feed_code = app.store_code(price_feed_contract());
        let ledger_code = app.store_code(ledger_contract());

        let registry = app
            .instantiate_contract(
                registry_code,
                admin.clone(),
                &deployment.registry_instantiate_msg(),
                &[],
                "role-registry",
                None,
            )
            .unwrap();
        let escrow = app
            .instantiate_contract(
                escrow_code,
                admin.clone(),
                &deployment.escrow_instantiate_msg(),
                &[],
                "escrow",
                None,
            )
            .unwrap();
        let price_feed = app
            .instantiate_contract(
                feed_code,
                admin.clone(),
                &deployment.price_feed_instantiate_msg(),
                &[],
                "price-feed",
                None,
            )
            .unwrap();
        let ledger = app
            .instantiate_contract(
                ledger_code,
                admin.clone(),
                &deployment.ledger_instantiate_msg(&registry, &escrow, &price_feed),
                &[],
                "supply-chain",
                None,
            )
            .unwrap();

        for (role, account) in [
            (Role::Manufacturer, &manufacturer),
            (Role::Distributor, &distributor),
            (Role::Retailer, &retailer),
        ] {
            app.execute_contract(
                admin.clone(),
                registry.clone(),
                &RegistryExecuteMsg::Grant {
                    role,
                    address: account.to_string(),
                },
                &[],
            )
            .unwrap();
        }

        Self {
            app,
            admin,
            manufacturer,
            distributor,
            retailer,
            registry,
            escrow,
            ledger,
        }
    }

    fn ledger_exec(
        &mut self,
        sender: &Addr,
        msg: LedgerExecuteMsg,
        funds: u128,
    ) -> anyhow::Result<AppResponse> {
        let funds: Vec<Coin> = if funds == 0 {
            vec![]
        } else {
            coins(funds, DENOM)
        };
        self.app
            .execute_contract(sender.clone(), self.ledger.clone(), &msg, &funds)
    }

    fn create_batch(&mut self, price: u128) -> u64 {
        let expiry = self.app.block_info().time.seconds() + 30 * 86_400;
        let manufacturer = self.manufacturer.clone();
        let res = self
            .ledger_exec(
                &manufacturer,
                LedgerExecuteMsg::CreateBatch {
                    manufacturer: manufacturer.to_string(),
                    expiry,
                    price: Uint128::new(price),
                    content_ref: "QmPatientLeaflet".to_string(),
                },
                0,
            )
            .unwrap();
        event_attr(&res, "wasm-BatchCreated", "batch_id")
            .parse()
            .unwrap()
    }

    fn batch(&self, batch_id: u64) -> BatchResponse {
        self.app
            .wrap()
            .query_wasm_smart(&self.ledger, &LedgerQueryMsg::BatchDetails { batch_id })
            .unwrap()
    }

    fn escrow_entry(&self, reference: &str) -> EscrowResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.escrow,
                &EscrowQueryMsg::Escrow {
                    depositor: self.ledger.to_string(),
                    reference: reference.to_string(),
                },
            )
            .unwrap()
    }

    fn balance(&self, account: &Addr) -> u128 {
        self.app
            .wrap()
            .query_balance(account, DENOM)
            .unwrap()
            .amount
            .u128()
    }
}

fn event_attr(res: &AppResponse, ty: &str, key: &str) -> String {
    res.events
        .iter()
        .find(|e| e.ty == ty)
        .and_then(|e| e.attributes.iter().find(|a| a.key == key))
        .map(|a| a.value.clone())
        .unwrap_or_else(|| panic!("missing {ty}.{key}"))
}

// ═══════════════════════════════════════════════════════════════════════════
// HAPPY PATH
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_full_custody_round_trip() {
    let mut suite = Suite::new();
    let id = suite.create_batch(100);
    assert_eq!(id, 1);

    let (distributor, retailer) = (suite.distributor.clone(), suite.retailer.clone());

    let res = suite
        .ledger_exec(
            &distributor,
            LedgerExecuteMsg::BuyAsDistributor {
                batch_id: id,
                offer_price: Uint128::new(150),
            },
            100,
        )
        .unwrap();
    assert_eq!(
        event_attr(&res, "wasm-DistributorPurchased", "distributor"),
        distributor.to_string()
    );

    let res = suite
        .ledger_exec(
            &retailer,
            LedgerExecuteMsg::BuyAsRetailer { batch_id: id },
            150,
        )
        .unwrap();
    assert_eq!(
        event_attr(&res, "wasm-RetailerPurchased", "retailer"),
        retailer.to_string()
    );

    let batch = suite.batch(id);
    assert_eq!(batch.status, BatchStatus::WithRetailer);
    assert_eq!(batch.holder, retailer.to_string());

    // The manufacturer's payment settled when the retailer bought
    let upstream = suite.escrow_entry("batch-1-distributor");
    assert!(upstream.released);
    assert_eq!(upstream.amount, Uint128::new(100));
    assert_eq!(suite.balance(&suite.manufacturer), 100);
    assert_eq!(suite.balance(&distributor), STARTING_BALANCE - 100);
    assert_eq!(suite.balance(&retailer), STARTING_BALANCE - 150);
    assert_eq!(suite.balance(&suite.escrow), 150);
    assert_eq!(suite.balance(&suite.ledger), 0);

    // Delivery confirmation pays the distributor
    suite
        .ledger_exec(
            &retailer,
            LedgerExecuteMsg::ConfirmDelivery { batch_id: id },
            0,
        )
        .unwrap();
    assert_eq!(suite.balance(&distributor), STARTING_BALANCE + 50);
    assert_eq!(suite.balance(&suite.escrow), 0);
    assert_eq!(
        suite.batch(id).retailer_payment.unwrap().state,
        PaymentState::Released
    );
}

#[test]
fn test_overpayment_is_returned() {
    let mut suite = Suite::new();
    let id = suite.create_batch(100);
    let distributor = suite.distributor.clone();

    suite
        .ledger_exec(
            &distributor,
            LedgerExecuteMsg::BuyAsDistributor {
                batch_id: id,
                offer_price: Uint128::new(150),
            },
            250,
        )
        .unwrap();

    assert_eq!(suite.balance(&distributor), STARTING_BALANCE - 100);
    assert_eq!(suite.balance(&suite.escrow), 100);
    assert_eq!(suite.balance(&suite.ledger), 0);
}

#[test]
fn test_batch_quote_reads_price_feed() {
    let mut suite = Suite::new();
    let id = suite.create_batch(100);

    let quote: BatchQuoteResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.ledger, &LedgerQueryMsg::BatchQuote { batch_id: id })
        .unwrap();

    // 100 * 4358.00000000 at 8 decimals
    assert_eq!(quote.feed_value, Uint128::new(435_800));
    assert_eq!(quote.feed_decimals, 8);
    assert_eq!(quote.feed_round_id, 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// FAILURES LEAVE NO TRACE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_non_distributor_purchase_reverts() {
    let mut suite = Suite::new();
    let id = suite.create_batch(100);
    let retailer = suite.retailer.clone();
    let before = suite.batch(id);

    let err = suite
        .ledger_exec(
            &retailer,
            LedgerExecuteMsg::BuyAsDistributor {
                batch_id: id,
                offer_price: Uint128::new(150),
            },
            100,
        )
        .unwrap_err();

    assert!(err
        .root_cause()
        .to_string()
        .contains("cannot act as distributor"));
    assert_eq!(suite.batch(id), before);
    assert_eq!(suite.balance(&retailer), STARTING_BALANCE);
}

#[test]
fn test_frozen_distributor_is_locked_out() {
    let mut suite = Suite::new();
    let id = suite.create_batch(100);
    let (admin, distributor, registry) = (
        suite.admin.clone(),
        suite.distributor.clone(),
        suite.registry.clone(),
    );

    suite
        .app
        .execute_contract(
            admin.clone(),
            registry.clone(),
            &RegistryExecuteMsg::Freeze {
                address: distributor.to_string(),
            },
            &[],
        )
        .unwrap();

    let buy = LedgerExecuteMsg::BuyAsDistributor {
        batch_id: id,
        offer_price: Uint128::new(150),
    };
    let err = suite.ledger_exec(&distributor, buy.clone(), 100).unwrap_err();
    assert!(err.root_cause().to_string().contains("Address is frozen"));

    // Unfreezing does not bring the revoked role back
    suite
        .app
        .execute_contract(
            admin.clone(),
            registry.clone(),
            &RegistryExecuteMsg::Unfreeze {
                address: distributor.to_string(),
            },
            &[],
        )
        .unwrap();
    let err = suite.ledger_exec(&distributor, buy.clone(), 100).unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));

    suite
        .app
        .execute_contract(
            admin,
            registry,
            &RegistryExecuteMsg::Grant {
                role: Role::Distributor,
                address: distributor.to_string(),
            },
            &[],
        )
        .unwrap();
    suite.ledger_exec(&distributor, buy, 100).unwrap();
    assert_eq!(suite.batch(id).status, BatchStatus::WithDistributor);
}

#[test]
fn test_settled_payment_cannot_be_released_twice() {
    let mut suite = Suite::new();
    let id = suite.create_batch(100);
    let (distributor, retailer) = (suite.distributor.clone(), suite.retailer.clone());

    suite
        .ledger_exec(
            &distributor,
            LedgerExecuteMsg::BuyAsDistributor {
                batch_id: id,
                offer_price: Uint128::new(150),
            },
            100,
        )
        .unwrap();
    suite
        .ledger_exec(&retailer, LedgerExecuteMsg::BuyAsRetailer { batch_id: id }, 150)
        .unwrap();

    // Replaying the ledger's own release straight at the vault
    let err = suite
        .app
        .execute_contract(
            suite.ledger.clone(),
            suite.escrow.clone(),
            &EscrowExecuteMsg::Release {
                depositor: None,
                reference: "batch-1-distributor".to_string(),
                payee: suite.manufacturer.to_string(),
                amount: Uint128::new(100),
            },
            &[],
        )
        .unwrap_err();

    assert!(err
        .root_cause()
        .to_string()
        .contains("Escrow already settled"));
    assert_eq!(suite.balance(&suite.manufacturer), 100);
}

#[test]
fn test_vault_admin_cannot_settle_ledger_payment() {
    let mut suite = Suite::new();
    let id = suite.create_batch(100);
    let (admin, distributor, retailer) = (
        suite.admin.clone(),
        suite.distributor.clone(),
        suite.retailer.clone(),
    );

    suite
        .ledger_exec(
            &distributor,
            LedgerExecuteMsg::BuyAsDistributor {
                batch_id: id,
                offer_price: Uint128::new(150),
            },
            100,
        )
        .unwrap();

    let err = suite
        .app
        .execute_contract(
            admin,
            suite.escrow.clone(),
            &EscrowExecuteMsg::Refund {
                depositor: Some(suite.ledger.to_string()),
                reference: "batch-1-distributor".to_string(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unauthorized"));
    assert!(suite.escrow_entry("batch-1-distributor").outstanding);
    assert_eq!(suite.balance(&distributor), STARTING_BALANCE - 100);

    // The ledger's own flow still settles the entry
    suite
        .ledger_exec(&retailer, LedgerExecuteMsg::BuyAsRetailer { batch_id: id }, 150)
        .unwrap();
    assert!(suite.escrow_entry("batch-1-distributor").released);
    assert_eq!(suite.balance(&suite.manufacturer), 100);
    assert_eq!(suite.batch(id).status, BatchStatus::WithRetailer);
}

#[test]
fn test_admin_confirms_delivery_after_retailer_is_frozen() {
    let mut suite = Suite::new();
    let id = suite.create_batch(100);
    let (admin, distributor, retailer, registry) = (
        suite.admin.clone(),
        suite.distributor.clone(),
        suite.retailer.clone(),
        suite.registry.clone(),
    );

    suite
        .ledger_exec(
            &distributor,
            LedgerExecuteMsg::BuyAsDistributor {
                batch_id: id,
                offer_price: Uint128::new(150),
            },
            100,
        )
        .unwrap();
    suite
        .ledger_exec(&retailer, LedgerExecuteMsg::BuyAsRetailer { batch_id: id }, 150)
        .unwrap();
    suite
        .app
        .execute_contract(
            admin.clone(),
            registry,
            &RegistryExecuteMsg::Freeze {
                address: retailer.to_string(),
            },
            &[],
        )
        .unwrap();

    let confirm = LedgerExecuteMsg::ConfirmDelivery { batch_id: id };
    let err = suite.ledger_exec(&retailer, confirm.clone(), 0).unwrap_err();
    assert!(err.root_cause().to_string().contains("Address is frozen"));

    suite.ledger_exec(&admin, confirm, 0).unwrap();
    assert!(suite.escrow_entry("batch-1-retailer").released);
    assert_eq!(suite.balance(&distributor), STARTING_BALANCE + 50);
    assert_eq!(suite.balance(&suite.escrow), 0);
    assert_eq!(
        suite.batch(id).retailer_payment.unwrap().state,
        PaymentState::Released
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// RETURNS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_approved_return_refunds_buyer() {
    let mut suite = Suite::new();
    let id = suite.create_batch(100);
    let (manufacturer, distributor) = (suite.manufacturer.clone(), suite.distributor.clone());

    suite
        .ledger_exec(
            &distributor,
            LedgerExecuteMsg::BuyAsDistributor {
                batch_id: id,
                offer_price: Uint128::new(150),
            },
            100,
        )
        .unwrap();
    suite
        .ledger_exec(
            &distributor,
            LedgerExecuteMsg::RequestReturn {
                batch_id: id,
                reason: "temperature excursion".to_string(),
            },
            0,
        )
        .unwrap();
    let res = suite
        .ledger_exec(
            &manufacturer,
            LedgerExecuteMsg::ResolveReturn {
                batch_id: id,
                approve: true,
            },
            0,
        )
        .unwrap();
    assert_eq!(event_attr(&res, "wasm-ReturnResolved", "approved"), "true");

    assert_eq!(suite.balance(&distributor), STARTING_BALANCE);
    assert_eq!(suite.balance(&suite.escrow), 0);
    assert_eq!(suite.escrow_entry("batch-1-distributor").status, "refunded");

    let batch = suite.batch(id);
    assert_eq!(batch.status, BatchStatus::Returned);
    assert_eq!(batch.holder, manufacturer.to_string());

    let request: ReturnRequestResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.ledger, &LedgerQueryMsg::ReturnRequest { batch_id: id })
        .unwrap();
    assert_eq!(request.status, ReturnStatus::Approved);
}
