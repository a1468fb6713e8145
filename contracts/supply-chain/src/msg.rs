pub use pharma_chain_types::ledger::{
    BatchQuoteResponse, BatchResponse, BatchesResponse, ConfigResponse, ContentRefResponse,
    ExecuteMsg, InstantiateMsg, PaymentResponse, QueryMsg, ReturnRequestResponse,
};
