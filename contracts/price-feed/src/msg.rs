pub use pharma_chain_types::price_feed::{
    ConfigResponse, DecimalsResponse, ExecuteMsg, InstantiateMsg, LatestValueResponse, QueryMsg,
};
