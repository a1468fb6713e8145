pub use pharma_chain_types::registry::{
    ConfigResponse, ExecuteMsg, HasRoleResponse, InstantiateMsg, IsFrozenResponse,
    MembersResponse, ParticipantResponse, QueryMsg,
};
