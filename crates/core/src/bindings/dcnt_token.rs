use alloy::primitives::{B256, keccak256};
use alloy::sol;

sol! {
    #[sol(rpc)]
    contract DCNTToken {
        function transfer(address to, uint256 value) external returns (bool);
        function balanceOf(address account) external view returns (uint256 balance);
        function grantRole(bytes32 role, address account) external;
        function revokeRole(bytes32 role, address account) external;
        function hasRole(bytes32 role, address account) external view returns (bool granted);
        function updateMintAuthorization(address newMintAuthorization) external;
    }
}

pub const DEFAULT_ADMIN_ROLE: B256 = B256::ZERO;

pub fn mint_role() -> B256 {
    keccak256("MINT_ROLE")
}

pub fn update_mint_authorization_role() -> B256 {
    keccak256("UPDATE_MINT_AUTHORIZATION_ROLE")
}
