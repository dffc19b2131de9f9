use alloy::sol;

sol! {
    #[sol(rpc)]
    contract Azorius {
        function setUp(bytes memory initParams) external;
    }

    #[sol(rpc)]
    contract LinearERC20Voting {
        function setUp(bytes memory initParams) external;
        function setAzorius(address _azoriusModule) external;
    }
}

pub const AZORIUS_ABI: &[&str] = &["function setUp(bytes initParams)"];

pub const LINEAR_ERC20_VOTING_ABI: &[&str] = &[
    "function setUp(bytes initParams)",
    "function setAzorius(address _azoriusModule)",
];
