use alloy::sol;

sol! {
    #[sol(rpc)]
    contract ModuleProxyFactory {
        event ModuleProxyCreation(address indexed proxy, address indexed masterCopy);
        function deployModule(
            address masterCopy,
            bytes memory initializer,
            uint256 saltNonce
        ) external returns (address proxy);
    }
}

pub const MODULE_PROXY_FACTORY_ABI: &[&str] = &[
    "function deployModule(address masterCopy, bytes initializer, uint256 saltNonce) returns (address proxy)",
];
